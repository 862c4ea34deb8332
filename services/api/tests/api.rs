use std::{sync::Arc, time::Duration};

use api::{router, AppState, Config};
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use domain::{catalog::Catalog, FixedClock};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    test_app_with(Duration::ZERO)
}

fn test_app_with(payment_delay: Duration) -> Router {
    // Friday 16 October 2026, 09:00 local
    let now = NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap();
    let config = Config {
        payment_delay,
        chat_api_url: "http://127.0.0.1:9".to_string(),
        ..Default::default()
    };
    router(AppState::new(
        config,
        Catalog::seeded().unwrap(),
        Arc::new(FixedClock(now)),
    ))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    session: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = session {
        builder = builder.header("x-session-id", id);
    }
    let req = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn login(app: &Router) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/session",
        None,
        Some(json!({ "name": "Asha Rao", "email": "asha@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["session_id"].as_str().unwrap().to_string()
}

/// Walks the wizard for Dr. Arjun Mehta up to the payment step
async fn booking_at_payment(app: &Router, session: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/appointments",
        Some(session),
        Some(json!({ "doctor_id": "d1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["step"], "date");
    let id = body["id"].as_str().unwrap().to_string();

    let steps = [
        ("date", json!({ "date": "2026-10-20" })),
        ("session", json!({ "session": "morning" })),
        ("time", json!({ "time": "10:00 AM" })),
    ];
    for (step, payload) in steps {
        let (status, body) = send(
            app,
            "POST",
            &format!("/appointments/{id}/{step}"),
            Some(session),
            Some(payload),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{step}: {body}");
    }

    let (status, body) =
        send(app, "POST", &format!("/appointments/{id}/confirm"), Some(session), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], "payment");
    id
}

#[tokio::test]
async fn requires_session() {
    let app = test_app();
    let (status, body) = send(&app, "GET", "/cart", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "SESSION_REQUIRED");

    let (status, _) = send(&app, "GET", "/cart", Some("unknown"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_validates_email() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/session",
        None,
        Some(json!({ "name": "Asha", "email": "asha" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["fields"][0]["field"], "email");
}

#[tokio::test]
async fn books_and_pays_for_an_appointment() {
    let app = test_app();
    let session = login(&app).await;
    let id = booking_at_payment(&app, &session).await;

    let (status, summary) =
        send(&app, "GET", &format!("/appointments/{id}/payment"), Some(&session), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["consultation_fee"], 800);
    assert_eq!(summary["booking_fee"], 15);
    assert_eq!(summary["total"], 815);
    assert!(summary["upi_link"].as_str().unwrap().contains("am=815.00"));

    let (status, appointment) =
        send(&app, "POST", &format!("/appointments/{id}/payment"), Some(&session), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(appointment["step"], "confirmed");
    assert_eq!(appointment["status"], "Upcoming");
    assert_eq!(appointment["payment_status"], "Paid");
    assert_eq!(appointment["hospital"], "City Heart Institute");

    let (_, buckets) = send(&app, "GET", "/appointments", Some(&session), None).await;
    assert_eq!(buckets["current"].as_array().unwrap().len(), 1);
    assert!(buckets["history"].as_array().unwrap().is_empty());

    let (status, _) =
        send(&app, "DELETE", &format!("/appointments/{id}"), Some(&session), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, buckets) = send(&app, "GET", "/appointments", Some(&session), None).await;
    assert_eq!(buckets["history"][0]["status"], "Cancelled");
}

#[tokio::test]
async fn payment_after_going_back_is_rejected() {
    let app = test_app();
    let session = login(&app).await;
    let id = booking_at_payment(&app, &session).await;

    let (status, body) =
        send(&app, "POST", &format!("/appointments/{id}/back"), Some(&session), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["step"], "time");
    assert_eq!(body["time"], "10:00 AM");

    let (status, _) =
        send(&app, "POST", &format!("/appointments/{id}/payment"), Some(&session), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn payment_outside_payment_step_fails_without_waiting() {
    let app = test_app_with(Duration::from_secs(60));
    let session = login(&app).await;
    let (_, body) = send(
        &app,
        "POST",
        "/appointments",
        Some(&session),
        Some(json!({ "doctor_id": "d1" })),
    )
    .await;
    let id = body["id"].as_str().unwrap();

    let pay_path = format!("/appointments/{id}/payment");
    let pay = send(&app, "POST", &pay_path, Some(&session), None);
    let (status, body) = tokio::time::timeout(Duration::from_secs(5), pay)
        .await
        .expect("payment should be refused before the simulated delay");
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn past_dates_are_rejected() {
    let app = test_app();
    let session = login(&app).await;
    let (_, body) = send(
        &app,
        "POST",
        "/appointments",
        Some(&session),
        Some(json!({ "doctor_id": "d4" })),
    )
    .await;
    let id = body["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/appointments/{id}/date"),
        Some(&session),
        Some(json!({ "date": "2026-10-15" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn appointments_are_private_to_their_session() {
    let app = test_app();
    let owner = login(&app).await;
    let other = login(&app).await;
    let id = booking_at_payment(&app, &owner).await;

    let (status, _) = send(&app, "GET", &format!("/appointments/{id}"), Some(&other), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn calendar_disables_past_days() {
    let app = test_app();
    let (status, month) = send(&app, "GET", "/calendar?year=2026&month=10", None, None).await;
    assert_eq!(status, StatusCode::OK);

    let days: Vec<&Value> = month["weeks"]
        .as_array()
        .unwrap()
        .iter()
        .flat_map(|w| w.as_array().unwrap())
        .filter(|d| !d.is_null())
        .collect();
    assert_eq!(days.len(), 31);
    for day in days {
        let date = day["date"].as_str().unwrap();
        assert_eq!(day["disabled"].as_bool().unwrap(), date < "2026-10-16", "{date}");
    }
}

#[tokio::test]
async fn searches_doctors() {
    let app = test_app();
    let (status, doctors) = send(&app, "GET", "/doctors?q=cardio", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = doctors
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["d1", "d4"]);

    let (_, doctors) = send(&app, "GET", "/doctors?location=Chennai&q=cardio", None, None).await;
    assert_eq!(doctors.as_array().unwrap().len(), 1);

    let (_, suggestions) = send(&app, "GET", "/hospitals/suggestions?q=care", None, None).await;
    assert!(suggestions.as_array().unwrap().len() <= 5);
}

#[tokio::test]
async fn cart_merges_and_drops_lines() {
    let app = test_app();
    let session = login(&app).await;

    for _ in 0..2 {
        let (status, _) = send(
            &app,
            "POST",
            "/cart/items",
            Some(&session),
            Some(json!({ "medicine_id": "m1" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (_, cart) = send(&app, "GET", "/cart", Some(&session), None).await;
    assert_eq!(cart["items"], json!([{ "medicine_id": "m1", "quantity": 2 }]));
    assert_eq!(cart["subtotal"], 60);
    assert_eq!(cart["delivery_fee"], 50);
    assert_eq!(cart["total"], 110);

    let (status, cart) = send(
        &app,
        "PUT",
        "/cart/items/m1",
        Some(&session),
        Some(json!({ "quantity": 0 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(cart["items"].as_array().unwrap().is_empty());
    assert_eq!(cart["delivery_fee"], 0);

    let (status, _) = send(
        &app,
        "POST",
        "/cart/items",
        Some(&session),
        Some(json!({ "medicine_id": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn oversized_cart_quantities_are_rejected() {
    let app = test_app();
    let session = login(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/cart/items",
        Some(&session),
        Some(json!({ "medicine_id": "m1", "quantity": u32::MAX })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    send(
        &app,
        "POST",
        "/cart/items",
        Some(&session),
        Some(json!({ "medicine_id": "m1", "quantity": 2 })),
    )
    .await;
    let (status, _) = send(
        &app,
        "PUT",
        "/cart/items/m1",
        Some(&session),
        Some(json!({ "quantity": 4_000_000_000_i64 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, cart) = send(&app, "GET", "/cart", Some(&session), None).await;
    assert_eq!(cart["items"], json!([{ "medicine_id": "m1", "quantity": 2 }]));
    assert_eq!(cart["total"], 110);
}

#[tokio::test]
async fn checkout_validates_then_places_order() {
    let app = test_app();
    let session = login(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/cart/items",
        Some(&session),
        Some(json!({ "medicine_id": "m8", "quantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        "POST",
        "/orders",
        Some(&session),
        Some(json!({
            "delivery": { "name": "", "phone": "123", "address": "14 MG Road" },
            "payment_method": "Upi"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = body["error"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["name", "phone"]);

    let (status, order) = send(
        &app,
        "POST",
        "/orders",
        Some(&session),
        Some(json!({
            "delivery": { "name": "Asha Rao", "phone": "9876543210", "address": "14 MG Road" },
            "payment_method": "CashOnDelivery"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["subtotal"], 320);
    assert_eq!(order["total"], 370);
    assert_eq!(order["prescription_required"], true);

    let (_, cart) = send(&app, "GET", "/cart", Some(&session), None).await;
    assert!(cart["items"].as_array().unwrap().is_empty());

    let (_, orders) = send(&app, "GET", "/orders", Some(&session), None).await;
    assert_eq!(orders.as_array().unwrap().len(), 1);

    let (_, timeline) = send(&app, "GET", "/session/timeline", Some(&session), None).await;
    assert_eq!(timeline[0]["kind"], "order");

    let (status, _) = send(
        &app,
        "POST",
        "/orders",
        Some(&session),
        Some(json!({
            "delivery": { "name": "Asha Rao", "phone": "9876543210", "address": "14 MG Road" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "empty cart");
}

#[tokio::test]
async fn onboarding_sets_medical_profile() {
    let app = test_app();
    let session = login(&app).await;

    let (_, info) = send(&app, "GET", "/session", Some(&session), None).await;
    assert_eq!(info["user"]["has_medical_profile"], false);

    let (status, user) = send(
        &app,
        "PUT",
        "/session/profile",
        Some(&session),
        Some(json!({ "blood_group": "B+", "allergies": ["Sulfa"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["has_medical_profile"], true);

    let (status, _) = send(
        &app,
        "POST",
        "/session/records",
        Some(&session),
        Some(json!({ "date": "2026-09-01", "kind": "LabReport", "title": "HbA1c" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, timeline) = send(&app, "GET", "/session/timeline", Some(&session), None).await;
    assert_eq!(timeline[0]["title"], "HbA1c");
}

#[tokio::test]
async fn assistant_fails_closed() {
    let app = test_app();
    let (status, body) = send(
        &app,
        "POST",
        "/assistant",
        None,
        Some(json!({ "message": "Which doctor treats migraines?" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["reply"], api::chat::APOLOGY);
}

#[tokio::test]
async fn commands_are_logged_as_domain_events() {
    let app = test_app();
    let session = login(&app).await;
    booking_at_payment(&app, &session).await;

    let (status, _) = send(&app, "GET", "/events", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, events) = send(&app, "GET", "/events", Some(&session), None).await;
    let types: Vec<&str> = events
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["event_type"].as_str().unwrap())
        .collect();
    assert_eq!(
        types,
        vec![
            "Appointment:BookingStarted",
            "Appointment:DateSelected",
            "Appointment:SessionSelected",
            "Appointment:TimeSelected",
            "Appointment:TimeConfirmed",
        ]
    );
}

#[tokio::test]
async fn events_are_private_to_their_session() {
    let app = test_app();
    let first = login(&app).await;
    booking_at_payment(&app, &first).await;

    let second = login(&app).await;
    let (status, events) = send(&app, "GET", "/events", Some(&second), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(events, json!([]));

    let (_, events) = send(&app, "GET", "/events", Some(&first), None).await;
    assert_eq!(events.as_array().unwrap().len(), 5);
}
