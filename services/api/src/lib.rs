//! CareHub HTTP API

use axum::{
    routing::{get, post, put},
    Router,
};

pub mod chat;
pub mod config;
pub mod error;
pub mod payments;
pub mod routes;
pub mod sessions;
pub mod state;

pub use config::Config;
pub use state::AppState;

use routes::{appointments, assistant, cart, catalog, events, orders, session};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/session", post(session::login).get(session::current))
        .route("/session/profile", put(session::complete_profile))
        .route("/session/records", post(session::add_record))
        .route("/session/timeline", get(session::timeline))
        .route("/locations", get(catalog::locations))
        .route("/doctors", get(catalog::list_doctors))
        .route("/doctors/suggestions", get(catalog::doctor_suggestions))
        .route("/doctors/:id", get(catalog::get_doctor))
        .route("/hospitals", get(catalog::list_hospitals))
        .route("/hospitals/suggestions", get(catalog::hospital_suggestions))
        .route("/hospitals/:id", get(catalog::get_hospital))
        .route("/medicines", get(catalog::list_medicines))
        .route("/medicines/:id", get(catalog::get_medicine))
        .route("/calendar", get(appointments::calendar))
        .route("/sessions/:session/slots", get(appointments::slots))
        .route(
            "/appointments",
            post(appointments::start_booking).get(appointments::list_appointments),
        )
        .route(
            "/appointments/:id",
            get(appointments::get_appointment).delete(appointments::cancel_appointment),
        )
        .route("/appointments/:id/date", post(appointments::select_date))
        .route("/appointments/:id/session", post(appointments::select_session))
        .route("/appointments/:id/time", post(appointments::select_time))
        .route("/appointments/:id/confirm", post(appointments::confirm_time))
        .route("/appointments/:id/back", post(appointments::go_back))
        .route(
            "/appointments/:id/payment",
            get(appointments::payment_summary).post(appointments::pay),
        )
        .route("/appointments/:id/rating", post(appointments::rate_appointment))
        .route("/cart", get(cart::get_cart))
        .route("/cart/items", post(cart::add_item))
        .route(
            "/cart/items/:medicine_id",
            put(cart::update_item).delete(cart::remove_item),
        )
        .route("/orders", post(orders::checkout).get(orders::list_orders))
        .route("/orders/:id", get(orders::get_order))
        .route("/assistant", post(assistant::ask))
        .route("/events", get(events::list_events))
        .with_state(state)
}
