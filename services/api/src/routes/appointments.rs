use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Datelike;
use domain::appointments::{
    self,
    inputs::{CalendarInput, RateInput, SelectDateInput, SelectSessionInput, SelectTimeInput, StartBookingInput},
    Appointment, Buckets, CalendarMonth, Command, TimeSession,
};
use ulid::Ulid;

use crate::{
    error::ApiError,
    payments::PaymentSummary,
    sessions::CurrentSession,
    state::{command_metadata, AppState},
};

async fn execute(
    state: &AppState,
    id: &str,
    user_id: &str,
    command: Command,
) -> Result<Appointment, ApiError> {
    state.appointment(id, user_id)?;

    state
        .appointments_cqrs
        .execute_with_metadata(id, command, command_metadata())
        .await?;

    state.appointment(id, user_id)
}

// Calendar grid for the wizard's date step; defaults to the current month
pub async fn calendar(
    State(state): State<AppState>,
    Query(input): Query<CalendarInput>,
) -> Result<Json<CalendarMonth>, ApiError> {
    let today = state.clock.today();
    let month = CalendarMonth::new(
        input.year.unwrap_or(today.year()),
        input.month.unwrap_or(today.month()),
        today,
    )?;
    Ok(Json(month))
}

pub async fn slots(Path(session): Path<TimeSession>) -> Json<&'static [&'static str]> {
    Json(session.slots())
}

// Open the booking wizard
pub async fn start_booking(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(input): Json<StartBookingInput>,
) -> Result<impl IntoResponse, ApiError> {
    let (doctor, hospital) = state
        .catalog
        .booking_target(&input.doctor_id, input.hospital.as_deref())?;

    let aggregate_id = Ulid::new().to_string();
    let command = Command::StartBooking {
        id: aggregate_id.clone(),
        user_id: session.user.id.clone(),
        doctor,
        hospital,
    };

    state
        .appointments_cqrs
        .execute_with_metadata(&aggregate_id, command, command_metadata())
        .await?;

    let appointment = state.appointment(&aggregate_id, &session.user.id)?;
    Ok((StatusCode::CREATED, Json(appointment)))
}

// Current and history buckets of confirmed appointments
pub async fn list_appointments(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Json<Buckets> {
    Json(Buckets::split(
        state.user_appointments(&session.user.id),
        state.clock.now(),
    ))
}

pub async fn get_appointment(
    Path(id): Path<String>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Appointment>, ApiError> {
    Ok(Json(state.appointment(&id, &session.user.id)?))
}

pub async fn select_date(
    Path(id): Path<String>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(input): Json<SelectDateInput>,
) -> Result<Json<Appointment>, ApiError> {
    let command = Command::SelectDate { date: input.date };
    Ok(Json(execute(&state, &id, &session.user.id, command).await?))
}

pub async fn select_session(
    Path(id): Path<String>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(input): Json<SelectSessionInput>,
) -> Result<Json<Appointment>, ApiError> {
    let command = Command::SelectSession { session: input.session };
    Ok(Json(execute(&state, &id, &session.user.id, command).await?))
}

pub async fn select_time(
    Path(id): Path<String>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(input): Json<SelectTimeInput>,
) -> Result<Json<Appointment>, ApiError> {
    let command = Command::SelectTime { time: input.time };
    Ok(Json(execute(&state, &id, &session.user.id, command).await?))
}

pub async fn confirm_time(
    Path(id): Path<String>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Appointment>, ApiError> {
    Ok(Json(execute(&state, &id, &session.user.id, Command::ConfirmTime).await?))
}

pub async fn go_back(
    Path(id): Path<String>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Appointment>, ApiError> {
    Ok(Json(execute(&state, &id, &session.user.id, Command::GoBack).await?))
}

pub async fn payment_summary(
    Path(id): Path<String>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<PaymentSummary>, ApiError> {
    let appointment = awaiting_payment(&state, &id, &session.user.id)?;
    Ok(Json(PaymentSummary::for_appointment(&appointment, &state.config)?))
}

fn awaiting_payment(state: &AppState, id: &str, user_id: &str) -> Result<Appointment, ApiError> {
    let appointment = state.appointment(id, user_id)?;
    if appointment.step != appointments::BookingStep::Payment {
        return Err(ApiError::Conflict(format!(
            "Appointment is at the {} step",
            appointment.step
        )));
    }
    Ok(appointment)
}

// Simulated payment: wait, then confirm. If the wizard left the payment
// step meanwhile the aggregate rejects the late confirmation.
pub async fn pay(
    Path(id): Path<String>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Appointment>, ApiError> {
    awaiting_payment(&state, &id, &session.user.id)?;

    tracing::info!("Processing payment for appointment {}", id);
    tokio::time::sleep(state.config.payment_delay).await;

    let command = Command::CompletePayment {
        payment_reference: format!("pay_{}", Ulid::new()),
    };
    let appointment = execute(&state, &id, &session.user.id, command).await?;

    tracing::info!("Appointment {} confirmed", id);
    Ok(Json(appointment))
}

pub async fn rate_appointment(
    Path(id): Path<String>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(input): Json<RateInput>,
) -> Result<Json<Appointment>, ApiError> {
    let command = Command::Rate {
        doctor_rating: input.doctor_rating,
        service_rating: input.service_rating,
    };
    Ok(Json(execute(&state, &id, &session.user.id, command).await?))
}

pub async fn cancel_appointment(
    Path(id): Path<String>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Appointment>, ApiError> {
    Ok(Json(execute(&state, &id, &session.user.id, Command::Cancel).await?))
}
