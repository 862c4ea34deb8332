use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use domain::orders::{inputs::CheckoutInput, Command, Order};
use ulid::Ulid;

use crate::{
    error::ApiError,
    sessions::CurrentSession,
    state::{command_metadata, AppState},
};

// Check out the session cart; ordered quantities leave the cart once placed
pub async fn checkout(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(input): Json<CheckoutInput>,
) -> Result<impl IntoResponse, ApiError> {
    let aggregate_id = Ulid::new().to_string();
    let lines = session.cart.lines(&state.catalog);
    let command = Command::PlaceOrder {
        id: aggregate_id.clone(),
        user_id: session.user.id.clone(),
        delivery: input.delivery,
        payment_method: input.payment_method,
        lines: lines.clone(),
    };

    state
        .orders_cqrs
        .execute_with_metadata(&aggregate_id, command, command_metadata())
        .await?;

    state.sessions.update(&session.id, |s| s.cart.deduct(&lines));

    let order = state.order(&aggregate_id, &session.user.id)?;
    tracing::info!("Order {} placed, total {}", order.id, order.total);

    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn list_orders(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Json<Vec<Order>> {
    Json(state.user_orders(&session.user.id))
}

pub async fn get_order(
    Path(id): Path<String>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Order>, ApiError> {
    Ok(Json(state.order(&id, &session.user.id)?))
}
