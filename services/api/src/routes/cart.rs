use axum::{
    extract::{Path, State},
    Json,
};
use domain::orders::{
    inputs::{AddToCartInput, UpdateQuantityInput},
    CartItem, CartTotals,
};
use serde::Serialize;

use crate::{error::ApiError, sessions::CurrentSession, state::AppState};

#[derive(Clone, Debug, Serialize)]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    #[serde(flatten)]
    pub totals: CartTotals,
}

fn cart_response(state: &AppState, session_id: &str) -> Result<Json<CartResponse>, ApiError> {
    let cart = state
        .sessions
        .get(session_id)
        .map(|s| s.cart)
        .ok_or(ApiError::Unauthorized)?;

    Ok(Json(CartResponse {
        items: cart.items().to_vec(),
        totals: cart.totals(&state.catalog),
    }))
}

pub async fn get_cart(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<CartResponse>, ApiError> {
    cart_response(&state, &session.id)
}

pub async fn add_item(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(input): Json<AddToCartInput>,
) -> Result<Json<CartResponse>, ApiError> {
    if state.catalog.medicine(&input.medicine_id).is_none() {
        return Err(ApiError::NotFound("Medicine".to_string()));
    }

    state
        .sessions
        .update(&session.id, |s| s.cart.add(&input.medicine_id, input.quantity))
        .ok_or(ApiError::Unauthorized)??;

    cart_response(&state, &session.id)
}

// Quantities below 1 drop the line
pub async fn update_item(
    Path(medicine_id): Path<String>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(input): Json<UpdateQuantityInput>,
) -> Result<Json<CartResponse>, ApiError> {
    let found = state
        .sessions
        .update(&session.id, |s| s.cart.update_quantity(&medicine_id, input.quantity))
        .ok_or(ApiError::Unauthorized)??;
    if !found {
        return Err(ApiError::NotFound("Cart item".to_string()));
    }

    cart_response(&state, &session.id)
}

pub async fn remove_item(
    Path(medicine_id): Path<String>,
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<CartResponse>, ApiError> {
    let found = state
        .sessions
        .update(&session.id, |s| s.cart.remove(&medicine_id))
        .ok_or(ApiError::Unauthorized)?;
    if !found {
        return Err(ApiError::NotFound("Cart item".to_string()));
    }

    cart_response(&state, &session.id)
}
