use std::collections::HashSet;

use axum::{extract::State, Json};
use domain::DomainEvent;

use crate::{sessions::CurrentSession, state::AppState};

/// Events of the caller's own appointments and orders
pub async fn list_events(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Json<Vec<DomainEvent>> {
    let user_id = &session.user.id;
    let owned: HashSet<String> = state
        .user_appointments(user_id)
        .into_iter()
        .map(|a| a.id)
        .chain(state.user_orders(user_id).into_iter().map(|o| o.id))
        .collect();

    Json(state.event_log.for_aggregates(&owned))
}
