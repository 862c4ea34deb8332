use axum::{extract::State, Json};

use crate::{
    chat::{ChatReply, ChatRequest},
    state::AppState,
};

pub async fn ask(State(state): State<AppState>, Json(input): Json<ChatRequest>) -> Json<ChatReply> {
    Json(state.chat.ask(&input.message).await)
}
