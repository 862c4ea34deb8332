use axum::{
    extract::{Path, Query, State},
    Json,
};
use domain::{
    catalog::{Doctor, Hospital, Medicine},
    search::{self, SearchQuery},
};
use serde::Deserialize;

use crate::{error::ApiError, state::AppState};

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SuggestionQuery {
    #[serde(default)]
    pub q: String,
}

pub async fn locations(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.locations())
}

pub async fn list_doctors(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Doctor>> {
    Json(
        search::filter_doctors(&state.catalog.doctors, &query)
            .into_iter()
            .cloned()
            .collect(),
    )
}

pub async fn doctor_suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestionQuery>,
) -> Json<Vec<String>> {
    Json(search::doctor_suggestions(&state.catalog.doctors, &query.q))
}

pub async fn get_doctor(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Doctor>, ApiError> {
    state
        .catalog
        .doctor(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Doctor".to_string()))
}

pub async fn list_hospitals(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Hospital>> {
    Json(
        search::filter_hospitals(&state.catalog.hospitals, &query)
            .into_iter()
            .cloned()
            .collect(),
    )
}

pub async fn hospital_suggestions(
    State(state): State<AppState>,
    Query(query): Query<SuggestionQuery>,
) -> Json<Vec<String>> {
    Json(search::hospital_suggestions(&state.catalog.hospitals, &query.q))
}

pub async fn get_hospital(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Hospital>, ApiError> {
    state
        .catalog
        .hospital(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Hospital".to_string()))
}

pub async fn list_medicines(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Medicine>> {
    Json(
        search::filter_medicines(&state.catalog.medicines, &query)
            .into_iter()
            .cloned()
            .collect(),
    )
}

pub async fn get_medicine(
    Path(id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<Medicine>, ApiError> {
    state
        .catalog
        .medicine(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Medicine".to_string()))
}
