use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use domain::{
    appointments::Buckets,
    users::{self, HealthRecord, HealthRecordInput, MedicalProfile, User},
};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::{
    error::ApiError,
    sessions::{CurrentSession, Session},
    state::AppState,
};

#[derive(Clone, Debug, Deserialize)]
pub struct LoginInput {
    pub name: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub user: User,
}

impl From<Session> for SessionInfo {
    fn from(session: Session) -> Self {
        Self {
            session_id: session.id,
            user: session.user,
        }
    }
}

// Mock login: any valid name and email opens a session
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse, ApiError> {
    let user = User::register(Ulid::new().to_string(), &input.name, &input.email)?;
    let session = state.sessions.create(Ulid::new().to_string(), user);

    tracing::info!("Session opened for {}", session.user.id);

    Ok((StatusCode::CREATED, Json(SessionInfo::from(session))))
}

pub async fn current(CurrentSession(session): CurrentSession) -> Json<SessionInfo> {
    Json(session.into())
}

// Onboarding intake
pub async fn complete_profile(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(profile): Json<MedicalProfile>,
) -> Result<Json<User>, ApiError> {
    let user = state
        .sessions
        .update(&session.id, |s| {
            s.user.complete_medical_profile(profile)?;
            Ok::<_, domain::Error>(s.user.clone())
        })
        .ok_or(ApiError::Unauthorized)??;

    Ok(Json(user))
}

pub async fn add_record(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Json(input): Json<HealthRecordInput>,
) -> Result<impl IntoResponse, ApiError> {
    let record = HealthRecord::create(Ulid::new().to_string(), input, state.clock.today())?;

    state
        .sessions
        .update(&session.id, |s| s.records.push(record.clone()))
        .ok_or(ApiError::Unauthorized)?;

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn timeline(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Json<Vec<users::TimelineEntry>> {
    let buckets = Buckets::split(state.user_appointments(&session.user.id), state.clock.now());
    let orders = state.user_orders(&session.user.id);

    Json(users::timeline(&session.records, &buckets.history, &orders))
}
