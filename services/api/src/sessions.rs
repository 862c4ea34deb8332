use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::{orders::Cart, users::{HealthRecord, User}};
use serde::Serialize;

use crate::{error::ApiError, state::AppState};

pub const SESSION_HEADER: &str = "x-session-id";

/// Per-login state; lost when the process exits
#[derive(Clone, Debug, Serialize)]
pub struct Session {
    pub id: String,
    pub user: User,
    pub cart: Cart,
    pub records: Vec<HealthRecord>,
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn create(&self, id: String, user: User) -> Session {
        let session = Session {
            id: id.clone(),
            user,
            cart: Cart::default(),
            records: Vec::new(),
        };
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, session.clone());
        session
    }

    pub fn get(&self, id: &str) -> Option<Session> {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
    }

    /// Runs `f` against the stored session, if it still exists
    pub fn update<T>(&self, id: &str, f: impl FnOnce(&mut Session) -> T) -> Option<T> {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(id)
            .map(f)
    }
}

/// Snapshot of the caller's session, resolved from the session header
pub struct CurrentSession(pub Session);

#[async_trait]
impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        state
            .sessions
            .get(id)
            .map(CurrentSession)
            .ok_or(ApiError::Unauthorized)
    }
}
