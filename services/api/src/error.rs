use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cqrs_es::AggregateError;
use domain::FieldError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Session required")]
    Unauthorized,
    #[error("Forbidden action")]
    Forbidden,
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("{message}")]
    Invalid {
        message: String,
        fields: Vec<FieldError>,
    },
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "SESSION_REQUIRED"),
            ApiError::Forbidden => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::Invalid { .. } => (StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_FAILED"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let message = self.to_string();
        let fields = match self {
            ApiError::Invalid { fields, .. } => fields,
            _ => Vec::new(),
        };

        (
            status,
            Json(ErrorBody {
                error: ErrorDetail { code, message, fields },
            }),
        )
            .into_response()
    }
}

impl From<domain::Error> for ApiError {
    fn from(err: domain::Error) -> Self {
        use domain::Error;

        match err {
            Error::NotFound { entity } => ApiError::NotFound(entity),
            Error::Forbidden => ApiError::Forbidden,
            Error::Uniqueness { .. } | Error::InvalidStateTransition { .. } => {
                ApiError::Conflict(err.to_string())
            }
            Error::Validation { message } => ApiError::Invalid { message, fields: Vec::new() },
            Error::InvalidFields(ref fields) => ApiError::Invalid {
                message: err.to_string(),
                fields: fields.clone(),
            },
            Error::Catalog(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<AggregateError<domain::Error>> for ApiError {
    fn from(err: AggregateError<domain::Error>) -> Self {
        match err {
            AggregateError::UserError(e) => e.into(),
            AggregateError::AggregateConflict => {
                ApiError::Conflict("Concurrent update, retry".to_string())
            }
            other => ApiError::Internal(other.to_string()),
        }
    }
}
