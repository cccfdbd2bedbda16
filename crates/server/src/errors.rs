use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

/// Handler error. Handled failures carry an `{"error": ...}` body; anything
/// else is a bare status.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self { status, error: Some(error.into()) }
    }

    pub fn not_found(error: impl Into<String>) -> Self { Self::new(StatusCode::NOT_FOUND, error) }

    pub fn bad_request(error: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, error) }

    pub fn internal() -> Self {
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, error: None }
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        match self.error {
            Some(msg) => (self.status, Json(ErrorBody::new(msg))).into_response(),
            None => self.status.into_response(),
        }
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::NotFound(msg) => JsonApiError::not_found(msg),
            ServiceError::Conflict(msg) => JsonApiError::bad_request(msg),
            other => {
                error!(error = %other, "request failed");
                JsonApiError::internal()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("database unavailable: {0}")]
    Database(String),
    #[error("migration failed: {0}")]
    Migration(String),
    #[error("seeding failed: {0}")]
    Seed(#[from] ServiceError),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
