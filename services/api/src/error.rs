//! services/api/src/error.rs
//!
//! Defines the primary error type for the entire API service and its mapping
//! onto HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use crate::config::ConfigError;
use linkfolio_core::CoreError;

/// The primary error type for the `api` service.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a failure that propagated up from the application core.
    #[error("{0}")]
    Core(#[from] CoreError),

    /// Represents an error from the underlying database library (startup and
    /// migrations; request-time failures arrive as `Core`).
    #[error("Database Error: {0}")]
    Database(#[from] sqlx::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network
    /// socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

/// The JSON envelope returned for every failed request.
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    message: String,
}

impl ApiError {
    /// Maps an error onto the status class and the message exposed to the
    /// caller. Internal detail never leaves this function; it is logged in
    /// `into_response` instead.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            ApiError::Core(core) => match core {
                CoreError::Validation(_) | CoreError::UnknownStep(_) => {
                    (StatusCode::BAD_REQUEST, core.to_string())
                }
                CoreError::DuplicateField(_) => (StatusCode::CONFLICT, core.to_string()),
                CoreError::AuthenticationFailed(_) => {
                    (StatusCode::UNAUTHORIZED, core.to_string())
                }
                CoreError::NotFound(_) => (StatusCode::NOT_FOUND, core.to_string()),
                CoreError::Timeout => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "The service is temporarily unavailable".to_string(),
                ),
                CoreError::Storage(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                ),
            },
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An internal error occurred".to_string(),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        if status.is_server_error() {
            error!("request failed: {self}");
        }
        (status, Json(ErrorBody { success: false, message })).into_response()
    }
}
