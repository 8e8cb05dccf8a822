//! Error types for the QR station service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

// == Storage Error ==
/// Errors raised by a storage backend.
///
/// The in-memory backend never fails, but the trait contract allows real
/// backends (SQL, network KV) to surface transport or constraint failures.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Underlying backend failure
    #[error("storage backend error: {0}")]
    Backend(String),
}

// == Api Error Enum ==
/// Unified error type for request handling.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request payload failed validation
    #[error("Invalid data: {0}")]
    Validation(String),

    /// Requested resource does not exist
    #[error("{0} not found")]
    NotFound(&'static str),

    /// No unique short slug could be found within the attempt budget
    #[error("no unique short slug found after {0} attempts")]
    SlugExhausted(u32),

    /// Storage backend failure, passed through unchanged
    #[error(transparent)]
    Storage(#[from] StorageError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid data", "details": details }),
            ),
            ApiError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                json!({ "error": format!("{} not found", resource) }),
            ),
            // Internal failures are logged with their cause but reported
            // to clients with a generic message.
            ApiError::SlugExhausted(_) | ApiError::Storage(_) => {
                error!("request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for request handling.
pub type Result<T> = std::result::Result<T, ApiError>;
