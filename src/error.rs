//! Error types for the title suggestion service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Service Error ==
/// Errors raised while deriving cache keys.
///
/// This is the only error the cache service surfaces to its callers; lookups
/// and stores report failure as a miss or `false` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CacheServiceError {
    /// Content or backend name was empty
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

// == Store Error ==
/// Infrastructure failures reported by a suggestion store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached or refused the operation
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Store is full and nothing could be evicted
    #[error("Store full: {0}")]
    Full(String),
}

// == Api Error ==
/// Errors returned from HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// No backend produced suggestions
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::GenerationFailed(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for HTTP handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
