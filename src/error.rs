//! Error types for the Warrity service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Upstream Error Enum ==
/// Failures reported by the remote warranty API.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    /// The API answered 429 Too Many Requests
    #[error("Upstream rate limit reached")]
    RateLimited,

    /// The bearer token was missing or rejected
    #[error("Upstream rejected credentials")]
    Unauthorized,

    /// Any other non-success status
    #[error("Upstream returned status {0}")]
    Status(u16),

    /// The request never produced a response
    #[error("Upstream unreachable: {0}")]
    Transport(String),
}

impl UpstreamError {
    /// Whether a cached copy may stand in for the failed response.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            UpstreamError::RateLimited | UpstreamError::Transport(_)
        )
    }
}

// == API Error Enum ==
/// Unified error type for the HTTP surface.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Key not found in cache, or its entry has expired
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the service.
pub type Result<T> = std::result::Result<T, ApiError>;
