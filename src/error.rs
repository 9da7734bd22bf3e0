//! Error types
//!
//! `FetchError` covers calls to the vendor APIs and is cloneable so one result
//! can be handed to every caller waiting on the same in-flight request.
//! `ApiError` is what the admin HTTP surface returns.

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Fetch Error Enum ==
/// Failure of a remote operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// HTTP 429, with the server's `Retry-After` hint when it sent a numeric one
    #[error("Rate limited: {message}")]
    RateLimited {
        retry_after: Option<Duration>,
        message: String,
    },

    /// Missing credentials or a 401/403 response
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request exceeded its timeout
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Any other non-success status
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Connection-level failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body was not the JSON we expected
    #[error("Decode error: {0}")]
    Decode(String),

    /// Background task failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FetchError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::RateLimited { .. })
    }

    /// Server-supplied retry hint, if this is a rate-limit error carrying one.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            FetchError::RateLimited { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Decode(err.to_string())
    }
}

/// Convenience Result type for remote operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// == API Error Enum ==
/// Error returned by the admin HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Key not found: {0}")]
    NotFound(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

/// Convenience Result type for the admin handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
