//! Relay Errors
//!
//! Everything that can go wrong between accepting a chat request and
//! opening the backend stream. Callers map any of these to the same
//! generic client-facing failure; the variants exist for logging.

use axum::http::StatusCode;

/// Errors raised while opening a relayed chat stream
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// The request body was not a valid chat request
    #[error("invalid request body: {0}")]
    RequestParse(#[from] serde_json::Error),

    /// The backend could not be reached
    #[error("backend request failed: {0}")]
    Backend(#[from] reqwest::Error),

    /// The backend answered with a non-success status
    #[error("backend returned status {0}")]
    BackendStatus(StatusCode),
}
