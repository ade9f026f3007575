//! Error types for upstream requests

use thiserror::Error;

/// Errors that can occur when calling an upstream provider
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Network-level error during HTTP communication
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request did not complete within the timeout
    #[error("request timed out")]
    Timeout,

    /// Upstream answered with a non-success status
    #[error("upstream returned HTTP {status}")]
    Status { status: u16 },

    /// Body was not a JSON object
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl UpstreamError {
    pub(crate) fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Network(e)
        }
    }
}
