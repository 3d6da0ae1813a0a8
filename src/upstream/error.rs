//! Upstream failure types.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while talking to the upstream service.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, timeout or body read failure.
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("upstream responded with status {0}")]
    Status(StatusCode),

    /// Body was not the expected envelope.
    #[error("malformed upstream envelope: {0}")]
    Envelope(#[from] serde_json::Error),

    /// Base URL is unusable.
    #[error("invalid upstream URL {0}")]
    InvalidUrl(String),
}

impl UpstreamError {
    /// True when the failure says the upstream itself is unhealthy, as
    /// opposed to it answering a well-formed "no".
    pub fn is_outage(&self) -> bool {
        match self {
            UpstreamError::Transport(_) => true,
            UpstreamError::Status(status) => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            UpstreamError::Envelope(_) | UpstreamError::InvalidUrl(_) => false,
        }
    }
}

/// Result type for upstream operations.
pub type UpstreamResult<T> = Result<T, UpstreamError>;
