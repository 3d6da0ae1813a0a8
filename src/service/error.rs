//! Domain error kinds surfaced to the HTTP facade.

use thiserror::Error;

use crate::upstream::UpstreamError;

/// Fixed message returned while the circuit breaker is open.
pub const SERVICE_UNAVAILABLE_MESSAGE: &str =
    "Service temporarily unavailable. Please try again later.";

/// Errors produced by the employee service.
///
/// Upstream and envelope failures never escape raw; they ride along as the
/// `source` of one of these kinds.
#[derive(Debug, Error)]
pub enum EmployeeError {
    #[error("{message}")]
    NotFound {
        message: String,
        #[source]
        source: Option<UpstreamError>,
    },

    #[error("{message}")]
    NotCreated {
        message: String,
        #[source]
        source: Option<UpstreamError>,
    },

    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    ValidationFailed(String),

    #[error("{}", SERVICE_UNAVAILABLE_MESSAGE)]
    ServiceUnavailable,

    #[error("{0}")]
    Unexpected(String),
}

impl EmployeeError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound { message: message.into(), source: None }
    }

    pub fn not_found_from(message: impl Into<String>, source: UpstreamError) -> Self {
        Self::NotFound { message: message.into(), source: Some(source) }
    }

    pub fn not_created_from(message: impl Into<String>, source: UpstreamError) -> Self {
        Self::NotCreated { message: message.into(), source: Some(source) }
    }

    /// Whether this failure should count against the circuit breaker.
    pub fn is_upstream_outage(&self) -> bool {
        match self {
            Self::NotFound { source: Some(source), .. }
            | Self::NotCreated { source: Some(source), .. } => source.is_outage(),
            Self::Unexpected(_) => true,
            _ => false,
        }
    }
}

/// Result type for employee operations.
pub type EmployeeResult<T> = Result<T, EmployeeError>;
