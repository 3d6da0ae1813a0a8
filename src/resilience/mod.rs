//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Facade handler
//!     → guarded() (breaker admission)
//!     → EmployeeService call (upstream request with connect/request timeouts)
//!     → outcome recorded; upstream outages count as failures
//! ```
//!
//! There is no retry loop. While the breaker is open every route answers
//! 503 without touching the upstream.

pub mod circuit_breaker;

use std::future::Future;

pub use circuit_breaker::{BreakerError, CircuitBreaker, CircuitState};

use crate::service::{EmployeeError, EmployeeResult};

/// Run a service call under the breaker, mapping a rejection to
/// [`EmployeeError::ServiceUnavailable`].
pub async fn guarded<T, F, Fut>(breaker: &CircuitBreaker, op: F) -> EmployeeResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = EmployeeResult<T>>,
{
    match breaker.call(EmployeeError::is_upstream_outage, op).await {
        Ok(value) => Ok(value),
        Err(BreakerError::Inner(err)) => Err(err),
        Err(BreakerError::Open) => {
            tracing::warn!("Circuit open, short-circuiting call");
            Err(EmployeeError::ServiceUnavailable)
        }
    }
}
