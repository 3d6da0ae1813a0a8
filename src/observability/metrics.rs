//! Metrics collection and exposition.
//!
//! # Metrics
//! - `employee_api_requests_total` (counter): requests by method, route, status
//! - `employee_api_request_duration_seconds` (histogram): facade latency
//! - `employee_api_upstream_calls_total` (counter): upstream calls by method, status
//! - `employee_api_circuit_breaker_state` (gauge): 0=closed, 1=open, 2=half-open
//!
//! Recording without an installed exporter is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::resilience::CircuitState;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one facade request.
pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    counter!(
        "employee_api_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!(
        "employee_api_request_duration_seconds",
        "method" => method.to_string(),
        "route" => route.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Record one upstream call; status 0 means no response was received.
pub fn record_upstream_call(method: &'static str, status: u16) {
    counter!(
        "employee_api_upstream_calls_total",
        "method" => method,
        "status" => status.to_string()
    )
    .increment(1);
}

/// Publish the breaker state.
pub fn record_circuit_state(state: CircuitState) {
    let value = match state {
        CircuitState::Closed => 0.0,
        CircuitState::Open => 1.0,
        CircuitState::HalfOpen => 2.0,
    };
    gauge!("employee_api_circuit_breaker_state").set(value);
}
