//! Configuration validation.
//!
//! Serde handles syntax; this checks value ranges and that addresses and
//! URLs parse. Every problem is reported, not just the first.

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self { field, message: message.into() }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a parsed configuration.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }
    if config.listener.max_body_bytes == 0 {
        errors.push(ValidationError::new("listener.max_body_bytes", "must be > 0"));
    }

    match Url::parse(&config.upstream.base_url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "upstream.base_url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new(
            "upstream.base_url",
            format!("'{}' is not a URL: {}", config.upstream.base_url, e),
        )),
    }
    if config.upstream.connect_timeout_ms == 0 {
        errors.push(ValidationError::new("upstream.connect_timeout_ms", "must be > 0"));
    }
    if config.upstream.request_timeout_secs == 0 {
        errors.push(ValidationError::new("upstream.request_timeout_secs", "must be > 0"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be > 0"));
    }

    let cb = &config.circuit_breaker;
    if !(cb.failure_rate_threshold > 0.0 && cb.failure_rate_threshold <= 100.0) {
        errors.push(ValidationError::new(
            "circuit_breaker.failure_rate_threshold",
            "must be within (0, 100]",
        ));
    }
    if cb.sliding_window_size == 0 {
        errors.push(ValidationError::new("circuit_breaker.sliding_window_size", "must be > 0"));
    }
    if cb.minimum_calls == 0 || cb.minimum_calls > cb.sliding_window_size {
        errors.push(ValidationError::new(
            "circuit_breaker.minimum_calls",
            "must be between 1 and sliding_window_size",
        ));
    }
    if cb.half_open_max_calls == 0 {
        errors.push(ValidationError::new("circuit_breaker.half_open_max_calls", "must be > 0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
