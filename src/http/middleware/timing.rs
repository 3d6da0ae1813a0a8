//! Execution time measurement for facade routes.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};

use crate::observability::metrics;

/// Log how long the wrapped route took and record request metrics.
pub async fn log_execution_time(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());

    let response = next.run(request).await;
    let status = response.status().as_u16();

    tracing::info!(
        method = %method,
        route = %route,
        status,
        elapsed_secs = start.elapsed().as_secs_f64(),
        "Execution time"
    );
    metrics::record_request(method.as_str(), &route, status, start);

    response
}
