//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with every employee route
//! - Wire up middleware (tracing, request ID, timeout, body limit, timing)
//! - Build the upstream client, service and circuit breaker from config
//! - Serve until the shutdown signal, draining in-flight requests

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    http::Request,
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::http::error::panic_response;
use crate::http::handlers;
use crate::http::middleware::log_execution_time;
use crate::resilience::CircuitBreaker;
use crate::service::{EmployeeService, UpstreamEmployeeService};
use crate::upstream::{UpstreamClient, UpstreamResult};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<dyn EmployeeService>,
    pub breaker: Arc<CircuitBreaker>,
}

/// HTTP server for the employee API.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a server talking to the configured upstream.
    pub fn new(config: GatewayConfig) -> UpstreamResult<Self> {
        let client = UpstreamClient::new(&config.upstream)?;
        let service = Arc::new(UpstreamEmployeeService::new(Arc::new(client)));
        Ok(Self::with_service(config, service))
    }

    /// Create a server around an existing service implementation.
    pub fn with_service(config: GatewayConfig, service: Arc<dyn EmployeeService>) -> Self {
        let breaker = Arc::new(CircuitBreaker::new(config.circuit_breaker.clone()));
        if !breaker.is_enabled() {
            tracing::warn!("Circuit breaker disabled");
        }

        let state = AppState { service, breaker };
        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route(
                "/api/v1/employee",
                get(handlers::get_all_employees).post(handlers::create_employee),
            )
            .route("/api/v1/employee/search/{search}", get(handlers::search_employees))
            .route(
                "/api/v1/employee/highestSalary",
                get(handlers::highest_salary).delete(handlers::delete_employee_at),
            )
            .route(
                "/api/v1/employee/topTenHighestEarningEmployeeNames",
                get(handlers::top_ten_earner_names).delete(handlers::delete_employee_at),
            )
            .route(
                "/api/v1/employee/{id}",
                get(handlers::get_employee).delete(handlers::delete_employee),
            )
            .route("/health", get(handlers::health))
            .route_layer(middleware::from_fn(log_execution_time))
            .with_state(state)
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// A clone of the fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
