//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, Method, StatusCode, Uri};
use axum::Router;
use tokio::net::TcpListener;

use employee_api::config::GatewayConfig;
use employee_api::{HttpServer, Shutdown};

pub const TWO_EMPLOYEES: &str = r#"{"status":"Successfully processed request.","data":[
    {"id":"4a3a170b-22cd-4ac2-aad1-9bb5b34a1507","employee_name":"John Doe","employee_salary":50000,"employee_age":30,"employee_title":"Developer","employee_email":"john.doe@example.com"},
    {"id":"5255f1a5-f9f7-4be5-829a-134bde088d17","employee_name":"Jane Smith","employee_salary":60000,"employee_age":35,"employee_title":"Manager","employee_email":"jane.smith@example.com"}
]}"#;

/// Start a programmable mock upstream.
///
/// `f` receives the method, path and body of every request and returns the
/// status and JSON body to answer with.
pub async fn start_programmable_upstream<F>(f: F) -> SocketAddr
where
    F: Fn(Method, String, String) -> (u16, String) + Send + Sync + 'static,
{
    let f = Arc::new(f);
    let app = Router::new().fallback(move |method: Method, uri: Uri, body: String| {
        let f = f.clone();
        async move {
            let (status, body) = f(method, uri.path().to_string(), body);
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, [(header::CONTENT_TYPE, "application/json")], body)
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Gateway config pointed at a mock upstream.
pub fn config_for(upstream: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.base_url = format!("http://{}/api/v1/employee", upstream);
    config.upstream.request_timeout_secs = 5;
    config.observability.metrics_enabled = false;
    config
}

/// Start the gateway, returning its base URL and the shutdown handle.
pub async fn start_gateway(config: GatewayConfig) -> (String, Shutdown) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(100)).await;
    (format!("http://{}/api/v1/employee", addr), shutdown)
}

/// Client that never reuses connections or honours proxy env vars.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
