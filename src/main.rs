//! Employee API gateway.
//!
//! # Architecture Overview
//!
//! ```text
//!                          ┌───────────────────────────────────────────────┐
//!                          │               EMPLOYEE API GATEWAY            │
//!                          │                                               │
//!     Client Request       │  ┌──────────┐   ┌──────────┐   ┌───────────┐  │
//!     ─────────────────────┼─▶│  http    │──▶│ timing + │──▶│  service  │  │
//!                          │  │ handlers │   │ breaker  │   │  (query)  │  │
//!                          │  └──────────┘   └──────────┘   └─────┬─────┘  │
//!                          │                                      │        │
//!                          │                                      ▼        │
//!     Client Response      │  ┌──────────┐   ┌──────────┐   ┌───────────┐  │
//!     ◀────────────────────┼──│  error   │◀──│ envelope │◀──│ upstream  │◀─┼── Upstream
//!                          │  │ mapping  │   │  parser  │   │  client   │  │   Employee API
//!                          │  └──────────┘   └──────────┘   └───────────┘  │
//!                          └───────────────────────────────────────────────┘
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use employee_api::config::load_or_default;
use employee_api::lifecycle::signals::shutdown_on_signal;
use employee_api::observability::{logging, metrics};
use employee_api::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "employee-api")]
#[command(about = "HTTP facade over the upstream employee service", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_or_default(cli.config.as_deref())?;

    logging::init_logging(&config.observability);
    tracing::info!("employee-api v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        circuit_breaker = config.circuit_breaker.enabled,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse::<SocketAddr>() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    // the server only finishes on its own when serving fails
    let finished_early = tokio::select! {
        _ = shutdown_on_signal(&shutdown) => None,
        result = &mut server_task => Some(result),
    };
    match finished_early {
        Some(result) => {
            if !shutdown.is_triggered() {
                tracing::error!("HTTP server exited before shutdown was requested");
            }
            result??
        }
        None => server_task.await??,
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
