//! HTTP facade subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, request ID, trace, timeout, body limit)
//!     → middleware/timing.rs (execution time per route)
//!     → handlers.rs (breaker-guarded service call, response shaping)
//!     → error.rs (domain error → status + JSON body)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod server;

pub use server::{AppState, HttpServer};
