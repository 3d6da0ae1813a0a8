//! Employee API gateway library.
//!
//! A thin HTTP facade over an upstream employee-data service: CRUD
//! passthrough, name search, highest salary and top earners, all guarded by
//! a circuit breaker.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod observability;
pub mod resilience;
pub mod service;
pub mod upstream;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use model::Employee;
