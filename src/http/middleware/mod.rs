//! Cross-cutting wrappers composed around the facade routes.

pub mod timing;

pub use timing::log_execution_time;
