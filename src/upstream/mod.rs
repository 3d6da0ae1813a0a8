//! Upstream employee service subsystem.
//!
//! # Data Flow
//! ```text
//! service layer
//!     → client.rs (GET / POST / DELETE, raw body)
//!     → envelope.rs (decode {"data": ...} into Employee values)
//!     → back to the service layer
//! ```
//!
//! The upstream contract is fixed and not owned by this crate.

pub mod client;
pub mod envelope;
pub mod error;

pub use client::{EmployeeUpstream, UpstreamClient};
pub use error::{UpstreamError, UpstreamResult};
