//! Query and derivation layer.
//!
//! # Data Flow
//! ```text
//! HTTP facade
//!     → employee.rs (EmployeeService: validate, fetch, map errors)
//!     → upstream client + envelope parser (fresh fetch per call)
//!     → query.rs (search, max salary, top earners)
//! ```
//!
//! Upstream and parse failures are converted into [`EmployeeError`] kinds
//! here; the facade never sees raw network errors.

pub mod employee;
pub mod error;
pub mod query;

pub use employee::{EmployeeService, UpstreamEmployeeService};
pub use error::{EmployeeError, EmployeeResult, SERVICE_UNAVAILABLE_MESSAGE};
