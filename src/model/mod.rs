//! Domain model.
//!
//! The employee record is the only entity. It is built fresh from every
//! upstream response or client payload and never outlives a request.

pub mod employee;

pub use employee::Employee;
