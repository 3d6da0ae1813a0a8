//! Translation of domain errors into HTTP responses.
//!
//! Body shape: `{"Error": label, "Message": text, "Status": code, "Timestamp": rfc3339}`.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::service::EmployeeError;

impl EmployeeError {
    /// Status code and short label for this error kind.
    pub fn status_and_label(&self) -> (StatusCode, &'static str) {
        match self {
            EmployeeError::NotFound { .. } => (StatusCode::NOT_FOUND, "Employee Not Found"),
            EmployeeError::NotCreated { .. } => (StatusCode::BAD_REQUEST, "Employee Not Created"),
            EmployeeError::InvalidArgument(_) => (StatusCode::BAD_REQUEST, "Bad Request"),
            EmployeeError::ValidationFailed(_) => (StatusCode::BAD_REQUEST, "Validation Failed"),
            EmployeeError::ServiceUnavailable => {
                (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable")
            }
            EmployeeError::Unexpected(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}

impl IntoResponse for EmployeeError {
    fn into_response(self) -> Response {
        let (status, label) = self.status_and_label();
        if let EmployeeError::Unexpected(message) = &self {
            tracing::error!(error = %message, "Unexpected error");
        }

        let body = json!({
            "Error": label,
            "Message": self.to_string(),
            "Status": status.as_u16(),
            "Timestamp": chrono::Utc::now().to_rfc3339(),
        });
        (status, Json(body)).into_response()
    }
}

/// Message sent to clients when a handler panics; the panic itself is only logged.
pub const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred.";

/// Turn a caught handler panic into a 500 response.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        *s
    } else {
        "non-string panic payload"
    };
    tracing::error!(panic = %detail, "Handler panicked");
    EmployeeError::Unexpected(UNEXPECTED_MESSAGE.to_string()).into_response()
}
