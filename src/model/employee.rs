//! Employee record and its field constraints.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

/// Fields in declaration order; the first one with a violation wins.
const FIELD_ORDER: [&str; 5] = ["name", "salary", "age", "title", "email"];

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

const MAX_AGE: i32 = 65;

fn validate_max_age(age: i32) -> Result<(), ValidationError> {
    if age > MAX_AGE {
        return Err(ValidationError::new("max_age"));
    }
    Ok(())
}

/// Employee record exposed to clients.
///
/// `id` is assigned by the upstream service and is empty on create requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Employee {
    #[serde(default)]
    pub id: String,

    #[validate(custom(
        function = "validate_not_blank",
        message = "Employee name cannot be null or empty"
    ))]
    pub name: String,

    #[validate(range(min = 0, message = "Salary must be non-negative"))]
    pub salary: i64,

    #[validate(
        range(min = 18, message = "Employee must be at least 18 years old"),
        custom(function = "validate_max_age", message = "Employee age cannot exceed 65 years")
    )]
    pub age: i32,

    #[validate(custom(function = "validate_not_blank", message = "Title cannot be empty"))]
    pub title: String,

    #[validate(
        custom(function = "validate_not_blank", message = "Email cannot be null or empty"),
        email(message = "Email should be valid")
    )]
    pub email: String,
}

impl Employee {
    /// Check every field constraint and return the message of the first
    /// violation, fields taken in declaration order.
    pub fn check(&self) -> Result<(), String> {
        match self.validate() {
            Ok(()) => Ok(()),
            Err(errors) => Err(first_violation(&errors)),
        }
    }
}

fn first_violation(errors: &ValidationErrors) -> String {
    let field_errors = errors.field_errors();
    FIELD_ORDER
        .iter()
        .filter_map(|field| field_errors.get(*field))
        // a blank value also fails format checks; report the blank one
        .find_map(|errs| errs.iter().find(|e| e.code == "blank").or_else(|| errs.first()))
        .map(|err| match &err.message {
            Some(message) => message.to_string(),
            None => err.code.to_string(),
        })
        .unwrap_or_else(|| errors.to_string())
}
