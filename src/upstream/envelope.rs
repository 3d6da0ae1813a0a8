//! Decoding of the upstream `{"data": ...}` envelope.
//!
//! Bodies are decoded once into [`Envelope`] over [`UpstreamEmployee`], which
//! mirrors the upstream field names, then mapped into [`Employee`].

use serde::{Deserialize, Serialize};

use crate::model::Employee;

/// Wrapper the upstream service puts around every payload.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

/// Employee record as the upstream service spells it.
#[derive(Debug, Deserialize)]
pub struct UpstreamEmployee {
    pub id: String,
    pub employee_name: String,
    pub employee_salary: i64,
    pub employee_age: i32,
    pub employee_title: String,
    pub employee_email: String,
}

impl From<UpstreamEmployee> for Employee {
    fn from(record: UpstreamEmployee) -> Self {
        Self {
            id: record.id,
            name: record.employee_name,
            salary: record.employee_salary,
            age: record.employee_age,
            title: record.employee_title,
            email: record.employee_email,
        }
    }
}

/// Body of an upstream create call.
#[derive(Debug, Serialize)]
pub struct CreateEmployeeRequest<'a> {
    pub name: &'a str,
    pub salary: i64,
    pub age: i32,
    pub title: &'a str,
    pub email: &'a str,
}

impl<'a> From<&'a Employee> for CreateEmployeeRequest<'a> {
    fn from(employee: &'a Employee) -> Self {
        Self {
            name: &employee.name,
            salary: employee.salary,
            age: employee.age,
            title: &employee.title,
            email: &employee.email,
        }
    }
}

/// Parse a list envelope, keeping upstream order.
pub fn parse_list(body: &str) -> Result<Vec<Employee>, serde_json::Error> {
    let envelope: Envelope<Vec<UpstreamEmployee>> = serde_json::from_str(body)?;
    Ok(envelope.data.into_iter().map(Employee::from).collect())
}

/// Parse a single-record envelope.
pub fn parse_single(body: &str) -> Result<Employee, serde_json::Error> {
    let envelope: Envelope<UpstreamEmployee> = serde_json::from_str(body)?;
    Ok(envelope.data.into())
}
