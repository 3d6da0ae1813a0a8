//! Employee routes.
//!
//! Handlers only translate: each one runs its service call under the
//! circuit breaker and shapes the result. No business logic lives here.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{StatusCode, Uri},
    Json,
};
use serde::Serialize;

use crate::http::server::AppState;
use crate::model::Employee;
use crate::resilience::guarded;
use crate::service::{EmployeeError, EmployeeResult};

pub async fn get_all_employees(
    State(state): State<AppState>,
) -> EmployeeResult<Json<Vec<Employee>>> {
    let employees = guarded(&state.breaker, || state.service.get_all()).await?;
    Ok(Json(employees))
}

pub async fn search_employees(
    State(state): State<AppState>,
    Path(search): Path<String>,
) -> EmployeeResult<Json<Vec<Employee>>> {
    let employees = guarded(&state.breaker, || state.service.search_by_name(&search)).await?;
    Ok(Json(employees))
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> EmployeeResult<Json<Employee>> {
    let employee = guarded(&state.breaker, || state.service.get_by_id(&id)).await?;
    Ok(Json(employee))
}

pub async fn highest_salary(State(state): State<AppState>) -> EmployeeResult<Json<i64>> {
    let salary = guarded(&state.breaker, || state.service.highest_salary()).await?;
    Ok(Json(salary))
}

pub async fn top_ten_earner_names(
    State(state): State<AppState>,
) -> EmployeeResult<Json<Vec<String>>> {
    let names = guarded(&state.breaker, || state.service.top_earner_names()).await?;
    Ok(Json(names))
}

pub async fn create_employee(
    State(state): State<AppState>,
    payload: Result<Json<Employee>, JsonRejection>,
) -> EmployeeResult<(StatusCode, Json<Employee>)> {
    let Json(input) = payload.map_err(|rejection| {
        EmployeeError::InvalidArgument(format!("Invalid employee payload: {}", rejection.body_text()))
    })?;
    let created = guarded(&state.breaker, || state.service.create(input)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> EmployeeResult<String> {
    guarded(&state.breaker, || state.service.delete_by_id(&id)).await
}

/// DELETE on a path shadowed by a static GET route, such as `/highestSalary`.
/// The last path segment is taken as the id.
pub async fn delete_employee_at(
    State(state): State<AppState>,
    uri: Uri,
) -> EmployeeResult<String> {
    let id = uri.path().rsplit('/').next().unwrap_or_default().to_owned();
    guarded(&state.breaker, || state.service.delete_by_id(&id)).await
}

#[derive(Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub version: &'static str,
    pub circuit_breaker: &'static str,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "UP",
        version: env!("CARGO_PKG_VERSION"),
        circuit_breaker: state.breaker.state().as_str(),
    })
}
