//! Employee service: the operations the HTTP facade exposes.
//!
//! Every call goes back to the upstream service; nothing is cached.

use std::sync::Arc;

use async_trait::async_trait;

use crate::model::Employee;
use crate::service::error::{EmployeeError, EmployeeResult};
use crate::service::query;
use crate::upstream::envelope::{self, CreateEmployeeRequest};
use crate::upstream::{EmployeeUpstream, UpstreamError};

/// Operations offered over the employee resource.
#[async_trait]
pub trait EmployeeService: Send + Sync {
    /// All employees in upstream order.
    async fn get_all(&self) -> EmployeeResult<Vec<Employee>>;

    /// One employee by upstream id.
    async fn get_by_id(&self, id: &str) -> EmployeeResult<Employee>;

    /// Employees whose name contains `fragment`, ignoring case.
    async fn search_by_name(&self, fragment: &str) -> EmployeeResult<Vec<Employee>>;

    /// Largest salary, 0 when there are no employees.
    async fn highest_salary(&self) -> EmployeeResult<i64>;

    /// Names of the ten best paid employees, highest first.
    async fn top_earner_names(&self) -> EmployeeResult<Vec<String>>;

    /// Validate and create an employee upstream.
    async fn create(&self, input: Employee) -> EmployeeResult<Employee>;

    /// Delete an employee, returning a confirmation message.
    async fn delete_by_id(&self, id: &str) -> EmployeeResult<String>;
}

/// [`EmployeeService`] backed by the upstream employee API.
#[derive(Clone)]
pub struct UpstreamEmployeeService {
    upstream: Arc<dyn EmployeeUpstream>,
}

impl UpstreamEmployeeService {
    pub fn new(upstream: Arc<dyn EmployeeUpstream>) -> Self {
        Self { upstream }
    }

    async fn fetch_all(&self) -> Result<Vec<Employee>, UpstreamError> {
        let body = self.upstream.get(None).await?;
        Ok(envelope::parse_list(&body)?)
    }

    async fn fetch_one(&self, id: &str) -> Result<Employee, UpstreamError> {
        let body = self.upstream.get(Some(id)).await?;
        Ok(envelope::parse_single(&body)?)
    }

    async fn post(&self, input: &Employee) -> Result<Employee, UpstreamError> {
        let body = self.upstream.post(&CreateEmployeeRequest::from(input)).await?;
        Ok(envelope::parse_single(&body)?)
    }
}

#[async_trait]
impl EmployeeService for UpstreamEmployeeService {
    async fn get_all(&self) -> EmployeeResult<Vec<Employee>> {
        self.fetch_all().await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to fetch employee list");
            EmployeeError::not_found_from("Failed to fetch employees from the external service.", e)
        })
    }

    async fn get_by_id(&self, id: &str) -> EmployeeResult<Employee> {
        if id.trim().is_empty() {
            // same wording as an unknown id
            return Err(EmployeeError::not_found(format!("Employee with ID {} not found.", id)));
        }
        tracing::info!(id = %id, "Fetching employee");
        self.fetch_one(id).await.map_err(|e| {
            tracing::warn!(id = %id, error = %e, "Failed to fetch employee");
            EmployeeError::not_found_from(format!("Employee with ID {} not found.", id), e)
        })
    }

    async fn search_by_name(&self, fragment: &str) -> EmployeeResult<Vec<Employee>> {
        tracing::info!(fragment = %fragment, "Searching employees by name");
        let employees = self.fetch_all().await.map_err(|e| {
            EmployeeError::not_found_from(
                format!(
                    "Error occurred while searching for employees with name containing: {}",
                    fragment
                ),
                e,
            )
        })?;
        Ok(query::search_by_name(employees, fragment))
    }

    async fn highest_salary(&self) -> EmployeeResult<i64> {
        let employees = self.fetch_all().await.map_err(|e| {
            EmployeeError::not_found_from("Error occurred while fetching the highest salary.", e)
        })?;
        Ok(query::highest_salary(&employees))
    }

    async fn top_earner_names(&self) -> EmployeeResult<Vec<String>> {
        let employees = self.get_all().await?;
        Ok(query::top_earner_names(employees, query::TOP_EARNERS_LIMIT))
    }

    async fn create(&self, input: Employee) -> EmployeeResult<Employee> {
        input.check().map_err(EmployeeError::ValidationFailed)?;
        tracing::info!(name = %input.name, "Creating employee");
        self.post(&input).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to create employee");
            let message = format!("Error occurred while creating the employee: {}", e);
            EmployeeError::not_created_from(message, e)
        })
    }

    async fn delete_by_id(&self, id: &str) -> EmployeeResult<String> {
        if id.trim().is_empty() {
            return Err(EmployeeError::InvalidArgument(
                "Employee ID cannot be null or empty.".to_string(),
            ));
        }
        tracing::info!(id = %id, "Deleting employee");
        self.upstream.delete(id).await.map_err(|e| {
            tracing::warn!(id = %id, error = %e, "Failed to delete employee");
            EmployeeError::not_found_from(format!("Employee with ID {} not found to delete.", id), e)
        })?;
        Ok(format!("Employee with ID {} deleted successfully.", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::UpstreamResult;
    use reqwest::StatusCode;
    use std::sync::Mutex;

    const TWO_EMPLOYEES: &str = r#"{"data":[
        {"id":"1","employee_name":"John Doe","employee_salary":50000,"employee_age":30,"employee_title":"Developer","employee_email":"john.doe@example.com"},
        {"id":"2","employee_name":"Jane Smith","employee_salary":60000,"employee_age":35,"employee_title":"Manager","employee_email":"jane.smith@example.com"}
    ]}"#;

    const ONE_EMPLOYEE: &str = r#"{"data":{"id":"9","employee_name":"New Hire","employee_salary":42000,"employee_age":25,"employee_title":"Analyst","employee_email":"new.hire@example.com"}}"#;

    /// In-memory upstream recording every call it receives.
    #[derive(Default)]
    struct FakeUpstream {
        body: String,
        status: Option<StatusCode>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeUpstream {
        fn with_body(body: &str) -> Self {
            Self { body: body.to_string(), ..Self::default() }
        }

        fn failing(status: StatusCode) -> Self {
            Self { status: Some(status), ..Self::default() }
        }

        fn record(&self, call: String) -> UpstreamResult<String> {
            self.calls.lock().unwrap().push(call);
            match self.status {
                Some(status) => Err(UpstreamError::Status(status)),
                None => Ok(self.body.clone()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EmployeeUpstream for FakeUpstream {
        async fn get(&self, id: Option<&str>) -> UpstreamResult<String> {
            self.record(format!("GET {}", id.unwrap_or("")))
        }

        async fn post(&self, request: &CreateEmployeeRequest<'_>) -> UpstreamResult<String> {
            self.record(format!("POST {}", request.name))
        }

        async fn delete(&self, id: &str) -> UpstreamResult<()> {
            self.record(format!("DELETE {}", id)).map(|_| ())
        }
    }

    fn service(upstream: FakeUpstream) -> (UpstreamEmployeeService, Arc<FakeUpstream>) {
        let upstream = Arc::new(upstream);
        (UpstreamEmployeeService::new(upstream.clone()), upstream)
    }

    fn new_hire() -> Employee {
        Employee {
            id: String::new(),
            name: "New Hire".to_string(),
            salary: 42000,
            age: 25,
            title: "Analyst".to_string(),
            email: "new.hire@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_all_keeps_order() {
        let (svc, _) = service(FakeUpstream::with_body(TWO_EMPLOYEES));
        let names: Vec<String> = svc.get_all().await.unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["John Doe", "Jane Smith"]);
    }

    #[tokio::test]
    async fn test_get_all_failure_is_not_found() {
        let (svc, _) = service(FakeUpstream::failing(StatusCode::INTERNAL_SERVER_ERROR));
        let err = svc.get_all().await.unwrap_err();
        assert!(matches!(err, EmployeeError::NotFound { .. }));
        assert!(err.is_upstream_outage());
    }

    #[tokio::test]
    async fn test_malformed_envelope_is_not_found() {
        let (svc, _) = service(FakeUpstream::with_body(r#"{"status":"ok"}"#));
        let err = svc.get_all().await.unwrap_err();
        assert!(matches!(err, EmployeeError::NotFound { .. }));
        assert!(!err.is_upstream_outage());
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let (svc, upstream) = service(FakeUpstream::with_body(ONE_EMPLOYEE));
        let employee = svc.get_by_id("9").await.unwrap();
        assert_eq!(employee.id, "9");
        assert_eq!(upstream.calls(), vec!["GET 9"]);
    }

    #[tokio::test]
    async fn test_get_by_id_upstream_404() {
        let (svc, _) = service(FakeUpstream::failing(StatusCode::NOT_FOUND));
        let err = svc.get_by_id("nope").await.unwrap_err();
        assert_eq!(err.to_string(), "Employee with ID nope not found.");
    }

    #[tokio::test]
    async fn test_blank_ids_never_reach_upstream() {
        let (svc, upstream) = service(FakeUpstream::with_body(ONE_EMPLOYEE));
        let err = svc.get_by_id("").await.unwrap_err();
        assert!(matches!(err, EmployeeError::NotFound { .. }));
        assert_eq!(err.to_string(), "Employee with ID  not found.");

        let err = svc.delete_by_id("  ").await.unwrap_err();
        assert!(matches!(err, EmployeeError::InvalidArgument(_)));
        assert_eq!(err.to_string(), "Employee ID cannot be null or empty.");
        assert!(upstream.calls().is_empty());
    }

    #[tokio::test]
    async fn test_search_and_derivations() {
        let (svc, upstream) = service(FakeUpstream::with_body(TWO_EMPLOYEES));

        let found = svc.search_by_name("jane").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Jane Smith");

        assert_eq!(svc.highest_salary().await.unwrap(), 60000);
        assert_eq!(
            svc.top_earner_names().await.unwrap(),
            vec!["Jane Smith", "John Doe"]
        );

        // no memoization: each query fetched again
        assert_eq!(upstream.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_highest_salary_of_empty_list() {
        let (svc, _) = service(FakeUpstream::with_body(r#"{"data":[]}"#));
        assert_eq!(svc.highest_salary().await.unwrap(), 0);
        assert!(svc.top_earner_names().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_returns_upstream_record() {
        let (svc, upstream) = service(FakeUpstream::with_body(ONE_EMPLOYEE));
        let created = svc.create(new_hire()).await.unwrap();
        assert_eq!(created.id, "9");
        assert_eq!(upstream.calls(), vec!["POST New Hire"]);
    }

    #[tokio::test]
    async fn test_create_blank_name_never_posts() {
        let (svc, upstream) = service(FakeUpstream::with_body(ONE_EMPLOYEE));
        let input = Employee { name: " ".to_string(), ..new_hire() };
        match svc.create(input).await.unwrap_err() {
            EmployeeError::ValidationFailed(message) => {
                assert_eq!(message, "Employee name cannot be null or empty")
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert!(upstream.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_upstream_failure_is_not_created() {
        let (svc, _) = service(FakeUpstream::failing(StatusCode::TOO_MANY_REQUESTS));
        let err = svc.create(new_hire()).await.unwrap_err();
        assert!(matches!(err, EmployeeError::NotCreated { .. }));
        assert!(err.is_upstream_outage());
    }

    #[tokio::test]
    async fn test_delete() {
        let (svc, upstream) = service(FakeUpstream::with_body(""));
        assert_eq!(
            svc.delete_by_id("5").await.unwrap(),
            "Employee with ID 5 deleted successfully."
        );
        assert_eq!(upstream.calls(), vec!["DELETE 5"]);

        let (svc, _) = service(FakeUpstream::failing(StatusCode::NOT_FOUND));
        assert!(matches!(
            svc.delete_by_id("5").await.unwrap_err(),
            EmployeeError::NotFound { .. }
        ));
    }
}
