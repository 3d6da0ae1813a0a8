//! Derived queries over a fetched employee list.

use crate::model::Employee;

/// How many names the top earners query returns.
pub const TOP_EARNERS_LIMIT: usize = 10;

/// Employees whose name contains `fragment`, ignoring case.
pub fn search_by_name(employees: Vec<Employee>, fragment: &str) -> Vec<Employee> {
    let needle = fragment.to_lowercase();
    employees
        .into_iter()
        .filter(|e| e.name.to_lowercase().contains(&needle))
        .collect()
}

/// Largest salary, or 0 for an empty list.
pub fn highest_salary(employees: &[Employee]) -> i64 {
    employees.iter().map(|e| e.salary).max().unwrap_or(0)
}

/// Names of the `limit` best paid employees, highest first.
///
/// Equal salaries keep their upstream order.
pub fn top_earner_names(mut employees: Vec<Employee>, limit: usize) -> Vec<String> {
    // sort_by is stable
    employees.sort_by(|a, b| b.salary.cmp(&a.salary));
    employees.into_iter().take(limit).map(|e| e.name).collect()
}
