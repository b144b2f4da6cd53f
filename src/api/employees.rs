//! Employee endpoints
//!
//! The list exists mainly so a user can find their own employee number; the
//! single lookup unwraps the preferred name for display.

use anyhow::Result;
use serde::Deserialize;

use super::client::PersonioClient;
use crate::error::ApiError;
use crate::models::Employee;

// The employee envelope nests every attribute behind a label/value pair.

#[derive(Debug, Deserialize)]
struct EmployeesResponse {
    data: Vec<EmployeeEnvelope>,
}

#[derive(Debug, Deserialize)]
struct EmployeeResponse {
    data: EmployeeEnvelope,
}

#[derive(Debug, Deserialize)]
struct EmployeeEnvelope {
    attributes: EmployeeAttributes,
}

#[derive(Debug, Deserialize)]
struct EmployeeAttributes {
    id: AttributeValue<u64>,
    preferred_name: Option<AttributeValue<String>>,
}

#[derive(Debug, Deserialize)]
struct AttributeValue<T> {
    value: T,
}

fn map_employee(envelope: EmployeeEnvelope) -> Employee {
    Employee {
        id: envelope.attributes.id.value,
        name: envelope
            .attributes
            .preferred_name
            .map(|n| n.value)
            .unwrap_or_default(),
    }
}

fn map_employees(body: &str) -> Result<Vec<Employee>, ApiError> {
    let resp: EmployeesResponse = serde_json::from_str(body)?;
    Ok(resp.data.into_iter().map(map_employee).collect())
}

fn map_single_employee(body: &str) -> Result<Employee, ApiError> {
    let resp: EmployeeResponse = serde_json::from_str(body)?;
    Ok(map_employee(resp.data))
}

/// Fetch all company employees.
pub async fn fetch_employees(client: &PersonioClient) -> Result<Vec<Employee>, ApiError> {
    let resp = client.get("/company/employees").await?;
    let body = resp.text().await?;
    map_employees(&body)
}

/// Fetch one employee's display name.
pub async fn fetch_employee_name(
    client: &PersonioClient,
    employee: u64,
) -> Result<String, ApiError> {
    let resp = client
        .get(&format!("/company/employees/{}", employee))
        .await?;
    let body = resp.text().await?;
    Ok(map_single_employee(&body)?.name)
}

/// List employees with ids (prints to stdout).
pub async fn list_employees() -> Result<()> {
    let client = PersonioClient::new().await?;
    let employees = fetch_employees(&client).await?;

    println!("\nEmployees:");
    println!("{:-<40}", "");
    if employees.is_empty() {
        println!("  (none visible to these credentials)");
        return Ok(());
    }
    for employee in &employees {
        println!("{:>8}  {}", employee.id, employee.name);
    }
    println!("\n{} employee(s).", employees.len());
    Ok(())
}

/// Show the configured employee's id and display name.
pub async fn whoami() -> Result<()> {
    let client = PersonioClient::new().await?;
    let employee = client.employee_id()?;
    let name = fetch_employee_name(&client, employee).await?;

    println!();
    println!("Employee ID: {}", employee);
    println!("Name:        {}", name);
    Ok(())
}
