//! API client module for Personio

pub mod attendances;
pub mod client;
pub mod employees;

use anyhow::Result;

/// List one month of attendance records with a summary.
pub async fn list_attendances(year: Option<i32>, month: Option<u32>) -> Result<()> {
    attendances::list_attendances(year, month).await
}

/// Validate and submit one day's working time.
pub async fn track_time(
    date: &str,
    start_time: &str,
    end_time: &str,
    break_minutes: u32,
) -> Result<()> {
    attendances::track_time(date, start_time, end_time, break_minutes).await
}

/// List company employees with their ids.
pub async fn list_employees() -> Result<()> {
    employees::list_employees().await
}

/// Show the configured employee's id and name.
pub async fn whoami() -> Result<()> {
    employees::whoami().await
}
