//! Attendance endpoints: month listing and time submission
//!
//! Fetches use an inclusive date range covering one calendar month. Mapping
//! from the API's `{ data: [ { id, attributes: ... } ] }` envelope to the flat
//! record shape is kept in pure functions so it can be tested against canned
//! payloads.

use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use serde::Deserialize;

use super::client::PersonioClient;
use crate::error::ApiError;
use crate::models::{attendance_days, format_hours, total_hours, AttendancePeriod, TimeEntry};

// -- Response envelope for the attendance endpoint --

#[derive(Debug, Deserialize)]
struct AttendancesResponse {
    data: Vec<AttendanceEnvelope>,
}

#[derive(Debug, Deserialize)]
struct AttendanceEnvelope {
    id: u64,
    attributes: AttendanceAttributes,
}

#[derive(Debug, Deserialize)]
struct AttendanceAttributes {
    employee: u64,
    date: String,
    start_time: String,
    end_time: String,
    #[serde(rename = "break")]
    break_minutes: u32,
    comment: Option<String>,
    updated_at: Option<String>,
    status: Option<String>,
    project: Option<u64>,
    #[serde(default)]
    is_holiday: bool,
    #[serde(default)]
    is_on_time_off: bool,
}

/// Last calendar day of a month, leap years included.
pub fn last_day_of_month(year: i32, month: u32) -> Result<u32, ApiError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| ApiError::InvalidInput(format!("invalid month {}-{:02}", year, month)))?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    // Both dates exist whenever `first` does.
    let last = next_month
        .and_then(|d| d.pred_opt())
        .ok_or_else(|| ApiError::InvalidInput(format!("invalid month {}-{:02}", year, month)))?;
    debug_assert_eq!(last.month(), first.month());
    Ok(last.day())
}

/// Path + query for one employee's attendances over one month, inclusive on
/// both ends. Pending records are included.
fn attendances_path(employee: u64, year: i32, month: u32) -> Result<String, ApiError> {
    let last_day = last_day_of_month(year, month)?;
    Ok(format!(
        "/company/attendances?employees[]={employee}\
         &start_date={year}-{month:02}-01\
         &end_date={year}-{month:02}-{last_day:02}\
         &includePending=true"
    ))
}

/// Flatten the envelope into records, newest first (date + start time
/// descending).
fn map_attendances(body: &str) -> Result<Vec<AttendancePeriod>, ApiError> {
    let resp: AttendancesResponse = serde_json::from_str(body)?;
    let mut records: Vec<AttendancePeriod> = resp
        .data
        .into_iter()
        .map(|e| AttendancePeriod {
            id: e.id,
            employee: e.attributes.employee,
            date: e.attributes.date,
            start_time: e.attributes.start_time,
            end_time: e.attributes.end_time,
            break_minutes: e.attributes.break_minutes,
            comment: e.attributes.comment,
            updated_at: e.attributes.updated_at,
            status: e.attributes.status,
            project: e.attributes.project,
            is_holiday: e.attributes.is_holiday,
            is_on_time_off: e.attributes.is_on_time_off,
        })
        .collect();
    // ISO dates and HH:MM times sort correctly as strings.
    records.sort_by(|a, b| {
        (b.date.as_str(), b.start_time.as_str()).cmp(&(a.date.as_str(), a.start_time.as_str()))
    });
    Ok(records)
}

/// Fetch one month of attendance records. Failures are returned as errors;
/// an empty vec means the month really has no records.
pub async fn fetch_attendances(
    client: &PersonioClient,
    employee: u64,
    year: i32,
    month: u32,
) -> Result<Vec<AttendancePeriod>, ApiError> {
    let path = attendances_path(employee, year, month)?;
    let resp = client.get(&path).await?;
    let body = resp.text().await?;
    map_attendances(&body)
}

/// Request body for a single-entry time submission.
fn submit_body(employee: u64, entry: &TimeEntry) -> serde_json::Value {
    serde_json::json!({
        "attendances": [
            {
                "employee": employee,
                "date": entry.date.format("%Y-%m-%d").to_string(),
                "start_time": entry.start_time.format("%H:%M").to_string(),
                "end_time": entry.end_time.format("%H:%M").to_string(),
                "break": entry.break_minutes,
            }
        ]
    })
}

/// Submit one day's working time. Success is only reported after the server
/// confirmed the request with a 2xx status.
pub async fn submit_attendance(
    client: &PersonioClient,
    employee: u64,
    entry: &TimeEntry,
) -> Result<(), ApiError> {
    let body = submit_body(employee, entry);
    tracing::info!(
        "Submitting {}: {} - {} ({} min break)",
        entry.date,
        entry.start_time.format("%H:%M"),
        entry.end_time.format("%H:%M"),
        entry.break_minutes
    );
    client.post("/company/attendances", &body).await?;
    Ok(())
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

fn month_name(month: u32) -> &'static str {
    MONTH_NAMES
        .get(month as usize - 1)
        .copied()
        .unwrap_or("unknown")
}

/// List one month of attendances with a summary (prints to stdout).
/// Defaults to the current month.
pub async fn list_attendances(year: Option<i32>, month: Option<u32>) -> Result<()> {
    let today = Local::now().date_naive();
    let year = year.unwrap_or_else(|| today.year());
    let month = month.unwrap_or_else(|| today.month());

    let client = PersonioClient::new().await?;
    let employee = client.employee_id()?;
    let records = fetch_attendances(&client, employee, year, month).await?;

    println!("\nAttendances for {} {}:", month_name(month), year);
    println!("{:-<60}", "");

    if records.is_empty() {
        println!("  (no attendances this month)");
        return Ok(());
    }

    for record in &records {
        let duration = record
            .worked_hours()
            .map(format_hours)
            .unwrap_or_else(|| "?".to_string());
        println!(
            "{}  {} - {}  ({}, {} min break)  [{}]",
            record.date,
            record.start_time,
            record.end_time,
            duration,
            record.break_minutes,
            record.kind()
        );
        if let Some(ref status) = record.status {
            println!("  status: {}", status);
        }
        if let Some(ref comment) = record.comment {
            if !comment.trim().is_empty() {
                println!("  comment: {}", comment.trim());
            }
        }
    }

    println!("{:-<60}", "");
    println!(
        "Total: {} over {} day(s)",
        format_hours(total_hours(&records)),
        attendance_days(&records)
    );

    Ok(())
}

/// Validate and submit one day's working time (CLI entry point).
pub async fn track_time(
    date: &str,
    start_time: &str,
    end_time: &str,
    break_minutes: u32,
) -> Result<()> {
    let date = if date == "today" {
        Local::now().format("%Y-%m-%d").to_string()
    } else {
        date.to_string()
    };

    // Reject bad input before any network call.
    let entry = TimeEntry::parse(&date, start_time, end_time, break_minutes)?;

    let client = PersonioClient::new().await?;
    let employee = client.employee_id()?;
    submit_attendance(&client, employee, &entry).await?;

    println!(
        "Time tracked for {}: {} - {} with {} min break ({}).",
        entry.date,
        entry.start_time.format("%H:%M"),
        entry.end_time.format("%H:%M"),
        entry.break_minutes,
        format_hours(entry.worked_minutes() as f64 / 60.0)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_day_of_month() {
        assert_eq!(last_day_of_month(2024, 2).unwrap(), 29); // leap year
        assert_eq!(last_day_of_month(2023, 2).unwrap(), 28);
        assert_eq!(last_day_of_month(2024, 6).unwrap(), 30);
        assert_eq!(last_day_of_month(2024, 12).unwrap(), 31);
    }

    #[test]
    fn test_last_day_rejects_bad_month() {
        assert!(matches!(
            last_day_of_month(2024, 13),
            Err(ApiError::InvalidInput(_))
        ));
        assert!(matches!(
            last_day_of_month(2024, 0),
            Err(ApiError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_attendances_path() {
        let path = attendances_path(4242, 2024, 6).unwrap();
        assert_eq!(
            path,
            "/company/attendances?employees[]=4242\
             &start_date=2024-06-01&end_date=2024-06-30&includePending=true"
        );
    }

    const MONTH_PAYLOAD: &str = r#"{
        "success": true,
        "data": [
            {
                "id": 101,
                "type": "AttendancePeriod",
                "attributes": {
                    "employee": 4242,
                    "date": "2024-06-03",
                    "start_time": "09:00",
                    "end_time": "17:30",
                    "break": 60,
                    "comment": "support shift",
                    "updated_at": "2024-06-03T18:01:00Z",
                    "status": "confirmed",
                    "project": 7,
                    "is_holiday": false,
                    "is_on_time_off": false
                }
            },
            {
                "id": 102,
                "type": "AttendancePeriod",
                "attributes": {
                    "employee": 4242,
                    "date": "2024-06-05",
                    "start_time": "08:30",
                    "end_time": "16:30",
                    "break": 30,
                    "comment": null,
                    "updated_at": "2024-06-05T17:00:00Z",
                    "status": "pending",
                    "project": null,
                    "is_holiday": false,
                    "is_on_time_off": true
                }
            },
            {
                "id": 103,
                "type": "AttendancePeriod",
                "attributes": {
                    "employee": 4242,
                    "date": "2024-06-04",
                    "start_time": "10:00",
                    "end_time": "18:00",
                    "break": 45,
                    "comment": "",
                    "updated_at": null,
                    "status": "confirmed",
                    "project": null,
                    "is_holiday": true,
                    "is_on_time_off": false
                }
            }
        ]
    }"#;

    #[test]
    fn test_map_attendances_fields_verbatim() {
        let records = map_attendances(MONTH_PAYLOAD).unwrap();
        assert_eq!(records.len(), 3);

        let first = records.iter().find(|r| r.id == 101).unwrap();
        assert_eq!(first.employee, 4242);
        assert_eq!(first.date, "2024-06-03");
        assert_eq!(first.start_time, "09:00");
        assert_eq!(first.end_time, "17:30");
        assert_eq!(first.break_minutes, 60);
        assert_eq!(first.comment.as_deref(), Some("support shift"));
        assert_eq!(first.updated_at.as_deref(), Some("2024-06-03T18:01:00Z"));
        assert_eq!(first.status.as_deref(), Some("confirmed"));
        assert_eq!(first.project, Some(7));
        assert!(!first.is_holiday);
        assert!(!first.is_on_time_off);

        let second = records.iter().find(|r| r.id == 102).unwrap();
        assert!(second.is_on_time_off);
        assert_eq!(second.kind(), "time off");
        assert_eq!(second.project, None);
    }

    #[test]
    fn test_map_attendances_sorts_newest_first() {
        let records = map_attendances(MONTH_PAYLOAD).unwrap();
        let dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-06-05", "2024-06-04", "2024-06-03"]);
    }

    #[test]
    fn test_map_attendances_rejects_malformed_body() {
        assert!(matches!(
            map_attendances(r#"{"data": "nope"}"#),
            Err(ApiError::Decode(_))
        ));
    }

    #[test]
    fn test_submit_body_single_entry() {
        let entry = TimeEntry::parse("2024-06-03", "09:00", "17:30", 60).unwrap();
        let body = submit_body(4242, &entry);

        assert_eq!(
            body,
            serde_json::json!({
                "attendances": [
                    {
                        "employee": 4242,
                        "date": "2024-06-03",
                        "start_time": "09:00",
                        "end_time": "17:30",
                        "break": 60,
                    }
                ]
            })
        );
        assert_eq!(body["attendances"].as_array().unwrap().len(), 1);
    }
}
