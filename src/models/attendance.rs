//! Attendance records and monthly summary helpers

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// One day's logged attendance, flattened from the API envelope. Snapshots
/// are never mutated locally, only re-fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendancePeriod {
    pub id: u64,
    pub employee: u64,
    /// Calendar date, "YYYY-MM-DD"
    pub date: String,
    /// "HH:MM"
    pub start_time: String,
    /// "HH:MM"
    pub end_time: String,
    /// Break in minutes
    pub break_minutes: u32,
    pub comment: Option<String>,
    pub updated_at: Option<String>,
    /// Approval status as reported by the server (e.g. "confirmed", "pending")
    pub status: Option<String>,
    pub project: Option<u64>,
    pub is_holiday: bool,
    pub is_on_time_off: bool,
}

impl AttendancePeriod {
    /// Worked hours for this record: end - start minus break. `None` when the
    /// server sent times in an unexpected format.
    pub fn worked_hours(&self) -> Option<f64> {
        let start = NaiveTime::parse_from_str(&self.start_time, "%H:%M").ok()?;
        let end = NaiveTime::parse_from_str(&self.end_time, "%H:%M").ok()?;
        let minutes = (end - start).num_minutes() - i64::from(self.break_minutes);
        Some(minutes as f64 / 60.0)
    }

    /// Short tag for the record kind shown in listings.
    pub fn kind(&self) -> &'static str {
        if self.is_holiday {
            "holiday"
        } else if self.is_on_time_off {
            "time off"
        } else {
            "work"
        }
    }
}

/// Sum of worked hours over a month's records.
pub fn total_hours(records: &[AttendancePeriod]) -> f64 {
    records.iter().filter_map(|r| r.worked_hours()).sum()
}

/// Number of distinct dates with at least one record.
pub fn attendance_days(records: &[AttendancePeriod]) -> usize {
    let mut dates: Vec<&str> = records.iter().map(|r| r.date.as_str()).collect();
    dates.sort_unstable();
    dates.dedup();
    dates.len()
}

/// Format fractional hours as "7h 30m".
pub fn format_hours(hours: f64) -> String {
    let minutes = (hours * 60.0).round() as i64;
    format!("{}h {:02}m", minutes / 60, minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, start: &str, end: &str, break_minutes: u32) -> AttendancePeriod {
        AttendancePeriod {
            id: 1,
            employee: 42,
            date: date.into(),
            start_time: start.into(),
            end_time: end.into(),
            break_minutes,
            comment: None,
            updated_at: None,
            status: Some("confirmed".into()),
            project: None,
            is_holiday: false,
            is_on_time_off: false,
        }
    }

    #[test]
    fn test_worked_hours() {
        let r = record("2024-06-03", "09:00", "17:30", 60);
        assert!((r.worked_hours().unwrap() - 7.5).abs() < 1e-9);
    }

    #[test]
    fn test_worked_hours_unparsable_time() {
        let r = record("2024-06-03", "morning", "17:30", 0);
        assert!(r.worked_hours().is_none());
    }

    #[test]
    fn test_total_and_days() {
        let records = vec![
            record("2024-06-03", "09:00", "17:00", 60),
            record("2024-06-03", "18:00", "19:00", 0),
            record("2024-06-04", "09:00", "17:00", 60),
        ];
        assert!((total_hours(&records) - 15.0).abs() < 1e-9);
        assert_eq!(attendance_days(&records), 2);
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(7.5), "7h 30m");
        assert_eq!(format_hours(0.0), "0h 00m");
        assert_eq!(format_hours(142.5), "142h 30m");
    }
}
