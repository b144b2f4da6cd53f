//! Validated user input for a time submission

use chrono::{NaiveDate, NaiveTime};

use crate::error::ApiError;

/// A single day's working time as entered by the user. Construction goes
/// through [`TimeEntry::parse`], which rejects bad input before any request
/// is issued.
#[derive(Debug, Clone)]
pub struct TimeEntry {
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub break_minutes: u32,
}

impl TimeEntry {
    pub fn parse(
        date: &str,
        start_time: &str,
        end_time: &str,
        break_minutes: u32,
    ) -> Result<Self, ApiError> {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
            ApiError::InvalidInput(format!("invalid date '{}', expected YYYY-MM-DD", date))
        })?;
        let start_time = parse_time(start_time)?;
        let end_time = parse_time(end_time)?;
        if end_time <= start_time {
            return Err(ApiError::InvalidInput(format!(
                "end time {} is not after start time {}",
                end_time.format("%H:%M"),
                start_time.format("%H:%M")
            )));
        }
        Ok(Self {
            date,
            start_time,
            end_time,
            break_minutes,
        })
    }

    pub fn worked_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes() - i64::from(self.break_minutes)
    }
}

fn parse_time(value: &str) -> Result<NaiveTime, ApiError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .map_err(|_| ApiError::InvalidInput(format!("invalid time '{}', expected HH:MM", value)))
}
