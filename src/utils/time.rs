use crate::error::{invalid_input, AppResult};
use chrono::{Datelike, NaiveDate, NaiveTime};

/// Parse time string in HH:MM format
pub fn parse_time(time_str: &str) -> Option<NaiveTime> {
    let parts: Vec<&str> = time_str.trim().split(':').collect();
    if parts.len() != 2 {
        return None;
    }
    let hour = parts[0].parse::<u32>().ok()?;
    let minute = parts[1].parse::<u32>().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Parse an HH:MM string, naming the offending field on failure
pub fn require_time(field: &str, time_str: &str) -> AppResult<NaiveTime> {
    parse_time(time_str).ok_or_else(|| {
        invalid_input(&format!(
            "{} must be a time in HH:MM format, got {:?}",
            field, time_str
        ))
    })
}

/// Format a time as HH:MM
pub fn format_time(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Reject months outside 1..=12
pub fn validate_month(month: u32) -> AppResult<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(invalid_input(&format!(
            "month must be between 1 and 12, got {}",
            month
        )))
    }
}

/// First and last calendar day of a month
pub fn month_bounds(year: i32, month: u32) -> AppResult<(NaiveDate, NaiveDate)> {
    validate_month(month)?;

    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| invalid_input(&format!("year {} is out of range", year)))?;

    // Day before the first of the following month
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    let last = next_first
        .and_then(|date| date.pred_opt())
        .ok_or_else(|| invalid_input(&format!("year {} is out of range", year)))?;

    Ok((first, last))
}

/// Number of days in a month
pub fn days_in_month(year: i32, month: u32) -> AppResult<u32> {
    let (_, last) = month_bounds(year, month)?;
    Ok(last.day())
}
