use crate::components::work_schedule::Weekday;
use crate::error::AppResult;
use crate::utils::time::month_bounds;
use chrono::{Datelike, NaiveDate};

/// A date and its weekday
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub weekday: Weekday,
}

/// Every date of a month in ascending order.
///
/// The month length comes from chrono, so leap years need no special handling.
pub fn expand_month(year: i32, month: u32) -> AppResult<Vec<CalendarDay>> {
    let (first, last) = month_bounds(year, month)?;

    Ok(first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| CalendarDay {
            date,
            weekday: Weekday::from(date.weekday()),
        })
        .collect())
}
