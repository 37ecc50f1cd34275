use super::calendar::expand_month;
use super::hours::{earnings, work_hours};
use super::models::{DayProjection, Holiday};
use crate::components::work_schedule::WeeklySchedule;
use crate::error::AppResult;
use crate::utils::time::format_time;

/// Project every day of a month against a weekly template.
///
/// Fails on the first template entry with unparsable or inverted times, so a
/// partial projection never escapes.
pub fn project_month(
    year: i32,
    month: u32,
    template: &WeeklySchedule,
    holidays: &[Holiday],
    hourly_rate: f64,
) -> AppResult<Vec<DayProjection>> {
    let days = expand_month(year, month)?;
    let mut projections = Vec::with_capacity(days.len());

    for day in days {
        let hours = match template.get(day.weekday) {
            Some(entry) => entry.working_hours(day.weekday)?,
            None => None,
        };
        let holiday = holidays.iter().find(|h| h.date == day.date);
        let is_holiday = holiday.is_some();

        let work_hours = match hours {
            Some((start, end)) if !is_holiday => u32::try_from(work_hours(start, end)).unwrap_or(0),
            _ => 0,
        };

        projections.push(DayProjection {
            date: day.date,
            day_of_week: day.weekday.index(),
            day_name: day.weekday.name().to_string(),
            is_work_day: hours.is_some(),
            start_time: hours.map(|(start, _)| format_time(start)),
            end_time: hours.map(|(_, end)| format_time(end)),
            work_hours,
            is_holiday,
            holiday_name: holiday.map(|h| h.name.clone()),
            daily_earnings: earnings(work_hours, hourly_rate),
        });
    }

    Ok(projections)
}

/// Month totals over billable days
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ForecastTotals {
    pub work_days: u32,
    pub work_hours: u32,
    pub earnings: f64,
}

impl ForecastTotals {
    pub fn from_days(days: &[DayProjection]) -> Self {
        days.iter()
            .filter(|day| day.is_billable())
            .fold(Self::default(), |totals, day| Self {
                work_days: totals.work_days + 1,
                work_hours: totals.work_hours + day.work_hours,
                earnings: totals.earnings + day.daily_earnings,
            })
    }
}
