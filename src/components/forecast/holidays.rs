use super::models::Holiday;
use crate::error::{config_error, AppResult};
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

/// Source of public holidays for forecasts
pub trait HolidayCalendar: Send + Sync + 'static {
    /// Holidays falling inside the given month
    fn holidays_for(&self, year: i32, month: u32) -> Vec<Holiday>;
}

/// Calendar without any holidays
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHolidays;

impl HolidayCalendar for NoHolidays {
    fn holidays_for(&self, _year: i32, _month: u32) -> Vec<Holiday> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Deserialize)]
struct HolidayEntry {
    date: NaiveDate,
    name: String,
    /// Repeats every year on the same month and day
    #[serde(default)]
    recurring: bool,
}

#[derive(Debug, Default, Deserialize)]
struct HolidayFile {
    #[serde(default)]
    holiday: Vec<HolidayEntry>,
}

/// Holidays read from a TOML table:
///
/// ```toml
/// [[holiday]]
/// date = "2024-12-25"
/// name = "Christmas Day"
/// recurring = true
/// ```
#[derive(Debug, Clone, Default)]
pub struct HolidayTable {
    entries: Vec<HolidayEntry>,
}

impl HolidayTable {
    pub fn from_toml(content: &str) -> AppResult<Self> {
        let file: HolidayFile = toml::from_str(content)?;
        Ok(Self {
            entries: file.holiday,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            config_error(&format!(
                "Failed to read holidays file {}: {}",
                path.display(),
                e
            ))
        })?;
        let table = Self::from_toml(&content)?;
        info!(
            "Loaded {} holidays from {}",
            table.entries.len(),
            path.display()
        );
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl HolidayCalendar for HolidayTable {
    fn holidays_for(&self, year: i32, month: u32) -> Vec<Holiday> {
        let mut holidays: Vec<Holiday> = self
            .entries
            .iter()
            .filter_map(|entry| {
                let date = if entry.recurring {
                    // Feb 29 only exists in leap years
                    entry.date.with_year(year)?
                } else {
                    entry.date
                };
                (date.year() == year && date.month() == month).then(|| Holiday {
                    date,
                    name: entry.name.clone(),
                })
            })
            .collect();
        holidays.sort_by_key(|holiday| holiday.date);
        holidays
    }
}
