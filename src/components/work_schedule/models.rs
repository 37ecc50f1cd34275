use crate::error::{invalid_input, AppResult};
use crate::storage::Entity;
use crate::utils::time::require_time;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Day of the week, indexed from Sunday = 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// All weekdays in index order
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    /// Index with Sunday = 0 and Saturday = 6
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Weekday for an index in 0..=6
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Key used in weekly templates
    pub fn key(self) -> &'static str {
        match self {
            Weekday::Sunday => "sunday",
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
        }
    }

    /// Display name
    pub fn name(self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        // num_days_from_sunday is always 0..=6
        Self::ALL[day.num_days_from_sunday() as usize]
    }
}

/// Working hours for one weekday of a template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule {
    pub enabled: bool,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

impl DaySchedule {
    /// An enabled day between two HH:MM times
    pub fn working(start_time: &str, end_time: &str) -> Self {
        Self {
            enabled: true,
            start_time: Some(start_time.to_string()),
            end_time: Some(end_time.to_string()),
        }
    }

    /// A disabled day
    pub fn off() -> Self {
        Self {
            enabled: false,
            start_time: None,
            end_time: None,
        }
    }

    /// Parsed start and end for an enabled day, `None` for a disabled one
    pub fn working_hours(&self, weekday: Weekday) -> AppResult<Option<(NaiveTime, NaiveTime)>> {
        let start = self
            .start_time
            .as_deref()
            .map(|s| require_time(&format!("{}.startTime", weekday.key()), s))
            .transpose()?;
        let end = self
            .end_time
            .as_deref()
            .map(|s| require_time(&format!("{}.endTime", weekday.key()), s))
            .transpose()?;

        if !self.enabled {
            return Ok(None);
        }

        match (start, end) {
            (Some(start), Some(end)) if start < end => Ok(Some((start, end))),
            (Some(_), Some(_)) => Err(invalid_input(&format!(
                "{}: startTime must be before endTime",
                weekday.key()
            ))),
            _ => Err(invalid_input(&format!(
                "{}: enabled days need both startTime and endTime",
                weekday.key()
            ))),
        }
    }
}

/// Weekly recurring template, keyed by weekday
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklySchedule(BTreeMap<Weekday, DaySchedule>);

impl WeeklySchedule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with_day(mut self, weekday: Weekday, day: DaySchedule) -> Self {
        self.0.insert(weekday, day);
        self
    }

    /// Template entry for a weekday, if present
    pub fn get(&self, weekday: Weekday) -> Option<&DaySchedule> {
        self.0.get(&weekday)
    }

    /// Check every entry's times
    pub fn validate(&self) -> AppResult<()> {
        for (weekday, day) in &self.0 {
            day.working_hours(*weekday)?;
        }
        Ok(())
    }

    /// Number of enabled weekdays
    pub fn enabled_days(&self) -> usize {
        self.0.values().filter(|day| day.enabled).count()
    }
}

/// A work schedule with its weekly template
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkSchedule {
    pub id: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: WeeklySchedule,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for WorkSchedule {
    const COLLECTION: &'static str = "work_schedules";

    fn id(&self) -> &str {
        &self.id
    }
}

/// Payload for creating a work schedule
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkSchedule {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub days: WeeklySchedule,
}

/// Partial update of a work schedule
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkSchedule {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub days: Option<WeeklySchedule>,
}

/// Concrete hours for one weekday of a schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkScheduleDay {
    pub id: String,
    pub work_schedule_id: String,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for WorkScheduleDay {
    const COLLECTION: &'static str = "work_schedule_days";

    fn id(&self) -> &str {
        &self.id
    }

    fn foreign_key(&self) -> Option<&str> {
        Some(&self.work_schedule_id)
    }
}

/// Payload for creating a schedule day
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkScheduleDay {
    pub work_schedule_id: String,
    pub day_of_week: u8,
    pub start_time: String,
    pub end_time: String,
}

/// Partial update of a schedule day
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkScheduleDay {
    pub day_of_week: Option<u8>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Check a schedule day's weekday index and time range
pub fn validate_schedule_day(day_of_week: u8, start_time: &str, end_time: &str) -> AppResult<()> {
    let weekday = Weekday::from_index(day_of_week).ok_or_else(|| {
        invalid_input(&format!(
            "dayOfWeek must be between 0 and 6, got {}",
            day_of_week
        ))
    })?;
    DaySchedule::working(start_time, end_time).working_hours(weekday)?;
    Ok(())
}
