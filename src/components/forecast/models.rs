use crate::storage::Entity;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Parameters of a forecast generation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastRequest {
    pub work_schedule_id: String,
    pub month: u32,
    pub year: i32,
    #[serde(default)]
    pub include_holidays: bool,
    /// Overrides the project and default rates
    pub hourly_rate: Option<f64>,
    /// Project whose hourly rate applies when no explicit rate is given
    pub project_id: Option<String>,
}

impl ForecastRequest {
    pub fn new(work_schedule_id: &str, year: i32, month: u32) -> Self {
        Self {
            work_schedule_id: work_schedule_id.to_string(),
            month,
            year,
            include_holidays: false,
            hourly_rate: None,
            project_id: None,
        }
    }

    pub fn with_hourly_rate(mut self, hourly_rate: f64) -> Self {
        self.hourly_rate = Some(hourly_rate);
        self
    }

    pub fn with_project(mut self, project_id: &str) -> Self {
        self.project_id = Some(project_id.to_string());
        self
    }

    pub fn including_holidays(mut self) -> Self {
        self.include_holidays = true;
        self
    }
}

/// A named public holiday
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
}

/// One calendar day of a forecast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayProjection {
    pub date: NaiveDate,
    /// 0 = Sunday … 6 = Saturday
    pub day_of_week: u8,
    pub day_name: String,
    pub is_work_day: bool,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    /// Whole hours; zero on days off and holidays
    pub work_hours: u32,
    pub is_holiday: bool,
    pub holiday_name: Option<String>,
    pub daily_earnings: f64,
}

impl DayProjection {
    /// Whether the day counts towards the monthly totals
    pub fn is_billable(&self) -> bool {
        self.is_work_day && !self.is_holiday
    }
}

/// Projected work and earnings of a month, immutable once generated
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyForecast {
    pub id: String,
    pub work_schedule_id: String,
    pub project_id: Option<String>,
    pub month: u32,
    pub year: i32,
    pub hourly_rate: f64,
    pub include_holidays: bool,
    pub total_work_days: u32,
    pub total_work_hours: u32,
    pub monthly_earnings: f64,
    pub work_days: Vec<DayProjection>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for MonthlyForecast {
    const COLLECTION: &'static str = "forecasts";

    fn id(&self) -> &str {
        &self.id
    }

    fn foreign_key(&self) -> Option<&str> {
        Some(&self.work_schedule_id)
    }
}
