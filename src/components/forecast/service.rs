use super::holidays::{HolidayCalendar, NoHolidays};
use super::models::{ForecastRequest, MonthlyForecast};
use super::projection::{project_month, ForecastTotals};
use crate::components::project::Project;
use crate::components::work_schedule::WorkSchedule;
use crate::config::DEFAULT_HOURLY_RATE;
use crate::error::{invalid_input, not_found, AppResult};
use crate::storage::Repository;
use crate::utils::ids::IdGenerator;
use crate::utils::time::validate_month;
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

/// Generates and stores monthly forecasts
#[derive(Clone)]
pub struct ForecastService {
    forecasts: Arc<dyn Repository<MonthlyForecast>>,
    schedules: Arc<dyn Repository<WorkSchedule>>,
    projects: Arc<dyn Repository<Project>>,
    holidays: Arc<dyn HolidayCalendar>,
    ids: Arc<dyn IdGenerator>,
    default_hourly_rate: f64,
}

impl ForecastService {
    pub fn new(
        forecasts: Arc<dyn Repository<MonthlyForecast>>,
        schedules: Arc<dyn Repository<WorkSchedule>>,
        projects: Arc<dyn Repository<Project>>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            forecasts,
            schedules,
            projects,
            holidays: Arc::new(NoHolidays),
            ids,
            default_hourly_rate: DEFAULT_HOURLY_RATE,
        }
    }

    pub fn with_holidays(mut self, holidays: Arc<dyn HolidayCalendar>) -> Self {
        self.holidays = holidays;
        self
    }

    /// Rate used when neither the request nor a project gives one
    pub fn with_default_hourly_rate(mut self, rate: f64) -> Self {
        self.default_hourly_rate = rate;
        self
    }

    /// The referenced project must exist even when an explicit rate wins
    async fn hourly_rate(&self, request: &ForecastRequest) -> AppResult<f64> {
        let project_rate = match &request.project_id {
            Some(project_id) => Some(
                self.projects
                    .find_by_id(project_id)
                    .await?
                    .map(|project| project.hourly_rate)
                    .ok_or_else(|| not_found("Project", project_id))?,
            ),
            None => None,
        };

        match request.hourly_rate {
            Some(rate) if !rate.is_finite() || rate < 0.0 => Err(invalid_input(
                "hourlyRate must be a non-negative number",
            )),
            Some(rate) => Ok(rate),
            None => Ok(project_rate.unwrap_or(self.default_hourly_rate)),
        }
    }

    /// Project the requested month and store the result.
    ///
    /// Nothing is stored unless every check passes.
    pub async fn generate(&self, request: ForecastRequest) -> AppResult<MonthlyForecast> {
        if let Err(e) = validate_month(request.month) {
            warn!("Rejected forecast request: {}", e);
            return Err(e);
        }
        let hourly_rate = self.hourly_rate(&request).await?;

        let schedule = self
            .schedules
            .find_by_id(&request.work_schedule_id)
            .await?
            .ok_or_else(|| not_found("Work schedule", &request.work_schedule_id))?;

        let holidays = if request.include_holidays {
            self.holidays.holidays_for(request.year, request.month)
        } else {
            Vec::new()
        };

        let work_days = match project_month(
            request.year,
            request.month,
            &schedule.days,
            &holidays,
            hourly_rate,
        ) {
            Ok(days) => days,
            Err(e) => {
                warn!(
                    "Cannot forecast schedule {}: {}",
                    request.work_schedule_id, e
                );
                return Err(e);
            }
        };
        let totals = ForecastTotals::from_days(&work_days);

        let now = Utc::now();
        let forecast = MonthlyForecast {
            id: self.ids.next_id(),
            work_schedule_id: schedule.id,
            project_id: request.project_id,
            month: request.month,
            year: request.year,
            hourly_rate,
            include_holidays: request.include_holidays,
            total_work_days: totals.work_days,
            total_work_hours: totals.work_hours,
            monthly_earnings: hourly_rate * f64::from(totals.work_hours),
            work_days,
            created_at: now,
            updated_at: now,
        };

        let forecast = self.forecasts.create(forecast).await?;
        info!(
            "Generated forecast {} for {}-{:02}: {} days, {} hours, {:.2} earnings",
            forecast.id,
            forecast.year,
            forecast.month,
            forecast.total_work_days,
            forecast.total_work_hours,
            forecast.monthly_earnings
        );
        Ok(forecast)
    }

    pub async fn find_all(&self) -> AppResult<Vec<MonthlyForecast>> {
        self.forecasts.find_all().await
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<MonthlyForecast> {
        self.forecasts
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found("Forecast", id))
    }

    pub async fn find_by_schedule(&self, work_schedule_id: &str) -> AppResult<Vec<MonthlyForecast>> {
        self.forecasts.find_by_foreign_key(work_schedule_id).await
    }
}
