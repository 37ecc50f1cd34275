use super::models::{
    validate_schedule_day, CreateWorkSchedule, CreateWorkScheduleDay, UpdateWorkSchedule,
    UpdateWorkScheduleDay, WeeklySchedule, WorkSchedule, WorkScheduleDay,
};
use crate::error::{invalid_input, not_found, AppResult};
use crate::storage::Repository;
use crate::utils::ids::IdGenerator;
use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, warn};

fn validate_schedule(
    start_date: NaiveDate,
    end_date: NaiveDate,
    days: &WeeklySchedule,
) -> AppResult<()> {
    if start_date > end_date {
        return Err(invalid_input("startDate must not be after endDate"));
    }
    days.validate()
}

/// Create/read/update/delete for work schedules
#[derive(Clone)]
pub struct WorkScheduleService {
    repo: Arc<dyn Repository<WorkSchedule>>,
    ids: Arc<dyn IdGenerator>,
}

impl WorkScheduleService {
    pub fn new(repo: Arc<dyn Repository<WorkSchedule>>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repo, ids }
    }

    /// Store a new schedule after validating its template
    pub async fn create(&self, input: CreateWorkSchedule) -> AppResult<WorkSchedule> {
        if let Err(e) = validate_schedule(input.start_date, input.end_date, &input.days) {
            warn!("Rejected work schedule: {}", e);
            return Err(e);
        }

        let now = Utc::now();
        let schedule = WorkSchedule {
            id: self.ids.next_id(),
            start_date: input.start_date,
            end_date: input.end_date,
            days: input.days,
            created_at: now,
            updated_at: now,
        };

        let schedule = self.repo.create(schedule).await?;
        info!(
            "Created work schedule {} with {} enabled days",
            schedule.id,
            schedule.days.enabled_days()
        );
        Ok(schedule)
    }

    pub async fn find_all(&self) -> AppResult<Vec<WorkSchedule>> {
        self.repo.find_all().await
    }

    pub async fn find_one(&self, id: &str) -> AppResult<WorkSchedule> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found("Work schedule", id))
    }

    /// Apply the fields present in the update
    pub async fn update(&self, id: &str, input: UpdateWorkSchedule) -> AppResult<WorkSchedule> {
        let mut schedule = self.find_one(id).await?;

        if let Some(start_date) = input.start_date {
            schedule.start_date = start_date;
        }
        if let Some(end_date) = input.end_date {
            schedule.end_date = end_date;
        }
        if let Some(days) = input.days {
            schedule.days = days;
        }
        validate_schedule(schedule.start_date, schedule.end_date, &schedule.days)?;
        schedule.updated_at = Utc::now();

        self.repo
            .update(schedule)
            .await?
            .ok_or_else(|| not_found("Work schedule", id))
    }

    pub async fn remove(&self, id: &str) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(not_found("Work schedule", id));
        }
        info!("Removed work schedule {}", id);
        Ok(())
    }
}

/// Create/read/update/delete for the concrete days of a schedule
#[derive(Clone)]
pub struct WorkScheduleDayService {
    repo: Arc<dyn Repository<WorkScheduleDay>>,
    schedules: Arc<dyn Repository<WorkSchedule>>,
    ids: Arc<dyn IdGenerator>,
}

impl WorkScheduleDayService {
    pub fn new(
        repo: Arc<dyn Repository<WorkScheduleDay>>,
        schedules: Arc<dyn Repository<WorkSchedule>>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            repo,
            schedules,
            ids,
        }
    }

    pub async fn create(&self, input: CreateWorkScheduleDay) -> AppResult<WorkScheduleDay> {
        validate_schedule_day(input.day_of_week, &input.start_time, &input.end_time)?;

        if self
            .schedules
            .find_by_id(&input.work_schedule_id)
            .await?
            .is_none()
        {
            return Err(not_found("Work schedule", &input.work_schedule_id));
        }

        let now = Utc::now();
        let day = WorkScheduleDay {
            id: self.ids.next_id(),
            work_schedule_id: input.work_schedule_id,
            day_of_week: input.day_of_week,
            start_time: input.start_time,
            end_time: input.end_time,
            created_at: now,
            updated_at: now,
        };

        let day = self.repo.create(day).await?;
        info!(
            "Created day {} for work schedule {}",
            day.id, day.work_schedule_id
        );
        Ok(day)
    }

    pub async fn find_all(&self) -> AppResult<Vec<WorkScheduleDay>> {
        self.repo.find_all().await
    }

    pub async fn find_by_schedule(&self, work_schedule_id: &str) -> AppResult<Vec<WorkScheduleDay>> {
        self.repo.find_by_foreign_key(work_schedule_id).await
    }

    pub async fn find_one(&self, id: &str) -> AppResult<WorkScheduleDay> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found("Work schedule day", id))
    }

    pub async fn update(&self, id: &str, input: UpdateWorkScheduleDay) -> AppResult<WorkScheduleDay> {
        let mut day = self.find_one(id).await?;

        if let Some(day_of_week) = input.day_of_week {
            day.day_of_week = day_of_week;
        }
        if let Some(start_time) = input.start_time {
            day.start_time = start_time;
        }
        if let Some(end_time) = input.end_time {
            day.end_time = end_time;
        }
        validate_schedule_day(day.day_of_week, &day.start_time, &day.end_time)?;
        day.updated_at = Utc::now();

        self.repo
            .update(day)
            .await?
            .ok_or_else(|| not_found("Work schedule day", id))
    }

    pub async fn remove(&self, id: &str) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(not_found("Work schedule day", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::work_schedule::models::{DaySchedule, Weekday};
    use crate::error::Error;
    use crate::storage::InMemoryRepository;
    use crate::utils::ids::SequentialIds;

    fn services() -> (WorkScheduleService, WorkScheduleDayService) {
        let schedules: Arc<dyn Repository<WorkSchedule>> = Arc::new(InMemoryRepository::new());
        let days: Arc<dyn Repository<WorkScheduleDay>> = Arc::new(InMemoryRepository::new());
        let ids: Arc<dyn IdGenerator> = Arc::new(SequentialIds::new("ws"));
        (
            WorkScheduleService::new(schedules.clone(), ids.clone()),
            WorkScheduleDayService::new(days, schedules, ids),
        )
    }

    fn january() -> CreateWorkSchedule {
        CreateWorkSchedule {
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            days: WeeklySchedule::new().with_day(Weekday::Monday, DaySchedule::working("09:00", "17:00")),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let (schedules, _) = services();
        let created = schedules.create(january()).await.unwrap();
        assert_eq!(created.id, "ws-1");

        let found = schedules.find_one("ws-1").await.unwrap();
        assert_eq!(found.days.enabled_days(), 1);
        assert_eq!(schedules.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_rejects_inverted_dates() {
        let (schedules, _) = services();
        let mut input = january();
        input.end_date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert!(matches!(
            schedules.create(input).await,
            Err(Error::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_bad_template() {
        let (schedules, _) = services();
        let mut input = january();
        input.days = WeeklySchedule::new().with_day(Weekday::Friday, DaySchedule::working("18:00", "10:00"));
        assert!(matches!(
            schedules.create(input).await,
            Err(Error::InvalidInput(_))
        ));
        assert!(schedules.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let (schedules, _) = services();
        let created = schedules.create(january()).await.unwrap();

        let update = UpdateWorkSchedule {
            days: Some(WeeklySchedule::new()),
            ..Default::default()
        };
        let updated = schedules.update(&created.id, update).await.unwrap();
        assert_eq!(updated.days.enabled_days(), 0);
        assert_eq!(updated.start_date, created.start_date);

        schedules.remove(&created.id).await.unwrap();
        assert!(matches!(
            schedules.find_one(&created.id).await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            schedules.remove(&created.id).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_schedule_days() {
        let (schedules, days) = services();
        let schedule = schedules.create(january()).await.unwrap();

        let day = days
            .create(CreateWorkScheduleDay {
                work_schedule_id: schedule.id.clone(),
                day_of_week: 1,
                start_time: "09:00".to_string(),
                end_time: "12:00".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(days.find_by_schedule(&schedule.id).await.unwrap().len(), 1);
        assert!(days.find_by_schedule("other").await.unwrap().is_empty());

        let updated = days
            .update(
                &day.id,
                UpdateWorkScheduleDay {
                    end_time: Some("13:00".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.end_time, "13:00");

        let bad = days
            .update(
                &day.id,
                UpdateWorkScheduleDay {
                    end_time: Some("08:00".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(bad, Err(Error::InvalidInput(_))));

        days.remove(&day.id).await.unwrap();
        assert!(days.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_schedule_day_requires_schedule() {
        let (_, days) = services();
        let result = days
            .create(CreateWorkScheduleDay {
                work_schedule_id: "missing".to_string(),
                day_of_week: 2,
                start_time: "09:00".to_string(),
                end_time: "12:00".to_string(),
            })
            .await;
        assert!(matches!(result, Err(Error::NotFound(_))));
    }
}
