use super::models::{
    CreateWorkLog, MonthlyReport, Period, ProjectSummary, UpdateWorkLog, WorkLog, WorkLogView,
};
use super::report::{build_monthly_report, with_cost};
use crate::components::project::Project;
use crate::components::task::Task;
use crate::error::{invalid_input, not_found, AppResult};
use crate::storage::Repository;
use crate::utils::ids::IdGenerator;
use crate::utils::time::month_bounds;
use chrono::{NaiveDate, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Smallest amount of time a log may record
pub const MIN_HOURS_WORKED: f64 = 0.1;

fn validate_work_log(log: &WorkLog) -> AppResult<()> {
    if !log.hours_worked.is_finite() || log.hours_worked < MIN_HOURS_WORKED {
        return Err(invalid_input("hoursWorked must be at least 0.1"));
    }
    if log.description.trim().is_empty() {
        return Err(invalid_input("description must not be empty"));
    }
    if let Some(end_time) = log.end_time {
        if log.start_time >= end_time {
            return Err(invalid_input("Start time must be before end time"));
        }
    }
    Ok(())
}

/// Work log bookkeeping and reports
#[derive(Clone)]
pub struct WorkLogService {
    repo: Arc<dyn Repository<WorkLog>>,
    projects: Arc<dyn Repository<Project>>,
    tasks: Arc<dyn Repository<Task>>,
    ids: Arc<dyn IdGenerator>,
}

impl WorkLogService {
    pub fn new(
        repo: Arc<dyn Repository<WorkLog>>,
        projects: Arc<dyn Repository<Project>>,
        tasks: Arc<dyn Repository<Task>>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            repo,
            projects,
            tasks,
            ids,
        }
    }

    async fn project(&self, project_id: &str) -> AppResult<Project> {
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or_else(|| not_found("Project", project_id))
    }

    async fn check_task(&self, task_id: &str, project_id: &str) -> AppResult<()> {
        match self.tasks.find_by_id(task_id).await? {
            Some(task) if task.project_id == project_id => Ok(()),
            Some(_) => Err(invalid_input(&format!(
                "Task {} does not belong to project {}",
                task_id, project_id
            ))),
            None => Err(not_found("Task", task_id)),
        }
    }

    async fn projects_by_id(&self) -> AppResult<HashMap<String, Project>> {
        Ok(self
            .projects
            .find_all()
            .await?
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect())
    }

    pub async fn create(&self, input: CreateWorkLog) -> AppResult<WorkLogView> {
        let project = self.project(&input.project_id).await?;
        if let Some(task_id) = &input.task_id {
            self.check_task(task_id, &input.project_id).await?;
        }

        let now = Utc::now();
        let log = WorkLog {
            id: self.ids.next_id(),
            date: input.date,
            start_time: input.start_time,
            end_time: input.end_time,
            hours_worked: input.hours_worked,
            description: input.description,
            task_id: input.task_id,
            project_id: input.project_id,
            created_at: now,
            updated_at: now,
        };
        if let Err(e) = validate_work_log(&log) {
            warn!("Rejected work log for project {}: {}", log.project_id, e);
            return Err(e);
        }

        let log = self.repo.create(log).await?;
        info!(
            "Logged {:.2}h on project {} ({})",
            log.hours_worked, project.name, log.date
        );
        Ok(with_cost(log, Some(&project)))
    }

    /// Logs, most recent date first, optionally limited to one project
    pub async fn find_all(&self, project_id: Option<&str>) -> AppResult<Vec<WorkLogView>> {
        let mut logs = match project_id {
            Some(project_id) => self.repo.find_by_foreign_key(project_id).await?,
            None => self.repo.find_all().await?,
        };
        logs.sort_by(|a, b| b.date.cmp(&a.date));

        let projects = self.projects_by_id().await?;
        Ok(logs
            .into_iter()
            .map(|log| {
                let project = projects.get(&log.project_id);
                with_cost(log, project)
            })
            .collect())
    }

    pub async fn find_one(&self, id: &str) -> AppResult<WorkLogView> {
        let log = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found("Work log", id))?;
        let project = self.projects.find_by_id(&log.project_id).await?;
        Ok(with_cost(log, project.as_ref()))
    }

    pub async fn update(&self, id: &str, input: UpdateWorkLog) -> AppResult<WorkLogView> {
        let mut log = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found("Work log", id))?;

        if let Some(date) = input.date {
            log.date = date;
        }
        if let Some(start_time) = input.start_time {
            log.start_time = start_time;
        }
        if let Some(end_time) = input.end_time {
            log.end_time = Some(end_time);
        }
        if let Some(hours_worked) = input.hours_worked {
            log.hours_worked = hours_worked;
        }
        if let Some(description) = input.description {
            log.description = description;
        }
        if let Some(task_id) = input.task_id {
            self.check_task(&task_id, &log.project_id).await?;
            log.task_id = Some(task_id);
        }
        validate_work_log(&log)?;
        log.updated_at = Utc::now();

        let log = self
            .repo
            .update(log)
            .await?
            .ok_or_else(|| not_found("Work log", id))?;
        let project = self.projects.find_by_id(&log.project_id).await?;
        Ok(with_cost(log, project.as_ref()))
    }

    pub async fn remove(&self, id: &str) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(not_found("Work log", id));
        }
        info!("Removed work log {}", id);
        Ok(())
    }

    /// Hours and cost of one project, optionally within a date window
    pub async fn project_summary(
        &self,
        project_id: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> AppResult<ProjectSummary> {
        let project = self.project(project_id).await?;

        let logs: Vec<WorkLog> = self
            .repo
            .find_by_foreign_key(project_id)
            .await?
            .into_iter()
            .filter(|log| start_date.map_or(true, |start| log.date >= start))
            .filter(|log| end_date.map_or(true, |end| log.date <= end))
            .collect();

        let total_hours: f64 = logs.iter().map(|log| log.hours_worked).sum();

        Ok(ProjectSummary {
            project_id: project.id,
            project_name: project.name,
            total_hours,
            total_cost: total_hours * project.hourly_rate,
            currency: project.currency,
            work_log_count: logs.len(),
            period: Period {
                start_date,
                end_date,
            },
        })
    }

    /// All logs of a calendar month, grouped by project
    pub async fn monthly_report(
        &self,
        year: i32,
        month: u32,
        project_id: Option<&str>,
    ) -> AppResult<MonthlyReport> {
        let (start_date, end_date) = month_bounds(year, month)?;

        let mut logs: Vec<WorkLog> = match project_id {
            Some(project_id) => self.repo.find_by_foreign_key(project_id).await?,
            None => self.repo.find_all().await?,
        }
        .into_iter()
        .filter(|log| log.date >= start_date && log.date <= end_date)
        .collect();
        logs.sort_by(|a, b| a.date.cmp(&b.date));

        let projects = self.projects_by_id().await?;
        Ok(build_monthly_report(
            year, month, start_date, end_date, logs, &projects,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::project::ProjectStatus;
    use crate::components::task::{TaskPriority, TaskStatus};
    use crate::error::Error;
    use crate::storage::InMemoryRepository;
    use crate::utils::ids::SequentialIds;
    use chrono::{TimeZone, Utc};

    fn project(id: &str, rate: f64) -> Project {
        let now = Utc::now();
        Project {
            id: id.to_string(),
            name: format!("Project {}", id),
            description: None,
            hourly_rate: rate,
            currency: "USD".to_string(),
            status: ProjectStatus::Active,
            start_date: None,
            end_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    async fn setup() -> WorkLogService {
        let projects: Arc<dyn Repository<Project>> = Arc::new(InMemoryRepository::new());
        projects.create(project("p-1", 50.0)).await.unwrap();
        projects.create(project("p-2", 100.0)).await.unwrap();

        let tasks: Arc<dyn Repository<Task>> = Arc::new(InMemoryRepository::new());
        let now = Utc::now();
        tasks
            .create(Task {
                id: "t-1".to_string(),
                title: "Checkout".to_string(),
                description: None,
                status: TaskStatus::InProgress,
                priority: TaskPriority::High,
                estimated_hours: None,
                actual_hours: None,
                project_id: "p-1".to_string(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        WorkLogService::new(
            Arc::new(InMemoryRepository::new()),
            projects,
            tasks,
            Arc::new(SequentialIds::new("wl")),
        )
    }

    fn entry(project_id: &str, month: u32, day: u32, hours: f64) -> CreateWorkLog {
        CreateWorkLog {
            date: NaiveDate::from_ymd_opt(2024, month, day).unwrap(),
            start_time: Utc.with_ymd_and_hms(2024, month, day, 9, 0, 0).unwrap(),
            end_time: None,
            hours_worked: hours,
            description: "Implemented checkout".to_string(),
            task_id: None,
            project_id: project_id.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_computes_cost() {
        let logs = setup().await;
        let view = logs.create(entry("p-1", 1, 15, 2.5)).await.unwrap();
        assert_eq!(view.calculated_cost, Some(125.0));
        assert_eq!(view.log.hours_worked, 2.5);
    }

    #[tokio::test]
    async fn test_create_validation() {
        let logs = setup().await;

        assert!(matches!(
            logs.create(entry("missing", 1, 15, 2.0)).await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            logs.create(entry("p-1", 1, 15, 0.05)).await,
            Err(Error::InvalidInput(_))
        ));

        let mut inverted = entry("p-1", 1, 15, 2.0);
        inverted.end_time = Some(Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap());
        assert!(matches!(
            logs.create(inverted).await,
            Err(Error::InvalidInput(_))
        ));

        let mut foreign_task = entry("p-2", 1, 15, 2.0);
        foreign_task.task_id = Some("t-1".to_string());
        assert!(matches!(
            logs.create(foreign_task).await,
            Err(Error::InvalidInput(_))
        ));

        let mut own_task = entry("p-1", 1, 15, 2.0);
        own_task.task_id = Some("t-1".to_string());
        assert!(logs.create(own_task).await.is_ok());
    }

    #[tokio::test]
    async fn test_find_all_newest_first() {
        let logs = setup().await;
        logs.create(entry("p-1", 1, 3, 1.0)).await.unwrap();
        logs.create(entry("p-1", 1, 20, 1.0)).await.unwrap();
        logs.create(entry("p-2", 1, 10, 1.0)).await.unwrap();

        let all = logs.find_all(None).await.unwrap();
        let days: Vec<NaiveDate> = all.iter().map(|v| v.log.date).collect();
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2024, 1, 20).unwrap());
        assert_eq!(days[2], NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());

        assert_eq!(logs.find_all(Some("p-2")).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_keeps_fractional_hours() {
        let logs = setup().await;
        let created = logs.create(entry("p-1", 1, 3, 1.0)).await.unwrap();

        let updated = logs
            .update(
                &created.log.id,
                UpdateWorkLog {
                    hours_worked: Some(1.75),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.log.hours_worked, 1.75);
        assert_eq!(updated.calculated_cost, Some(87.5));
    }

    #[tokio::test]
    async fn test_project_summary_window() {
        let logs = setup().await;
        logs.create(entry("p-1", 1, 3, 2.0)).await.unwrap();
        logs.create(entry("p-1", 1, 20, 3.0)).await.unwrap();
        logs.create(entry("p-1", 2, 5, 4.0)).await.unwrap();

        let all = logs.project_summary("p-1", None, None).await.unwrap();
        assert_eq!(all.total_hours, 9.0);
        assert_eq!(all.total_cost, 450.0);
        assert_eq!(all.work_log_count, 3);

        let january = logs
            .project_summary(
                "p-1",
                NaiveDate::from_ymd_opt(2024, 1, 1),
                NaiveDate::from_ymd_opt(2024, 1, 31),
            )
            .await
            .unwrap();
        assert_eq!(january.total_hours, 5.0);
        assert_eq!(january.work_log_count, 2);
    }

    #[tokio::test]
    async fn test_monthly_report() {
        let logs = setup().await;
        logs.create(entry("p-2", 2, 10, 1.5)).await.unwrap();
        logs.create(entry("p-1", 2, 1, 2.0)).await.unwrap();
        logs.create(entry("p-1", 3, 1, 8.0)).await.unwrap();

        let report = logs.monthly_report(2024, 2, None).await.unwrap();
        assert_eq!(report.summary.total_work_logs, 2);
        assert_eq!(report.summary.total_hours, 3.5);
        assert_eq!(report.summary.total_cost, 250.0);
        // p-1 has the earliest log of the month
        assert_eq!(report.projects[0].project_id, "p-1");
        assert_eq!(report.period.end_date, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let only_p2 = logs.monthly_report(2024, 2, Some("p-2")).await.unwrap();
        assert_eq!(only_p2.summary.total_projects, 1);

        assert!(matches!(
            logs.monthly_report(2024, 13, None).await,
            Err(Error::InvalidInput(_))
        ));
    }
}
