use crate::components::forecast::{ForecastService, HolidayCalendar, MonthlyForecast};
use crate::components::project::{Project, ProjectService};
use crate::components::task::{Task, TaskService};
use crate::components::work_log::{WorkLog, WorkLogService};
use crate::components::work_schedule::{
    WorkSchedule, WorkScheduleDay, WorkScheduleDayService, WorkScheduleService,
};
use crate::storage::{InMemoryRepository, RedisRepository, Repository};
use crate::utils::ids::IdGenerator;
use redis::Client as RedisClient;
use std::sync::Arc;

/// One repository per record kind
#[derive(Clone)]
pub struct Stores {
    pub work_schedules: Arc<dyn Repository<WorkSchedule>>,
    pub work_schedule_days: Arc<dyn Repository<WorkScheduleDay>>,
    pub forecasts: Arc<dyn Repository<MonthlyForecast>>,
    pub projects: Arc<dyn Repository<Project>>,
    pub tasks: Arc<dyn Repository<Task>>,
    pub work_logs: Arc<dyn Repository<WorkLog>>,
}

impl Stores {
    pub fn in_memory() -> Self {
        Self {
            work_schedules: Arc::new(InMemoryRepository::new()),
            work_schedule_days: Arc::new(InMemoryRepository::new()),
            forecasts: Arc::new(InMemoryRepository::new()),
            projects: Arc::new(InMemoryRepository::new()),
            tasks: Arc::new(InMemoryRepository::new()),
            work_logs: Arc::new(InMemoryRepository::new()),
        }
    }

    /// Redis for everything except forecasts, which are kept per process
    pub fn redis(client: RedisClient) -> Self {
        Self {
            work_schedules: Arc::new(RedisRepository::with_client(client.clone())),
            work_schedule_days: Arc::new(RedisRepository::with_client(client.clone())),
            forecasts: Arc::new(InMemoryRepository::new()),
            projects: Arc::new(RedisRepository::with_client(client.clone())),
            tasks: Arc::new(RedisRepository::with_client(client.clone())),
            work_logs: Arc::new(RedisRepository::with_client(client)),
        }
    }
}

/// Services shared by the HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub schedules: WorkScheduleService,
    pub schedule_days: WorkScheduleDayService,
    pub forecasts: ForecastService,
    pub projects: ProjectService,
    pub tasks: TaskService,
    pub work_logs: WorkLogService,
}

impl AppState {
    pub fn new(
        stores: Stores,
        ids: Arc<dyn IdGenerator>,
        holidays: Arc<dyn HolidayCalendar>,
        default_hourly_rate: f64,
    ) -> Self {
        let Stores {
            work_schedules,
            work_schedule_days,
            forecasts,
            projects,
            tasks,
            work_logs,
        } = stores;

        Self {
            schedules: WorkScheduleService::new(work_schedules.clone(), ids.clone()),
            schedule_days: WorkScheduleDayService::new(
                work_schedule_days,
                work_schedules.clone(),
                ids.clone(),
            ),
            forecasts: ForecastService::new(
                forecasts,
                work_schedules,
                projects.clone(),
                ids.clone(),
            )
            .with_holidays(holidays)
            .with_default_hourly_rate(default_hourly_rate),
            projects: ProjectService::new(projects.clone(), ids.clone()),
            tasks: TaskService::new(tasks.clone(), projects.clone(), ids.clone()),
            work_logs: WorkLogService::new(work_logs, projects, tasks, ids),
        }
    }
}
