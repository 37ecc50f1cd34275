use super::models::{CreateTask, Task, TaskStatus, UpdateTask};
use crate::components::project::Project;
use crate::error::{invalid_input, not_found, AppResult};
use crate::storage::Repository;
use crate::utils::ids::IdGenerator;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

fn validate_task(task: &Task) -> AppResult<()> {
    if task.title.trim().is_empty() {
        return Err(invalid_input("title must not be empty"));
    }
    if let Some(estimated) = task.estimated_hours {
        if !estimated.is_finite() || estimated < 0.1 {
            return Err(invalid_input("estimatedHours must be at least 0.1"));
        }
    }
    if let Some(actual) = task.actual_hours {
        if !actual.is_finite() || actual < 0.0 {
            return Err(invalid_input("actualHours must not be negative"));
        }
    }
    Ok(())
}

/// Create/read/update/delete for project tasks
#[derive(Clone)]
pub struct TaskService {
    repo: Arc<dyn Repository<Task>>,
    projects: Arc<dyn Repository<Project>>,
    ids: Arc<dyn IdGenerator>,
}

impl TaskService {
    pub fn new(
        repo: Arc<dyn Repository<Task>>,
        projects: Arc<dyn Repository<Project>>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            repo,
            projects,
            ids,
        }
    }

    pub async fn create(&self, input: CreateTask) -> AppResult<Task> {
        if self.projects.find_by_id(&input.project_id).await?.is_none() {
            return Err(not_found("Project", &input.project_id));
        }

        let now = Utc::now();
        let task = Task {
            id: self.ids.next_id(),
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or_default(),
            priority: input.priority.unwrap_or_default(),
            estimated_hours: input.estimated_hours,
            actual_hours: input.actual_hours,
            project_id: input.project_id,
            created_at: now,
            updated_at: now,
        };
        validate_task(&task)?;

        let task = self.repo.create(task).await?;
        info!("Created task {} in project {}", task.id, task.project_id);
        Ok(task)
    }

    /// Tasks, newest first, optionally limited to one project
    pub async fn find_all(&self, project_id: Option<&str>) -> AppResult<Vec<Task>> {
        let mut tasks = match project_id {
            Some(project_id) => self.repo.find_by_foreign_key(project_id).await?,
            None => self.repo.find_all().await?,
        };
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    pub async fn find_one(&self, id: &str) -> AppResult<Task> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found("Task", id))
    }

    /// Tasks in a status, most urgent first
    pub async fn find_by_status(
        &self,
        status: TaskStatus,
        project_id: Option<&str>,
    ) -> AppResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .find_all(project_id)
            .await?
            .into_iter()
            .filter(|task| task.status == status)
            .collect();
        // Stable sort keeps newest-first within a priority
        tasks.sort_by(|a, b| b.priority.cmp(&a.priority));
        Ok(tasks)
    }

    pub async fn update(&self, id: &str, input: UpdateTask) -> AppResult<Task> {
        let mut task = self.find_one(id).await?;

        if let Some(title) = input.title {
            task.title = title;
        }
        if let Some(description) = input.description {
            task.description = Some(description);
        }
        if let Some(status) = input.status {
            task.status = status;
        }
        if let Some(priority) = input.priority {
            task.priority = priority;
        }
        if let Some(estimated_hours) = input.estimated_hours {
            task.estimated_hours = Some(estimated_hours);
        }
        if let Some(actual_hours) = input.actual_hours {
            task.actual_hours = Some(actual_hours);
        }
        validate_task(&task)?;
        task.updated_at = Utc::now();

        self.repo
            .update(task)
            .await?
            .ok_or_else(|| not_found("Task", id))
    }

    pub async fn update_actual_hours(&self, id: &str, actual_hours: f64) -> AppResult<Task> {
        self.update(
            id,
            UpdateTask {
                actual_hours: Some(actual_hours),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn remove(&self, id: &str) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(not_found("Task", id));
        }
        info!("Removed task {}", id);
        Ok(())
    }
}
