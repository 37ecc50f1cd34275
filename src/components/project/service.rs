use super::models::{CreateProject, Project, ProjectStatus, UpdateProject, DEFAULT_CURRENCY};
use crate::error::{invalid_input, not_found, AppResult};
use crate::storage::Repository;
use crate::utils::ids::IdGenerator;
use chrono::Utc;
use std::sync::Arc;
use tracing::info;

fn validate_project(project: &Project) -> AppResult<()> {
    if project.name.trim().is_empty() {
        return Err(invalid_input("name must not be empty"));
    }
    if !project.hourly_rate.is_finite() || project.hourly_rate < 0.01 {
        return Err(invalid_input("hourlyRate must be at least 0.01"));
    }
    if let (Some(start), Some(end)) = (project.start_date, project.end_date) {
        if start > end {
            return Err(invalid_input("startDate must not be after endDate"));
        }
    }
    Ok(())
}

/// Create/read/update/delete for projects
#[derive(Clone)]
pub struct ProjectService {
    repo: Arc<dyn Repository<Project>>,
    ids: Arc<dyn IdGenerator>,
}

impl ProjectService {
    pub fn new(repo: Arc<dyn Repository<Project>>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { repo, ids }
    }

    pub async fn create(&self, input: CreateProject) -> AppResult<Project> {
        let now = Utc::now();
        let project = Project {
            id: self.ids.next_id(),
            name: input.name,
            description: input.description,
            hourly_rate: input.hourly_rate,
            currency: input
                .currency
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            status: input.status.unwrap_or(ProjectStatus::Active),
            start_date: input.start_date,
            end_date: input.end_date,
            created_at: now,
            updated_at: now,
        };
        validate_project(&project)?;

        let project = self.repo.create(project).await?;
        info!("Created project {} ({})", project.id, project.name);
        Ok(project)
    }

    pub async fn find_all(&self) -> AppResult<Vec<Project>> {
        self.repo.find_all().await
    }

    pub async fn find_one(&self, id: &str) -> AppResult<Project> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found("Project", id))
    }

    pub async fn update(&self, id: &str, input: UpdateProject) -> AppResult<Project> {
        let mut project = self.find_one(id).await?;

        if let Some(name) = input.name {
            project.name = name;
        }
        if let Some(description) = input.description {
            project.description = Some(description);
        }
        if let Some(hourly_rate) = input.hourly_rate {
            project.hourly_rate = hourly_rate;
        }
        if let Some(currency) = input.currency {
            project.currency = currency;
        }
        if let Some(status) = input.status {
            project.status = status;
        }
        if let Some(start_date) = input.start_date {
            project.start_date = Some(start_date);
        }
        if let Some(end_date) = input.end_date {
            project.end_date = Some(end_date);
        }
        validate_project(&project)?;
        project.updated_at = Utc::now();

        self.repo
            .update(project)
            .await?
            .ok_or_else(|| not_found("Project", id))
    }

    pub async fn remove(&self, id: &str) -> AppResult<()> {
        if !self.repo.delete(id).await? {
            return Err(not_found("Project", id));
        }
        info!("Removed project {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::storage::InMemoryRepository;
    use crate::utils::ids::SequentialIds;

    fn service() -> ProjectService {
        ProjectService::new(
            Arc::new(InMemoryRepository::new()),
            Arc::new(SequentialIds::new("p")),
        )
    }

    fn shop() -> CreateProject {
        CreateProject {
            name: "E-commerce Website".to_string(),
            description: None,
            hourly_rate: 50.0,
            currency: None,
            status: None,
            start_date: None,
            end_date: None,
        }
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let projects = service();
        let project = projects.create(shop()).await.unwrap();
        assert_eq!(project.currency, "USD");
        assert_eq!(project.status, ProjectStatus::Active);
    }

    #[tokio::test]
    async fn test_create_rejects_zero_rate() {
        let projects = service();
        let mut input = shop();
        input.hourly_rate = 0.0;
        assert!(matches!(
            projects.create(input).await,
            Err(Error::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_update_status_and_rate() {
        let projects = service();
        let project = projects.create(shop()).await.unwrap();

        let updated = projects
            .update(
                &project.id,
                UpdateProject {
                    hourly_rate: Some(80.0),
                    status: Some(ProjectStatus::Paused),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.hourly_rate, 80.0);
        assert_eq!(updated.status, ProjectStatus::Paused);
        assert_eq!(updated.name, "E-commerce Website");
    }

    #[test]
    fn test_status_serializes_upper_case() {
        let json = serde_json::to_string(&ProjectStatus::Cancelled).unwrap();
        assert_eq!(json, "\"CANCELLED\"");
    }

    #[tokio::test]
    async fn test_remove_unknown_project() {
        let projects = service();
        assert!(matches!(
            projects.remove("nope").await,
            Err(Error::NotFound(_))
        ));
    }
}
