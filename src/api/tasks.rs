use super::extract::{JsonBody, QueryParams};
use super::AppState;
use crate::components::task::{CreateTask, Task, TaskStatus, UpdateTask};
use crate::error::AppResult;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectFilter {
    pub project_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualHours {
    pub actual_hours: f64,
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    let task = state.tasks.create(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn list(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<ProjectFilter>,
) -> AppResult<Json<Vec<Task>>> {
    Ok(Json(
        state.tasks.find_all(filter.project_id.as_deref()).await?,
    ))
}

pub async fn list_by_status(
    State(state): State<AppState>,
    Path(status): Path<TaskStatus>,
    QueryParams(filter): QueryParams<ProjectFilter>,
) -> AppResult<Json<Vec<Task>>> {
    Ok(Json(
        state
            .tasks
            .find_by_status(status, filter.project_id.as_deref())
            .await?,
    ))
}

pub async fn get_one(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Json<Task>> {
    Ok(Json(state.tasks.find_one(&id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateTask>,
) -> AppResult<Json<Task>> {
    Ok(Json(state.tasks.update(&id, input).await?))
}

pub async fn update_actual_hours(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<ActualHours>,
) -> AppResult<Json<Task>> {
    Ok(Json(
        state
            .tasks
            .update_actual_hours(&id, input.actual_hours)
            .await?,
    ))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    state.tasks.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
