use super::extract::{JsonBody, QueryParams};
use super::tasks::ProjectFilter;
use super::AppState;
use crate::components::work_log::{
    CreateWorkLog, MonthlyReport, ProjectSummary, UpdateWorkLog, WorkLogView,
};
use crate::error::AppResult;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub year: i32,
    pub month: u32,
    pub project_id: Option<String>,
}

pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateWorkLog>,
) -> AppResult<(StatusCode, Json<WorkLogView>)> {
    let log = state.work_logs.create(input).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

pub async fn list(
    State(state): State<AppState>,
    QueryParams(filter): QueryParams<ProjectFilter>,
) -> AppResult<Json<Vec<WorkLogView>>> {
    Ok(Json(
        state
            .work_logs
            .find_all(filter.project_id.as_deref())
            .await?,
    ))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<WorkLogView>> {
    Ok(Json(state.work_logs.find_one(&id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateWorkLog>,
) -> AppResult<Json<WorkLogView>> {
    Ok(Json(state.work_logs.update(&id, input).await?))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    state.work_logs.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn project_summary(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    QueryParams(window): QueryParams<DateWindow>,
) -> AppResult<Json<ProjectSummary>> {
    Ok(Json(
        state
            .work_logs
            .project_summary(&project_id, window.start_date, window.end_date)
            .await?,
    ))
}

pub async fn monthly_report(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ReportQuery>,
) -> AppResult<Json<MonthlyReport>> {
    Ok(Json(
        state
            .work_logs
            .monthly_report(query.year, query.month, query.project_id.as_deref())
            .await?,
    ))
}
