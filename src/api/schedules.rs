use super::extract::JsonBody;
use super::AppState;
use crate::components::work_schedule::{
    CreateWorkSchedule, CreateWorkScheduleDay, UpdateWorkSchedule, UpdateWorkScheduleDay,
    WorkSchedule, WorkScheduleDay,
};
use crate::error::AppResult;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub async fn create(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateWorkSchedule>,
) -> AppResult<(StatusCode, Json<WorkSchedule>)> {
    let schedule = state.schedules.create(input).await?;
    Ok((StatusCode::CREATED, Json(schedule)))
}

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<WorkSchedule>>> {
    Ok(Json(state.schedules.find_all().await?))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<WorkSchedule>> {
    Ok(Json(state.schedules.find_one(&id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateWorkSchedule>,
) -> AppResult<Json<WorkSchedule>> {
    Ok(Json(state.schedules.update(&id, input).await?))
}

pub async fn remove(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<StatusCode> {
    state.schedules.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn create_day(
    State(state): State<AppState>,
    JsonBody(input): JsonBody<CreateWorkScheduleDay>,
) -> AppResult<(StatusCode, Json<WorkScheduleDay>)> {
    let day = state.schedule_days.create(input).await?;
    Ok((StatusCode::CREATED, Json(day)))
}

pub async fn list_days(State(state): State<AppState>) -> AppResult<Json<Vec<WorkScheduleDay>>> {
    Ok(Json(state.schedule_days.find_all().await?))
}

pub async fn list_days_by_schedule(
    State(state): State<AppState>,
    Path(work_schedule_id): Path<String>,
) -> AppResult<Json<Vec<WorkScheduleDay>>> {
    Ok(Json(
        state.schedule_days.find_by_schedule(&work_schedule_id).await?,
    ))
}

pub async fn get_day(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<WorkScheduleDay>> {
    Ok(Json(state.schedule_days.find_one(&id).await?))
}

pub async fn update_day(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<UpdateWorkScheduleDay>,
) -> AppResult<Json<WorkScheduleDay>> {
    Ok(Json(state.schedule_days.update(&id, input).await?))
}

pub async fn remove_day(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.schedule_days.remove(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
