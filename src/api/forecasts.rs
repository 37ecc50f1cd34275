use super::extract::JsonBody;
use super::AppState;
use crate::components::forecast::{ForecastRequest, MonthlyForecast};
use crate::error::AppResult;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

pub async fn generate(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<ForecastRequest>,
) -> AppResult<(StatusCode, Json<MonthlyForecast>)> {
    let forecast = state.forecasts.generate(request).await?;
    Ok((StatusCode::CREATED, Json(forecast)))
}

pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<MonthlyForecast>>> {
    Ok(Json(state.forecasts.find_all().await?))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MonthlyForecast>> {
    Ok(Json(state.forecasts.find_by_id(&id).await?))
}

pub async fn list_by_schedule(
    State(state): State<AppState>,
    Path(work_schedule_id): Path<String>,
) -> AppResult<Json<Vec<MonthlyForecast>>> {
    Ok(Json(
        state.forecasts.find_by_schedule(&work_schedule_id).await?,
    ))
}
