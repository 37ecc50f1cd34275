//! JSON HTTP interface over the component services

mod extract;
mod forecasts;
mod projects;
mod schedules;
mod state;
mod tasks;
mod work_logs;

pub use state::{AppState, Stores};

use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

// Handler for API health check
async fn health_handler() -> &'static str {
    "OK"
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/work-schedule",
            get(schedules::list).post(schedules::create),
        )
        .route(
            "/work-schedule/{id}",
            get(schedules::get_one)
                .patch(schedules::update)
                .delete(schedules::remove),
        )
        .route(
            "/work-schedule-day",
            get(schedules::list_days).post(schedules::create_day),
        )
        .route(
            "/work-schedule-day/work-schedule/{work_schedule_id}",
            get(schedules::list_days_by_schedule),
        )
        .route(
            "/work-schedule-day/{id}",
            get(schedules::get_day)
                .patch(schedules::update_day)
                .delete(schedules::remove_day),
        )
        .route("/forecast", get(forecasts::list))
        .route("/forecast/generate", post(forecasts::generate))
        .route(
            "/forecast/work-schedule/{work_schedule_id}",
            get(forecasts::list_by_schedule),
        )
        .route("/forecast/{id}", get(forecasts::get_one))
        .route("/projects", get(projects::list).post(projects::create))
        .route(
            "/projects/{id}",
            get(projects::get_one)
                .patch(projects::update)
                .delete(projects::remove),
        )
        .route("/tasks", get(tasks::list).post(tasks::create))
        .route("/tasks/by-status/{status}", get(tasks::list_by_status))
        .route(
            "/tasks/{id}",
            get(tasks::get_one).patch(tasks::update).delete(tasks::remove),
        )
        .route("/tasks/{id}/actual-hours", patch(tasks::update_actual_hours))
        .route("/work-logs", get(work_logs::list).post(work_logs::create))
        .route(
            "/work-logs/project/{project_id}/summary",
            get(work_logs::project_summary),
        )
        .route("/work-logs/reports/monthly", get(work_logs::monthly_report))
        .route(
            "/work-logs/{id}",
            get(work_logs::get_one)
                .patch(work_logs::update)
                .delete(work_logs::remove),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
