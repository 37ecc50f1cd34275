use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use freelance_planner::api::{self, AppState, Stores};
use freelance_planner::components::forecast::NoHolidays;
use freelance_planner::utils::ids::SequentialIds;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::new(
        Stores::in_memory(),
        Arc::new(SequentialIds::new("id")),
        Arc::new(NoHolidays),
        65.0,
    );
    api::router(state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let body = match body {
        Some(value) => Body::from(value.to_string()),
        None => Body::empty(),
    };
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

fn office_week() -> Value {
    let day = json!({ "enabled": true, "startTime": "09:00", "endTime": "17:00" });
    json!({
        "monday": day,
        "tuesday": day,
        "wednesday": day,
        "thursday": day,
        "friday": day,
        "saturday": { "enabled": false },
        "sunday": { "enabled": false }
    })
}

async fn create_schedule(app: &Router) -> String {
    let (status, schedule) = send(
        app,
        "POST",
        "/work-schedule",
        Some(json!({
            "startDate": "2024-01-01",
            "endDate": "2024-12-31",
            "days": office_week()
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    schedule["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("OK".to_string()));
}

#[tokio::test]
async fn test_forecast_roundtrip() {
    let app = app();
    let schedule_id = create_schedule(&app).await;

    let (status, forecast) = send(
        &app,
        "POST",
        "/forecast/generate",
        Some(json!({
            "workScheduleId": schedule_id,
            "month": 1,
            "year": 2024,
            "hourlyRate": 65
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(forecast["totalWorkDays"], 23);
    assert_eq!(forecast["totalWorkHours"], 184);
    assert_eq!(forecast["monthlyEarnings"], 11960.0);
    assert_eq!(forecast["workDays"].as_array().unwrap().len(), 31);
    assert_eq!(forecast["workDays"][0]["date"], "2024-01-01");
    assert_eq!(forecast["workDays"][0]["dayName"], "Monday");
    assert_eq!(forecast["workDays"][0]["dayOfWeek"], 1);

    let id = forecast["id"].as_str().unwrap();
    let (status, fetched) = send(&app, "GET", &format!("/forecast/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], forecast["id"]);

    let (status, by_schedule) = send(
        &app,
        "GET",
        &format!("/forecast/work-schedule/{}", schedule_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_schedule.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_forecast_errors() {
    let app = app();

    let (status, body) = send(
        &app,
        "POST",
        "/forecast/generate",
        Some(json!({ "workScheduleId": "missing", "month": 1, "year": 2024 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("missing"));

    let schedule_id = create_schedule(&app).await;
    let (status, _) = send(
        &app,
        "POST",
        "/forecast/generate",
        Some(json!({ "workScheduleId": schedule_id, "month": 13, "year": 2024 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, forecasts) = send(&app, "GET", "/forecast", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(forecasts, json!([]));

    let (status, _) = send(&app, "GET", "/forecast/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_bodies_are_bad_requests() {
    let app = app();
    let schedule_id = create_schedule(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/forecast/generate",
        Some(json!({ "workScheduleId": schedule_id, "month": -1, "year": 2024 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, body) = send(
        &app,
        "POST",
        "/forecast/generate",
        Some(json!({ "month": 1, "year": 2024 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("workScheduleId"));

    let (status, body) = send(&app, "GET", "/work-logs/reports/monthly?year=2024", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (_, forecasts) = send(&app, "GET", "/forecast", None).await;
    assert_eq!(forecasts, json!([]));
}

#[tokio::test]
async fn test_invalid_schedule_rejected() {
    let app = app();
    let (status, _) = send(
        &app,
        "POST",
        "/work-schedule",
        Some(json!({
            "startDate": "2024-01-01",
            "endDate": "2024-12-31",
            "days": { "monday": { "enabled": true, "startTime": "17:00", "endTime": "09:00" } }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, schedules) = send(&app, "GET", "/work-schedule", None).await;
    assert_eq!(schedules, json!([]));
}

#[tokio::test]
async fn test_schedule_days() {
    let app = app();
    let schedule_id = create_schedule(&app).await;

    let (status, day) = send(
        &app,
        "POST",
        "/work-schedule-day",
        Some(json!({
            "workScheduleId": schedule_id,
            "dayOfWeek": 3,
            "startTime": "08:00",
            "endTime": "16:00"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, days) = send(
        &app,
        "GET",
        &format!("/work-schedule-day/work-schedule/{}", schedule_id),
        None,
    )
    .await;
    assert_eq!(days.as_array().unwrap().len(), 1);

    let day_id = day["id"].as_str().unwrap();
    let (status, _) = send(&app, "DELETE", &format!("/work-schedule-day/{}", day_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/work-schedule-day/{}", day_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_project_rate_drives_forecast() {
    let app = app();
    let schedule_id = create_schedule(&app).await;

    let (status, project) = send(
        &app,
        "POST",
        "/projects",
        Some(json!({ "name": "Webshop", "hourlyRate": 80 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(project["currency"], "USD");
    assert_eq!(project["status"], "ACTIVE");

    let (status, forecast) = send(
        &app,
        "POST",
        "/forecast/generate",
        Some(json!({
            "workScheduleId": schedule_id,
            "projectId": project["id"],
            "month": 1,
            "year": 2024
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(forecast["hourlyRate"], 80.0);
    assert_eq!(forecast["monthlyEarnings"], 14720.0);
}

#[tokio::test]
async fn test_tasks_and_work_logs() {
    let app = app();
    let (_, project) = send(
        &app,
        "POST",
        "/projects",
        Some(json!({ "name": "Webshop", "hourlyRate": 50 })),
    )
    .await;
    let project_id = project["id"].as_str().unwrap().to_string();

    let (status, task) = send(
        &app,
        "POST",
        "/tasks",
        Some(json!({ "title": "Checkout", "projectId": project_id, "priority": "HIGH" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let task_id = task["id"].as_str().unwrap().to_string();

    let (status, todo) = send(&app, "GET", "/tasks/by-status/TODO", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(todo.as_array().unwrap().len(), 1);

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/tasks/{}/actual-hours", task_id),
        Some(json!({ "actualHours": 3.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["actualHours"], 3.5);

    let (status, log) = send(
        &app,
        "POST",
        "/work-logs",
        Some(json!({
            "date": "2024-01-15",
            "startTime": "2024-01-15T09:00:00Z",
            "hoursWorked": 2.5,
            "description": "Checkout flow",
            "taskId": task_id,
            "projectId": project_id
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(log["calculatedCost"], 125.0);
    assert_eq!(log["hoursWorked"], 2.5);

    let (status, summary) = send(
        &app,
        "GET",
        &format!(
            "/work-logs/project/{}/summary?startDate=2024-01-01&endDate=2024-01-31",
            project_id
        ),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["totalHours"], 2.5);
    assert_eq!(summary["workLogCount"], 1);

    let (status, report) = send(&app, "GET", "/work-logs/reports/monthly?year=2024&month=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["summary"]["totalCost"], 125.0);
    assert_eq!(report["summary"]["totalProjects"], 1);

    let (status, _) = send(&app, "GET", "/work-logs/reports/monthly?year=2024&month=0", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
