use crate::storage::Entity;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Time actually spent on a project, in fractional hours
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLog {
    pub id: String,
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub hours_worked: f64,
    pub description: String,
    pub task_id: Option<String>,
    pub project_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for WorkLog {
    const COLLECTION: &'static str = "work_logs";

    fn id(&self) -> &str {
        &self.id
    }

    fn foreign_key(&self) -> Option<&str> {
        Some(&self.project_id)
    }
}

/// A work log together with its cost at the project's hourly rate
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkLogView {
    #[serde(flatten)]
    pub log: WorkLog,
    pub calculated_cost: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkLog {
    pub date: NaiveDate,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub hours_worked: f64,
    pub description: String,
    pub task_id: Option<String>,
    pub project_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkLog {
    pub date: Option<NaiveDate>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub hours_worked: Option<f64>,
    pub description: Option<String>,
    pub task_id: Option<String>,
}

/// Optional date window of a summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Hours and cost booked on one project
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub project_id: String,
    pub project_name: String,
    pub total_hours: f64,
    pub total_cost: f64,
    pub currency: String,
    pub work_log_count: usize,
    pub period: Period,
}

/// Calendar month covered by a report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportPeriod {
    pub year: i32,
    pub month: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Totals across every project in a report
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    pub total_hours: f64,
    pub total_cost: f64,
    pub total_work_logs: usize,
    pub total_projects: usize,
}

/// One project's share of a monthly report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectGroup {
    pub project_id: String,
    pub project_name: String,
    pub hourly_rate: f64,
    pub currency: String,
    pub total_hours: f64,
    pub total_cost: f64,
    pub work_logs: Vec<WorkLogView>,
}

/// Work logs of a month grouped by project
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub period: ReportPeriod,
    pub summary: ReportTotals,
    pub projects: Vec<ProjectGroup>,
}
