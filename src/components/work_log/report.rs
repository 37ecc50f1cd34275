use super::models::{
    MonthlyReport, ProjectGroup, ReportPeriod, ReportTotals, WorkLog, WorkLogView,
};
use crate::components::project::models::DEFAULT_CURRENCY;
use crate::components::project::Project;
use chrono::NaiveDate;
use std::collections::HashMap;

/// Name used for logs whose project no longer exists
pub const UNKNOWN_PROJECT: &str = "Unknown Project";

/// Attach the cost at the project's rate
pub fn with_cost(log: WorkLog, project: Option<&Project>) -> WorkLogView {
    let calculated_cost = project.map(|p| log.hours_worked * p.hourly_rate);
    WorkLogView {
        log,
        calculated_cost,
    }
}

/// Group a month's logs by project.
///
/// Groups appear in the order their first log appears; logs are expected in ascending
/// date order. Logs of unknown projects are billed at zero.
pub fn build_monthly_report(
    year: i32,
    month: u32,
    start_date: NaiveDate,
    end_date: NaiveDate,
    logs: Vec<WorkLog>,
    projects: &HashMap<String, Project>,
) -> MonthlyReport {
    let mut groups: Vec<ProjectGroup> = Vec::new();
    let mut totals = ReportTotals {
        total_work_logs: logs.len(),
        ..Default::default()
    };

    for log in logs {
        let project = projects.get(&log.project_id);
        let hourly_rate = project.map(|p| p.hourly_rate).unwrap_or(0.0);
        let cost = log.hours_worked * hourly_rate;

        let index = match groups.iter().position(|g| g.project_id == log.project_id) {
            Some(index) => index,
            None => {
                groups.push(ProjectGroup {
                    project_id: log.project_id.clone(),
                    project_name: project
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| UNKNOWN_PROJECT.to_string()),
                    hourly_rate,
                    currency: project
                        .map(|p| p.currency.clone())
                        .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
                    total_hours: 0.0,
                    total_cost: 0.0,
                    work_logs: Vec::new(),
                });
                groups.len() - 1
            }
        };

        totals.total_hours += log.hours_worked;
        totals.total_cost += cost;

        let group = &mut groups[index];
        group.total_hours += log.hours_worked;
        group.total_cost += cost;
        group.work_logs.push(with_cost(log, project));
    }

    totals.total_projects = groups.len();

    MonthlyReport {
        period: ReportPeriod {
            year,
            month,
            start_date,
            end_date,
        },
        summary: totals,
        projects: groups,
    }
}
