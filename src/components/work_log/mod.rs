pub mod models;
pub mod report;
mod service;

pub use models::{
    CreateWorkLog, MonthlyReport, ProjectSummary, UpdateWorkLog, WorkLog, WorkLogView,
};
pub use service::WorkLogService;
