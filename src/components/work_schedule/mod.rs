pub mod models;
mod service;

pub use models::{
    CreateWorkSchedule, CreateWorkScheduleDay, DaySchedule, UpdateWorkSchedule,
    UpdateWorkScheduleDay, WeeklySchedule, Weekday, WorkSchedule, WorkScheduleDay,
};
pub use service::{WorkScheduleDayService, WorkScheduleService};
