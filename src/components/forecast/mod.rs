//! Monthly work and earnings forecasts generated from weekly schedule templates

pub mod calendar;
pub mod holidays;
pub mod hours;
pub mod models;
pub mod projection;
mod service;

pub use holidays::{HolidayCalendar, HolidayTable, NoHolidays};
pub use models::{DayProjection, ForecastRequest, Holiday, MonthlyForecast};
pub use service::ForecastService;
