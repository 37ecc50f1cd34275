pub mod models;
mod service;

pub use models::{CreateTask, Task, TaskPriority, TaskStatus, UpdateTask};
pub use service::TaskService;
