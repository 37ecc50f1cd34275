pub mod models;
mod service;

pub use models::{CreateProject, Project, ProjectStatus, UpdateProject};
pub use service::ProjectService;
