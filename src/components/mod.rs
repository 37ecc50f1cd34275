//! Domain components: each owns its models and a service over a [`Repository`].
//!
//! [`Repository`]: crate::storage::Repository

pub mod forecast;
pub mod project;
pub mod task;
pub mod work_log;
pub mod work_schedule;
