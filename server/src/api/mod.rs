//! REST API for the task service.

pub mod health;
pub mod tasks;

pub use tasks::routes as task_routes;
pub use tasks::ApiError;
