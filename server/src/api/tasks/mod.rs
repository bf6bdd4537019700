//! REST API endpoints for tasks.
//!
//! List, create, partially update and delete tasks. Handlers only see the
//! [`TaskStore`](crate::store::TaskStore) injected through [`AppState`](crate::state::AppState).

pub mod handlers;
pub mod routes;
pub mod types;

pub use handlers::{ApiError, Operation};
pub use routes::routes;
pub use types::{
    task_to_response, CreateTaskRequest, DeleteTaskResponse, TaskResponse, UpdateTaskRequest,
};
