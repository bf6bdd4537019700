//! REST API routes for tasks.

use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;

use crate::api::tasks::handlers::{create_task, delete_task, list_tasks, update_task};
use crate::state::AppState;

/// API routes for tasks.
///
/// The collection lives at `/` and single tasks at `/{id}`.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_tasks).post(create_task))
        .route("/{id}", put(update_task).delete(delete_task))
}
