//! API Handler implementations for tasks.
//!
//! This module provides HTTP request handlers for task operations.

use axum::{
    extract::{rejection::JsonRejection, Json, Path, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use core::fmt;
use metrics::counter;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, error};

use crate::api::tasks::types::{
    task_to_response, CreateTaskRequest, DeleteTaskResponse, TaskResponse, UpdateTaskRequest,
};
use crate::domain::{TaskId, ValidationError};
use crate::infrastructure::audit::{log_audit, AuditEvent};
use crate::state::AppState;
use crate::store::StoreError;

/// The store operation a request was performing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Listing all tasks.
    List,
    /// Creating a task.
    Create,
    /// Updating a task.
    Update,
    /// Deleting a task.
    Delete,
}

impl Operation {
    /// Metric label for this operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }

    /// Generic message returned to clients when the store fails.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Failed to fetch tasks",
            Self::Create => "Failed to create task",
            Self::Update => "Failed to update task",
            Self::Delete => "Failed to delete task",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// API errors for task operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad or missing input.
    #[error("Validation error: {0}")]
    Validation(String),
    /// No task matches the identifier.
    #[error("Task not found: {0}")]
    NotFound(String),
    /// The store failed; details stay server-side.
    #[error("Task {operation} failed: {source}")]
    Store {
        /// Operation that failed.
        operation: Operation,
        /// Underlying store error.
        #[source]
        source: StoreError,
    },
}

impl ApiError {
    /// Maps a store error, keeping not-found distinct from infrastructure failures.
    #[must_use]
    pub fn from_store(operation: Operation, err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => Self::NotFound(id.to_string()),
            source => Self::Store { operation, source },
        }
    }

    /// Maps a JSON body rejection to a validation error.
    #[must_use]
    pub fn from_rejection(rejection: &JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }

    const fn error_type(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::NotFound(_) => "not_found",
            Self::Store { .. } => "internal",
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(id) => {
                debug!(task_id = %id, "Task not found");
                (StatusCode::NOT_FOUND, "Task not found".to_string())
            }
            ApiError::Store { operation, source } => {
                error!(operation = %operation, error = %source, "Task store operation failed");
                counter!("task_requests_failed_total", "operation" => operation.as_str())
                    .increment(1);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    operation.failure_message().to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "error_type": self.error_type(),
        }));

        (status, body).into_response()
    }
}

/// GET /
///
/// List all tasks, newest first.
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<TaskResponse>>, ApiError> {
    let tasks = state
        .store()
        .list()
        .await
        .map_err(|e| ApiError::from_store(Operation::List, e))?;

    counter!("tasks_listed_total").increment(1);

    Ok(Json(tasks.iter().map(task_to_response).collect()))
}

/// POST /
///
/// Create a new task.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<TaskResponse>), ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::from_rejection(&e))?;
    let new_task = req.into_new_task()?;

    let task = state
        .store()
        .insert(new_task)
        .await
        .map_err(|e| ApiError::from_store(Operation::Create, e))?;

    counter!("tasks_created_total").increment(1);
    debug!(task_id = %task.id, "Task created");

    Ok((StatusCode::CREATED, Json(task_to_response(&task))))
}

/// PUT /{id}
///
/// Partially update a task. A request without a JSON body changes nothing
/// and returns the stored record.
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> Result<Json<TaskResponse>, ApiError> {
    let task_id = parse_task_id(id)?;
    // No JSON body at all is an empty patch.
    let req = match payload {
        Ok(Json(req)) => req,
        Err(JsonRejection::MissingJsonContentType(_)) => UpdateTaskRequest::default(),
        Err(e) => return Err(ApiError::from_rejection(&e)),
    };
    let patch = req.into_patch()?;

    let task = state
        .store()
        .update(task_id, patch)
        .await
        .map_err(|e| ApiError::from_store(Operation::Update, e))?;

    counter!("tasks_updated_total").increment(1);

    Ok(Json(task_to_response(&task)))
}

/// DELETE /{id}
///
/// Delete a task permanently.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DeleteTaskResponse>, ApiError> {
    let task_id = parse_task_id(id)?;

    state
        .store()
        .delete(task_id)
        .await
        .map_err(|e| ApiError::from_store(Operation::Delete, e))?;

    counter!("tasks_deleted_total").increment(1);
    log_audit(&AuditEvent::TaskDeleted {
        task_id: task_id.to_string(),
    });

    Ok(Json(DeleteTaskResponse {
        message: "Task deleted successfully".to_string(),
    }))
}

/// Method fallback for fixed paths such as `/health`.
///
/// Those paths would otherwise be task ids, so unsupported methods on them
/// get the same 404 as any unknown task.
pub async fn unknown_task(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().trim_start_matches('/').to_string())
}

fn parse_task_id(raw: String) -> Result<TaskId, ApiError> {
    TaskId::parse(&raw).ok_or(ApiError::NotFound(raw))
}
