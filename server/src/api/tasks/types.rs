//! Request/Response Types for Task API
//!
//! This module provides DTOs for task operations.

use serde::{Deserialize, Serialize};

use crate::domain::{NewTask, Task, TaskPatch, ValidationError};

/// Request to create a new task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    /// Task text; required and non-blank.
    #[serde(default)]
    pub text: Option<String>,
}

impl CreateTaskRequest {
    /// Validates the request into a domain input.
    ///
    /// # Errors
    /// Returns `ValidationError::EmptyText` if the text is missing or blank.
    pub fn into_new_task(self) -> Result<NewTask, ValidationError> {
        NewTask::new(self.text)
    }
}

/// Request to partially update a task.
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskRequest {
    /// Replacement text.
    #[serde(default)]
    pub text: Option<String>,
    /// Replacement completion flag.
    #[serde(default)]
    pub completed: Option<bool>,
}

impl UpdateTaskRequest {
    /// Validates the request into a domain patch.
    ///
    /// # Errors
    /// Returns `ValidationError::EmptyText` if `text` is supplied but blank.
    pub fn into_patch(self) -> Result<TaskPatch, ValidationError> {
        let patch = TaskPatch {
            text: self.text,
            completed: self.completed,
        };
        patch.validate()?;
        Ok(patch)
    }
}

/// Task response payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskResponse {
    /// Task identifier.
    pub id: String,
    /// Task text.
    pub text: String,
    /// Completion flag.
    pub completed: bool,
}

/// Delete confirmation payload.
#[derive(Debug, Clone, Serialize)]
pub struct DeleteTaskResponse {
    /// Human-readable confirmation.
    pub message: String,
}

/// Convert a stored task to its API response.
#[must_use]
pub fn task_to_response(task: &Task) -> TaskResponse {
    TaskResponse {
        id: task.id.to_string(),
        text: task.text.clone(),
        completed: task.completed,
    }
}
