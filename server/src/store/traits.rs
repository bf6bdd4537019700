//! Storage contract for tasks.

use async_trait::async_trait;

use crate::domain::{NewTask, Task, TaskId, TaskPatch};

/// Errors that can occur when using the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No task carries the given identifier.
    #[error("Task not found: {0}")]
    NotFound(TaskId),
    /// Database-related error.
    #[error("Database Error: {0}")]
    Db(#[from] sqlx::Error),
    /// A persisted row could not be mapped back to a task.
    #[error("Invalid persisted task data: {0}")]
    InvalidData(String),
    /// Internal error.
    #[error("Internal Error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Contract for task persistence.
///
/// Each method is a single atomic operation against one record (or a
/// read of all records). No multi-operation transactions are offered.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persists a new task with a freshly generated identifier and
    /// `completed = false`.
    ///
    /// # Errors
    /// Returns `StoreError` if the write fails.
    async fn insert(&self, task: NewTask) -> Result<Task, StoreError>;

    /// Returns every task, most recently created first.
    ///
    /// # Errors
    /// Returns `StoreError` if the read fails or a row is malformed.
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    /// Applies a partial update and returns the post-update record.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if no task has this identifier.
    async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, StoreError>;

    /// Removes a task permanently.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` if no task has this identifier.
    async fn delete(&self, id: TaskId) -> Result<(), StoreError>;
}
