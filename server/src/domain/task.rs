//! Task entity, identifier and validated inputs.

use core::fmt;
use serde::{Deserialize, Serialize};

/// Error type for task validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Task text is missing or contains only whitespace.
    #[error("Text is required")]
    EmptyText,
}

/// Unique identifier for a task.
///
/// Generated by the store on insert and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(uuid::Uuid);

impl TaskId {
    /// Creates a new `TaskId` with a random UUID.
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Parses a `TaskId` from its string form.
    ///
    /// Returns `None` when the string is not a UUID; such a string can never
    /// name a stored task.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        uuid::Uuid::parse_str(raw).ok().map(Self)
    }

    /// Returns the inner UUID.
    #[must_use]
    pub const fn inner(self) -> uuid::Uuid {
        self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Task description, never blank.
    pub text: String,
    /// Whether the task has been done.
    pub completed: bool,
}

/// Validated input for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    text: String,
}

impl NewTask {
    /// Creates a new task input.
    ///
    /// The text is kept exactly as given; only the emptiness check trims.
    ///
    /// # Errors
    /// Returns `ValidationError::EmptyText` if the text is missing or blank.
    pub fn new(text: Option<String>) -> Result<Self, ValidationError> {
        match text {
            Some(text) if !text.trim().is_empty() => Ok(Self { text }),
            _ => Err(ValidationError::EmptyText),
        }
    }

    /// Returns the task text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Consumes the input, returning the text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Partial update of a task.
///
/// `None` leaves the stored value untouched; omission is not clearing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement text, if any.
    pub text: Option<String>,
    /// Replacement completion flag, if any.
    pub completed: Option<bool>,
}

impl TaskPatch {
    /// Checks the patch against the same text rule used on creation.
    ///
    /// # Errors
    /// Returns `ValidationError::EmptyText` if `text` is supplied but blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.text {
            Some(text) if text.trim().is_empty() => Err(ValidationError::EmptyText),
            _ => Ok(()),
        }
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.completed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_rejects_missing_and_blank_text() {
        assert_eq!(NewTask::new(None), Err(ValidationError::EmptyText));
        assert_eq!(
            NewTask::new(Some(String::new())),
            Err(ValidationError::EmptyText)
        );
        assert_eq!(
            NewTask::new(Some(" \t\n ".to_string())),
            Err(ValidationError::EmptyText)
        );
    }

    #[test]
    fn test_new_task_keeps_text_verbatim() {
        let task = NewTask::new(Some("  buy milk ".to_string())).unwrap();
        assert_eq!(task.text(), "  buy milk ");
    }

    #[test]
    fn test_patch_validation() {
        let patch = TaskPatch {
            text: Some("   ".to_string()),
            completed: None,
        };
        assert_eq!(patch.validate(), Err(ValidationError::EmptyText));

        let patch = TaskPatch {
            text: None,
            completed: Some(true),
        };
        assert!(patch.validate().is_ok());
        assert!(!patch.is_empty());
        assert!(TaskPatch::default().is_empty());
    }

    #[test]
    fn test_task_id_parse() {
        let id = TaskId::new();
        assert_eq!(TaskId::parse(&id.to_string()), Some(id));
        assert_eq!(TaskId::parse("not-a-uuid"), None);
    }

    #[test]
    fn test_task_serialization_shape() {
        let task = Task {
            id: TaskId::new(),
            text: "buy milk".to_string(),
            completed: false,
        };
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["id"], serde_json::json!(task.id.to_string()));
        assert_eq!(value["text"], "buy milk");
        assert_eq!(value["completed"], false);
    }
}
