use serde::{Deserialize, Serialize};

/// A task as the server reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(alias = "_id")]
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreateTaskBody<'a> {
    pub text: &'a str,
}

/// Partial update body; `None` fields are left out of the JSON entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateTaskBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// List responses are normally a bare array, but a wrapped
/// `{"tasks": [...]}` (or `{"todos": [...]}`) body is accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TaskListPayload {
    Bare(Vec<Task>),
    Wrapped {
        #[serde(default, alias = "todos")]
        tasks: Vec<Task>,
    },
}

impl TaskListPayload {
    pub fn into_tasks(self) -> Vec<Task> {
        match self {
            TaskListPayload::Bare(tasks) | TaskListPayload::Wrapped { tasks } => tasks,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_payload_shapes() {
        let bare: TaskListPayload =
            serde_json::from_str(r#"[{"id":"1","text":"a","completed":true}]"#).unwrap();
        assert_eq!(bare.into_tasks().len(), 1);

        let wrapped: TaskListPayload =
            serde_json::from_str(r#"{"todos":[{"_id":"2","text":"b"}]}"#).unwrap();
        let tasks = wrapped.into_tasks();
        assert_eq!(tasks[0].id, "2");
        assert!(!tasks[0].completed);

        let empty: TaskListPayload = serde_json::from_str("{}").unwrap();
        assert!(empty.into_tasks().is_empty());
    }

    #[test]
    fn test_update_body_omits_absent_fields() {
        let body = UpdateTaskBody {
            text: None,
            completed: Some(true),
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"completed":true}"#);

        let body = UpdateTaskBody {
            text: Some("new".into()),
            completed: None,
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"text":"new"}"#);
    }
}
