use reqwest::{Client, Response};
use tracing::{debug, error};

use crate::messages::{CreateTaskBody, ErrorBody, Task, TaskListPayload, UpdateTaskBody};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// One user action's worth of server work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    Load,
    Create { text: String },
    Toggle { id: String, completed: bool },
    Rename { id: String, text: String },
    Delete { id: String },
}

/// Outcome of an [`ApiRequest`], sent back to the UI loop.
#[derive(Debug)]
pub enum ApiEvent {
    Loaded(Result<Vec<Task>, ClientError>),
    Created(Result<Task, ClientError>),
    Toggled(Result<Task, ClientError>),
    Renamed {
        id: String,
        result: Result<Task, ClientError>,
    },
    Deleted {
        id: String,
        result: Result<(), ClientError>,
    },
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` must already be validated and have no trailing slash.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn task_url(&self, id: &str) -> String {
        format!("{}/{id}", self.base_url)
    }

    pub async fn list(&self) -> Result<Vec<Task>, ClientError> {
        let res = self.http.get(&self.base_url).send().await?;
        let payload: TaskListPayload = check(res).await?.json().await?;
        Ok(payload.into_tasks())
    }

    pub async fn create(&self, text: &str) -> Result<Task, ClientError> {
        let res = self
            .http
            .post(&self.base_url)
            .json(&CreateTaskBody { text })
            .send()
            .await?;
        Ok(check(res).await?.json().await?)
    }

    pub async fn update(&self, id: &str, body: &UpdateTaskBody) -> Result<Task, ClientError> {
        let res = self.http.put(self.task_url(id)).json(body).send().await?;
        Ok(check(res).await?.json().await?)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ClientError> {
        let res = self.http.delete(self.task_url(id)).send().await?;
        check(res).await?;
        Ok(())
    }

    /// Runs a request to completion. Never retries.
    pub async fn dispatch(&self, request: ApiRequest) -> ApiEvent {
        debug!(?request, "Dispatching request");
        let event = match request {
            ApiRequest::Load => ApiEvent::Loaded(self.list().await),
            ApiRequest::Create { text } => ApiEvent::Created(self.create(&text).await),
            ApiRequest::Toggle { id, completed } => {
                let body = UpdateTaskBody {
                    text: None,
                    completed: Some(completed),
                };
                ApiEvent::Toggled(self.update(&id, &body).await)
            }
            ApiRequest::Rename { id, text } => {
                let body = UpdateTaskBody {
                    text: Some(text),
                    completed: None,
                };
                let result = self.update(&id, &body).await;
                ApiEvent::Renamed { id, result }
            }
            ApiRequest::Delete { id } => {
                let result = self.delete(&id).await;
                ApiEvent::Deleted { id, result }
            }
        };
        log_failure(&event);
        event
    }
}

/// Turns any non-2xx response into `ClientError::Http`, preferring the
/// server's `error` message over the raw body.
async fn check(res: Response) -> Result<Response, ClientError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let text = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&text)
        .map(|body| body.error)
        .unwrap_or(text);

    Err(ClientError::Http {
        status: status.as_u16(),
        message,
    })
}

fn log_failure(event: &ApiEvent) {
    let (action, err) = match event {
        ApiEvent::Loaded(Err(e)) => ("fetching tasks", e),
        ApiEvent::Created(Err(e)) => ("adding task", e),
        ApiEvent::Toggled(Err(e)) => ("toggling task", e),
        ApiEvent::Renamed { result: Err(e), .. } => ("editing task", e),
        ApiEvent::Deleted { result: Err(e), .. } => ("deleting task", e),
        _ => return,
    };
    error!("Error {action}: {err}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn task_json(id: &str, text: &str, completed: bool) -> serde_json::Value {
        json!({ "id": id, "text": text, "completed": completed })
    }

    #[tokio::test]
    async fn test_list_decodes_tasks() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                task_json("2", "second", false),
                task_json("1", "first", true),
            ])))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let tasks = client.list().await.unwrap();

        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].id, "2");
        assert!(tasks[1].completed);
    }

    #[tokio::test]
    async fn test_create_posts_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/"))
            .and(body_json(json!({ "text": "buy milk" })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(task_json("abc", "buy milk", false)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let task = client.create("buy milk").await.unwrap();

        assert_eq!(task.id, "abc");
        assert!(!task.completed);
    }

    #[tokio::test]
    async fn test_toggle_sends_only_completed() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/abc"))
            .and(body_json(json!({ "completed": true })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(task_json("abc", "buy milk", true)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let event = client
            .dispatch(ApiRequest::Toggle {
                id: "abc".into(),
                completed: true,
            })
            .await;

        match event {
            ApiEvent::Toggled(Ok(task)) => assert!(task.completed),
            other => panic!("Unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rename_sends_only_text() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/abc"))
            .and(body_json(json!({ "text": "oat milk" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(task_json("abc", "oat milk", false)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let event = client
            .dispatch(ApiRequest::Rename {
                id: "abc".into(),
                text: "oat milk".into(),
            })
            .await;

        match event {
            ApiEvent::Renamed { id, result: Ok(task) } => {
                assert_eq!(id, "abc");
                assert_eq!(task.text, "oat milk");
            }
            other => panic!("Unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_uses_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/missing"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(json!({ "error": "Task not found" })),
            )
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        let event = client
            .dispatch(ApiRequest::Delete {
                id: "missing".into(),
            })
            .await;

        match event {
            ApiEvent::Deleted {
                id,
                result: Err(ClientError::Http { status, message }),
            } => {
                assert_eq!(id, "missing");
                assert_eq!(status, 404);
                assert_eq!(message, "Task not found");
            }
            other => panic!("Unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_status_with_plain_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;

        let client = ApiClient::new(server.uri());
        match client.list().await {
            Err(ClientError::Http { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("Unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        let client = ApiClient::new("http://127.0.0.1:1");
        assert!(matches!(
            client.list().await,
            Err(ClientError::Transport(_))
        ));
    }
}
