//! Shared test utilities for integration tests.
//!
//! Starts the real router on an ephemeral port so tests talk HTTP to it.

#![allow(dead_code)]

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;
use tasklist_server::domain::{NewTask, Task, TaskId, TaskPatch};
use tasklist_server::infrastructure::server::app;
use tasklist_server::state::AppState;
use tasklist_server::store::{SqliteTaskStore, StoreError, TaskStore};
use tokio::task::JoinHandle;

/// A running server bound to a local ephemeral port.
pub struct TestServer {
    /// Base URL without a trailing slash, e.g. `http://127.0.0.1:40123`.
    pub base_url: String,
    /// HTTP client for talking to the server.
    pub client: reqwest::Client,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Starts a server backed by a fresh in-memory `SQLite` store.
    pub async fn start() -> Result<Self> {
        let store = SqliteTaskStore::connect("sqlite::memory:", 1).await?;
        Self::with_store(Arc::new(store)).await
    }

    /// Starts a server backed by the given store.
    pub async fn with_store(store: Arc<dyn TaskStore>) -> Result<Self> {
        let state = Arc::new(AppState::new(store));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app(state)).await;
        });

        Ok(Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
            handle,
        })
    }

    /// URL of the task collection.
    pub fn collection_url(&self) -> String {
        format!("{}/", self.base_url)
    }

    /// URL of a single task.
    pub fn task_url(&self, id: &str) -> String {
        format!("{}/{id}", self.base_url)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Store whose every operation fails as if the database were unreachable.
pub struct UnavailableStore;

fn offline() -> StoreError {
    StoreError::Internal(anyhow::anyhow!("connection refused: store offline"))
}

#[async_trait]
impl TaskStore for UnavailableStore {
    async fn insert(&self, _task: NewTask) -> Result<Task, StoreError> {
        Err(offline())
    }

    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        Err(offline())
    }

    async fn update(&self, _id: TaskId, _patch: TaskPatch) -> Result<Task, StoreError> {
        Err(offline())
    }

    async fn delete(&self, _id: TaskId) -> Result<(), StoreError> {
        Err(offline())
    }
}
