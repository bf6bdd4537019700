//! `SQLite` task store.
//!
//! Tasks live in a single `tasks` table. Creation order is kept in an
//! `AUTOINCREMENT` sequence column so it is never reused, even after deletes.

use async_trait::async_trait;
use sqlx::{
    Row,
    sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow},
};
use std::str::FromStr;
use tracing::{debug, instrument};

use crate::domain::{NewTask, Task, TaskId, TaskPatch};
use crate::store::traits::{StoreError, TaskStore};

const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS tasks (
    seq INTEGER PRIMARY KEY AUTOINCREMENT,
    id TEXT NOT NULL UNIQUE,
    text TEXT NOT NULL CHECK (length(trim(text)) > 0),
    completed INTEGER NOT NULL DEFAULT 0
)";

/// `SQLite`-backed task store.
#[derive(Debug, Clone)]
pub struct SqliteTaskStore {
    pool: SqlitePool,
}

impl SqliteTaskStore {
    /// Connects to the database at `url` and makes sure the schema exists.
    ///
    /// File databases are created when missing. In-memory URLs are pinned to
    /// a single long-lived connection, otherwise every pooled connection
    /// would see its own empty database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or the
    /// schema cannot be created.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool_options = if is_memory_url(url) {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options.connect_with(options).await?;
        Self::from_pool(pool).await
    }

    /// Wraps an existing pool, creating the schema if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub async fn from_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(CREATE_TABLE_SQL).execute(&pool).await?;
        debug!("Task schema ready");
        Ok(Self { pool })
    }

    /// Closes the underlying pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    #[instrument(skip(self, task))]
    async fn insert(&self, task: NewTask) -> Result<Task, StoreError> {
        let id = TaskId::new();
        let text = task.into_text();

        sqlx::query("INSERT INTO tasks (id, text, completed) VALUES (?1, ?2, 0)")
            .bind(id.to_string())
            .bind(&text)
            .execute(&self.pool)
            .await?;

        Ok(Task {
            id,
            text,
            completed: false,
        })
    }

    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let rows: Vec<SqliteRow> =
            sqlx::query("SELECT id, text, completed FROM tasks ORDER BY seq DESC")
                .fetch_all(&self.pool)
                .await?;

        rows.iter().map(parse_row).collect()
    }

    #[instrument(skip(self, patch), fields(task_id = %id))]
    async fn update(&self, id: TaskId, patch: TaskPatch) -> Result<Task, StoreError> {
        let row = sqlx::query(
            "UPDATE tasks \
             SET text = COALESCE(?1, text), completed = COALESCE(?2, completed) \
             WHERE id = ?3 \
             RETURNING id, text, completed",
        )
        .bind(patch.text)
        .bind(patch.completed)
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => parse_row(&row),
            None => Err(StoreError::NotFound(id)),
        }
    }

    #[instrument(skip(self), fields(task_id = %id))]
    async fn delete(&self, id: TaskId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}

fn is_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

fn parse_row(row: &SqliteRow) -> Result<Task, StoreError> {
    let raw_id: String = row.try_get("id")?;
    let id = TaskId::parse(&raw_id)
        .ok_or_else(|| StoreError::InvalidData(format!("Invalid task id: {raw_id}")))?;

    Ok(Task {
        id,
        text: row.try_get("text")?,
        completed: row.try_get("completed")?,
    })
}
