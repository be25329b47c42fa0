use std::{
    path::Path,
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;
use rusqlite::{Connection, OptionalExtension, Row, params};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::{debug, info};

use tasklist_model::{Task, TaskId, TaskPatch};

use crate::{error::ApiError, handler::TaskHandler};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    is_done BOOLEAN NOT NULL DEFAULT 0,
    created_at TEXT
);
"#;

const SELECT_TASK: &str = "SELECT id, title, is_done, created_at FROM tasks";

/// SQLite-backed task storage.
///
/// Survives restarts. Ids come from `AUTOINCREMENT`, so they are never reused.
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open (or create) the database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let conn = Connection::open(path)?;
        info!(path = %path.display(), "task database opened");
        Self::init(conn)
    }

    pub fn open_in_memory() -> Result<Self, ApiError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, ApiError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, ApiError> {
        self.conn
            .lock()
            .map_err(|e| ApiError::Internal(format!("task database lock poisoned: {e}")))
    }
}

fn task_from_row(row: &Row<'_>) -> rusqlite::Result<Task> {
    Ok(Task {
        id: TaskId::from(row.get::<_, i64>(0)? as u64),
        title: row.get(1)?,
        is_done: row.get(2)?,
        created_at: row.get(3)?,
    })
}

fn get_task(conn: &Connection, id: i64) -> Result<Option<Task>, ApiError> {
    let task = conn
        .query_row(&format!("{SELECT_TASK} WHERE id = ?1"), [id], task_from_row)
        .optional()?;
    Ok(task)
}

/// Ids outside the SQLite integer range cannot name a stored row.
fn row_id(id: u64) -> Result<i64, ApiError> {
    i64::try_from(id).map_err(|_| ApiError::TaskNotFound(id.to_string()))
}

#[async_trait]
impl TaskHandler for SqliteStore {
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!("{SELECT_TASK} ORDER BY id"))?;
        let tasks = stmt
            .query_map([], task_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    async fn create_task(&self, title: String) -> Result<Task, ApiError> {
        let created_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|e| ApiError::Internal(format!("timestamp formatting failed: {e}")))?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO tasks (title, is_done, created_at) VALUES (?1, 0, ?2)",
            params![title, created_at],
        )?;
        let id = conn.last_insert_rowid();

        debug!(id, "task stored");
        get_task(&conn, id)?.ok_or_else(|| ApiError::Internal(format!("task {id} vanished")))
    }

    async fn update_task(&self, id: u64, patch: TaskPatch) -> Result<Task, ApiError> {
        let id = row_id(id)?;
        let conn = self.conn()?;
        let changed = conn.execute(
            r#"
            UPDATE tasks SET
                title = COALESCE(?2, title),
                is_done = COALESCE(?3, is_done)
            WHERE id = ?1
            "#,
            params![id, patch.title, patch.is_done],
        )?;
        if changed == 0 {
            return Err(ApiError::TaskNotFound(id.to_string()));
        }

        get_task(&conn, id)?.ok_or_else(|| ApiError::TaskNotFound(id.to_string()))
    }

    async fn delete_task(&self, id: u64) -> Result<(), ApiError> {
        let id = row_id(id)?;
        let removed = self
            .conn()?
            .execute("DELETE FROM tasks WHERE id = ?1", [id])?;
        if removed == 0 {
            return Err(ApiError::TaskNotFound(id.to_string()));
        }
        Ok(())
    }
}
