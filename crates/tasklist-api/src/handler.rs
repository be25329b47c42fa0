use async_trait::async_trait;
use tasklist_model::{Task, TaskPatch};

use crate::error::ApiError;

/// Task storage backend behind the HTTP routes.
///
/// [`MemoryStore`](crate::MemoryStore) and [`SqliteStore`](crate::SqliteStore) are bundled; anything
/// else (a database, a proxy) can be mounted by implementing this trait.
#[async_trait]
pub trait TaskHandler: Send + Sync + 'static {
    /// All tasks ordered by id.
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError>;

    /// Store a new open task. `title` is already validated.
    async fn create_task(&self, title: String) -> Result<Task, ApiError>;

    /// Apply a partial update.
    async fn update_task(&self, id: u64, patch: TaskPatch) -> Result<Task, ApiError>;

    async fn delete_task(&self, id: u64) -> Result<(), ApiError>;
}
