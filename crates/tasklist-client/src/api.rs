use async_trait::async_trait;
use tasklist_model::{Health, Task, TaskId, TaskPatch, Version};

use crate::errors::ClientError;

/// Operations the client performs against a task backend.
///
/// The view layer only talks to this trait, so it can be driven by
/// [`HttpTaskClient`](crate::HttpTaskClient) or by an in-process fake.
#[async_trait]
pub trait TaskApi: Send + Sync + 'static {
    /// Fetch the whole collection.
    async fn list_tasks(&self) -> Result<Vec<Task>, ClientError>;

    /// Create a task. Blank titles fail with [`ClientError::EmptyTitle`] before any request.
    async fn create_task(&self, title: &str) -> Result<Task, ClientError>;

    /// Apply a partial update to a task.
    async fn update_task(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, ClientError>;

    /// Invert the completion flag of `task`.
    async fn toggle_task(&self, task: &Task) -> Result<Task, ClientError> {
        self.update_task(&task.id, &TaskPatch::toggle(task)).await
    }

    /// Delete a task. Any 2xx status counts as success.
    async fn delete_task(&self, id: &TaskId) -> Result<(), ClientError>;

    async fn health(&self) -> Result<Health, ClientError>;

    async fn version(&self) -> Result<Version, ClientError>;
}
