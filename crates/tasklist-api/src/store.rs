use std::{
    collections::BTreeMap,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use async_trait::async_trait;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tracing::debug;

use tasklist_model::{Task, TaskId, TaskPatch};

use crate::{error::ApiError, handler::TaskHandler};

/// In-memory task storage.
///
/// Ids start at 1 and are never reused, even after deletes.
#[derive(Clone)]
pub struct MemoryStore {
    inner: Arc<RwLock<MemoryStoreInner>>,
}

struct MemoryStoreInner {
    /// Tasks indexed by numeric id; iteration order is id order.
    tasks: BTreeMap<u64, Task>,
    next_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MemoryStoreInner {
                tasks: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }

    pub fn len(&self) -> usize {
        self.read().map(|inner| inner.tasks.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, MemoryStoreInner>, ApiError> {
        self.inner
            .read()
            .map_err(|e| ApiError::Internal(format!("task store lock poisoned: {e}")))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, MemoryStoreInner>, ApiError> {
        self.inner
            .write()
            .map_err(|e| ApiError::Internal(format!("task store lock poisoned: {e}")))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TaskHandler for MemoryStore {
    async fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        Ok(self.read()?.tasks.values().cloned().collect())
    }

    async fn create_task(&self, title: String) -> Result<Task, ApiError> {
        let created_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|e| ApiError::Internal(format!("timestamp formatting failed: {e}")))?;

        let mut inner = self.write()?;
        let id = inner.next_id;
        inner.next_id += 1;

        let task = Task {
            id: TaskId::from(id),
            title,
            is_done: false,
            created_at: Some(created_at),
        };
        inner.tasks.insert(id, task.clone());

        debug!(id, "task stored");
        Ok(task)
    }

    async fn update_task(&self, id: u64, patch: TaskPatch) -> Result<Task, ApiError> {
        let mut inner = self.write()?;
        let task = inner
            .tasks
            .get_mut(&id)
            .ok_or_else(|| ApiError::TaskNotFound(id.to_string()))?;

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(is_done) = patch.is_done {
            task.is_done = is_done;
        }

        Ok(task.clone())
    }

    async fn delete_task(&self, id: u64) -> Result<(), ApiError> {
        let mut inner = self.write()?;
        inner
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ApiError::TaskNotFound(id.to_string()))
    }
}
