use async_trait::async_trait;

use mesa_model::{ScheduledTask, TaskConfig, TaskId, TaskQuery};

use crate::error::StorageError;

/// Authoritative store of scheduled tasks.
#[async_trait]
pub trait TaskStore: Send + Sync + 'static {
    /// Tasks matching `query`.
    async fn fetch_tasks(&self, query: &TaskQuery) -> Result<Vec<ScheduledTask>, StorageError>;

    /// Atomically replace the template of task `id`.
    ///
    /// Returns `Ok(false)` when no task with that id exists anymore.
    async fn modify_in_place(&self, id: &TaskId, config: TaskConfig)
    -> Result<bool, StorageError>;

    /// Export a snapshot of the whole store.
    async fn snapshot(&self) -> Result<(), StorageError>;
}
