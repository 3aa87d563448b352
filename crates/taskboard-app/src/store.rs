//! Storage abstraction over the remote task service.

use anyhow::Error;
use async_trait::async_trait;
use taskboard_core::{Task, TaskId};
use taskboard_store_http::{HttpTaskStore, StoreError};

/// Async storage trait mirroring the four operations of the task service.
///
/// Command execution is written against this trait so handlers can be
/// unit-tested with a mock store.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Error type bubbled up from the backing store.
    type Error: Into<Error> + Send;

    /// Fetch the full task list.
    ///
    /// # Errors
    /// Returns a store-specific error when the list cannot be fetched.
    async fn list_tasks(&self) -> Result<Vec<Task>, Self::Error>;

    /// Create a task with the given text; the store assigns the id.
    ///
    /// # Errors
    /// Returns a store-specific error when the task cannot be created.
    async fn create_task(&self, text: &str) -> Result<Task, Self::Error>;

    /// Overwrite the task stored under `id`.
    ///
    /// # Errors
    /// Returns a store-specific error when the update fails.
    async fn update_task(&self, id: TaskId, task: &Task) -> Result<(), Self::Error>;

    /// Delete the task stored under `id`.
    ///
    /// # Errors
    /// Returns a store-specific error when the delete fails.
    async fn delete_task(&self, id: TaskId) -> Result<(), Self::Error>;
}

#[async_trait]
impl TaskStore for HttpTaskStore {
    type Error = StoreError;

    async fn list_tasks(&self) -> Result<Vec<Task>, Self::Error> {
        Self::list_tasks(self).await
    }

    async fn create_task(&self, text: &str) -> Result<Task, Self::Error> {
        Self::create_task(self, text).await
    }

    async fn update_task(&self, id: TaskId, task: &Task) -> Result<(), Self::Error> {
        Self::update_task(self, id, task).await
    }

    async fn delete_task(&self, id: TaskId) -> Result<(), Self::Error> {
        Self::delete_task(self, id).await
    }
}
