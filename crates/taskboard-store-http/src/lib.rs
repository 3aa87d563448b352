//! HTTP adapter for the remote task service.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use taskboard_core::{Task, TaskId};
use tracing::debug;

/// Error types.
pub mod error;
mod wire;

pub use error::StoreError;
use wire::{NewTaskRecord, TaskRecord};

/// Default endpoint of the task service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000/v1/tasks";

/// Client for the task service REST endpoint.
///
/// All four operations are fire-and-once: one request, no retry, no
/// idempotency key. A hung service is bounded by the per-request timeout and
/// surfaces as an ordinary [`StoreError::Http`].
#[derive(Debug, Clone)]
pub struct HttpTaskStore {
    client: Client,
    base_url: String,
}

impl HttpTaskStore {
    /// Build a store for `base_url` with the given per-request timeout.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidBaseUrl`] when the URL does not parse or
    /// is not http(s), and [`StoreError::Http`] when the client cannot be
    /// constructed.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let parsed =
            Url::parse(base_url).map_err(|_| StoreError::InvalidBaseUrl(base_url.to_owned()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(StoreError::InvalidBaseUrl(base_url.to_owned()));
        }

        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn task_url(&self, id: TaskId) -> String {
        format!("{}/{id}", self.base_url)
    }

    /// Fetch the full task list.
    ///
    /// # Errors
    /// Returns a [`StoreError`] when the request fails, the service answers
    /// with a non-success status, or the body does not decode.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        debug!(url = %self.base_url, "listing tasks");
        let response = self.client.get(&self.base_url).send().await?;
        let records: Vec<TaskRecord> = decode(response, "list").await?;
        Ok(records.into_iter().map(Task::from).collect())
    }

    /// Create a task with the given text; the service assigns the id.
    ///
    /// # Errors
    /// Returns a [`StoreError`] when the request fails, the service answers
    /// with a non-success status, or the created task does not decode.
    pub async fn create_task(&self, text: &str) -> Result<Task, StoreError> {
        debug!(url = %self.base_url, "creating task");
        let body = NewTaskRecord { task: text, done: false };
        let response = self.client.post(&self.base_url).json(&body).send().await?;
        let record: TaskRecord = decode(response, "create").await?;
        Ok(record.into())
    }

    /// Overwrite the task stored under `id` with the given record.
    ///
    /// The response body is not used.
    ///
    /// # Errors
    /// Returns a [`StoreError`] when the request fails or the service answers
    /// with a non-success status.
    pub async fn update_task(&self, id: TaskId, task: &Task) -> Result<(), StoreError> {
        let url = self.task_url(id);
        debug!(%id, %url, "updating task");
        let body = TaskRecord::from(task);
        let response = self.client.put(&url).json(&body).send().await?;
        check_status(&response, "update")?;
        Ok(())
    }

    /// Delete the task stored under `id`.
    ///
    /// # Errors
    /// Returns a [`StoreError`] when the request fails or the service answers
    /// with a non-success status.
    pub async fn delete_task(&self, id: TaskId) -> Result<(), StoreError> {
        let url = self.task_url(id);
        debug!(%id, %url, "deleting task");
        let response = self.client.delete(&url).send().await?;
        check_status(&response, "delete")?;
        Ok(())
    }
}

fn check_status(response: &Response, operation: &'static str) -> Result<(), StoreError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(StoreError::Status { operation, status })
    }
}

async fn decode<T: serde::de::DeserializeOwned>(
    response: Response,
    operation: &'static str,
) -> Result<T, StoreError> {
    check_status(&response, operation)?;
    response
        .json()
        .await
        .map_err(|source| StoreError::Decode { operation, source })
}
