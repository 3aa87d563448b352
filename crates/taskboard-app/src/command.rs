//! Remote commands and their outcomes.
//!
//! A [`Command`] carries everything its remote call(s) need, so execution
//! never touches view state. [`run_command`] performs the calls (the two
//! batch commands fan out one request per task concurrently and join every
//! outcome before reporting) and always resolves to a [`Completion`]: remote
//! failures are logged to the diagnostic channel and folded into the failure
//! variants instead of propagating.

use futures::future::join_all;
use taskboard_core::{Task, TaskId};
use tracing::warn;

use crate::store::TaskStore;

/// A unit of remote work derived from one user intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch the full task list.
    Reload,
    /// Create a task; the service assigns the id.
    Create {
        /// Trimmed draft text.
        text: String,
    },
    /// Overwrite one task, typically with an inverted `done`.
    Update {
        /// The task as it should be stored.
        task: Task,
    },
    /// Overwrite every task with a uniform `done` value.
    UpdateAll {
        /// Snapshot of the list at start time.
        tasks: Vec<Task>,
        /// Target completion value.
        done: bool,
    },
    /// Delete one task.
    Delete {
        /// Target task.
        id: TaskId,
    },
    /// Delete a batch of tasks (clear-completed).
    DeleteMany {
        /// Targets, in list order.
        ids: Vec<TaskId>,
    },
}

/// Outcome of a [`Command`], ready to fold into the view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The list was fetched.
    Loaded {
        /// Tasks in service order.
        tasks: Vec<Task>,
    },
    /// The list could not be fetched; the local list stays as it was.
    LoadFailed,
    /// The task was created.
    Created {
        /// The created task, id assigned by the service.
        task: Task,
    },
    /// The create failed; the draft is kept.
    CreateFailed,
    /// The single update succeeded.
    Toggled {
        /// Target task.
        id: TaskId,
        /// The stored completion value.
        done: bool,
    },
    /// The single update failed.
    ToggleFailed {
        /// Target task.
        id: TaskId,
    },
    /// Every update of the batch succeeded.
    ToggledAll {
        /// The uniform completion value now stored.
        done: bool,
    },
    /// At least one update of the batch failed; nothing may be applied.
    ToggleAllFailed {
        /// How many updates failed.
        failed: usize,
    },
    /// The delete succeeded.
    Deleted {
        /// Target task.
        id: TaskId,
    },
    /// The delete failed.
    DeleteFailed {
        /// Target task.
        id: TaskId,
    },
    /// Batch delete finished; only the listed ids were removed remotely.
    Cleared {
        /// Ids whose delete succeeded.
        deleted: Vec<TaskId>,
        /// How many deletes failed.
        failed: usize,
    },
}

/// Execute a command against the store.
///
/// Never returns an error: each remote failure is logged via `tracing` and
/// reported through the matching failure variant, so callers apply exactly
/// one state transition per command regardless of outcome.
pub async fn run_command<S: TaskStore>(store: &S, command: Command) -> Completion {
    match command {
        Command::Reload => match store.list_tasks().await {
            Ok(tasks) => Completion::Loaded { tasks },
            Err(err) => {
                let err: anyhow::Error = err.into();
                warn!(error = %err, "failed to list tasks");
                Completion::LoadFailed
            }
        },
        Command::Create { text } => match store.create_task(&text).await {
            Ok(task) => Completion::Created { task },
            Err(err) => {
                let err: anyhow::Error = err.into();
                warn!(error = %err, "failed to create task");
                Completion::CreateFailed
            }
        },
        Command::Update { task } => {
            let (id, done) = (task.id, task.done);
            match store.update_task(id, &task).await {
                Ok(()) => Completion::Toggled { id, done },
                Err(err) => {
                    let err: anyhow::Error = err.into();
                    warn!(%id, error = %err, "failed to update task");
                    Completion::ToggleFailed { id }
                }
            }
        }
        Command::UpdateAll { tasks, done } => {
            let updates = tasks.into_iter().map(|mut task| {
                task.done = done;
                async move {
                    let id = task.id;
                    store.update_task(id, &task).await.map_err(|err| {
                        let err: anyhow::Error = err.into();
                        warn!(%id, error = %err, "bulk update failed for task");
                    })
                }
            });
            let failed = join_all(updates)
                .await
                .into_iter()
                .filter(Result::is_err)
                .count();
            if failed == 0 {
                Completion::ToggledAll { done }
            } else {
                // The successful updates already hit the service; the local
                // list intentionally stays untouched until the next reload.
                warn!(failed, "bulk update aborted; remote and local state may diverge");
                Completion::ToggleAllFailed { failed }
            }
        }
        Command::Delete { id } => match store.delete_task(id).await {
            Ok(()) => Completion::Deleted { id },
            Err(err) => {
                let err: anyhow::Error = err.into();
                warn!(%id, error = %err, "failed to delete task");
                Completion::DeleteFailed { id }
            }
        },
        Command::DeleteMany { ids } => {
            let deletes = ids.into_iter().map(|id| async move {
                store
                    .delete_task(id)
                    .await
                    .map(|()| id)
                    .map_err(|err| {
                        let err: anyhow::Error = err.into();
                        warn!(%id, error = %err, "bulk delete failed for task");
                    })
            });
            let results = join_all(deletes).await;
            let failed = results.iter().filter(|result| result.is_err()).count();
            let deleted: Vec<TaskId> = results.into_iter().flatten().collect();
            Completion::Cleared { deleted, failed }
        }
    }
}
