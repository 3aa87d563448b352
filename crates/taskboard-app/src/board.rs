//! The board's view state and its transitions.
//!
//! [`BoardState`] is the single container for everything the UI renders: the
//! mirrored task list, the pending draft text, the active filter, and the
//! toggle-all flag. It is mutated in exactly two places: `start_*` methods
//! reserve in-flight work and hand back the [`Command`] to execute, and
//! [`BoardState::apply`] folds the command's [`Completion`] back in as one
//! atomic transition. Remote state is the source of truth; this is a cache.

use std::collections::HashSet;

use taskboard_core::{Filter, Task, TaskId, any_done, pending_count};
use thiserror::Error;

use crate::command::{Command, Completion};

/// Why a command could not be started.
///
/// `Busy` is the in-flight guard: a command targeting an entity that already
/// has an outstanding request is rejected before it reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StartError {
    /// The draft text is empty (after trimming).
    #[error("nothing to add: the draft is empty")]
    EmptyDraft,

    /// No task with the given id exists locally.
    #[error("no task with id {0}")]
    UnknownTask(TaskId),

    /// No task is currently completed.
    #[error("no completed tasks to clear")]
    NothingCompleted,

    /// A conflicting request is still waiting on the service.
    #[error("a {0} request is already in flight")]
    Busy(&'static str),
}

/// Outcome of applying a completion, for display to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    /// Severity of the message.
    pub level: FeedbackLevel,
    /// Human-readable description of what happened.
    pub text: String,
}

/// Severity of a [`Feedback`] message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackLevel {
    /// The command applied.
    Info,
    /// The command failed; local state was left unchanged.
    Error,
}

impl Feedback {
    fn info(text: impl Into<String>) -> Self {
        Self {
            level: FeedbackLevel::Info,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            level: FeedbackLevel::Error,
            text: text.into(),
        }
    }
}

/// View state of the task board.
#[derive(Debug, Default)]
pub struct BoardState {
    tasks: Vec<Task>,
    draft: String,
    filter: Filter,
    toggle_all: bool,
    reload_pending: bool,
    create_pending: bool,
    batch_pending: bool,
    pending: HashSet<TaskId>,
}

impl BoardState {
    /// The mirrored task list, unfiltered.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Tasks passing the active filter, in list order.
    #[must_use]
    pub fn visible(&self) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| self.filter.matches(task))
            .collect()
    }

    /// Count of tasks still open.
    #[must_use]
    pub fn items_left(&self) -> usize {
        pending_count(&self.tasks)
    }

    /// Whether the clear-completed control should be offered.
    #[must_use]
    pub fn show_clear_completed(&self) -> bool {
        any_done(&self.tasks)
    }

    /// The active display filter.
    #[must_use]
    pub const fn filter(&self) -> Filter {
        self.filter
    }

    /// The toggle-all flag: the value the last bulk toggle set.
    #[must_use]
    pub const fn toggle_all_flag(&self) -> bool {
        self.toggle_all
    }

    /// The pending new-task text.
    #[must_use]
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Select a display filter. Pure local transition, no remote call.
    pub const fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    /// Append a character to the draft.
    pub fn push_draft(&mut self, ch: char) {
        self.draft.push(ch);
    }

    /// Remove the last character of the draft.
    pub fn pop_draft(&mut self) {
        self.draft.pop();
    }

    /// Replace the draft wholesale (CLI entry path).
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    fn find(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// Start a full reload from the service.
    ///
    /// # Errors
    /// Returns [`StartError::Busy`] while a previous reload is outstanding.
    pub fn start_reload(&mut self) -> Result<Command, StartError> {
        if self.reload_pending {
            return Err(StartError::Busy("reload"));
        }
        self.reload_pending = true;
        Ok(Command::Reload)
    }

    /// Start adding the current draft as a new task.
    ///
    /// The draft is kept until the create succeeds.
    ///
    /// # Errors
    /// Returns [`StartError::EmptyDraft`] when there is nothing to add and
    /// [`StartError::Busy`] while a previous create is outstanding.
    pub fn start_add(&mut self) -> Result<Command, StartError> {
        let text = self.draft.trim();
        if text.is_empty() {
            return Err(StartError::EmptyDraft);
        }
        if self.create_pending {
            return Err(StartError::Busy("create"));
        }
        self.create_pending = true;
        Ok(Command::Create {
            text: text.to_owned(),
        })
    }

    /// Start toggling the completion flag of one task.
    ///
    /// # Errors
    /// Returns [`StartError::UnknownTask`] for an id not in the list and
    /// [`StartError::Busy`] while the task (or a bulk operation covering it)
    /// has an outstanding request.
    pub fn start_toggle(&mut self, id: TaskId) -> Result<Command, StartError> {
        let task = self.find(id).ok_or(StartError::UnknownTask(id))?;
        if self.pending.contains(&id) || self.batch_pending {
            return Err(StartError::Busy("task update"));
        }
        let mut updated = task.clone();
        updated.done = !updated.done;
        self.pending.insert(id);
        Ok(Command::Update { task: updated })
    }

    /// Start toggling every task to the inverse of the toggle-all flag.
    ///
    /// # Errors
    /// Returns [`StartError::Busy`] while any other mutation is outstanding.
    pub fn start_toggle_all(&mut self) -> Result<Command, StartError> {
        if self.batch_pending || !self.pending.is_empty() {
            return Err(StartError::Busy("bulk update"));
        }
        self.batch_pending = true;
        Ok(Command::UpdateAll {
            tasks: self.tasks.clone(),
            done: !self.toggle_all,
        })
    }

    /// Start deleting one task.
    ///
    /// # Errors
    /// Returns [`StartError::UnknownTask`] for an id not in the list and
    /// [`StartError::Busy`] while the task has an outstanding request.
    pub fn start_delete(&mut self, id: TaskId) -> Result<Command, StartError> {
        if self.find(id).is_none() {
            return Err(StartError::UnknownTask(id));
        }
        if self.pending.contains(&id) || self.batch_pending {
            return Err(StartError::Busy("task delete"));
        }
        self.pending.insert(id);
        Ok(Command::Delete { id })
    }

    /// Start deleting every completed task.
    ///
    /// # Errors
    /// Returns [`StartError::NothingCompleted`] when no task is done and
    /// [`StartError::Busy`] while any other mutation is outstanding.
    pub fn start_clear_completed(&mut self) -> Result<Command, StartError> {
        if self.batch_pending || !self.pending.is_empty() {
            return Err(StartError::Busy("bulk delete"));
        }
        let ids: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|task| task.done)
            .map(|task| task.id)
            .collect();
        if ids.is_empty() {
            return Err(StartError::NothingCompleted);
        }
        self.batch_pending = true;
        Ok(Command::DeleteMany { ids })
    }

    /// Fold a command's outcome back into the view state.
    ///
    /// Exactly one transition per completion; failures release the in-flight
    /// reservation and leave the task list untouched.
    pub fn apply(&mut self, completion: Completion) -> Feedback {
        match completion {
            Completion::Loaded { tasks } => {
                self.reload_pending = false;
                let count = tasks.len();
                self.tasks = tasks;
                Feedback::info(format!("loaded {count} tasks"))
            }
            Completion::LoadFailed => {
                self.reload_pending = false;
                Feedback::error("failed to load tasks from the service")
            }
            Completion::Created { task } => {
                self.create_pending = false;
                self.draft.clear();
                let id = task.id;
                self.tasks.insert(0, task);
                Feedback::info(format!("added task {id}"))
            }
            Completion::CreateFailed => {
                self.create_pending = false;
                Feedback::error("failed to add task; draft kept")
            }
            Completion::Toggled { id, done } => {
                self.pending.remove(&id);
                if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
                    task.done = done;
                }
                let state = if done { "done" } else { "open" };
                Feedback::info(format!("task {id} marked {state}"))
            }
            Completion::ToggleFailed { id } => {
                self.pending.remove(&id);
                Feedback::error(format!("failed to update task {id}"))
            }
            Completion::ToggledAll { done } => {
                self.batch_pending = false;
                for task in &mut self.tasks {
                    task.done = done;
                }
                self.toggle_all = done;
                let state = if done { "done" } else { "open" };
                Feedback::info(format!("all tasks marked {state}"))
            }
            Completion::ToggleAllFailed { failed } => {
                self.batch_pending = false;
                Feedback::error(format!(
                    "bulk update failed for {failed} tasks; local list unchanged"
                ))
            }
            Completion::Deleted { id } => {
                self.pending.remove(&id);
                self.tasks.retain(|task| task.id != id);
                Feedback::info(format!("deleted task {id}"))
            }
            Completion::DeleteFailed { id } => {
                self.pending.remove(&id);
                Feedback::error(format!("failed to delete task {id}"))
            }
            Completion::Cleared { deleted, failed } => {
                self.batch_pending = false;
                let count = deleted.len();
                self.tasks.retain(|task| !deleted.contains(&task.id));
                if failed == 0 {
                    Feedback::info(format!("cleared {count} completed tasks"))
                } else {
                    Feedback::error(format!(
                        "cleared {count} completed tasks, {failed} deletes failed"
                    ))
                }
            }
        }
    }
}
