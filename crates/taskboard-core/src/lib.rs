//! Domain types & list projections for taskboard.

/// Display filters.
pub mod filter;
/// Identifier types.
pub mod id;

use serde::{Deserialize, Serialize};

pub use filter::Filter;
pub use id::TaskId;

/// A to-do entry mirrored from the remote service.
///
/// `done` is a plain boolean here; the 0/1 integer the service speaks is
/// translated at the store boundary and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier assigned by the remote service.
    pub id: TaskId,
    /// Free-text description.
    pub text: String,
    /// Completion flag.
    pub done: bool,
}

/// Count of tasks still open ("items left").
#[must_use]
pub fn pending_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|task| !task.done).count()
}

/// True when at least one task is completed.
///
/// Controls visibility of the clear-completed control.
#[must_use]
pub fn any_done(tasks: &[Task]) -> bool {
    tasks.iter().any(|task| task.done)
}
