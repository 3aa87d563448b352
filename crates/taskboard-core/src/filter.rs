use serde::{Deserialize, Serialize};

use crate::Task;

/// Subset criterion applied to the task list for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Filter {
    /// Every task passes.
    #[default]
    All,
    /// Only completed tasks.
    Done,
    /// Only tasks still open.
    Undone,
}

impl Filter {
    /// String representation used in configuration and CLI arguments.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Done => "done",
            Self::Undone => "undone",
        }
    }

    /// Label shown in the UI for this filter.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Done => "Completed",
            Self::Undone => "Active",
        }
    }

    /// Next filter in the cycle All → Active → Completed → All.
    #[must_use]
    pub const fn cycle(self) -> Self {
        match self {
            Self::All => Self::Undone,
            Self::Undone => Self::Done,
            Self::Done => Self::All,
        }
    }

    /// Whether the given task passes this filter.
    #[must_use]
    pub const fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Done => task.done,
            Self::Undone => !task.done,
        }
    }
}
