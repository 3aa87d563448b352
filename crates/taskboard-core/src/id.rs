use serde::{Deserialize, Serialize};
use std::{fmt, num::ParseIntError, str::FromStr};

/// Identifier of a task, assigned by the remote service.
///
/// The service hands out numeric ids; locally they are opaque. The only
/// operations are equality, ordering, and formatting.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub i64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TaskId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<i64> for TaskId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_id_roundtrip() {
        let parsed: TaskId = "42".parse().expect("must parse task id");
        assert_eq!(parsed, TaskId(42));
        assert_eq!(parsed.to_string(), "42");
    }

    #[test]
    fn task_id_rejects_non_numeric_input() {
        assert!(TaskId::from_str("not-a-task-id").is_err());
    }

    #[test]
    fn task_id_serializes_transparently() {
        let json = serde_json::to_string(&TaskId(7)).expect("must serialize");
        assert_eq!(json, "7");
        let back: TaskId = serde_json::from_str(&json).expect("must deserialize");
        assert_eq!(back, TaskId(7));
    }
}
