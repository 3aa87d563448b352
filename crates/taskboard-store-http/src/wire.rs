//! Wire representation of tasks as the remote service speaks them.
//!
//! The service encodes the completion flag as the integer 0/1, except when it
//! answers with a plain boolean. Both directions of that translation live
//! here so the rest of the workspace only ever sees `bool`.

use serde::{Deserialize, Serialize};
use taskboard_core::{Task, TaskId};

/// A task as sent and received over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct TaskRecord {
    pub id: TaskId,
    pub task: String,
    #[serde(with = "done_flag")]
    pub done: bool,
}

/// Body of a create request. The service assigns the id.
#[derive(Debug, Serialize)]
pub(crate) struct NewTaskRecord<'a> {
    pub task: &'a str,
    #[serde(with = "done_flag")]
    pub done: bool,
}

impl From<TaskRecord> for Task {
    fn from(record: TaskRecord) -> Self {
        Self {
            id: record.id,
            text: record.task,
            done: record.done,
        }
    }
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id,
            task: task.text.clone(),
            done: task.done,
        }
    }
}

mod done_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Bool(bool),
        Int(i64),
    }

    pub fn serialize<S: Serializer>(done: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*done))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Bool(done) => done,
            Repr::Int(raw) => raw != 0,
        })
    }
}
