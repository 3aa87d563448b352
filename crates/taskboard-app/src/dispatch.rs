//! Background execution of commands for the interactive UI.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::command::{Command, Completion, run_command};
use crate::store::TaskStore;

/// Spawns commands onto the runtime and feeds their completions back through
/// a channel.
///
/// The UI thread stays the single writer of view state: it drains the
/// receiver between input events and folds each [`Completion`] in with
/// [`crate::BoardState::apply`]. Several commands may be in flight at once;
/// the in-flight guard in the board state keeps them from targeting the same
/// entity.
pub struct Dispatcher<S> {
    store: Arc<S>,
    handle: Handle,
    tx: UnboundedSender<Completion>,
}

impl<S: TaskStore + 'static> Dispatcher<S> {
    /// Create a dispatcher and the completion receiver for the UI loop.
    #[must_use]
    pub fn new(store: Arc<S>, handle: Handle) -> (Self, UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { store, handle, tx }, rx)
    }

    /// Run a command in the background; its completion arrives on the channel.
    pub fn dispatch(&self, command: Command) {
        let store = Arc::clone(&self.store);
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let completion = run_command(store.as_ref(), command).await;
            // The receiver only goes away when the UI is shutting down.
            let _ = tx.send(completion);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use taskboard_core::{Task, TaskId};

    struct StaticStore;

    #[async_trait]
    impl TaskStore for StaticStore {
        type Error = anyhow::Error;

        async fn list_tasks(&self) -> Result<Vec<Task>, Self::Error> {
            Ok(vec![Task {
                id: TaskId(1),
                text: "one".into(),
                done: false,
            }])
        }

        async fn create_task(&self, text: &str) -> Result<Task, Self::Error> {
            Ok(Task {
                id: TaskId(2),
                text: text.to_owned(),
                done: false,
            })
        }

        async fn update_task(&self, _id: TaskId, _task: &Task) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn delete_task(&self, _id: TaskId) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn dispatched_commands_complete_through_the_channel() {
        let (dispatcher, mut rx) = Dispatcher::new(Arc::new(StaticStore), Handle::current());

        dispatcher.dispatch(Command::Reload);
        let completion = rx.recv().await.expect("completion must arrive");
        assert!(matches!(completion, Completion::Loaded { tasks } if tasks.len() == 1));
    }

    #[tokio::test]
    async fn concurrent_commands_all_complete() {
        let (dispatcher, mut rx) = Dispatcher::new(Arc::new(StaticStore), Handle::current());

        dispatcher.dispatch(Command::Delete { id: TaskId(1) });
        dispatcher.dispatch(Command::Create { text: "two".into() });
        let first = rx.recv().await.expect("first completion");
        let second = rx.recv().await.expect("second completion");

        let mut kinds = [&first, &second]
            .iter()
            .map(|c| matches!(c, Completion::Deleted { .. }))
            .collect::<Vec<_>>();
        kinds.sort_unstable();
        assert_eq!(kinds, vec![false, true]);
    }
}
