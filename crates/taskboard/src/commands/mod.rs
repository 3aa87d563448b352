use anyhow::{Result, bail};
use taskboard_app::{
    BoardState, Command as BoardCommand, Feedback, FeedbackLevel, StartError, TaskStore,
    run_command,
};
use taskboard_core::{Task, TaskId};
use tokio::runtime::Runtime;

use crate::Command;

/// Execute a one-shot CLI command against the service.
///
/// Every subcommand goes through the same start/run/apply handlers as the
/// TUI; a remote failure surfaces as a nonzero exit instead of a status-line
/// message.
pub fn run<S: TaskStore>(command: Command, store: &S, runtime: &Runtime) -> Result<()> {
    let mut state = BoardState::default();
    match command {
        Command::Ls { filter, format } => {
            drive(&mut state, store, runtime, BoardState::start_reload)?;
            state.set_filter(filter.into());

            let visible = state.visible();
            if visible.is_empty() {
                if state.tasks().is_empty() {
                    println!("No tasks found");
                } else {
                    println!("No tasks matched the selected filter");
                }
                return Ok(());
            }

            match format {
                crate::LsFormat::Table => render_task_table(&visible),
                crate::LsFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&visible)?);
                }
            }
            println!("{} items left", state.items_left());
        }

        Command::Add { text } => {
            state.set_draft(text.join(" "));
            let feedback = drive(&mut state, store, runtime, BoardState::start_add)?;
            println!("{}", feedback.text);
        }

        Command::Toggle { id } => {
            drive(&mut state, store, runtime, BoardState::start_reload)?;
            let feedback = drive(&mut state, store, runtime, |board| {
                board.start_toggle(TaskId(id))
            })?;
            println!("{}", feedback.text);
        }

        Command::Rm { id } => {
            drive(&mut state, store, runtime, BoardState::start_reload)?;
            let feedback = drive(&mut state, store, runtime, |board| {
                board.start_delete(TaskId(id))
            })?;
            println!("{}", feedback.text);
        }

        Command::ToggleAll => {
            drive(&mut state, store, runtime, BoardState::start_reload)?;
            let feedback = drive(&mut state, store, runtime, BoardState::start_toggle_all)?;
            println!("{}", feedback.text);
        }

        Command::Clear => {
            drive(&mut state, store, runtime, BoardState::start_reload)?;
            let feedback = drive(&mut state, store, runtime, BoardState::start_clear_completed)?;
            println!("{}", feedback.text);
        }

        Command::Tui => unreachable!("tui is routed before command dispatch"),
    }

    Ok(())
}

/// Start one intent, run its command to completion, and fold the outcome in.
fn drive<S, F>(state: &mut BoardState, store: &S, runtime: &Runtime, start: F) -> Result<Feedback>
where
    S: TaskStore,
    F: FnOnce(&mut BoardState) -> Result<BoardCommand, StartError>,
{
    let command = match start(state) {
        Ok(command) => command,
        Err(err) => bail!(err),
    };
    let completion = runtime.block_on(run_command(store, command));
    let feedback = state.apply(completion);
    if feedback.level == FeedbackLevel::Error {
        bail!("{}", feedback.text);
    }
    Ok(feedback)
}

fn render_task_table(tasks: &[&Task]) {
    println!("ID | Done | Task");
    println!("-- | ---- | ----");
    for task in tasks {
        let marker = if task.done { "x" } else { " " };
        println!("{} | {} | {}", task.id, marker, task.text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FilterArg, LsFormat};
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

    #[derive(Clone, Default)]
    struct MockStore {
        inner: Arc<MockStoreInner>,
    }

    #[derive(Default)]
    struct MockStoreInner {
        tasks: Mutex<Vec<Task>>,
        next_id: Mutex<i64>,
        fail_deletes: Mutex<HashSet<TaskId>>,
        list_calls: Mutex<u32>,
        update_calls: Mutex<Vec<Task>>,
        delete_calls: Mutex<Vec<TaskId>>,
    }

    #[async_trait]
    impl TaskStore for MockStore {
        type Error = anyhow::Error;

        async fn list_tasks(&self) -> Result<Vec<Task>, Self::Error> {
            *guard(&self.inner.list_calls) += 1;
            Ok(guard(&self.inner.tasks).clone())
        }

        async fn create_task(&self, text: &str) -> Result<Task, Self::Error> {
            let id = {
                let mut counter = guard(&self.inner.next_id);
                *counter += 1;
                TaskId(*counter)
            };
            let task = Task {
                id,
                text: text.to_owned(),
                done: false,
            };
            guard(&self.inner.tasks).push(task.clone());
            Ok(task)
        }

        async fn update_task(&self, id: TaskId, task: &Task) -> Result<(), Self::Error> {
            guard(&self.inner.update_calls).push(task.clone());
            if let Some(stored) = guard(&self.inner.tasks).iter_mut().find(|t| t.id == id) {
                *stored = task.clone();
            }
            Ok(())
        }

        async fn delete_task(&self, id: TaskId) -> Result<(), Self::Error> {
            guard(&self.inner.delete_calls).push(id);
            if guard(&self.inner.fail_deletes).contains(&id) {
                return Err(anyhow!("delete unavailable for {id}"));
            }
            guard(&self.inner.tasks).retain(|t| t.id != id);
            Ok(())
        }
    }

    impl MockStore {
        fn with_tasks(tasks: Vec<Task>) -> Self {
            let store = Self::default();
            let max_id = tasks.iter().map(|t| t.id.0).max().unwrap_or(0);
            *guard(&store.inner.tasks) = tasks;
            *guard(&store.inner.next_id) = max_id;
            store
        }

        fn remote_tasks(&self) -> Vec<Task> {
            guard(&self.inner.tasks).clone()
        }

        fn list_calls(&self) -> u32 {
            *guard(&self.inner.list_calls)
        }

        fn update_calls(&self) -> Vec<Task> {
            guard(&self.inner.update_calls).clone()
        }

        fn delete_calls(&self) -> Vec<TaskId> {
            guard(&self.inner.delete_calls).clone()
        }
    }

    fn guard<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
        mutex.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn task(id: i64, text: &str, done: bool) -> Task {
        Task {
            id: TaskId(id),
            text: text.to_owned(),
            done,
        }
    }

    fn runtime() -> Runtime {
        tokio::runtime::Builder::new_current_thread()
            .build()
            .expect("runtime must build")
    }

    #[test]
    fn run_ls_fetches_the_list_once() -> Result<()> {
        let store = MockStore::with_tasks(vec![task(1, "a", false)]);
        let runtime = runtime();
        run(
            Command::Ls {
                filter: FilterArg::All,
                format: LsFormat::Table,
            },
            &store,
            &runtime,
        )?;
        assert_eq!(store.list_calls(), 1);
        Ok(())
    }

    #[test]
    fn run_add_creates_the_task() -> Result<()> {
        let store = MockStore::default();
        let runtime = runtime();
        run(
            Command::Add {
                text: vec!["buy".into(), "milk".into()],
            },
            &store,
            &runtime,
        )?;
        let remote = store.remote_tasks();
        assert_eq!(remote.len(), 1);
        assert_eq!(remote[0].text, "buy milk");
        assert!(!remote[0].done);
        Ok(())
    }

    #[test]
    fn run_toggle_updates_the_target_task() -> Result<()> {
        let store = MockStore::with_tasks(vec![task(1, "a", false), task(2, "b", false)]);
        let runtime = runtime();
        run(Command::Toggle { id: 2 }, &store, &runtime)?;

        let updates = store.update_calls();
        assert_eq!(updates.len(), 1);
        assert_eq!(updates[0].id, TaskId(2));
        assert!(updates[0].done);
        assert!(!store.remote_tasks()[0].done);
        Ok(())
    }

    #[test]
    fn run_toggle_fails_for_an_unknown_id() {
        let store = MockStore::default();
        let runtime = runtime();
        let result = run(Command::Toggle { id: 9 }, &store, &runtime);
        assert!(result.is_err());
    }

    #[test]
    fn run_rm_deletes_the_task() -> Result<()> {
        let store = MockStore::with_tasks(vec![task(1, "a", false)]);
        let runtime = runtime();
        run(Command::Rm { id: 1 }, &store, &runtime)?;
        assert!(store.remote_tasks().is_empty());
        Ok(())
    }

    #[test]
    fn run_toggle_all_updates_every_task() -> Result<()> {
        let store = MockStore::with_tasks(vec![task(1, "a", false), task(2, "b", true)]);
        let runtime = runtime();
        run(Command::ToggleAll, &store, &runtime)?;
        assert_eq!(store.update_calls().len(), 2);
        assert!(store.remote_tasks().iter().all(|t| t.done));
        Ok(())
    }

    #[test]
    fn run_clear_deletes_only_completed_tasks() -> Result<()> {
        let store = MockStore::with_tasks(vec![
            task(1, "a", true),
            task(2, "b", false),
            task(3, "c", true),
        ]);
        let runtime = runtime();
        run(Command::Clear, &store, &runtime)?;
        assert_eq!(store.delete_calls(), vec![TaskId(1), TaskId(3)]);
        assert_eq!(store.remote_tasks().len(), 1);
        Ok(())
    }

    #[test]
    fn run_clear_reports_partial_failure() {
        let store = MockStore::with_tasks(vec![task(1, "a", true), task(2, "b", true)]);
        guard(&store.inner.fail_deletes).insert(TaskId(2));
        let runtime = runtime();
        let result = run(Command::Clear, &store, &runtime);
        assert!(result.is_err());
        // The successful delete still went through.
        assert_eq!(store.remote_tasks().len(), 1);
    }
}
