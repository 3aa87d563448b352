use std::time::{Duration, Instant};

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
};
use taskboard_app::{
    BoardState, Command, Completion, Dispatcher, FeedbackLevel, StartError, TaskStore,
};
use taskboard_core::Filter;
use tokio::sync::mpsc::UnboundedReceiver;

use super::UI_MESSAGE_TTL_SECS;
use super::selection::Selection;

/// Whether key presses browse the board or edit the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum InputMode {
    /// Keys navigate and fire commands.
    Browse,
    /// Keys edit the pending new-task text.
    Insert,
}

/// Interactive state shared between the event loop and rendering.
pub(super) struct Ui<S> {
    pub(super) board: BoardState,
    dispatcher: Dispatcher<S>,
    completions: UnboundedReceiver<Completion>,
    pub(super) selection: Selection,
    pub(super) input_mode: InputMode,
    pub(super) message: Option<Message>,
    pub(super) should_quit: bool,
}

impl<S: TaskStore + 'static> Ui<S> {
    pub(super) const INPUT_HEIGHT: u16 = 3;
    pub(super) const ACTION_HEIGHT: u16 = 3;
    pub(super) const STATUS_HEIGHT: u16 = 3;
    pub(super) const LIST_MIN_HEIGHT: u16 = 5;

    pub(super) fn new(dispatcher: Dispatcher<S>, completions: UnboundedReceiver<Completion>) -> Self {
        Self {
            board: BoardState::default(),
            dispatcher,
            completions,
            selection: Selection::default(),
            input_mode: InputMode::Browse,
            message: None,
            should_quit: false,
        }
    }

    /// Fetch the task list from the service (initial mount and `r`).
    pub(super) fn reload(&mut self) {
        self.start(BoardState::start_reload);
    }

    /// Start one intent; rejected intents surface in the status line.
    pub(super) fn start<F>(&mut self, start: F)
    where
        F: FnOnce(&mut BoardState) -> Result<Command, StartError>,
    {
        match start(&mut self.board) {
            Ok(command) => self.dispatcher.dispatch(command),
            Err(err) => self.error(err.to_string()),
        }
    }

    /// Fold every finished command back into the board.
    pub(super) fn drain_completions(&mut self) {
        let mut changed = false;
        while let Ok(completion) = self.completions.try_recv() {
            let feedback = self.board.apply(completion);
            match feedback.level {
                FeedbackLevel::Info => self.info(feedback.text),
                FeedbackLevel::Error => self.error(feedback.text),
            }
            changed = true;
        }
        if changed {
            self.rebuild_selection();
        }
    }

    pub(super) fn set_filter(&mut self, filter: Filter) {
        if self.board.filter() == filter {
            return;
        }
        self.board.set_filter(filter);
        self.rebuild_selection();
    }

    fn rebuild_selection(&mut self) {
        let keep = self.selection.selected_id();
        let visible = self.board.visible();
        self.selection.rebuild(&visible, keep);
    }

    pub(super) fn draw(&self, f: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(Self::INPUT_HEIGHT),
                Constraint::Min(Self::LIST_MIN_HEIGHT),
                Constraint::Length(Self::ACTION_HEIGHT),
                Constraint::Length(Self::STATUS_HEIGHT),
            ])
            .split(f.area());

        self.draw_input(f, chunks[0]);
        self.draw_task_list(f, chunks[1]);
        self.draw_action_bar(f, chunks[2]);
        self.draw_status(f, chunks[3]);
    }

    pub(super) fn info(&mut self, message: impl Into<String>) {
        self.message = Some(Message::info(message));
    }

    pub(super) fn error(&mut self, message: impl Into<String>) {
        self.message = Some(Message::error(message));
    }

    pub(super) fn tick(&mut self) {
        if let Some(msg) = &self.message
            && msg.is_expired(Duration::from_secs(UI_MESSAGE_TTL_SECS))
        {
            self.message = None;
        }
    }
}

pub(super) struct Message {
    pub(super) text: String,
    level: MessageLevel,
    created_at: Instant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MessageLevel {
    Info,
    Error,
}

impl Message {
    fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Info,
            created_at: Instant::now(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: MessageLevel::Error,
            created_at: Instant::now(),
        }
    }

    pub(super) fn style(&self) -> Style {
        match self.level {
            MessageLevel::Info => Style::default().fg(Color::Green),
            MessageLevel::Error => Style::default().fg(Color::Red),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() >= ttl
    }
}
