use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use taskboard_app::{BoardState, TaskStore};
use taskboard_core::Filter;

use super::view::{InputMode, Ui};

impl<S: TaskStore + 'static> Ui<S> {
    pub(super) fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_mode {
            InputMode::Browse => self.handle_browse_key(key),
            InputMode::Insert => self.handle_insert_key(key),
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,

            KeyCode::Char('i' | '/') => self.input_mode = InputMode::Insert,

            KeyCode::Char('j') | KeyCode::Down => self.selection.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.selection.select_prev(),

            KeyCode::Char(' ') => match self.selection.selected_id() {
                Some(id) => self.start(|board| board.start_toggle(id)),
                None => self.error("no task selected"),
            },

            KeyCode::Char('x') | KeyCode::Delete => match self.selection.selected_id() {
                Some(id) => self.start(|board| board.start_delete(id)),
                None => self.error("no task selected"),
            },

            KeyCode::Char('a') => self.start(BoardState::start_toggle_all),
            KeyCode::Char('c') => self.start(BoardState::start_clear_completed),

            KeyCode::Char('f') | KeyCode::Tab => self.set_filter(self.board.filter().cycle()),
            KeyCode::Char('1') => self.set_filter(Filter::All),
            KeyCode::Char('2') => self.set_filter(Filter::Undone),
            KeyCode::Char('3') => self.set_filter(Filter::Done),

            KeyCode::Char('r') => self.reload(),

            _ => {}
        }
    }

    fn handle_insert_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.input_mode = InputMode::Browse,
            // Stay in insert mode after submitting, for rapid entry.
            KeyCode::Enter => self.start(BoardState::start_add),
            KeyCode::Backspace => self.board.pop_draft(),
            KeyCode::Char(ch) => self.board.push_draft(ch),
            _ => {}
        }
    }
}
