use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use taskboard_app::TaskStore;

use super::super::view::{InputMode, Ui};

impl<S: TaskStore + 'static> Ui<S> {
    pub(in crate::tui) fn draw_input(&self, f: &mut Frame<'_>, area: Rect) {
        let marker = if self.board.toggle_all_flag() {
            "[x]"
        } else {
            "[ ]"
        };

        let line = if self.board.draft().is_empty() && self.input_mode == InputMode::Browse {
            Line::from(vec![
                Span::raw(format!("{marker} ")),
                Span::styled(
                    "What needs to be done?",
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        } else {
            let cursor = if self.input_mode == InputMode::Insert {
                "▏"
            } else {
                ""
            };
            Line::from(format!("{marker} {}{cursor}", self.board.draft()))
        };

        let title = match self.input_mode {
            InputMode::Insert => "New task (enter: add, esc: back)",
            InputMode::Browse => "New task",
        };

        let input = Paragraph::new(line).block(Block::default().title(title).borders(Borders::ALL));
        f.render_widget(input, area);
    }
}
