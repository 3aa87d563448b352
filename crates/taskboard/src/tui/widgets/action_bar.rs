use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use taskboard_app::TaskStore;
use taskboard_core::Filter;

use super::super::view::Ui;

impl<S: TaskStore + 'static> Ui<S> {
    pub(in crate::tui) fn draw_action_bar(&self, f: &mut Frame<'_>, area: Rect) {
        let mut spans = vec![
            Span::styled(
                format!("{}", self.board.items_left()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" items left    "),
        ];

        for filter in [Filter::All, Filter::Undone, Filter::Done] {
            let style = if self.board.filter() == filter {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            spans.push(Span::styled(format!(" {} ", filter.label()), style));
            spans.push(Span::raw(" "));
        }

        if self.board.show_clear_completed() {
            spans.push(Span::raw("   "));
            spans.push(Span::styled(
                " Clear completed (c) ",
                Style::default().fg(Color::Red),
            ));
        }

        let bar = Paragraph::new(Line::from(spans))
            .block(Block::default().title("Actions").borders(Borders::ALL));
        f.render_widget(bar, area);
    }
}
