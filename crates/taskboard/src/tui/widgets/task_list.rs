use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
};
use taskboard_app::TaskStore;
use taskboard_core::Filter;

use super::super::TASK_LIST_HIGHLIGHT_SYMBOL;
use super::super::view::Ui;

impl<S: TaskStore + 'static> Ui<S> {
    pub(in crate::tui) fn draw_task_list(&self, f: &mut Frame<'_>, area: Rect) {
        let visible = self.board.visible();
        let items: Vec<ListItem<'_>> = if visible.is_empty() {
            let message = if self.board.filter() == Filter::All {
                "No tasks"
            } else {
                "No tasks match the filter"
            };
            vec![ListItem::new(Line::from(message))]
        } else {
            visible
                .iter()
                .map(|task| {
                    let marker = if task.done { "[x] " } else { "[ ] " };
                    let text_style = if task.done {
                        Style::default()
                            .fg(Color::DarkGray)
                            .add_modifier(Modifier::CROSSED_OUT)
                    } else {
                        Style::default()
                    };
                    ListItem::new(Line::from(vec![
                        Span::raw(marker),
                        Span::styled(task.text.clone(), text_style),
                        Span::styled(
                            format!("  #{}", task.id),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]))
                })
                .collect()
        };

        let list = List::new(items)
            .block(Block::default().title("Tasks").borders(Borders::ALL))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol(TASK_LIST_HIGHLIGHT_SYMBOL);
        let mut state = ListState::default();
        if self.selection.has_tasks() {
            state.select(Some(self.selection.selected_index()));
        }
        f.render_stateful_widget(list, area, &mut state);
    }
}
