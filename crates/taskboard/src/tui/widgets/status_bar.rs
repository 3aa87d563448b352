use std::borrow::Cow;

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use taskboard_app::TaskStore;

use super::super::view::{InputMode, Message, Ui};

const BROWSE_HELP: &str =
    "i: edit  space: toggle  x: delete  a: toggle all  c: clear  f/1-3: filter  r: reload  q: quit";
const INSERT_HELP: &str = "enter: add  backspace: erase  esc: back to browsing";

impl<S: TaskStore + 'static> Ui<S> {
    pub(in crate::tui) fn draw_status(&self, f: &mut Frame<'_>, area: Rect) {
        let status = Paragraph::new(self.status_text().into_owned())
            .block(Block::default().title("Status").borders(Borders::ALL))
            .style(self.status_style())
            .wrap(Wrap { trim: true });
        f.render_widget(status, area);
    }

    fn status_text(&self) -> Cow<'_, str> {
        self.message.as_ref().map_or_else(
            || match self.input_mode {
                InputMode::Browse => Cow::Borrowed(BROWSE_HELP),
                InputMode::Insert => Cow::Borrowed(INSERT_HELP),
            },
            |msg| Cow::Borrowed(msg.text.as_str()),
        )
    }

    fn status_style(&self) -> Style {
        self.message.as_ref().map_or_else(Style::default, Message::style)
    }
}
