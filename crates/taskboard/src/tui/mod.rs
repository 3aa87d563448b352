use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event as CrosstermEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use taskboard_app::{Dispatcher, TaskStore};
use tokio::runtime::Runtime;
use tracing::subscriber::NoSubscriber;

mod handlers;
mod selection;
mod view;
mod widgets;

use self::view::Ui;

/// Interval in milliseconds between UI ticks/redraws.
const TUI_TICK_RATE_MS: u64 = 200;
/// Time-to-live in seconds for transient status messages.
const UI_MESSAGE_TTL_SECS: u64 = 5;
/// Highlight symbol shown beside the selected list entry.
const TASK_LIST_HIGHLIGHT_SYMBOL: &str = "▶ ";

/// Launch the interactive TUI.
pub fn run<S>(store: S, runtime: &Runtime) -> Result<()>
where
    S: TaskStore + 'static,
{
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    // Log lines would corrupt the alternate screen; diagnostics surface in
    // the status line instead.
    let result = tracing::subscriber::with_default(NoSubscriber::default(), || {
        run_event_loop(&mut terminal, store, runtime)
    });

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result
}

fn run_event_loop<S>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    store: S,
    runtime: &Runtime,
) -> Result<()>
where
    S: TaskStore + 'static,
{
    let (dispatcher, completions) = Dispatcher::new(Arc::new(store), runtime.handle().clone());
    let mut ui = Ui::new(dispatcher, completions);
    ui.reload();

    let mut last_tick = Instant::now();
    let tick_rate = Duration::from_millis(TUI_TICK_RATE_MS);

    loop {
        ui.drain_completions();
        terminal.draw(|f| ui.draw(f))?;
        if ui.should_quit {
            break;
        }

        let timeout = tick_rate.checked_sub(last_tick.elapsed()).unwrap_or_default();

        if event::poll(timeout)?
            && let CrosstermEvent::Key(key) = event::read()?
        {
            ui.handle_key(key);
        }

        if last_tick.elapsed() >= tick_rate {
            ui.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}
