//! CLI entry point for taskboard.

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use taskboard_app::ProjectConfig;
use taskboard_core::Filter;
use taskboard_store_http::HttpTaskStore;
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

mod commands;
mod tui;

/// Terminal client for a remote to-do task service.
#[derive(Parser, Debug)]
#[command(
    name = "taskboard",
    version,
    about = "taskboard: terminal client for a remote to-do task service"
)]
struct Cli {
    /// Directory containing taskboard.toml (defaults to current).
    #[arg(long)]
    dir: Option<String>,

    /// Override the task service base URL.
    #[arg(long)]
    base_url: Option<String>,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List tasks.
    Ls {
        #[arg(long, value_enum, default_value_t = FilterArg::All)]
        filter: FilterArg,
        #[arg(long, value_enum, default_value_t = LsFormat::Table)]
        format: LsFormat,
    },

    /// Add a new task.
    Add {
        /// Task text (words are joined with spaces).
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Toggle the completion flag of a task.
    Toggle {
        #[arg(long)]
        id: i64,
    },

    /// Delete a task.
    Rm {
        #[arg(long)]
        id: i64,
    },

    /// Toggle every task at once.
    ToggleAll,

    /// Delete every completed task.
    Clear,

    /// Launch interactive terminal UI.
    Tui,
}

/// Display filter accepted on the command line.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum FilterArg {
    /// Every task.
    All,
    /// Completed tasks only.
    Done,
    /// Open tasks only.
    Undone,
}

impl From<FilterArg> for Filter {
    fn from(arg: FilterArg) -> Self {
        match arg {
            FilterArg::All => Self::All,
            FilterArg::Done => Self::Done,
            FilterArg::Undone => Self::Undone,
        }
    }
}

/// Output format for `ls`.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum LsFormat {
    /// Human-readable table.
    Table,
    /// Pretty-printed JSON.
    Json,
}

fn main() -> Result<()> {
    let Cli { dir, base_url, cmd } = Cli::parse();
    let cmd = cmd.unwrap_or(Command::Tui);

    install_tracing();

    let dir = dir.unwrap_or_else(|| ".".to_owned());
    let mut config = ProjectConfig::load(&dir)?;
    if let Some(url) = base_url {
        config.service.base_url = url;
    }

    let store = HttpTaskStore::new(&config.service.base_url, config.service.timeout())?;
    let runtime = tokio::runtime::Runtime::new()?;

    match cmd {
        Command::Tui => tui::run(store, &runtime),
        other => commands::run(other, &store, &runtime),
    }
}

fn install_tracing() {
    // EnvFilter honors RUST_LOG; default is INFO.
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_span_events(FmtSpan::NONE)
        .compact()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_ls_command() {
        let cli = Cli::parse_from(["taskboard", "ls", "--filter", "undone", "--format", "json"]);
        match cli.cmd {
            Some(Command::Ls { filter, format }) => {
                assert!(matches!(filter, FilterArg::Undone));
                assert!(matches!(format, LsFormat::Json));
            }
            _ => panic!("expected ls command"),
        }
    }

    #[test]
    fn parse_add_command_joins_words() {
        let cli = Cli::parse_from(["taskboard", "add", "buy", "milk"]);
        match cli.cmd {
            Some(Command::Add { text }) => assert_eq!(text, vec!["buy", "milk"]),
            _ => panic!("expected add command"),
        }
    }

    #[test]
    fn parse_toggle_command() {
        let cli = Cli::parse_from(["taskboard", "toggle", "--id", "3"]);
        match cli.cmd {
            Some(Command::Toggle { id }) => assert_eq!(id, 3),
            _ => panic!("expected toggle command"),
        }
    }

    #[test]
    fn missing_subcommand_defaults_to_tui() {
        let cli = Cli::parse_from(["taskboard"]);
        assert!(cli.cmd.is_none());
    }

    #[test]
    fn parse_base_url_override() {
        let cli = Cli::parse_from(["taskboard", "--base-url", "http://example.com/v1/tasks", "ls"]);
        assert_eq!(cli.base_url.as_deref(), Some("http://example.com/v1/tasks"));
    }
}
