//! claimtags - a terminal search bar built on the claim tag input.

use std::io::{self, Stdout};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{error, info};

use claimtags::app::App;
use claimtags::config::{self, Settings};
use claimtags::error::AppError;
use claimtags::events::EventHandler;
use claimtags::logging;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Turn free text into colored tag chips and search with them.
#[derive(Debug, Parser)]
#[command(name = "claimtags", version, about)]
struct Args {
    /// Path to the config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Event loop tick rate in milliseconds
    #[arg(long, value_name = "MS")]
    tick_rate: Option<u64>,

    /// Milliseconds between placeholder tips
    #[arg(long, value_name = "MS")]
    rotate_ms: Option<u64>,

    /// Placeholder shown when there are no tips
    #[arg(long, value_name = "TEXT")]
    placeholder: Option<String>,

    /// Directory for log files
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// Log at trace level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    /// Apply command line overrides on top of loaded settings.
    fn apply(&self, settings: &mut Settings) {
        if let Some(tick_rate) = self.tick_rate {
            settings.tick_rate_ms = tick_rate;
        }
        if let Some(rotate_ms) = self.rotate_ms {
            settings.rotate_ms = rotate_ms;
        }
        if let Some(placeholder) = &self.placeholder {
            settings.placeholder = placeholder.clone();
        }
    }
}

fn load_settings(args: &Args) -> claimtags::error::Result<Settings> {
    let mut settings = config::load(args.config.as_deref())?;
    args.apply(&mut settings);
    settings.validate()?;
    Ok(settings)
}

fn setup_terminal() -> claimtags::error::Result<Tui> {
    enable_raw_mode().map_err(|e| AppError::terminal(format!("raw mode: {}", e)))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}

/// Leave the alternate screen before a panic message is printed.
fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));
}

async fn run(terminal: &mut Tui, settings: Settings) -> anyhow::Result<()> {
    let events = EventHandler::with_tick_rate(settings.tick_rate_ms);
    info!(tick_rate = ?events.tick_rate(), "Event loop starting");
    let mut app = App::new(settings);

    while !app.should_quit() {
        terminal
            .draw(|frame| app.view(frame))
            .context("failed to draw frame")?;
        // Polling blocks, so keep it off the runtime's async workers
        let event = tokio::task::block_in_place(|| events.next())?;
        app.update(event);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let _log_guard = logging::init(args.log_dir.as_deref(), args.verbose)?;

    let settings = match load_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            error!(error = %e, critical = e.is_critical(), "Failed to load settings");
            eprintln!("{}", e.user_message());
            return Err(e.into());
        }
    };
    info!(tick_rate_ms = settings.tick_rate_ms, "Settings loaded");

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, settings).await;
    restore_terminal()?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        error!(error = %e, "Application error");
    }
    logging::shutdown();
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_parse_overrides() {
        let args = Args::parse_from([
            "claimtags",
            "--tick-rate",
            "50",
            "--rotate-ms",
            "1000",
            "--placeholder",
            "Find a home",
        ]);
        let mut settings = Settings::default();
        args.apply(&mut settings);

        assert_eq!(settings.tick_rate_ms, 50);
        assert_eq!(settings.rotate_ms, 1000);
        assert_eq!(settings.placeholder, "Find a home");
    }

    #[test]
    fn test_args_defaults_leave_settings_alone() {
        let args = Args::parse_from(["claimtags"]);
        let mut settings = Settings::default();
        args.apply(&mut settings);
        assert_eq!(settings, Settings::default());
        assert!(!args.verbose);
    }

    #[test]
    fn test_zero_rotate_override_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let args = Args::parse_from([
            "claimtags",
            "--config",
            dir.path().join("missing.toml").to_str().unwrap(),
            "--rotate-ms",
            "0",
        ]);
        let err = load_settings(&args).unwrap_err();
        assert!(err.user_message().contains("rotate_ms"));
    }
}
