//! Logging configuration using the tracing ecosystem.
//!
//! Log output goes to a daily-rotated file so it never draws over the
//! terminal UI. The filter comes from `RUST_LOG`, then `--verbose`, then a
//! quiet default.

use std::path::{Path, PathBuf};

use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Default log filter if RUST_LOG is not set.
const DEFAULT_LOG_FILTER: &str = "claimtags=info,warn";

/// Filter used with `--verbose` when RUST_LOG is not set.
const VERBOSE_LOG_FILTER: &str = "claimtags=trace,info";

/// Log file name prefix; the appender adds the date.
const LOG_FILE_NAME: &str = "claimtags.log";

/// Initialize the logging system.
///
/// Logs are written to `log_dir` if given, otherwise to the platform local
/// data directory (`~/.local/share/claimtags/logs/` on Linux). The returned
/// guard flushes buffered lines when dropped, so keep it alive until exit.
///
/// # Errors
///
/// Returns an error if the log directory cannot be determined or created,
/// or if a global subscriber is already installed.
///
/// # Example
///
/// ```no_run
/// use claimtags::logging;
///
/// let _guard = logging::init(None, false).expect("Failed to initialize logging");
/// tracing::info!("ready");
/// ```
pub fn init(log_dir: Option<&Path>, verbose: bool) -> anyhow::Result<WorkerGuard> {
    let log_dir = match log_dir {
        Some(dir) => dir.to_path_buf(),
        None => get_log_directory()?,
    };
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let subscriber = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter);

    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "claimtags starting up");
    tracing::debug!(log_dir = %log_dir.display(), "Log directory");

    Ok(guard)
}

fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    }
}

/// Get the default log directory path.
fn get_log_directory() -> anyhow::Result<PathBuf> {
    let base_dir = dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine local data directory"))?;

    Ok(base_dir.join("claimtags").join("logs"))
}

/// Get the default path where logs are stored, for display to users.
pub fn log_directory() -> Option<PathBuf> {
    get_log_directory().ok()
}

/// Log application shutdown.
pub fn shutdown() {
    tracing::info!("claimtags shutting down");
}
