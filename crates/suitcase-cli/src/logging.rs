//! Logging initialization and configuration.
//!
//! Command output goes to stdout, so log lines always go to stderr:
//! - **Production**: JSON logs to rolling files + compact logs to stderr
//! - **Development**: compact, colored logs to stderr

use std::path::PathBuf;
use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable overriding the configured log level.
pub const LOG_LEVEL_ENV: &str = "SUITCASE_LOG_LEVEL";

/// Keeps the non-blocking file writer alive for the lifetime of the program.
static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Pick the filter directive: `-v` flags win, then [`LOG_LEVEL_ENV`], then
/// the configured level.
#[must_use]
pub fn effective_level(configured: &str, verbosity: u8) -> String {
    match verbosity {
        0 => std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| configured.to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Initialize the logging system.
///
/// `RUST_LOG`, when set, takes precedence over `level`.
///
/// # Errors
///
/// Returns an error if the filter cannot be parsed or a subscriber is
/// already installed.
pub fn init(level: &str, is_production: bool) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    if is_production {
        init_production(env_filter)
    } else {
        init_development(env_filter)
    }
}

/// Initialize production logging with file + stderr output.
fn init_production(env_filter: EnvFilter) -> anyhow::Result<()> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    // Rolling file appender - creates new file daily
    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "suitcase");
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(non_blocking_file)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    let _ = FILE_GUARD.set(file_guard);

    Ok(())
}

/// Initialize development logging on stderr.
fn init_development(env_filter: EnvFilter) -> anyhow::Result<()> {
    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}

/// Returns the log directory for the current platform.
fn log_directory() -> PathBuf {
    directories::ProjectDirs::from("", "", "suitcase")
        .map_or_else(|| PathBuf::from("./logs"), |dirs| dirs.data_dir().join("logs"))
}
