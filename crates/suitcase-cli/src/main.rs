//! # suitcase
//!
//! ```bash
//! suitcase pref set retries 10
//! suitcase pref get retries --default 5
//! suitcase date 2000-01-01T15:30:00Z --style full --time
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use std::io::Write;

use clap::Parser;
use suitcase_cli::cli::Cli;
use suitcase_cli::{commands, logging};
use suitcase_core::SuitcaseConfig;
use tracing::debug;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = commands::resolve_config(cli.config.as_deref(), SuitcaseConfig::default_path())?;

    logging::init(
        &logging::effective_level(&config.log_level, cli.verbose),
        config.production,
    )?;
    debug!(config = ?cli.config, namespace = %config.namespace, "configuration loaded");

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    commands::run(&cli, &config, &mut out)?;
    out.flush()?;

    Ok(())
}
