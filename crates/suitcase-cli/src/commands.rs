//! Command execution.
//!
//! Every command writes its result to the given writer so it can be driven
//! from tests as well as from `main`.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use suitcase_core::date::{format_date, short_time_string, to_timezone};
use suitcase_core::util::query_string;
use suitcase_core::{FileStore, KeyValueStore, NullIntPref, SuitcaseConfig};
use tracing::{debug, info};

use crate::cli::{Cli, Command, PrefCommand};

/// Load the configuration to run with.
///
/// An explicit file must exist. The default file is optional, and when no
/// default location can be determined at all the built-in defaults apply.
///
/// # Errors
///
/// Returns an error if the explicit file is missing, or if any file that is
/// read cannot be parsed or validated.
pub fn resolve_config(
    explicit: Option<&Path>,
    default_path: suitcase_core::Result<PathBuf>,
) -> Result<SuitcaseConfig> {
    match (explicit, default_path) {
        (Some(path), _) => SuitcaseConfig::load_from(path)
            .with_context(|| format!("failed to load {}", path.display())),
        (None, Ok(path)) => SuitcaseConfig::load_or_default(&path)
            .with_context(|| format!("failed to load {}", path.display())),
        (None, Err(err)) => {
            debug!(error = %err, "no default config location, using defaults");
            Ok(SuitcaseConfig::default())
        }
    }
}

/// Run the parsed command against `config`, writing output to `out`.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or written, input cannot
/// be parsed, or output cannot be written.
pub fn run(cli: &Cli, config: &SuitcaseConfig, out: &mut impl Write) -> Result<()> {
    match &cli.command {
        Command::Pref(command) => {
            let store = open_store(cli, config)?;
            run_pref(command, &store, out)
        }
        Command::Date {
            value,
            style,
            tz,
            time,
        } => {
            let instant = match value {
                Some(raw) => DateTime::parse_from_rfc3339(raw)
                    .with_context(|| format!("'{raw}' is not an RFC 3339 timestamp"))?
                    .with_timezone(&Utc),
                None => Utc::now(),
            };
            let local = to_timezone(instant, tz.unwrap_or(config.timezone));
            let style = style.unwrap_or(config.date_style);
            let mut line = format_date(&local, style).context("date out of range")?;
            if *time {
                if let Some(clock) = short_time_string(Some(&local)) {
                    line.push(' ');
                    line.push_str(&clock);
                }
            }
            writeln!(out, "{line}")?;
            Ok(())
        }
        Command::Query { pairs } => {
            writeln!(out, "{}", query_string(pairs))?;
            Ok(())
        }
    }
}

fn open_store(cli: &Cli, config: &SuitcaseConfig) -> Result<FileStore> {
    let data_dir: PathBuf = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => config.resolved_data_dir()?,
    };
    let namespace = cli.namespace.as_deref().unwrap_or(&config.namespace);
    debug!(data_dir = %data_dir.display(), namespace, "opening store");
    FileStore::open(&data_dir, namespace)
        .with_context(|| format!("failed to open store '{namespace}'"))
}

fn run_pref<S: KeyValueStore>(
    command: &PrefCommand,
    store: &S,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        PrefCommand::Get { key, default } => {
            let pref = NullIntPref::new(store, key.as_str(), *default);
            match pref.get() {
                Some(value) => writeln!(out, "{value}")?,
                None => writeln!(out, "null")?,
            }
        }
        PrefCommand::Set { key, value } => {
            NullIntPref::new(store, key.as_str(), None).set(Some(*value))?;
            info!(key = %key, value, "preference set");
        }
        PrefCommand::Clear { key } => {
            NullIntPref::new(store, key.as_str(), None).set(None)?;
            info!(key = %key, "preference cleared");
        }
        PrefCommand::IsSet { key } => {
            let pref = NullIntPref::new(store, key.as_str(), None);
            writeln!(out, "{}", pref.is_set())?;
        }
        PrefCommand::List => {
            for key in store.keys() {
                if let Some(value) = store.get_value(&key) {
                    writeln!(out, "{key} = {value} ({})", value.kind())?;
                }
            }
        }
        PrefCommand::Reset => {
            store.clear_all()?;
            info!("namespace reset");
        }
    }
    Ok(())
}
