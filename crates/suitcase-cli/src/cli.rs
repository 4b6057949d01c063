//! Command-line arguments.

use std::path::PathBuf;

use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use suitcase_core::DateStyle;

/// Typed preferences and formatting helpers from the command line.
#[derive(Debug, Parser)]
#[command(name = "suitcase")]
#[command(version)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, global = true, env = "SUITCASE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding persisted stores (overrides the config)
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Store namespace (overrides the config)
    #[arg(short, long, global = true)]
    pub namespace: Option<String>,

    /// Increase log verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Read and write nullable integer preferences
    #[command(subcommand)]
    Pref(PrefCommand),

    /// Format a date
    Date {
        /// RFC 3339 timestamp (defaults to now)
        value: Option<String>,
        /// Date style: short, medium, long, full
        #[arg(long)]
        style: Option<DateStyle>,
        /// IANA timezone for display (overrides the config)
        #[arg(long)]
        tz: Option<Tz>,
        /// Append the short time
        #[arg(long)]
        time: bool,
    },

    /// Build a URL query string from key=value pairs
    Query {
        /// Pairs in key=value form
        #[arg(value_parser = parse_pair)]
        pairs: Vec<(String, String)>,
    },
}

#[derive(Debug, Subcommand)]
pub enum PrefCommand {
    /// Print the value, the default if unset, or `null`
    Get {
        key: String,
        /// Value reported while the key is unset
        #[arg(long, allow_negative_numbers = true)]
        default: Option<i32>,
    },

    /// Store a value
    Set {
        key: String,
        #[arg(allow_negative_numbers = true)]
        value: i32,
    },

    /// Remove a value
    Clear { key: String },

    /// Print whether a value is stored
    IsSet { key: String },

    /// List every stored key and value
    List,

    /// Remove every key in the namespace
    Reset,
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pref_set_negative() {
        let cli = Cli::try_parse_from(["suitcase", "pref", "set", "offset", "-5"]).unwrap();
        match cli.command {
            Command::Pref(PrefCommand::Set { key, value }) => {
                assert_eq!(key, "offset");
                assert_eq!(value, -5);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "suitcase", "pref", "get", "retries", "--default", "5", "-n", "work", "-vv",
        ])
        .unwrap();
        assert_eq!(cli.namespace.as_deref(), Some("work"));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Command::Pref(PrefCommand::Get { default: Some(5), .. })
        ));
    }

    #[test]
    fn test_parse_date_options() {
        let cli = Cli::try_parse_from([
            "suitcase",
            "date",
            "2000-01-01T12:00:00Z",
            "--style",
            "full",
            "--tz",
            "Asia/Tokyo",
            "--time",
        ])
        .unwrap();
        match cli.command {
            Command::Date { value, style, tz, time } => {
                assert_eq!(value.as_deref(), Some("2000-01-01T12:00:00Z"));
                assert_eq!(style, Some(DateStyle::Full));
                assert_eq!(tz, Some(chrono_tz::Asia::Tokyo));
                assert!(time);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(Cli::try_parse_from(["suitcase", "date", "--style", "weekly"]).is_err());
        assert!(Cli::try_parse_from(["suitcase", "query", "novalue"]).is_err());
        assert!(Cli::try_parse_from(["suitcase", "pref", "set", "k", "ten"]).is_err());
    }

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("a=b=c"), Ok(("a".into(), "b=c".into())));
        assert_eq!(parse_pair("empty="), Ok(("empty".into(), String::new())));
        assert!(parse_pair("=x").is_err());
    }

    #[test]
    fn test_command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
