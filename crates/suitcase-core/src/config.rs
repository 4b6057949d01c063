//! Application configuration management.
//!
//! Handles loading, saving, and validating suitcase configuration:
//! - Where persisted stores live and which namespace is used by default
//! - Log level and production logging mode
//! - Timezone and date style used for display

use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::date::DateStyle;
use crate::error::{Result, SuitcaseError};
use crate::prefs::store::{default_data_dir, is_valid_namespace};

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Main application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuitcaseConfig {
    /// Directory holding persisted stores. `None` means the platform data
    /// directory.
    pub data_dir: Option<PathBuf>,

    /// Store namespace used when the caller does not name one.
    pub namespace: String,

    /// Log filter directive, e.g. `info` or `suitcase_core=debug`.
    pub log_level: String,

    /// Whether to also write JSON logs to rolling files.
    pub production: bool,

    /// Timezone used when displaying instants.
    #[serde(with = "timezone_serde")]
    pub timezone: Tz,

    /// Default date style for display.
    pub date_style: DateStyle,
}

impl Default for SuitcaseConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            namespace: DEFAULT_NAMESPACE.to_string(),
            log_level: "info".to_string(),
            production: false,
            timezone: chrono_tz::UTC,
            date_style: DateStyle::default(),
        }
    }
}

impl SuitcaseConfig {
    /// Load configuration from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing, cannot be read or parsed, or
    /// fails validation.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SuitcaseError::ConfigNotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, falling back to defaults if the file
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read, parsed or
    /// validated.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load_from(path) {
            Err(SuitcaseError::ConfigNotFound(_)) => Ok(Self::default()),
            other => other,
        }
    }

    /// Save configuration to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check values that serde cannot.
    ///
    /// # Errors
    ///
    /// Returns [`SuitcaseError::ConfigValidationError`] listing every problem.
    pub fn validate(&self) -> Result<()> {
        let mut problems = Vec::new();
        if !is_valid_namespace(&self.namespace) {
            problems.push(format!("namespace: '{}' is not a valid name", self.namespace));
        }
        if self.log_level.trim().is_empty() {
            problems.push("log_level: cannot be empty".to_string());
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(SuitcaseError::ConfigValidationError(problems.join("; ")))
        }
    }

    /// Directory holding persisted stores.
    ///
    /// # Errors
    ///
    /// Returns an error if no data directory is configured and the platform
    /// one cannot be determined.
    pub fn resolved_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => default_data_dir(),
        }
    }

    /// Default configuration file path (`~/.config/suitcase/config.toml` on
    /// Linux).
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "suitcase").ok_or_else(|| {
            SuitcaseError::ConfigValidationError("Cannot determine config directory".into())
        })?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

mod timezone_serde {
    use chrono_tz::Tz;
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(tz: &Tz, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(tz.name())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Tz, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
