//! Unified error types for the suitcase core library.
//!
//! Preference accessors add no failure modes of their own: every error a
//! caller can observe originates in a store (I/O, corrupt documents, bad
//! namespace names), in configuration handling, or in the analytics facade.
//!
//! # Example
//!
//! ```rust
//! use suitcase_core::error::{SuitcaseError, Result};
//! use std::path::Path;
//!
//! fn require_config(path: &Path) -> Result<()> {
//!     if !path.exists() {
//!         return Err(SuitcaseError::ConfigNotFound(path.to_path_buf()));
//!     }
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// The unified error type for all suitcase operations.
#[derive(Debug, Error)]
pub enum SuitcaseError {
    // =========================================================================
    // STORE ERRORS
    // =========================================================================
    /// The namespace name cannot be used as a store file name.
    #[error(
        "Invalid store namespace: '{0}'. Use 1-64 letters, digits, '_', '.' or '-', starting with a letter or digit."
    )]
    InvalidNamespace(String),

    /// A persisted store document exists but cannot be parsed.
    #[error("Store file {} is corrupted: {message}", .path.display())]
    StoreCorrupted {
        /// Path of the offending document.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// A value was rejected because it cannot be stored faithfully.
    #[error("Cannot store '{key}': {reason}")]
    UnpersistableValue {
        /// Key the value was written under.
        key: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// An error occurred while persisting or reading store data.
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    // =========================================================================
    // CONFIGURATION ERRORS
    // =========================================================================
    /// The configuration file was not found at the expected path.
    #[error("Configuration file not found at: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The configuration file exists but could not be parsed.
    #[error("Failed to parse configuration: {0}")]
    ConfigParseError(String),

    /// The configuration was parsed but contains invalid values.
    #[error("Configuration validation failed: {0}")]
    ConfigValidationError(String),

    // =========================================================================
    // ANALYTICS ERRORS
    // =========================================================================
    /// An analytics event or screen was reported without a name.
    #[error("Analytics {0} name cannot be empty")]
    InvalidAnalyticsName(&'static str),

    // =========================================================================
    // I/O ERRORS
    // =========================================================================
    /// A low-level I/O error occurred.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// A specialized [`Result`] type for suitcase operations.
pub type Result<T> = std::result::Result<T, SuitcaseError>;

impl SuitcaseError {
    /// Returns `true` if this error was raised by a key-value store.
    #[inline]
    #[must_use]
    pub const fn is_store_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidNamespace(_)
                | Self::StoreCorrupted { .. }
                | Self::UnpersistableValue { .. }
                | Self::PersistenceError(_)
        )
    }

    /// Returns `true` if this error is related to configuration.
    #[inline]
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigNotFound(_) | Self::ConfigParseError(_) | Self::ConfigValidationError(_)
        )
    }

    /// Returns `true` if this error came from the analytics facade.
    #[inline]
    #[must_use]
    pub const fn is_analytics_error(&self) -> bool {
        matches!(self, Self::InvalidAnalyticsName(_))
    }

    /// Returns `true` if this error is a raw I/O failure.
    #[inline]
    #[must_use]
    pub const fn is_io_error(&self) -> bool {
        matches!(self, Self::IoError(_))
    }

    /// Returns a machine-readable error code.
    #[inline]
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidNamespace(_) => "INVALID_NAMESPACE",
            Self::StoreCorrupted { .. } => "STORE_CORRUPTED",
            Self::UnpersistableValue { .. } => "UNPERSISTABLE_VALUE",
            Self::PersistenceError(_) => "PERSISTENCE_ERROR",
            Self::ConfigNotFound(_) => "CONFIG_NOT_FOUND",
            Self::ConfigParseError(_) => "CONFIG_PARSE_ERROR",
            Self::ConfigValidationError(_) => "CONFIG_VALIDATION_ERROR",
            Self::InvalidAnalyticsName(_) => "INVALID_ANALYTICS_NAME",
            Self::IoError(_) => "IO_ERROR",
        }
    }
}

// =============================================================================
// CONVERSIONS FROM SERIALIZATION ERRORS
// =============================================================================

impl From<serde_json::Error> for SuitcaseError {
    fn from(err: serde_json::Error) -> Self {
        Self::PersistenceError(err.to_string())
    }
}

impl From<toml::de::Error> for SuitcaseError {
    fn from(err: toml::de::Error) -> Self {
        Self::ConfigParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for SuitcaseError {
    fn from(err: toml::ser::Error) -> Self {
        Self::ConfigParseError(err.to_string())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoErr, ErrorKind};

    #[test]
    fn test_store_error_classification() {
        assert!(SuitcaseError::InvalidNamespace("../x".into()).is_store_error());
        assert!(SuitcaseError::PersistenceError("disk full".into()).is_store_error());
        assert!(SuitcaseError::StoreCorrupted {
            path: PathBuf::from("/tmp/prefs.json"),
            message: "expected value".into(),
        }
        .is_store_error());

        assert!(SuitcaseError::UnpersistableValue {
            key: "ratio".into(),
            reason: "NaN".into(),
        }
        .is_store_error());

        assert!(!SuitcaseError::ConfigParseError("bad".into()).is_store_error());
    }

    #[test]
    fn test_config_error_classification() {
        assert!(SuitcaseError::ConfigNotFound(PathBuf::from("/test")).is_config_error());
        assert!(SuitcaseError::ConfigParseError("syntax error".into()).is_config_error());
        assert!(SuitcaseError::ConfigValidationError("invalid value".into()).is_config_error());

        assert!(!SuitcaseError::InvalidAnalyticsName("event").is_config_error());
    }

    #[test]
    fn test_analytics_and_io_classification() {
        assert!(SuitcaseError::InvalidAnalyticsName("screen").is_analytics_error());
        assert!(SuitcaseError::IoError(IoErr::new(ErrorKind::NotFound, "test")).is_io_error());
        assert!(!SuitcaseError::PersistenceError("x".into()).is_io_error());
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            SuitcaseError::InvalidNamespace(String::new()).error_code(),
            "INVALID_NAMESPACE"
        );
        assert_eq!(
            SuitcaseError::ConfigNotFound(PathBuf::new()).error_code(),
            "CONFIG_NOT_FOUND"
        );
        assert_eq!(
            SuitcaseError::InvalidAnalyticsName("event").error_code(),
            "INVALID_ANALYTICS_NAME"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoErr::new(ErrorKind::NotFound, "file not found");
        let err: SuitcaseError = io_err.into();
        assert!(matches!(err, SuitcaseError::IoError(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SuitcaseError = json_err.into();
        assert!(err.is_store_error());
    }

    #[test]
    fn test_error_display_messages() {
        let err = SuitcaseError::InvalidNamespace("a/b".into());
        assert!(format!("{err}").contains("a/b"));

        let err = SuitcaseError::InvalidAnalyticsName("event");
        assert_eq!(format!("{err}"), "Analytics event name cannot be empty");
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<SuitcaseError>();
        assert_sync::<SuitcaseError>();
    }
}
