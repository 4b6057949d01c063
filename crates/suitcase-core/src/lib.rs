//! # suitcase-core
//!
//! A small kit of application utilities.
//!
//! This crate provides:
//! - Typed preferences (nullable and non-nullable) over key-value stores
//! - In-memory and JSON-file-backed stores
//! - Date and time display helpers
//! - An analytics facade and a DI-container log bridge over `tracing`
//! - Configuration loading, saving, and validation
//!
//! ## Architecture
//!
//! - [`prefs`] - Preference accessors, the store capability, and stores
//! - [`date`] - Short/medium/long/full date and short time formatting
//! - [`analytics`] - Event, screen and user-property reporting
//! - [`logger`] - Forwarding of container log calls to `tracing`
//! - [`util`] - Query strings and folder helpers
//! - [`config`] - Application configuration
//! - [`error`] - Unified error types for the crate

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(missing_docs)]

pub mod analytics;
pub mod config;
pub mod date;
pub mod error;
pub mod logger;
pub mod prefs;
pub mod util;

// Re-export primary types for convenience
pub use analytics::{Analytics, AnalyticsRecord, ParamValue, RecordingAnalytics, TracingAnalytics};
pub use config::{SuitcaseConfig, DEFAULT_NAMESPACE};
pub use date::DateStyle;
pub use error::{Result, SuitcaseError};
pub use logger::{FrameworkLogger, TracingLogger};
pub use prefs::{
    FileStore, KeyValueStore, MemoryStore, NullIntPref, NullablePref, Pref, PrefValue,
    StoredValue,
};
