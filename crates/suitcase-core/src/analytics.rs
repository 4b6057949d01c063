//! Analytics facade.
//!
//! Application code reports events, screens and user properties through the
//! [`Analytics`] trait and stays ignorant of the sink. [`TracingAnalytics`]
//! emits structured `tracing` events on the `analytics` target;
//! [`RecordingAnalytics`] keeps everything in memory.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, SuitcaseError};

/// A single event parameter value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Integer parameter.
    Int(i64),
    /// Floating-point parameter.
    Float(f64),
    /// Boolean parameter.
    Bool(bool),
    /// Text parameter.
    Text(String),
    /// Explicitly empty parameter.
    None,
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Text(v) => f.write_str(v),
            Self::None => f.write_str("null"),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for ParamValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::None, Into::into)
    }
}

/// Sink for product analytics.
pub trait Analytics: Send + Sync {
    /// Report a named event with parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SuitcaseError::InvalidAnalyticsName`] if `name` is empty.
    fn event(&self, name: &str, params: &[(&str, ParamValue)]) -> Result<()>;

    /// Report that a screen was shown.
    ///
    /// # Errors
    ///
    /// Returns [`SuitcaseError::InvalidAnalyticsName`] if `name` is empty.
    fn screen(&self, name: &str) -> Result<()>;

    /// Set user properties. A `None` value unsets the property.
    fn set_user_properties(&self, properties: &[(&str, Option<&str>)]);
}

fn check_name(kind: &'static str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(SuitcaseError::InvalidAnalyticsName(kind));
    }
    Ok(())
}

/// Emits analytics as `tracing` events.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn event(&self, name: &str, params: &[(&str, ParamValue)]) -> Result<()> {
        check_name("event", name)?;
        let params = params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join(", ");
        info!(target: "analytics", event = name, %params, "event");
        Ok(())
    }

    fn screen(&self, name: &str) -> Result<()> {
        check_name("screen", name)?;
        info!(target: "analytics", screen = name, "screen");
        Ok(())
    }

    fn set_user_properties(&self, properties: &[(&str, Option<&str>)]) {
        for (key, value) in properties {
            match value {
                Some(value) => info!(target: "analytics", property = key, value, "user property set"),
                None => info!(target: "analytics", property = key, "user property cleared"),
            }
        }
    }
}

/// One call captured by [`RecordingAnalytics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalyticsRecord {
    /// An [`Analytics::event`] call.
    Event {
        /// Event name.
        name: String,
        /// Event parameters in call order.
        params: Vec<(String, ParamValue)>,
    },
    /// An [`Analytics::screen`] call.
    Screen {
        /// Screen name.
        name: String,
    },
    /// One property from an [`Analytics::set_user_properties`] call.
    UserProperty {
        /// Property key.
        key: String,
        /// New value, `None` when cleared.
        value: Option<String>,
    },
}

/// Keeps every analytics call in memory.
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    records: Mutex<Vec<AnalyticsRecord>>,
}

impl RecordingAnalytics {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all calls so far.
    #[must_use]
    pub fn records(&self) -> Vec<AnalyticsRecord> {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn push(&self, record: AnalyticsRecord) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }
}

impl Analytics for RecordingAnalytics {
    fn event(&self, name: &str, params: &[(&str, ParamValue)]) -> Result<()> {
        check_name("event", name)?;
        self.push(AnalyticsRecord::Event {
            name: name.to_owned(),
            params: params
                .iter()
                .map(|(k, v)| ((*k).to_owned(), v.clone()))
                .collect(),
        });
        Ok(())
    }

    fn screen(&self, name: &str) -> Result<()> {
        check_name("screen", name)?;
        self.push(AnalyticsRecord::Screen {
            name: name.to_owned(),
        });
        Ok(())
    }

    fn set_user_properties(&self, properties: &[(&str, Option<&str>)]) {
        for (key, value) in properties {
            self.push(AnalyticsRecord::UserProperty {
                key: (*key).to_owned(),
                value: value.map(str::to_owned),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_captures_calls_in_order() {
        let analytics = RecordingAnalytics::new();
        analytics
            .event("share", &[("item_id", 42.into()), ("method", "email".into())])
            .unwrap();
        analytics.screen("settings").unwrap();
        analytics.set_user_properties(&[("plan", Some("pro")), ("referrer", None)]);

        let records = analytics.records();
        assert_eq!(records.len(), 4);
        assert_eq!(
            records[0],
            AnalyticsRecord::Event {
                name: "share".into(),
                params: vec![
                    ("item_id".into(), ParamValue::Int(42)),
                    ("method".into(), ParamValue::Text("email".into())),
                ],
            }
        );
        assert_eq!(records[1], AnalyticsRecord::Screen { name: "settings".into() });
        assert_eq!(
            records[3],
            AnalyticsRecord::UserProperty {
                key: "referrer".into(),
                value: None
            }
        );
    }

    #[test]
    fn test_empty_names_rejected() {
        let analytics = RecordingAnalytics::new();
        let err = analytics.event("  ", &[]).unwrap_err();
        assert!(matches!(err, SuitcaseError::InvalidAnalyticsName("event")));
        assert!(TracingAnalytics.screen("").is_err());
        assert!(analytics.records().is_empty());
    }

    #[test]
    fn test_tracing_analytics_accepts_valid_calls() {
        let analytics = TracingAnalytics;
        assert!(analytics.event("login", &[("ok", true.into())]).is_ok());
        assert!(analytics.screen("home").is_ok());
        analytics.set_user_properties(&[("locale", Some("en"))]);
    }

    #[test]
    fn test_param_value_conversions() {
        assert_eq!(ParamValue::from(Some(3)), ParamValue::Int(3));
        assert_eq!(ParamValue::from(None::<&str>), ParamValue::None);
        assert_eq!(ParamValue::from(1.5).to_string(), "1.5");
        assert_eq!(ParamValue::None.to_string(), "null");
    }

    #[test]
    fn test_trait_object_usage() {
        let sink: Box<dyn Analytics> = Box::new(RecordingAnalytics::new());
        sink.screen("onboarding").unwrap();
    }
}
