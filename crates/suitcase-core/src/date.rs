//! Date and time display helpers.
//!
//! Every helper accepts an optional value and returns `None` for `None`, so
//! callers can format possibly-missing timestamps without branching.
//! Patterns follow the US English short/medium/long/full conventions.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Timelike, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Level of detail for a formatted date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStyle {
    /// `1/1/00`
    Short,
    /// `Jan 1, 2000`
    #[default]
    Medium,
    /// `January 1, 2000`
    Long,
    /// `Saturday, January 1, 2000`
    Full,
}

impl DateStyle {
    /// `strftime` pattern for this style.
    #[must_use]
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::Short => "%-m/%-d/%y",
            Self::Medium => "%b %-d, %Y",
            Self::Long => "%B %-d, %Y",
            Self::Full => "%A, %B %-d, %Y",
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
            Self::Full => "full",
        }
    }
}

impl fmt::Display for DateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DateStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            "full" => Ok(Self::Full),
            other => Err(format!(
                "unknown date style '{other}' (expected short, medium, long or full)"
            )),
        }
    }
}

/// Pattern used by [`short_time_string`].
pub const SHORT_TIME_PATTERN: &str = "%-I:%M %p";

/// Format the calendar date of `value` in `style`.
///
/// Returns `None` only if `value` carries a date outside chrono's range.
#[must_use]
pub fn format_date<T: Datelike>(value: &T, style: DateStyle) -> Option<String> {
    NaiveDate::from_ymd_opt(value.year(), value.month(), value.day())
        .map(|date| date.format(style.pattern()).to_string())
}

/// Short date, e.g. `1/1/00`.
#[must_use]
pub fn short_date_string<T: Datelike>(value: Option<&T>) -> Option<String> {
    value.and_then(|v| format_date(v, DateStyle::Short))
}

/// Medium date, e.g. `Jan 1, 2000`.
#[must_use]
pub fn medium_date_string<T: Datelike>(value: Option<&T>) -> Option<String> {
    value.and_then(|v| format_date(v, DateStyle::Medium))
}

/// Long date, e.g. `January 1, 2000`.
#[must_use]
pub fn long_date_string<T: Datelike>(value: Option<&T>) -> Option<String> {
    value.and_then(|v| format_date(v, DateStyle::Long))
}

/// Full date, e.g. `Saturday, January 1, 2000`.
#[must_use]
pub fn full_date_string<T: Datelike>(value: Option<&T>) -> Option<String> {
    value.and_then(|v| format_date(v, DateStyle::Full))
}

/// Short time, e.g. `3:30 PM`.
#[must_use]
pub fn short_time_string<T: Timelike>(value: Option<&T>) -> Option<String> {
    let value = value?;
    NaiveTime::from_hms_opt(value.hour(), value.minute(), value.second())
        .map(|time| time.format(SHORT_TIME_PATTERN).to_string())
}

/// Convert a UTC instant to wall-clock time in `tz`.
#[must_use]
pub fn to_timezone(instant: DateTime<Utc>, tz: Tz) -> DateTime<Tz> {
    instant.with_timezone(&tz)
}
