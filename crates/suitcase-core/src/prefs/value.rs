//! Stored value representation and the per-type preference capability.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single value as held by a key-value store.
///
/// Values keep their declared type on disk so that a key written as an
/// integer is never silently read back as a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum StoredValue {
    /// 32-bit integer.
    Int(i32),
    /// 64-bit integer.
    Long(i64),
    /// 32-bit float.
    Float(f32),
    /// Boolean flag.
    Bool(bool),
    /// UTF-8 string.
    String(String),
}

impl StoredValue {
    /// Name of the stored type, as written in persisted documents.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Long(_) => "long",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::String(_) => "string",
        }
    }
}

impl fmt::Display for StoredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Long(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
        }
    }
}

/// A type that can be persisted as a preference.
///
/// Each implementation maps to exactly one [`StoredValue`] variant.
pub trait PrefValue: Clone + Sized {
    /// The [`StoredValue::kind`] this type reads and writes.
    const KIND: &'static str;

    /// Extracts `Self` from a stored value, handing the value back on a
    /// type mismatch.
    ///
    /// # Errors
    ///
    /// Returns the original value when it holds a different type.
    fn from_stored(value: StoredValue) -> Result<Self, StoredValue>;

    /// Wraps `self` for storage.
    fn into_stored(self) -> StoredValue;
}

macro_rules! impl_pref_value {
    ($ty:ty, $variant:ident, $kind:literal) => {
        impl PrefValue for $ty {
            const KIND: &'static str = $kind;

            fn from_stored(value: StoredValue) -> Result<Self, StoredValue> {
                match value {
                    StoredValue::$variant(v) => Ok(v),
                    other => Err(other),
                }
            }

            fn into_stored(self) -> StoredValue {
                StoredValue::$variant(self)
            }
        }
    };
}

impl_pref_value!(i32, Int, "int");
impl_pref_value!(i64, Long, "long");
impl_pref_value!(f32, Float, "float");
impl_pref_value!(bool, Bool, "bool");
impl_pref_value!(String, String, "string");
