//! Typed preferences over key-value stores.
//!
//! - [`store`] - the [`KeyValueStore`] capability with in-memory and
//!   file-backed implementations
//! - [`value`] - the persisted value model and the per-type [`PrefValue`]
//!   capability
//! - [`pref`] - [`Pref`] and [`NullablePref`] accessors
//!
//! ```rust
//! use suitcase_core::prefs::{MemoryStore, NullIntPref};
//!
//! let store = MemoryStore::new();
//! let retries = NullIntPref::new(&store, "retries", Some(5));
//! assert_eq!(retries.get(), Some(5));
//!
//! retries.set(Some(10)).unwrap();
//! assert!(retries.is_set());
//!
//! retries.set(None).unwrap();
//! assert_eq!(retries.get(), Some(5));
//! ```

pub mod pref;
pub mod store;
pub mod value;

pub use pref::{
    BoolPref, FloatPref, IntPref, LongPref, NullBoolPref, NullFloatPref, NullIntPref,
    NullLongPref, NullStringPref, NullablePref, Pref, StringPref,
};
pub use store::{default_data_dir, is_valid_namespace, FileStore, KeyValueStore, MemoryStore};
pub use value::{PrefValue, StoredValue};
