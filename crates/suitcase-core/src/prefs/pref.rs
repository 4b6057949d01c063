//! Typed accessors over a [`KeyValueStore`].
//!
//! An accessor is a key, a default and a store handle. It caches nothing:
//! every call goes straight to the store, so two accessors built for the
//! same key always agree.

use std::fmt;

use crate::error::Result;
use crate::prefs::store::KeyValueStore;
use crate::prefs::value::PrefValue;

/// A preference that always has a value: the stored one, or its default.
#[derive(Clone)]
pub struct Pref<T, S> {
    store: S,
    key: String,
    default: T,
}

impl<T: PrefValue, S: KeyValueStore> Pref<T, S> {
    /// Create an accessor for `key` in `store`.
    pub fn new(store: S, key: impl Into<String>, default: T) -> Self {
        Self {
            store,
            key: key.into(),
            default,
        }
    }

    /// The key this preference is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value returned while the key is unset.
    #[must_use]
    pub const fn default_value(&self) -> &T {
        &self.default
    }

    /// The stored value, or the default if unset.
    #[must_use]
    pub fn get(&self) -> T {
        self.store
            .get_typed(&self.key)
            .unwrap_or_else(|| self.default.clone())
    }

    /// Store `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot commit the write.
    pub fn set(&self, value: T) -> Result<()> {
        self.store.put_typed(&self.key, value)
    }

    /// Whether a value is stored, as opposed to the default being reported.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.store.contains(&self.key)
    }

    /// Remove the stored value so that [`get`](Self::get) reports the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot commit the removal.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)
    }
}

/// A preference whose value may be absent.
///
/// Setting `None` removes the key, and an unset key reports the configured
/// default, which may itself be `None`.
#[derive(Clone)]
pub struct NullablePref<T, S> {
    store: S,
    key: String,
    default: Option<T>,
}

impl<T: PrefValue, S: KeyValueStore> NullablePref<T, S> {
    /// Create an accessor for `key` in `store`.
    pub fn new(store: S, key: impl Into<String>, default: Option<T>) -> Self {
        Self {
            store,
            key: key.into(),
            default,
        }
    }

    /// The key this preference is stored under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The value returned while the key is unset.
    #[must_use]
    pub const fn default_value(&self) -> Option<&T> {
        self.default.as_ref()
    }

    /// The stored value if set, otherwise the default.
    #[must_use]
    pub fn get(&self) -> Option<T> {
        if self.is_set() {
            // A value of the wrong type reads as unset.
            self.store
                .get_typed(&self.key)
                .or_else(|| self.default.clone())
        } else {
            self.default.clone()
        }
    }

    /// Store `value`, or remove the key when `value` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot commit the change.
    pub fn set(&self, value: Option<T>) -> Result<()> {
        match value {
            Some(value) => self.store.put_typed(&self.key, value),
            None => self.clear(),
        }
    }

    /// Whether a value is stored, as opposed to the default being reported.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.store.contains(&self.key)
    }

    /// Remove the stored value. A no-op if already unset.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot commit the removal.
    pub fn clear(&self) -> Result<()> {
        self.store.remove(&self.key)
    }
}

impl<T: fmt::Debug, S> fmt::Debug for Pref<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pref")
            .field("key", &self.key)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

impl<T: fmt::Debug, S> fmt::Debug for NullablePref<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NullablePref")
            .field("key", &self.key)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

/// Integer preference.
pub type IntPref<S> = Pref<i32, S>;
/// Long integer preference.
pub type LongPref<S> = Pref<i64, S>;
/// Float preference.
pub type FloatPref<S> = Pref<f32, S>;
/// Boolean preference.
pub type BoolPref<S> = Pref<bool, S>;
/// String preference.
pub type StringPref<S> = Pref<String, S>;

/// Nullable integer preference.
pub type NullIntPref<S> = NullablePref<i32, S>;
/// Nullable long integer preference.
pub type NullLongPref<S> = NullablePref<i64, S>;
/// Nullable float preference.
pub type NullFloatPref<S> = NullablePref<f32, S>;
/// Nullable boolean preference.
pub type NullBoolPref<S> = NullablePref<bool, S>;
/// Nullable string preference.
pub type NullStringPref<S> = NullablePref<String, S>;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::prefs::store::{FileStore, MemoryStore};

    #[test]
    fn test_unset_key_reports_default() {
        let store = MemoryStore::new();
        let with_default = NullIntPref::new(&store, "a", Some(5));
        let without_default = NullIntPref::new(&store, "b", None);

        assert_eq!(with_default.get(), Some(5));
        assert!(!with_default.is_set());
        assert_eq!(without_default.get(), None);
        assert!(!without_default.is_set());
    }

    #[test]
    fn test_set_then_clear_scenario() {
        let store = MemoryStore::new();
        let pref = NullIntPref::new(&store, "retries", Some(5));

        assert_eq!(pref.get(), Some(5));

        pref.set(Some(10)).unwrap();
        assert_eq!(pref.get(), Some(10));
        assert!(pref.is_set());

        pref.set(None).unwrap();
        assert_eq!(pref.get(), Some(5));
        assert!(!pref.is_set());
    }

    #[test]
    fn test_clearing_absent_key_is_noop() {
        let store = MemoryStore::new();
        let pref = NullIntPref::new(&store, "never", Some(1));

        pref.set(None).unwrap();
        pref.clear().unwrap();
        assert!(!pref.is_set());
        assert_eq!(pref.get(), Some(1));
    }

    #[test]
    fn test_stored_value_equal_to_default_is_set() {
        let store = MemoryStore::new();
        let pref = NullIntPref::new(&store, "level", Some(3));

        pref.set(Some(3)).unwrap();
        assert!(pref.is_set());
        assert_eq!(pref.get(), Some(3));
    }

    #[test]
    fn test_observed_value_tracks_last_write() {
        let store = MemoryStore::new();
        let pref = NullIntPref::new(&store, "k", Some(-1));
        let ops = [Some(4), Some(0), None, None, Some(i32::MAX), Some(i32::MIN), None, Some(9)];

        for op in ops {
            pref.set(op).unwrap();
            assert_eq!(pref.get(), op.or(Some(-1)));
            assert_eq!(pref.is_set(), op.is_some());
        }
        assert_eq!(pref.get(), Some(9));
    }

    #[test]
    fn test_accessors_share_store_state() {
        let store = Arc::new(MemoryStore::new());
        let writer = NullIntPref::new(Arc::clone(&store), "shared", None);
        let reader = NullIntPref::new(Arc::clone(&store), "shared", Some(0));

        writer.set(Some(42)).unwrap();
        assert_eq!(reader.get(), Some(42));

        writer.clear().unwrap();
        assert_eq!(reader.get(), Some(0));
    }

    #[test]
    fn test_wrong_type_reads_as_default() {
        let store = MemoryStore::new();
        store.put_string("count", "ten").unwrap();

        let pref = NullIntPref::new(&store, "count", Some(1));
        assert!(pref.is_set());
        assert_eq!(pref.get(), Some(1));
    }

    #[test]
    fn test_non_nullable_prefs() {
        let store = MemoryStore::new();
        let name = StringPref::new(&store, "name", "guest".to_string());
        let dark = BoolPref::new(&store, "dark_mode", false);
        let limit = LongPref::new(&store, "limit", 100);

        assert_eq!(name.get(), "guest");
        assert!(!dark.get());
        assert_eq!(limit.default_value(), &100);

        name.set("ada".into()).unwrap();
        dark.set(true).unwrap();
        limit.set(1 << 33).unwrap();

        assert_eq!(name.get(), "ada");
        assert!(dark.get());
        assert_eq!(limit.get(), 1 << 33);

        name.clear().unwrap();
        assert_eq!(name.get(), "guest");
        assert!(!name.is_set());
        assert_eq!(name.key(), "name");
    }

    #[test]
    fn test_nullable_string_and_bool() {
        let store = MemoryStore::new();
        let token = NullStringPref::new(&store, "token", None);
        let consent = NullBoolPref::new(&store, "consent", None);

        assert_eq!(token.get(), None);
        token.set(Some("abc".into())).unwrap();
        consent.set(Some(false)).unwrap();

        assert_eq!(token.get().as_deref(), Some("abc"));
        assert_eq!(consent.get(), Some(false));
        assert_eq!(consent.default_value(), None);
    }

    #[test]
    fn test_file_backed_nullable_pref_survives_reopen() {
        let dir = tempfile::TempDir::new().unwrap();
        {
            let store = FileStore::open(dir.path(), "app").unwrap();
            NullIntPref::new(&store, "version_seen", None)
                .set(Some(12))
                .unwrap();
        }

        let store = FileStore::open(dir.path(), "app").unwrap();
        let pref = NullIntPref::new(&store, "version_seen", None);
        assert!(pref.is_set());
        assert_eq!(pref.get(), Some(12));

        pref.set(None).unwrap();
        let store = FileStore::open(dir.path(), "app").unwrap();
        assert!(!NullIntPref::<_>::new(&store, "version_seen", None).is_set());
    }

    #[test]
    fn test_debug_omits_store() {
        let store = MemoryStore::new();
        let pref = NullIntPref::new(&store, "k", Some(2));
        let rendered = format!("{pref:?}");
        assert!(rendered.contains("\"k\""));
        assert!(rendered.contains("Some(2)"));
    }
}
