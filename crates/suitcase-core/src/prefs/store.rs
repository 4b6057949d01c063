//! Key-value stores backing preferences.
//!
//! A store is a string-keyed map of [`StoredValue`]s. Reads are total: a
//! missing key or a key holding another type yields the caller's fallback.
//! Writes are committed before they return.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard, Weak};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::error::{Result, SuitcaseError};
use crate::prefs::value::{PrefValue, StoredValue};

static NAMESPACE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]{0,63}$").expect("namespace regex is valid")
});

/// Whether `name` can be used as a store namespace (and thus a file name).
#[must_use]
pub fn is_valid_namespace(name: &str) -> bool {
    NAMESPACE_RE.is_match(name) && !name.contains("..")
}

/// Default directory for persisted stores.
///
/// # Errors
///
/// Returns an error if no home directory can be determined.
pub fn default_data_dir() -> Result<PathBuf> {
    directories::ProjectDirs::from("", "", "suitcase")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| SuitcaseError::PersistenceError("Cannot determine data directory".into()))
}

/// String-keyed storage with typed reads and committed writes.
///
/// Implementors provide the raw operations; the typed accessors
/// (`get_int`, `put_int`, ...) are derived from them.
pub trait KeyValueStore {
    /// Returns the raw value stored under `key`.
    fn get_value(&self, key: &str) -> Option<StoredValue>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be committed.
    fn put_value(&self, key: &str, value: StoredValue) -> Result<()>;

    /// Removes `key`. Removing an absent key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal cannot be committed.
    fn remove(&self, key: &str) -> Result<()>;

    /// All keys currently set, in ascending order.
    fn keys(&self) -> Vec<String>;

    /// Removes every key.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal cannot be committed.
    fn clear_all(&self) -> Result<()>;

    /// Whether `key` currently holds a value.
    fn contains(&self, key: &str) -> bool {
        self.get_value(key).is_some()
    }

    /// Reads `key` as `T`, or `None` if absent or of another type.
    fn get_typed<T: PrefValue>(&self, key: &str) -> Option<T>
    where
        Self: Sized,
    {
        extract(key, self.get_value(key))
    }

    /// Writes `value` under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be committed.
    fn put_typed<T: PrefValue>(&self, key: &str, value: T) -> Result<()>
    where
        Self: Sized,
    {
        self.put_value(key, value.into_stored())
    }

    /// Reads an integer, or `fallback`.
    fn get_int(&self, key: &str, fallback: i32) -> i32 {
        extract(key, self.get_value(key)).unwrap_or(fallback)
    }

    /// Writes an integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be committed.
    fn put_int(&self, key: &str, value: i32) -> Result<()> {
        self.put_value(key, StoredValue::Int(value))
    }

    /// Reads a long integer, or `fallback`.
    fn get_long(&self, key: &str, fallback: i64) -> i64 {
        extract(key, self.get_value(key)).unwrap_or(fallback)
    }

    /// Writes a long integer.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be committed.
    fn put_long(&self, key: &str, value: i64) -> Result<()> {
        self.put_value(key, StoredValue::Long(value))
    }

    /// Reads a float, or `fallback`.
    fn get_float(&self, key: &str, fallback: f32) -> f32 {
        extract(key, self.get_value(key)).unwrap_or(fallback)
    }

    /// Writes a float.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be committed.
    fn put_float(&self, key: &str, value: f32) -> Result<()> {
        self.put_value(key, StoredValue::Float(value))
    }

    /// Reads a boolean, or `fallback`.
    fn get_bool(&self, key: &str, fallback: bool) -> bool {
        extract(key, self.get_value(key)).unwrap_or(fallback)
    }

    /// Writes a boolean.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be committed.
    fn put_bool(&self, key: &str, value: bool) -> Result<()> {
        self.put_value(key, StoredValue::Bool(value))
    }

    /// Reads a string, or a copy of `fallback`.
    fn get_string(&self, key: &str, fallback: &str) -> String {
        extract(key, self.get_value(key)).unwrap_or_else(|| fallback.to_owned())
    }

    /// Writes a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the write cannot be committed.
    fn put_string(&self, key: &str, value: &str) -> Result<()> {
        self.put_value(key, StoredValue::String(value.to_owned()))
    }
}

fn extract<T: PrefValue>(key: &str, found: Option<StoredValue>) -> Option<T> {
    match T::from_stored(found?) {
        Ok(value) => Some(value),
        Err(other) => {
            warn!(
                key,
                expected = T::KIND,
                found = other.kind(),
                "preference holds a different type, using fallback"
            );
            None
        }
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_value(&self, key: &str) -> Option<StoredValue> {
        (**self).get_value(key)
    }

    fn put_value(&self, key: &str, value: StoredValue) -> Result<()> {
        (**self).put_value(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }

    fn clear_all(&self) -> Result<()> {
        (**self).clear_all()
    }

    fn contains(&self, key: &str) -> bool {
        (**self).contains(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get_value(&self, key: &str) -> Option<StoredValue> {
        (**self).get_value(key)
    }

    fn put_value(&self, key: &str, value: StoredValue) -> Result<()> {
        (**self).put_value(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }

    fn clear_all(&self) -> Result<()> {
        (**self).clear_all()
    }

    fn contains(&self, key: &str) -> bool {
        (**self).contains(key)
    }
}

type Entries = BTreeMap<String, StoredValue>;

fn read_lock(lock: &RwLock<Entries>) -> RwLockReadGuard<'_, Entries> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_lock(lock: &RwLock<Entries>) -> RwLockWriteGuard<'_, Entries> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Rejects values that would not survive a write/read cycle.
fn check_persistable(key: &str, value: &StoredValue) -> Result<()> {
    match value {
        StoredValue::Float(v) if !v.is_finite() => Err(SuitcaseError::UnpersistableValue {
            key: key.to_owned(),
            reason: format!("float {v} is not finite"),
        }),
        _ => Ok(()),
    }
}

// =============================================================================
// IN-MEMORY STORE
// =============================================================================

/// Process-local store. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<Entries>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_value(&self, key: &str) -> Option<StoredValue> {
        read_lock(&self.entries).get(key).cloned()
    }

    fn put_value(&self, key: &str, value: StoredValue) -> Result<()> {
        check_persistable(key, &value)?;
        write_lock(&self.entries).insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        write_lock(&self.entries).remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        read_lock(&self.entries).keys().cloned().collect()
    }

    fn clear_all(&self) -> Result<()> {
        write_lock(&self.entries).clear();
        Ok(())
    }

    fn contains(&self, key: &str) -> bool {
        read_lock(&self.entries).contains_key(key)
    }
}

// =============================================================================
// FILE-BACKED STORE
// =============================================================================

/// A named namespace persisted as a JSON document.
///
/// The document lives at `<data_dir>/prefs/<namespace>.json`. It is read
/// when first opened; handles opened on the same document within a process
/// share one map. Each write rewrites the document while the write lock is
/// held, so writers are serialised and the last one wins per key.
#[derive(Debug)]
pub struct FileStore {
    namespace: String,
    path: PathBuf,
    entries: Arc<RwLock<Entries>>,
}

/// Maps of documents currently open in this process, keyed by path.
static OPEN_DOCUMENTS: Lazy<Mutex<HashMap<PathBuf, Weak<RwLock<Entries>>>>> =
    Lazy::new(Mutex::default);

impl FileStore {
    /// Open (or lazily create) the namespace `namespace` under `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the namespace is invalid or an existing document
    /// cannot be read or parsed.
    pub fn open(data_dir: &Path, namespace: &str) -> Result<Self> {
        if !is_valid_namespace(namespace) {
            return Err(SuitcaseError::InvalidNamespace(namespace.to_owned()));
        }
        let file_name = format!("{namespace}.json");
        let path = data_dir.join("prefs").join(&file_name);
        let document_key = data_dir
            .canonicalize()
            .map_or_else(|_| path.clone(), |dir| dir.join("prefs").join(&file_name));

        let mut open = OPEN_DOCUMENTS.lock().unwrap_or_else(PoisonError::into_inner);
        open.retain(|_, shared| shared.strong_count() > 0);
        let entries = match open.get(&document_key).and_then(Weak::upgrade) {
            Some(shared) => shared,
            None => {
                let shared = Arc::new(RwLock::new(Self::load(&path)?));
                open.insert(document_key, Arc::downgrade(&shared));
                shared
            }
        };
        drop(open);

        debug!(
            namespace,
            path = %path.display(),
            keys = read_lock(&entries).len(),
            "opened store"
        );
        Ok(Self {
            namespace: namespace.to_owned(),
            path,
            entries,
        })
    }

    /// Namespace this store was opened with.
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Location of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(path: &Path) -> Result<Entries> {
        if !path.exists() {
            return Ok(Entries::new());
        }
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Entries::new());
        }
        serde_json::from_str(&content).map_err(|e| SuitcaseError::StoreCorrupted {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    fn persist(&self, entries: &Entries) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)?;
        debug!(namespace = %self.namespace, keys = entries.len(), "committed store");
        Ok(())
    }

    /// Apply `mutate` and commit. The in-memory map only changes once the
    /// document has been written.
    fn commit<F>(&self, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut Entries),
    {
        let mut entries = write_lock(&self.entries);
        let mut next = entries.clone();
        mutate(&mut next);
        if next == *entries && self.path.exists() {
            return Ok(());
        }
        self.persist(&next)?;
        *entries = next;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_value(&self, key: &str) -> Option<StoredValue> {
        read_lock(&self.entries).get(key).cloned()
    }

    fn put_value(&self, key: &str, value: StoredValue) -> Result<()> {
        check_persistable(key, &value)?;
        self.commit(|entries| {
            entries.insert(key.to_owned(), value);
        })
    }

    fn remove(&self, key: &str) -> Result<()> {
        if !self.contains(key) {
            return Ok(());
        }
        self.commit(|entries| {
            entries.remove(key);
        })
    }

    fn keys(&self) -> Vec<String> {
        read_lock(&self.entries).keys().cloned().collect()
    }

    fn clear_all(&self) -> Result<()> {
        self.commit(BTreeMap::clear)
    }

    fn contains(&self, key: &str) -> bool {
        read_lock(&self.entries).contains_key(key)
    }
}
