//! Local key-value storage for the persisted snapshots.
//!
//! The annotator only ever needs three primitives: read a key once at startup,
//! overwrite a key with a full snapshot, and remove a key. Values are JSON
//! text. [`FileStore`] keeps one `<key>.json` file per key in a directory;
//! [`MemoryStore`] keeps them in process memory.

use crate::error::StorageError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub const PINS_KEY: &str = "pins";
pub const CATEGORIES_KEY: &str = "categories";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

/// Directory-backed store, one file per key.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the platform data directory, if the platform has one.
    pub fn in_data_dir() -> Option<Self> {
        let dirs = directories::ProjectDirs::from("", "", "factory-map")?;
        Some(Self::new(dirs.data_dir()))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            key: key.to_string(),
            source,
        };
        fs::create_dir_all(&self.dir).map_err(write_err)?;

        // Write beside the target and rename so a crash never leaves half a snapshot.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(write_err)?;
        fs::rename(&tmp, &path).map_err(write_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Remove {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// In-memory store. Clones share the same backing map, so a clone can be
/// handed to a second annotator to observe what the first one persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<MemoryInner>>,
}

#[derive(Debug, Default)]
struct MemoryInner {
    values: HashMap<String, String>,
    read_only: bool,
    failing: HashSet<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// When read-only, every write fails as if the storage quota were exhausted.
    pub fn set_read_only(&self, read_only: bool) {
        self.inner.borrow_mut().read_only = read_only;
    }

    /// Makes writes to one key fail (or succeed again), as when a single
    /// backing file is unwritable.
    pub fn set_failing(&self, key: &str, failing: bool) {
        let mut inner = self.inner.borrow_mut();
        if failing {
            inner.failing.insert(key.to_string());
        } else {
            inner.failing.remove(key);
        }
    }

    /// Raw stored text for a key.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.borrow().values.get(key).cloned()
    }

    /// Drops every key, like wiping the browser's site data.
    pub fn clear(&self) {
        self.inner.borrow_mut().values.clear();
    }

    fn check_writable(&self, key: &str) -> Result<(), StorageError> {
        let inner = self.inner.borrow();
        if inner.read_only {
            return Err(StorageError::Unavailable("store is read-only".into()));
        }
        if inner.failing.contains(key) {
            return Err(StorageError::Unavailable(format!("'{key}' is not writable")));
        }
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.check_writable(key)?;
        self.inner
            .borrow_mut()
            .values
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.check_writable(key)?;
        self.inner.borrow_mut().values.remove(key);
        Ok(())
    }
}

/// Reads a snapshot. Absent, unreadable or malformed data all yield the empty
/// value; the latter two are logged.
pub fn load_snapshot<T, S>(store: &S, key: &str) -> T
where
    T: DeserializeOwned + Default,
    S: KeyValueStore + ?Sized,
{
    let text = match store.get(key) {
        Ok(Some(text)) => text,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!("{e}; starting with an empty '{key}'");
            return T::default();
        }
    };
    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("ignoring malformed '{key}' snapshot: {e}");
            T::default()
        }
    }
}

/// Overwrites `key` with the full serialized value.
pub fn save_snapshot<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), StorageError>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let json = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legends::CategoryMap;
    use crate::pins::{LatLng, PinSet};

    #[test]
    fn file_store_round_trips_and_removes() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get(PINS_KEY).unwrap(), None);
        store.set(PINS_KEY, "[]").unwrap();
        assert_eq!(store.get(PINS_KEY).unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("nested/pins.json").exists());

        store.remove(PINS_KEY).unwrap();
        assert_eq!(store.get(PINS_KEY).unwrap(), None);
        // Removing twice is not an error.
        store.remove(PINS_KEY).unwrap();
    }

    #[test]
    fn malformed_snapshot_loads_as_empty() {
        let mut store = MemoryStore::new();
        store.set(PINS_KEY, "{not json").unwrap();
        store.set(CATEGORIES_KEY, r#"{"A": "Teapot"}"#).unwrap();

        let pins: PinSet = load_snapshot(&store, PINS_KEY);
        let categories: CategoryMap = load_snapshot(&store, CATEGORIES_KEY);
        assert!(pins.is_empty());
        assert!(categories.is_empty());
    }

    #[test]
    fn read_only_memory_store_rejects_writes() {
        let mut store = MemoryStore::new();
        store.set(PINS_KEY, "[]").unwrap();
        store.set_read_only(true);

        let mut pins = PinSet::new();
        pins.create(LatLng::new(1.0, 2.0), "Box");
        let err = save_snapshot(&mut store, PINS_KEY, &pins).unwrap_err();
        assert!(matches!(err, StorageError::Unavailable(_)));
        assert_eq!(store.raw(PINS_KEY).as_deref(), Some("[]"));
    }

    #[test]
    fn memory_store_clones_share_values() {
        let mut a = MemoryStore::new();
        let b = a.clone();
        a.set(CATEGORIES_KEY, "{}").unwrap();
        assert_eq!(b.get(CATEGORIES_KEY).unwrap().as_deref(), Some("{}"));
    }
}
