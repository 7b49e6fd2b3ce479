//! Key-value capability contract and in-memory implementation.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Mutex;

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage-level failure for a key-value operation.
#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    /// Cache file was stamped by a newer build.
    SchemaTooNew { found: u32, supported: u32 },
    /// Backing storage cannot be used (poisoned lock, quota, missing device).
    Unavailable(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "cache schema version {found} is newer than supported {supported}"
            ),
            Self::Unavailable(message) => write!(f, "key-value storage unavailable: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::SchemaTooNew { .. } | Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Flat string key-value storage scoped to one device.
///
/// Each call is atomic per key. `set_raw` is last-write-wins.
pub trait KeyValueStore {
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>>;
    fn set_raw(&self, key: &str, value: &str) -> StoreResult<()>;
    /// Removes `key`; removing a missing key is not an error.
    fn delete(&self, key: &str) -> StoreResult<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_raw(key, value)
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        (**self).delete(key)
    }
}

/// Process-local store for tests and non-client environments.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn with_entries<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, String>) -> T,
    ) -> StoreResult<T> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".to_string()))?;
        Ok(f(&mut entries))
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        self.with_entries(|entries| entries.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        self.with_entries(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn delete(&self, key: &str) -> StoreResult<()> {
        self.with_entries(|entries| {
            entries.remove(key);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStore, MemoryKeyValueStore};

    #[test]
    fn set_is_last_write_wins() {
        let store = MemoryKeyValueStore::new();
        store.set_raw("k", "1").unwrap();
        store.set_raw("k", "2").unwrap();

        assert_eq!(store.get_raw("k").unwrap().as_deref(), Some("2"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_missing_key_is_ok() {
        let store = MemoryKeyValueStore::new();
        store.delete("never-written").unwrap();
        assert!(store.is_empty());
    }

    fn write_through<S: KeyValueStore>(store: S) {
        store.set_raw("k", "v").unwrap();
    }

    #[test]
    fn borrowed_store_delegates() {
        let store = MemoryKeyValueStore::new();
        write_through(&store);

        assert_eq!(store.get_raw("k").unwrap().as_deref(), Some("v"));
    }
}
