// Storage seam: a small key-value capability trait plus the two shipped
// backends. Domain modules only ever see the trait, so they can run against
// any substrate (browser-local storage in the original deployment, a JSON
// file or plain memory here).

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use dashmap::DashMap;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::warn;

// Keys are namespaced by prefix and versioned by suffix; schema changes are
// handled by bumping the suffix, never by migrating in place.
pub const STORAGE_PREFIX: &str = "cattery";
pub const STORAGE_VERSION: &str = "v2";

pub fn storage_key(name: &str) -> String {
    format!("{}.{}.{}", STORAGE_PREFIX, name, STORAGE_VERSION)
}

// Error types for storage backends. These never cross the domain API: reads
// degrade to defaults and writes report a bool, matching the fail-soft
// policy of the original client-side cache.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

// Capability interface for the storage substrate. No atomicity is guaranteed
// across keys; multi-key operations document their own write ordering.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    // Returns true if the value was durably stored, false otherwise. Callers
    // are allowed to ignore the result; fail-soft writes log and move on.
    fn set(&self, key: &str, value: &str) -> bool;

    fn remove(&self, key: &str);
}

// In-memory backend. Used by tests and the benchmark, and useful as a
// throwaway scratch ledger.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|v| v.value().clone())
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries.insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) {
        self.entries.remove(key);
    }
}

// File-backed store: one JSON object holding every key. The whole map is
// mirrored in memory and written back on each mutation; a lost flush leaves
// the in-memory value in place so a later write can repair the file.
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl FileStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(map) => map,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "malformed store file, starting empty");
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == ErrorKind::NotFound => HashMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    fn flush(&self) -> Result<(), StorageError> {
        let raw = serde_json::to_string(&*self.entries.read())?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());

        match self.flush() {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %key, error = %e, "store flush failed");
                false
            }
        }
    }

    fn remove(&self, key: &str) {
        self.entries.write().remove(key);
        if let Err(e) = self.flush() {
            warn!(key = %key, error = %e, "store flush failed");
        }
    }
}

// Typed helpers over the raw string store. Absent keys and malformed payloads
// both fall back to the empty/default shape; the caller never sees an error.

pub fn read_collection<T: DeserializeOwned>(store: &dyn KeyValueStore, name: &str) -> Vec<T> {
    let key = storage_key(name);
    let Some(raw) = store.get(&key) else {
        return Vec::new();
    };

    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            warn!(key = %key, error = %e, "malformed collection, falling back to empty");
            Vec::new()
        }
    }
}

pub fn write_collection<T: Serialize>(store: &dyn KeyValueStore, name: &str, items: &[T]) -> bool {
    let key = storage_key(name);
    match serde_json::to_string(items) {
        Ok(raw) => {
            let stored = store.set(&key, &raw);
            if !stored {
                warn!(key = %key, "collection write rejected by store");
            }
            stored
        }
        Err(e) => {
            warn!(key = %key, error = %e, "collection serialization failed");
            false
        }
    }
}

pub fn read_object<T: DeserializeOwned>(store: &dyn KeyValueStore, name: &str) -> Option<T> {
    let key = storage_key(name);
    let raw = store.get(&key)?;

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key = %key, error = %e, "malformed object, falling back to default");
            None
        }
    }
}

pub fn write_object<T: Serialize>(store: &dyn KeyValueStore, name: &str, value: &T) -> bool {
    let key = storage_key(name);
    match serde_json::to_string(value) {
        Ok(raw) => {
            let stored = store.set(&key, &raw);
            if !stored {
                warn!(key = %key, "object write rejected by store");
            }
            stored
        }
        Err(e) => {
            warn!(key = %key, error = %e, "object serialization failed");
            false
        }
    }
}
