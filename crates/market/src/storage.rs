//! Key-value storage adapter.
//!
//! Every piece of marketplace state lives under a fixed string key as a JSON
//! document. The [`Storage`] adapter gives typed access on top of a raw
//! [`KeyValueStore`] backend:
//!
//! - `read(key, fallback)` parses the stored value, falling back when the key
//!   is absent, holds `null`, or fails to parse. Failures are never surfaced.
//! - `read_seq(key)` parses a stored sequence element by element, so one bad
//!   record only drops itself.
//! - `write(key, value)` serializes and persists, logging backend failures.
//!
//! There is no caching layer: every read goes to the backend and re-parses.
//!
//! # Backends
//!
//! - [`MemoryStore`] - in-process map, used by tests and throwaway sessions
//! - [`FileStore`] - one `<key>.json` file per key under a data directory

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, error};

/// Errors raised by storage backends.
///
/// These never reach the user; the adapter logs them and degrades.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Key cannot be mapped onto the backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// A raw string key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Get the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

// =============================================================================
// Typed Adapter
// =============================================================================

/// Typed, fault-tolerant access to a [`KeyValueStore`].
///
/// Cheaply cloneable; clones share the same backend.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

impl Storage {
    /// Create a storage adapter over a backend.
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// Create a storage adapter over a fresh [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Read and parse the value under `key`, or return `fallback`.
    ///
    /// Absent keys, `null` values and unparseable documents all yield
    /// `fallback`.
    pub fn read<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return fallback,
            Err(e) => {
                debug!(key, error = %e, "Storage read failed, using fallback");
                return fallback;
            }
        };

        match serde_json::from_str::<Option<T>>(&raw) {
            Ok(Some(value)) => value,
            Ok(None) => fallback,
            Err(e) => {
                debug!(key, error = %e, "Malformed stored value, using fallback");
                fallback
            }
        }
    }

    /// Serialize `value` and store it under `key`.
    ///
    /// Failures are logged and otherwise ignored.
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let result = serde_json::to_string(value)
            .map_err(StorageError::from)
            .and_then(|raw| self.backend.set(key, &raw));

        if let Err(e) = result {
            error!(key, error = %e, "Failed to persist value");
        }
    }

    /// Read a stored sequence, skipping elements that fail to parse.
    ///
    /// A document that is not a sequence at all yields an empty `Vec`.
    #[must_use]
    pub fn read_seq<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        self.read::<Vec<serde_json::Value>>(key, Vec::new())
            .into_iter()
            .enumerate()
            .filter_map(|(index, item)| {
                serde_json::from_value(item)
                    .inspect_err(|e| debug!(key, index, error = %e, "Skipping malformed element"))
                    .ok()
            })
            .collect()
    }

    /// Number of elements in a stored sequence, whether or not they parse.
    #[must_use]
    pub fn stored_len(&self, key: &str) -> usize {
        self.read::<Vec<serde_json::Value>>(key, Vec::new()).len()
    }
}

// =============================================================================
// Memory Backend
// =============================================================================

/// In-memory backend.
///
/// Counts mutating calls so tests can assert that an operation wrote nothing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `set` calls so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw value under `key`, bypassing parsing.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.lock().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

// =============================================================================
// File Backend
// =============================================================================

/// Filesystem backend.
///
/// Stores each key as a file in a flat directory:
/// ```text
/// {base_path}/
///   craftify.users.json
///   craftify.listings.json
///   ...
/// ```
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    /// Create a new file store.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn new(base_path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let base_path = base_path.as_ref().to_path_buf();
        std::fs::create_dir_all(&base_path)?;
        Ok(Self { base_path })
    }

    /// Get the file path for a given key.
    fn path_for_key(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
            && !key.starts_with('.');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(self.base_path.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for_key(key)?;
        match std::fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for_key(key)?;

        // Write atomically using temp file + rename
        let temp_path = path.with_extension("json.tmp");
        std::fs::write(&temp_path, value)?;
        std::fs::rename(&temp_path, &path)?;

        debug!(key, size = value.len(), "Stored value");
        Ok(())
    }
}
