//! Snapshot persistence.
//!
//! Every store service persists a full snapshot of its durable fields under
//! a fixed key after each mutation, last write wins. [`SnapshotStore`] is the
//! seam: [`MemoryStore`] for tests, [`FileStore`] for the CLI.
//!
//! Snapshots are wrapped in a `{ "state": ..., "version": 0 }` envelope, the
//! same layout the browser storefront keeps in local storage, so exported
//! entries can be dropped into a [`FileStore`] directory unchanged.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Envelope version written by this crate.
pub const SNAPSHOT_VERSION: u32 = 0;

/// Errors that can occur while loading or saving snapshots.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// Reading or writing the backing medium failed.
    #[error("snapshot I/O error for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot contents are not valid JSON for the expected shape.
    #[error("malformed snapshot {key}: {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Snapshot was written by an incompatible version.
    #[error("unsupported snapshot version {found} for {key}")]
    Version { key: String, found: u32 },

    /// A writer panicked while holding the in-memory lock.
    #[error("snapshot store lock poisoned")]
    Poisoned,
}

/// Raw key/value snapshot storage.
pub trait SnapshotStore {
    /// Read the snapshot stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Io` if the backing medium cannot be read.
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError>;

    /// Replace the snapshot stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Io` if the backing medium cannot be written.
    fn save(&self, key: &str, contents: &str) -> Result<(), SnapshotError>;

    /// Delete the snapshot stored under `key`. Missing keys are not an error.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Io` if the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), SnapshotError>;
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for &S {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, contents: &str) -> Result<(), SnapshotError> {
        (**self).save(key, contents)
    }

    fn remove(&self, key: &str) -> Result<(), SnapshotError> {
        (**self).remove(key)
    }
}

impl<S: SnapshotStore + ?Sized> SnapshotStore for Arc<S> {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, contents: &str) -> Result<(), SnapshotError> {
        (**self).save(key, contents)
    }

    fn remove(&self, key: &str) -> Result<(), SnapshotError> {
        (**self).remove(key)
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    state: &'a T,
    version: u32,
}

#[derive(Deserialize)]
struct Envelope<T> {
    state: T,
    version: u32,
}

/// Load and decode the state stored under `key`.
///
/// # Errors
///
/// Returns `SnapshotError::Json` if the entry does not decode into `T`, and
/// `SnapshotError::Version` if it was written by a newer envelope version.
pub fn load_state<T, S>(store: &S, key: &str) -> Result<Option<T>, SnapshotError>
where
    T: DeserializeOwned,
    S: SnapshotStore + ?Sized,
{
    let Some(raw) = store.load(key)? else {
        return Ok(None);
    };

    let envelope: Envelope<T> =
        serde_json::from_str(&raw).map_err(|source| SnapshotError::Json {
            key: key.to_owned(),
            source,
        })?;

    if envelope.version > SNAPSHOT_VERSION {
        return Err(SnapshotError::Version {
            key: key.to_owned(),
            found: envelope.version,
        });
    }

    Ok(Some(envelope.state))
}

/// Encode `state` and store it under `key`.
///
/// # Errors
///
/// Returns `SnapshotError::Json` if `state` cannot be serialized, or the
/// store's write error.
pub fn save_state<T, S>(store: &S, key: &str, state: &T) -> Result<(), SnapshotError>
where
    T: Serialize,
    S: SnapshotStore + ?Sized,
{
    let raw = serde_json::to_string(&EnvelopeRef {
        state,
        version: SNAPSHOT_VERSION,
    })
    .map_err(|source| SnapshotError::Json {
        key: key.to_owned(),
        source,
    })?;
    store.save(key, &raw)
}

// =============================================================================
// In-memory store
// =============================================================================

/// Shared in-memory snapshot map.
///
/// Clones share the same entries, so a test can hand one clone to a service
/// and inspect what it wrote through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw contents stored under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .ok()
            .and_then(|entries| entries.get(key).cloned())
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    /// Whether nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        let entries = self.entries.lock().map_err(|_| SnapshotError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, contents: &str) -> Result<(), SnapshotError> {
        let mut entries = self.entries.lock().map_err(|_| SnapshotError::Poisoned)?;
        entries.insert(key.to_owned(), contents.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SnapshotError> {
        let mut entries = self.entries.lock().map_err(|_| SnapshotError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// File store
// =============================================================================

/// One JSON file per key inside a directory.
///
/// Writes go to `<key>.json.tmp` first and are renamed into place, so a crash
/// mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a snapshot directory.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SnapshotError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| SnapshotError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Directory holding the snapshot files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SnapshotStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, SnapshotError> {
        match std::fs::read_to_string(self.path(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SnapshotError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }

    fn save(&self, key: &str, contents: &str) -> Result<(), SnapshotError> {
        let target = self.path(key);
        let tmp = target.with_extension("json.tmp");
        let io_err = |source| SnapshotError::Io {
            key: key.to_owned(),
            source,
        };
        std::fs::write(&tmp, contents).map_err(io_err)?;
        std::fs::rename(&tmp, &target).map_err(io_err)
    }

    fn remove(&self, key: &str) -> Result<(), SnapshotError> {
        match std::fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(SnapshotError::Io {
                key: key.to_owned(),
                source,
            }),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Counter {
        total_items: u32,
    }

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("nazsu-snapshot-{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(load_state::<Counter, _>(&store, "k").unwrap().is_none());

        save_state(&store, "k", &Counter { total_items: 4 }).unwrap();
        let loaded: Counter = load_state(&store, "k").unwrap().unwrap();
        assert_eq!(loaded, Counter { total_items: 4 });
    }

    #[test]
    fn test_envelope_layout() {
        let store = MemoryStore::new();
        save_state(&store, "nazsu-cart-storage", &Counter { total_items: 2 }).unwrap();
        assert_eq!(
            store.raw("nazsu-cart-storage").unwrap(),
            r#"{"state":{"totalItems":2},"version":0}"#
        );
    }

    #[test]
    fn test_clones_share_entries() {
        let a = MemoryStore::new();
        let b = a.clone();
        a.save("k", "v").unwrap();
        assert_eq!(b.load("k").unwrap().as_deref(), Some("v"));
        b.remove("k").unwrap();
        assert!(a.is_empty());
    }

    #[test]
    fn test_malformed_snapshot_is_an_error() {
        let store = MemoryStore::new();
        store.save("k", "{not json").unwrap();
        assert!(matches!(
            load_state::<Counter, _>(&store, "k"),
            Err(SnapshotError::Json { .. })
        ));
    }

    #[test]
    fn test_newer_version_is_rejected() {
        let store = MemoryStore::new();
        store
            .save("k", r#"{"state":{"totalItems":1},"version":3}"#)
            .unwrap();
        assert!(matches!(
            load_state::<Counter, _>(&store, "k"),
            Err(SnapshotError::Version { found: 3, .. })
        ));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = temp_dir();
        let store = FileStore::open(&dir).unwrap();

        assert!(store.load("nazsu-admin-storage").unwrap().is_none());
        save_state(&store, "nazsu-admin-storage", &Counter { total_items: 7 }).unwrap();
        assert!(dir.join("nazsu-admin-storage.json").exists());

        let reopened = FileStore::open(&dir).unwrap();
        let loaded: Counter = load_state(&reopened, "nazsu-admin-storage")
            .unwrap()
            .unwrap();
        assert_eq!(loaded.total_items, 7);

        reopened.remove("nazsu-admin-storage").unwrap();
        reopened.remove("nazsu-admin-storage").unwrap();
        assert!(reopened.load("nazsu-admin-storage").unwrap().is_none());

        std::fs::remove_dir_all(dir).unwrap();
    }
}
