//! The host persistence boundary: raw string blobs under string keys.
//!
//! The application stores each state section as an independently keyed JSON
//! blob. Backends only move strings; all JSON handling lives in
//! [`JsonKvStorage`](crate::JsonKvStorage).

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::{StorageError, StorageResult};

/// A persistent key-value blob store.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    fn put(&self, key: &str, value: &str) -> StorageResult<()>;

    fn delete(&self, key: &str) -> StorageResult<()>;
}

/// Volatile key-value backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct InMemoryKv {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryKv {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKv {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let guard = self
            .entries
            .read()
            .map_err(|_| StorageError::Backend("kv lock poisoned".to_string()))?;
        Ok(guard.get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| StorageError::Backend("kv lock poisoned".to_string()))?;
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let mut guard = self
            .entries
            .write()
            .map_err(|_| StorageError::Backend("kv lock poisoned".to_string()))?;
        guard.remove(key);
        Ok(())
    }
}

/// File-backed key-value store: one `<key>.json` file per key under a
/// directory.
pub struct FileKv {
    dir: PathBuf,
}

impl FileKv {
    /// Open (and create if needed) a key-value directory.
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| StorageError::Unavailable(format!("create {}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileKv {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Unavailable(format!("read {key}: {e}"))),
        }
    }

    fn put(&self, key: &str, value: &str) -> StorageResult<()> {
        std::fs::write(self.path_for(key), value)
            .map_err(|e| StorageError::Unavailable(format!("write {key}: {e}")))
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Unavailable(format!("delete {key}: {e}"))),
        }
    }
}
