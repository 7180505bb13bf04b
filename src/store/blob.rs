//! Key-value blob persistence

use crate::error::{ContactsError, ContactsResult};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Whole-value persistence keyed by name. A missing key is not an error.
pub trait BlobStore: Send + Sync {
    fn read(&self, key: &str) -> ContactsResult<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> ContactsResult<()>;
}

/// Stores each key as `<dir>/<key>.yaml`
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path for a key; keys are restricted to `[A-Za-z0-9_-]`
    pub fn path_for(&self, key: &str) -> ContactsResult<PathBuf> {
        let safe = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !safe {
            return Err(ContactsError::Validation(format!(
                "Invalid storage key: '{}'",
                key
            )));
        }
        Ok(self.dir.join(format!("{}.yaml", key)))
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> ContactsResult<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    /// Writes to a sibling temp file then renames, so readers never see a
    /// half-written snapshot.
    fn write(&mut self, key: &str, value: &str) -> ContactsResult<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp_path = path.with_extension("yaml.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }
}

/// In-memory store. Clones share the same map, so a test can keep a handle
/// and inspect what was written.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: Arc<Mutex<HashMap<String, String>>>,
    fail_writes: bool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value before handing the store to a `ContactStore`
    pub fn with_blob(self, key: &str, value: &str) -> Self {
        self.lock().insert(key.to_string(), value.to_string());
        self
    }

    /// Make every subsequent write fail with an IO error
    pub fn failing(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        // A poisoned map is still a valid map
        self.blobs.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> ContactsResult<Option<String>> {
        Ok(self.get(key))
    }

    fn write(&mut self, key: &str, value: &str) -> ContactsResult<()> {
        if self.fail_writes {
            return Err(ContactsError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "write disabled",
            )));
        }
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_missing_key_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileBlobStore::new(dir.path());
        assert!(store.read("contacts").unwrap().is_none());
    }

    #[test]
    fn test_file_store_write_then_read() {
        let dir = TempDir::new().unwrap();
        let mut store = FileBlobStore::new(dir.path().join("nested"));
        store.write("contacts", "- a\n").unwrap();

        assert_eq!(store.read("contacts").unwrap().as_deref(), Some("- a\n"));
        assert!(dir.path().join("nested/contacts.yaml").exists());
        assert!(!dir.path().join("nested/contacts.yaml.tmp").exists());
    }

    #[test]
    fn test_file_store_rejects_unsafe_keys() {
        let store = FileBlobStore::new("/tmp");
        assert!(store.path_for("../etc/passwd").is_err());
        assert!(store.path_for("").is_err());
        assert!(store.path_for("contacts_v1").is_ok());
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let handle = MemoryBlobStore::new();
        let mut store = handle.clone();
        store.write("k", "v").unwrap();
        assert_eq!(handle.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_memory_store_failing_writes() {
        let mut store = MemoryBlobStore::new().failing();
        assert!(store.write("k", "v").is_err());
        assert!(store.get("k").is_none());
    }
}
