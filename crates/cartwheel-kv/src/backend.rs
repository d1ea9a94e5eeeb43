//! Storage backends for the key-value store.

use crate::KvError;
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

/// Raw byte-level storage behind [`crate::KvStore`].
///
/// Backends only move bytes; serialization lives in the typed wrapper.
pub trait Backend: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, KvError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), KvError>;

    /// Remove the value under `key`. Removing an absent key is not an error.
    fn delete_raw(&self, key: &str) -> Result<(), KvError>;

    /// Check whether a value exists under `key`.
    fn exists(&self, key: &str) -> Result<bool, KvError> {
        Ok(self.get_raw(key)?.is_some())
    }

    /// List all stored keys.
    fn keys(&self) -> Result<Vec<String>, KvError>;
}

impl<B: Backend + ?Sized> Backend for std::sync::Arc<B> {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        (**self).get_raw(key)
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        (**self).set_raw(key, value)
    }

    fn delete_raw(&self, key: &str) -> Result<(), KvError> {
        (**self).delete_raw(key)
    }

    fn exists(&self, key: &str) -> Result<bool, KvError> {
        (**self).exists(key)
    }

    fn keys(&self) -> Result<Vec<String>, KvError> {
        (**self).keys()
    }
}

/// In-memory backend for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Backend for MemoryBackend {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| KvError::StoreError(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| KvError::StoreError(e.to_string()))?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn delete_raw(&self, key: &str) -> Result<(), KvError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| KvError::StoreError(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, KvError> {
        let entries = self
            .entries
            .lock()
            .map_err(|e| KvError::StoreError(e.to_string()))?;
        Ok(entries.keys().cloned().collect())
    }
}

/// File-per-key backend rooted at a directory.
///
/// Each key maps to one file directly under the root; keys must not be
/// empty or contain path separators.
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Open (creating if needed) a file backend rooted at `root`.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, KvError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| KvError::OpenError(e.to_string()))?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, KvError> {
        if key.is_empty() || key.contains('/') || key.contains('\\') {
            return Err(KvError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(key))
    }
}

impl Backend for FileBackend {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>, KvError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(KvError::StoreError(e.to_string())),
        }
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<(), KvError> {
        let path = self.path_for(key)?;
        fs::write(&path, value).map_err(|e| KvError::StoreError(e.to_string()))
    }

    fn delete_raw(&self, key: &str) -> Result<(), KvError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(KvError::StoreError(e.to_string())),
        }
    }

    fn keys(&self) -> Result<Vec<String>, KvError> {
        let mut keys = Vec::new();
        let entries = fs::read_dir(&self.root).map_err(|e| KvError::StoreError(e.to_string()))?;
        for entry in entries {
            let entry = entry.map_err(|e| KvError::StoreError(e.to_string()))?;
            if let Some(name) = entry.file_name().to_str() {
                keys.push(name.to_string());
            }
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_roundtrip() {
        let backend = MemoryBackend::new();
        backend.set_raw("a", b"hello").unwrap();
        assert_eq!(backend.get_raw("a").unwrap(), Some(b"hello".to_vec()));
        assert!(backend.exists("a").unwrap());

        backend.delete_raw("a").unwrap();
        assert_eq!(backend.get_raw("a").unwrap(), None);
    }

    #[test]
    fn test_memory_delete_missing_is_ok() {
        let backend = MemoryBackend::new();
        backend.delete_raw("nope").unwrap();
    }

    #[test]
    fn test_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        backend.set_raw("cart:s1", b"{}").unwrap();
        assert_eq!(backend.get_raw("cart:s1").unwrap(), Some(b"{}".to_vec()));
        assert_eq!(backend.keys().unwrap(), vec!["cart:s1".to_string()]);

        backend.delete_raw("cart:s1").unwrap();
        assert_eq!(backend.get_raw("cart:s1").unwrap(), None);
    }

    #[test]
    fn test_file_rejects_path_separators() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        assert!(backend.set_raw("../escape", b"x").is_err());
        assert!(backend.get_raw("").is_err());
    }
}
