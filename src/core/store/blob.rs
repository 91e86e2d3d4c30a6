//! Key/value blob storage
//!
//! The inventory persists as a single string blob per key. [`BlobStore`] abstracts where
//! blobs live so the store manager can run against files on disk or an in-memory map.

use crate::config::schema::{StorageBackend, StorageConfig};
use crate::domain::errors::StorageError;
use crate::domain::Result;
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Storage backend for string blobs keyed by name
///
/// Implementations must report [`StorageError::ReadFailed`] / [`StorageError::WriteFailed`]
/// rather than exposing backend-specific errors.
pub trait BlobStore: Send {
    /// Reads a blob; `Ok(None)` when the key is absent
    ///
    /// # Errors
    ///
    /// Returns an error if the key exists but cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a blob, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Deletes a blob; removing an absent key is not an error
    ///
    /// # Errors
    ///
    /// Returns an error if the key exists but cannot be removed.
    fn remove(&mut self, key: &str) -> Result<()>;

    /// Combined size in bytes of every blob held, as measured by the backend
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be inspected.
    fn total_bytes(&self) -> Result<usize>;
}

/// Bytes a key/value pair occupies in the quota: UTF-8 length of key plus value
pub fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

/// Process-local blob store
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    entries: BTreeMap<String, String>,
}

impl MemoryBlobStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `entries`
    pub fn with_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Whether `key` is present
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn total_bytes(&self) -> Result<usize> {
        Ok(self
            .entries
            .iter()
            .map(|(key, value)| entry_size(key, value))
            .sum())
    }
}

/// Blob store backed by one `<key>.json` file per key
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Opens (creating if needed) a store rooted at `dir`
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| StorageError::WriteFailed {
            key: dir.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { dir })
    }

    /// Directory holding the blobs
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::ReadFailed {
                key: key.to_string(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        let staging = self.dir.join(format!(".{key}.json.tmp"));
        let write_failed = |e: std::io::Error| StorageError::WriteFailed {
            key: key.to_string(),
            message: e.to_string(),
        };

        // Write-then-rename keeps the previous blob intact if the write fails
        fs::write(&staging, value).map_err(write_failed)?;
        fs::rename(&staging, &path).map_err(write_failed)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::WriteFailed {
                key: key.to_string(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    fn total_bytes(&self) -> Result<usize> {
        let read_failed = |e: std::io::Error| StorageError::ReadFailed {
            key: self.dir.display().to_string(),
            message: e.to_string(),
        };

        let mut total = 0;
        for entry in fs::read_dir(&self.dir).map_err(read_failed)? {
            let entry = entry.map_err(read_failed)?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                let key = path
                    .file_stem()
                    .map(|stem| stem.to_string_lossy().into_owned())
                    .unwrap_or_default();
                let value = fs::read_to_string(&path).map_err(read_failed)?;
                total += entry_size(&key, &value);
            }
        }
        Ok(total)
    }
}

/// Creates the blob store selected by the configuration
///
/// # Errors
///
/// Returns an error if the file backend's directory cannot be created.
pub fn create_blob_store(config: &StorageConfig) -> Result<Box<dyn BlobStore>> {
    match config.backend {
        StorageBackend::File => {
            tracing::debug!(data_dir = %config.data_dir.display(), "Opening file blob store");
            Ok(Box::new(FileBlobStore::open(&config.data_dir)?))
        }
        StorageBackend::Memory => {
            tracing::debug!("Opening in-memory blob store");
            Ok(Box::new(MemoryBlobStore::new()))
        }
    }
}
