//! Blob storage behind the generated-card filenames.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("blob not found: {0}")]
    NotFound(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Persist named blobs and resolve browser-facing URLs for them.
pub trait BlobStore: Send + Sync {
    fn put(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError>;
    fn get(&self, name: &str) -> Result<Vec<u8>, StorageError>;
    /// Browser-accessible URL for a stored blob.
    fn url_for(&self, name: &str) -> String;
}

/// Flat-directory store backing `GET /uploads/{filename}`.
///
/// Writes are plain `fs::write`; a crash mid-write can leave a partial
/// file. Nothing is ever cleaned up.
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    /// Open the store, creating the directory if absent.
    pub fn new(root: PathBuf) -> Result<Self, StorageError> {
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }
}

impl BlobStore for FsStore {
    fn put(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        std::fs::write(self.root.join(name), bytes)?;
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.root.join(name);
        if !path.is_file() {
            return Err(StorageError::NotFound(name.to_string()));
        }
        Ok(std::fs::read(path)?)
    }

    fn url_for(&self, name: &str) -> String {
        format!("/uploads/{name}")
    }
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blobs.lock().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>>, StorageError> {
        self.blobs
            .lock()
            .map_err(|_| StorageError::Io(std::io::Error::other("store lock poisoned")))
    }
}

impl BlobStore for MemoryStore {
    fn put(&self, name: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.locked()?.insert(name.to_string(), bytes.to_vec());
        Ok(())
    }

    fn get(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        self.locked()?
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    fn url_for(&self, name: &str) -> String {
        format!("/uploads/{name}")
    }
}
