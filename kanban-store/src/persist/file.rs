//! FileBlobStore - one JSON file per key in a directory

use super::BlobStore;
use crate::error::{KanbanError, Result};
use async_trait::async_trait;
use fs2::FileExt;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Blob store backed by `<root>/<key>.json` files
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    /// Directory holding the blobs
    root: PathBuf,
}

impl FileBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the blob for `key`
    pub fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    /// Path to the lock file
    pub fn lock_path(&self) -> PathBuf {
        self.root.join(".lock")
    }

    /// Try to acquire an exclusive save lock (non-blocking)
    pub async fn lock(&self) -> Result<SaveLock> {
        let lock_path = self.lock_path();

        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&lock_path)?;

        match file.try_lock_exclusive() {
            Ok(()) => Ok(SaveLock { file }),
            Err(_) => Err(KanbanError::LockBusy),
        }
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.blob_path(key);
        match fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        let _lock = self.lock().await?;
        atomic_write(&self.blob_path(key), value).await
    }
}

/// RAII lock guard - releases on drop
pub struct SaveLock {
    file: std::fs::File,
}

impl Drop for SaveLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}

/// Atomic write via temp file and rename
async fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).await?;

    // Rename (atomic on same filesystem)
    fs::rename(&temp_path, path).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileBlobStore) {
        let temp = TempDir::new().unwrap();
        let store = FileBlobStore::new(temp.path().join(".kanban"));
        (temp, store)
    }

    #[tokio::test]
    async fn test_paths() {
        let (temp, store) = setup();
        let root = temp.path().join(".kanban");

        assert_eq!(store.root(), root);
        assert_eq!(store.blob_path("kanban-storage"), root.join("kanban-storage.json"));
    }

    #[tokio::test]
    async fn test_missing_blob_reads_as_none() {
        let (_temp, store) = setup();
        assert_eq!(store.get("nothing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_creates_directory_and_overwrites() {
        let (_temp, store) = setup();

        store.put("k", b"first").await.unwrap();
        store.put("k", b"second").await.unwrap();

        assert_eq!(store.get("k").await.unwrap().as_deref(), Some(&b"second"[..]));
        assert!(!store.blob_path("k").with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_locking() {
        let (_temp, store) = setup();

        let lock1 = store.lock().await.unwrap();

        let result = store.lock().await;
        assert!(matches!(result, Err(KanbanError::LockBusy)));

        drop(lock1);
        let _lock2 = store.lock().await.unwrap();
    }
}
