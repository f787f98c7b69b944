//! In-memory blob store for tests and embedding

use super::BlobStore;
use crate::error::{KanbanError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// Blobs held in a map. Can be flipped to "unavailable" to simulate a
/// backend that rejects every call.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, Vec<u8>>>,
    unavailable: AtomicBool,
    writes: AtomicUsize,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a blob already stored under `key`
    pub fn with_blob(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        let mut blobs = HashMap::new();
        blobs.insert(key.into(), value.into());
        Self {
            blobs: RwLock::new(blobs),
            ..Self::default()
        }
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of successful `put` calls
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Current blob under `key`, bypassing availability
    pub async fn peek(&self, key: &str) -> Option<Vec<u8>> {
        self.blobs.read().await.get(key).cloned()
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(KanbanError::persistence_unavailable(
                "memory backend marked unavailable",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.check_available()?;
        Ok(self.blobs.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        self.check_available()?;
        self.blobs
            .write()
            .await
            .insert(key.to_string(), value.to_vec());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get() {
        let store = MemoryBlobStore::new();
        store.put("k", b"v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some(b"v".to_vec()));
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_unavailable_rejects_calls() {
        let store = MemoryBlobStore::with_blob("k", "v");
        store.set_unavailable(true);

        assert!(matches!(
            store.get("k").await,
            Err(KanbanError::PersistenceUnavailable { .. })
        ));
        assert!(store.put("k", b"x").await.is_err());
        assert_eq!(store.peek("k").await, Some(b"v".to_vec()));
    }
}
