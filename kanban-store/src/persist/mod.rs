//! Persistence of the normalized store to a key-value blob backend.
//!
//! The whole [`KanbanState`](crate::types::KanbanState) is written as one
//! JSON blob under a single key:
//!
//! ```text
//! { "tasks": {id: Task}, "columns": {id: Column}, "boards": {id: Board}, "activeBoardId": id|null }
//! ```

mod bridge;
mod file;
mod memory;

pub use bridge::{decode, encode, PersistenceBridge, DEFAULT_STORAGE_KEY};
pub use file::{FileBlobStore, SaveLock};
pub use memory::MemoryBlobStore;

use crate::error::Result;
use async_trait::async_trait;

/// A key-value store of opaque blobs
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Read the blob under `key`; `None` if nothing was ever saved
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Replace the blob under `key`
    async fn put(&self, key: &str, value: &[u8]) -> Result<()>;
}
