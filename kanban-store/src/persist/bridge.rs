//! PersistenceBridge - load/save the whole state under one key

use super::BlobStore;
use crate::error::{KanbanError, Result};
use crate::types::KanbanState;
use std::sync::Arc;
use tracing::{debug, trace};

/// Storage key used when none is configured
pub const DEFAULT_STORAGE_KEY: &str = "kanban-storage";

/// Serialize a state to its persisted JSON form
pub fn encode(state: &KanbanState) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(state)?)
}

/// Parse a persisted blob back into a state
pub fn decode(bytes: &[u8]) -> Result<KanbanState> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Connects the store to a [`BlobStore`] under a fixed key
#[derive(Clone)]
pub struct PersistenceBridge {
    backend: Arc<dyn BlobStore>,
    key: String,
}

impl PersistenceBridge {
    pub fn new(backend: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    /// Bridge using [`DEFAULT_STORAGE_KEY`]
    pub fn with_default_key(backend: Arc<dyn BlobStore>) -> Self {
        Self::new(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the saved state.
    ///
    /// `Ok(None)` means nothing was ever saved. Backend failures become
    /// `PersistenceUnavailable`; an unparseable blob is a `Json` error.
    pub async fn load(&self) -> Result<Option<KanbanState>> {
        let bytes = self
            .backend
            .get(&self.key)
            .await
            .map_err(into_unavailable)?;

        match bytes {
            Some(bytes) => {
                trace!(key = %self.key, bytes = bytes.len(), "loaded blob");
                decode(&bytes).map(Some)
            }
            None => {
                debug!(key = %self.key, "no saved state");
                Ok(None)
            }
        }
    }

    /// Write the state, replacing whatever was saved before
    pub async fn save(&self, state: &KanbanState) -> Result<()> {
        let bytes = encode(state)?;
        self.backend
            .put(&self.key, &bytes)
            .await
            .map_err(into_unavailable)?;
        trace!(key = %self.key, bytes = bytes.len(), "saved blob");
        Ok(())
    }
}

impl std::fmt::Debug for PersistenceBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceBridge")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

fn into_unavailable(err: KanbanError) -> KanbanError {
    match err {
        KanbanError::PersistenceUnavailable { .. } => err,
        other => KanbanError::persistence_unavailable(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persist::MemoryBlobStore;
    use crate::task::AddTask;
    use crate::types::{Priority, TaskId};
    use crate::Mutate;

    fn sample_state() -> KanbanState {
        let mut state = KanbanState::seeded("Persisted", &["A", "B"]);
        let column = state.active_board().unwrap().column_ids[0].clone();
        AddTask::new(column, "remember me")
            .with_description("across restarts")
            .apply(&mut state)
            .unwrap();
        state
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let state = sample_state();
        let decoded = decode(&encode(&state).unwrap()).unwrap();
        assert_eq!(decoded, state);
    }

    #[test]
    fn test_decode_external_blob() {
        let blob = r#"{
            "tasks": {"t1": {"id": "t1", "title": "Hello", "description": "", "priority": "High", "dueDate": "2024-05-01"}},
            "columns": {"c1": {"id": "c1", "title": "Todo", "taskIds": ["t1"]}},
            "boards": {"b1": {"id": "b1", "title": "Main", "columnIds": ["c1"]}},
            "activeBoardId": "b1"
        }"#;

        let state = decode(blob.as_bytes()).unwrap();
        state.verify().unwrap();
        assert_eq!(state.active_board().unwrap().title, "Main");
        let task = state.tasks_in(&"c1".into())[0];
        assert_eq!(task.title, "Hello");
        assert_eq!(task.priority, Priority::High);
    }

    #[test]
    fn test_decode_mixed_priority_casing() {
        let blob = r#"{
            "tasks": {
                "t1": {"id": "t1", "title": "One", "description": "", "priority": "Low", "dueDate": "2024-05-01"},
                "t2": {"id": "t2", "title": "Two", "description": "", "priority": "medium", "dueDate": "2024-05-02"}
            },
            "columns": {"c1": {"id": "c1", "title": "Todo", "taskIds": ["t1", "t2"]}},
            "boards": {"b1": {"id": "b1", "title": "Main", "columnIds": ["c1"]}},
            "activeBoardId": "b1"
        }"#;

        let state = decode(blob.as_bytes()).unwrap();
        assert_eq!(state.tasks[&TaskId::from("t1")].priority, Priority::Low);
        assert_eq!(state.tasks[&TaskId::from("t2")].priority, Priority::Medium);

        let reencoded: serde_json::Value = serde_json::from_slice(&encode(&state).unwrap()).unwrap();
        assert_eq!(reencoded["tasks"]["t2"]["priority"], "Medium");
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let backend = Arc::new(MemoryBlobStore::new());
        let bridge = PersistenceBridge::with_default_key(backend.clone());
        let state = sample_state();

        bridge.save(&state).await.unwrap();

        assert!(backend.peek(DEFAULT_STORAGE_KEY).await.is_some());
        assert_eq!(bridge.load().await.unwrap(), Some(state));
    }

    #[tokio::test]
    async fn test_load_nothing_saved() {
        let bridge = PersistenceBridge::new(Arc::new(MemoryBlobStore::new()), "empty");
        assert_eq!(bridge.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_unavailable_backend() {
        let backend = Arc::new(MemoryBlobStore::new());
        backend.set_unavailable(true);
        let bridge = PersistenceBridge::with_default_key(backend);

        assert!(matches!(
            bridge.load().await,
            Err(KanbanError::PersistenceUnavailable { .. })
        ));
        assert!(matches!(
            bridge.save(&KanbanState::new()).await,
            Err(KanbanError::PersistenceUnavailable { .. })
        ));
    }

    #[tokio::test]
    async fn test_corrupt_blob_is_json_error() {
        let backend = Arc::new(MemoryBlobStore::with_blob(DEFAULT_STORAGE_KEY, "{not json"));
        let bridge = PersistenceBridge::with_default_key(backend);
        assert!(matches!(bridge.load().await, Err(KanbanError::Json(_))));
    }
}
