//! Error types for the kanban store

use thiserror::Error;

/// Result type for kanban operations
pub type Result<T> = std::result::Result<T, KanbanError>;

/// Errors that can occur in kanban operations
#[derive(Debug, Error)]
pub enum KanbanError {
    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: String },

    /// Column not found
    #[error("column not found: {id}")]
    ColumnNotFound { id: String },

    /// Board not found
    #[error("board not found: {id}")]
    BoardNotFound { id: String },

    /// The store was read or mutated before hydration completed
    #[error("store is still hydrating")]
    Hydrating,

    /// Storage backend could not be reached
    #[error("persistence unavailable: {message}")]
    PersistenceUnavailable { message: String },

    /// Referential integrity check failed
    #[error("invariant violation: {message}")]
    InvariantViolation { message: String },

    /// Configuration could not be loaded
    #[error("configuration error: {message}")]
    Config { message: String },

    /// Lock is held by another process
    #[error("lock busy - another save in progress")]
    LockBusy,

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl KanbanError {
    /// Create a persistence unavailable error
    pub fn persistence_unavailable(message: impl Into<String>) -> Self {
        Self::PersistenceUnavailable {
            message: message.into(),
        }
    }

    /// Create an invariant violation error
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error reports a missing task, column or board
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TaskNotFound { .. } | Self::ColumnNotFound { .. } | Self::BoardNotFound { .. }
        )
    }
}

impl From<figment::Error> for KanbanError {
    fn from(err: figment::Error) -> Self {
        Self::config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = KanbanError::TaskNotFound {
            id: "abc123".into(),
        };
        assert_eq!(err.to_string(), "task not found: abc123");
    }

    #[test]
    fn test_not_found_kind() {
        assert!(KanbanError::ColumnNotFound { id: "c".into() }.is_not_found());
        assert!(KanbanError::BoardNotFound { id: "b".into() }.is_not_found());
        assert!(!KanbanError::Hydrating.is_not_found());
        assert!(!KanbanError::persistence_unavailable("disk gone").is_not_found());
    }

    #[test]
    fn test_persistence_error_message() {
        let err = KanbanError::persistence_unavailable("permission denied");
        assert!(err.to_string().contains("permission denied"));
    }
}
