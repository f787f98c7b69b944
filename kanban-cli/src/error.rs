//! CLI error type

use kanban_store::KanbanError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] KanbanError),

    #[error("no active board; pass a board or run `kanban board use <board>`")]
    NoActiveBoard,

    #[error("'{reference}' matches more than one {kind}; use the ID")]
    Ambiguous { kind: &'static str, reference: String },

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Store(e) if e.is_not_found() => 2,
            Self::NoActiveBoard | Self::Ambiguous { .. } => 2,
            _ => 1,
        }
    }
}
