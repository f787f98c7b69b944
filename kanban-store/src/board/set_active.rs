//! SetActiveBoard command

use crate::error::{KanbanError, Result};
use crate::operation::{Applied, Mutate, Operation};
use crate::types::{BoardId, KanbanState};
use serde::{Deserialize, Serialize};

/// Choose the board the view layer displays, or none
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetActiveBoard {
    pub id: Option<BoardId>,
}

impl SetActiveBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self {
            id: Some(id.into()),
        }
    }

    /// Clear the active board
    pub fn none() -> Self {
        Self { id: None }
    }
}

impl Operation for SetActiveBoard {
    fn verb(&self) -> &'static str {
        "activate"
    }

    fn noun(&self) -> &'static str {
        "board"
    }
}

impl Mutate for SetActiveBoard {
    type Output = ();

    fn apply(&self, state: &mut KanbanState) -> Result<Applied<()>> {
        if let Some(id) = &self.id {
            if !state.boards.contains_key(id) {
                return Err(KanbanError::BoardNotFound { id: id.to_string() });
            }
        }
        if state.active_board_id == self.id {
            return Ok(Applied::Unchanged(()));
        }
        state.active_board_id = self.id.clone();
        Ok(Applied::Changed(()))
    }
}
