//! DeleteBoard command

use crate::column::remove_column;
use crate::error::Result;
use crate::operation::{Applied, Mutate, Operation};
use crate::types::{BoardId, KanbanState};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Delete a board, its columns and their tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteBoard {
    pub id: BoardId,
}

impl DeleteBoard {
    pub fn new(id: impl Into<BoardId>) -> Self {
        Self { id: id.into() }
    }
}

impl Operation for DeleteBoard {
    fn verb(&self) -> &'static str {
        "delete"
    }

    fn noun(&self) -> &'static str {
        "board"
    }
}

impl Mutate for DeleteBoard {
    type Output = ();

    fn apply(&self, state: &mut KanbanState) -> Result<Applied<()>> {
        let Some(board) = state.boards.get(&self.id) else {
            debug!(board = %self.id, "delete skipped: board not found");
            return Ok(Applied::Unchanged(()));
        };

        for column_id in board.column_ids.clone() {
            remove_column(state, &column_id);
        }
        state.boards.shift_remove(&self.id);
        if state.active_board_id.as_ref() == Some(&self.id) {
            state.active_board_id = None;
        }
        Ok(Applied::Changed(()))
    }
}
