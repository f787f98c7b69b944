//! MoveColumn command

use crate::error::Result;
use crate::operation::{Applied, Mutate, Operation};
use crate::splice;
use crate::types::{BoardId, ColumnId, KanbanState};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reorder a column within its board (remove, then insert at the clamped
/// post-removal index)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveColumn {
    pub board_id: BoardId,
    /// The column being dragged
    pub column_id: ColumnId,
    pub target_index: usize,
}

impl MoveColumn {
    pub fn new(
        board_id: impl Into<BoardId>,
        column_id: impl Into<ColumnId>,
        target_index: usize,
    ) -> Self {
        Self {
            board_id: board_id.into(),
            column_id: column_id.into(),
            target_index,
        }
    }
}

impl Operation for MoveColumn {
    fn verb(&self) -> &'static str {
        "move"
    }

    fn noun(&self) -> &'static str {
        "column"
    }
}

impl Mutate for MoveColumn {
    type Output = ();

    fn apply(&self, state: &mut KanbanState) -> Result<Applied<()>> {
        let Some(board) = state.boards.get_mut(&self.board_id) else {
            debug!(board = %self.board_id, "move skipped: board not found");
            return Ok(Applied::Unchanged(()));
        };
        let Some(from) = board.position_of(&self.column_id) else {
            debug!(
                column = %self.column_id,
                board = %self.board_id,
                "move skipped: column not on board"
            );
            return Ok(Applied::Unchanged(()));
        };

        if splice::reorder(&mut board.column_ids, from, self.target_index) {
            Ok(Applied::Changed(()))
        } else {
            Ok(Applied::Unchanged(()))
        }
    }
}
