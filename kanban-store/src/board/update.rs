//! UpdateBoard command

use crate::error::Result;
use crate::operation::{Applied, Mutate, Operation};
use crate::types::{BoardId, KanbanState};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rename a board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBoard {
    pub id: BoardId,
    pub title: String,
}

impl UpdateBoard {
    pub fn new(id: impl Into<BoardId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

impl Operation for UpdateBoard {
    fn verb(&self) -> &'static str {
        "update"
    }

    fn noun(&self) -> &'static str {
        "board"
    }
}

impl Mutate for UpdateBoard {
    type Output = ();

    fn apply(&self, state: &mut KanbanState) -> Result<Applied<()>> {
        let Some(board) = state.boards.get_mut(&self.id) else {
            debug!(board = %self.id, "rename skipped: board not found");
            return Ok(Applied::Unchanged(()));
        };
        if board.title == self.title {
            return Ok(Applied::Unchanged(()));
        }
        board.title = self.title.clone();
        Ok(Applied::Changed(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_board() {
        let mut state = KanbanState::seeded("Old", &["A"]);
        let id = state.active_board_id.clone().unwrap();

        assert!(UpdateBoard::new(id.clone(), "New")
            .apply(&mut state)
            .unwrap()
            .is_changed());
        assert_eq!(state.boards[&id].title, "New");
    }

    #[test]
    fn test_rename_missing_board_is_noop() {
        let mut state = KanbanState::new();
        assert!(!UpdateBoard::new("nope", "x")
            .apply(&mut state)
            .unwrap()
            .is_changed());
    }
}
