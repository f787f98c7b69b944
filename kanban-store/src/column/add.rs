//! AddColumn command

use crate::error::{KanbanError, Result};
use crate::operation::{Applied, Mutate, Operation};
use crate::types::{BoardId, Column, ColumnId, KanbanState};
use serde::{Deserialize, Serialize};

/// Append a new column to the end of a board
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddColumn {
    pub board_id: BoardId,
    /// The column display title
    pub title: String,
}

impl AddColumn {
    /// Create a new AddColumn command
    pub fn new(board_id: impl Into<BoardId>, title: impl Into<String>) -> Self {
        Self {
            board_id: board_id.into(),
            title: title.into(),
        }
    }
}

impl Operation for AddColumn {
    fn verb(&self) -> &'static str {
        "add"
    }

    fn noun(&self) -> &'static str {
        "column"
    }
}

impl Mutate for AddColumn {
    type Output = ColumnId;

    fn apply(&self, state: &mut KanbanState) -> Result<Applied<ColumnId>> {
        let board = state
            .boards
            .get_mut(&self.board_id)
            .ok_or_else(|| KanbanError::BoardNotFound {
                id: self.board_id.to_string(),
            })?;

        let column = Column::new(self.title.clone());
        let id = column.id.clone();
        board.column_ids.push(id.clone());
        state.columns.insert(id.clone(), column);
        Ok(Applied::Changed(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (KanbanState, BoardId) {
        let state = KanbanState::seeded("Test", &["To Do", "Done"]);
        let board = state.active_board_id.clone().unwrap();
        (state, board)
    }

    #[test]
    fn test_add_column_appends() {
        let (mut state, board) = setup();

        let id = AddColumn::new(board.clone(), "Blocked")
            .apply(&mut state)
            .unwrap()
            .into_inner();

        assert_eq!(state.boards[&board].column_ids.last(), Some(&id));
        assert_eq!(state.columns[&id].title, "Blocked");
        assert!(state.columns[&id].task_ids.is_empty());
        state.verify().unwrap();
    }

    #[test]
    fn test_add_column_missing_board() {
        let (mut state, _) = setup();
        let before = state.clone();

        let result = AddColumn::new("nope", "Orphan").apply(&mut state);

        assert!(matches!(result, Err(KanbanError::BoardNotFound { .. })));
        assert_eq!(state, before);
    }
}
