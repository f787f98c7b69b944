//! AddBoard command

use crate::error::Result;
use crate::operation::{Applied, Mutate, Operation};
use crate::types::{Board, BoardId, Column, KanbanState, DEFAULT_COLUMN_TITLES};
use serde::{Deserialize, Serialize};

/// Create a board with its initial columns.
///
/// The new board becomes active when no existing board is active.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddBoard {
    pub title: String,
    /// Initial column titles, left to right
    pub columns: Vec<String>,
}

impl AddBoard {
    /// Create a board with the default To Do / In Progress / Done columns
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            columns: DEFAULT_COLUMN_TITLES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Replace the initial columns
    pub fn with_columns<S: Into<String>>(mut self, columns: impl IntoIterator<Item = S>) -> Self {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }
}

impl Operation for AddBoard {
    fn verb(&self) -> &'static str {
        "add"
    }

    fn noun(&self) -> &'static str {
        "board"
    }
}

impl Mutate for AddBoard {
    type Output = BoardId;

    fn apply(&self, state: &mut KanbanState) -> Result<Applied<BoardId>> {
        let mut board = Board::new(self.title.clone());
        for title in &self.columns {
            let column = Column::new(title.clone());
            board.column_ids.push(column.id.clone());
            state.columns.insert(column.id.clone(), column);
        }

        let id = board.id.clone();
        state.boards.insert(id.clone(), board);
        if state.active_board().is_none() {
            state.active_board_id = Some(id.clone());
        }
        Ok(Applied::Changed(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_first_board_becomes_active() {
        let mut state = KanbanState::new();

        let id = AddBoard::new("Project")
            .apply(&mut state)
            .unwrap()
            .into_inner();

        assert_eq!(state.active_board_id.as_ref(), Some(&id));
        let titles: Vec<_> = state
            .columns_in(&id)
            .iter()
            .map(|c| c.title.clone())
            .collect();
        assert_eq!(titles, vec!["To Do", "In Progress", "Done"]);
        state.verify().unwrap();
    }

    #[test]
    fn test_add_second_board_keeps_active() {
        let mut state = KanbanState::seeded("First", &["A"]);
        let first = state.active_board_id.clone();

        let second = AddBoard::new("Second")
            .with_columns(["Only"])
            .apply(&mut state)
            .unwrap()
            .into_inner();

        assert_eq!(state.active_board_id, first);
        assert_eq!(state.boards[&second].column_ids.len(), 1);
        state.verify().unwrap();
    }
}
