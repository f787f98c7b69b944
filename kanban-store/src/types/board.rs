//! Board-level types: Board, Column

use super::ids::{BoardId, ColumnId, TaskId};
use serde::{Deserialize, Serialize};

/// Column titles used when a board is created without explicit columns
pub const DEFAULT_COLUMN_TITLES: [&str; 3] = ["To Do", "In Progress", "Done"];

/// The kanban board: a title and the ordered column sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    #[serde(default)]
    pub column_ids: Vec<ColumnId>,
}

impl Board {
    /// Create a new empty board with the given title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: BoardId::new(),
            title: title.into(),
            column_ids: Vec::new(),
        }
    }

    /// Index of a column in this board's display order
    pub fn position_of(&self, column_id: &ColumnId) -> Option<usize> {
        self.column_ids.iter().position(|id| id == column_id)
    }
}

/// A column defines a workflow stage and owns the order of its tasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: ColumnId,
    pub title: String,
    #[serde(default)]
    pub task_ids: Vec<TaskId>,
}

impl Column {
    /// Create a new empty column
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: ColumnId::new(),
            title: title.into(),
            task_ids: Vec::new(),
        }
    }

    /// Index of a task in this column's display order
    pub fn position_of(&self, task_id: &TaskId) -> Option<usize> {
        self.task_ids.iter().position(|id| id == task_id)
    }

    pub fn contains(&self, task_id: &TaskId) -> bool {
        self.task_ids.contains(task_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_creation() {
        let board = Board::new("Roadmap");
        assert_eq!(board.title, "Roadmap");
        assert!(board.column_ids.is_empty());
        assert_eq!(board.id.as_str().len(), 26);
    }

    #[test]
    fn test_column_serialization_uses_camel_case() {
        let mut column = Column::new("Doing");
        column.task_ids.push(TaskId::from_string("t1"));
        let json = serde_json::to_value(&column).unwrap();

        assert_eq!(json["taskIds"][0], "t1");
        assert_eq!(json["title"], "Doing");
    }

    #[test]
    fn test_position_of() {
        let mut column = Column::new("Doing");
        column.task_ids = vec!["a".into(), "b".into()];
        assert_eq!(column.position_of(&"b".into()), Some(1));
        assert_eq!(column.position_of(&"z".into()), None);
    }
}
