//! The normalized store: flat entity maps joined by ID sequences.

use super::board::{Board, Column};
use super::ids::{BoardId, ColumnId, TaskId};
use super::task::Task;
use crate::error::{KanbanError, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Every board, column and task, keyed by ID, plus the active board.
///
/// This is exactly the persisted shape. Transient UI state (drag progress,
/// hydration status) lives in the store container, never here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KanbanState {
    #[serde(default)]
    pub tasks: IndexMap<TaskId, Task>,
    #[serde(default)]
    pub columns: IndexMap<ColumnId, Column>,
    #[serde(default)]
    pub boards: IndexMap<BoardId, Board>,
    #[serde(default)]
    pub active_board_id: Option<BoardId>,
}

impl KanbanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A state holding one active board with the given columns
    pub fn seeded<S: AsRef<str>>(board_title: &str, column_titles: &[S]) -> Self {
        let mut state = Self::new();
        let mut board = Board::new(board_title);
        for title in column_titles {
            let column = Column::new(title.as_ref());
            board.column_ids.push(column.id.clone());
            state.columns.insert(column.id.clone(), column);
        }
        state.active_board_id = Some(board.id.clone());
        state.boards.insert(board.id.clone(), board);
        state
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The active board. A dangling `active_board_id` reads as no board.
    pub fn active_board(&self) -> Option<&Board> {
        self.active_board_id
            .as_ref()
            .and_then(|id| self.boards.get(id))
    }

    /// The column whose sequence contains `task_id`
    pub fn column_of(&self, task_id: &TaskId) -> Option<&Column> {
        self.columns.values().find(|c| c.contains(task_id))
    }

    /// The board whose sequence contains `column_id`
    pub fn board_of(&self, column_id: &ColumnId) -> Option<&Board> {
        self.boards
            .values()
            .find(|b| b.column_ids.contains(column_id))
    }

    /// Tasks of a column in display order
    pub fn tasks_in(&self, column_id: &ColumnId) -> Vec<&Task> {
        self.columns
            .get(column_id)
            .map(|c| c.task_ids.iter().filter_map(|id| self.tasks.get(id)).collect())
            .unwrap_or_default()
    }

    /// Columns of a board in display order
    pub fn columns_in(&self, board_id: &BoardId) -> Vec<&Column> {
        self.boards
            .get(board_id)
            .map(|b| {
                b.column_ids
                    .iter()
                    .filter_map(|id| self.columns.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of task references across all columns
    pub fn placed_task_count(&self) -> usize {
        self.columns.values().map(|c| c.task_ids.len()).sum()
    }

    /// Clear an `active_board_id` that points at no board. Returns true if it
    /// was cleared.
    pub fn clear_dangling_active(&mut self) -> bool {
        if self.active_board_id.is_some() && self.active_board().is_none() {
            self.active_board_id = None;
            return true;
        }
        false
    }

    // =========================================================================
    // Integrity
    // =========================================================================

    /// Check referential integrity across the three maps.
    ///
    /// Mutations keep these rules by construction; this is for tests and for
    /// state arriving from outside (persisted blobs).
    pub fn verify(&self) -> Result<()> {
        for (key, task) in &self.tasks {
            if key != &task.id {
                return Err(KanbanError::invariant(format!(
                    "task stored under '{}' has id '{}'",
                    key, task.id
                )));
            }
        }
        for (key, column) in &self.columns {
            if key != &column.id {
                return Err(KanbanError::invariant(format!(
                    "column stored under '{}' has id '{}'",
                    key, column.id
                )));
            }
        }
        for (key, board) in &self.boards {
            if key != &board.id {
                return Err(KanbanError::invariant(format!(
                    "board stored under '{}' has id '{}'",
                    key, board.id
                )));
            }
        }

        let mut task_refs: HashMap<&TaskId, usize> = HashMap::new();
        for column in self.columns.values() {
            for task_id in &column.task_ids {
                if !self.tasks.contains_key(task_id) {
                    return Err(KanbanError::invariant(format!(
                        "column '{}' references missing task '{}'",
                        column.id, task_id
                    )));
                }
                *task_refs.entry(task_id).or_default() += 1;
            }
        }
        for task_id in self.tasks.keys() {
            match task_refs.get(task_id).copied().unwrap_or(0) {
                1 => {}
                0 => {
                    return Err(KanbanError::invariant(format!(
                        "task '{}' is in no column",
                        task_id
                    )))
                }
                n => {
                    return Err(KanbanError::invariant(format!(
                        "task '{}' is referenced {} times",
                        task_id, n
                    )))
                }
            }
        }

        let mut column_refs: HashMap<&ColumnId, usize> = HashMap::new();
        for board in self.boards.values() {
            for column_id in &board.column_ids {
                if !self.columns.contains_key(column_id) {
                    return Err(KanbanError::invariant(format!(
                        "board '{}' references missing column '{}'",
                        board.id, column_id
                    )));
                }
                *column_refs.entry(column_id).or_default() += 1;
            }
        }
        for column_id in self.columns.keys() {
            match column_refs.get(column_id).copied().unwrap_or(0) {
                1 => {}
                0 => {
                    return Err(KanbanError::invariant(format!(
                        "column '{}' is on no board",
                        column_id
                    )))
                }
                n => {
                    return Err(KanbanError::invariant(format!(
                        "column '{}' is referenced {} times",
                        column_id, n
                    )))
                }
            }
        }

        if let Some(active) = &self.active_board_id {
            if !self.boards.contains_key(active) {
                return Err(KanbanError::invariant(format!(
                    "active board '{}' does not exist",
                    active
                )));
            }
        }

        Ok(())
    }
}
