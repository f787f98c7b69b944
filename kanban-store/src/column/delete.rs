//! DeleteColumn command

use crate::error::Result;
use crate::operation::{Applied, Mutate, Operation};
use crate::types::{ColumnId, KanbanState};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Delete a column together with every task it holds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteColumn {
    pub id: ColumnId,
}

impl DeleteColumn {
    pub fn new(id: impl Into<ColumnId>) -> Self {
        Self { id: id.into() }
    }
}

impl Operation for DeleteColumn {
    fn verb(&self) -> &'static str {
        "delete"
    }

    fn noun(&self) -> &'static str {
        "column"
    }
}

impl Mutate for DeleteColumn {
    type Output = ();

    fn apply(&self, state: &mut KanbanState) -> Result<Applied<()>> {
        if !state.columns.contains_key(&self.id) {
            debug!(column = %self.id, "delete skipped: column not found");
            return Ok(Applied::Unchanged(()));
        }
        remove_column(state, &self.id);
        Ok(Applied::Changed(()))
    }
}

/// Remove a column, its tasks, and its board membership
pub(crate) fn remove_column(state: &mut KanbanState, id: &ColumnId) {
    if let Some(column) = state.columns.shift_remove(id) {
        for task_id in &column.task_ids {
            state.tasks.shift_remove(task_id);
        }
    }
    for board in state.boards.values_mut() {
        board.column_ids.retain(|c| c != id);
    }
}
