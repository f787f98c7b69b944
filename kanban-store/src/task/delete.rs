//! DeleteTask command

use crate::error::Result;
use crate::operation::{Applied, Mutate, Operation};
use crate::types::{KanbanState, TaskId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Delete a task and its column membership in one transition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTask {
    /// The task ID to delete
    pub id: TaskId,
}

impl DeleteTask {
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self { id: id.into() }
    }
}

impl Operation for DeleteTask {
    fn verb(&self) -> &'static str {
        "delete"
    }

    fn noun(&self) -> &'static str {
        "task"
    }
}

impl Mutate for DeleteTask {
    type Output = ();

    fn apply(&self, state: &mut KanbanState) -> Result<Applied<()>> {
        let owner = state
            .columns
            .values()
            .find(|c| c.contains(&self.id))
            .map(|c| c.id.clone());

        if owner.is_none() && !state.tasks.contains_key(&self.id) {
            debug!(task = %self.id, "delete skipped: task not found");
            return Ok(Applied::Unchanged(()));
        }

        if let Some(column) = owner.and_then(|id| state.columns.get_mut(&id)) {
            column.task_ids.retain(|id| id != &self.id);
        }
        state.tasks.shift_remove(&self.id);
        Ok(Applied::Changed(()))
    }
}
