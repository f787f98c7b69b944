//! UpdateTask command

use crate::error::Result;
use crate::operation::{Applied, Mutate, Operation};
use crate::types::{KanbanState, TaskId, TaskPatch};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Merge partial fields into an existing task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTask {
    /// The task ID to update
    pub id: TaskId,
    pub patch: TaskPatch,
}

impl UpdateTask {
    pub fn new(id: impl Into<TaskId>, patch: TaskPatch) -> Self {
        Self {
            id: id.into(),
            patch,
        }
    }
}

impl Operation for UpdateTask {
    fn verb(&self) -> &'static str {
        "update"
    }

    fn noun(&self) -> &'static str {
        "task"
    }
}

impl Mutate for UpdateTask {
    type Output = ();

    fn apply(&self, state: &mut KanbanState) -> Result<Applied<()>> {
        let Some(task) = state.tasks.get_mut(&self.id) else {
            debug!(task = %self.id, "update skipped: task not found");
            return Ok(Applied::Unchanged(()));
        };

        if task.apply_patch(&self.patch) {
            Ok(Applied::Changed(()))
        } else {
            Ok(Applied::Unchanged(()))
        }
    }
}
