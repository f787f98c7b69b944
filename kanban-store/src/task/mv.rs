//! MoveTask command

use crate::error::Result;
use crate::operation::{Applied, Mutate, Operation};
use crate::splice;
use crate::types::{ColumnId, KanbanState, TaskId};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Move a task within its column or into another column.
///
/// The task is removed from the source sequence first; `target_index` is then
/// resolved against the target sequence as it looks after that removal and
/// clamped to its length. Same-column reorders and cross-column moves are the
/// same operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTask {
    /// The task ID to move
    pub task_id: TaskId,
    /// Column the caller believes currently holds the task
    pub source_column_id: ColumnId,
    pub target_column_id: ColumnId,
    pub target_index: usize,
}

impl MoveTask {
    pub fn new(
        task_id: impl Into<TaskId>,
        source_column_id: impl Into<ColumnId>,
        target_column_id: impl Into<ColumnId>,
        target_index: usize,
    ) -> Self {
        Self {
            task_id: task_id.into(),
            source_column_id: source_column_id.into(),
            target_column_id: target_column_id.into(),
            target_index,
        }
    }

    /// Reorder a task inside one column
    pub fn within(
        task_id: impl Into<TaskId>,
        column_id: impl Into<ColumnId>,
        target_index: usize,
    ) -> Self {
        let column_id = column_id.into();
        Self::new(task_id, column_id.clone(), column_id, target_index)
    }
}

impl Operation for MoveTask {
    fn verb(&self) -> &'static str {
        "move"
    }

    fn noun(&self) -> &'static str {
        "task"
    }
}

impl Mutate for MoveTask {
    type Output = ();

    fn apply(&self, state: &mut KanbanState) -> Result<Applied<()>> {
        if !state.tasks.contains_key(&self.task_id) {
            debug!(task = %self.task_id, "move skipped: task not found");
            return Ok(Applied::Unchanged(()));
        }
        if !state.columns.contains_key(&self.target_column_id) {
            debug!(column = %self.target_column_id, "move skipped: target column not found");
            return Ok(Applied::Unchanged(()));
        }
        let Some(from) = state
            .columns
            .get(&self.source_column_id)
            .and_then(|c| c.position_of(&self.task_id))
        else {
            // Stale drag reference: the task is not where the caller thinks.
            debug!(
                task = %self.task_id,
                column = %self.source_column_id,
                "move skipped: task not in source column"
            );
            return Ok(Applied::Unchanged(()));
        };

        if self.source_column_id == self.target_column_id {
            let column = &mut state.columns[&self.source_column_id];
            let changed = splice::reorder(&mut column.task_ids, from, self.target_index);
            return Ok(if changed {
                Applied::Changed(())
            } else {
                Applied::Unchanged(())
            });
        }

        state.columns[&self.source_column_id].task_ids.remove(from);
        splice::insert_clamped(
            &mut state.columns[&self.target_column_id].task_ids,
            self.target_index,
            self.task_id.clone(),
        );
        Ok(Applied::Changed(()))
    }
}
