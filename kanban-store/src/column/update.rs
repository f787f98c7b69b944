//! UpdateColumn command

use crate::error::Result;
use crate::operation::{Applied, Mutate, Operation};
use crate::types::{ColumnId, KanbanState};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Rename a column
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateColumn {
    pub id: ColumnId,
    pub title: String,
}

impl UpdateColumn {
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

impl Operation for UpdateColumn {
    fn verb(&self) -> &'static str {
        "update"
    }

    fn noun(&self) -> &'static str {
        "column"
    }
}

impl Mutate for UpdateColumn {
    type Output = ();

    fn apply(&self, state: &mut KanbanState) -> Result<Applied<()>> {
        let Some(column) = state.columns.get_mut(&self.id) else {
            debug!(column = %self.id, "rename skipped: column not found");
            return Ok(Applied::Unchanged(()));
        };
        if column.title == self.title {
            return Ok(Applied::Unchanged(()));
        }
        column.title = self.title.clone();
        Ok(Applied::Changed(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rename_column() {
        let mut state = KanbanState::seeded("Test", &["Todo"]);
        let column = state.active_board().unwrap().column_ids[0].clone();

        let applied = UpdateColumn::new(column.clone(), "Backlog")
            .apply(&mut state)
            .unwrap();

        assert!(applied.is_changed());
        assert_eq!(state.columns[&column].title, "Backlog");
    }

    #[test]
    fn test_rename_missing_column_is_noop() {
        let mut state = KanbanState::seeded("Test", &["Todo"]);
        let applied = UpdateColumn::new("missing", "x").apply(&mut state).unwrap();
        assert!(!applied.is_changed());
    }
}
