//! AddTask command

use crate::error::{KanbanError, Result};
use crate::operation::{Applied, Mutate, Operation};
use crate::types::{ColumnId, KanbanState, Priority, Task, TaskId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Add a new task at the head of a column.
///
/// New tasks always go first in the column; there is no tail placement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTask {
    /// The column receiving the task
    pub column_id: ColumnId,
    /// The task title (required)
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    /// Defaults to today
    pub due_date: Option<NaiveDate>,
}

impl AddTask {
    /// Create a new AddTask command with just a column and title
    pub fn new(column_id: impl Into<ColumnId>, title: impl Into<String>) -> Self {
        Self {
            column_id: column_id.into(),
            title: title.into(),
            description: None,
            priority: None,
            due_date: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

impl Operation for AddTask {
    fn verb(&self) -> &'static str {
        "add"
    }

    fn noun(&self) -> &'static str {
        "task"
    }
}

impl Mutate for AddTask {
    type Output = TaskId;

    fn apply(&self, state: &mut KanbanState) -> Result<Applied<TaskId>> {
        let column = state
            .columns
            .get_mut(&self.column_id)
            .ok_or_else(|| KanbanError::ColumnNotFound {
                id: self.column_id.to_string(),
            })?;

        let mut task = Task::new(self.title.clone());
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }

        let id = task.id.clone();
        column.task_ids.insert(0, id.clone());
        state.tasks.insert(id.clone(), task);
        Ok(Applied::Changed(id))
    }
}
