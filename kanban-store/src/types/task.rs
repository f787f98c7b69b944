//! Task types: Task, Priority, TaskPatch

use super::ids::TaskId;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// How urgent a task is. Stored as `Low`/`Medium`/`High`; lowercase is
/// accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    #[serde(alias = "low")]
    Low,
    #[default]
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown priority '{}'", other)),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        f.write_str(s)
    }
}

/// A task/card on a kanban board.
///
/// A task knows nothing about where it lives; the owning column's
/// `task_ids` sequence is the single source of placement and order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: Priority,
    /// Serialized as an ISO `YYYY-MM-DD` date
    pub due_date: NaiveDate,
}

impl Task {
    /// Create a new task with default fields, due today
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            description: String::new(),
            priority: Priority::default(),
            due_date: Local::now().date_naive(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the priority
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = due_date;
        self
    }

    /// Merge the fields present in `patch`. Returns true if anything changed.
    pub fn apply_patch(&mut self, patch: &TaskPatch) -> bool {
        let before = self.clone();
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        *self != before
    }
}

/// Partial task fields for updates. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// True when no field is set
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_defaults() {
        let task = Task::new("Write docs");
        assert_eq!(task.title, "Write docs");
        assert!(task.description.is_empty());
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.due_date, Local::now().date_naive());
    }

    #[test]
    fn test_task_serialization_layout() {
        let task = Task::new("Ship")
            .with_priority(Priority::High)
            .with_due_date(NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["priority"], "High");
        assert_eq!(json["dueDate"], "2024-03-09");
        assert_eq!(json["id"], task.id.as_str());
    }

    #[test]
    fn test_apply_patch_merges_present_fields() {
        let mut task = Task::new("Old").with_description("keep me");
        let changed = task.apply_patch(&TaskPatch::new().with_title("New"));

        assert!(changed);
        assert_eq!(task.title, "New");
        assert_eq!(task.description, "keep me");
    }

    #[test]
    fn test_apply_patch_reports_no_change() {
        let mut task = Task::new("Same");
        assert!(!task.apply_patch(&TaskPatch::new().with_title("Same")));
        assert!(!task.apply_patch(&TaskPatch::new()));
    }

    #[test]
    fn test_priority_accepts_lowercase_on_read() {
        let parsed: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(parsed, Priority::Low);
        let parsed: Priority = serde_json::from_str("\"Medium\"").unwrap();
        assert_eq!(parsed, Priority::Medium);
        assert!(serde_json::from_str::<Priority>("\"LOW\"").is_err());
    }

    #[test]
    fn test_priority_parse() {
        assert_eq!("HIGH".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
    }
}
