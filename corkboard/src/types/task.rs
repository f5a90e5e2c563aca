//! Task types: Task, TaskAssignee

use super::ids::{ListId, TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A unit of work within a list.
///
/// Positions among the tasks of one list form a dense zero-based permutation,
/// the same invariant lists carry within a board. A task is never in a state
/// with its position undefined, negative, or duplicated with a sibling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub list_id: ListId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub position: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task at the given position in a list
    pub fn new(list_id: ListId, title: impl Into<String>, position: u32) -> Self {
        let now = Utc::now();
        Self {
            id: TaskId::new(),
            list_id,
            title: title.into(),
            description: String::new(),
            position,
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }
}

/// The (task, user) assignment relation — many-to-many join owned by the
/// task; created and removed independently of task content edits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskAssignee {
    pub task_id: TaskId,
    pub user_id: UserId,
    pub assigned_at: DateTime<Utc>,
}

impl TaskAssignee {
    /// Create a new assignment row
    pub fn new(task_id: TaskId, user_id: UserId) -> Self {
        Self {
            task_id,
            user_id,
            assigned_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let task = Task::new(ListId::from("l1"), "Write docs", 3);
        assert_eq!(task.title, "Write docs");
        assert!(task.description.is_empty());
        assert_eq!(task.position, 3);
        assert!(task.due_date.is_none());
    }

    #[test]
    fn test_task_builders() {
        let due = Utc::now();
        let task = Task::new(ListId::from("l1"), "Ship it", 0)
            .with_description("before friday")
            .with_due_date(due);
        assert_eq!(task.description, "before friday");
        assert_eq!(task.due_date, Some(due));
    }

    #[test]
    fn test_task_serialization() {
        let task = Task::new(ListId::from("l1"), "Test", 1);
        let json = serde_json::to_string(&task).unwrap();
        let parsed: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.title, task.title);
        assert_eq!(parsed.position, 1);
        // absent due date is omitted from the wire form
        assert!(!json.contains("due_date"));
    }
}
