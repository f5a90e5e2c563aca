//! Activity log types
//!
//! Append-only history entries. Written once by the mutation commands, never
//! mutated or deleted by the core — they survive even board deletion.

use super::board::Role;
use super::ids::{ActivityId, BoardId, ListId, TaskId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One history entry: who did what on which board, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub board_id: BoardId,
    /// The acting user
    pub actor: UserId,
    pub at: DateTime<Utc>,
    #[serde(flatten)]
    pub kind: ActivityKind,
}

impl Activity {
    /// Create a new entry stamped with the current time
    pub fn new(board_id: BoardId, actor: UserId, kind: ActivityKind) -> Self {
        Self {
            id: ActivityId::new(),
            board_id,
            actor,
            at: Utc::now(),
            kind,
        }
    }
}

/// What happened — a tagged union keyed by action kind, each variant carrying
/// only the fields that action produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ActivityKind {
    BoardCreated {
        title: String,
    },
    BoardUpdated {
        title: String,
    },
    BoardDeleted {
        title: String,
    },
    MemberAdded {
        user: UserId,
        role: Role,
    },
    MemberRemoved {
        user: UserId,
    },
    ListCreated {
        list: ListId,
        title: String,
    },
    ListUpdated {
        list: ListId,
        title: String,
    },
    ListDeleted {
        list: ListId,
        title: String,
    },
    TaskCreated {
        task: TaskId,
        title: String,
    },
    TaskUpdated {
        task: TaskId,
        title: String,
    },
    /// From/to carry the human-readable list titles for display
    TaskMoved {
        task: TaskId,
        title: String,
        from_list: String,
        to_list: String,
    },
    TaskDeleted {
        task: TaskId,
        title: String,
    },
    /// Assignee name is carried so the notification side can address the
    /// assignee when assignee != actor
    TaskAssigned {
        task: TaskId,
        assignee: UserId,
        assignee_name: String,
    },
    TaskUnassigned {
        task: TaskId,
        assignee: UserId,
    },
}

impl ActivityKind {
    /// Canonical action string, as written to the wire form
    pub fn action(&self) -> &'static str {
        match self {
            Self::BoardCreated { .. } => "board_created",
            Self::BoardUpdated { .. } => "board_updated",
            Self::BoardDeleted { .. } => "board_deleted",
            Self::MemberAdded { .. } => "member_added",
            Self::MemberRemoved { .. } => "member_removed",
            Self::ListCreated { .. } => "list_created",
            Self::ListUpdated { .. } => "list_updated",
            Self::ListDeleted { .. } => "list_deleted",
            Self::TaskCreated { .. } => "task_created",
            Self::TaskUpdated { .. } => "task_updated",
            Self::TaskMoved { .. } => "task_moved",
            Self::TaskDeleted { .. } => "task_deleted",
            Self::TaskAssigned { .. } => "task_assigned",
            Self::TaskUnassigned { .. } => "task_unassigned",
        }
    }
}
