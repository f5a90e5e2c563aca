//! Local mutation descriptions and in-flight bookkeeping

use chrono::{DateTime, Utc};
use corkboard::{BoardSnapshot, ListId, TaskId, UserId};

/// A user action applied optimistically to the local replica before the
/// server confirms it. Mirrors the server's mutation commands.
#[derive(Debug, Clone)]
pub enum LocalMutation {
    CreateList {
        title: String,
    },
    RenameList {
        id: ListId,
        title: String,
    },
    ReorderList {
        id: ListId,
        position: u32,
    },
    DeleteList {
        id: ListId,
    },
    CreateTask {
        list_id: ListId,
        title: String,
    },
    EditTask {
        id: TaskId,
        title: Option<String>,
        description: Option<String>,
        due_date: Option<DateTime<Utc>>,
    },
    MoveTask {
        id: TaskId,
        list_id: ListId,
        position: u32,
    },
    DeleteTask {
        id: TaskId,
    },
    AssignTask {
        id: TaskId,
        user_id: UserId,
    },
    UnassignTask {
        id: TaskId,
        user_id: UserId,
    },
}

/// Entity the replica invented for an optimistic create. Its id is
/// client-generated and is retired when the server's authoritative row
/// arrives.
#[derive(Debug, Clone)]
pub enum ProvisionalId {
    List(ListId),
    Task(TaskId),
}

/// One in-flight optimistic mutation: the pre-mutation snapshot for rollback
/// plus the provisional entity id, if the mutation created one.
#[derive(Debug)]
pub struct PendingMutation {
    pub(crate) prior: BoardSnapshot,
    pub(crate) provisional: Option<ProvisionalId>,
}

impl PendingMutation {
    /// The provisional entity this mutation created locally, if any
    pub fn provisional(&self) -> Option<&ProvisionalId> {
        self.provisional.as_ref()
    }
}
