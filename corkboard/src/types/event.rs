//! Broadcast event payloads
//!
//! One event per mutation, fanned out to the owning board's room. Every
//! mutation broadcasts — task events included — so connected clients never
//! need to poll for a subset of changes.

use super::activity::Activity;
use super::board::{Board, BoardMember};
use super::ids::{BoardId, ListId, TaskId, UserId};
use super::list::List;
use super::task::Task;
use serde::{Deserialize, Serialize};

/// An event emitted to a board room after a committed mutation.
///
/// Payloads carry the authoritative primary entity only; clients derive the
/// sibling position shifts with the same sequencer the server used, so both
/// sides compute identical orderings from identical inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum BoardEvent {
    #[serde(rename = "board:created")]
    BoardCreated { board: Board },
    #[serde(rename = "board:updated")]
    BoardUpdated { board: Board },
    #[serde(rename = "board:deleted")]
    BoardDeleted { board_id: BoardId },
    #[serde(rename = "member:added")]
    MemberAdded { member: BoardMember },
    #[serde(rename = "member:removed")]
    MemberRemoved { board_id: BoardId, user_id: UserId },
    #[serde(rename = "list:created")]
    ListCreated { list: List },
    #[serde(rename = "list:updated")]
    ListUpdated { list: List },
    #[serde(rename = "list:deleted")]
    ListDeleted { list_id: ListId, board_id: BoardId },
    #[serde(rename = "task:created")]
    TaskCreated { task: Task },
    #[serde(rename = "task:updated")]
    TaskUpdated { task: Task },
    #[serde(rename = "task:moved")]
    TaskMoved {
        task: Task,
        /// The list the task left; equals `task.list_id` for a same-list move
        from_list: ListId,
    },
    #[serde(rename = "task:deleted")]
    TaskDeleted {
        task_id: TaskId,
        list_id: ListId,
        board_id: BoardId,
    },
    #[serde(rename = "task:assigned")]
    TaskAssigned { task_id: TaskId, user_id: UserId },
    #[serde(rename = "task:unassigned")]
    TaskUnassigned { task_id: TaskId, user_id: UserId },
    #[serde(rename = "activity:created")]
    ActivityCreated { activity: Activity },
}

impl BoardEvent {
    /// The wire-form event name (the serde tag)
    pub fn name(&self) -> &'static str {
        match self {
            Self::BoardCreated { .. } => "board:created",
            Self::BoardUpdated { .. } => "board:updated",
            Self::BoardDeleted { .. } => "board:deleted",
            Self::MemberAdded { .. } => "member:added",
            Self::MemberRemoved { .. } => "member:removed",
            Self::ListCreated { .. } => "list:created",
            Self::ListUpdated { .. } => "list:updated",
            Self::ListDeleted { .. } => "list:deleted",
            Self::TaskCreated { .. } => "task:created",
            Self::TaskUpdated { .. } => "task:updated",
            Self::TaskMoved { .. } => "task:moved",
            Self::TaskDeleted { .. } => "task:deleted",
            Self::TaskAssigned { .. } => "task:assigned",
            Self::TaskUnassigned { .. } => "task:unassigned",
            Self::ActivityCreated { .. } => "activity:created",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let list = List::new(BoardId::from("b1"), "To Do", 0);
        let event = BoardEvent::ListCreated { list };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"list:created\""));
        assert!(json.contains("\"data\""));
        assert!(json.contains("\"title\":\"To Do\""));
    }

    #[test]
    fn test_event_roundtrip() {
        let event = BoardEvent::TaskDeleted {
            task_id: TaskId::from("t1"),
            list_id: ListId::from("l1"),
            board_id: BoardId::from("b1"),
        };
        let json = serde_json::to_string(&event).unwrap();
        let parsed: BoardEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_name_matches_wire_tag() {
        let event = BoardEvent::ListDeleted {
            list_id: ListId::from("l1"),
            board_id: BoardId::from("b1"),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], event.name());
    }
}
