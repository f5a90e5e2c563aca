//! Full-board snapshot
//!
//! The authoritative view a client fetches on join or reconnect, and the
//! shape the reconciliation layer keeps locally.

use super::board::{Board, BoardMember};
use super::ids::ListId;
use super::list::List;
use super::task::{Task, TaskAssignee};
use serde::{Deserialize, Serialize};

/// A board with its members, lists in position order, and each list's tasks
/// in position order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub board: Board,
    pub members: Vec<BoardMember>,
    pub lists: Vec<ListSnapshot>,
    pub assignees: Vec<TaskAssignee>,
}

/// A list with its tasks in position order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListSnapshot {
    pub list: List,
    pub tasks: Vec<Task>,
}

impl BoardSnapshot {
    /// Find a list snapshot by id
    pub fn find_list(&self, id: &ListId) -> Option<&ListSnapshot> {
        self.lists.iter().find(|l| &l.list.id == id)
    }

    /// Find a list snapshot by id (mutable)
    pub fn find_list_mut(&mut self, id: &ListId) -> Option<&mut ListSnapshot> {
        self.lists.iter_mut().find(|l| &l.list.id == id)
    }
}
