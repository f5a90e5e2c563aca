//! List type: an ordered column of tasks within a board

use super::ids::{BoardId, ListId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An ordered column within a board.
///
/// For a fixed board the positions across all of its lists form a dense
/// zero-based permutation: `{0, 1, ..., count-1}`, no gaps, no duplicates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    pub board_id: BoardId,
    pub title: String,
    pub position: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl List {
    /// Create a new list at the given position
    pub fn new(board_id: BoardId, title: impl Into<String>, position: u32) -> Self {
        let now = Utc::now();
        Self {
            id: ListId::new(),
            board_id,
            title: title.into(),
            position,
            created_at: now,
            updated_at: now,
        }
    }
}
