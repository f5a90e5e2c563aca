//! Board-level types: Board, BoardMember, Role, UserProfile

use super::ids::{BoardId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A collaborative workspace owning an ordered set of lists.
/// Deleting a board cascades to all of its lists and tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub id: BoardId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub creator: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Board {
    /// Create a new board with the given title and creator
    pub fn new(title: impl Into<String>, creator: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: BoardId::new(),
            title: title.into(),
            description: None,
            creator,
            created_at: now,
            updated_at: now,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Membership role on a board.
///
/// Admin gates board update/delete and membership changes; any member may
/// read the board and mutate its lists and tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    /// Whether this role may perform admin-gated operations
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// The (board, user) membership relation. Exactly one row per pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoardMember {
    pub board_id: BoardId,
    pub user_id: UserId,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
}

impl BoardMember {
    /// Create a new membership row
    pub fn new(board_id: BoardId, user_id: UserId, role: Role) -> Self {
        Self {
            board_id,
            user_id,
            role,
            joined_at: Utc::now(),
        }
    }
}

/// A user known to the engine — the synced mirror of the external identity
/// provider. Credential issuance and authentication live outside the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
}

impl UserProfile {
    /// Create a profile row
    pub fn new(id: impl Into<UserId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
