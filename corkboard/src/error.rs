//! Error types for the board engine

use crate::types::{BoardId, ListId, TaskId, UserId};
use serde::Serialize;
use thiserror::Error;

/// Result type for board operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in board operations
#[derive(Debug, Error)]
pub enum BoardError {
    /// Board not found
    #[error("board not found: {id}")]
    BoardNotFound { id: BoardId },

    /// List not found
    #[error("list not found: {id}")]
    ListNotFound { id: ListId },

    /// Task not found
    #[error("task not found: {id}")]
    TaskNotFound { id: TaskId },

    /// User not found in the synced directory
    #[error("user not found: {id}")]
    UserNotFound { id: UserId },

    /// The (task, user) assignment does not exist
    #[error("user {user} is not assigned to task {task}")]
    AssignmentNotFound { task: TaskId, user: UserId },

    /// The (board, user) membership row does not exist
    #[error("no membership for user {user} on board {board}")]
    MembershipNotFound { board: BoardId, user: UserId },

    /// Acting user is not a member of the board
    #[error("user {user} is not a member of board {board}")]
    NotMember { board: BoardId, user: UserId },

    /// Acting user is a member but lacks the admin role
    #[error("user {user} is not an admin of board {board}")]
    AdminRequired { board: BoardId, user: UserId },

    /// The user is already a member of the board
    #[error("user {user} is already a member of board {board}")]
    AlreadyMember { board: BoardId, user: UserId },

    /// The user is already assigned to the task
    #[error("user {user} is already assigned to task {task}")]
    AlreadyAssigned { task: TaskId, user: UserId },

    /// Destination list belongs to a different board
    #[error("cannot move task {task} across boards (destination list {dest})")]
    CrossBoardMove { task: TaskId, dest: ListId },

    /// Requested position falls outside the collection
    #[error("position {position} is out of range (collection size {len})")]
    PositionOutOfRange { position: u32, len: usize },

    /// Invalid field value
    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    /// Persistence or serialization failure; details stay server-side
    #[error("internal error: {message}")]
    Internal { message: String },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Client-visible classification, mapped onto HTTP-equivalent statuses at the
/// (out-of-scope) routing boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    Conflict,
    Validation,
    Internal,
}

impl ErrorKind {
    /// HTTP-equivalent status code
    pub fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Forbidden => 403,
            Self::Conflict => 409,
            Self::Validation => 400,
            Self::Internal => 500,
        }
    }
}

impl BoardError {
    /// Classify this error into the client-visible taxonomy
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::BoardNotFound { .. }
            | Self::ListNotFound { .. }
            | Self::TaskNotFound { .. }
            | Self::UserNotFound { .. }
            | Self::AssignmentNotFound { .. }
            | Self::MembershipNotFound { .. } => ErrorKind::NotFound,
            Self::NotMember { .. } | Self::AdminRequired { .. } => ErrorKind::Forbidden,
            Self::AlreadyMember { .. } | Self::AlreadyAssigned { .. } => ErrorKind::Conflict,
            Self::CrossBoardMove { .. }
            | Self::PositionOutOfRange { .. }
            | Self::InvalidValue { .. } => ErrorKind::Validation,
            Self::Internal { .. } | Self::Json(_) => ErrorKind::Internal,
        }
    }

    /// Create an invalid value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BoardError::TaskNotFound {
            id: TaskId::from("abc123"),
        };
        assert_eq!(err.to_string(), "task not found: abc123");
    }

    #[test]
    fn test_error_kinds() {
        let forbidden = BoardError::NotMember {
            board: BoardId::from("b"),
            user: UserId::from("u"),
        };
        assert_eq!(forbidden.kind(), ErrorKind::Forbidden);
        assert_eq!(forbidden.kind().status_code(), 403);

        let conflict = BoardError::AlreadyAssigned {
            task: TaskId::from("t"),
            user: UserId::from("u"),
        };
        assert_eq!(conflict.kind(), ErrorKind::Conflict);
        assert_eq!(conflict.kind().status_code(), 409);

        let validation = BoardError::PositionOutOfRange {
            position: 9,
            len: 3,
        };
        assert_eq!(validation.kind(), ErrorKind::Validation);
        assert_eq!(validation.kind().status_code(), 400);
    }

    #[test]
    fn test_internal_hides_details_behind_kind() {
        let err = BoardError::internal("row lock wait timeout");
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(err.kind().status_code(), 500);
    }
}
