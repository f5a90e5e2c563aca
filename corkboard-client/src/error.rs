//! Error types for the client replica

use corkboard::{ListId, TaskId};
use thiserror::Error;

/// Result type for replica operations
pub type Result<T> = std::result::Result<T, ReplicaError>;

/// Errors an optimistic mutation can hit before it ever reaches the server
#[derive(Debug, Error)]
pub enum ReplicaError {
    /// List not present in the local replica
    #[error("list not in replica: {id}")]
    UnknownList { id: ListId },

    /// Task not present in the local replica
    #[error("task not in replica: {id}")]
    UnknownTask { id: TaskId },

    /// Requested position falls outside the local collection
    #[error("position {position} is out of range (collection size {len})")]
    PositionOutOfRange { position: u32, len: usize },
}
