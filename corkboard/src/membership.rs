//! Membership and role checks
//!
//! The gate every mutation passes through. Membership is checked against the
//! store's member rows; roles only matter for admin-gated operations (board
//! update/delete and membership changes) — any member may read the board and
//! mutate its lists and tasks.

use crate::error::{BoardError, Result};
use crate::store::Tables;
use crate::types::{BoardId, Role, UserId};

/// Resolve the user's role on the board, or Forbidden.
/// A missing board is NotFound, checked before membership.
pub fn require_member(tables: &Tables, board_id: &BoardId, user_id: &UserId) -> Result<Role> {
    if tables.board(board_id).is_none() {
        return Err(BoardError::BoardNotFound {
            id: board_id.clone(),
        });
    }
    tables
        .member(board_id, user_id)
        .map(|m| m.role)
        .ok_or_else(|| BoardError::NotMember {
            board: board_id.clone(),
            user: user_id.clone(),
        })
}

/// Like [`require_member`], but the role must be admin.
pub fn require_admin(tables: &Tables, board_id: &BoardId, user_id: &UserId) -> Result<Role> {
    let role = require_member(tables, board_id, user_id)?;
    if !role.is_admin() {
        return Err(BoardError::AdminRequired {
            board: board_id.clone(),
            user: user_id.clone(),
        });
    }
    Ok(role)
}
