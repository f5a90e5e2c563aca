//! RemoveMember command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::membership::require_admin;
use crate::op::Execute;
use crate::types::{ActivityKind, BoardEvent, BoardId, UserId};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Remove a user from a board. Admin only.
#[derive(Debug, Deserialize)]
pub struct RemoveMember {
    /// The board to remove the member from
    pub board_id: BoardId,
    /// The user being removed
    pub user_id: UserId,
    /// The acting user
    pub acting_user: UserId,
}

impl RemoveMember {
    pub fn new(
        board_id: impl Into<BoardId>,
        user_id: impl Into<UserId>,
        acting_user: impl Into<UserId>,
    ) -> Self {
        Self {
            board_id: board_id.into(),
            user_id: user_id.into(),
            acting_user: acting_user.into(),
        }
    }
}

#[async_trait]
impl Execute for RemoveMember {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        ctx.store()
            .transaction(|tx| {
                require_admin(tx.tables(), &self.board_id, &self.acting_user)?;
                if tx.tables().member(&self.board_id, &self.user_id).is_none() {
                    return Err(BoardError::MembershipNotFound {
                        board: self.board_id.clone(),
                        user: self.user_id.clone(),
                    });
                }
                tx.delete_member(self.board_id.clone(), self.user_id.clone());
                Ok(())
            })
            .await?;

        ctx.record(
            &self.board_id,
            &self.acting_user,
            ActivityKind::MemberRemoved {
                user: self.user_id.clone(),
            },
        )
        .await;
        ctx.emit(
            &self.board_id,
            BoardEvent::MemberRemoved {
                board_id: self.board_id.clone(),
                user_id: self.user_id.clone(),
            },
        )
        .await;

        Ok(serde_json::json!({
            "removed": true,
            "board_id": self.board_id,
            "user_id": self.user_id,
        }))
    }
}
