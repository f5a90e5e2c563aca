//! AddMember command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::membership::require_admin;
use crate::op::Execute;
use crate::types::{ActivityKind, BoardEvent, BoardId, BoardMember, Role, UserId};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Add a user to a board. Admin only. The user must exist in the synced
/// directory, and (board, user) pairs are unique.
#[derive(Debug, Deserialize)]
pub struct AddMember {
    /// The board to add the member to
    pub board_id: BoardId,
    /// The user being added
    pub user_id: UserId,
    /// The role to grant
    pub role: Role,
    /// The acting user
    pub acting_user: UserId,
}

impl AddMember {
    pub fn new(
        board_id: impl Into<BoardId>,
        user_id: impl Into<UserId>,
        role: Role,
        acting_user: impl Into<UserId>,
    ) -> Self {
        Self {
            board_id: board_id.into(),
            user_id: user_id.into(),
            role,
            acting_user: acting_user.into(),
        }
    }
}

#[async_trait]
impl Execute for AddMember {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let member = ctx
            .store()
            .transaction(|tx| {
                require_admin(tx.tables(), &self.board_id, &self.acting_user)?;
                if tx.tables().user(&self.user_id).is_none() {
                    return Err(BoardError::UserNotFound {
                        id: self.user_id.clone(),
                    });
                }
                if tx.tables().member(&self.board_id, &self.user_id).is_some() {
                    return Err(BoardError::AlreadyMember {
                        board: self.board_id.clone(),
                        user: self.user_id.clone(),
                    });
                }
                let member =
                    BoardMember::new(self.board_id.clone(), self.user_id.clone(), self.role);
                tx.put_member(member.clone());
                Ok(member)
            })
            .await?;

        ctx.record(
            &self.board_id,
            &self.acting_user,
            ActivityKind::MemberAdded {
                user: self.user_id.clone(),
                role: self.role,
            },
        )
        .await;
        ctx.emit(
            &self.board_id,
            BoardEvent::MemberAdded {
                member: member.clone(),
            },
        )
        .await;

        Ok(serde_json::to_value(&member)?)
    }
}
