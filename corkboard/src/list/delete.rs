//! DeleteList command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::membership::require_member;
use crate::op::Execute;
use crate::sequencer;
use crate::types::{ActivityKind, BoardEvent, ListId, UserId};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Delete a list, cascading to its tasks, and close the gap it leaves in the
/// board's ordering — all in one transaction.
#[derive(Debug, Deserialize)]
pub struct DeleteList {
    /// The list to delete
    pub id: ListId,
    /// The acting user
    pub acting_user: UserId,
}

impl DeleteList {
    pub fn new(id: impl Into<ListId>, acting_user: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            acting_user: acting_user.into(),
        }
    }
}

#[async_trait]
impl Execute for DeleteList {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let list = ctx
            .store()
            .transaction(|tx| {
                let list = tx
                    .tables()
                    .list(&self.id)
                    .cloned()
                    .ok_or(BoardError::ListNotFound {
                        id: self.id.clone(),
                    })?;
                require_member(tx.tables(), &list.board_id, &self.acting_user)?;

                let siblings = tx.tables().list_slots(&list.board_id);
                tx.shift_lists(sequencer::delete_shifts(&siblings, list.position));
                tx.delete_list(list.id.clone());
                Ok(list)
            })
            .await?;

        ctx.record(
            &list.board_id,
            &self.acting_user,
            ActivityKind::ListDeleted {
                list: list.id.clone(),
                title: list.title.clone(),
            },
        )
        .await;
        ctx.emit(
            &list.board_id,
            BoardEvent::ListDeleted {
                list_id: list.id.clone(),
                board_id: list.board_id.clone(),
            },
        )
        .await;

        Ok(serde_json::json!({
            "deleted": true,
            "id": list.id,
            "board_id": list.board_id,
        }))
    }
}
