//! UpdateList command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::membership::require_member;
use crate::op::Execute;
use crate::sequencer;
use crate::types::{ActivityKind, BoardEvent, ListId, UserId};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

/// Rename and/or reorder a list within its board.
///
/// A position change shifts every intervening sibling and the target in one
/// transaction — either all of them commit or none do.
#[derive(Debug, Deserialize)]
pub struct UpdateList {
    /// The list to update
    pub id: ListId,
    /// New title, if changing
    pub title: Option<String>,
    /// New position within the board, if changing
    pub position: Option<u32>,
    /// The acting user
    pub acting_user: UserId,
}

impl UpdateList {
    pub fn new(id: impl Into<ListId>, acting_user: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            position: None,
            acting_user: acting_user.into(),
        }
    }

    /// Set a new title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a new position
    pub fn with_position(mut self, position: u32) -> Self {
        self.position = Some(position);
        self
    }
}

#[async_trait]
impl Execute for UpdateList {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let list = ctx
            .store()
            .transaction(|tx| {
                let mut list =
                    tx.tables()
                        .list(&self.id)
                        .cloned()
                        .ok_or(BoardError::ListNotFound {
                            id: self.id.clone(),
                        })?;
                require_member(tx.tables(), &list.board_id, &self.acting_user)?;

                if let Some(ref title) = self.title {
                    list.title = title.clone();
                }

                if let Some(new_pos) = self.position {
                    let siblings = tx.tables().list_slots(&list.board_id);
                    // valid targets are [0, n-1]: the moved list stays inside
                    // the collection
                    if new_pos as usize >= siblings.len() {
                        return Err(BoardError::PositionOutOfRange {
                            position: new_pos,
                            len: siblings.len(),
                        });
                    }
                    tx.shift_lists(sequencer::reorder_shifts(
                        &siblings,
                        &list.id,
                        list.position,
                        new_pos,
                    ));
                    list.position = new_pos;
                }

                list.updated_at = Utc::now();
                tx.put_list(list.clone());
                Ok(list)
            })
            .await?;

        ctx.record(
            &list.board_id,
            &self.acting_user,
            ActivityKind::ListUpdated {
                list: list.id.clone(),
                title: list.title.clone(),
            },
        )
        .await;
        ctx.emit(
            &list.board_id,
            BoardEvent::ListUpdated { list: list.clone() },
        )
        .await;

        Ok(serde_json::to_value(&list)?)
    }
}
