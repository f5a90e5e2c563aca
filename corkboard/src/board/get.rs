//! GetBoard command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::membership::require_member;
use crate::op::Execute;
use crate::types::{BoardId, UserId};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Fetch the full board snapshot: members, lists in position order, each
/// list's tasks in position order, and assignment rows. This is the
/// authoritative view clients load on join and re-fetch after a reconnect
/// or a missed-event gap.
#[derive(Debug, Deserialize)]
pub struct GetBoard {
    /// The board to fetch
    pub id: BoardId,
    /// The acting user
    pub acting_user: UserId,
}

impl GetBoard {
    pub fn new(id: impl Into<BoardId>, acting_user: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            acting_user: acting_user.into(),
        }
    }
}

#[async_trait]
impl Execute for GetBoard {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        ctx.store()
            .read(|tables| {
                require_member(tables, &self.id, &self.acting_user)?;
                let snapshot = tables.snapshot(&self.id).ok_or(BoardError::BoardNotFound {
                    id: self.id.clone(),
                })?;
                Ok(serde_json::to_value(&snapshot)?)
            })
            .await
    }
}
