//! ListActivity command

use crate::context::BoardContext;
use crate::error::Result;
use crate::membership::require_member;
use crate::op::Execute;
use crate::types::{BoardId, UserId};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Read a board's history, newest first. Reads are unlogged and never
/// broadcast.
#[derive(Debug, Deserialize)]
pub struct ListActivity {
    /// The board whose history to read
    pub board_id: BoardId,
    /// Cap on the number of entries returned
    pub limit: Option<usize>,
    /// The acting user
    pub acting_user: UserId,
}

impl ListActivity {
    pub fn new(board_id: impl Into<BoardId>, acting_user: impl Into<UserId>) -> Self {
        Self {
            board_id: board_id.into(),
            limit: None,
            acting_user: acting_user.into(),
        }
    }

    /// Cap the number of entries
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

#[async_trait]
impl Execute for ListActivity {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        ctx.store()
            .read(|tables| {
                require_member(tables, &self.board_id, &self.acting_user)?;
                let entries = tables.activity_for(&self.board_id);
                let capped: Vec<_> = match self.limit {
                    Some(limit) => entries.into_iter().take(limit).collect(),
                    None => entries,
                };
                Ok(serde_json::to_value(&capped)?)
            })
            .await
    }
}
