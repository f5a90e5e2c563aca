//! GetTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::membership::require_member;
use crate::op::Execute;
use crate::types::{TaskId, UserId};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Fetch one task with its assignees and owning board.
#[derive(Debug, Deserialize)]
pub struct GetTask {
    /// The task to fetch
    pub id: TaskId,
    /// The acting user
    pub acting_user: UserId,
}

impl GetTask {
    pub fn new(id: impl Into<TaskId>, acting_user: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            acting_user: acting_user.into(),
        }
    }
}

#[async_trait]
impl Execute for GetTask {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        ctx.store()
            .read(|tables| {
                let task = tables.task(&self.id).ok_or(BoardError::TaskNotFound {
                    id: self.id.clone(),
                })?;
                let list = tables
                    .list(&task.list_id)
                    .ok_or(BoardError::ListNotFound {
                        id: task.list_id.clone(),
                    })?;
                require_member(tables, &list.board_id, &self.acting_user)?;

                let assignees: Vec<&UserId> = tables
                    .assignees_of(&self.id)
                    .iter()
                    .map(|a| &a.user_id)
                    .collect();
                let mut result = serde_json::to_value(task)?;
                result["board_id"] = serde_json::json!(list.board_id);
                result["assignees"] = serde_json::json!(assignees);
                Ok(result)
            })
            .await
    }
}
