//! UnassignTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::membership::require_member;
use crate::op::Execute;
use crate::types::{ActivityKind, BoardEvent, TaskId, UserId};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Remove a user's assignment from a task.
#[derive(Debug, Deserialize)]
pub struct UnassignTask {
    /// The task to unassign from
    pub id: TaskId,
    /// The user being unassigned
    pub user_id: UserId,
    /// The acting user
    pub acting_user: UserId,
}

impl UnassignTask {
    pub fn new(
        id: impl Into<TaskId>,
        user_id: impl Into<UserId>,
        acting_user: impl Into<UserId>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            acting_user: acting_user.into(),
        }
    }
}

#[async_trait]
impl Execute for UnassignTask {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let board_id = ctx
            .store()
            .transaction(|tx| {
                let task = tx
                    .tables()
                    .task(&self.id)
                    .cloned()
                    .ok_or(BoardError::TaskNotFound {
                        id: self.id.clone(),
                    })?;
                let list = tx
                    .tables()
                    .list(&task.list_id)
                    .cloned()
                    .ok_or(BoardError::ListNotFound {
                        id: task.list_id.clone(),
                    })?;
                require_member(tx.tables(), &list.board_id, &self.acting_user)?;

                if !tx.tables().is_assigned(&self.id, &self.user_id) {
                    return Err(BoardError::AssignmentNotFound {
                        task: self.id.clone(),
                        user: self.user_id.clone(),
                    });
                }
                tx.delete_assignee(self.id.clone(), self.user_id.clone());
                Ok(list.board_id)
            })
            .await?;

        ctx.record(
            &board_id,
            &self.acting_user,
            ActivityKind::TaskUnassigned {
                task: self.id.clone(),
                assignee: self.user_id.clone(),
            },
        )
        .await;
        ctx.emit(
            &board_id,
            BoardEvent::TaskUnassigned {
                task_id: self.id.clone(),
                user_id: self.user_id.clone(),
            },
        )
        .await;

        Ok(serde_json::json!({
            "unassigned": true,
            "task_id": self.id,
            "user_id": self.user_id,
        }))
    }
}
