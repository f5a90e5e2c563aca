//! DeleteTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::membership::require_member;
use crate::op::Execute;
use crate::sequencer;
use crate::types::{ActivityKind, BoardEvent, TaskId, UserId};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Delete a task and close the gap it leaves among its siblings, in one
/// transaction. Assignment rows go with it.
#[derive(Debug, Deserialize)]
pub struct DeleteTask {
    /// The task to delete
    pub id: TaskId,
    /// The acting user
    pub acting_user: UserId,
}

impl DeleteTask {
    pub fn new(id: impl Into<TaskId>, acting_user: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            acting_user: acting_user.into(),
        }
    }
}

#[async_trait]
impl Execute for DeleteTask {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let (task, board_id) = ctx
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

                let siblings = tx.tables().task_slots(&task.list_id);
                tx.shift_tasks(sequencer::delete_shifts(&siblings, task.position));
                tx.delete_task(task.id.clone());
                Ok((task, list.board_id))
            })
            .await?;

        ctx.record(
            &board_id,
            &self.acting_user,
            ActivityKind::TaskDeleted {
                task: task.id.clone(),
                title: task.title.clone(),
            },
        )
        .await;
        ctx.emit(
            &board_id,
            BoardEvent::TaskDeleted {
                task_id: task.id.clone(),
                list_id: task.list_id.clone(),
                board_id: board_id.clone(),
            },
        )
        .await;

        Ok(serde_json::json!({
            "deleted": true,
            "id": task.id,
            "list_id": task.list_id,
            "board_id": board_id,
        }))
    }
}
