//! MoveTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::membership::require_member;
use crate::op::Execute;
use crate::sequencer;
use crate::types::{ActivityKind, BoardEvent, ListId, TaskId, UserId};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

/// Move a task to a new position, within its list or into another list of
/// the same board. Cross-board moves are rejected.
///
/// A same-list move shifts the intervening siblings; a cross-list move closes
/// the gap in the source list and opens a slot in the destination. Every
/// shift plus the task's own list/position update commits in one transaction.
#[derive(Debug, Deserialize)]
pub struct MoveTask {
    /// The task to move
    pub id: TaskId,
    /// The destination list (may be the task's current list)
    pub list_id: ListId,
    /// The destination position. For a cross-list move this is clamped to
    /// the destination size; for a same-list move it must be in range.
    pub position: u32,
    /// The acting user
    pub acting_user: UserId,
}

impl MoveTask {
    pub fn new(
        id: impl Into<TaskId>,
        list_id: impl Into<ListId>,
        position: u32,
        acting_user: impl Into<UserId>,
    ) -> Self {
        Self {
            id: id.into(),
            list_id: list_id.into(),
            position,
            acting_user: acting_user.into(),
        }
    }
}

#[async_trait]
impl Execute for MoveTask {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let (task, board_id, from_list, from_title, to_title) = ctx
            .store()
            .transaction(|tx| {
                let mut task =
                    tx.tables()
                        .task(&self.id)
                        .cloned()
                        .ok_or(BoardError::TaskNotFound {
                            id: self.id.clone(),
                        })?;
                let source_list = tx
                    .tables()
                    .list(&task.list_id)
                    .cloned()
                    .ok_or(BoardError::ListNotFound {
                        id: task.list_id.clone(),
                    })?;
                require_member(tx.tables(), &source_list.board_id, &self.acting_user)?;

                let dest_list = tx
                    .tables()
                    .list(&self.list_id)
                    .cloned()
                    .ok_or(BoardError::ListNotFound {
                        id: self.list_id.clone(),
                    })?;
                if dest_list.board_id != source_list.board_id {
                    return Err(BoardError::CrossBoardMove {
                        task: task.id.clone(),
                        dest: dest_list.id.clone(),
                    });
                }

                let from_list = task.list_id.clone();
                if dest_list.id == task.list_id {
                    let siblings = tx.tables().task_slots(&task.list_id);
                    // the task stays inside its list: targets are [0, n-1]
                    if self.position as usize >= siblings.len() {
                        return Err(BoardError::PositionOutOfRange {
                            position: self.position,
                            len: siblings.len(),
                        });
                    }
                    tx.shift_tasks(sequencer::reorder_shifts(
                        &siblings,
                        &task.id,
                        task.position,
                        self.position,
                    ));
                    task.position = self.position;
                } else {
                    let source = tx.tables().task_slots(&task.list_id);
                    let dest = tx.tables().task_slots(&dest_list.id);
                    let new_pos = self.position.min(dest.len() as u32);
                    let (source_shifts, dest_shifts) =
                        sequencer::cross_parent_shifts(&source, &dest, task.position, new_pos);
                    tx.shift_tasks(source_shifts);
                    tx.shift_tasks(dest_shifts);
                    task.list_id = dest_list.id.clone();
                    task.position = new_pos;
                }

                task.updated_at = Utc::now();
                tx.put_task(task.clone());
                Ok((
                    task,
                    source_list.board_id,
                    from_list,
                    source_list.title,
                    dest_list.title,
                ))
            })
            .await?;

        ctx.record(
            &board_id,
            &self.acting_user,
            ActivityKind::TaskMoved {
                task: task.id.clone(),
                title: task.title.clone(),
                from_list: from_title,
                to_list: to_title,
            },
        )
        .await;
        ctx.emit(
            &board_id,
            BoardEvent::TaskMoved {
                task: task.clone(),
                from_list,
            },
        )
        .await;

        let mut result = serde_json::to_value(&task)?;
        result["board_id"] = serde_json::json!(board_id);
        Ok(result)
    }
}
