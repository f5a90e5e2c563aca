//! AssignTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::membership::require_member;
use crate::op::Execute;
use crate::types::{ActivityKind, BoardEvent, TaskAssignee, TaskId, UserId};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Assign a user to a task. Both the acting user and the assignee must be
/// members of the task's board; a repeat assignment is a conflict.
#[derive(Debug, Deserialize)]
pub struct AssignTask {
    /// The task to assign
    pub id: TaskId,
    /// The user being assigned
    pub assignee: UserId,
    /// The acting user
    pub acting_user: UserId,
}

impl AssignTask {
    pub fn new(
        id: impl Into<TaskId>,
        assignee: impl Into<UserId>,
        acting_user: impl Into<UserId>,
    ) -> Self {
        Self {
            id: id.into(),
            assignee: assignee.into(),
            acting_user: acting_user.into(),
        }
    }
}

#[async_trait]
impl Execute for AssignTask {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let (assignee_row, board_id, assignee_name) = ctx
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
                // the assignee must belong to the board too
                require_member(tx.tables(), &list.board_id, &self.assignee)?;

                if tx.tables().is_assigned(&self.id, &self.assignee) {
                    return Err(BoardError::AlreadyAssigned {
                        task: self.id.clone(),
                        user: self.assignee.clone(),
                    });
                }

                let assignee_name = tx
                    .tables()
                    .user(&self.assignee)
                    .map(|u| u.name.clone())
                    .unwrap_or_else(|| self.assignee.to_string());
                let row = TaskAssignee::new(self.id.clone(), self.assignee.clone());
                tx.put_assignee(row.clone());
                Ok((row, list.board_id, assignee_name))
            })
            .await?;

        ctx.record(
            &board_id,
            &self.acting_user,
            ActivityKind::TaskAssigned {
                task: self.id.clone(),
                assignee: self.assignee.clone(),
                assignee_name,
            },
        )
        .await;
        ctx.emit(
            &board_id,
            BoardEvent::TaskAssigned {
                task_id: self.id.clone(),
                user_id: self.assignee.clone(),
            },
        )
        .await;

        Ok(serde_json::to_value(&assignee_row)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::broadcast::RecordingBroadcaster;
    use crate::list::CreateList;
    use crate::member::AddMember;
    use crate::store::Store;
    use crate::task::CreateTask;
    use crate::types::{BoardId, ListId, Role, UserProfile};
    use std::sync::Arc;

    async fn setup() -> (BoardContext, Arc<Store>, BoardId, TaskId) {
        let store = Arc::new(Store::new());
        store.upsert_user(UserProfile::new("alice", "Alice")).await;
        store.upsert_user(UserProfile::new("bob", "Bob")).await;
        store.upsert_user(UserProfile::new("eve", "Eve")).await;
        let ctx = BoardContext::new(store.clone(), Arc::new(RecordingBroadcaster::new()));
        let board = CreateBoard::new("Test", "alice").execute(&ctx).await.unwrap();
        let board_id = BoardId::from(board["id"].as_str().unwrap());
        AddMember::new(board_id.clone(), "bob", Role::Member, "alice")
            .execute(&ctx)
            .await
            .unwrap();
        let list = CreateList::new(board_id.clone(), "To Do", "alice")
            .execute(&ctx)
            .await
            .unwrap();
        let task = CreateTask::new(ListId::from(list["id"].as_str().unwrap()), "T", "alice")
            .execute(&ctx)
            .await
            .unwrap();
        (
            ctx,
            store,
            board_id,
            TaskId::from(task["id"].as_str().unwrap()),
        )
    }

    #[tokio::test]
    async fn test_assign_member() {
        let (ctx, store, _, task_id) = setup().await;
        let result = AssignTask::new(task_id.clone(), "bob", "alice")
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(result["user_id"], "bob");

        let assigned = store
            .read(|t| t.is_assigned(&task_id, &UserId::from("bob")))
            .await;
        assert!(assigned);
    }

    #[tokio::test]
    async fn test_assign_logs_assignee_name() {
        let (ctx, store, board_id, task_id) = setup().await;
        AssignTask::new(task_id.clone(), "bob", "alice")
            .execute(&ctx)
            .await
            .unwrap();

        let kind = store
            .read(|t| t.activity_for(&board_id)[0].kind.clone())
            .await;
        assert_eq!(
            kind,
            ActivityKind::TaskAssigned {
                task: task_id,
                assignee: UserId::from("bob"),
                assignee_name: "Bob".into(),
            }
        );
    }

    #[tokio::test]
    async fn test_assign_duplicate_conflict() {
        let (ctx, _, _, task_id) = setup().await;
        AssignTask::new(task_id.clone(), "bob", "alice")
            .execute(&ctx)
            .await
            .unwrap();
        let result = AssignTask::new(task_id, "bob", "alice").execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::AlreadyAssigned { .. })));
    }

    #[tokio::test]
    async fn test_assign_non_member_rejected() {
        let (ctx, store, _, task_id) = setup().await;
        // eve exists in the directory but is not on the board
        let result = AssignTask::new(task_id.clone(), "eve", "alice")
            .execute(&ctx)
            .await;
        assert!(matches!(result, Err(BoardError::NotMember { .. })));

        let assigned = store
            .read(|t| t.is_assigned(&task_id, &UserId::from("eve")))
            .await;
        assert!(!assigned);
    }

    #[tokio::test]
    async fn test_actor_must_be_member() {
        let (ctx, _, _, task_id) = setup().await;
        let result = AssignTask::new(task_id, "bob", "eve").execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::NotMember { .. })));
    }
}
