//! UpdateTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::membership::require_member;
use crate::op::Execute;
use crate::types::{ActivityKind, BoardEvent, TaskId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Edit a task's content fields. Position and list are untouched here —
/// moves go through [`MoveTask`](crate::task::MoveTask).
#[derive(Debug, Deserialize)]
pub struct UpdateTask {
    /// The task to update
    pub id: TaskId,
    /// New title, if changing
    pub title: Option<String>,
    /// New description, if changing
    pub description: Option<String>,
    /// New due date, if changing
    pub due_date: Option<DateTime<Utc>>,
    /// The acting user
    pub acting_user: UserId,
}

impl UpdateTask {
    pub fn new(id: impl Into<TaskId>, acting_user: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            due_date: None,
            acting_user: acting_user.into(),
        }
    }

    /// Set a new title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set a new description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set a new due date
    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }
}

#[async_trait]
impl Execute for UpdateTask {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let (task, board_id) = ctx
            .store()
            .transaction(|tx| {
                let mut task =
                    tx.tables()
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

                if let Some(ref title) = self.title {
                    task.title = title.clone();
                }
                if let Some(ref description) = self.description {
                    task.description = description.clone();
                }
                if let Some(due) = self.due_date {
                    task.due_date = Some(due);
                }
                task.updated_at = Utc::now();
                tx.put_task(task.clone());
                Ok((task, list.board_id))
            })
            .await?;

        ctx.record(
            &board_id,
            &self.acting_user,
            ActivityKind::TaskUpdated {
                task: task.id.clone(),
                title: task.title.clone(),
            },
        )
        .await;
        ctx.emit(&board_id, BoardEvent::TaskUpdated { task: task.clone() })
            .await;

        let mut result = serde_json::to_value(&task)?;
        result["board_id"] = serde_json::json!(board_id);
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::broadcast::RecordingBroadcaster;
    use crate::list::CreateList;
    use crate::store::Store;
    use crate::task::CreateTask;
    use crate::types::{BoardId, ListId, UserProfile};
    use std::sync::Arc;

    async fn setup() -> (BoardContext, TaskId) {
        let store = Arc::new(Store::new());
        store.upsert_user(UserProfile::new("alice", "Alice")).await;
        let ctx = BoardContext::new(store, Arc::new(RecordingBroadcaster::new()));
        let board = CreateBoard::new("Test", "alice").execute(&ctx).await.unwrap();
        let board_id = BoardId::from(board["id"].as_str().unwrap());
        let list = CreateList::new(board_id, "To Do", "alice")
            .execute(&ctx)
            .await
            .unwrap();
        let task = CreateTask::new(ListId::from(list["id"].as_str().unwrap()), "T", "alice")
            .execute(&ctx)
            .await
            .unwrap();
        (ctx, TaskId::from(task["id"].as_str().unwrap()))
    }

    #[tokio::test]
    async fn test_update_content_fields() {
        let (ctx, task_id) = setup().await;
        let due = Utc::now();
        let result = UpdateTask::new(task_id, "alice")
            .with_title("Renamed")
            .with_description("details")
            .with_due_date(due)
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(result["title"], "Renamed");
        assert_eq!(result["description"], "details");
        assert!(result["due_date"].is_string());
        // position untouched
        assert_eq!(result["position"], 0);
    }

    #[tokio::test]
    async fn test_update_unknown_task() {
        let (ctx, _) = setup().await;
        let result = UpdateTask::new("missing", "alice")
            .with_title("x")
            .execute(&ctx)
            .await;
        assert!(matches!(result, Err(BoardError::TaskNotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_requires_membership() {
        let (ctx, task_id) = setup().await;
        let result = UpdateTask::new(task_id, "eve")
            .with_title("x")
            .execute(&ctx)
            .await;
        assert!(matches!(result, Err(BoardError::NotMember { .. })));
    }
}
