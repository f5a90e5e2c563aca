//! CreateTask command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::membership::require_member;
use crate::op::Execute;
use crate::sequencer;
use crate::types::{ActivityKind, BoardEvent, ListId, Task, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Add a task to a list. The owning board is resolved through the list, and
/// the new task always appends.
#[derive(Debug, Deserialize)]
pub struct CreateTask {
    /// The target list
    pub list_id: ListId,
    /// The task title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// Optional due date
    pub due_date: Option<DateTime<Utc>>,
    /// The acting user
    pub acting_user: UserId,
}

impl CreateTask {
    pub fn new(
        list_id: impl Into<ListId>,
        title: impl Into<String>,
        acting_user: impl Into<UserId>,
    ) -> Self {
        Self {
            list_id: list_id.into(),
            title: title.into(),
            description: None,
            due_date: None,
            acting_user: acting_user.into(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the due date
    pub fn with_due_date(mut self, due: DateTime<Utc>) -> Self {
        self.due_date = Some(due);
        self
    }
}

#[async_trait]
impl Execute for CreateTask {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let (task, board_id) = ctx
            .store()
            .transaction(|tx| {
                let list = tx
                    .tables()
                    .list(&self.list_id)
                    .cloned()
                    .ok_or(BoardError::ListNotFound {
                        id: self.list_id.clone(),
                    })?;
                require_member(tx.tables(), &list.board_id, &self.acting_user)?;

                let max = tx
                    .tables()
                    .tasks_in(&self.list_id)
                    .iter()
                    .map(|t| t.position)
                    .max();
                let mut task = Task::new(
                    self.list_id.clone(),
                    self.title.clone(),
                    sequencer::insert_position(max),
                );
                if let Some(ref description) = self.description {
                    task = task.with_description(description.clone());
                }
                if let Some(due) = self.due_date {
                    task = task.with_due_date(due);
                }
                tx.put_task(task.clone());
                Ok((task, list.board_id))
            })
            .await?;

        ctx.record(
            &board_id,
            &self.acting_user,
            ActivityKind::TaskCreated {
                task: task.id.clone(),
                title: task.title.clone(),
            },
        )
        .await;
        ctx.emit(&board_id, BoardEvent::TaskCreated { task: task.clone() })
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
    use crate::types::{BoardId, UserProfile};
    use std::sync::Arc;

    async fn setup() -> (BoardContext, Arc<Store>, Arc<RecordingBroadcaster>, BoardId, ListId) {
        let store = Arc::new(Store::new());
        store.upsert_user(UserProfile::new("alice", "Alice")).await;
        let recorder = Arc::new(RecordingBroadcaster::new());
        let ctx = BoardContext::new(store.clone(), recorder.clone());
        let board = CreateBoard::new("Test", "alice").execute(&ctx).await.unwrap();
        let board_id = BoardId::from(board["id"].as_str().unwrap());
        let list = CreateList::new(board_id.clone(), "To Do", "alice")
            .execute(&ctx)
            .await
            .unwrap();
        let list_id = ListId::from(list["id"].as_str().unwrap());
        (ctx, store, recorder, board_id, list_id)
    }

    #[tokio::test]
    async fn test_create_task_appends() {
        let (ctx, _, _, _, list_id) = setup().await;

        let first = CreateTask::new(list_id.clone(), "A", "alice")
            .execute(&ctx)
            .await
            .unwrap();
        let second = CreateTask::new(list_id, "B", "alice")
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(first["position"], 0);
        assert_eq!(second["position"], 1);
    }

    #[tokio::test]
    async fn test_create_task_carries_board_id() {
        let (ctx, _, _, board_id, list_id) = setup().await;
        let result = CreateTask::new(list_id, "A", "alice")
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(result["board_id"], board_id.as_str());
    }

    #[tokio::test]
    async fn test_create_task_broadcasts() {
        let (ctx, _, recorder, _, list_id) = setup().await;
        CreateTask::new(list_id, "A", "alice")
            .execute(&ctx)
            .await
            .unwrap();
        assert!(recorder.event_names().await.contains(&"task:created"));
    }

    #[tokio::test]
    async fn test_non_member_leaves_no_trace() {
        let (ctx, store, _, board_id, list_id) = setup().await;

        let result = CreateTask::new(list_id.clone(), "Sneaky", "eve")
            .execute(&ctx)
            .await;
        assert!(matches!(result, Err(BoardError::NotMember { .. })));

        // nothing persisted, nothing logged
        let (task_count, history) = store
            .read(|t| {
                (
                    t.tasks_in(&list_id).len(),
                    t.activity_for(&board_id)
                        .iter()
                        .filter(|a| a.kind.action() == "task_created")
                        .count(),
                )
            })
            .await;
        assert_eq!(task_count, 0);
        assert_eq!(history, 0);
    }

    #[tokio::test]
    async fn test_create_task_unknown_list() {
        let (ctx, _, _, _, _) = setup().await;
        let result = CreateTask::new("missing", "A", "alice").execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::ListNotFound { .. })));
    }
}
