//! CreateList command

use crate::context::BoardContext;
use crate::error::Result;
use crate::membership::require_member;
use crate::op::Execute;
use crate::sequencer;
use crate::types::{ActivityKind, BoardEvent, BoardId, List, UserId};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Add a list to a board. New lists always append: the position is the
/// current maximum plus one.
#[derive(Debug, Deserialize)]
pub struct CreateList {
    /// The owning board
    pub board_id: BoardId,
    /// The list title
    pub title: String,
    /// The acting user
    pub acting_user: UserId,
}

impl CreateList {
    pub fn new(
        board_id: impl Into<BoardId>,
        title: impl Into<String>,
        acting_user: impl Into<UserId>,
    ) -> Self {
        Self {
            board_id: board_id.into(),
            title: title.into(),
            acting_user: acting_user.into(),
        }
    }
}

#[async_trait]
impl Execute for CreateList {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let list = ctx
            .store()
            .transaction(|tx| {
                require_member(tx.tables(), &self.board_id, &self.acting_user)?;
                let max = tx
                    .tables()
                    .lists_in(&self.board_id)
                    .iter()
                    .map(|l| l.position)
                    .max();
                let list = List::new(
                    self.board_id.clone(),
                    self.title.clone(),
                    sequencer::insert_position(max),
                );
                tx.put_list(list.clone());
                Ok(list)
            })
            .await?;

        ctx.record(
            &self.board_id,
            &self.acting_user,
            ActivityKind::ListCreated {
                list: list.id.clone(),
                title: list.title.clone(),
            },
        )
        .await;
        ctx.emit(
            &self.board_id,
            BoardEvent::ListCreated { list: list.clone() },
        )
        .await;

        Ok(serde_json::to_value(&list)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::broadcast::RecordingBroadcaster;
    use crate::error::BoardError;
    use crate::store::Store;
    use crate::types::UserProfile;
    use std::sync::Arc;

    async fn setup() -> (BoardContext, Arc<RecordingBroadcaster>, BoardId) {
        let store = Arc::new(Store::new());
        store.upsert_user(UserProfile::new("alice", "Alice")).await;
        let recorder = Arc::new(RecordingBroadcaster::new());
        let ctx = BoardContext::new(store, recorder.clone());
        let board = CreateBoard::new("Test", "alice").execute(&ctx).await.unwrap();
        let board_id = BoardId::from(board["id"].as_str().unwrap());
        (ctx, recorder, board_id)
    }

    #[tokio::test]
    async fn test_create_list_appends() {
        let (ctx, _, board_id) = setup().await;

        let first = CreateList::new(board_id.clone(), "To Do", "alice")
            .execute(&ctx)
            .await
            .unwrap();
        let second = CreateList::new(board_id.clone(), "Doing", "alice")
            .execute(&ctx)
            .await
            .unwrap();
        let third = CreateList::new(board_id, "Done", "alice")
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(first["position"], 0);
        assert_eq!(second["position"], 1);
        assert_eq!(third["position"], 2);
    }

    #[tokio::test]
    async fn test_create_list_broadcasts() {
        let (ctx, recorder, board_id) = setup().await;
        CreateList::new(board_id, "To Do", "alice")
            .execute(&ctx)
            .await
            .unwrap();
        let names = recorder.event_names().await;
        assert!(names.contains(&"list:created"));
    }

    #[tokio::test]
    async fn test_create_list_non_member() {
        let (ctx, _, board_id) = setup().await;
        let result = CreateList::new(board_id, "Sneaky", "eve").execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::NotMember { .. })));
    }

    #[tokio::test]
    async fn test_create_list_unknown_board() {
        let (ctx, _, _) = setup().await;
        let result = CreateList::new("missing", "Orphan", "alice")
            .execute(&ctx)
            .await;
        assert!(matches!(result, Err(BoardError::BoardNotFound { .. })));
    }
}
