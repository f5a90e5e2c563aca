//! DeleteBoard command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::membership::require_admin;
use crate::op::Execute;
use crate::types::{ActivityKind, BoardEvent, BoardId, UserId};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Delete a board and everything it owns: lists, their tasks, assignment
/// rows, memberships. Admin only. History entries survive.
#[derive(Debug, Deserialize)]
pub struct DeleteBoard {
    /// The board to delete
    pub id: BoardId,
    /// The acting user
    pub acting_user: UserId,
}

impl DeleteBoard {
    pub fn new(id: impl Into<BoardId>, acting_user: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            acting_user: acting_user.into(),
        }
    }
}

#[async_trait]
impl Execute for DeleteBoard {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let title = ctx
            .store()
            .transaction(|tx| {
                require_admin(tx.tables(), &self.id, &self.acting_user)?;
                let board = tx
                    .tables()
                    .board(&self.id)
                    .cloned()
                    .ok_or(BoardError::BoardNotFound {
                        id: self.id.clone(),
                    })?;
                tx.delete_board(self.id.clone());
                Ok(board.title)
            })
            .await?;

        ctx.record(
            &self.id,
            &self.acting_user,
            ActivityKind::BoardDeleted {
                title: title.clone(),
            },
        )
        .await;
        ctx.emit(
            &self.id,
            BoardEvent::BoardDeleted {
                board_id: self.id.clone(),
            },
        )
        .await;

        Ok(serde_json::json!({
            "deleted": true,
            "id": self.id,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::broadcast::RecordingBroadcaster;
    use crate::list::CreateList;
    use crate::store::Store;
    use crate::types::{ListId, UserProfile};
    use std::sync::Arc;

    async fn setup() -> (BoardContext, Arc<Store>, BoardId) {
        let store = Arc::new(Store::new());
        store.upsert_user(UserProfile::new("alice", "Alice")).await;
        let ctx = BoardContext::new(store.clone(), Arc::new(RecordingBroadcaster::new()));
        let board = CreateBoard::new("Test", "alice").execute(&ctx).await.unwrap();
        let board_id = BoardId::from(board["id"].as_str().unwrap());
        (ctx, store, board_id)
    }

    #[tokio::test]
    async fn test_delete_cascades_lists() {
        let (ctx, store, board_id) = setup().await;
        let list = CreateList::new(board_id.clone(), "To Do", "alice")
            .execute(&ctx)
            .await
            .unwrap();
        let list_id = ListId::from(list["id"].as_str().unwrap());

        let result = DeleteBoard::new(board_id.clone(), "alice")
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(result["deleted"], true);

        let (board_gone, list_gone) = store
            .read(|t| (t.board(&board_id).is_none(), t.list(&list_id).is_none()))
            .await;
        assert!(board_gone);
        assert!(list_gone);
    }

    #[tokio::test]
    async fn test_history_survives_deletion() {
        let (ctx, store, board_id) = setup().await;
        DeleteBoard::new(board_id.clone(), "alice")
            .execute(&ctx)
            .await
            .unwrap();

        let actions = store
            .read(|t| {
                t.activity_for(&board_id)
                    .iter()
                    .map(|a| a.kind.action())
                    .collect::<Vec<_>>()
            })
            .await;
        assert_eq!(actions, vec!["board_deleted", "board_created"]);
    }

    #[tokio::test]
    async fn test_delete_unknown_board() {
        let (ctx, _, _) = setup().await;
        let result = DeleteBoard::new("missing", "alice").execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::BoardNotFound { .. })));
    }
}
