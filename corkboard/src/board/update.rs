//! UpdateBoard command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::membership::require_admin;
use crate::op::Execute;
use crate::types::{ActivityKind, BoardEvent, BoardId, UserId};
use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;

/// Update a board's title and/or description. Admin only.
#[derive(Debug, Deserialize)]
pub struct UpdateBoard {
    /// The board to update
    pub id: BoardId,
    /// New title, if changing
    pub title: Option<String>,
    /// New description, if changing
    pub description: Option<String>,
    /// The acting user
    pub acting_user: UserId,
}

impl UpdateBoard {
    pub fn new(id: impl Into<BoardId>, acting_user: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
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
}

#[async_trait]
impl Execute for UpdateBoard {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let board = ctx
            .store()
            .transaction(|tx| {
                require_admin(tx.tables(), &self.id, &self.acting_user)?;
                let mut board = tx
                    .tables()
                    .board(&self.id)
                    .cloned()
                    .ok_or(BoardError::BoardNotFound {
                        id: self.id.clone(),
                    })?;

                if let Some(ref title) = self.title {
                    board.title = title.clone();
                }
                if let Some(ref description) = self.description {
                    board.description = Some(description.clone());
                }
                board.updated_at = Utc::now();
                tx.put_board(board.clone());
                Ok(board)
            })
            .await?;

        ctx.record(
            &board.id,
            &self.acting_user,
            ActivityKind::BoardUpdated {
                title: board.title.clone(),
            },
        )
        .await;
        ctx.emit(
            &self.id,
            BoardEvent::BoardUpdated {
                board: board.clone(),
            },
        )
        .await;

        Ok(serde_json::to_value(&board)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreateBoard;
    use crate::broadcast::RecordingBroadcaster;
    use crate::member::AddMember;
    use crate::store::Store;
    use crate::types::{Role, UserProfile};
    use std::sync::Arc;

    async fn setup() -> (BoardContext, BoardId) {
        let store = Arc::new(Store::new());
        store.upsert_user(UserProfile::new("alice", "Alice")).await;
        store.upsert_user(UserProfile::new("bob", "Bob")).await;
        let ctx = BoardContext::new(store, Arc::new(RecordingBroadcaster::new()));
        let board = CreateBoard::new("Test", "alice").execute(&ctx).await.unwrap();
        let board_id = BoardId::from(board["id"].as_str().unwrap());
        (ctx, board_id)
    }

    #[tokio::test]
    async fn test_update_title() {
        let (ctx, board_id) = setup().await;
        let result = UpdateBoard::new(board_id, "alice")
            .with_title("Renamed")
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(result["title"], "Renamed");
    }

    #[tokio::test]
    async fn test_plain_member_cannot_update_board() {
        let (ctx, board_id) = setup().await;
        AddMember::new(board_id.clone(), "bob", Role::Member, "alice")
            .execute(&ctx)
            .await
            .unwrap();

        let result = UpdateBoard::new(board_id, "bob")
            .with_title("Hijacked")
            .execute(&ctx)
            .await;
        assert!(matches!(result, Err(BoardError::AdminRequired { .. })));
    }
}
