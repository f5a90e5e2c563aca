//! CreateBoard command

use crate::context::BoardContext;
use crate::error::{BoardError, Result};
use crate::op::Execute;
use crate::types::{ActivityKind, Board, BoardEvent, BoardMember, Role, UserId};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Create a board. The creator becomes its admin member in the same
/// transaction.
#[derive(Debug, Deserialize)]
pub struct CreateBoard {
    /// The board title
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// The acting user (becomes creator and admin)
    pub acting_user: UserId,
}

impl CreateBoard {
    pub fn new(title: impl Into<String>, acting_user: impl Into<UserId>) -> Self {
        Self {
            title: title.into(),
            description: None,
            acting_user: acting_user.into(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[async_trait]
impl Execute for CreateBoard {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value> {
        let board = ctx
            .store()
            .transaction(|tx| {
                if tx.tables().user(&self.acting_user).is_none() {
                    return Err(BoardError::UserNotFound {
                        id: self.acting_user.clone(),
                    });
                }

                let mut board = Board::new(self.title.clone(), self.acting_user.clone());
                if let Some(ref description) = self.description {
                    board = board.with_description(description.clone());
                }
                tx.put_member(BoardMember::new(
                    board.id.clone(),
                    self.acting_user.clone(),
                    Role::Admin,
                ));
                tx.put_board(board.clone());
                Ok(board)
            })
            .await?;

        ctx.record(
            &board.id,
            &self.acting_user,
            ActivityKind::BoardCreated {
                title: board.title.clone(),
            },
        )
        .await;
        ctx.emit(
            &board.id,
            BoardEvent::BoardCreated {
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
    use crate::broadcast::RecordingBroadcaster;
    use crate::store::Store;
    use crate::types::{BoardId, UserProfile};
    use std::sync::Arc;

    async fn setup() -> (BoardContext, Arc<Store>) {
        let store = Arc::new(Store::new());
        store.upsert_user(UserProfile::new("alice", "Alice")).await;
        let ctx = BoardContext::new(store.clone(), Arc::new(RecordingBroadcaster::new()));
        (ctx, store)
    }

    #[tokio::test]
    async fn test_create_board() {
        let (ctx, store) = setup().await;

        let result = CreateBoard::new("Roadmap", "alice")
            .with_description("Q3 planning")
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(result["title"], "Roadmap");
        assert_eq!(result["description"], "Q3 planning");
        assert_eq!(result["creator"], "alice");

        let board_id = BoardId::from(result["id"].as_str().unwrap());
        let role = store
            .read(|t| t.member(&board_id, &UserId::from("alice")).map(|m| m.role))
            .await;
        assert_eq!(role, Some(Role::Admin));
    }

    #[tokio::test]
    async fn test_create_board_unknown_user() {
        let (ctx, _) = setup().await;
        let result = CreateBoard::new("Roadmap", "ghost").execute(&ctx).await;
        assert!(matches!(result, Err(BoardError::UserNotFound { .. })));
    }

    #[tokio::test]
    async fn test_create_board_logs_history() {
        let (ctx, store) = setup().await;
        let result = CreateBoard::new("Roadmap", "alice")
            .execute(&ctx)
            .await
            .unwrap();
        let board_id = BoardId::from(result["id"].as_str().unwrap());

        let actions = store
            .read(|t| {
                t.activity_for(&board_id)
                    .iter()
                    .map(|a| a.kind.action())
                    .collect::<Vec<_>>()
            })
            .await;
        assert_eq!(actions, vec!["board_created"]);
    }
}
