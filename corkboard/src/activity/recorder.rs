//! Activity recording
//!
//! Every mutation records one history entry. Recording is best-effort from
//! the mutation's point of view: a failure here is traced and swallowed,
//! never surfaced to the caller — the primary mutation has already committed.

use crate::broadcast::Broadcast;
use crate::store::Store;
use crate::types::{Activity, ActivityKind, BoardEvent, BoardId, UserId};
use std::sync::Arc;

/// Appends history entries and announces them to the board room.
#[derive(Clone)]
pub struct ActivityRecorder {
    store: Arc<Store>,
    broadcaster: Arc<dyn Broadcast>,
}

impl ActivityRecorder {
    pub fn new(store: Arc<Store>, broadcaster: Arc<dyn Broadcast>) -> Self {
        Self { store, broadcaster }
    }

    /// Record one entry. Never fails the caller.
    pub async fn record(&self, board_id: &BoardId, actor: &UserId, kind: ActivityKind) {
        let entry = Activity::new(board_id.clone(), actor.clone(), kind);
        if let Err(error) = self.store.append_activity(entry.clone()).await {
            tracing::warn!(%board_id, %error, "failed to record activity entry");
            return;
        }
        self.broadcaster
            .emit_to_board(board_id, BoardEvent::ActivityCreated { activity: entry })
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadcast::RecordingBroadcaster;

    #[tokio::test]
    async fn test_record_is_newest_first_in_history() {
        let store = Arc::new(Store::new());
        let recorder = ActivityRecorder::new(store.clone(), Arc::new(RecordingBroadcaster::new()));
        let board_id = BoardId::from("b1");
        let actor = UserId::from("alice");

        recorder
            .record(&board_id, &actor, ActivityKind::BoardCreated { title: "B".into() })
            .await;
        recorder
            .record(
                &board_id,
                &actor,
                ActivityKind::ListCreated {
                    list: crate::types::ListId::from("l1"),
                    title: "To Do".into(),
                },
            )
            .await;

        let actions = store
            .read(|t| {
                t.activity_for(&board_id)
                    .iter()
                    .map(|a| a.kind.action())
                    .collect::<Vec<_>>()
            })
            .await;
        assert_eq!(actions, vec!["list_created", "board_created"]);
    }
}
