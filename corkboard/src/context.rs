//! BoardContext - collaborators every command executes against
//!
//! The context provides access, not logic: the store, the broadcaster, and
//! the activity recorder, all injected at construction. Commands do the work.

use crate::activity::ActivityRecorder;
use crate::broadcast::Broadcast;
use crate::store::Store;
use crate::types::{ActivityKind, BoardEvent, BoardId, UserId};
use std::sync::Arc;

/// Context passed to every command.
#[derive(Clone)]
pub struct BoardContext {
    store: Arc<Store>,
    broadcaster: Arc<dyn Broadcast>,
    activity: ActivityRecorder,
}

impl BoardContext {
    /// Build a context from its collaborators.
    pub fn new(store: Arc<Store>, broadcaster: Arc<dyn Broadcast>) -> Self {
        let activity = ActivityRecorder::new(store.clone(), broadcaster.clone());
        Self {
            store,
            broadcaster,
            activity,
        }
    }

    /// The transactional store
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// Emit an event to the board's room. Fire-and-forget relative to the
    /// mutation result: emission cannot fail the command.
    pub async fn emit(&self, board_id: &BoardId, event: BoardEvent) {
        self.broadcaster.emit_to_board(board_id, event).await;
    }

    /// Record a history entry, best-effort.
    pub async fn record(&self, board_id: &BoardId, actor: &UserId, kind: ActivityKind) {
        self.activity.record(board_id, actor, kind).await;
    }
}
