//! Real-time fan-out of mutation events
//!
//! A room per board: every client subscribed to a board receives the events
//! its mutations commit. Delivery is best-effort and at-least-once within a
//! connected session; a client that was disconnected (or lagged past the
//! channel capacity) misses events and recovers by re-fetching the board
//! snapshot on rejoin.
//!
//! The broadcaster is an injected collaborator — mutation services receive it
//! by constructor parameter, and tests substitute a no-op or recording
//! implementation.

use crate::types::{BoardEvent, BoardId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, Mutex};
use tokio::task::JoinHandle;

/// Event fan-out keyed by board.
#[async_trait]
pub trait Broadcast: Send + Sync {
    /// Emit an event to every subscriber of the board's room. Must not fail
    /// the caller: a room with no subscribers swallows the event.
    async fn emit_to_board(&self, board_id: &BoardId, event: BoardEvent);
}

/// Production fan-out: one lazily-created broadcast channel per board room.
pub struct BoardRooms {
    rooms: Mutex<HashMap<BoardId, broadcast::Sender<BoardEvent>>>,
    capacity: usize,
}

impl BoardRooms {
    /// Channel capacity bounds how far a slow subscriber may fall behind
    /// before it observes a lag gap and must re-fetch.
    pub fn new(capacity: usize) -> Self {
        Self {
            rooms: Mutex::new(HashMap::new()),
            capacity,
        }
    }

    /// Subscribe to a board's room, creating the room on first use.
    pub async fn subscribe(&self, board_id: &BoardId) -> broadcast::Receiver<BoardEvent> {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(board_id.clone())
            .or_insert_with(|| broadcast::channel(self.capacity).0)
            .subscribe()
    }

    /// Number of live subscribers in a room
    pub async fn subscriber_count(&self, board_id: &BoardId) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.get(board_id).map_or(0, |tx| tx.receiver_count())
    }
}

impl Default for BoardRooms {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl Broadcast for BoardRooms {
    async fn emit_to_board(&self, board_id: &BoardId, event: BoardEvent) {
        let rooms = self.rooms.lock().await;
        if let Some(tx) = rooms.get(board_id) {
            // send only errors when there are no receivers; the event is
            // simply dropped, same as an empty room
            let _ = tx.send(event);
        }
    }
}

/// One client connection's view of the rooms it has joined.
///
/// Events from every joined room funnel into a single stream, in per-room
/// order. `join` and `leave` are idempotent: joining a room already joined
/// and leaving a room not joined are both no-ops.
pub struct ClientSession {
    rooms: Arc<BoardRooms>,
    forwarders: HashMap<BoardId, JoinHandle<()>>,
    tx: mpsc::UnboundedSender<(BoardId, BoardEvent)>,
    rx: mpsc::UnboundedReceiver<(BoardId, BoardEvent)>,
}

impl ClientSession {
    pub fn new(rooms: Arc<BoardRooms>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            rooms,
            forwarders: HashMap::new(),
            tx,
            rx,
        }
    }

    /// Join a board room. No-op if already joined.
    pub async fn join(&mut self, board_id: BoardId) {
        if self.forwarders.contains_key(&board_id) {
            return;
        }
        let mut room_rx = self.rooms.subscribe(&board_id).await;
        let out = self.tx.clone();
        let forwarded_board = board_id.clone();
        let handle = tokio::spawn(async move {
            loop {
                match room_rx.recv().await {
                    Ok(event) => {
                        if out.send((forwarded_board.clone(), event)).is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        // the client now has a gap; it must re-fetch the
                        // board snapshot, the same path as a reconnect
                        tracing::warn!(
                            board = %forwarded_board,
                            missed,
                            "subscriber lagged behind room events"
                        );
                    }
                }
            }
        });
        self.forwarders.insert(board_id, handle);
    }

    /// Leave a board room. No-op if not joined.
    pub fn leave(&mut self, board_id: &BoardId) {
        if let Some(handle) = self.forwarders.remove(board_id) {
            handle.abort();
        }
    }

    /// Whether this session is currently joined to the room
    pub fn is_joined(&self, board_id: &BoardId) -> bool {
        self.forwarders.contains_key(board_id)
    }

    /// Next event from any joined room
    pub async fn recv(&mut self) -> Option<(BoardId, BoardEvent)> {
        self.rx.recv().await
    }
}

impl Drop for ClientSession {
    fn drop(&mut self) {
        for handle in self.forwarders.values() {
            handle.abort();
        }
    }
}

/// Discards every event. For contexts that have no real-time consumers.
pub struct NoopBroadcaster;

#[async_trait]
impl Broadcast for NoopBroadcaster {
    async fn emit_to_board(&self, _board_id: &BoardId, _event: BoardEvent) {}
}

/// Records every emitted event in order. Test collaborator.
#[derive(Default)]
pub struct RecordingBroadcaster {
    events: Mutex<Vec<(BoardId, BoardEvent)>>,
}

impl RecordingBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// All events emitted so far
    pub async fn events(&self) -> Vec<(BoardId, BoardEvent)> {
        self.events.lock().await.clone()
    }

    /// Event names emitted so far, in order
    pub async fn event_names(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .await
            .iter()
            .map(|(_, e)| e.name())
            .collect()
    }
}

#[async_trait]
impl Broadcast for RecordingBroadcaster {
    async fn emit_to_board(&self, board_id: &BoardId, event: BoardEvent) {
        self.events.lock().await.push((board_id.clone(), event));
    }
}
