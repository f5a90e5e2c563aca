//! Collaborative task board engine
//!
//! This crate provides the server-authoritative core of a kanban-style board:
//! boards own ordered lists, lists own ordered tasks, and the positions among
//! siblings always form a dense zero-based sequence — `{0, 1, ..., n-1}`,
//! no gaps, no duplicates — across concurrent creates, moves, and deletes.
//!
//! ## Overview
//!
//! - **Commands do the work** - Each mutation is a struct executing against a
//!   [`BoardContext`]; the context provides the store, broadcaster, and
//!   activity recorder, all injected.
//! - **One transaction per mutation** - Sibling position shifts and the
//!   primary row update commit together or not at all.
//! - **Membership-gated** - Every operation checks board membership; board
//!   and membership changes additionally require the admin role.
//! - **Broadcast everywhere** - Every committed mutation emits one event to
//!   the owning board's room.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use corkboard::{board::CreateBoard, list::CreateList, task::CreateTask};
//! use corkboard::{BoardContext, Execute, Store, UserProfile};
//! use corkboard::broadcast::BoardRooms;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(Store::new());
//! store.upsert_user(UserProfile::new("alice", "Alice")).await;
//! let ctx = BoardContext::new(store, Arc::new(BoardRooms::default()));
//!
//! let board = CreateBoard::new("Roadmap", "alice").execute(&ctx).await?;
//! let list = CreateList::new(board["id"].as_str().unwrap(), "To Do", "alice")
//!     .execute(&ctx)
//!     .await?;
//! let task = CreateTask::new(list["id"].as_str().unwrap(), "Ship it", "alice")
//!     .execute(&ctx)
//!     .await?;
//!
//! println!("created task: {}", task["id"]);
//! # Ok(())
//! # }
//! ```
//!
//! ## Ordering
//!
//! The [`sequencer`] module holds the pure shift computations behind every
//! reorder, cross-list move, and delete. The client reconciliation layer runs
//! the same functions against its local replica, so an optimistic client and
//! the server always agree on the resulting order.

pub mod broadcast;
mod context;
mod error;
mod membership;
mod op;
pub mod sequencer;
pub mod store;
pub mod types;

// Command modules
pub mod activity;
pub mod board;
pub mod list;
pub mod member;
pub mod task;

pub use context::BoardContext;
pub use error::{BoardError, ErrorKind, Result};
pub use membership::{require_admin, require_member};
pub use op::Execute;
pub use store::{Store, Tables};

// Re-export commonly used types
pub use types::{
    Activity, ActivityId, ActivityKind, Board, BoardEvent, BoardId, BoardMember, BoardSnapshot,
    List, ListId, ListSnapshot, Role, Task, TaskAssignee, TaskId, UserId, UserProfile,
};
