//! Client-side reconciliation for collaborative boards
//!
//! This crate keeps a local replica of one board in sync with the
//! server-authoritative engine:
//!
//! - **Optimistic mutations** - A user action applies to the replica
//!   immediately via [`BoardReplica::apply_local`], using the same position
//!   sequencer the server runs, so the local guess matches what the server
//!   will compute.
//! - **Confirmation** - When the server accepts the mutation, the
//!   authoritative result quietly replaces the guess
//!   ([`BoardReplica::confirm`]); when it rejects, the pre-mutation snapshot
//!   is restored ([`BoardReplica::rollback`]) and the error surfaces.
//! - **Broadcast merge** - Events originated by other clients apply as
//!   authoritative patches ([`BoardReplica::apply_remote`]): replace-by-id
//!   and remove-by-id are idempotent, and creation echoes for ids already
//!   held locally are suppressed.
//!
//! A client that was disconnected misses events and recovers by re-fetching
//! the full board snapshot and calling [`BoardReplica::replace`].

mod error;
mod mutation;
mod replica;

pub use error::{ReplicaError, Result};
pub use mutation::{LocalMutation, PendingMutation, ProvisionalId};
pub use replica::BoardReplica;
