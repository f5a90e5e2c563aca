//! Position sequencing for ordered collections
//!
//! Pure functions, no I/O. Every list within a board and every task within a
//! list carries a `position`, and the positions among siblings sharing one
//! parent always form a dense zero-based permutation: `{0, 1, ..., n-1}`,
//! no gaps, no duplicates. These functions compute the minimal set of sibling
//! shifts that keep a collection dense across insert, reorder, cross-parent
//! move, and delete.
//!
//! The same functions run on the server (inside mutation transactions) and on
//! the client (inside the reconciliation layer), so both sides derive
//! identical orderings from identical inputs.
//!
//! Callers validate the target position before invoking a shift computation:
//! `new_pos` must lie in `[0, sibling_count]`, where the sibling count
//! excludes the moved item for a same-parent move and is the full destination
//! size for a cross-parent move. An out-of-range target is a caller bug, not
//! a runtime condition, and is asserted in debug builds.

use serde::{Deserialize, Serialize};

/// One sibling's identity and current position within a single parent scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot<I> {
    pub id: I,
    pub position: u32,
}

impl<I> Slot<I> {
    pub fn new(id: I, position: u32) -> Self {
        Self { id, position }
    }
}

/// A relative position update for one sibling. Deltas are always ±1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift<I> {
    pub id: I,
    pub delta: i32,
}

/// Position for a newly created item: append after the current maximum.
pub fn insert_position(current_max: Option<u32>) -> u32 {
    match current_max {
        Some(max) => max + 1,
        None => 0,
    }
}

/// Sibling shifts for a same-parent move of the item at `old_pos` to
/// `new_pos`. The moved item itself is assigned `new_pos` directly by the
/// caller, never via a delta.
///
/// Moving later pulls the intervening range back by one; moving earlier
/// pushes it forward by one; a no-op move shifts nothing.
pub fn reorder_shifts<I: Clone + PartialEq>(
    siblings: &[Slot<I>],
    moved: &I,
    old_pos: u32,
    new_pos: u32,
) -> Vec<Shift<I>> {
    debug_assert!(
        (new_pos as usize) < siblings.len().max(1),
        "reorder target {new_pos} outside collection of {}",
        siblings.len()
    );

    if new_pos == old_pos {
        return Vec::new();
    }

    siblings
        .iter()
        .filter(|s| &s.id != moved)
        .filter_map(|s| {
            let p = s.position;
            if new_pos > old_pos && p > old_pos && p <= new_pos {
                Some(Shift {
                    id: s.id.clone(),
                    delta: -1,
                })
            } else if new_pos < old_pos && p >= new_pos && p < old_pos {
                Some(Shift {
                    id: s.id.clone(),
                    delta: 1,
                })
            } else {
                None
            }
        })
        .collect()
}

/// Sibling shifts for moving an item from one parent to another: the source
/// collection closes the gap left at `old_pos`, the destination opens a slot
/// at `new_pos`. The moved item is assigned `new_pos` in the destination by
/// the caller.
///
/// The moved item sits at `old_pos` in `source`, so the strict `> old_pos`
/// filter never selects it.
pub fn cross_parent_shifts<I: Clone>(
    source: &[Slot<I>],
    dest: &[Slot<I>],
    old_pos: u32,
    new_pos: u32,
) -> (Vec<Shift<I>>, Vec<Shift<I>>) {
    debug_assert!(
        new_pos as usize <= dest.len(),
        "cross-parent target {new_pos} outside destination of {}",
        dest.len()
    );

    let source_shifts = source
        .iter()
        .filter(|s| s.position > old_pos)
        .map(|s| Shift {
            id: s.id.clone(),
            delta: -1,
        })
        .collect();

    let dest_shifts = dest
        .iter()
        .filter(|s| s.position >= new_pos)
        .map(|s| Shift {
            id: s.id.clone(),
            delta: 1,
        })
        .collect();

    (source_shifts, dest_shifts)
}

/// Sibling shifts after removing the item at `deleted_pos`: everything above
/// it moves down by one.
pub fn delete_shifts<I: Clone>(siblings: &[Slot<I>], deleted_pos: u32) -> Vec<Shift<I>> {
    siblings
        .iter()
        .filter(|s| s.position > deleted_pos)
        .map(|s| Shift {
            id: s.id.clone(),
            delta: -1,
        })
        .collect()
}

/// Whether the slots form a dense zero-based permutation.
pub fn is_dense<I>(slots: &[Slot<I>]) -> bool {
    let mut positions: Vec<u32> = slots.iter().map(|s| s.position).collect();
    positions.sort_unstable();
    positions
        .iter()
        .enumerate()
        .all(|(i, &p)| p == i as u32)
}
