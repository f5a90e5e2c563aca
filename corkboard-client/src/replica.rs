//! The local board replica
//!
//! One replica mirrors one board. Locally-initiated mutations apply
//! immediately with the same density-preserving sequencer the server runs,
//! and every mutation keeps its pre-mutation snapshot so a server rejection
//! rolls the replica back. Events broadcast by other clients' mutations apply
//! as authoritative patches: replace-by-id and remove-by-id are idempotent,
//! and a creation event for an id the replica already holds is a no-op (the
//! echo of this client's own confirmed mutation).

use crate::error::{ReplicaError, Result};
use crate::mutation::{LocalMutation, PendingMutation, ProvisionalId};
use corkboard::sequencer::{self, Shift, Slot};
use corkboard::{
    BoardEvent, BoardSnapshot, List, ListId, ListSnapshot, Task, TaskAssignee, TaskId,
};

/// Client-side view of one board.
#[derive(Debug, Clone)]
pub struct BoardReplica {
    state: BoardSnapshot,
}

impl BoardReplica {
    /// Seed a replica from a server snapshot (board join or re-fetch).
    pub fn new(snapshot: BoardSnapshot) -> Self {
        Self { state: snapshot }
    }

    /// The current local view
    pub fn state(&self) -> &BoardSnapshot {
        &self.state
    }

    /// Replace the whole view with a fresh server snapshot — the recovery
    /// path after a reconnect or a missed-event gap.
    pub fn replace(&mut self, snapshot: BoardSnapshot) {
        self.state = snapshot;
    }

    // =========================================================================
    // Optimistic mutations
    // =========================================================================

    /// Apply a local mutation immediately, before the server confirms it.
    /// The returned pending handle carries the rollback snapshot.
    pub fn apply_local(&mut self, mutation: &LocalMutation) -> Result<PendingMutation> {
        let prior = self.state.clone();
        let provisional = match self.apply_mutation(mutation) {
            Ok(provisional) => provisional,
            Err(error) => {
                self.state = prior;
                return Err(error);
            }
        };
        Ok(PendingMutation { prior, provisional })
    }

    /// The server confirmed the mutation: retire the provisional entity (if
    /// the mutation created one) and adopt the authoritative event.
    pub fn confirm(&mut self, pending: PendingMutation, authoritative: &BoardEvent) {
        match pending.provisional {
            Some(ProvisionalId::List(ref id)) => self.remove_list(id),
            Some(ProvisionalId::Task(ref id)) => self.remove_task(id),
            None => {}
        }
        self.apply_remote(authoritative);
    }

    /// The server rejected the mutation: restore the pre-mutation snapshot.
    pub fn rollback(&mut self, pending: PendingMutation) {
        self.state = pending.prior;
    }

    fn apply_mutation(&mut self, mutation: &LocalMutation) -> Result<Option<ProvisionalId>> {
        match mutation {
            LocalMutation::CreateList { title } => {
                let max = self.state.lists.iter().map(|l| l.list.position).max();
                let list = List::new(
                    self.state.board.id.clone(),
                    title.clone(),
                    sequencer::insert_position(max),
                );
                let id = list.id.clone();
                self.state.lists.push(ListSnapshot {
                    list,
                    tasks: Vec::new(),
                });
                Ok(Some(ProvisionalId::List(id)))
            }
            LocalMutation::RenameList { id, title } => {
                let index = self.require_list(id)?;
                self.state.lists[index].list.title = title.clone();
                Ok(None)
            }
            LocalMutation::ReorderList { id, position } => {
                let index = self.require_list(id)?;
                let len = self.state.lists.len();
                if *position as usize >= len {
                    return Err(ReplicaError::PositionOutOfRange {
                        position: *position,
                        len,
                    });
                }
                let old_pos = self.state.lists[index].list.position;
                let shifts =
                    sequencer::reorder_shifts(&self.list_slots(), id, old_pos, *position);
                self.shift_lists(&shifts);
                self.state.lists[index].list.position = *position;
                self.sort_lists();
                Ok(None)
            }
            LocalMutation::DeleteList { id } => {
                let index = self.require_list(id)?;
                let deleted_pos = self.state.lists[index].list.position;
                let shifts = sequencer::delete_shifts(&self.list_slots(), deleted_pos);
                self.state.lists.remove(index);
                self.shift_lists(&shifts);
                self.sort_lists();
                Ok(None)
            }
            LocalMutation::CreateTask { list_id, title } => {
                let index = self.require_list(list_id)?;
                let tasks = &self.state.lists[index].tasks;
                let max = tasks.iter().map(|t| t.position).max();
                let task = Task::new(
                    list_id.clone(),
                    title.clone(),
                    sequencer::insert_position(max),
                );
                let id = task.id.clone();
                self.state.lists[index].tasks.push(task);
                Ok(Some(ProvisionalId::Task(id)))
            }
            LocalMutation::EditTask {
                id,
                title,
                description,
                due_date,
            } => {
                let (li, ti) = self.require_task(id)?;
                let task = &mut self.state.lists[li].tasks[ti];
                if let Some(title) = title {
                    task.title = title.clone();
                }
                if let Some(description) = description {
                    task.description = description.clone();
                }
                if let Some(due) = due_date {
                    task.due_date = Some(*due);
                }
                Ok(None)
            }
            LocalMutation::MoveTask {
                id,
                list_id,
                position,
            } => {
                let (li, ti) = self.require_task(id)?;
                if &self.state.lists[li].list.id == list_id {
                    let len = self.state.lists[li].tasks.len();
                    if *position as usize >= len {
                        return Err(ReplicaError::PositionOutOfRange {
                            position: *position,
                            len,
                        });
                    }
                    let old_pos = self.state.lists[li].tasks[ti].position;
                    let shifts = sequencer::reorder_shifts(
                        &self.task_slots(li),
                        id,
                        old_pos,
                        *position,
                    );
                    self.shift_tasks(&shifts);
                    self.state.lists[li].tasks[ti].position = *position;
                    self.sort_tasks(li);
                } else {
                    let di = self.require_list(list_id)?;
                    let new_pos =
                        (*position).min(self.state.lists[di].tasks.len() as u32);
                    let old_pos = self.state.lists[li].tasks[ti].position;
                    let (source_shifts, dest_shifts) = sequencer::cross_parent_shifts(
                        &self.task_slots(li),
                        &self.task_slots(di),
                        old_pos,
                        new_pos,
                    );
                    let mut task = self.state.lists[li].tasks.remove(ti);
                    self.shift_tasks(&source_shifts);
                    self.shift_tasks(&dest_shifts);
                    task.list_id = list_id.clone();
                    task.position = new_pos;
                    self.state.lists[di].tasks.push(task);
                    self.sort_tasks(li);
                    self.sort_tasks(di);
                }
                Ok(None)
            }
            LocalMutation::DeleteTask { id } => {
                let (li, ti) = self.require_task(id)?;
                let deleted_pos = self.state.lists[li].tasks[ti].position;
                let shifts = sequencer::delete_shifts(&self.task_slots(li), deleted_pos);
                self.state.lists[li].tasks.remove(ti);
                self.shift_tasks(&shifts);
                self.sort_tasks(li);
                Ok(None)
            }
            LocalMutation::AssignTask { id, user_id } => {
                self.require_task(id)?;
                if !self
                    .state
                    .assignees
                    .iter()
                    .any(|a| &a.task_id == id && &a.user_id == user_id)
                {
                    self.state
                        .assignees
                        .push(TaskAssignee::new(id.clone(), user_id.clone()));
                }
                Ok(None)
            }
            LocalMutation::UnassignTask { id, user_id } => {
                self.require_task(id)?;
                self.state
                    .assignees
                    .retain(|a| !(&a.task_id == id && &a.user_id == user_id));
                Ok(None)
            }
        }
    }

    // =========================================================================
    // Broadcast reconciliation
    // =========================================================================

    /// Merge an event from another client's mutation into the local view.
    pub fn apply_remote(&mut self, event: &BoardEvent) {
        match event {
            BoardEvent::BoardCreated { board } | BoardEvent::BoardUpdated { board } => {
                if board.id == self.state.board.id {
                    self.state.board = board.clone();
                }
            }
            BoardEvent::BoardDeleted { .. } => {
                // the surrounding app discards the replica; nothing to patch
            }
            BoardEvent::MemberAdded { member } => {
                if !self
                    .state
                    .members
                    .iter()
                    .any(|m| m.user_id == member.user_id)
                {
                    self.state.members.push(member.clone());
                }
            }
            BoardEvent::MemberRemoved { user_id, .. } => {
                self.state.members.retain(|m| &m.user_id != user_id);
            }
            BoardEvent::ListCreated { list } => {
                // creation echo for an id we already hold is a no-op
                if self.list_index(&list.id).is_none() {
                    self.state.lists.push(ListSnapshot {
                        list: list.clone(),
                        tasks: Vec::new(),
                    });
                    self.sort_lists();
                }
            }
            BoardEvent::ListUpdated { list } => match self.list_index(&list.id) {
                Some(index) => {
                    let old_pos = self.state.lists[index].list.position;
                    // clamp in case this replica missed earlier creations
                    let target = list
                        .position
                        .min((self.state.lists.len() as u32).saturating_sub(1));
                    if old_pos != target {
                        let shifts = sequencer::reorder_shifts(
                            &self.list_slots(),
                            &list.id,
                            old_pos,
                            target,
                        );
                        self.shift_lists(&shifts);
                    }
                    self.state.lists[index].list = list.clone();
                    self.sort_lists();
                }
                None => {
                    self.state.lists.push(ListSnapshot {
                        list: list.clone(),
                        tasks: Vec::new(),
                    });
                    self.sort_lists();
                }
            },
            BoardEvent::ListDeleted { list_id, .. } => self.remove_list(list_id),
            BoardEvent::TaskCreated { task } => {
                if self.task_location(&task.id).is_none() {
                    if let Some(index) = self.list_index(&task.list_id) {
                        self.state.lists[index].tasks.push(task.clone());
                        self.sort_tasks(index);
                    } else {
                        tracing::debug!(task = %task.id, "create event for unknown list");
                    }
                }
            }
            BoardEvent::TaskUpdated { task } => {
                if let Some((li, ti)) = self.task_location(&task.id) {
                    self.state.lists[li].tasks[ti] = task.clone();
                    self.sort_tasks(li);
                }
            }
            BoardEvent::TaskMoved { task, .. } => self.apply_task_move(task),
            BoardEvent::TaskDeleted { task_id, .. } => self.remove_task(task_id),
            BoardEvent::TaskAssigned { task_id, user_id } => {
                if !self
                    .state
                    .assignees
                    .iter()
                    .any(|a| &a.task_id == task_id && &a.user_id == user_id)
                {
                    self.state
                        .assignees
                        .push(TaskAssignee::new(task_id.clone(), user_id.clone()));
                }
            }
            BoardEvent::TaskUnassigned { task_id, user_id } => {
                self.state
                    .assignees
                    .retain(|a| !(&a.task_id == task_id && &a.user_id == user_id));
            }
            BoardEvent::ActivityCreated { .. } => {
                // history is read from the server on demand
            }
        }
    }

    /// Authoritative move: mirror the server's same-list/cross-list branch
    /// against the local state.
    fn apply_task_move(&mut self, task: &Task) {
        match self.task_location(&task.id) {
            Some((li, ti)) => {
                let old_pos = self.state.lists[li].tasks[ti].position;
                if self.state.lists[li].list.id == task.list_id {
                    // clamp in case this replica missed earlier creations
                    let target = task
                        .position
                        .min((self.state.lists[li].tasks.len() as u32).saturating_sub(1));
                    let shifts = sequencer::reorder_shifts(
                        &self.task_slots(li),
                        &task.id,
                        old_pos,
                        target,
                    );
                    self.shift_tasks(&shifts);
                    self.state.lists[li].tasks[ti] = task.clone();
                    self.sort_tasks(li);
                } else {
                    let Some(di) = self.list_index(&task.list_id) else {
                        // destination unseen: at least close the source gap
                        let shifts =
                            sequencer::delete_shifts(&self.task_slots(li), old_pos);
                        self.state.lists[li].tasks.remove(ti);
                        self.shift_tasks(&shifts);
                        return;
                    };
                    let new_pos =
                        task.position.min(self.state.lists[di].tasks.len() as u32);
                    let (source_shifts, dest_shifts) = sequencer::cross_parent_shifts(
                        &self.task_slots(li),
                        &self.task_slots(di),
                        old_pos,
                        new_pos,
                    );
                    self.state.lists[li].tasks.remove(ti);
                    self.shift_tasks(&source_shifts);
                    self.shift_tasks(&dest_shifts);
                    self.state.lists[di].tasks.push(task.clone());
                    self.sort_tasks(li);
                    self.sort_tasks(di);
                }
            }
            None => {
                // unseen task arriving mid-move: adopt it at its position
                if let Some(di) = self.list_index(&task.list_id) {
                    let new_pos =
                        task.position.min(self.state.lists[di].tasks.len() as u32);
                    let dest_shifts: Vec<Shift<TaskId>> = self
                        .task_slots(di)
                        .iter()
                        .filter(|s| s.position >= new_pos)
                        .map(|s| Shift {
                            id: s.id.clone(),
                            delta: 1,
                        })
                        .collect();
                    self.shift_tasks(&dest_shifts);
                    self.state.lists[di].tasks.push(task.clone());
                    self.sort_tasks(di);
                }
            }
        }
    }

    // =========================================================================
    // Local-state helpers
    // =========================================================================

    fn list_index(&self, id: &ListId) -> Option<usize> {
        self.state.lists.iter().position(|l| &l.list.id == id)
    }

    fn require_list(&self, id: &ListId) -> Result<usize> {
        self.list_index(id)
            .ok_or_else(|| ReplicaError::UnknownList { id: id.clone() })
    }

    fn task_location(&self, id: &TaskId) -> Option<(usize, usize)> {
        self.state.lists.iter().enumerate().find_map(|(li, l)| {
            l.tasks
                .iter()
                .position(|t| &t.id == id)
                .map(|ti| (li, ti))
        })
    }

    fn require_task(&self, id: &TaskId) -> Result<(usize, usize)> {
        self.task_location(id)
            .ok_or_else(|| ReplicaError::UnknownTask { id: id.clone() })
    }

    fn list_slots(&self) -> Vec<Slot<ListId>> {
        self.state
            .lists
            .iter()
            .map(|l| Slot::new(l.list.id.clone(), l.list.position))
            .collect()
    }

    fn task_slots(&self, index: usize) -> Vec<Slot<TaskId>> {
        self.state.lists[index]
            .tasks
            .iter()
            .map(|t| Slot::new(t.id.clone(), t.position))
            .collect()
    }

    fn shift_lists(&mut self, shifts: &[Shift<ListId>]) {
        for shift in shifts {
            if let Some(index) = self.list_index(&shift.id) {
                let list = &mut self.state.lists[index].list;
                list.position = (list.position as i64 + shift.delta as i64) as u32;
            }
        }
    }

    fn shift_tasks(&mut self, shifts: &[Shift<TaskId>]) {
        for shift in shifts {
            if let Some((li, ti)) = self.task_location(&shift.id) {
                let task = &mut self.state.lists[li].tasks[ti];
                task.position = (task.position as i64 + shift.delta as i64) as u32;
            }
        }
    }

    fn remove_list(&mut self, id: &ListId) {
        if let Some(index) = self.list_index(id) {
            let deleted_pos = self.state.lists[index].list.position;
            let shifts = sequencer::delete_shifts(&self.list_slots(), deleted_pos);
            self.state.lists.remove(index);
            self.shift_lists(&shifts);
            self.sort_lists();
        }
    }

    fn remove_task(&mut self, id: &TaskId) {
        if let Some((li, ti)) = self.task_location(id) {
            let deleted_pos = self.state.lists[li].tasks[ti].position;
            let shifts = sequencer::delete_shifts(&self.task_slots(li), deleted_pos);
            self.state.lists[li].tasks.remove(ti);
            self.shift_tasks(&shifts);
            self.sort_tasks(li);
        }
    }

    fn sort_lists(&mut self) {
        self.state.lists.sort_by_key(|l| l.list.position);
    }

    fn sort_tasks(&mut self, index: usize) {
        self.state.lists[index].tasks.sort_by_key(|t| t.position);
    }
}
