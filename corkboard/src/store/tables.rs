//! In-memory tables and their queries
//!
//! Row layout mirrors the relational schema: boards, board members, lists,
//! tasks, task assignees, users, activity. Mutation happens only through
//! committed transactions (`Store::transaction`); everything here is reads
//! plus the infallible write application used at commit time.

use crate::sequencer::{Shift, Slot};
use crate::types::{
    Activity, Board, BoardId, BoardMember, BoardSnapshot, List, ListId, ListSnapshot, Task,
    TaskAssignee, TaskId, UserId, UserProfile,
};
use std::collections::HashMap;

/// One staged row write. Applied in order at commit; application cannot fail,
/// so a transaction is all-or-nothing by construction.
#[derive(Debug, Clone)]
pub enum WriteOp {
    PutBoard(Board),
    DeleteBoard(BoardId),
    PutMember(BoardMember),
    DeleteMember { board_id: BoardId, user_id: UserId },
    PutList(List),
    DeleteList(ListId),
    PutTask(Task),
    DeleteTask(TaskId),
    PutAssignee(TaskAssignee),
    DeleteAssignee { task_id: TaskId, user_id: UserId },
    ShiftLists(Vec<Shift<ListId>>),
    ShiftTasks(Vec<Shift<TaskId>>),
}

/// The store's tables.
#[derive(Debug, Default)]
pub struct Tables {
    boards: HashMap<BoardId, Board>,
    members: Vec<BoardMember>,
    lists: HashMap<ListId, List>,
    tasks: HashMap<TaskId, Task>,
    assignees: Vec<TaskAssignee>,
    users: HashMap<UserId, UserProfile>,
    activity: Vec<Activity>,
}

impl Tables {
    // =========================================================================
    // Row lookups
    // =========================================================================

    pub fn board(&self, id: &BoardId) -> Option<&Board> {
        self.boards.get(id)
    }

    pub fn list(&self, id: &ListId) -> Option<&List> {
        self.lists.get(id)
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.get(id)
    }

    pub fn user(&self, id: &UserId) -> Option<&UserProfile> {
        self.users.get(id)
    }

    pub fn member(&self, board_id: &BoardId, user_id: &UserId) -> Option<&BoardMember> {
        self.members
            .iter()
            .find(|m| &m.board_id == board_id && &m.user_id == user_id)
    }

    pub fn members_of(&self, board_id: &BoardId) -> Vec<&BoardMember> {
        self.members
            .iter()
            .filter(|m| &m.board_id == board_id)
            .collect()
    }

    pub fn is_assigned(&self, task_id: &TaskId, user_id: &UserId) -> bool {
        self.assignees
            .iter()
            .any(|a| &a.task_id == task_id && &a.user_id == user_id)
    }

    pub fn assignees_of(&self, task_id: &TaskId) -> Vec<&TaskAssignee> {
        self.assignees
            .iter()
            .filter(|a| &a.task_id == task_id)
            .collect()
    }

    // =========================================================================
    // Ordered collections
    // =========================================================================

    /// Lists of a board in position order
    pub fn lists_in(&self, board_id: &BoardId) -> Vec<&List> {
        let mut lists: Vec<&List> = self
            .lists
            .values()
            .filter(|l| &l.board_id == board_id)
            .collect();
        lists.sort_by_key(|l| l.position);
        lists
    }

    /// Tasks of a list in position order
    pub fn tasks_in(&self, list_id: &ListId) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .tasks
            .values()
            .filter(|t| &t.list_id == list_id)
            .collect();
        tasks.sort_by_key(|t| t.position);
        tasks
    }

    /// The sequencer's view of a board's lists
    pub fn list_slots(&self, board_id: &BoardId) -> Vec<Slot<ListId>> {
        self.lists_in(board_id)
            .iter()
            .map(|l| Slot::new(l.id.clone(), l.position))
            .collect()
    }

    /// The sequencer's view of a list's tasks
    pub fn task_slots(&self, list_id: &ListId) -> Vec<Slot<TaskId>> {
        self.tasks_in(list_id)
            .iter()
            .map(|t| Slot::new(t.id.clone(), t.position))
            .collect()
    }

    // =========================================================================
    // History
    // =========================================================================

    /// Activity for a board, newest first
    pub fn activity_for(&self, board_id: &BoardId) -> Vec<&Activity> {
        let mut entries: Vec<&Activity> = self
            .activity
            .iter()
            .filter(|a| &a.board_id == board_id)
            .collect();
        entries.reverse();
        entries
    }

    pub(crate) fn push_activity(&mut self, entry: Activity) {
        self.activity.push(entry);
    }

    pub(crate) fn upsert_user(&mut self, user: UserProfile) {
        self.users.insert(user.id.clone(), user);
    }

    // =========================================================================
    // Snapshot
    // =========================================================================

    /// Full view of one board: members, lists in order, tasks in order
    pub fn snapshot(&self, board_id: &BoardId) -> Option<BoardSnapshot> {
        let board = self.boards.get(board_id)?.clone();
        let lists = self
            .lists_in(board_id)
            .into_iter()
            .map(|l| ListSnapshot {
                tasks: self.tasks_in(&l.id).into_iter().cloned().collect(),
                list: l.clone(),
            })
            .collect();
        let assignees = self
            .assignees
            .iter()
            .filter(|a| {
                self.tasks
                    .get(&a.task_id)
                    .and_then(|t| self.lists.get(&t.list_id))
                    .is_some_and(|l| &l.board_id == board_id)
            })
            .cloned()
            .collect();
        Some(BoardSnapshot {
            board,
            members: self.members_of(board_id).into_iter().cloned().collect(),
            lists,
            assignees,
        })
    }

    // =========================================================================
    // Write application (commit time, infallible)
    // =========================================================================

    pub(crate) fn apply(&mut self, op: WriteOp) {
        match op {
            WriteOp::PutBoard(board) => {
                self.boards.insert(board.id.clone(), board);
            }
            WriteOp::DeleteBoard(id) => {
                // Cascade: lists, their tasks, assignee rows, memberships.
                // Activity rows are write-once and survive the board.
                let list_ids: Vec<ListId> = self
                    .lists
                    .values()
                    .filter(|l| l.board_id == id)
                    .map(|l| l.id.clone())
                    .collect();
                for list_id in &list_ids {
                    self.delete_list_cascade(list_id);
                }
                self.members.retain(|m| m.board_id != id);
                self.boards.remove(&id);
            }
            WriteOp::PutMember(member) => {
                if self
                    .member(&member.board_id, &member.user_id)
                    .is_none()
                {
                    self.members.push(member);
                }
            }
            WriteOp::DeleteMember { board_id, user_id } => {
                self.members
                    .retain(|m| !(m.board_id == board_id && m.user_id == user_id));
            }
            WriteOp::PutList(list) => {
                self.lists.insert(list.id.clone(), list);
            }
            WriteOp::DeleteList(id) => {
                self.delete_list_cascade(&id);
            }
            WriteOp::PutTask(task) => {
                self.tasks.insert(task.id.clone(), task);
            }
            WriteOp::DeleteTask(id) => {
                self.assignees.retain(|a| a.task_id != id);
                self.tasks.remove(&id);
            }
            WriteOp::PutAssignee(assignee) => {
                if !self.is_assigned(&assignee.task_id, &assignee.user_id) {
                    self.assignees.push(assignee);
                }
            }
            WriteOp::DeleteAssignee { task_id, user_id } => {
                self.assignees
                    .retain(|a| !(a.task_id == task_id && a.user_id == user_id));
            }
            WriteOp::ShiftLists(shifts) => {
                for shift in shifts {
                    if let Some(list) = self.lists.get_mut(&shift.id) {
                        list.position = (list.position as i64 + shift.delta as i64) as u32;
                    }
                }
            }
            WriteOp::ShiftTasks(shifts) => {
                for shift in shifts {
                    if let Some(task) = self.tasks.get_mut(&shift.id) {
                        task.position = (task.position as i64 + shift.delta as i64) as u32;
                    }
                }
            }
        }
    }

    fn delete_list_cascade(&mut self, list_id: &ListId) {
        let task_ids: Vec<TaskId> = self
            .tasks
            .values()
            .filter(|t| &t.list_id == list_id)
            .map(|t| t.id.clone())
            .collect();
        self.assignees.retain(|a| !task_ids.contains(&a.task_id));
        self.tasks.retain(|_, t| &t.list_id != list_id);
        self.lists.remove(list_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;

    fn seed() -> (Tables, BoardId, ListId, TaskId) {
        let mut tables = Tables::default();
        let board = Board::new("B", UserId::from("alice"));
        let board_id = board.id.clone();
        let list = List::new(board_id.clone(), "To Do", 0);
        let list_id = list.id.clone();
        let task = Task::new(list_id.clone(), "T", 0);
        let task_id = task.id.clone();

        tables.apply(WriteOp::PutBoard(board));
        tables.apply(WriteOp::PutMember(BoardMember::new(
            board_id.clone(),
            UserId::from("alice"),
            Role::Admin,
        )));
        tables.apply(WriteOp::PutList(list));
        tables.apply(WriteOp::PutTask(task));
        tables.apply(WriteOp::PutAssignee(TaskAssignee::new(
            task_id.clone(),
            UserId::from("alice"),
        )));
        (tables, board_id, list_id, task_id)
    }

    #[test]
    fn test_lookups() {
        let (tables, board_id, list_id, task_id) = seed();
        assert!(tables.board(&board_id).is_some());
        assert!(tables.list(&list_id).is_some());
        assert!(tables.task(&task_id).is_some());
        assert!(tables
            .member(&board_id, &UserId::from("alice"))
            .is_some());
        assert!(tables.is_assigned(&task_id, &UserId::from("alice")));
    }

    #[test]
    fn test_ordered_views_sorted_by_position() {
        let (mut tables, board_id, _, _) = seed();
        let later = List::new(board_id.clone(), "Done", 1);
        let earlier_id = tables.lists_in(&board_id)[0].id.clone();
        tables.apply(WriteOp::PutList(later));

        let lists = tables.lists_in(&board_id);
        assert_eq!(lists.len(), 2);
        assert_eq!(lists[0].id, earlier_id);
        assert_eq!(lists[1].title, "Done");
    }

    #[test]
    fn test_delete_list_cascades_tasks_and_assignees() {
        let (mut tables, _, list_id, task_id) = seed();
        tables.apply(WriteOp::DeleteList(list_id.clone()));
        assert!(tables.list(&list_id).is_none());
        assert!(tables.task(&task_id).is_none());
        assert!(tables.assignees_of(&task_id).is_empty());
    }

    #[test]
    fn test_delete_board_cascades_but_keeps_activity() {
        let (mut tables, board_id, list_id, task_id) = seed();
        tables.push_activity(Activity::new(
            board_id.clone(),
            UserId::from("alice"),
            crate::types::ActivityKind::BoardCreated { title: "B".into() },
        ));

        tables.apply(WriteOp::DeleteBoard(board_id.clone()));
        assert!(tables.board(&board_id).is_none());
        assert!(tables.list(&list_id).is_none());
        assert!(tables.task(&task_id).is_none());
        assert!(tables.members_of(&board_id).is_empty());
        // history is write-once
        assert_eq!(tables.activity_for(&board_id).len(), 1);
    }

    #[test]
    fn test_shift_application() {
        let (mut tables, _, list_id, task_id) = seed();
        let second = Task::new(list_id.clone(), "T2", 1);
        let second_id = second.id.clone();
        tables.apply(WriteOp::PutTask(second));

        tables.apply(WriteOp::ShiftTasks(vec![Shift {
            id: second_id.clone(),
            delta: -1,
        }]));
        tables.apply(WriteOp::ShiftTasks(vec![Shift {
            id: task_id.clone(),
            delta: 1,
        }]));

        assert_eq!(tables.task(&second_id).unwrap().position, 0);
        assert_eq!(tables.task(&task_id).unwrap().position, 1);
    }

    #[test]
    fn test_snapshot_shape() {
        let (tables, board_id, _, _) = seed();
        let snapshot = tables.snapshot(&board_id).unwrap();
        assert_eq!(snapshot.lists.len(), 1);
        assert_eq!(snapshot.lists[0].tasks.len(), 1);
        assert_eq!(snapshot.members.len(), 1);
        assert_eq!(snapshot.assignees.len(), 1);
    }

    #[test]
    fn test_duplicate_member_rows_collapse() {
        let (mut tables, board_id, _, _) = seed();
        tables.apply(WriteOp::PutMember(BoardMember::new(
            board_id.clone(),
            UserId::from("alice"),
            Role::Member,
        )));
        assert_eq!(tables.members_of(&board_id).len(), 1);
        // the original row wins
        assert_eq!(
            tables.member(&board_id, &UserId::from("alice")).unwrap().role,
            Role::Admin
        );
    }
}
