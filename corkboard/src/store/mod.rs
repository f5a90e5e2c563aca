//! Transactional persistence for ordered collections
//!
//! The persistence engine behind the mutation services. Commands open a
//! transaction, read the pre-transaction state, stage typed row writes, and
//! either commit them all or none of them. Staging is separated from
//! application so that a failing transaction simply drops its staged writes —
//! no partially renumbered collection can ever be observed.
//!
//! One writer at a time: the transaction holds the store lock for the whole
//! read-compute-apply cycle, so two concurrent movers on the same list fully
//! serialize and the second computes its shifts against the committed state
//! of the first.

mod tables;

pub use tables::{Tables, WriteOp};

use crate::error::Result;
use crate::sequencer::Shift;
use crate::types::{
    Activity, Board, BoardId, BoardMember, List, ListId, Task, TaskAssignee, TaskId, UserId,
    UserProfile,
};
use tokio::sync::Mutex;

/// The shared store. Cheap to share via `Arc`.
#[derive(Debug, Default)]
pub struct Store {
    inner: Mutex<Tables>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a read-only closure against the current tables.
    pub async fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> T {
        let guard = self.inner.lock().await;
        f(&*guard)
    }

    /// Run a transaction: the closure reads the pre-transaction state through
    /// `Tx` and stages writes; `Ok` commits them in one step, `Err` discards
    /// them all.
    pub async fn transaction<T>(
        &self,
        f: impl FnOnce(&mut Tx<'_>) -> Result<T>,
    ) -> Result<T> {
        let mut guard = self.inner.lock().await;
        let (value, writes) = {
            let mut tx = Tx {
                tables: &*guard,
                writes: Vec::new(),
            };
            let value = f(&mut tx)?;
            (value, tx.writes)
        };
        for op in writes {
            guard.apply(op);
        }
        Ok(value)
    }

    /// Append one history entry. Separate from `transaction` — activity is a
    /// best-effort side effect recorded after the primary mutation commits.
    pub async fn append_activity(&self, entry: Activity) -> Result<()> {
        let mut guard = self.inner.lock().await;
        guard.push_activity(entry);
        Ok(())
    }

    /// Sync a user row from the external identity provider.
    pub async fn upsert_user(&self, user: UserProfile) {
        let mut guard = self.inner.lock().await;
        guard.upsert_user(user);
    }
}

/// An open transaction: reads see the pre-transaction snapshot, writes are
/// staged until commit.
pub struct Tx<'a> {
    tables: &'a Tables,
    writes: Vec<WriteOp>,
}

impl<'a> Tx<'a> {
    /// The pre-transaction state
    pub fn tables(&self) -> &Tables {
        self.tables
    }

    pub fn put_board(&mut self, board: Board) {
        self.writes.push(WriteOp::PutBoard(board));
    }

    pub fn delete_board(&mut self, id: BoardId) {
        self.writes.push(WriteOp::DeleteBoard(id));
    }

    pub fn put_member(&mut self, member: BoardMember) {
        self.writes.push(WriteOp::PutMember(member));
    }

    pub fn delete_member(&mut self, board_id: BoardId, user_id: UserId) {
        self.writes.push(WriteOp::DeleteMember { board_id, user_id });
    }

    pub fn put_list(&mut self, list: List) {
        self.writes.push(WriteOp::PutList(list));
    }

    pub fn delete_list(&mut self, id: ListId) {
        self.writes.push(WriteOp::DeleteList(id));
    }

    pub fn put_task(&mut self, task: Task) {
        self.writes.push(WriteOp::PutTask(task));
    }

    pub fn delete_task(&mut self, id: TaskId) {
        self.writes.push(WriteOp::DeleteTask(id));
    }

    pub fn put_assignee(&mut self, assignee: TaskAssignee) {
        self.writes.push(WriteOp::PutAssignee(assignee));
    }

    pub fn delete_assignee(&mut self, task_id: TaskId, user_id: UserId) {
        self.writes.push(WriteOp::DeleteAssignee { task_id, user_id });
    }

    /// Stage a bulk position shift for lists
    pub fn shift_lists(&mut self, shifts: Vec<Shift<ListId>>) {
        if !shifts.is_empty() {
            self.writes.push(WriteOp::ShiftLists(shifts));
        }
    }

    /// Stage a bulk position shift for tasks
    pub fn shift_tasks(&mut self, shifts: Vec<Shift<TaskId>>) {
        if !shifts.is_empty() {
            self.writes.push(WriteOp::ShiftTasks(shifts));
        }
    }
}
