//! Shared test doubles for the sync engine suites.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use tasknest_core::{
    Identity, IdentityProvider, PresentationNotifier, RemoteError, RemoteResult, RemoteStore,
    SyncSummary, Task, TaskId,
};

/// In-memory remote collection with per-id failure injection.
#[derive(Clone, Default)]
pub struct MockRemote {
    state: Rc<MockRemoteState>,
}

#[derive(Default)]
struct MockRemoteState {
    records: RefCell<HashMap<TaskId, Task>>,
    pushes: RefCell<Vec<TaskId>>,
    reject: RefCell<HashSet<TaskId>>,
}

impl MockRemote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejecting(ids: impl IntoIterator<Item = TaskId>) -> Self {
        let remote = Self::default();
        remote.state.reject.borrow_mut().extend(ids);
        remote
    }

    /// Every accepted push, in order.
    pub fn pushes(&self) -> Vec<TaskId> {
        self.state.pushes.borrow().clone()
    }

    pub fn push_count_for(&self, id: TaskId) -> usize {
        self.state
            .pushes
            .borrow()
            .iter()
            .filter(|pushed| **pushed == id)
            .count()
    }

    pub fn record(&self, id: TaskId) -> Option<Task> {
        self.state.records.borrow().get(&id).cloned()
    }

    pub fn record_count(&self) -> usize {
        self.state.records.borrow().len()
    }
}

impl RemoteStore for MockRemote {
    fn put(&self, _identity: &Identity, task: &Task) -> RemoteResult<()> {
        if self.state.reject.borrow().contains(&task.id) {
            return Err(RemoteError::Network("injected transport failure".into()));
        }
        self.state.pushes.borrow_mut().push(task.id);
        self.state.records.borrow_mut().insert(task.id, task.clone());
        Ok(())
    }

    fn get_all(&self, _identity: &Identity) -> RemoteResult<Vec<Task>> {
        Ok(self.state.records.borrow().values().cloned().collect())
    }
}

/// Identity provider returning a fixed principal (or none).
pub struct StaticIdentity(Option<Identity>);

impl StaticIdentity {
    pub fn signed_in(uid: &str) -> Self {
        Self(Some(Identity::new(uid)))
    }

    pub fn signed_out() -> Self {
        Self(None)
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_identity(&self) -> Option<Identity> {
        self.0.clone()
    }
}

/// Notifier capturing every event for later assertions.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    state: Rc<NotifierState>,
}

#[derive(Default)]
struct NotifierState {
    pending_counts: RefCell<Vec<usize>>,
    summaries: RefCell<Vec<SyncSummary>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_counts(&self) -> Vec<usize> {
        self.state.pending_counts.borrow().clone()
    }

    pub fn summaries(&self) -> Vec<SyncSummary> {
        self.state.summaries.borrow().clone()
    }
}

impl PresentationNotifier for RecordingNotifier {
    fn pending_count_changed(&self, pending: usize) {
        self.state.pending_counts.borrow_mut().push(pending);
    }

    fn sync_completed(&self, summary: &SyncSummary) {
        self.state.summaries.borrow_mut().push(*summary);
    }
}

/// Unsynced task with a fixed timestamp, for deterministic ordering.
pub fn task_at(title: &str, last_updated: i64) -> Task {
    Task::with_id(
        uuid::Uuid::new_v4(),
        title,
        "",
        false,
        None,
        last_updated,
    )
}
