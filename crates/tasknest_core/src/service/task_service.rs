//! Task use-case service: the core-side surface of the creation flow.
//!
//! # Responsibility
//! - Persist newly created tasks locally, always unsynced first.
//! - Serve the display list and the pending badge count.
//! - Push a recomputed pending count after every list mutation.
//!
//! # Invariants
//! - Tasks enter the store with `synced = false`; only the orchestrator
//!   flips the flag.
//! - The display list is sorted `last_updated DESC, id ASC`.

use crate::model::task::{GeoPoint, Task};
use crate::notify::PresentationNotifier;
use crate::repo::task_repo::{StoreResult, TaskRepository};
use log::info;

/// Creation-flow input. Everything here is externally supplied: the title
/// possibly from voice capture, the location from platform geolocation
/// (absent when unavailable or permission was withheld).
#[derive(Debug, Clone, PartialEq)]
pub struct CreateTaskRequest {
    pub title: String,
    /// `HH:MM` local time-of-day, or empty when unscheduled.
    pub scheduled_time: String,
    pub done: bool,
    pub location: Option<GeoPoint>,
}

/// Use-case facade over the local store.
pub struct TaskService<R, N> {
    repo: R,
    notifier: N,
}

impl<R, N> TaskService<R, N>
where
    R: TaskRepository,
    N: PresentationNotifier,
{
    pub fn new(repo: R, notifier: N) -> Self {
        Self { repo, notifier }
    }

    /// Persists one newly created task.
    ///
    /// The record lands locally with `synced = false`; reconciliation is
    /// the trigger subsystem's concern, not this service's. A recomputed
    /// pending count is pushed to the notifier before returning.
    pub fn create_task(&self, request: CreateTaskRequest) -> StoreResult<Task> {
        let task = Task::new(
            request.title,
            request.scheduled_time,
            request.done,
            request.location,
        );
        self.repo.put(&task)?;

        info!(
            "event=task_created module=service status=ok task_id={} has_time={} has_location={} done={}",
            task.id,
            !task.scheduled_time.is_empty(),
            task.location.is_some(),
            task.done
        );

        self.notifier
            .pending_count_changed(self.repo.pending_count()?);
        Ok(task)
    }

    /// Display read path, newest first.
    pub fn list_tasks(&self) -> StoreResult<Vec<Task>> {
        self.repo.list_recent()
    }

    /// Count of tasks with `done = false`, independent of sync state.
    pub fn pending_count(&self) -> StoreResult<usize> {
        self.repo.pending_count()
    }
}
