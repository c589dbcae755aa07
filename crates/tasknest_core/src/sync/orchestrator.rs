//! Reconciliation of the local table against the remote collection.
//!
//! # Responsibility
//! - Push every record still marked unsynced, strictly sequentially.
//! - Confirm each ack by re-persisting the record with `synced = true`.
//! - Report a per-run summary without touching presentation concerns.
//!
//! # Invariants
//! - `synced` is never set speculatively before a push resolves.
//! - One record's failure never aborts the batch; the record simply stays
//!   unsynced and is retried wholesale on the next triggered run.

use crate::model::task::Task;
use crate::repo::task_repo::{StoreResult, TaskRepository};
use crate::sync::remote::{IdentityProvider, RemoteError, RemoteStore};
use crate::sync::SyncSummary;
use log::{info, warn};
use std::time::Instant;

/// Sequential push loop bringing local and remote stores into agreement.
pub struct SyncOrchestrator<R, S, I> {
    repo: R,
    remote: S,
    identity: I,
}

impl<R, S, I> SyncOrchestrator<R, S, I>
where
    R: TaskRepository,
    S: RemoteStore,
    I: IdentityProvider,
{
    pub fn new(repo: R, remote: S, identity: I) -> Self {
        Self {
            repo,
            remote,
            identity,
        }
    }

    /// Runs one reconciliation pass.
    ///
    /// Re-running with no new unsynced tasks and no remote errors yields
    /// `synced_count = 0` and no state change.
    ///
    /// # Errors
    /// Returns a `StoreError` when the local table cannot be read; the
    /// failure is recoverable and scoped to this run.
    pub fn run(&self) -> StoreResult<SyncSummary> {
        let started_at = Instant::now();
        info!("event=sync_run module=sync status=start");

        let tasks = match self.repo.get_all() {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(
                    "event=sync_run module=sync status=error duration_ms={} error={}",
                    started_at.elapsed().as_millis(),
                    err
                );
                return Err(err);
            }
        };

        let mut unsynced: Vec<Task> = tasks.into_iter().filter(Task::is_pending_sync).collect();
        let total_unsynced = unsynced.len();
        let mut synced_count = 0;

        let identity = self.identity.current_identity();

        for task in unsynced.iter_mut() {
            let pushed = match identity.as_ref() {
                Some(identity) => self.remote.put(identity, task),
                None => Err(RemoteError::Auth),
            };

            match pushed {
                Ok(()) => {
                    task.mark_synced();
                    match self.repo.put(task) {
                        Ok(()) => synced_count += 1,
                        Err(err) => {
                            // Remote already holds the record; the next
                            // run re-pushes it through the idempotent
                            // upsert.
                            warn!(
                                "event=task_ack_persist module=sync status=error task_id={} error={}",
                                task.id, err
                            );
                        }
                    }
                }
                Err(err) => {
                    warn!(
                        "event=task_push module=sync status=error task_id={} error={}",
                        task.id, err
                    );
                }
            }
        }

        info!(
            "event=sync_run module=sync status=ok duration_ms={} synced_count={} total_unsynced={}",
            started_at.elapsed().as_millis(),
            synced_count,
            total_unsynced
        );

        Ok(SyncSummary {
            synced_count,
            total_unsynced,
        })
    }
}
