//! Presentation notifier contract.
//!
//! # Responsibility
//! - Define the observer surface consuming pending counts and sync
//!   summaries.
//! - Keep presentation side effects out of the sync engine itself.
//!
//! # Invariants
//! - The notifier is only ever invoked after a run completes or after a
//!   local list mutation, never from inside the push loop.
//! - Implementations degrade silently when a user-facing channel is
//!   unavailable (notification permission withheld).

use crate::sync::SyncSummary;
use log::info;

/// External consumer of pending counts and sync summaries.
pub trait PresentationNotifier {
    /// Pushed whenever the local task list changes; `pending` is the count
    /// of tasks with `done = false`, independent of sync state.
    fn pending_count_changed(&self, pending: usize);

    /// Pushed after each reconciliation run.
    fn sync_completed(&self, summary: &SyncSummary);
}

/// Notifier for permissionless environments: emits structured log events
/// and nothing else.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl PresentationNotifier for LogNotifier {
    fn pending_count_changed(&self, pending: usize) {
        info!("event=pending_count module=notify status=ok pending={pending}");
    }

    fn sync_completed(&self, summary: &SyncSummary) {
        info!(
            "event=sync_summary module=notify status=ok synced_count={} total_unsynced={}",
            summary.synced_count, summary.total_unsynced
        );
    }
}
