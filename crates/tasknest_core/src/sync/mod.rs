//! Offline-first synchronization engine.
//!
//! # Responsibility
//! - Define the remote store and identity contracts.
//! - Reconcile the local table against the remote collection.
//! - Decide when reconciliation runs (connectivity, startup, creation,
//!   deferred background firing).
//!
//! # Invariants
//! - A record's `synced` flag flips only after a confirmed remote ack.
//! - At most one reconciliation run is in flight at any time.

use serde::{Deserialize, Serialize};

pub mod orchestrator;
pub mod remote;
pub mod scheduler;

/// Outcome of one reconciliation run, consumed by the presentation
/// notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncSummary {
    /// Records confirmed by the remote store and re-persisted locally
    /// during this run.
    pub synced_count: usize,
    /// Size of the unsynced subset at the start of the run.
    pub total_unsynced: usize,
}
