//! Trigger subsystem: decides when reconciliation runs.
//!
//! # Responsibility
//! - Fold heterogeneous platform signals (connectivity edges, startup,
//!   post-creation hooks, deferred background firing) into one event
//!   surface.
//! - Guarantee at most one reconciliation run in flight; triggers arriving
//!   during a run coalesce into a single follow-up run.
//!
//! # Invariants
//! - Connectivity handling is edge-triggered; duplicate transitions to the
//!   current state are ignored.
//! - The scheduler, not the orchestrator, forwards summaries to the
//!   presentation notifier.

use crate::notify::PresentationNotifier;
use crate::repo::task_repo::{StoreResult, TaskRepository};
use crate::sync::orchestrator::SyncOrchestrator;
use crate::sync::remote::{IdentityProvider, RemoteStore};
use crate::sync::SyncSummary;
use log::{debug, info};

/// Tag under which the sync routine is registered with the platform's
/// background-execution scheduler. The platform fires it at its own
/// discretion, typically once connectivity is restored.
pub const SYNC_TASK_TAG: &str = "sync-tasks";

/// Two-state connectivity model sourced from the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

/// Unified trigger event surface.
///
/// Platform glue translates its concrete signals into these variants, so
/// the sync engine never references platform APIs directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformEvent {
    /// Application startup. The shell loads the local list regardless;
    /// reconciliation additionally runs when already online.
    Startup,
    /// Connectivity edge from the platform.
    ConnectivityChanged(Connectivity),
    /// A task creation flow (including its side effects) completed.
    TaskCreated,
    /// The deferred background routine registered under [`SYNC_TASK_TAG`]
    /// fired and posted its message into this application context.
    BackgroundSync,
}

/// Composes trigger sources into orchestrator invocations.
pub struct SyncScheduler<R, S, I, N> {
    orchestrator: SyncOrchestrator<R, S, I>,
    notifier: N,
    connectivity: Connectivity,
    sync_in_progress: bool,
    rerun_requested: bool,
    last_summary: Option<SyncSummary>,
}

impl<R, S, I, N> SyncScheduler<R, S, I, N>
where
    R: TaskRepository,
    S: RemoteStore,
    I: IdentityProvider,
    N: PresentationNotifier,
{
    pub fn new(
        orchestrator: SyncOrchestrator<R, S, I>,
        notifier: N,
        initial_connectivity: Connectivity,
    ) -> Self {
        Self {
            orchestrator,
            notifier,
            connectivity: initial_connectivity,
            sync_in_progress: false,
            rerun_requested: false,
            last_summary: None,
        }
    }

    pub fn is_online(&self) -> bool {
        self.connectivity == Connectivity::Online
    }

    /// Summary of the most recent completed run, if any.
    pub fn last_summary(&self) -> Option<SyncSummary> {
        self.last_summary
    }

    /// Feeds one platform event into the trigger state machine.
    ///
    /// # Errors
    /// Returns a `StoreError` when a triggered run could not read the
    /// local table. The scheduler stays usable; the failure is scoped to
    /// the triggering event.
    pub fn handle_event(&mut self, event: PlatformEvent) -> StoreResult<()> {
        match event {
            PlatformEvent::Startup => {
                info!(
                    "event=trigger module=sync status=ok source=startup online={}",
                    self.is_online()
                );
                if self.is_online() {
                    return self.request_sync();
                }
                Ok(())
            }
            PlatformEvent::ConnectivityChanged(state) => {
                if state == self.connectivity {
                    debug!("event=trigger module=sync status=skip source=connectivity reason=no_edge");
                    return Ok(());
                }
                self.connectivity = state;
                info!(
                    "event=trigger module=sync status=ok source=connectivity online={}",
                    self.is_online()
                );
                if state == Connectivity::Online {
                    return self.request_sync();
                }
                Ok(())
            }
            PlatformEvent::TaskCreated => {
                if self.is_online() {
                    debug!("event=trigger module=sync status=ok source=task_created");
                    return self.request_sync();
                }
                debug!("event=trigger module=sync status=skip source=task_created reason=offline");
                Ok(())
            }
            PlatformEvent::BackgroundSync => {
                info!(
                    "event=trigger module=sync status=ok source=background tag={SYNC_TASK_TAG}"
                );
                self.request_sync()
            }
        }
    }

    /// Single-flight entry point around the orchestrator.
    ///
    /// A request landing while a run is active is recorded and served by
    /// one follow-up run after the current run completes; parallel runs
    /// cannot happen.
    fn request_sync(&mut self) -> StoreResult<()> {
        if self.sync_in_progress {
            self.rerun_requested = true;
            debug!("event=sync_request module=sync status=deferred reason=run_in_flight");
            return Ok(());
        }

        self.sync_in_progress = true;
        let result = loop {
            match self.orchestrator.run() {
                Ok(summary) => {
                    self.last_summary = Some(summary);
                    self.notifier.sync_completed(&summary);
                }
                Err(err) => break Err(err),
            }

            if !self.rerun_requested {
                break Ok(());
            }
            self.rerun_requested = false;
        };
        self.sync_in_progress = false;
        result
    }
}
