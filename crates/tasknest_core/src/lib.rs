//! Offline-first task list core.
//!
//! The local SQLite table is the single source of truth while offline;
//! the sync engine reconciles it against the remote authoritative
//! collection whenever the trigger subsystem decides connectivity allows.
//! UI, authentication screens, geolocation capture and other platform glue
//! live outside this crate and talk to it through the contracts exported
//! here.

pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod service;
pub mod sync;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{GeoPoint, Task, TaskId, TaskValidationError};
pub use notify::{LogNotifier, PresentationNotifier};
pub use repo::task_repo::{SqliteTaskRepository, StoreError, StoreResult, TaskRepository};
pub use service::task_service::{CreateTaskRequest, TaskService};
pub use sync::orchestrator::SyncOrchestrator;
pub use sync::remote::{Identity, IdentityProvider, RemoteError, RemoteResult, RemoteStore};
pub use sync::scheduler::{Connectivity, PlatformEvent, SyncScheduler, SYNC_TASK_TAG};
pub use sync::SyncSummary;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
