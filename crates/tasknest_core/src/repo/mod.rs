//! Repository layer: the durable Local Store.
//!
//! # Responsibility
//! - Define the local task-store contract consumed by services and sync.
//! - Isolate SQLite query details from orchestration code.
//!
//! # Invariants
//! - Write paths enforce `Task::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.

pub mod task_repo;
