//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `tasknest_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use tasknest_core::db::open_db_in_memory;
use tasknest_core::{CreateTaskRequest, LogNotifier, SqliteTaskRepository, TaskService};

fn main() {
    println!("tasknest_core version={}", tasknest_core::core_version());

    let conn = match open_db_in_memory() {
        Ok(conn) => conn,
        Err(err) => {
            eprintln!("store bootstrap failed: {err}");
            std::process::exit(1);
        }
    };

    let service = TaskService::new(SqliteTaskRepository::new(&conn), LogNotifier);
    let probe = service.create_task(CreateTaskRequest {
        title: "smoke probe".to_string(),
        scheduled_time: String::new(),
        done: false,
        location: None,
    });

    match probe.and_then(|_| service.pending_count()) {
        Ok(pending) => println!("store probe ok, pending={pending}"),
        Err(err) => {
            eprintln!("store probe failed: {err}");
            std::process::exit(1);
        }
    }
}
