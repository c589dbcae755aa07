mod common;

use common::{task_at, MockRemote, StaticIdentity};
use tasknest_core::db::open_db_in_memory;
use tasknest_core::{SqliteTaskRepository, SyncOrchestrator, Task, TaskRepository};
use uuid::Uuid;

#[test]
fn completeness_on_success() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let mut synced_already = task_at("synced already", 1000);
    synced_already.mark_synced();
    repo.put(&synced_already).unwrap();
    repo.put(&task_at("pending a", 2000)).unwrap();
    repo.put(&task_at("pending b", 3000)).unwrap();

    let remote = MockRemote::new();
    let orchestrator = SyncOrchestrator::new(
        SqliteTaskRepository::new(&conn),
        remote.clone(),
        StaticIdentity::signed_in("user-1"),
    );

    let summary = orchestrator.run().unwrap();
    assert_eq!(summary.synced_count, 2);
    assert_eq!(summary.total_unsynced, 2);

    let unsynced_left = repo
        .get_all()
        .unwrap()
        .into_iter()
        .filter(Task::is_pending_sync)
        .count();
    assert_eq!(unsynced_left, 0);
    assert_eq!(remote.record_count(), 2);
}

#[test]
fn rerun_without_new_work_is_a_no_op() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    repo.put(&task_at("pending", 1000)).unwrap();

    let remote = MockRemote::new();
    let orchestrator = SyncOrchestrator::new(
        SqliteTaskRepository::new(&conn),
        remote.clone(),
        StaticIdentity::signed_in("user-1"),
    );

    let first = orchestrator.run().unwrap();
    assert_eq!(first.synced_count, 1);
    assert_eq!(first.total_unsynced, 1);

    let before = repo.get_all().unwrap();
    let second = orchestrator.run().unwrap();
    assert_eq!(second.synced_count, 0);
    assert_eq!(second.total_unsynced, 0);
    assert_eq!(repo.get_all().unwrap(), before, "no record may change");
    assert_eq!(remote.pushes().len(), 1, "nothing may be re-pushed");
}

#[test]
fn one_rejected_task_does_not_abort_the_batch() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let rejected = task_at("rejected", 1000);
    repo.put(&rejected).unwrap();
    repo.put(&task_at("accepted a", 2000)).unwrap();
    repo.put(&task_at("accepted b", 3000)).unwrap();

    let remote = MockRemote::rejecting([rejected.id]);
    let orchestrator = SyncOrchestrator::new(
        SqliteTaskRepository::new(&conn),
        remote.clone(),
        StaticIdentity::signed_in("user-1"),
    );

    let summary = orchestrator.run().unwrap();
    assert_eq!(summary.total_unsynced, 3);
    assert_eq!(summary.synced_count, 2);

    for task in repo.get_all().unwrap() {
        if task.id == rejected.id {
            assert!(!task.synced, "rejected task must stay unsynced");
        } else {
            assert!(task.synced, "accepted tasks must be marked synced");
        }
    }
}

#[test]
fn single_accepted_push_example() {
    // Local [{id:"a",synced:false}, {id:"b",synced:true}], remote accepts
    // "a": summary {1, 1}, "a" flips, "b" untouched and never pushed.
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task_a = task_at("a", 1000);
    let mut task_b = task_at("b", 2000);
    task_b.mark_synced();
    repo.put(&task_a).unwrap();
    repo.put(&task_b).unwrap();

    let remote = MockRemote::new();
    let orchestrator = SyncOrchestrator::new(
        SqliteTaskRepository::new(&conn),
        remote.clone(),
        StaticIdentity::signed_in("user-1"),
    );

    let summary = orchestrator.run().unwrap();
    assert_eq!(summary.synced_count, 1);
    assert_eq!(summary.total_unsynced, 1);

    assert_eq!(remote.pushes(), vec![task_a.id]);
    assert_eq!(remote.push_count_for(task_b.id), 0);

    let all = repo.get_all().unwrap();
    let reloaded_a = all.iter().find(|task| task.id == task_a.id).unwrap();
    let reloaded_b = all.iter().find(|task| task.id == task_b.id).unwrap();
    assert!(reloaded_a.synced);
    assert_eq!(reloaded_b, &task_b);
}

#[test]
fn signed_out_identity_fails_every_push_without_state_change() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let pending = task_at("pending", 1000);
    repo.put(&pending).unwrap();

    let remote = MockRemote::new();
    let orchestrator = SyncOrchestrator::new(
        SqliteTaskRepository::new(&conn),
        remote.clone(),
        StaticIdentity::signed_out(),
    );

    let summary = orchestrator.run().unwrap();
    assert_eq!(summary.synced_count, 0);
    assert_eq!(summary.total_unsynced, 1);

    assert!(remote.pushes().is_empty(), "no push may reach the remote");
    let reloaded = repo.get_all().unwrap();
    assert_eq!(reloaded, vec![pending], "no record may change");
}

#[test]
fn sync_flag_flips_only_after_remote_ack() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);
    let rejected = task_at("never acked", 1000);
    repo.put(&rejected).unwrap();

    let remote = MockRemote::rejecting([rejected.id]);
    let orchestrator = SyncOrchestrator::new(
        SqliteTaskRepository::new(&conn),
        remote.clone(),
        StaticIdentity::signed_in("user-1"),
    );

    orchestrator.run().unwrap();
    orchestrator.run().unwrap();

    let reloaded = repo.get_all().unwrap();
    assert!(
        !reloaded[0].synced,
        "flag must never be set speculatively for a failing push"
    );
}

#[test]
fn remote_receives_the_full_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteTaskRepository::new(&conn);

    let task = Task::with_id(
        Uuid::new_v4(),
        "groceries",
        "18:15",
        false,
        Some(tasknest_core::GeoPoint {
            lat: 51.5,
            lng: -0.12,
        }),
        1_700_000_000_000,
    );
    repo.put(&task).unwrap();

    let remote = MockRemote::new();
    let orchestrator = SyncOrchestrator::new(
        SqliteTaskRepository::new(&conn),
        remote.clone(),
        StaticIdentity::signed_in("user-1"),
    );
    orchestrator.run().unwrap();

    let stored = remote.record(task.id).unwrap();
    assert_eq!(stored.title, task.title);
    assert_eq!(stored.scheduled_time, task.scheduled_time);
    assert_eq!(stored.location, task.location);
    assert_eq!(stored.last_updated, task.last_updated);
}
