//! Persistence tests for the file-backed task store: restart round-trips,
//! on-disk format, and write-only-on-change behavior.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use taskboard_proto::task::{Task, TaskId};
use taskboard_server::store::{FileStore, StoreError, TaskStore};

#[tokio::test]
async fn restart_round_trip_preserves_order_and_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    let store = FileStore::new(&path);
    store.ensure_exists().await.unwrap();
    store.append("one").await.unwrap();
    store.append("two").await.unwrap();
    store.append("three").await.unwrap();
    store.remove_by_id(TaskId::new(2)).await.unwrap();
    drop(store);

    let reopened = FileStore::new(&path);
    assert_eq!(
        reopened.load_all().await.unwrap(),
        vec![
            Task::new(TaskId::new(1), "one"),
            Task::new(TaskId::new(3), "three"),
        ]
    );
}

#[tokio::test]
async fn on_disk_format_is_a_bare_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    let store = FileStore::new(&path);
    store.ensure_exists().await.unwrap();
    store.append("Buy milk").await.unwrap();

    let contents = tokio::fs::read_to_string(&path).await.unwrap();
    assert_eq!(contents, r#"[{"id":1,"description":"Buy milk"}]"#);
}

#[tokio::test]
async fn id_assignment_continues_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    let store = FileStore::new(&path);
    store.ensure_exists().await.unwrap();
    store.append("before").await.unwrap();
    drop(store);

    let reopened = FileStore::new(&path);
    let task = reopened.append("after").await.unwrap();
    assert_eq!(task.id, TaskId::new(2));
}

#[tokio::test]
async fn delete_miss_leaves_file_bytes_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    let store = FileStore::new(&path);
    store.ensure_exists().await.unwrap();
    store.append("keep me").await.unwrap();

    let before = tokio::fs::read(&path).await.unwrap();
    assert!(!store.remove_by_id(TaskId::new(99)).await.unwrap());
    let after = tokio::fs::read(&path).await.unwrap();

    assert_eq!(before, after);
}

#[tokio::test]
async fn missing_file_is_a_read_error_until_seeded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");

    let store = FileStore::new(&path);
    assert!(matches!(
        store.load_all().await.unwrap_err(),
        StoreError::Read { .. }
    ));

    store.ensure_exists().await.unwrap();
    assert!(store.load_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn malformed_file_is_reported_as_such() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    tokio::fs::write(&path, r#"{"id": 1}"#).await.unwrap();

    let store = FileStore::new(&path);
    assert!(matches!(
        store.load_all().await.unwrap_err(),
        StoreError::Malformed { .. }
    ));
}

#[tokio::test]
async fn lists_written_by_other_tooling_are_readable() {
    // Hand-written file in the documented on-disk format, ids with a gap.
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.json");
    tokio::fs::write(
        &path,
        r#"[{"id":1,"description":"a"},{"id":7,"description":"b"}]"#,
    )
    .await
    .unwrap();

    let store = FileStore::new(&path);
    let tasks = store.load_all().await.unwrap();
    assert_eq!(
        tasks,
        vec![Task::new(TaskId::new(1), "a"), Task::new(TaskId::new(7), "b")]
    );

    // Appending derives from the last element: 7 + 1 = 8.
    let task = store.append("c").await.unwrap();
    assert_eq!(task.id, TaskId::new(8));
}
