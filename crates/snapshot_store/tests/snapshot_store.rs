use std::fs;

use snapshot_store::{Snapshot, SnapshotStore, SnapshotStoreError};
use tempfile::TempDir;

fn store_in_tempdir(file_name: &str) -> (TempDir, SnapshotStore) {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let store = SnapshotStore::new(dir.path().join(file_name));
    (dir, store)
}

#[test]
fn missing_file_loads_as_empty_state() {
    let (_dir, store) = store_in_tempdir("snapshot.json");
    let snapshot = store.load().expect("missing file is empty state");
    assert!(snapshot.is_empty());
}

#[test]
fn state_survives_a_save_and_load() {
    let (_dir, store) = store_in_tempdir("snapshot.json");

    let mut snapshot = Snapshot::new();
    snapshot.insert("laststatus-production".to_owned(), "pass".to_owned());
    snapshot.insert("change-production".to_owned(), "uid-1".to_owned());
    store.save(&snapshot).expect("snapshot saves");

    let loaded = store.load().expect("snapshot loads");
    assert_eq!(loaded, snapshot);
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let store = SnapshotStore::new(dir.path().join("state/watch/snapshot.json"));

    store.save(&Snapshot::new()).expect("snapshot saves");
    assert!(store.path().is_file());
}

#[test]
fn saved_files_are_stable_and_readable() {
    let (_dir, store) = store_in_tempdir("snapshot.json");

    let mut snapshot = Snapshot::new();
    snapshot.insert("b".to_owned(), "2".to_owned());
    snapshot.insert("a".to_owned(), "1".to_owned());
    store.save(&snapshot).expect("snapshot saves");
    let first = fs::read(store.path()).expect("file is readable");

    store.save(&snapshot).expect("snapshot saves again");
    let second = fs::read(store.path()).expect("file is readable");

    assert_eq!(first, second);
    let text = String::from_utf8(first).expect("file is UTF-8");
    assert!(text.contains('\n'), "snapshot is pretty-printed");
}

#[test]
fn corrupt_files_fail_with_a_parse_error() {
    let (_dir, store) = store_in_tempdir("snapshot.json");
    fs::write(store.path(), b"not json").expect("file is writable");

    let error = store.load().expect_err("corrupt file must fail");
    assert!(matches!(error, SnapshotStoreError::Parse { .. }));
}
