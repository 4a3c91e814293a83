use assert_cmd::Command;
use chrono::{Duration, Utc};
use predicates::prelude::*;
use tempfile::TempDir;

use loggable::audit::LogStore;
use loggable::config::paths::{LoggablePaths, DATA_DIR_ENV};
use loggable::models::{ActorId, NewLogRecord, OwnerRef};
use loggable::storage::Storage;

fn loggable(data_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("loggable").unwrap();
    cmd.env(DATA_DIR_ENV, data_dir.path()).env_remove("RUST_LOG");
    cmd
}

fn seed_invoice_history(data_dir: &TempDir, count: i64) {
    let paths = LoggablePaths::with_base_dir(data_dir.path().to_path_buf());
    let mut storage = Storage::new(paths).unwrap();
    storage.load_all().unwrap();

    let owner = OwnerRef::new("Invoice", 42u64);
    let base = Utc::now() - Duration::minutes(count);
    for i in 0..count {
        let record = NewLogRecord::new(owner.clone(), "INVOICES", format!(r#"{{"total":{}}}"#, i))
            .with_actor(Some(ActorId::from("clerk")))
            .with_reason(Some(format!("revision {}", i)))
            .with_created_at(base + Duration::minutes(i));
        storage.logs.insert(record).unwrap();
    }
}

#[test]
fn config_shows_paths_and_defaults() {
    let data_dir = TempDir::new().unwrap();

    loggable(&data_dir)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("models_logs.json"))
        .stdout(predicate::str::contains("Auto-prune:   true"));
}

#[test]
fn list_without_history() {
    let data_dir = TempDir::new().unwrap();

    loggable(&data_dir)
        .args(["log", "list", "Invoice#1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No log records found."));
}

#[test]
fn malformed_owner_is_rejected() {
    let data_dir = TempDir::new().unwrap();

    loggable(&data_dir)
        .args(["log", "list", "Invoice42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Type#id"));
}

#[test]
fn list_and_show_seeded_history() {
    let data_dir = TempDir::new().unwrap();
    seed_invoice_history(&data_dir, 3);

    loggable(&data_dir)
        .args(["log", "list", "Invoice#42", "--limit", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("History of Invoice#42"))
        .stdout(predicate::str::contains("clerk"));

    loggable(&data_dir)
        .args(["log", "show", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reason:  revision 2"))
        .stdout(predicate::str::contains("total: 2"));

    loggable(&data_dir)
        .args(["log", "show", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn owners_and_prune() {
    let data_dir = TempDir::new().unwrap();
    seed_invoice_history(&data_dir, 4);

    loggable(&data_dir)
        .args(["log", "owners"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Invoice#42"));

    loggable(&data_dir)
        .args(["log", "prune", "Invoice#42", "--keep", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pruned 3 log record(s)"));

    let paths = LoggablePaths::with_base_dir(data_dir.path().to_path_buf());
    let mut storage = Storage::new(paths).unwrap();
    storage.load_all().unwrap();
    let remaining = storage.logs.list_for(&OwnerRef::new("Invoice", 42u64)).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].reason.as_deref(), Some("revision 3"));
}

#[test]
fn export_writes_requested_format() {
    let data_dir = TempDir::new().unwrap();
    seed_invoice_history(&data_dir, 2);
    let output = data_dir.path().join("invoice-42.csv");

    loggable(&data_dir)
        .args(["export", "Invoice#42"])
        .arg(&output)
        .args(["--format", "csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exported to"));

    let contents = std::fs::read_to_string(&output).unwrap();
    assert_eq!(contents.lines().count(), 3);
    assert!(contents.contains("revision 1"));
}
