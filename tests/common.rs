#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use tempfile::TempDir;

pub fn e2spy() -> Command {
    cargo_bin_cmd!("e2spy")
}

/// Fresh temp dir plus the path of a (not yet created) database inside it.
/// Keep the TempDir alive for the duration of the test.
pub fn setup_test_db(name: &str) -> (TempDir, String) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let db_path = dir
        .path()
        .join(format!("{name}_e2spy.sqlite"))
        .to_string_lossy()
        .to_string();
    (dir, db_path)
}

/// Initialize the DB (creates tables) without touching the user's config file.
pub fn init_db(db_path: &str) {
    e2spy()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}

/// Store all four E2 connection settings.
pub fn configure_e2(db_path: &str) {
    e2spy()
        .args([
            "--db",
            db_path,
            "settings",
            "--e2-hostname",
            "sql01",
            "--e2-user",
            "reporter",
            "--e2-password",
            "hunter2",
            "--e2-database",
            "E2_LIVE",
        ])
        .assert()
        .success();
}
