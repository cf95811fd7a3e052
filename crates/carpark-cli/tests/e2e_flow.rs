//! End-to-end tests driving the `carpark` binary.
//!
//! Tests the full flow: park → dashboard → exit → transactions
//! against a database in a temporary directory.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

fn carpark_binary() -> String {
    env!("CARGO_BIN_EXE_carpark").to_string()
}

fn db_path(temp: &Path) -> PathBuf {
    temp.join("data/carpark.db")
}

/// Runs `carpark` with an isolated home directory and database.
fn carpark(temp: &Path, args: &[&str]) -> Output {
    Command::new(carpark_binary())
        .env("HOME", temp)
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("XDG_DATA_HOME")
        .env_remove("RUST_LOG")
        .env("CARPARK_DATABASE_PATH", db_path(temp))
        .args(args)
        .output()
        .expect("failed to run carpark")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn assert_success(output: &Output) {
    assert!(
        output.status.success(),
        "carpark should succeed: {}",
        stderr(output)
    );
}

#[test]
fn test_park_exit_flow() {
    let temp = TempDir::new().unwrap();

    let output = carpark(temp.path(), &["park", "ABC123", "--type", "Sedan"]);
    assert_success(&output);
    assert!(stdout(&output).contains("Parked ABC123 (Sedan) on Floor 1, slot 1"));

    let output = carpark(temp.path(), &["park", "XYZ789", "-t", "SUV", "--floor", "1"]);
    assert_success(&output);
    assert!(stdout(&output).contains("slot 2"));

    let output = carpark(temp.path(), &["dashboard"]);
    assert_success(&output);
    let dashboard = stdout(&output);
    assert!(dashboard.contains("Floor 1       10         2          8"));
    assert!(dashboard.contains("Floor 2       10         0         10"));

    let output = carpark(temp.path(), &["exit", "--plate", "ABC123"]);
    assert_success(&output);
    let receipt = stdout(&output);
    assert!(receipt.contains("Plate: ABC123"));
    assert!(receipt.contains("Slot:  1"));
    assert!(receipt.contains("Hours: 1"));
    assert!(receipt.contains("Fee:   ₱50"));

    let output = carpark(temp.path(), &["sessions"]);
    assert_success(&output);
    let sessions = stdout(&output);
    assert!(!sessions.contains("ABC123"));
    assert!(sessions.contains("XYZ789"));

    let output = carpark(temp.path(), &["transactions", "--since", "today"]);
    assert_success(&output);
    assert!(stdout(&output).contains("1 transactions, ₱50 collected"));

    // The freed slot is reused before higher ones
    let output = carpark(temp.path(), &["park", "NEW001", "--type", "Van"]);
    assert_success(&output);
    assert!(stdout(&output).contains("slot 1"));
}

#[test]
fn test_duplicate_plate_rejected() {
    let temp = TempDir::new().unwrap();

    assert_success(&carpark(temp.path(), &["park", "ABC123", "--type", "Sedan"]));

    let output = carpark(
        temp.path(),
        &["park", "ABC123", "--type", "Sedan", "--floor", "Floor 2"],
    );
    assert!(!output.status.success());
    assert!(stderr(&output).contains("vehicle already parked: ABC123"));

    let output = carpark(temp.path(), &["sessions", "--json"]);
    assert_success(&output);
    let sessions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let sessions = sessions.as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["floor"], "Floor 1");
}

#[test]
fn test_full_floor_leaves_sessions_unchanged() {
    let temp = TempDir::new().unwrap();

    // First run creates and seeds the database
    assert_success(&carpark(temp.path(), &["settings"]));
    let conn = rusqlite::Connection::open(db_path(temp.path())).unwrap();
    conn.execute("UPDATE settings SET slots = 1", []).unwrap();
    drop(conn);

    assert_success(&carpark(temp.path(), &["park", "AAA111", "--type", "Sedan"]));
    let before = stdout(&carpark(temp.path(), &["sessions"]));

    let output = carpark(temp.path(), &["park", "BBB222", "--type", "Sedan"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Floor 1 is full"));

    let after = stdout(&carpark(temp.path(), &["sessions"]));
    assert_eq!(before, after);

    // Other floors still have room
    let output = carpark(temp.path(), &["park", "BBB222", "--type", "Sedan", "-f", "2"]);
    assert_success(&output);
}

#[test]
fn test_invalid_input_is_rejected() {
    let temp = TempDir::new().unwrap();

    let output = carpark(temp.path(), &["park", "   ", "--type", "Sedan"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("all fields required"));

    let output = carpark(temp.path(), &["park", "ABC123", "--type", "Sedan", "--floor", "9"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Floor 9 does not exist"));

    let output = carpark(temp.path(), &["park", "ABC123", "--type", "Sedan", "--floor", "Basement"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("invalid floor"));

    let output = carpark(temp.path(), &["exit", "42"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("parking session not found: 42"));
}

#[test]
fn test_slot_views() {
    let temp = TempDir::new().unwrap();

    assert_success(&carpark(temp.path(), &["park", "ABC123", "--type", "Sedan", "-f", "3"]));

    let output = carpark(temp.path(), &["slots", "--floor", "3"]);
    assert_success(&output);
    let grid = stdout(&output);
    assert!(grid.starts_with("Floor 3: 1 of 10 occupied"));
    assert!(grid.contains("1  ABC123"));

    let output = carpark(temp.path(), &["slot", "1", "--floor", "Floor 3"]);
    assert_success(&output);
    assert!(stdout(&output).contains("Plate:   ABC123"));

    let output = carpark(temp.path(), &["slot", "2", "--floor", "3"]);
    assert_success(&output);
    assert_eq!(stdout(&output), "Slot is empty\n");
}

#[test]
fn test_no_subcommand_prints_help() {
    let temp = TempDir::new().unwrap();
    let output = carpark(temp.path(), &[]);
    assert_success(&output);
    assert!(stdout(&output).contains("Usage: carpark"));
    assert!(!db_path(temp.path()).exists());
}
