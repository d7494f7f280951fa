//! Interactive session tests.
//!
//! The `session` command reads commands from stdin, so these tests pipe a
//! script in and check the transcript.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const WORKOUT: &str = r#"{
    "date": "2025-08-11",
    "goal": "strength",
    "fase1": [
        {"name": "Squat", "detail": "3x10", "description": "main lift",
         "contraindicated_for": ["knee"],
         "options": [{"type": "standard", "description": "Back squat"},
                     {"type": "physio", "description": "Box squat"}]},
        {"name": "Row", "detail": "3x10", "description": "pull"}
    ],
    "fase2": [
        {"name": "Tabata core", "detail": "4 min", "description": "core",
         "options": [{"type": "standard", "description": "Hollow hold, Sit-up"}]}
    ]
}"#;

fn setup_test_dir() -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("workout.json"), WORKOUT).unwrap();
    fs::write(dir.path().join("other.json"), r#"{"cooldown": [{"name": "Stretch"}]}"#).unwrap();
    fs::write(dir.path().join("broken.json"), "{ nope").unwrap();
    dir
}

fn cli(dir: &TempDir) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("wod"));
    cmd.env("XDG_CONFIG_HOME", dir.path().join("config"));
    cmd.current_dir(dir.path());
    cmd
}

#[test]
fn test_session_toggles_and_summary() {
    let dir = setup_test_dir();

    cli(&dir)
        .arg("session")
        .arg("workout.json")
        .write_stdin("issue knee\ndone fase1 1\ndone fase2 1\nshow\nsummary\nquit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout loaded: 2 sections, 3 exercises"))
        .stdout(predicate::str::contains("knee active"))
        .stdout(predicate::str::contains("fase1 #1 done"))
        .stdout(predicate::str::contains("Box squat"))
        .stdout(predicate::str::contains("Hollow hold"))
        .stdout(predicate::str::contains("Completed:    2"))
        .stdout(predicate::str::contains("Limitations:  1"));
}

#[test]
fn test_session_done_twice_undoes() {
    let dir = setup_test_dir();

    cli(&dir)
        .arg("session")
        .arg("workout.json")
        .write_stdin("done fase1 2\ndone fase1 2\nsummary\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("fase1 #2 not done"))
        .stdout(predicate::str::contains("Completed:    0"));
}

#[test]
fn test_session_requires_loaded_document() {
    let dir = setup_test_dir();

    cli(&dir)
        .arg("session")
        .write_stdin("summary\nissue knee\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("no workout document is loaded"));
}

#[test]
fn test_session_broken_load_stays_unloaded() {
    let dir = setup_test_dir();

    cli(&dir)
        .arg("session")
        .write_stdin("load broken.json\nsummary\nload workout.json\nsummary\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Could not load workout"))
        .stdout(predicate::str::contains("no workout document is loaded"))
        .stdout(predicate::str::contains("Exercises:    3"));
}

#[test]
fn test_session_reload_clears_completion_keeps_profile() {
    let dir = setup_test_dir();

    cli(&dir)
        .arg("session")
        .arg("workout.json")
        .write_stdin("issue back\ndone fase1 1\nload other.json\nsummary\nissues\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Completed:    0"))
        .stdout(predicate::str::contains("Exercises:    1"))
        .stdout(predicate::str::contains("Limitations:  1"))
        .stdout(predicate::str::contains("Active: back"));
}

#[test]
fn test_session_reset_policy_from_config() {
    let dir = setup_test_dir();
    let config = dir.path().join("wod.toml");
    fs::write(&config, "[session]\nreset_profile_on_reload = true\n").unwrap();

    cli(&dir)
        .arg("session")
        .arg("workout.json")
        .arg("--config")
        .arg(&config)
        .write_stdin("issue back\nreset\nload workout.json\nsummary\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Limitations:  0"));
}

#[test]
fn test_session_unknown_command() {
    let dir = setup_test_dir();

    cli(&dir)
        .arg("session")
        .write_stdin("dance\nissue\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Unknown command: dance"))
        .stdout(predicate::str::contains("Missing argument for 'issue'"));
}
