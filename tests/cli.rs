//! End-to-end tests for the focuscore binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn focuscore(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("focuscore").unwrap();
    cmd.arg("--data-dir").arg(home.path()).env_remove("FOCUSCORE_HOME");
    cmd
}

fn json(home: &TempDir, args: &[&str]) -> serde_json::Value {
    let output = focuscore(home).args(["-o", "json"]).args(args).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_first_run_lists_seed_tasks() {
    let home = TempDir::new().unwrap();
    let listed = json(&home, &["list"]);

    assert_eq!(listed["count"], 3);
    assert!(home.path().join("focuscore.db").exists());
}

#[test]
fn test_add_persists_across_runs() {
    let home = TempDir::new().unwrap();
    focuscore(&home)
        .args(["add", "write release notes #docs !high"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created:"));

    let listed = json(&home, &["list"]);
    assert_eq!(listed["count"], 4);
    assert_eq!(listed["items"][0]["title"], "write release notes");
    assert_eq!(listed["items"][0]["priority"], "HIGH");
    assert_eq!(listed["items"][0]["tags"][0], "docs");
}

#[test]
fn test_toggle_unknown_id_succeeds() {
    let home = TempDir::new().unwrap();
    focuscore(&home)
        .args(["toggle", "does-not-exist"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nothing changed"));
}

#[test]
fn test_toggle_twice_restores_status() {
    let home = TempDir::new().unwrap();
    assert_eq!(json(&home, &["toggle", "2"])["task"]["status"], "COMPLETED");
    assert_eq!(json(&home, &["toggle", "2"])["task"]["status"], "PENDING");
}

#[test]
fn test_show_missing_id_fails() {
    let home = TempDir::new().unwrap();
    focuscore(&home)
        .args(["show", "does-not-exist"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not found"));
}

#[test]
fn test_focus_picks_overdue_task() {
    let home = TempDir::new().unwrap();
    let focus = json(&home, &["focus"]);

    assert_eq!(focus["active"]["title"], "Draft API Documentation");
    assert_eq!(focus["state"], "idle");
    assert_eq!(focus["remaining"], "25:00");
}

#[test]
fn test_focus_complete_promotes_next() {
    let home = TempDir::new().unwrap();
    let done = json(&home, &["focus", "complete"]);

    assert_eq!(done["completed"]["title"], "Draft API Documentation");
    assert_eq!(done["next"], "Review System Architecture");
}

#[test]
fn test_agenda_includes_overdue_and_today() {
    let home = TempDir::new().unwrap();
    let agenda = json(&home, &["agenda"]);

    assert_eq!(agenda["list"], "Agenda");
    assert_eq!(agenda["count"], 2);
}

#[test]
fn test_zero_session_length_is_rejected() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.yaml"), "focus:\n  session_minutes: 0\n").unwrap();

    focuscore(&home)
        .arg("focus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("session_minutes"));
}

#[test]
fn test_add_with_huge_offset_does_not_crash() {
    let home = TempDir::new().unwrap();
    focuscore(&home)
        .args(["add", "ship in 99999999 days"])
        .assert()
        .success();

    focuscore(&home)
        .args(["add", "ship", "--deadline", "in 99999999 weeks"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unrecognized deadline"));
}

#[test]
fn test_config_session_length() {
    let home = TempDir::new().unwrap();
    std::fs::write(home.path().join("config.yaml"), "focus:\n  session_minutes: 50\n").unwrap();

    assert_eq!(json(&home, &["focus"])["remaining"], "50:00");
}
