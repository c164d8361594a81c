//! Basic CLI E2E tests.
//!
//! Each test runs the built binary against its own temporary data
//! directory and checks stdout JSON and exit codes.

use std::io::Write;
use std::process::{Command, Stdio};

use bravethem_core::model::{now_ms, same_local_day};
use bravethem_core::storage::{self, StorageKey};
use bravethem_core::{SqliteStore, TimerSnapshot};
use tempfile::TempDir;

/// Run a CLI command with `stdin` piped in and return (stdout, stderr, code).
fn run_cli_with_input(dir: &TempDir, args: &[&str], stdin: &str) -> (String, String, i32) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_bravethem"))
        .args(args)
        .env("BRAVETHEM_DATA_DIR", dir.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .unwrap()
        .write_all(stdin.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);
    (stdout, stderr, code)
}

fn run_cli(dir: &TempDir, args: &[&str]) -> (String, String, i32) {
    run_cli_with_input(dir, args, "")
}

fn run_json(dir: &TempDir, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_fresh_peace_is_ten() {
    let dir = TempDir::new().unwrap();
    let score = run_json(&dir, &["peace", "--json"]);
    assert_eq!(score["total"], 10);
    assert_eq!(score["mood"], 3);
}

#[test]
fn test_task_add_list_done() {
    let dir = TempDir::new().unwrap();
    let added = run_json(&dir, &["task", "add", "write tests"]);
    assert_eq!(added["type"], "TaskCaptured");
    let id = added["task"]["id"].as_str().unwrap().to_string();

    let listed = run_json(&dir, &["task", "list", "--json"]);
    assert_eq!(listed[0]["title"], "write tests");

    let toggled = run_json(&dir, &["task", "done", &id]);
    assert_eq!(toggled["task"]["done"], true);

    let listed = run_json(&dir, &["task", "list", "--json"]);
    assert_eq!(listed.as_array().unwrap().len(), 0);
    let listed = run_json(&dir, &["task", "list", "--all", "--json"]);
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[test]
fn test_unknown_task_fails() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["task", "done", "nope"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error: task not found"));
}

#[test]
fn test_capture_reads_stdin() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli_with_input(&dir, &["capture"], "buy milk\n");
    assert_eq!(code, 0);
    let event: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(event["task"]["title"], "buy milk");
}

#[test]
fn test_focus_replacement_is_gated() {
    let dir = TempDir::new().unwrap();
    run_json(&dir, &["focus", "set", "ship v1"]);

    let (_, stderr, code) = run_cli_with_input(&dir, &["focus", "set", "ship v2"], "n\n");
    assert_eq!(code, 0);
    assert!(stderr.contains("kept current focus"));
    assert_eq!(run_json(&dir, &["focus", "show"])["focus"], "ship v1");

    run_json(&dir, &["focus", "set", "ship v2", "--yes"]);
    assert_eq!(run_json(&dir, &["focus", "show"])["focus"], "ship v2");
}

#[test]
fn test_timer_start_status_pause() {
    let dir = TempDir::new().unwrap();
    assert_eq!(run_json(&dir, &["timer", "start"])["type"], "TimerStarted");
    let status = run_json(&dir, &["timer", "status"]);
    assert_eq!(status["state"], "running");
    assert_eq!(run_json(&dir, &["timer", "pause"])["type"], "TimerPaused");
    assert_eq!(run_json(&dir, &["timer", "reset"])["type"], "TimerReset");
    assert_eq!(run_json(&dir, &["timer", "status"])["remaining_secs"], 1500);
}

#[test]
fn test_mood_requires_completed_run() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(&dir, &["mood", "log", "abc"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("invalid mood score"));

    let (_, _, code) = run_cli(&dir, &["mood", "log", "4"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_get_set() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(&dir, &["config", "get", "timer.sample_interval_ms"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "250");

    let (_, _, code) = run_cli(&dir, &["config", "set", "display.visible_tasks", "5"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(&dir, &["config", "get", "display.visible_tasks"]);
    assert_eq!(stdout.trim(), "5");

    let (_, stderr, code) = run_cli(&dir, &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown config key"));
}

#[test]
fn test_watch_captures_and_quits() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli_with_input(&dir, &["watch"], "k from watch\ns\nq\n");
    assert_eq!(code, 0);
    let events: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(events[0]["type"], "StateSnapshot");
    assert!(events.iter().any(|e| e["type"] == "TaskCaptured"));
    assert!(events.iter().any(|e| e["type"] == "TimerStarted"));

    let listed = run_json(&dir, &["task", "list", "--json"]);
    assert_eq!(listed[0]["title"], "from watch");
}

/// Leave a running timer in the database whose deadline has already passed.
fn seed_overdue_run(dir: &TempDir) -> u64 {
    let last_start = now_ms() - 26 * 60_000;
    let store = SqliteStore::open_at(&dir.path().join("bravethem.db")).unwrap();
    storage::save(
        &store,
        StorageKey::Timer,
        &TimerSnapshot {
            running: true,
            remaining: 1500,
            last_start,
        },
    );
    last_start
}

#[test]
fn test_peace_counts_run_finished_while_closed() {
    let dir = TempDir::new().unwrap();
    let last_start = seed_overdue_run(&dir);

    let score = run_json(&dir, &["peace", "--json"]);
    if same_local_day(last_start, now_ms()) {
        assert!(score["total"].as_u64().unwrap() > 10, "{score}");
        assert!(score["focus_minutes"].as_f64().unwrap() >= 25.0);
    }

    let status = run_json(&dir, &["timer", "status"]);
    assert_eq!(status["state"], "completed");
    assert_eq!(status["awaiting_mood"], true);
}

#[test]
fn test_status_after_unobserved_completion_is_one_document() {
    let dir = TempDir::new().unwrap();
    seed_overdue_run(&dir);

    // run_json fails unless stdout is a single JSON value.
    let status = run_json(&dir, &["timer", "status"]);
    assert_eq!(status["type"], "StateSnapshot");
    assert_eq!(status["remaining_secs"], 0);

    let logged = run_json(&dir, &["mood", "log", "4"]);
    assert_eq!(logged["type"], "MoodLogged");
}
