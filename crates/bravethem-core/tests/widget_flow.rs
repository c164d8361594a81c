//! End-to-end flows through the widget backed by a real SQLite file.

use bravethem_core::storage::{self, StorageKey};
use bravethem_core::{Event, FocusChange, SqliteStore, Store, TimerState, Widget};
use tempfile::TempDir;

const T0: u64 = 1_700_000_000_000;

fn open(dir: &TempDir) -> Widget<SqliteStore> {
    let store = SqliteStore::open_at(&dir.path().join("bravethem.db")).unwrap();
    Widget::load(store)
}

fn captured_id(event: Option<Event>) -> String {
    match event {
        Some(Event::TaskCaptured { task }) => task.id,
        other => panic!("Expected TaskCaptured, got {other:?}"),
    }
}

#[test]
fn collections_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let mut widget = open(&dir);
    assert_eq!(widget.set_focus("write the report", false), FocusChange::Set);
    let a = captured_id(widget.capture_task("draft outline", T0));
    captured_id(widget.capture_task("send email", T0 + 1));
    widget.toggle_task(&a, T0 + 2);
    widget.start_timer(T0);
    widget.sample(T0 + 1_500_000);
    widget.submit_mood(4, Some("calm"), T0 + 1_501_000);

    let tasks = widget.tasks().to_vec();
    let sessions = widget.sessions().to_vec();
    let moods = widget.moods().to_vec();
    drop(widget);

    let reopened = open(&dir);
    assert_eq!(reopened.focus(), Some("write the report"));
    assert_eq!(reopened.tasks(), tasks.as_slice());
    assert_eq!(reopened.sessions(), sessions.as_slice());
    assert_eq!(reopened.moods(), moods.as_slice());
    assert_eq!(reopened.timer().state(), TimerState::Idle);
}

#[test]
fn interrupted_run_resumes_after_reopen() {
    let dir = TempDir::new().unwrap();
    let mut widget = open(&dir);
    widget.start_timer(T0);
    drop(widget);

    let mut widget = open(&dir);
    assert_eq!(widget.timer().state(), TimerState::Running);
    assert_eq!(widget.timer().remaining_secs(T0 + 600_000), 900);

    let event = widget.sample(T0 + 1_500_000);
    assert!(matches!(event, Some(Event::MoodRequested { .. })));
    assert_eq!(widget.sessions()[0].start, T0);
    assert_eq!(widget.sessions()[0].end, Some(T0 + 1_500_000));
}

#[test]
fn corrupt_values_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    {
        let store = SqliteStore::open_at(&dir.path().join("bravethem.db")).unwrap();
        store.put_raw(StorageKey::Tasks.as_str(), "{not json").unwrap();
        store.put_raw(StorageKey::Timer.as_str(), "42").unwrap();
        storage::save(&store, StorageKey::SingleFocus, "keep me");
    }

    let mut widget = open(&dir);
    assert!(widget.tasks().is_empty());
    assert_eq!(widget.timer().state(), TimerState::Idle);
    assert_eq!(widget.focus(), Some("keep me"));

    // The next write replaces the corrupt value.
    captured_id(widget.capture_task("fresh start", T0));
    drop(widget);
    assert_eq!(open(&dir).tasks().len(), 1);
}

#[test]
fn focus_change_requires_confirmation() {
    let dir = TempDir::new().unwrap();
    let mut widget = open(&dir);
    widget.set_focus("ship v1", false);
    assert_eq!(
        widget.set_focus("ship v2", false),
        FocusChange::NeedsConfirmation {
            current: "ship v1".into()
        }
    );
    assert_eq!(widget.set_focus("ship v1", false), FocusChange::Unchanged);
    assert_eq!(widget.set_focus("ship v2", true), FocusChange::Set);
    drop(widget);
    assert_eq!(open(&dir).focus(), Some("ship v2"));
}

#[test]
fn double_toggle_restores_open_task() {
    let dir = TempDir::new().unwrap();
    let mut widget = open(&dir);
    let id = captured_id(widget.capture_task("review PR", T0));
    widget.toggle_task(&id, T0 + 1_000);
    widget.toggle_task(&id, T0 + 2_000);
    let task = &widget.tasks()[0];
    assert!(!task.done);
    assert_eq!(task.completed_at, None);

    widget.toggle_task(&id, T0 + 3_000);
    assert_eq!(widget.tasks()[0].completed_at, Some(T0 + 3_000));
}
