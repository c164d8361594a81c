use serde::{Deserialize, Serialize};

use crate::model::{Mood, Task};
use crate::timer::TimerState;

/// Every state change in the widget produces an Event.
/// The CLI prints them; the watch loop reacts to them.
///
/// All `at`/`start`/`end` values are epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerStarted {
        duration_secs: u64,
        at: u64,
    },
    TimerPaused {
        remaining_secs: u64,
        at: u64,
    },
    TimerReset {
        at: u64,
    },
    /// The countdown reached zero; a session spanning `start..end` ends here.
    TimerCompleted {
        start: u64,
        end: u64,
    },
    /// Completion was recorded and the mood step is now open.
    MoodRequested {
        session_id: String,
        at: u64,
    },
    MoodLogged {
        mood: Mood,
    },
    /// The mood step was closed without an entry; the timer stays completed.
    MoodDismissed {
        at: u64,
    },
    TaskCaptured {
        task: Task,
    },
    TaskToggled {
        task: Task,
    },
    TaskRemoved {
        id: String,
    },
    FocusSet {
        focus: String,
    },
    StateSnapshot {
        state: TimerState,
        remaining_secs: u64,
        duration_secs: u64,
        last_start: u64,
        progress_pct: f64,
        awaiting_mood: bool,
        at: u64,
    },
}
