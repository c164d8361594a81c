//! Timer engine implementation.
//!
//! The timer engine is a wall-clock-based state machine. It holds no
//! counters: while running, the remaining time is recomputed from the
//! captured start instant, so missed samples (a suspended process, a
//! reload) never skew the countdown. The caller drives it with `sample()`.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running -> (Paused | Completed) -> Idle
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new();
//! engine.start(now_ms());
//! // On every sampler tick:
//! engine.sample(now_ms()); // Returns Some(Event) when the run completes
//! ```

use serde::{Deserialize, Serialize};

use crate::events::Event;

/// Length of one focus run (25 minutes).
pub const FOCUS_DURATION_SECS: u64 = 25 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Paused,
    /// Run finished; waiting for the mood entry that closes the cycle.
    Completed,
}

/// Persisted form of the engine, stored under `bt.timer`.
///
/// While `running`, `remaining` is only the last published sample; the
/// authoritative value is derived from `last_start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimerSnapshot {
    #[serde(default)]
    pub running: bool,
    #[serde(default = "default_remaining")]
    pub remaining: u64,
    #[serde(default)]
    pub last_start: u64,
}

fn default_remaining() -> u64 {
    FOCUS_DURATION_SECS
}

impl Default for TimerSnapshot {
    fn default() -> Self {
        Self {
            running: false,
            remaining: FOCUS_DURATION_SECS,
            last_start: 0,
        }
    }
}

/// Seconds left for `snapshot` at `now`, always within `0..=duration_secs`.
pub fn compute_remaining(snapshot: &TimerSnapshot, duration_secs: u64, now: u64) -> u64 {
    if !snapshot.running {
        return snapshot.remaining.min(duration_secs);
    }
    let elapsed_secs = now.saturating_sub(snapshot.last_start) / 1000;
    duration_secs.saturating_sub(elapsed_secs)
}

/// Core timer engine.
///
/// Operates on wall-clock instants supplied by the caller -- no internal
/// thread and no clock reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerEngine {
    duration_secs: u64,
    state: TimerState,
    /// Epoch ms of the current run's start; 0 when no run is active.
    last_start: u64,
    /// Frozen value while not running, last published sample while running.
    remaining_secs: u64,
}

impl Default for TimerEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerEngine {
    /// Create an idle engine with the standard 25 minute duration.
    pub fn new() -> Self {
        Self::with_duration(FOCUS_DURATION_SECS)
    }

    pub fn with_duration(duration_secs: u64) -> Self {
        Self {
            duration_secs,
            state: TimerState::Idle,
            last_start: 0,
            remaining_secs: duration_secs,
        }
    }

    /// Rehydrate from a stored snapshot.
    ///
    /// A running snapshot resumes from `last_start` regardless of the stale
    /// `remaining`. A stopped snapshot at zero with a recorded start is a
    /// completed run still waiting for its mood entry; any other stopped
    /// snapshot with a recorded start is paused.
    pub fn from_snapshot(snapshot: TimerSnapshot, duration_secs: u64) -> Self {
        let remaining_secs = snapshot.remaining.min(duration_secs);
        let state = if snapshot.running {
            TimerState::Running
        } else if remaining_secs == 0 && snapshot.last_start > 0 {
            TimerState::Completed
        } else if snapshot.last_start > 0 || remaining_secs < duration_secs {
            TimerState::Paused
        } else {
            TimerState::Idle
        };
        Self {
            duration_secs,
            state,
            last_start: snapshot.last_start,
            remaining_secs,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == TimerState::Running
    }

    pub fn duration_secs(&self) -> u64 {
        self.duration_secs
    }

    pub fn last_start(&self) -> u64 {
        self.last_start
    }

    /// Seconds left at `now`.
    pub fn remaining_secs(&self, now: u64) -> u64 {
        compute_remaining(&self.snapshot(), self.duration_secs, now)
    }

    /// 0.0 .. 1.0 progress through the run.
    pub fn progress(&self, now: u64) -> f64 {
        if self.duration_secs == 0 {
            return 0.0;
        }
        1.0 - (self.remaining_secs(now) as f64 / self.duration_secs as f64)
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            running: self.is_running(),
            remaining: self.remaining_secs,
            last_start: self.last_start,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Begin a fresh run. No-op while running or while a completed run
    /// awaits its mood entry.
    pub fn start(&mut self, now: u64) -> Option<Event> {
        match self.state {
            TimerState::Idle | TimerState::Paused => {
                self.state = TimerState::Running;
                self.last_start = now;
                self.remaining_secs = self.duration_secs;
                tracing::debug!(last_start = now, "timer started");
                Some(Event::TimerStarted {
                    duration_secs: self.duration_secs,
                    at: now,
                })
            }
            TimerState::Running | TimerState::Completed => None,
        }
    }

    /// Freeze the countdown. Pausing at or past the deadline finishes the
    /// run instead and returns `TimerCompleted`.
    pub fn pause(&mut self, now: u64) -> Option<Event> {
        match self.state {
            TimerState::Running if self.remaining_secs(now) == 0 => self.sample(now),
            TimerState::Running => {
                self.remaining_secs = self.remaining_secs(now);
                self.state = TimerState::Paused;
                tracing::debug!(remaining = self.remaining_secs, "timer paused");
                Some(Event::TimerPaused {
                    remaining_secs: self.remaining_secs,
                    at: now,
                })
            }
            _ => None,
        }
    }

    /// Back to idle with a full duration. Valid from every state.
    pub fn reset(&mut self, now: u64) -> Option<Event> {
        self.state = TimerState::Idle;
        self.last_start = 0;
        self.remaining_secs = self.duration_secs;
        tracing::debug!("timer reset");
        Some(Event::TimerReset { at: now })
    }

    /// Recompute the countdown. Returns `Some(Event::TimerCompleted)` exactly
    /// once per run, on the first sample at or past the deadline.
    pub fn sample(&mut self, now: u64) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.remaining_secs = self.remaining_secs(now);
        if self.remaining_secs > 0 {
            return None;
        }
        self.state = TimerState::Completed;
        tracing::info!(start = self.last_start, end = now, "focus run completed");
        Some(Event::TimerCompleted {
            start: self.last_start,
            end: now,
        })
    }
}
