//! Peace score engine.
//!
//! The peace score is a 0-100 composite of today's focus time, tasks
//! completed today and the latest mood logged today:
//!
//! ```text
//! total = round(0.5 * focus% + 0.3 * task% + 0.2 * mood%)
//! ```
//!
//! | Term  | Weight | 100% when                          |
//! |-------|--------|------------------------------------|
//! | focus | 0.5    | 120 minutes of completed sessions  |
//! | tasks | 0.3    | 3 tasks completed                  |
//! | mood  | 0.2    | latest mood is 5 (absent counts 3) |
//!
//! "Today" is the local calendar day of `now`. [`peace_score`] is pure;
//! [`PeaceMeter`] memoizes it by repository revision and day.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{local_date, same_local_day, Mood, Session, Task, MOOD_MAX, MOOD_MIN, MOOD_NEUTRAL};

pub const FOCUS_WEIGHT: f64 = 0.5;
pub const TASK_WEIGHT: f64 = 0.3;
pub const MOOD_WEIGHT: f64 = 0.2;

/// Scaling targets for the focus and task terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreTargets {
    /// Focus minutes that count as 100%.
    pub focus_minutes: f64,
    /// Completed tasks that count as 100%.
    pub tasks: u32,
}

impl Default for ScoreTargets {
    fn default() -> Self {
        Self {
            focus_minutes: 120.0,
            tasks: 3,
        }
    }
}

/// Read-only slices the score is computed from.
#[derive(Debug, Clone, Copy)]
pub struct PeaceInputs<'a> {
    pub sessions: &'a [Session],
    pub tasks: &'a [Task],
    pub moods: &'a [Mood],
}

/// Score breakdown. Percentages are each within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeaceScore {
    pub focus_minutes: f64,
    pub focus_pct: f64,
    pub tasks_completed: u32,
    pub task_pct: f64,
    pub mood: u8,
    pub mood_pct: f64,
    pub total: u8,
}

fn pct(value: f64, target: f64) -> f64 {
    if target <= 0.0 {
        return 100.0;
    }
    (value / target * 100.0).clamp(0.0, 100.0)
}

/// Compute the peace score for the local day containing `now`.
pub fn peace_score(inputs: &PeaceInputs<'_>, now: u64, targets: &ScoreTargets) -> PeaceScore {
    let focus_ms: u64 = inputs
        .sessions
        .iter()
        .filter(|s| s.is_complete() && same_local_day(s.start, now))
        .map(Session::duration_ms)
        .sum();
    let focus_minutes = focus_ms as f64 / 60_000.0;
    let focus_pct = pct(focus_minutes, targets.focus_minutes);

    let tasks_completed = inputs
        .tasks
        .iter()
        .filter(|t| t.done && t.completed_at.is_some_and(|at| same_local_day(at, now)))
        .count() as u32;
    let task_pct = pct(tasks_completed as f64, targets.tasks as f64);

    // max_by_key keeps the last of equal maxima, so later entries win ties.
    let mood = inputs
        .moods
        .iter()
        .filter(|m| same_local_day(m.ts, now))
        .max_by_key(|m| m.ts)
        .map_or(MOOD_NEUTRAL, |m| m.score)
        .clamp(MOOD_MIN, MOOD_MAX);
    let mood_pct = pct((mood - MOOD_MIN) as f64, (MOOD_MAX - MOOD_MIN) as f64);

    let total = (FOCUS_WEIGHT * focus_pct + TASK_WEIGHT * task_pct + MOOD_WEIGHT * mood_pct)
        .round()
        .clamp(0.0, 100.0) as u8;

    PeaceScore {
        focus_minutes,
        focus_pct,
        tasks_completed,
        task_pct,
        mood,
        mood_pct,
        total,
    }
}

/// Identity of the inputs a cached score was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoKey {
    pub sessions_rev: u64,
    pub tasks_rev: u64,
    pub moods_rev: u64,
    pub day: Option<NaiveDate>,
}

/// Memoizing wrapper around [`peace_score`].
#[derive(Debug, Clone, Default)]
pub struct PeaceMeter {
    targets: ScoreTargets,
    memo: Option<(MemoKey, PeaceScore)>,
}

impl PeaceMeter {
    pub fn new(targets: ScoreTargets) -> Self {
        Self {
            targets,
            memo: None,
        }
    }

    pub fn targets(&self) -> &ScoreTargets {
        &self.targets
    }

    /// Score for `inputs`, recomputed only when `revisions` (sessions,
    /// tasks, moods) or the local day differ from the previous call.
    pub fn score(&mut self, inputs: &PeaceInputs<'_>, revisions: [u64; 3], now: u64) -> PeaceScore {
        let key = MemoKey {
            sessions_rev: revisions[0],
            tasks_rev: revisions[1],
            moods_rev: revisions[2],
            day: local_date(now),
        };
        if let Some((cached_key, score)) = self.memo {
            if cached_key == key {
                return score;
            }
        }
        let score = peace_score(inputs, now, &self.targets);
        self.memo = Some((key, score));
        score
    }

    pub fn is_cached(&self) -> bool {
        self.memo.is_some()
    }
}
