use serde::{Deserialize, Serialize};

pub const MOOD_MIN: u8 = 1;
pub const MOOD_MAX: u8 = 5;
/// Used by the peace score when no mood was logged today.
pub const MOOD_NEUTRAL: u8 = 3;

/// Self-reported mood captured after a completed session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mood {
    pub id: String,
    pub ts: u64,
    pub score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Mood {
    /// Score is clamped into 1..=5; a blank note is dropped.
    pub fn new(score: u8, note: Option<&str>, ts: u64) -> Self {
        let note = note
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);
        Self {
            id: super::new_id(),
            ts,
            score: score.clamp(MOOD_MIN, MOOD_MAX),
            note,
        }
    }
}
