use serde::{Deserialize, Serialize};

/// One focus-timer run. A session without `end` is still in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub start: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<u64>,
}

impl Session {
    pub fn completed(start: u64, end: u64) -> Self {
        Self {
            id: super::new_id(),
            start,
            end: Some(end.max(start)),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.end.is_some()
    }

    /// Length of a completed session; zero while in progress.
    pub fn duration_ms(&self) -> u64 {
        self.end.map_or(0, |end| end.saturating_sub(self.start))
    }
}
