use serde::{Deserialize, Serialize};

/// A queued task.
///
/// `completed_at` is present exactly when `done` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub done: bool,
    pub created_at: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<u64>,
}

impl Task {
    /// Build a new open task. Returns `None` for a blank title.
    pub fn new(title: &str, now: u64) -> Option<Self> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        Some(Self {
            id: super::new_id(),
            title: title.to_string(),
            done: false,
            created_at: now,
            completed_at: None,
        })
    }

    /// The same task with `done` flipped and `completed_at` set or cleared
    /// to match.
    pub fn toggled(&self, now: u64) -> Self {
        let done = !self.done;
        Self {
            done,
            completed_at: done.then(|| now.max(self.created_at)),
            ..self.clone()
        }
    }

    pub fn is_consistent(&self) -> bool {
        match self.completed_at {
            Some(at) => self.done && at >= self.created_at,
            None => !self.done,
        }
    }
}
