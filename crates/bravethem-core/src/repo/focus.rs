use crate::storage::{self, StorageKey, Store};

/// Outcome of [`FocusRepo::set`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusChange {
    /// The statement was stored.
    Set,
    /// The new text equals the current statement.
    Unchanged,
    /// A different statement exists and the caller did not confirm.
    NeedsConfirmation { current: String },
    /// Blank input.
    Rejected,
}

/// The single focus statement. An empty string means unset.
#[derive(Debug, Clone, Default)]
pub struct FocusRepo {
    focus: String,
    revision: u64,
}

impl FocusRepo {
    pub fn load(store: &dyn Store) -> Self {
        Self {
            focus: storage::load(store, StorageKey::SingleFocus, String::new()),
            revision: 0,
        }
    }

    pub fn get(&self) -> Option<&str> {
        (!self.focus.is_empty()).then_some(self.focus.as_str())
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the statement. Overwriting a different, already-set value
    /// requires `confirmed`.
    pub fn set(&mut self, store: &dyn Store, text: &str, confirmed: bool) -> FocusChange {
        let text = text.trim();
        if text.is_empty() {
            return FocusChange::Rejected;
        }
        if self.focus == text {
            return FocusChange::Unchanged;
        }
        if !self.focus.is_empty() && !confirmed {
            return FocusChange::NeedsConfirmation {
                current: self.focus.clone(),
            };
        }
        self.focus = text.to_string();
        self.revision += 1;
        storage::save(store, StorageKey::SingleFocus, &self.focus);
        FocusChange::Set
    }
}
