//! In-memory store, used by tests and as a last-resort backend when the
//! database cannot be opened.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use super::Store;
use crate::error::StoreError;

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    failing: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate disabled storage: every read and write fails while set.
    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl Store for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        if self.failing.get() {
            return Err(StoreError::Unavailable("storage disabled".into()));
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.failing.get() {
            return Err(StoreError::Unavailable("quota exceeded".into()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
