//! Append-only ledgers: sessions and moods are recorded, never edited.

use crate::model::{Mood, Session};
use crate::storage::{self, StorageKey, Store};

#[derive(Debug, Clone, Default)]
pub struct SessionRepo {
    sessions: Vec<Session>,
    revision: u64,
}

impl SessionRepo {
    pub fn load(store: &dyn Store) -> Self {
        Self {
            sessions: storage::load(store, StorageKey::Sessions, Vec::new()),
            revision: 0,
        }
    }

    pub fn all(&self) -> &[Session] {
        &self.sessions
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn record(&mut self, store: &dyn Store, start: u64, end: u64) -> &Session {
        let session = Session::completed(start, end);
        tracing::debug!(id = %session.id, start, end, "session recorded");
        self.sessions.push(session);
        self.revision += 1;
        storage::save(store, StorageKey::Sessions, &self.sessions);
        &self.sessions[self.sessions.len() - 1]
    }
}

#[derive(Debug, Clone, Default)]
pub struct MoodRepo {
    moods: Vec<Mood>,
    revision: u64,
}

impl MoodRepo {
    pub fn load(store: &dyn Store) -> Self {
        Self {
            moods: storage::load(store, StorageKey::Moods, Vec::new()),
            revision: 0,
        }
    }

    pub fn all(&self) -> &[Mood] {
        &self.moods
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn log(&mut self, store: &dyn Store, score: u8, note: Option<&str>, now: u64) -> &Mood {
        let mood = Mood::new(score, note, now);
        tracing::debug!(id = %mood.id, score = mood.score, "mood logged");
        self.moods.push(mood);
        self.revision += 1;
        storage::save(store, StorageKey::Moods, &self.moods);
        &self.moods[self.moods.len() - 1]
    }
}
