//! Durable key/value storage.
//!
//! Every entity collection is stored as one JSON document under a
//! [`StorageKey`]. Access goes through [`load`] and [`save`], which never
//! fail: a missing, corrupt or unreadable value yields the caller's
//! fallback, and a rejected write is logged and dropped.

mod config;
pub mod database;
pub mod memory;

pub use config::{Config, DisplayConfig, LogConfig, TimerConfig};
pub use database::SqliteStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{ConfigError, StoreError};

/// Logical storage keys, one per persisted collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    SingleFocus,
    Tasks,
    Sessions,
    Moods,
    Timer,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::SingleFocus,
        StorageKey::Tasks,
        StorageKey::Sessions,
        StorageKey::Moods,
        StorageKey::Timer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StorageKey::SingleFocus => "bt.singleFocus",
            StorageKey::Tasks => "bt.tasks",
            StorageKey::Sessions => "bt.sessions",
            StorageKey::Moods => "bt.moods",
            StorageKey::Timer => "bt.timer",
        }
    }
}

/// Raw string storage backend.
///
/// Implementations report failures; the typed helpers below decide what
/// to do with them.
pub trait Store {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn put_raw(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_raw(key)
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).put_raw(key, value)
    }
}

/// Decode the value stored under `key`.
///
/// # Errors
/// Returns an error if the backend fails or the payload does not decode.
pub fn try_load<T: DeserializeOwned>(
    store: &dyn Store,
    key: StorageKey,
) -> Result<Option<T>, StoreError> {
    let Some(raw) = store.get_raw(key.as_str())? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StoreError::Corrupt {
            key: key.as_str().to_string(),
            message: e.to_string(),
        })
}

/// Encode and write `value` under `key`.
///
/// # Errors
/// Returns an error if encoding or the backend write fails.
pub fn try_save<T: Serialize + ?Sized>(
    store: &dyn Store,
    key: StorageKey,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value).map_err(|e| StoreError::Encode {
        key: key.as_str().to_string(),
        message: e.to_string(),
    })?;
    store.put_raw(key.as_str(), &json)
}

/// Load `key`, returning `fallback` when absent, corrupt or unreadable.
pub fn load<T: DeserializeOwned>(store: &dyn Store, key: StorageKey, fallback: T) -> T {
    match try_load(store, key) {
        Ok(Some(value)) => value,
        Ok(None) => fallback,
        Err(e) => {
            tracing::warn!(key = key.as_str(), error = %e, "falling back to default");
            fallback
        }
    }
}

/// Best-effort write of `value` under `key`. Failures are logged only.
pub fn save<T: Serialize + ?Sized>(store: &dyn Store, key: StorageKey, value: &T) {
    if let Err(e) = try_save(store, key, value) {
        tracing::warn!(key = key.as_str(), error = %e, "write dropped");
    }
}

/// Returns the data directory.
///
/// `BRAVETHEM_DATA_DIR` wins when set. Otherwise `~/.config/bravethem`,
/// or `~/.config/bravethem-dev` with `BRAVETHEM_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var("BRAVETHEM_DATA_DIR") {
        Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("BRAVETHEM_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("bravethem-dev")
            } else {
                base_dir.join("bravethem")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(e.to_string()))?;
    Ok(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_distinct() {
        let mut names: Vec<_> = StorageKey::ALL.iter().map(|k| k.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 5);
    }

    #[test]
    fn load_returns_fallback_when_absent() {
        let store = MemoryStore::new();
        let tasks: Vec<String> = load(&store, StorageKey::Tasks, Vec::new());
        assert!(tasks.is_empty());
    }

    #[test]
    fn load_returns_fallback_on_corrupt_payload() {
        let store = MemoryStore::new();
        store.put_raw(StorageKey::Moods.as_str(), "{not json").unwrap();
        let moods: Vec<u8> = load(&store, StorageKey::Moods, vec![7]);
        assert_eq!(moods, vec![7]);
        assert!(matches!(
            try_load::<Vec<u8>>(&store, StorageKey::Moods),
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[test]
    fn load_returns_fallback_when_storage_fails() {
        let store = MemoryStore::new();
        save(&store, StorageKey::SingleFocus, "ship it");
        store.set_failing(true);
        let focus: String = load(&store, StorageKey::SingleFocus, String::new());
        assert_eq!(focus, "");
    }

    #[test]
    fn save_swallows_write_failure() {
        let store = MemoryStore::new();
        store.set_failing(true);
        save(&store, StorageKey::Tasks, &vec!["a"]);
        store.set_failing(false);
        assert!(store.get_raw(StorageKey::Tasks.as_str()).unwrap().is_none());
    }

    #[test]
    fn save_then_load_roundtrip() {
        let store = MemoryStore::new();
        save(&store, StorageKey::Sessions, &vec![1u64, 2, 3]);
        let loaded: Vec<u64> = load(&store, StorageKey::Sessions, Vec::new());
        assert_eq!(loaded, vec![1, 2, 3]);
    }

    #[test]
    fn boxed_store_delegates() {
        let store: Box<dyn Store> = Box::new(MemoryStore::new());
        save(&store, StorageKey::Timer, &42u64);
        assert_eq!(load(&store, StorageKey::Timer, 0u64), 42);
    }
}
