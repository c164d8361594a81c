//! SQLite-backed key/value store.
//!
//! A single `kv` table holds one JSON document per storage key.

use std::path::Path;

use rusqlite::{params, Connection};

use super::{data_dir, Store};
use crate::error::StoreError;

/// SQLite database holding the `kv` table.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the store at `<data_dir>/bravethem.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory or database cannot be opened.
    pub fn open() -> Result<Self, StoreError> {
        let dir = data_dir().map_err(|e| StoreError::Access(e.to_string()))?;
        Self::open_at(&dir.join("bravethem.db"))
    }

    /// Open the store at an explicit path.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database.
    ///
    /// # Errors
    /// Returns an error if the schema cannot be created.
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl Store for SqliteStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put_raw(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_store() {
        let db = SqliteStore::open_memory().unwrap();
        assert!(db.get_raw("test").unwrap().is_none());
        db.put_raw("test", "hello").unwrap();
        assert_eq!(db.get_raw("test").unwrap().unwrap(), "hello");
    }

    #[test]
    fn put_replaces_existing_value() {
        let db = SqliteStore::open_memory().unwrap();
        db.put_raw("bt.singleFocus", "\"one\"").unwrap();
        db.put_raw("bt.singleFocus", "\"two\"").unwrap();
        assert_eq!(
            db.get_raw("bt.singleFocus").unwrap().as_deref(),
            Some("\"two\"")
        );
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bravethem.db");
        {
            let db = SqliteStore::open_at(&path).unwrap();
            db.put_raw("bt.tasks", "[]").unwrap();
        }
        let db = SqliteStore::open_at(&path).unwrap();
        assert_eq!(db.get_raw("bt.tasks").unwrap().as_deref(), Some("[]"));
    }
}
