//! Key-value persistence.
//!
//! A single SQLite table of string keys to JSON-serialized string values.
//! The engines never touch this; the surrounding system reads initial
//! configuration from it and persists what the engines emit.

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CoreError, StorageError};

use super::data_dir;

/// String-keyed store backing session history and carried engine state.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the store at `~/.config/studybuddy/studybuddy.db`.
    ///
    /// Creates the file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        Self::open_at(data_dir()?.join("studybuddy.db"))
    }

    /// Open the store at an explicit path (embedding hosts, tests).
    pub fn open_at(path: std::path::PathBuf) -> Result<Self, CoreError> {
        let conn = Connection::open(&path)
            .map_err(|source| StorageError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory store (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    /// Get a raw value.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Set a raw value.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Remove a key.
    pub fn kv_delete(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    /// Get a value deserialized from JSON.
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, CoreError> {
        match self.kv_get(key)? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    /// Set a value serialized to JSON.
    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), CoreError> {
        let raw = serde_json::to_string(value)?;
        self.kv_set(key, &raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert!(db.kv_get("missing").unwrap().is_none());
        db.kv_set("greeting", "hello").unwrap();
        assert_eq!(db.kv_get("greeting").unwrap().unwrap(), "hello");
        db.kv_delete("greeting").unwrap();
        assert!(db.kv_get("greeting").unwrap().is_none());
    }

    #[test]
    fn json_roundtrip() {
        let db = Database::open_memory().unwrap();
        db.set_json("durations", &vec![300u64, 600]).unwrap();
        let loaded: Vec<u64> = db.get_json("durations").unwrap().unwrap();
        assert_eq!(loaded, vec![300, 600]);
        assert_eq!(db.kv_get("durations").unwrap().unwrap(), "[300,600]");
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        {
            let db = Database::open_at(path.clone()).unwrap();
            db.kv_set("breakInterval", "10").unwrap();
        }
        let db = Database::open_at(path).unwrap();
        assert_eq!(db.kv_get("breakInterval").unwrap().unwrap(), "10");
    }
}
