//! Append-only session history over the key-value store.
//!
//! Two keys, kept in step:
//! - `sessions`: ordered list of completed session durations in seconds.
//! - `sessionData`: ordered list of full session records, including the
//!   placeholder analytics fields.
//!
//! Records are never mutated once appended.

use crate::error::CoreError;
use crate::session::SessionRecord;

use super::Database;

pub const SESSIONS_KEY: &str = "sessions";
pub const SESSION_DATA_KEY: &str = "sessionData";

/// Read/append access to the persisted session history.
pub struct SessionHistory<'a> {
    db: &'a Database,
}

impl<'a> SessionHistory<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Completed session durations, oldest first.
    pub fn durations(&self) -> Result<Vec<u64>, CoreError> {
        Ok(self.db.get_json(SESSIONS_KEY)?.unwrap_or_default())
    }

    /// Full session records, oldest first.
    pub fn records(&self) -> Result<Vec<SessionRecord>, CoreError> {
        Ok(self.db.get_json(SESSION_DATA_KEY)?.unwrap_or_default())
    }

    /// Append one completed session to both keys.
    pub fn append(&self, record: &SessionRecord) -> Result<(), CoreError> {
        let mut durations = self.durations()?;
        durations.push(record.duration_secs);
        self.db.set_json(SESSIONS_KEY, &durations)?;

        let mut records = self.records()?;
        records.push(record.clone());
        self.db.set_json(SESSION_DATA_KEY, &records)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn append_keeps_both_keys_ordered() {
        let db = Database::open_memory().unwrap();
        let history = SessionHistory::new(&db);
        assert!(history.durations().unwrap().is_empty());
        assert!(history.records().unwrap().is_empty());

        let now = Utc::now();
        history
            .append(&SessionRecord::new(300, 1, 10, now))
            .unwrap();
        history
            .append(&SessionRecord::new(600, 0, 10, now))
            .unwrap();

        assert_eq!(history.durations().unwrap(), vec![300, 600]);
        let records = history.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].duration_secs, 300);
        assert_eq!(records[1].duration_secs, 600);

        // The raw `sessions` key stays a plain integer list.
        assert_eq!(db.kv_get(SESSIONS_KEY).unwrap().unwrap(), "[300,600]");
    }
}
