// Client preference store.
//
// The dashboard persists exactly one durable value across restarts: the
// last-selected time range. SQLite is overkill for a single key, but it is
// zero-config, already in the stack, and leaves room for the next
// preference without a format migration.

use rusqlite::{Connection, OptionalExtension, Result};
use std::path::Path;

/// Key under which the selected time frame is stored.
pub const TIME_FRAME_KEY: &str = "selected_time_frame";

pub struct PrefsStore {
    conn: Connection,
}

impl PrefsStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            // Connection::open won't create intermediate directories.
            let _ = std::fs::create_dir_all(parent);
        }

        let conn = Connection::open(db_path)?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    /// In-memory store for tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS prefs (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.conn
            .query_row("SELECT value FROM prefs WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
    }

    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(
            "INSERT INTO prefs (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            [key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_as_none() {
        let store = PrefsStore::in_memory().unwrap();
        assert_eq!(store.get(TIME_FRAME_KEY).unwrap(), None);
    }

    #[test]
    fn set_then_get_round_trips() {
        let store = PrefsStore::in_memory().unwrap();
        store.set(TIME_FRAME_KEY, "week").unwrap();
        assert_eq!(store.get(TIME_FRAME_KEY).unwrap().as_deref(), Some("week"));
    }

    #[test]
    fn set_overwrites_previous_value() {
        let store = PrefsStore::in_memory().unwrap();
        store.set(TIME_FRAME_KEY, "today").unwrap();
        store.set(TIME_FRAME_KEY, "month").unwrap();
        assert_eq!(store.get(TIME_FRAME_KEY).unwrap().as_deref(), Some("month"));
    }
}
