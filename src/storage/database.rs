//! `SQLite` database connection and key-value operations.
//!
//! The database is stored at `~/.focuscore/focuscore.db` and holds a single
//! `kv_store` table.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::FocuscoreError;
use crate::tasks::timestamp;

use super::{migrations, KeyValueStore};

/// Database connection wrapper.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, FocuscoreError> {
        let conn = Connection::open(path).map_err(|e| {
            FocuscoreError::Storage(format!("Failed to open database {}: {e}", path.display()))
        })?;

        log::debug!("opened database {}", path.display());
        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, FocuscoreError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            FocuscoreError::Storage(format!("Failed to open in-memory database: {e}"))
        })?;

        let db = Self { conn };
        db.migrate()?;

        Ok(db)
    }

    fn migrate(&self) -> Result<(), FocuscoreError> {
        migrations::run(&self.conn)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, FocuscoreError> {
        migrations::get_version(&self.conn)
    }
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, FocuscoreError> {
        self.conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .map_err(|e| FocuscoreError::Storage(format!("Failed to read '{key}': {e}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), FocuscoreError> {
        let now = timestamp::format(&crate::core::now());
        self.conn
            .execute(
                "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, value, now],
            )
            .map(|_| ())
            .map_err(|e| FocuscoreError::Storage(format!("Failed to write '{key}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.schema_version().unwrap() > 0);
    }

    #[test]
    fn test_get_missing_key() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get("nothing").unwrap().is_none());
    }

    #[test]
    fn test_set_overwrites() {
        let db = Database::open_in_memory().unwrap();
        db.set("k", "first").unwrap();
        db.set("k", "second").unwrap();
        assert_eq!(db.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_values_survive_reopen() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        {
            let db = Database::open_at(&db_path).unwrap();
            db.set("tasks", "[]").unwrap();
        }

        let db = Database::open_at(&db_path).unwrap();
        assert_eq!(db.get("tasks").unwrap().as_deref(), Some("[]"));
        assert!(db.schema_version().unwrap() > 0);
    }
}
