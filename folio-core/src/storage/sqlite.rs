//! SQLite-based storage implementation

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use super::{Storage, StoreResult};
use crate::error::Error;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Key-value storage persisted to a SQLite database file
pub struct SqliteStorage {
    conn: Mutex<Connection>,
}

impl SqliteStorage {
    /// Open or create a SQLite database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = Connection::open(path)?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        Self::migrate(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| Error::Storage("connection lock poisoned".to_string()))
    }

    /// Run database migrations
    fn migrate(conn: &Connection) -> StoreResult<()> {
        let current_version = Self::get_schema_version(conn)?;

        if current_version < SCHEMA_VERSION {
            tracing::info!(
                current = current_version,
                target = SCHEMA_VERSION,
                "Running storage migrations"
            );

            if current_version < 1 {
                Self::migrate_v1(conn)?;
            }

            conn.execute(
                "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
                params![SCHEMA_VERSION],
            )?;

            tracing::info!("Storage migrations complete");
        }

        Ok(())
    }

    /// Get current schema version (0 if no schema exists)
    fn get_schema_version(conn: &Connection) -> StoreResult<i32> {
        let table_exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !table_exists {
            return Ok(0);
        }

        let version = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
            row.get::<_, Option<i32>>(0).map(|v| v.unwrap_or(0))
        })?;
        Ok(version)
    }

    /// Migration to version 1: a single key-value table
    fn migrate_v1(conn: &Connection) -> StoreResult<()> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER PRIMARY KEY
            );

            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;

        Ok(())
    }
}

impl Storage for SqliteStorage {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let conn = self.conn()?;

        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set_item(&self, key: &str, value: &str) -> StoreResult<()> {
        let conn = self.conn()?;

        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StoreResult<()> {
        let conn = self.conn()?;

        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (SqliteStorage, TempDir) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("folio.db");
        let storage = SqliteStorage::open(&path).unwrap();
        (storage, dir) // Return dir to keep it alive
    }

    #[test]
    fn test_set_get_remove() {
        let (storage, _dir) = create_test_storage();

        storage.set_item("users", "[]").unwrap();
        assert_eq!(storage.get_item("users").unwrap().as_deref(), Some("[]"));

        storage.remove_item("users").unwrap();
        assert!(storage.get_item("users").unwrap().is_none());
    }

    #[test]
    fn test_overwrite_replaces_value() {
        let (storage, _dir) = create_test_storage();

        storage.set_item("themeMode", "dark").unwrap();
        storage.set_item("themeMode", "light").unwrap();
        assert_eq!(storage.get_item("themeMode").unwrap().as_deref(), Some("light"));
    }

    #[test]
    fn test_values_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("folio.db");

        {
            let storage = SqliteStorage::open(&path).unwrap();
            storage.set_item("page_visits_/", "7").unwrap();
        }

        let storage = SqliteStorage::open(&path).unwrap();
        assert_eq!(storage.get_item("page_visits_/").unwrap().as_deref(), Some("7"));
    }

    #[test]
    fn test_migration_is_idempotent() {
        let storage = SqliteStorage::open_in_memory().unwrap();
        let conn = storage.conn().unwrap();
        SqliteStorage::migrate(&conn).unwrap();
        assert_eq!(SqliteStorage::get_schema_version(&conn).unwrap(), SCHEMA_VERSION);
    }
}
