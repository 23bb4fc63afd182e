//! SQLite-backed credential store.
//!
//! Keeps the handful of session secrets in a single key/value table and
//! records when each entry was last written.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::domain::{AppError, CredentialKey, CredentialStore, Result};

/// Metadata for a stored credential. The value itself is not included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialEntry {
    pub key: String,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Credential store using SQLite.
pub struct SqliteCredentialStore {
    conn: Mutex<Connection>,
}

impl SqliteCredentialStore {
    /// Opens or creates the credential database.
    ///
    /// # Errors
    /// Returns error if database cannot be opened or schema creation fails.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::io("Failed to create credential directory", e))?;
        }

        let conn = Connection::open(path).map_err(AppError::database)?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(AppError::database)?;

        Self::with_connection(conn)
    }

    /// Opens a private in-memory store.
    ///
    /// # Errors
    /// Returns error if schema creation fails.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(AppError::database)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS credentials (
                key TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )
        .map_err(AppError::database)?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| AppError::Database {
            message: "credential store lock poisoned".into(),
            source: None,
        })
    }

    /// List stored keys with their last update time, ordered by key.
    ///
    /// # Errors
    /// Returns error if query fails.
    pub fn entries(&self) -> Result<Vec<CredentialEntry>> {
        let conn = self.conn()?;
        let mut stmt = conn
            .prepare("SELECT key, updated_at FROM credentials ORDER BY key")
            .map_err(AppError::database)?;

        let rows = stmt
            .query_map([], |row| {
                let key: String = row.get(0)?;
                let updated_at: String = row.get(1)?;
                Ok(CredentialEntry {
                    key,
                    updated_at: DateTime::parse_from_rfc3339(&updated_at)
                        .ok()
                        .map(|dt| dt.with_timezone(&Utc)),
                })
            })
            .map_err(AppError::database)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(AppError::database)?);
        }

        Ok(entries)
    }
}

impl CredentialStore for SqliteCredentialStore {
    fn get(&self, key: CredentialKey) -> Result<Option<String>> {
        self.conn()?
            .query_row(
                "SELECT value FROM credentials WHERE key = ?1",
                [key.as_str()],
                |row| row.get(0),
            )
            .optional()
            .map_err(AppError::database)
    }

    fn set(&self, key: CredentialKey, value: &str) -> Result<()> {
        self.conn()?
            .execute(
                r"
            INSERT INTO credentials (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            ",
                params![key.as_str(), value, Utc::now().to_rfc3339()],
            )
            .map_err(AppError::database)?;

        tracing::debug!(key = %key, "Credential stored");
        Ok(())
    }

    fn remove(&self, key: CredentialKey) -> Result<()> {
        self.conn()?
            .execute("DELETE FROM credentials WHERE key = ?1", [key.as_str()])
            .map_err(AppError::database)?;

        tracing::debug!(key = %key, "Credential removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_set_get_remove() {
        let store = SqliteCredentialStore::open_in_memory().unwrap();
        assert!(store.get(CredentialKey::ApiToken).unwrap().is_none());

        store.set(CredentialKey::ApiToken, "one").unwrap();
        store.set(CredentialKey::ApiToken, "two").unwrap();
        assert_eq!(
            store.get(CredentialKey::ApiToken).unwrap().as_deref(),
            Some("two")
        );

        store.remove(CredentialKey::ApiToken).unwrap();
        assert!(store.get(CredentialKey::ApiToken).unwrap().is_none());

        // Removing a missing key is fine
        store.remove(CredentialKey::ApiToken).unwrap();
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("credentials.db");

        {
            let store = SqliteCredentialStore::open(&path).unwrap();
            store.set(CredentialKey::WorkspaceId, "w1").unwrap();
        }

        let store = SqliteCredentialStore::open(&path).unwrap();
        assert_eq!(
            store.get(CredentialKey::WorkspaceId).unwrap().as_deref(),
            Some("w1")
        );
    }

    #[test]
    fn test_entries_list_keys_only() {
        let store = SqliteCredentialStore::open_in_memory().unwrap();
        store.set(CredentialKey::WorkspaceId, "w1").unwrap();
        store.set(CredentialKey::ApiToken, "secret").unwrap();

        let entries = store.entries().unwrap();
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();

        assert_eq!(keys, vec!["apiToken", "workspaceId"]);
        assert!(entries.iter().all(|e| e.updated_at.is_some()));
    }
}
