//! SQLite connection management.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

/// Prefix applied to every key written by the store.
pub const STORAGE_PREFIX: &str = "txbuyer_";

/// Store error types.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Connection(#[from] rusqlite::Error),

    #[error("Migration error: {0}")]
    Migration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON file")]
    InvalidJson(#[source] serde_json::Error),

    #[error("Invalid backup file format")]
    InvalidBackup,

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Full storage key for a short collection name.
pub fn storage_key(key: &str) -> String {
    format!("{}{}", STORAGE_PREFIX, key)
}

/// A single SQLite-backed key-value store.
///
/// The connection sits behind a mutex so the store can be shared by
/// reference; there is only ever one logical writer.
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open (or create) the store at `path` and bring the schema up to date.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        debug!(path = %path.display(), "Opened store");
        Self::from_connection(conn)
    }

    /// Open a throwaway in-memory store.
    pub fn in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        crate::migrations::run_migrations(&store)?;
        Ok(store)
    }

    /// Run `f` with shared access to the connection.
    pub fn with_conn<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&Connection) -> StoreResult<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::OperationFailed("store lock poisoned".to_string()))?;
        f(&*conn)
    }

    /// Run `f` with exclusive access to the connection (migrations, transactions).
    pub fn with_conn_mut<T, F>(&self, f: F) -> StoreResult<T>
    where
        F: FnOnce(&mut Connection) -> StoreResult<T>,
    {
        let mut conn = self
            .conn
            .lock()
            .map_err(|_| StoreError::OperationFailed("store lock poisoned".to_string()))?;
        f(&mut *conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_key() {
        assert_eq!(storage_key("tasks"), "txbuyer_tasks");
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(StoreError::InvalidBackup.to_string(), "Invalid backup file format");
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert_eq!(StoreError::InvalidJson(err).to_string(), "Invalid JSON file");
    }
}
