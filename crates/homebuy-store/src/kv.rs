//! Key-value reads and writes.

use crate::client::{storage_key, Store, StoreResult, STORAGE_PREFIX};
use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

impl Store {
    /// Load the value stored under `key`, or `default` when the key is absent.
    ///
    /// A stored value that does not deserialize into `T` is logged and
    /// replaced by `default`; SQLite failures are still reported.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> StoreResult<T> {
        let Some(raw) = self.get_raw(key)? else {
            return Ok(default);
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(key = %key, error = %e, "Error loading from storage, using default");
                Ok(default)
            }
        }
    }

    /// Serialize `value` as JSON and store it under `key`.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> StoreResult<()> {
        let json = serde_json::to_string(value)?;
        self.put_raw(key, &json)?;
        debug!(key = %key, bytes = json.len(), "Saved to storage");
        Ok(())
    }

    /// Remove a single key. Removing an absent key is not an error.
    pub fn remove(&self, key: &str) -> StoreResult<()> {
        let full = storage_key(key);
        self.with_conn(|conn| {
            conn.execute("DELETE FROM kv WHERE key = ?1", params![full])?;
            Ok(())
        })
    }

    /// Remove every key carrying the storage prefix. Returns the number removed.
    pub fn clear(&self) -> StoreResult<usize> {
        let removed = self.with_conn(|conn| {
            Ok(conn.execute(
                "DELETE FROM kv WHERE substr(key, 1, ?2) = ?1",
                params![STORAGE_PREFIX, STORAGE_PREFIX.len() as i64],
            )?)
        })?;
        debug!(removed, "Cleared storage");
        Ok(removed)
    }

    /// Short names of every stored key, sorted.
    pub fn keys(&self) -> StoreResult<Vec<String>> {
        Ok(self.entries()?.into_iter().map(|(key, _)| key).collect())
    }

    /// Raw stored text for `key`.
    pub fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        let full = storage_key(key);
        self.with_conn(|conn| {
            Ok(conn
                .query_row(
                    "SELECT value FROM kv WHERE key = ?1",
                    params![full],
                    |row| row.get(0),
                )
                .optional()?)
        })
    }

    /// Store raw text under `key` without touching it.
    pub fn put_raw(&self, key: &str, value: &str) -> StoreResult<()> {
        let full = storage_key(key);
        let now = chrono::Utc::now().to_rfc3339();
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![full, value, now],
            )?;
            Ok(())
        })
    }

    /// Every prefixed entry as (short key, raw text), sorted by key.
    pub fn entries(&self) -> StoreResult<Vec<(String, String)>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT key, value FROM kv WHERE substr(key, 1, ?2) = ?1 ORDER BY key",
            )?;
            let rows = stmt.query_map(
                params![STORAGE_PREFIX, STORAGE_PREFIX.len() as i64],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )?;

            let mut entries = Vec::new();
            for row in rows {
                let (key, value) = row?;
                entries.push((key[STORAGE_PREFIX.len()..].to_string(), value));
            }
            Ok(entries)
        })
    }
}
