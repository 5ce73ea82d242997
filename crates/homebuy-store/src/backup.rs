//! Backup envelope: export every stored key to one JSON document and
//! restore it again.

use crate::client::{storage_key, Store, StoreError, StoreResult, STORAGE_PREFIX};
use chrono::NaiveDate;
use rusqlite::params;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

/// Envelope format version written by [`Store::export`].
pub const EXPORT_VERSION: u32 = 1;

/// Versioned snapshot of the whole key space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportEnvelope {
    pub version: u32,
    pub timestamp: String,
    pub data: Map<String, Value>,
}

impl ExportEnvelope {
    /// Pretty-printed JSON, as written to backup files.
    pub fn to_json_pretty(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Backup file name for the given day.
pub fn export_filename(date: NaiveDate) -> String {
    format!("buyerselfserve-backup-{}.json", date.format("%Y-%m-%d"))
}

/// Parse and structurally validate a backup file.
///
/// Only the envelope is checked (numeric version, string timestamp,
/// object data); the payload under `data` is taken as-is.
pub fn parse_envelope(text: &str) -> StoreResult<ExportEnvelope> {
    let parsed: Value = serde_json::from_str(text).map_err(StoreError::InvalidJson)?;

    let Value::Object(mut obj) = parsed else {
        return Err(StoreError::InvalidBackup);
    };

    let version = obj
        .get("version")
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .ok_or(StoreError::InvalidBackup)?;

    let timestamp = match obj.get("timestamp") {
        Some(Value::String(s)) => s.clone(),
        _ => return Err(StoreError::InvalidBackup),
    };

    let data = match obj.remove("data") {
        Some(Value::Object(map)) => map,
        _ => return Err(StoreError::InvalidBackup),
    };

    Ok(ExportEnvelope {
        version,
        timestamp,
        data,
    })
}

impl Store {
    /// Snapshot every prefixed key into an envelope.
    ///
    /// Values that are not valid JSON are carried as JSON strings of their raw text.
    pub fn export(&self) -> StoreResult<ExportEnvelope> {
        let mut data = Map::new();
        for (key, raw) in self.entries()? {
            let value = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
            data.insert(key, value);
        }

        info!(keys = data.len(), "Exported storage");
        Ok(ExportEnvelope {
            version: EXPORT_VERSION,
            timestamp: chrono::Utc::now().to_rfc3339(),
            data,
        })
    }

    /// Replace the whole key space with the envelope's data.
    ///
    /// Existing prefixed keys are cleared first; both steps run in a single
    /// SQLite transaction so a failed import leaves the previous state intact.
    pub fn import(&self, envelope: &ExportEnvelope) -> StoreResult<usize> {
        let now = chrono::Utc::now().to_rfc3339();

        let written = self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "DELETE FROM kv WHERE substr(key, 1, ?2) = ?1",
                params![STORAGE_PREFIX, STORAGE_PREFIX.len() as i64],
            )?;

            for (key, value) in &envelope.data {
                let json = serde_json::to_string(value)?;
                tx.execute(
                    "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)",
                    params![storage_key(key), json, now],
                )?;
            }

            tx.commit()?;
            Ok(envelope.data.len())
        })?;

        info!(keys = written, version = envelope.version, "Imported backup");
        Ok(written)
    }
}
