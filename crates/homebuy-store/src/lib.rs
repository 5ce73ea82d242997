//! Homebuy Storage Layer
//!
//! Namespaced key-value persistence on SQLite, plus the versioned
//! backup envelope used for export and import. Values are opaque JSON;
//! this crate knows nothing about transactions or tasks.

pub mod backup;
pub mod client;
pub mod kv;
pub mod migrations;

pub use backup::{export_filename, parse_envelope, ExportEnvelope, EXPORT_VERSION};
pub use client::{storage_key, Store, StoreError, StoreResult, STORAGE_PREFIX};
