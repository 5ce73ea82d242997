//! Filled PDF forms saved against a catalog document.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedPdf {
    pub id: String,
    pub transaction_id: String,
    pub document_id: String,
    pub name: String,
    /// Field name -> value used when filling.
    #[serde(default)]
    pub filled_data: BTreeMap<String, String>,
    pub pdf_base64: String,
    pub saved_at: String,
    pub version: u32,
}

/// Fields supplied when saving a filled PDF.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSavedPdf {
    pub document_id: String,
    pub name: String,
    pub filled_data: BTreeMap<String, String>,
    pub pdf_base64: String,
}

/// Next version number for `document_id`: highest existing version + 1.
pub fn next_version(saved: &[SavedPdf], document_id: &str) -> u32 {
    saved
        .iter()
        .filter(|p| p.document_id == document_id)
        .map(|p| p.version)
        .max()
        .unwrap_or(0)
        + 1
}

/// Saves for one document, newest version first.
pub fn for_document<'a>(saved: &'a [SavedPdf], document_id: &str) -> Vec<&'a SavedPdf> {
    let mut versions: Vec<&SavedPdf> =
        saved.iter().filter(|p| p.document_id == document_id).collect();
    versions.sort_by(|a, b| b.version.cmp(&a.version));
    versions
}

impl NewSavedPdf {
    pub(crate) fn into_saved(self, transaction_id: &str, version: u32) -> SavedPdf {
        SavedPdf {
            id: super::new_id(),
            transaction_id: transaction_id.to_string(),
            document_id: self.document_id,
            name: self.name,
            filled_data: self.filled_data,
            pdf_base64: self.pdf_base64,
            saved_at: chrono::Utc::now().to_rfc3339(),
            version,
        }
    }
}
