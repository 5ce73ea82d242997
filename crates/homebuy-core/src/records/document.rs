//! Files uploaded by the user (pre-approval letters, reports, ...).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentCategory {
    PreApproval,
    Inspection,
    Appraisal,
    Title,
    Insurance,
    Contract,
    #[default]
    Other,
}

impl DocumentCategory {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "pre-approval" => Some(Self::PreApproval),
            "inspection" => Some(Self::Inspection),
            "appraisal" => Some(Self::Appraisal),
            "title" => Some(Self::Title),
            "insurance" => Some(Self::Insurance),
            "contract" => Some(Self::Contract),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PreApproval => "pre-approval",
            Self::Inspection => "inspection",
            Self::Appraisal => "appraisal",
            Self::Title => "title",
            Self::Insurance => "insurance",
            Self::Contract => "contract",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDocument {
    pub id: String,
    pub transaction_id: String,
    pub name: String,
    pub file_name: String,
    pub mime_type: String,
    pub file_base64: String,
    #[serde(default)]
    pub category: DocumentCategory,
    pub uploaded_at: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
}

/// Fields supplied when uploading a document.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSavedDocument {
    pub name: String,
    pub file_name: String,
    pub mime_type: String,
    pub file_base64: String,
    pub category: DocumentCategory,
    pub notes: String,
    pub task_id: Option<String>,
}

impl NewSavedDocument {
    pub(crate) fn into_document(self, transaction_id: &str) -> SavedDocument {
        SavedDocument {
            id: super::new_id(),
            transaction_id: transaction_id.to_string(),
            name: self.name,
            file_name: self.file_name,
            mime_type: self.mime_type,
            file_base64: self.file_base64,
            category: self.category,
            uploaded_at: chrono::Utc::now().to_rfc3339(),
            notes: self.notes,
            task_id: self.task_id,
        }
    }
}

/// Partial update of a saved document's metadata.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SavedDocumentUpdate {
    pub name: Option<String>,
    pub category: Option<DocumentCategory>,
    pub notes: Option<String>,
    pub task_id: Option<Option<String>>,
}

impl SavedDocumentUpdate {
    pub fn apply(&self, d: &SavedDocument) -> SavedDocument {
        let mut d = d.clone();
        if let Some(v) = &self.name {
            d.name = v.clone();
        }
        if let Some(v) = self.category {
            d.category = v;
        }
        if let Some(v) = &self.notes {
            d.notes = v.clone();
        }
        if let Some(v) = &self.task_id {
            d.task_id = v.clone();
        }
        d
    }
}

/// MIME type guessed from a file name's extension.
pub fn guess_mime_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "pdf" => "application/pdf",
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "txt" => "text/plain",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}
