//! Centralized error types for Homebuy.

use thiserror::Error;

/// Main error type for Homebuy operations.
#[derive(Error, Debug)]
pub enum HomebuyError {
    #[error("No active transaction. Run 'homebuy init' first.")]
    NoTransaction,

    #[error("A transaction already exists (created {0})")]
    TransactionExists(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Phase not found: {0}")]
    PhaseNotFound(String),

    #[error("Stage not found: {0}")]
    StageNotFound(String),

    #[error("Document definition not found: {0}")]
    DocumentNotFound(String),

    #[error("Snippet not found: {0}")]
    SnippetNotFound(String),

    #[error("Stakeholder not found: {0}")]
    StakeholderNotFound(String),

    #[error("Communication log not found: {0}")]
    LogNotFound(String),

    #[error("Saved PDF not found: {0}")]
    SavedPdfNotFound(String),

    #[error("Saved document not found: {0}")]
    SavedDocumentNotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Storage error: {0}")]
    Store(#[from] homebuy_store::StoreError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// Result type for Homebuy operations.
pub type HomebuyResult<T> = Result<T, HomebuyError>;

impl HomebuyError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}
