//! User-owned records scoped to the active transaction.
//!
//! None of these carry derived state; they are created, edited and
//! deleted by the user and destroyed together with the transaction.

pub mod communication;
pub mod document;
pub mod saved_pdf;
pub mod snippet;
pub mod stakeholder;

pub use communication::{CommunicationLog, CommunicationLogUpdate, CommunicationType, NewCommunicationLog};
pub use document::{DocumentCategory, NewSavedDocument, SavedDocument, SavedDocumentUpdate};
pub use saved_pdf::{NewSavedPdf, SavedPdf};
pub use snippet::{NewSnippet, Snippet, SnippetCategory, SnippetUpdate};
pub use stakeholder::{NewStakeholder, Stakeholder, StakeholderRole, StakeholderUpdate};

/// Fresh record id.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
