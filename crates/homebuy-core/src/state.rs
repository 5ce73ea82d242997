//! Application state: the single active transaction and everything it owns.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::catalog;
use crate::deadline::{self, DeadlineItem, DeadlineWindow};
use crate::error::{HomebuyError, HomebuyResult};
use crate::progress::{self, OverallProgress, PhaseState, StageState};
use crate::records::communication::pending_follow_ups;
use crate::records::document::guess_mime_type;
use crate::records::saved_pdf;
use crate::records::{
    CommunicationLog, CommunicationLogUpdate, NewCommunicationLog, NewSavedDocument, NewSavedPdf,
    NewSnippet, NewStakeholder, SavedDocument, SavedDocumentUpdate, SavedPdf, Snippet,
    SnippetCategory, SnippetUpdate, Stakeholder, StakeholderUpdate,
};
use crate::task::condition::ConditionFlags;
use crate::task::model::Task;
use crate::task::{self, incomplete_dependencies};
use crate::transaction::{Transaction, TransactionUpdate};

/// Everything the tracker knows about, held in memory between a load and a save.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub transaction: Option<Transaction>,
    pub tasks: Vec<Task>,
    pub snippets: Vec<Snippet>,
    pub stakeholders: Vec<Stakeholder>,
    pub communication_logs: Vec<CommunicationLog>,
    #[serde(rename = "savedPDFs")]
    pub saved_pdfs: Vec<SavedPdf>,
    pub documents: Vec<SavedDocument>,
}

fn replace_by<T, P, F>(items: &mut [T], matches: P, f: F) -> Option<&T>
where
    P: Fn(&T) -> bool,
    F: FnOnce(&T) -> T,
{
    let item = items.iter_mut().find(|i| matches(i))?;
    let updated = f(item);
    *item = updated;
    Some(&*item)
}

fn remove_by<T, P>(items: &mut Vec<T>, matches: P) -> bool
where
    P: Fn(&T) -> bool,
{
    let before = items.len();
    items.retain(|i| !matches(i));
    items.len() != before
}

impl AppState {
    // ============================================================
    // Transaction
    // ============================================================

    /// The active transaction, or `NoTransaction`.
    pub fn transaction(&self) -> HomebuyResult<&Transaction> {
        self.transaction.as_ref().ok_or(HomebuyError::NoTransaction)
    }

    pub fn has_transaction(&self) -> bool {
        self.transaction.is_some()
    }

    /// Start a new transaction with the given flags.
    ///
    /// Tasks are materialized once here and default snippets are seeded.
    /// Any existing transaction is replaced only when `force` is set, and
    /// its records go with it.
    pub fn create_transaction(
        &mut self,
        flags: ConditionFlags,
        force: bool,
    ) -> HomebuyResult<&Transaction> {
        if let Some(existing) = &self.transaction {
            if !force {
                return Err(HomebuyError::TransactionExists(existing.created_at.clone()));
            }
        }

        let tx = Transaction {
            has_hoa: flags.has_hoa,
            has_loan: flags.has_loan,
            is_new_construction: flags.is_new_construction,
            ..Transaction::new()
        };

        *self = Self {
            tasks: task::materialize(catalog::phases(), &tx),
            snippets: seed_snippets(&tx.id),
            ..Self::default()
        };
        info!(
            id = %tx.id,
            tasks = self.tasks.len(),
            has_loan = tx.has_loan,
            has_hoa = tx.has_hoa,
            "Created transaction"
        );

        Ok(&*self.transaction.insert(tx))
    }

    /// Merge a partial update. Task enablement is re-evaluated whenever the
    /// update names a condition flag.
    pub fn update_transaction(&mut self, update: &TransactionUpdate) -> HomebuyResult<&Transaction> {
        let tx = self.transaction.as_mut().ok_or(HomebuyError::NoTransaction)?;
        if update.apply(tx) {
            self.tasks = task::reconcile(&self.tasks, tx);
            debug!(
                enabled = self.tasks.iter().filter(|t| t.is_enabled).count(),
                "Reconciled tasks after flag change"
            );
        }
        self.transaction()
    }

    /// Drop the transaction and everything it owns.
    pub fn reset(&mut self) {
        *self = Self::default();
        info!("Reset all transaction data");
    }

    // ============================================================
    // Tasks
    // ============================================================

    pub fn task(&self, task_id: &str) -> HomebuyResult<&Task> {
        task::find_task(&self.tasks, task_id)
            .ok_or_else(|| HomebuyError::TaskNotFound(task_id.to_string()))
    }

    fn update_task<F>(&mut self, task_id: &str, f: F) -> HomebuyResult<&Task>
    where
        F: Fn(&Task) -> Task,
    {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or_else(|| HomebuyError::TaskNotFound(task_id.to_string()))?;
        self.tasks = task::replace_task(&self.tasks, task_id, f);
        Ok(&self.tasks[index])
    }

    pub fn complete_task(&mut self, task_id: &str) -> HomebuyResult<&Task> {
        self.update_task(task_id, |t| task::set_completed(t, true))
    }

    pub fn uncomplete_task(&mut self, task_id: &str) -> HomebuyResult<&Task> {
        self.update_task(task_id, |t| task::set_completed(t, false))
    }

    pub fn skip_task(&mut self, task_id: &str) -> HomebuyResult<&Task> {
        self.update_task(task_id, task::skip)
    }

    pub fn unskip_task(&mut self, task_id: &str) -> HomebuyResult<&Task> {
        self.update_task(task_id, task::unskip)
    }

    pub fn set_task_notes(&mut self, task_id: &str, notes: &str) -> HomebuyResult<&Task> {
        self.update_task(task_id, |t| task::set_notes(t, notes))
    }

    /// Pin a task's deadline to `date`, or clear the pin with `None`.
    pub fn set_task_deadline(&mut self, task_id: &str, date: Option<NaiveDate>) -> HomebuyResult<&Task> {
        self.update_task(task_id, |t| task::set_deadline_date(t, date))
    }

    /// Open dependencies of a task, for display.
    pub fn blocking_tasks(&self, task_id: &str) -> HomebuyResult<Vec<&Task>> {
        self.task(task_id)?;
        Ok(incomplete_dependencies(task_id, &self.tasks))
    }

    // ============================================================
    // Progress and deadlines
    // ============================================================

    pub fn phase_states(&self) -> Vec<PhaseState> {
        progress::phase_states(&self.tasks)
    }

    pub fn stage_states(&self) -> Vec<StageState> {
        progress::stage_states(&self.tasks)
    }

    pub fn overall_progress(&self) -> OverallProgress {
        progress::overall_progress(&self.tasks)
    }

    /// Deadlines relative to `today`; empty without a transaction.
    pub fn upcoming_deadlines(&self, today: NaiveDate, window: DeadlineWindow) -> Vec<DeadlineItem> {
        let effective = self.transaction.as_ref().and_then(|tx| tx.effective_date);
        deadline::upcoming_deadlines(&self.tasks, effective, today, window)
    }

    // ============================================================
    // Snippets
    // ============================================================

    pub fn add_snippet(&mut self, new: NewSnippet) -> HomebuyResult<Snippet> {
        if new.label.trim().is_empty() {
            return Err(HomebuyError::validation("Snippet label cannot be empty"));
        }
        let snippet = new.into_snippet(&self.transaction()?.id);
        self.snippets.push(snippet.clone());
        debug!(id = %snippet.id, label = %snippet.label, "Added snippet");
        Ok(snippet)
    }

    pub fn update_snippet(&mut self, id: &str, update: &SnippetUpdate) -> HomebuyResult<&Snippet> {
        replace_by(&mut self.snippets, |s| s.id == id, |s| update.apply(s))
            .ok_or_else(|| HomebuyError::SnippetNotFound(id.to_string()))
    }

    pub fn delete_snippet(&mut self, id: &str) -> HomebuyResult<()> {
        if !remove_by(&mut self.snippets, |s| s.id == id) {
            return Err(HomebuyError::SnippetNotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn snippets_by_category(&self, category: SnippetCategory) -> Vec<&Snippet> {
        self.snippets.iter().filter(|s| s.category == category).collect()
    }

    // ============================================================
    // Stakeholders
    // ============================================================

    pub fn stakeholder(&self, id: &str) -> HomebuyResult<&Stakeholder> {
        self.stakeholders
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| HomebuyError::StakeholderNotFound(id.to_string()))
    }

    pub fn add_stakeholder(&mut self, new: NewStakeholder) -> HomebuyResult<Stakeholder> {
        let stakeholder = new.into_stakeholder(&self.transaction()?.id);
        self.stakeholders.push(stakeholder.clone());
        debug!(id = %stakeholder.id, role = stakeholder.role.as_str(), "Added stakeholder");
        Ok(stakeholder)
    }

    pub fn update_stakeholder(
        &mut self,
        id: &str,
        update: &StakeholderUpdate,
    ) -> HomebuyResult<&Stakeholder> {
        replace_by(&mut self.stakeholders, |s| s.id == id, |s| update.apply(s))
            .ok_or_else(|| HomebuyError::StakeholderNotFound(id.to_string()))
    }

    pub fn delete_stakeholder(&mut self, id: &str) -> HomebuyResult<()> {
        if !remove_by(&mut self.stakeholders, |s| s.id == id) {
            return Err(HomebuyError::StakeholderNotFound(id.to_string()));
        }
        Ok(())
    }

    // ============================================================
    // Communication log
    // ============================================================

    /// Record a communication with a known stakeholder.
    pub fn add_log(&mut self, new: NewCommunicationLog) -> HomebuyResult<CommunicationLog> {
        let tx_id = self.transaction()?.id.clone();
        self.stakeholder(&new.stakeholder_id)?;
        if let Some(task_id) = &new.task_id {
            self.task(task_id)?;
        }

        let log = new.into_log(&tx_id);
        self.communication_logs.push(log.clone());
        debug!(id = %log.id, kind = log.kind.label(), "Added communication log");
        Ok(log)
    }

    pub fn update_log(
        &mut self,
        id: &str,
        update: &CommunicationLogUpdate,
    ) -> HomebuyResult<&CommunicationLog> {
        replace_by(&mut self.communication_logs, |l| l.id == id, |l| update.apply(l))
            .ok_or_else(|| HomebuyError::LogNotFound(id.to_string()))
    }

    pub fn delete_log(&mut self, id: &str) -> HomebuyResult<()> {
        if !remove_by(&mut self.communication_logs, |l| l.id == id) {
            return Err(HomebuyError::LogNotFound(id.to_string()));
        }
        Ok(())
    }

    pub fn pending_follow_ups(&self) -> Vec<&CommunicationLog> {
        pending_follow_ups(&self.communication_logs)
    }

    // ============================================================
    // Saved PDFs
    // ============================================================

    /// Save a filled form as the next version for its document.
    pub fn save_pdf(&mut self, new: NewSavedPdf) -> HomebuyResult<SavedPdf> {
        let tx_id = self.transaction()?.id.clone();
        if catalog::document(&new.document_id).is_none() {
            return Err(HomebuyError::DocumentNotFound(new.document_id));
        }
        STANDARD.decode(&new.pdf_base64)?;

        let version = saved_pdf::next_version(&self.saved_pdfs, &new.document_id);
        let saved = new.into_saved(&tx_id, version);
        self.saved_pdfs.push(saved.clone());
        info!(document = %saved.document_id, version, "Saved PDF");
        Ok(saved)
    }

    pub fn saved_pdf(&self, id: &str) -> HomebuyResult<&SavedPdf> {
        self.saved_pdfs
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| HomebuyError::SavedPdfNotFound(id.to_string()))
    }

    /// Saves for one document, newest version first.
    pub fn saved_pdfs_for_document(&self, document_id: &str) -> Vec<&SavedPdf> {
        saved_pdf::for_document(&self.saved_pdfs, document_id)
    }

    pub fn saved_pdf_bytes(&self, id: &str) -> HomebuyResult<Vec<u8>> {
        Ok(STANDARD.decode(&self.saved_pdf(id)?.pdf_base64)?)
    }

    pub fn delete_saved_pdf(&mut self, id: &str) -> HomebuyResult<()> {
        if !remove_by(&mut self.saved_pdfs, |p| p.id == id) {
            return Err(HomebuyError::SavedPdfNotFound(id.to_string()));
        }
        Ok(())
    }

    // ============================================================
    // Documents
    // ============================================================

    /// Store an uploaded file. An empty MIME type is guessed from the file name.
    pub fn add_document(&mut self, mut new: NewSavedDocument) -> HomebuyResult<SavedDocument> {
        let tx_id = self.transaction()?.id.clone();
        if let Some(task_id) = &new.task_id {
            self.task(task_id)?;
        }
        if new.mime_type.is_empty() {
            new.mime_type = guess_mime_type(&new.file_name).to_string();
        }

        let document = new.into_document(&tx_id);
        self.documents.push(document.clone());
        info!(id = %document.id, file = %document.file_name, "Added document");
        Ok(document)
    }

    pub fn document(&self, id: &str) -> HomebuyResult<&SavedDocument> {
        self.documents
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| HomebuyError::SavedDocumentNotFound(id.to_string()))
    }

    pub fn document_bytes(&self, id: &str) -> HomebuyResult<Vec<u8>> {
        Ok(STANDARD.decode(&self.document(id)?.file_base64)?)
    }

    pub fn update_document(
        &mut self,
        id: &str,
        update: &SavedDocumentUpdate,
    ) -> HomebuyResult<&SavedDocument> {
        replace_by(&mut self.documents, |d| d.id == id, |d| update.apply(d))
            .ok_or_else(|| HomebuyError::SavedDocumentNotFound(id.to_string()))
    }

    pub fn delete_document(&mut self, id: &str) -> HomebuyResult<()> {
        if !remove_by(&mut self.documents, |d| d.id == id) {
            return Err(HomebuyError::SavedDocumentNotFound(id.to_string()));
        }
        Ok(())
    }
}

/// Default snippets for a new transaction, one per template.
fn seed_snippets(transaction_id: &str) -> Vec<Snippet> {
    catalog::snippet_templates()
        .iter()
        .map(|template| {
            NewSnippet {
                category: template.category,
                label: template.label.clone(),
                value: template.default_value.clone(),
                pdf_field_mapping: template.pdf_field_mapping.clone(),
            }
            .into_snippet(transaction_id)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressStatus;
    use crate::records::{CommunicationType, DocumentCategory, StakeholderRole};
    use std::collections::BTreeMap;

    fn cash() -> ConditionFlags {
        ConditionFlags::default()
    }

    fn financed() -> ConditionFlags {
        ConditionFlags {
            has_loan: true,
            ..ConditionFlags::default()
        }
    }

    fn state_with_tx(flags: ConditionFlags) -> AppState {
        let mut state = AppState::default();
        state.create_transaction(flags, false).unwrap();
        state
    }

    #[test]
    fn test_create_transaction() {
        let state = state_with_tx(financed());
        let tx = state.transaction().unwrap();
        assert!(tx.has_loan);
        assert_eq!(state.tasks.len(), catalog::phases().iter().map(|p| p.tasks.len()).sum::<usize>());
        assert_eq!(state.snippets.len(), catalog::snippet_templates().len());
        assert!(state.snippets.iter().all(|s| s.transaction_id == tx.id));
        assert!(state.task("get-preapproval").unwrap().is_enabled);
    }

    #[test]
    fn test_create_requires_force() {
        let mut state = state_with_tx(cash());
        let first = state.transaction().unwrap().id.clone();
        state
            .add_stakeholder(NewStakeholder::named(StakeholderRole::Lender, "Lou"))
            .unwrap();

        assert!(matches!(
            state.create_transaction(cash(), false),
            Err(HomebuyError::TransactionExists(_))
        ));

        let second = state.create_transaction(financed(), true).unwrap().id.clone();
        assert_ne!(first, second);
        assert!(state.stakeholders.is_empty());
    }

    #[test]
    fn test_update_flags_reconciles() {
        let mut state = state_with_tx(cash());
        assert!(!state.task("get-preapproval").unwrap().is_enabled);

        state
            .update_transaction(&TransactionUpdate {
                has_loan: Some(true),
                ..TransactionUpdate::default()
            })
            .unwrap();
        assert!(state.task("get-preapproval").unwrap().is_enabled);
    }

    #[test]
    fn test_update_without_flags_keeps_tasks() {
        let mut state = state_with_tx(cash());
        // A stale is_enabled survives when no flag is named.
        state.tasks[0].is_enabled = false;
        state
            .update_transaction(&TransactionUpdate {
                property_address: Some("1 Main St".to_string()),
                ..TransactionUpdate::default()
            })
            .unwrap();
        assert!(!state.tasks[0].is_enabled);
        assert_eq!(state.transaction().unwrap().property_address, "1 Main St");
    }

    #[test]
    fn test_no_transaction_errors() {
        let mut state = AppState::default();
        assert!(matches!(state.transaction(), Err(HomebuyError::NoTransaction)));
        assert!(matches!(
            state.update_transaction(&TransactionUpdate::default()),
            Err(HomebuyError::NoTransaction)
        ));
        assert!(matches!(
            state.add_stakeholder(NewStakeholder::named(StakeholderRole::Inspector, "Ida")),
            Err(HomebuyError::NoTransaction)
        ));
        assert!(state.upcoming_deadlines(NaiveDate::MIN, DeadlineWindow::default()).is_empty());
    }

    #[test]
    fn test_task_operations() {
        let mut state = state_with_tx(financed());
        state.skip_task("review-budget").unwrap();
        assert!(state.task("review-budget").unwrap().skipped);

        let done = state.complete_task("review-budget").unwrap();
        assert!(done.completed);
        assert!(!done.skipped);

        state.set_task_notes("review-budget", "max 400k").unwrap();
        assert_eq!(state.task("review-budget").unwrap().notes, "max 400k");

        assert!(!state.uncomplete_task("review-budget").unwrap().completed);
        assert!(matches!(
            state.complete_task("nope"),
            Err(HomebuyError::TaskNotFound(_))
        ));
    }

    #[test]
    fn test_blocking_tasks() {
        let mut state = state_with_tx(financed());
        let blocking: Vec<String> = state
            .blocking_tasks("get-preapproval")
            .unwrap()
            .iter()
            .map(|t| t.id.clone())
            .collect();
        assert_eq!(blocking, vec!["review-budget".to_string()]);

        state.complete_task("review-budget").unwrap();
        assert!(state.blocking_tasks("get-preapproval").unwrap().is_empty());
    }

    #[test]
    fn test_phase_progress_through_state() {
        let mut state = state_with_tx(financed());
        state.complete_task("review-budget").unwrap();
        let pre_offer = state
            .phase_states()
            .into_iter()
            .find(|p| p.phase_id == "pre-offer")
            .unwrap();
        assert_eq!(pre_offer.status, ProgressStatus::Active);
        assert_eq!(pre_offer.completed_tasks, 1);
        assert_eq!(state.overall_progress().completed, 1);
    }

    #[test]
    fn test_deadlines_need_effective_date() {
        let mut state = state_with_tx(financed());
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(state.upcoming_deadlines(today, DeadlineWindow::default()).is_empty());

        state
            .update_transaction(&TransactionUpdate {
                effective_date: Some(Some(today)),
                ..TransactionUpdate::default()
            })
            .unwrap();
        let items = state.upcoming_deadlines(today, DeadlineWindow::default());
        assert!(!items.is_empty());
        assert!(items.iter().any(|i| i.is_urgent));
    }

    #[test]
    fn test_pinned_deadline_shows_without_effective_date() {
        let mut state = state_with_tx(cash());
        let today = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        let due = NaiveDate::from_ymd_opt(2024, 5, 3).unwrap();

        state.set_task_deadline("review-budget", Some(due)).unwrap();
        let items = state.upcoming_deadlines(today, DeadlineWindow::default());
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].task_id, "review-budget");
        assert_eq!(items[0].days_until, 2);
        assert!(items[0].is_urgent);

        state.set_task_deadline("review-budget", None).unwrap();
        assert!(state.upcoming_deadlines(today, DeadlineWindow::default()).is_empty());
        assert!(matches!(
            state.set_task_deadline("nope", Some(due)),
            Err(HomebuyError::TaskNotFound(_))
        ));
    }

    #[test]
    fn test_snippet_crud() {
        let mut state = state_with_tx(cash());
        let added = state
            .add_snippet(NewSnippet {
                category: SnippetCategory::Custom,
                label: "HOA Name".to_string(),
                value: "Oak Hills".to_string(),
                pdf_field_mapping: vec![],
            })
            .unwrap();
        assert_eq!(state.snippets_by_category(SnippetCategory::Custom).len(), 1);

        let updated = state
            .update_snippet(
                &added.id,
                &SnippetUpdate {
                    value: Some("Oak Hills HOA".to_string()),
                    ..SnippetUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.value, "Oak Hills HOA");

        state.delete_snippet(&added.id).unwrap();
        assert!(matches!(
            state.delete_snippet(&added.id),
            Err(HomebuyError::SnippetNotFound(_))
        ));
        assert!(matches!(
            state.add_snippet(NewSnippet {
                category: SnippetCategory::Custom,
                label: " ".to_string(),
                value: String::new(),
                pdf_field_mapping: vec![],
            }),
            Err(HomebuyError::ValidationError(_))
        ));
    }

    #[test]
    fn test_logs_require_known_stakeholder() {
        let mut state = state_with_tx(cash());
        let new_log = |stakeholder_id: &str| NewCommunicationLog {
            stakeholder_id: stakeholder_id.to_string(),
            task_id: None,
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            kind: CommunicationType::Email,
            summary: "Sent contract".to_string(),
            follow_up_needed: true,
            follow_up_date: None,
        };

        assert!(matches!(
            state.add_log(new_log("ghost")),
            Err(HomebuyError::StakeholderNotFound(_))
        ));

        let agent = state
            .add_stakeholder(NewStakeholder::named(StakeholderRole::TitleCompany, "Tia"))
            .unwrap();
        let log = state.add_log(new_log(&agent.id)).unwrap();
        assert_eq!(state.pending_follow_ups().len(), 1);

        state
            .update_log(
                &log.id,
                &CommunicationLogUpdate {
                    follow_up_needed: Some(false),
                    ..CommunicationLogUpdate::default()
                },
            )
            .unwrap();
        assert!(state.pending_follow_ups().is_empty());
        state.delete_log(&log.id).unwrap();
        assert!(state.communication_logs.is_empty());
    }

    #[test]
    fn test_saved_pdf_versions() {
        let mut state = state_with_tx(cash());
        let new_pdf = |name: &str| NewSavedPdf {
            document_id: "trec-contract".to_string(),
            name: name.to_string(),
            filled_data: BTreeMap::new(),
            pdf_base64: STANDARD.encode(b"%PDF-1.4"),
        };

        assert_eq!(state.save_pdf(new_pdf("first")).unwrap().version, 1);
        let second = state.save_pdf(new_pdf("second")).unwrap();
        assert_eq!(second.version, 2);

        let versions: Vec<u32> = state
            .saved_pdfs_for_document("trec-contract")
            .iter()
            .map(|p| p.version)
            .collect();
        assert_eq!(versions, vec![2, 1]);
        assert_eq!(state.saved_pdf_bytes(&second.id).unwrap(), b"%PDF-1.4");

        // Deleting an older version never lets a number repeat.
        let first_id = state.saved_pdfs_for_document("trec-contract")[1].id.clone();
        state.delete_saved_pdf(&first_id).unwrap();
        assert_eq!(state.save_pdf(new_pdf("third")).unwrap().version, 3);

        assert!(matches!(
            state.save_pdf(NewSavedPdf {
                document_id: "nope".to_string(),
                ..new_pdf("bad")
            }),
            Err(HomebuyError::DocumentNotFound(_))
        ));
        assert!(matches!(
            state.save_pdf(NewSavedPdf {
                pdf_base64: "not base64!".to_string(),
                ..new_pdf("bad")
            }),
            Err(HomebuyError::Base64(_))
        ));
    }

    #[test]
    fn test_document_crud() {
        let mut state = state_with_tx(cash());
        let doc = state
            .add_document(NewSavedDocument {
                name: "Inspection".to_string(),
                file_name: "report.pdf".to_string(),
                mime_type: String::new(),
                file_base64: STANDARD.encode(b"report"),
                category: DocumentCategory::Inspection,
                notes: String::new(),
                task_id: Some("attend-inspection".to_string()),
            })
            .unwrap();
        assert_eq!(doc.mime_type, "application/pdf");
        assert_eq!(state.document_bytes(&doc.id).unwrap(), b"report");

        let updated = state
            .update_document(
                &doc.id,
                &SavedDocumentUpdate {
                    notes: Some("roof issue".to_string()),
                    task_id: Some(None),
                    ..SavedDocumentUpdate::default()
                },
            )
            .unwrap();
        assert_eq!(updated.notes, "roof issue");
        assert!(updated.task_id.is_none());

        state.delete_document(&doc.id).unwrap();
        assert!(matches!(
            state.document(&doc.id),
            Err(HomebuyError::SavedDocumentNotFound(_))
        ));
    }

    #[test]
    fn test_reset() {
        let mut state = state_with_tx(cash());
        state.reset();
        assert_eq!(state, AppState::default());
    }
}
