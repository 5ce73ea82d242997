//! Loading and saving [`AppState`] through the key-value store.

use homebuy_store::Store;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::HomebuyResult;
use crate::state::AppState;
use crate::task::{self, model::Task};
use crate::transaction::Transaction;

pub const TRANSACTION_KEY: &str = "transaction";
pub const TASKS_KEY: &str = "tasks";
pub const SNIPPETS_KEY: &str = "snippets";
pub const STAKEHOLDERS_KEY: &str = "stakeholders";
pub const COMMUNICATION_LOGS_KEY: &str = "communicationLogs";
pub const SAVED_PDFS_KEY: &str = "savedPDFs";
pub const DOCUMENTS_KEY: &str = "documents";

/// Every key the application reads and writes.
pub const ALL_KEYS: [&str; 7] = [
    TRANSACTION_KEY,
    TASKS_KEY,
    SNIPPETS_KEY,
    STAKEHOLDERS_KEY,
    COMMUNICATION_LOGS_KEY,
    SAVED_PDFS_KEY,
    DOCUMENTS_KEY,
];

/// Load the full state.
///
/// Stored tasks go through [`normalize_tasks`] first, then `isEnabled` is
/// re-derived from the loaded transaction.
pub fn load_state(store: &Store) -> HomebuyResult<AppState> {
    let transaction: Option<Transaction> = store.load(TRANSACTION_KEY, None)?;

    let raw_tasks: Value = store.load(TASKS_KEY, Value::Array(Vec::new()))?;
    let tasks: Vec<Task> = match serde_json::from_value(normalize_tasks(raw_tasks)) {
        Ok(tasks) => tasks,
        Err(e) => {
            warn!(error = %e, "Stored tasks are unreadable, starting with none");
            Vec::new()
        }
    };
    let tasks = match &transaction {
        Some(tx) => task::reconcile(&tasks, tx),
        None => tasks,
    };

    let state = AppState {
        transaction,
        tasks,
        snippets: store.load(SNIPPETS_KEY, Vec::new())?,
        stakeholders: store.load(STAKEHOLDERS_KEY, Vec::new())?,
        communication_logs: store.load(COMMUNICATION_LOGS_KEY, Vec::new())?,
        saved_pdfs: store.load(SAVED_PDFS_KEY, Vec::new())?,
        documents: store.load(DOCUMENTS_KEY, Vec::new())?,
    };
    debug!(
        has_transaction = state.has_transaction(),
        tasks = state.tasks.len(),
        "Loaded state"
    );
    Ok(state)
}

/// Write every collection back. A missing transaction removes its key.
pub fn save_state(store: &Store, state: &AppState) -> HomebuyResult<()> {
    match &state.transaction {
        Some(tx) => store.save(TRANSACTION_KEY, tx)?,
        None => store.remove(TRANSACTION_KEY)?,
    }
    store.save(TASKS_KEY, &state.tasks)?;
    store.save(SNIPPETS_KEY, &state.snippets)?;
    store.save(STAKEHOLDERS_KEY, &state.stakeholders)?;
    store.save(COMMUNICATION_LOGS_KEY, &state.communication_logs)?;
    store.save(SAVED_PDFS_KEY, &state.saved_pdfs)?;
    store.save(DOCUMENTS_KEY, &state.documents)?;
    Ok(())
}

/// Write only the collections that differ between `before` and `after`.
///
/// `before` is the state as loaded. A collection that could not be read
/// loads as its default and stays unwritten until a command changes it, so
/// the stored text survives unrelated commands. Returns the keys written.
pub fn save_changes(
    store: &Store,
    before: &AppState,
    after: &AppState,
) -> HomebuyResult<Vec<&'static str>> {
    let mut written = Vec::new();

    if before.transaction != after.transaction {
        match &after.transaction {
            Some(tx) => store.save(TRANSACTION_KEY, tx)?,
            None => store.remove(TRANSACTION_KEY)?,
        }
        written.push(TRANSACTION_KEY);
    }
    if before.tasks != after.tasks {
        store.save(TASKS_KEY, &after.tasks)?;
        written.push(TASKS_KEY);
    }
    if before.snippets != after.snippets {
        store.save(SNIPPETS_KEY, &after.snippets)?;
        written.push(SNIPPETS_KEY);
    }
    if before.stakeholders != after.stakeholders {
        store.save(STAKEHOLDERS_KEY, &after.stakeholders)?;
        written.push(STAKEHOLDERS_KEY);
    }
    if before.communication_logs != after.communication_logs {
        store.save(COMMUNICATION_LOGS_KEY, &after.communication_logs)?;
        written.push(COMMUNICATION_LOGS_KEY);
    }
    if before.saved_pdfs != after.saved_pdfs {
        store.save(SAVED_PDFS_KEY, &after.saved_pdfs)?;
        written.push(SAVED_PDFS_KEY);
    }
    if before.documents != after.documents {
        store.save(DOCUMENTS_KEY, &after.documents)?;
        written.push(DOCUMENTS_KEY);
    }

    debug!(keys = ?written, "Saved changed collections");
    Ok(written)
}

/// Rewrite stored task objects into the current shape.
///
/// Older data names the dependency list `blockedBy`; it becomes `dependsOn`
/// unless that is already present. Other missing fields are filled by the
/// serde defaults on [`Task`].
pub fn normalize_tasks(mut raw: Value) -> Value {
    let Some(items) = raw.as_array_mut() else {
        return raw;
    };

    let mut migrated = 0usize;
    for item in items.iter_mut() {
        let Some(obj) = item.as_object_mut() else {
            continue;
        };
        if let Some(blocked_by) = obj.remove("blockedBy") {
            if !obj.contains_key("dependsOn") {
                obj.insert("dependsOn".to_string(), blocked_by);
                migrated += 1;
            }
        }
    }

    if migrated > 0 {
        debug!(migrated, "Migrated legacy blockedBy fields");
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{NewStakeholder, StakeholderRole};
    use crate::task::condition::ConditionFlags;
    use crate::transaction::TransactionUpdate;
    use chrono::NaiveDate;
    use serde_json::json;

    fn sample_state() -> AppState {
        let mut state = AppState::default();
        state
            .create_transaction(
                ConditionFlags {
                    has_hoa: true,
                    has_loan: true,
                    is_new_construction: false,
                },
                false,
            )
            .unwrap();
        state
            .update_transaction(&TransactionUpdate {
                property_address: Some("12 Elm St".to_string()),
                purchase_price: Some(325_000.0),
                effective_date: Some(NaiveDate::from_ymd_opt(2024, 1, 1)),
                ..TransactionUpdate::default()
            })
            .unwrap();
        state.complete_task("review-budget").unwrap();
        state.skip_task("tour-property").unwrap();
        state.set_task_notes("get-preapproval", "two quotes so far").unwrap();
        state
            .add_stakeholder(NewStakeholder::named(StakeholderRole::Lender, "Lou"))
            .unwrap();
        state
    }

    #[test]
    fn test_load_empty_store() {
        let store = Store::in_memory().unwrap();
        let state = load_state(&store).unwrap();
        assert_eq!(state, AppState::default());
    }

    #[test]
    fn test_save_then_load() {
        let store = Store::in_memory().unwrap();
        let state = sample_state();
        save_state(&store, &state).unwrap();

        assert_eq!(load_state(&store).unwrap(), state);
        assert_eq!(store.keys().unwrap().len(), ALL_KEYS.len());
    }

    #[test]
    fn test_export_import_round_trip() {
        let source = Store::in_memory().unwrap();
        let state = sample_state();
        save_state(&source, &state).unwrap();
        let envelope = source.export().unwrap();

        let target = Store::in_memory().unwrap();
        save_state(&target, &AppState::default()).unwrap();
        target.import(&envelope).unwrap();

        let restored = load_state(&target).unwrap();
        assert_eq!(restored.transaction, state.transaction);
        assert_eq!(restored.tasks, state.tasks);
        assert_eq!(restored.phase_states(), state.phase_states());
        assert_eq!(restored, state);
    }

    #[test]
    fn test_reset_removes_transaction_key() {
        let store = Store::in_memory().unwrap();
        let mut state = sample_state();
        save_state(&store, &state).unwrap();

        state.reset();
        save_state(&store, &state).unwrap();
        assert!(store.get_raw(TRANSACTION_KEY).unwrap().is_none());
        assert!(!load_state(&store).unwrap().has_transaction());
    }

    #[test]
    fn test_legacy_blocked_by_is_migrated() {
        let store = Store::in_memory().unwrap();
        let legacy = json!([
            {"id": "a", "phaseId": "pre-offer", "title": "A", "completed": true},
            {"id": "b", "phaseId": "pre-offer", "title": "B", "blockedBy": ["a"]},
            {"id": "c", "phaseId": "pre-offer", "title": "C", "blockedBy": ["x"], "dependsOn": ["a"]}
        ]);
        store.save(TASKS_KEY, &legacy).unwrap();

        let state = load_state(&store).unwrap();
        assert_eq!(state.tasks.len(), 3);
        assert_eq!(state.tasks[1].depends_on, vec!["a".to_string()]);
        assert_eq!(state.tasks[2].depends_on, vec!["a".to_string()]);
        assert!(!state.tasks[1].skipped);
        assert!(state.tasks[1].notes.is_empty());
        assert!(state.tasks[1].is_enabled);
        assert!(state.tasks[0].completed);
    }

    #[test]
    fn test_load_reconciles_enablement() {
        let store = Store::in_memory().unwrap();
        let mut state = sample_state();
        // Simulate an edit made elsewhere without reconciling.
        if let Some(tx) = state.transaction.as_mut() {
            tx.has_hoa = false;
        }
        save_state(&store, &state).unwrap();

        let loaded = load_state(&store).unwrap();
        assert!(!loaded.task("review-hoa-rules").unwrap().is_enabled);
        assert!(state.task("review-hoa-rules").unwrap().is_enabled);
    }

    #[test]
    fn test_save_changes_writes_only_changed_keys() {
        let store = Store::in_memory().unwrap();
        let state = sample_state();
        save_state(&store, &state).unwrap();
        let tasks_before = store.get_raw(TASKS_KEY).unwrap();

        let loaded = load_state(&store).unwrap();
        let mut after = loaded.clone();
        after
            .add_stakeholder(NewStakeholder::named(StakeholderRole::Inspector, "Ida"))
            .unwrap();

        let written = save_changes(&store, &loaded, &after).unwrap();
        assert_eq!(written, vec![STAKEHOLDERS_KEY]);
        assert_eq!(store.get_raw(TASKS_KEY).unwrap(), tasks_before);
        assert_eq!(load_state(&store).unwrap(), after);

        after.reset();
        let written = save_changes(&store, &loaded, &after).unwrap();
        assert!(written.contains(&TRANSACTION_KEY));
        assert!(store.get_raw(TRANSACTION_KEY).unwrap().is_none());
    }

    #[test]
    fn test_unrelated_save_keeps_unreadable_tasks() {
        let store = Store::in_memory().unwrap();
        save_state(&store, &sample_state()).unwrap();

        // One record with an unknown task type makes the whole list unreadable.
        let mut raw: Value = store.load(TASKS_KEY, Value::Null).unwrap();
        raw[0]["taskType"] = json!("meeting");
        store.save(TASKS_KEY, &raw).unwrap();
        let stored = store.get_raw(TASKS_KEY).unwrap();

        let loaded = load_state(&store).unwrap();
        assert!(loaded.tasks.is_empty());
        let mut after = loaded.clone();
        after
            .add_stakeholder(NewStakeholder::named(StakeholderRole::Inspector, "Ida"))
            .unwrap();
        save_changes(&store, &loaded, &after).unwrap();

        assert_eq!(store.get_raw(TASKS_KEY).unwrap(), stored);
        assert_ne!(store.get_raw(TASKS_KEY).unwrap().as_deref(), Some("[]"));
        assert_eq!(load_state(&store).unwrap().stakeholders.len(), 2);
    }

    #[test]
    fn test_unreadable_tasks_fall_back_to_empty() {
        let store = Store::in_memory().unwrap();
        store.put_raw(TASKS_KEY, "{not json").unwrap();
        assert!(load_state(&store).unwrap().tasks.is_empty());

        store.save(TASKS_KEY, &json!([{"id": 1}])).unwrap();
        assert!(load_state(&store).unwrap().tasks.is_empty());
    }
}
