//! Task derivation and mutation.
//!
//! Every function here is pure: it takes a snapshot of the task list and
//! returns new values, never touching its input.

pub mod condition;
pub mod model;

use chrono::NaiveDate;
use std::collections::HashMap;
use tracing::debug;

use crate::catalog::{PhaseDefinition, Stage};
use crate::transaction::model::Transaction;
use condition::{evaluate, ConditionFlags};
use model::{DeadlineType, Task};

/// Expand the phase definitions into fresh tasks for `transaction`.
///
/// Output order is phase order, then definition order. Reverse dependency
/// edges are derived here; references to unknown task ids are ignored.
pub fn materialize(phases: &[PhaseDefinition], transaction: &Transaction) -> Vec<Task> {
    let flags = ConditionFlags::from(transaction);

    let mut tasks: Vec<Task> = phases
        .iter()
        .flat_map(|phase| {
            phase.tasks.iter().map(move |def| {
                Task::from_definition(&phase.id, def, evaluate(def.condition.as_ref(), flags))
            })
        })
        .collect();

    // First task with a given id wins lookups.
    let mut index: HashMap<String, usize> = HashMap::new();
    for (i, task) in tasks.iter().enumerate() {
        index.entry(task.id.clone()).or_insert(i);
    }

    let edges: Vec<(usize, String)> = tasks
        .iter()
        .flat_map(|task| {
            task.depends_on
                .iter()
                .filter_map(|dep| index.get(dep).map(|&i| (i, task.id.clone())))
                .collect::<Vec<_>>()
        })
        .collect();

    for (target, dependent) in edges {
        let reverse = &mut tasks[target].depended_on_by;
        if !reverse.contains(&dependent) {
            reverse.push(dependent);
        }
    }

    debug!(
        tasks = tasks.len(),
        enabled = tasks.iter().filter(|t| t.is_enabled).count(),
        "Materialized tasks"
    );
    tasks
}

/// Recompute `is_enabled` for every task against the transaction's flags.
///
/// Completion and skip state are carried over untouched, so a task that is
/// disabled and later re-enabled comes back exactly as it was.
pub fn reconcile(tasks: &[Task], transaction: &Transaction) -> Vec<Task> {
    let flags = ConditionFlags::from(transaction);
    tasks
        .iter()
        .map(|task| Task {
            is_enabled: evaluate(task.condition.as_ref(), flags),
            ..task.clone()
        })
        .collect()
}

/// Mark a task complete or incomplete.
///
/// Completing clears any skip; un-completing clears `completed_at` but
/// leaves the skip state alone.
pub fn set_completed(task: &Task, completed: bool) -> Task {
    let mut updated = task.clone();
    if completed {
        if !task.completed {
            updated.completed = true;
            updated.completed_at = Some(chrono::Utc::now().to_rfc3339());
            updated.skipped = false;
            updated.skipped_at = None;
        }
    } else {
        updated.completed = false;
        updated.completed_at = None;
    }
    updated
}

/// Skip an open task for later. No-op on completed or already skipped tasks.
pub fn skip(task: &Task) -> Task {
    if task.completed || task.skipped {
        return task.clone();
    }
    Task {
        skipped: true,
        skipped_at: Some(chrono::Utc::now().to_rfc3339()),
        ..task.clone()
    }
}

/// Clear a skip.
pub fn unskip(task: &Task) -> Task {
    Task {
        skipped: false,
        skipped_at: None,
        ..task.clone()
    }
}

/// Replace a task's free-text notes.
pub fn set_notes(task: &Task, notes: &str) -> Task {
    Task {
        notes: notes.to_string(),
        ..task.clone()
    }
}

/// Pin a task to a calendar date, or drop the pin.
///
/// A pinned task becomes a `fixed_date` deadline. Dropping the pin falls
/// back to the effective-date offset when the task has one.
pub fn set_deadline_date(task: &Task, date: Option<NaiveDate>) -> Task {
    let deadline_type = match (date, task.deadline_days) {
        (Some(_), _) => DeadlineType::FixedDate,
        (None, Some(_)) => DeadlineType::DaysFromEffective,
        (None, None) => DeadlineType::None,
    };
    Task {
        deadline_type,
        deadline_date: date,
        ..task.clone()
    }
}

/// New list with `f` applied to every task whose id is `task_id`.
pub fn replace_task<F>(tasks: &[Task], task_id: &str, f: F) -> Vec<Task>
where
    F: Fn(&Task) -> Task,
{
    tasks
        .iter()
        .map(|t| if t.id == task_id { f(t) } else { t.clone() })
        .collect()
}

/// First task with the given id.
pub fn find_task<'a>(tasks: &'a [Task], task_id: &str) -> Option<&'a Task> {
    tasks.iter().find(|t| t.id == task_id)
}

/// Dependencies of `task_id` that are enabled and not yet completed,
/// in declared order. Unknown ids are dropped.
///
/// Purely informational: nothing prevents completing a task whose
/// dependencies are still open.
pub fn incomplete_dependencies<'a>(task_id: &str, tasks: &'a [Task]) -> Vec<&'a Task> {
    let Some(task) = find_task(tasks, task_id) else {
        return Vec::new();
    };

    task.depends_on
        .iter()
        .filter_map(|dep| find_task(tasks, dep))
        .filter(|dep| dep.is_enabled && !dep.completed)
        .collect()
}

/// Whether any dependency of `task_id` is still open.
pub fn has_pending_dependencies(task_id: &str, tasks: &[Task]) -> bool {
    !incomplete_dependencies(task_id, tasks).is_empty()
}

/// Tasks belonging to one phase, in list order.
pub fn tasks_for_phase<'a>(tasks: &'a [Task], phase_id: &str) -> Vec<&'a Task> {
    tasks.iter().filter(|t| t.phase_id == phase_id).collect()
}

/// Tasks belonging to any phase of `stage`, in list order.
pub fn tasks_for_stage<'a>(tasks: &'a [Task], stage: &Stage) -> Vec<&'a Task> {
    tasks.iter().filter(|t| stage.contains_phase(&t.phase_id)).collect()
}

/// Tasks grouped the way a checklist shows them.
#[derive(Debug, Default)]
pub struct TaskBuckets<'a> {
    /// Enabled, neither completed nor skipped.
    pub todo: Vec<&'a Task>,
    /// Enabled, skipped and not completed.
    pub skipped: Vec<&'a Task>,
    /// Enabled and completed.
    pub completed: Vec<&'a Task>,
    /// Disabled by their condition.
    pub not_applicable: Vec<&'a Task>,
}

impl<'a> TaskBuckets<'a> {
    pub fn partition<I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut buckets = Self::default();
        for task in tasks {
            if !task.is_enabled {
                buckets.not_applicable.push(task);
            } else if task.completed {
                buckets.completed.push(task);
            } else if task.is_skipped_open() {
                buckets.skipped.push(task);
            } else {
                buckets.todo.push(task);
            }
        }
        buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, StageId};
    use crate::task::model::{TaskCondition, TaskDefinition, TaskType};

    fn test_phases() -> Vec<PhaseDefinition> {
        vec![
            PhaseDefinition {
                id: "p1".to_string(),
                number: 1,
                name: "One".to_string(),
                short_name: "One".to_string(),
                description: String::new(),
                stage_id: StageId::OfferPrep,
                typical_days_start: 0,
                typical_days_end: 1,
                tasks: vec![
                    TaskDefinition::new("a", "A", TaskType::Action),
                    TaskDefinition::new("b", "B", TaskType::Paperwork)
                        .with_depends_on(&["a", "ghost"])
                        .with_condition(TaskCondition::HasHoa),
                ],
            },
            PhaseDefinition {
                id: "p2".to_string(),
                number: 2,
                name: "Two".to_string(),
                short_name: "Two".to_string(),
                description: String::new(),
                stage_id: StageId::OfferPrep,
                typical_days_start: 1,
                typical_days_end: 2,
                tasks: vec![
                    TaskDefinition::new("c", "C", TaskType::Payment)
                        .with_depends_on(&["a", "b"])
                        .with_condition(TaskCondition::HasLoan),
                    TaskDefinition::new("d", "D", TaskType::Waiting)
                        .with_condition(TaskCondition::custom("IF SOMETHING")),
                ],
            },
        ]
    }

    fn cash_no_hoa() -> Transaction {
        Transaction {
            has_loan: false,
            has_hoa: false,
            ..Transaction::new()
        }
    }

    #[test]
    fn test_materialize_order_and_defaults() {
        let tasks = materialize(&test_phases(), &cash_no_hoa());
        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
        assert_eq!(tasks[2].phase_id, "p2");

        for task in &tasks {
            assert!(!task.completed);
            assert!(!task.skipped);
            assert!(task.notes.is_empty());
            assert!(task.completed_at.is_none());
        }
    }

    #[test]
    fn test_materialize_enablement() {
        let tasks = materialize(&test_phases(), &cash_no_hoa());
        let enabled: Vec<bool> = tasks.iter().map(|t| t.is_enabled).collect();
        assert_eq!(enabled, vec![true, false, false, true]);
    }

    #[test]
    fn test_materialize_reverse_edges() {
        let tasks = materialize(&test_phases(), &cash_no_hoa());
        assert_eq!(tasks[0].depended_on_by, vec!["b".to_string(), "c".to_string()]);
        assert_eq!(tasks[1].depended_on_by, vec!["c".to_string()]);
        assert!(tasks[2].depended_on_by.is_empty());
        // Dangling reference is kept on the forward side only.
        assert_eq!(tasks[1].depends_on, vec!["a".to_string(), "ghost".to_string()]);
    }

    #[test]
    fn test_materialize_is_deterministic() {
        let tx = cash_no_hoa();
        let first = materialize(&test_phases(), &tx);
        let second = materialize(&test_phases(), &tx);
        assert_eq!(first, second);
    }

    #[test]
    fn test_materialize_full_catalog() {
        let tasks = materialize(catalog::phases(), &Transaction::new());
        let defined: usize = catalog::phases().iter().map(|p| p.tasks.len()).sum();
        assert_eq!(tasks.len(), defined);

        let preapproval = find_task(&tasks, "get-preapproval").unwrap();
        assert!(preapproval.is_enabled);
        assert!(preapproval.depended_on_by.contains(&"fill-financing-addendum".to_string()));
        assert!(!find_task(&tasks, "review-hoa-rules").unwrap().is_enabled);
    }

    #[test]
    fn test_reconcile_recomputes_enablement_only() {
        let mut tx = cash_no_hoa();
        let tasks = materialize(&test_phases(), &tx);
        let tasks = replace_task(&tasks, "b", |t| set_completed(t, true));

        tx.has_hoa = true;
        tx.has_loan = true;
        let reconciled = reconcile(&tasks, &tx);
        assert!(reconciled.iter().all(|t| t.is_enabled));
        assert!(find_task(&reconciled, "b").unwrap().completed);

        for (before, after) in tasks.iter().zip(&reconciled) {
            assert_eq!(before.completed, after.completed);
            assert_eq!(before.skipped, after.skipped);
            assert_eq!(before.completed_at, after.completed_at);
        }
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let mut tx = cash_no_hoa();
        let tasks = materialize(&test_phases(), &tx);
        tx.has_loan = true;
        let once = reconcile(&tasks, &tx);
        let twice = reconcile(&once, &tx);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_disable_then_enable_restores_completion() {
        let mut tx = Transaction::new();
        tx.has_hoa = true;
        let tasks = materialize(&test_phases(), &tx);
        let tasks = replace_task(&tasks, "b", |t| set_completed(t, true));
        let completed_at = find_task(&tasks, "b").unwrap().completed_at.clone();

        tx.has_hoa = false;
        let disabled = reconcile(&tasks, &tx);
        let b = find_task(&disabled, "b").unwrap();
        assert!(!b.is_enabled);
        assert!(b.completed);

        tx.has_hoa = true;
        let enabled = reconcile(&disabled, &tx);
        let b = find_task(&enabled, "b").unwrap();
        assert!(b.is_enabled);
        assert!(b.completed);
        assert_eq!(b.completed_at, completed_at);
    }

    #[test]
    fn test_complete_clears_skip() {
        let tasks = materialize(&test_phases(), &Transaction::new());
        let skipped = skip(&tasks[0]);
        assert!(skipped.skipped);
        assert!(skipped.skipped_at.is_some());

        let done = set_completed(&skipped, true);
        assert!(done.completed);
        assert!(done.completed_at.is_some());
        assert!(!done.skipped);
        assert!(done.skipped_at.is_none());
    }

    #[test]
    fn test_uncomplete_keeps_skip_state() {
        let tasks = materialize(&test_phases(), &Transaction::new());
        let mut task = set_completed(&tasks[0], true);
        // Legacy data can carry both flags.
        task.skipped = true;

        let reopened = set_completed(&task, false);
        assert!(!reopened.completed);
        assert!(reopened.completed_at.is_none());
        assert!(reopened.skipped);
    }

    #[test]
    fn test_complete_twice_keeps_timestamp() {
        let tasks = materialize(&test_phases(), &Transaction::new());
        let mut done = set_completed(&tasks[0], true);
        done.completed_at = Some("2024-01-01T00:00:00+00:00".to_string());
        let again = set_completed(&done, true);
        assert_eq!(again, done);
    }

    #[test]
    fn test_skip_completed_is_noop() {
        let tasks = materialize(&test_phases(), &Transaction::new());
        let done = set_completed(&tasks[0], true);
        assert_eq!(skip(&done), done);
    }

    #[test]
    fn test_skip_twice_keeps_timestamp() {
        let tasks = materialize(&test_phases(), &Transaction::new());
        let mut once = skip(&tasks[0]);
        once.skipped_at = Some("2024-01-01T00:00:00+00:00".to_string());
        assert_eq!(skip(&once), once);
    }

    #[test]
    fn test_unskip() {
        let tasks = materialize(&test_phases(), &Transaction::new());
        let done = set_completed(&tasks[0], true);
        let skipped = skip(&tasks[1]);

        let cleared = unskip(&skipped);
        assert!(!cleared.skipped);
        assert!(cleared.skipped_at.is_none());
        assert!(unskip(&done).completed);
    }

    #[test]
    fn test_set_deadline_date() {
        let tasks = materialize(&test_phases(), &cash_no_hoa());
        let a = find_task(&tasks, "a").unwrap();
        assert_eq!(a.deadline_type, DeadlineType::None);

        let date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let pinned = set_deadline_date(a, Some(date));
        assert_eq!(pinned.deadline_type, DeadlineType::FixedDate);
        assert_eq!(pinned.deadline_date, Some(date));

        let cleared = set_deadline_date(&pinned, None);
        assert_eq!(cleared.deadline_type, DeadlineType::None);
        assert_eq!(cleared.deadline_date, None);

        let offset = Task {
            deadline_days: Some(5),
            ..pinned
        };
        assert_eq!(
            set_deadline_date(&offset, None).deadline_type,
            DeadlineType::DaysFromEffective
        );
    }

    #[test]
    fn test_set_notes() {
        let tasks = materialize(&test_phases(), &Transaction::new());
        let noted = set_notes(&tasks[0], "called lender");
        assert_eq!(noted.notes, "called lender");
        assert_eq!(noted.id, tasks[0].id);
    }

    #[test]
    fn test_incomplete_dependencies() {
        let mut tx = Transaction::new();
        tx.has_hoa = true;
        let tasks = materialize(&test_phases(), &tx);

        let deps: Vec<&str> = incomplete_dependencies("c", &tasks)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(deps, vec!["a", "b"]);

        let tasks = replace_task(&tasks, "a", |t| set_completed(t, true));
        let deps: Vec<&str> = incomplete_dependencies("c", &tasks)
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(deps, vec!["b"]);

        // Disabled dependencies do not count.
        tx.has_hoa = false;
        let tasks = reconcile(&tasks, &tx);
        assert!(incomplete_dependencies("c", &tasks).is_empty());
        assert!(!has_pending_dependencies("c", &tasks));
    }

    #[test]
    fn test_incomplete_dependencies_drops_unknown() {
        let mut tx = Transaction::new();
        tx.has_hoa = true;
        let tasks = materialize(&test_phases(), &tx);
        let deps = incomplete_dependencies("b", &tasks);
        assert_eq!(deps.len(), 1);
        assert_eq!(deps[0].id, "a");
        assert!(incomplete_dependencies("missing", &tasks).is_empty());
    }

    #[test]
    fn test_dependencies_do_not_block_completion() {
        let tasks = materialize(&test_phases(), &Transaction::new());
        assert!(has_pending_dependencies("c", &tasks));
        let tasks = replace_task(&tasks, "c", |t| set_completed(t, true));
        assert!(find_task(&tasks, "c").unwrap().completed);
    }

    #[test]
    fn test_buckets() {
        let tasks = materialize(&test_phases(), &cash_no_hoa());
        let tasks = replace_task(&tasks, "a", |t| set_completed(t, true));
        let tasks = replace_task(&tasks, "d", skip);

        let buckets = TaskBuckets::partition(&tasks);
        assert_eq!(buckets.completed.len(), 1);
        assert_eq!(buckets.skipped.len(), 1);
        assert!(buckets.todo.is_empty());
        assert_eq!(buckets.not_applicable.len(), 2);
    }

    #[test]
    fn test_buckets_completed_wins_over_stale_skip() {
        let tasks = materialize(&test_phases(), &cash_no_hoa());
        // Imported data can carry both flags.
        let tasks = replace_task(&tasks, "a", |t| Task {
            completed: true,
            skipped: true,
            ..t.clone()
        });

        assert!(!find_task(&tasks, "a").unwrap().is_skipped_open());
        let buckets = TaskBuckets::partition(&tasks);
        assert_eq!(buckets.completed.len(), 1);
        assert!(buckets.skipped.is_empty());
    }

    #[test]
    fn test_tasks_for_stage() {
        let tasks = materialize(catalog::phases(), &Transaction::new());
        let stage = catalog::stage(StageId::OptionPeriod).unwrap();
        let in_stage = tasks_for_stage(&tasks, stage);
        assert!(!in_stage.is_empty());
        assert!(in_stage.iter().all(|t| t.phase_id == "option-period"));
        assert_eq!(in_stage.len(), tasks_for_phase(&tasks, "option-period").len());
    }
}
