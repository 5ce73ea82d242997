//! Phase and stage progress, recomputed from the full task list.

use serde::Serialize;

use crate::catalog::{self, PhaseDefinition, Stage, StageId};
use crate::task::model::Task;

/// Progress status of a phase or stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Complete,
    Active,
    Pending,
}

impl ProgressStatus {
    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Complete => "complete",
            Self::Active => "active",
            Self::Pending => "pending",
        }
    }
}

/// Counts shared by phase and stage aggregation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Counts {
    completed: usize,
    skipped: usize,
    total: usize,
    enabled: usize,
}

impl Counts {
    fn tally<'a, I>(tasks: I) -> Self
    where
        I: IntoIterator<Item = &'a Task>,
    {
        let mut counts = Self::default();
        for task in tasks {
            counts.total += 1;
            if !task.is_enabled {
                continue;
            }
            counts.enabled += 1;
            if task.completed {
                counts.completed += 1;
            } else if task.is_skipped_open() {
                counts.skipped += 1;
            }
        }
        counts
    }

    fn is_complete(&self) -> bool {
        self.enabled == 0 || self.completed == self.enabled
    }
}

fn percent(completed: usize, enabled: usize) -> u8 {
    if enabled == 0 {
        return 0;
    }
    (completed * 100 / enabled) as u8
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseState {
    pub phase_id: String,
    pub status: ProgressStatus,
    pub completed_tasks: usize,
    /// Enabled, skipped and not completed.
    pub skipped_tasks: usize,
    /// Enabled and disabled.
    pub total_tasks: usize,
    pub enabled_tasks: usize,
}

impl PhaseState {
    /// Whole percentage of enabled tasks completed, rounded down.
    pub fn percent(&self) -> u8 {
        percent(self.completed_tasks, self.enabled_tasks)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageState {
    pub stage_id: StageId,
    pub status: ProgressStatus,
    pub completed_tasks: usize,
    pub skipped_tasks: usize,
    pub total_tasks: usize,
    pub enabled_tasks: usize,
}

impl StageState {
    /// Whole percentage of enabled tasks completed, rounded down.
    pub fn percent(&self) -> u8 {
        percent(self.completed_tasks, self.enabled_tasks)
    }
}

/// Aggregate one phase. A skipped task is enough to make a phase active.
pub fn aggregate_phase(phase: &PhaseDefinition, tasks: &[Task]) -> PhaseState {
    let counts = Counts::tally(tasks.iter().filter(|t| t.phase_id == phase.id));

    let status = if counts.is_complete() {
        ProgressStatus::Complete
    } else if counts.completed > 0 || counts.skipped > 0 {
        ProgressStatus::Active
    } else {
        ProgressStatus::Pending
    };

    PhaseState {
        phase_id: phase.id.clone(),
        status,
        completed_tasks: counts.completed,
        skipped_tasks: counts.skipped,
        total_tasks: counts.total,
        enabled_tasks: counts.enabled,
    }
}

/// Aggregate one stage across all of its phases.
///
/// Unlike phases, only completed tasks make a stage active.
pub fn aggregate_stage(stage: &Stage, tasks: &[Task]) -> StageState {
    let counts = Counts::tally(tasks.iter().filter(|t| stage.contains_phase(&t.phase_id)));

    let status = if counts.is_complete() {
        ProgressStatus::Complete
    } else if counts.completed > 0 {
        ProgressStatus::Active
    } else {
        ProgressStatus::Pending
    };

    StageState {
        stage_id: stage.id,
        status,
        completed_tasks: counts.completed,
        skipped_tasks: counts.skipped,
        total_tasks: counts.total,
        enabled_tasks: counts.enabled,
    }
}

/// States for every catalog phase, in phase order.
pub fn phase_states(tasks: &[Task]) -> Vec<PhaseState> {
    catalog::phases()
        .iter()
        .map(|phase| aggregate_phase(phase, tasks))
        .collect()
}

/// States for every catalog stage, in stage order.
pub fn stage_states(tasks: &[Task]) -> Vec<StageState> {
    catalog::stages()
        .iter()
        .map(|stage| aggregate_stage(stage, tasks))
        .collect()
}

/// Overall completion across all enabled tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverallProgress {
    pub completed: usize,
    pub enabled: usize,
    pub percent: u8,
}

pub fn overall_progress(tasks: &[Task]) -> OverallProgress {
    let counts = Counts::tally(tasks);
    OverallProgress {
        completed: counts.completed,
        enabled: counts.enabled,
        percent: percent(counts.completed, counts.enabled),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::model::{TaskDefinition, TaskType};
    use crate::task::{materialize, replace_task, set_completed, skip};
    use crate::transaction::Transaction;

    fn phase_with(id: &str, task_ids: &[&str]) -> PhaseDefinition {
        PhaseDefinition {
            id: id.to_string(),
            number: 1,
            name: id.to_string(),
            short_name: id.to_string(),
            description: String::new(),
            stage_id: StageId::OfferPrep,
            typical_days_start: 0,
            typical_days_end: 0,
            tasks: task_ids
                .iter()
                .map(|t| TaskDefinition::new(t, t, TaskType::Action))
                .collect(),
        }
    }

    fn stage_of(phase_ids: &[&str]) -> Stage {
        Stage {
            id: StageId::OfferPrep,
            name: "Test".to_string(),
            short_name: "Test".to_string(),
            description: String::new(),
            phase_ids: phase_ids.iter().map(|p| p.to_string()).collect(),
            order: 1,
        }
    }

    #[test]
    fn test_fresh_tasks_are_not_complete() {
        let tasks = materialize(catalog::phases(), &Transaction::new());
        for state in phase_states(&tasks) {
            assert_eq!(state.completed_tasks, 0);
            if state.enabled_tasks > 0 {
                assert_eq!(state.status, ProgressStatus::Pending, "{}", state.phase_id);
            } else {
                assert_eq!(state.status, ProgressStatus::Complete);
            }
        }
        for state in stage_states(&tasks) {
            assert_eq!(state.completed_tasks, 0);
            assert_ne!(state.status, ProgressStatus::Complete);
        }
    }

    #[test]
    fn test_phase_active_with_completed_and_skipped() {
        let phase = phase_with("p", &["a", "b", "c"]);
        let tasks = materialize(std::slice::from_ref(&phase), &Transaction::new());
        let tasks = replace_task(&tasks, "a", |t| set_completed(t, true));
        let tasks = replace_task(&tasks, "b", |t| set_completed(t, true));
        let tasks = replace_task(&tasks, "c", skip);

        let state = aggregate_phase(&phase, &tasks);
        assert_eq!(state.status, ProgressStatus::Active);
        assert_eq!(state.completed_tasks, 2);
        assert_eq!(state.skipped_tasks, 1);
        assert_eq!(state.total_tasks, 3);
        assert_eq!(state.percent(), 66);
    }

    #[test]
    fn test_skip_only_activates_phase_not_stage() {
        let phase = phase_with("p", &["a", "b"]);
        let stage = stage_of(&["p"]);
        let tasks = materialize(std::slice::from_ref(&phase), &Transaction::new());
        let tasks = replace_task(&tasks, "a", skip);

        assert_eq!(aggregate_phase(&phase, &tasks).status, ProgressStatus::Active);
        assert_eq!(aggregate_stage(&stage, &tasks).status, ProgressStatus::Pending);
    }

    #[test]
    fn test_stage_pools_phases() {
        let phases = vec![phase_with("p1", &["a", "b"]), phase_with("p2", &["c"])];
        let stage = stage_of(&["p1", "p2"]);
        let mut tasks = materialize(&phases, &Transaction::new());

        tasks = replace_task(&tasks, "a", |t| set_completed(t, true));
        let state = aggregate_stage(&stage, &tasks);
        assert_eq!(state.status, ProgressStatus::Active);
        assert_eq!(state.enabled_tasks, 3);

        for id in ["b", "c"] {
            tasks = replace_task(&tasks, id, |t| set_completed(t, true));
        }
        let state = aggregate_stage(&stage, &tasks);
        assert_eq!(state.status, ProgressStatus::Complete);
        assert_eq!(state.percent(), 100);
    }

    #[test]
    fn test_disabled_tasks_count_only_in_total() {
        let tx = Transaction {
            has_loan: false,
            ..Transaction::new()
        };
        let tasks = materialize(catalog::phases(), &tx);
        let phase = catalog::phase("loan-process").unwrap();
        let state = aggregate_phase(phase, &tasks);

        assert_eq!(state.enabled_tasks, 0);
        assert!(state.total_tasks > 0);
        assert_eq!(state.status, ProgressStatus::Complete);
        assert_eq!(state.percent(), 0);
    }

    #[test]
    fn test_overall_progress() {
        let phase = phase_with("p", &["a", "b", "c", "d"]);
        let tasks = materialize(std::slice::from_ref(&phase), &Transaction::new());
        assert_eq!(overall_progress(&tasks).percent, 0);

        let tasks = replace_task(&tasks, "a", |t| set_completed(t, true));
        let overall = overall_progress(&tasks);
        assert_eq!(overall.completed, 1);
        assert_eq!(overall.enabled, 4);
        assert_eq!(overall.percent, 25);

        assert_eq!(overall_progress(&[]).percent, 0);
    }
}
