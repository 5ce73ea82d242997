//! Deadline resolution and urgency tagging.

use chrono::{Days, NaiveDate};
use serde::Serialize;

use crate::catalog::{self, StageId};
use crate::task::model::{DeadlineType, Task};

/// Urgency thresholds, in days from today (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineWindow {
    pub urgent_days: i64,
    pub upcoming_days: i64,
}

impl Default for DeadlineWindow {
    fn default() -> Self {
        Self {
            urgent_days: 3,
            upcoming_days: 7,
        }
    }
}

/// An open task with a resolved due date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeadlineItem {
    pub task_id: String,
    pub task_title: String,
    pub stage_id: StageId,
    pub stage_name: String,
    pub deadline_date: NaiveDate,
    /// Negative when overdue.
    pub days_until: i64,
    pub is_urgent: bool,
    pub is_upcoming: bool,
}

/// Absolute due date of a task, if it has one.
///
/// `days_from_effective` needs both an effective date and a day offset;
/// `fixed_date` needs a stored date.
pub fn resolve_deadline(task: &Task, effective_date: Option<NaiveDate>) -> Option<NaiveDate> {
    match task.deadline_type {
        DeadlineType::None => None,
        DeadlineType::FixedDate => task.deadline_date,
        DeadlineType::DaysFromEffective => {
            let effective = effective_date?;
            let days = task.deadline_days?;
            if days >= 0 {
                effective.checked_add_days(Days::new(days.unsigned_abs()))
            } else {
                effective.checked_sub_days(Days::new(days.unsigned_abs()))
            }
        }
    }
}

/// Enabled, open tasks with a deadline, soonest first.
///
/// Returns nothing until an effective date is set. Tasks whose phase
/// belongs to no stage are dropped. Ties keep task-list order.
pub fn upcoming_deadlines(
    tasks: &[Task],
    effective_date: Option<NaiveDate>,
    today: NaiveDate,
    window: DeadlineWindow,
) -> Vec<DeadlineItem> {
    if effective_date.is_none() {
        return Vec::new();
    }

    let mut items: Vec<DeadlineItem> = tasks
        .iter()
        .filter(|t| t.is_enabled && !t.completed && t.deadline_type != DeadlineType::None)
        .filter_map(|task| {
            let deadline_date = resolve_deadline(task, effective_date)?;
            let stage = catalog::stage_for_phase(&task.phase_id)?;
            let days_until = (deadline_date - today).num_days();

            Some(DeadlineItem {
                task_id: task.id.clone(),
                task_title: task.title.clone(),
                stage_id: stage.id,
                stage_name: stage.short_name.clone(),
                deadline_date,
                days_until,
                is_urgent: days_until <= window.urgent_days,
                is_upcoming: days_until <= window.upcoming_days,
            })
        })
        .collect();

    items.sort_by_key(|item| item.deadline_date);
    items
}

/// Relative wording for a day count.
pub fn days_until_text(days: i64) -> String {
    match days {
        d if d < -1 => format!("{} days overdue", -d),
        -1 => "1 day overdue".to_string(),
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        d => format!("in {} days", d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::model::TaskDefinition;
    use crate::task::model::TaskType;
    use crate::task::{materialize, replace_task, set_completed};
    use crate::transaction::Transaction;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn task_due(id: &str, phase_id: &str, days: i64) -> Task {
        let def = TaskDefinition::new(id, id, TaskType::Action).due_after_effective(days);
        Task::from_definition(phase_id, &def, true)
    }

    #[test]
    fn test_days_from_effective_example() {
        let tasks = vec![task_due("t", "option-period", 10)];
        let items = upcoming_deadlines(
            &tasks,
            Some(date(2024, 1, 1)),
            date(2024, 1, 9),
            DeadlineWindow::default(),
        );

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].deadline_date, date(2024, 1, 11));
        assert_eq!(items[0].days_until, 2);
        assert!(items[0].is_urgent);
        assert!(items[0].is_upcoming);
        assert_eq!(items[0].stage_id, StageId::OptionPeriod);
    }

    #[test]
    fn test_urgency_boundaries() {
        let effective = date(2024, 1, 1);
        let tasks: Vec<Task> = [3, 4, 7, 8]
            .iter()
            .map(|d| task_due(&format!("t{}", d), "execution", *d))
            .collect();
        let items = upcoming_deadlines(&tasks, Some(effective), effective, DeadlineWindow::default());

        let flags: Vec<(i64, bool, bool)> = items
            .iter()
            .map(|i| (i.days_until, i.is_urgent, i.is_upcoming))
            .collect();
        assert_eq!(
            flags,
            vec![(3, true, true), (4, false, true), (7, false, true), (8, false, false)]
        );
    }

    #[test]
    fn test_overdue_is_urgent() {
        let tasks = vec![task_due("t", "execution", 1)];
        let items = upcoming_deadlines(
            &tasks,
            Some(date(2024, 1, 1)),
            date(2024, 1, 10),
            DeadlineWindow::default(),
        );
        assert_eq!(items[0].days_until, -8);
        assert!(items[0].is_urgent);
    }

    #[test]
    fn test_no_effective_date_yields_nothing() {
        let tasks = vec![task_due("t", "execution", 1)];
        assert!(upcoming_deadlines(&tasks, None, date(2024, 1, 1), DeadlineWindow::default())
            .is_empty());
    }

    #[test]
    fn test_filters_and_sorting() {
        let mut fixed = task_due("fixed", "closing", 0);
        fixed.deadline_type = DeadlineType::FixedDate;
        fixed.deadline_date = Some(date(2024, 1, 3));
        let mut undated = task_due("undated", "closing", 0);
        undated.deadline_type = DeadlineType::FixedDate;
        let mut disabled = task_due("disabled", "closing", 1);
        disabled.is_enabled = false;
        let mut done = task_due("done", "closing", 1);
        done.completed = true;

        let tasks = vec![
            task_due("late", "closing", 20),
            task_due("orphan", "nowhere", 1),
            task_due("tie-a", "execution", 5),
            fixed,
            undated,
            disabled,
            done,
            task_due("tie-b", "option-period", 5),
        ];
        let items = upcoming_deadlines(
            &tasks,
            Some(date(2024, 1, 1)),
            date(2024, 1, 1),
            DeadlineWindow::default(),
        );

        let ids: Vec<&str> = items.iter().map(|i| i.task_id.as_str()).collect();
        assert_eq!(ids, vec!["fixed", "tie-a", "tie-b", "late"]);
        assert!(items.windows(2).all(|w| w[0].deadline_date <= w[1].deadline_date));
    }

    #[test]
    fn test_custom_window() {
        let tasks = vec![task_due("t", "execution", 5)];
        let window = DeadlineWindow {
            urgent_days: 5,
            upcoming_days: 10,
        };
        let items = upcoming_deadlines(&tasks, Some(date(2024, 1, 1)), date(2024, 1, 1), window);
        assert!(items[0].is_urgent);
    }

    #[test]
    fn test_catalog_deadlines_drop_completed() {
        let tasks = materialize(catalog::phases(), &Transaction::new());
        let effective = Some(date(2024, 3, 1));
        let today = date(2024, 3, 1);
        let all = upcoming_deadlines(&tasks, effective, today, DeadlineWindow::default());
        assert!(!all.is_empty());

        let first = all[0].task_id.clone();
        let tasks = replace_task(&tasks, &first, |t| set_completed(t, true));
        let remaining = upcoming_deadlines(&tasks, effective, today, DeadlineWindow::default());
        assert_eq!(remaining.len(), all.len() - 1);
        assert!(remaining.iter().all(|i| i.task_id != first));
    }

    #[test]
    fn test_days_until_text() {
        assert_eq!(days_until_text(-3), "3 days overdue");
        assert_eq!(days_until_text(-1), "1 day overdue");
        assert_eq!(days_until_text(0), "Today");
        assert_eq!(days_until_text(1), "Tomorrow");
        assert_eq!(days_until_text(6), "in 6 days");
    }
}
