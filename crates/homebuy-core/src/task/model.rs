//! Task domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::records::stakeholder::StakeholderRole;

/// Visual category of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    #[default]
    Action,
    Paperwork,
    Payment,
    Waiting,
}

impl TaskType {
    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Action => "action",
            Self::Paperwork => "paperwork",
            Self::Payment => "payment",
            Self::Waiting => "waiting",
        }
    }
}

/// Predicate deciding whether a task applies to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskCondition {
    HasHoa,
    HasLoan,
    IsNewConstruction,
    /// Informational label only; never disables a task.
    Custom { label: String },
}

impl TaskCondition {
    /// Create a custom condition.
    pub fn custom(label: impl Into<String>) -> Self {
        Self::Custom {
            label: label.into(),
        }
    }

    /// Short badge text shown next to conditional tasks.
    pub fn label(&self) -> &str {
        match self {
            Self::HasHoa => "IF HOA",
            Self::HasLoan => "IF LOAN",
            Self::IsNewConstruction => "IF NEW",
            Self::Custom { label } => label,
        }
    }
}

/// How a task's deadline is anchored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineType {
    FixedDate,
    DaysFromEffective,
    #[default]
    None,
}

/// Static task definition, part of a phase in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    pub instructions: Vec<String>,
    pub task_type: TaskType,
    pub depends_on: Vec<String>,
    pub external_dependency: Option<String>,
    pub user_time_estimate: String,
    pub external_wait_time: String,
    pub condition: Option<TaskCondition>,
    pub related_documents: Vec<String>,
    pub related_stakeholder_role: Option<StakeholderRole>,
    pub deadline_type: DeadlineType,
    pub deadline_days: Option<i64>,
}

impl TaskDefinition {
    /// Start a definition with no dependencies, condition or deadline.
    pub fn new(id: &str, title: &str, task_type: TaskType) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            instructions: Vec::new(),
            task_type,
            depends_on: Vec::new(),
            external_dependency: None,
            user_time_estimate: String::new(),
            external_wait_time: String::new(),
            condition: None,
            related_documents: Vec::new(),
            related_stakeholder_role: None,
            deadline_type: DeadlineType::None,
            deadline_days: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn with_instructions(mut self, steps: &[&str]) -> Self {
        self.instructions = steps.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_depends_on(mut self, ids: &[&str]) -> Self {
        self.depends_on = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_external(mut self, dependency: &str) -> Self {
        self.external_dependency = Some(dependency.to_string());
        self
    }

    pub fn with_timing(mut self, user: &str, wait: &str) -> Self {
        self.user_time_estimate = user.to_string();
        self.external_wait_time = wait.to_string();
        self
    }

    pub fn with_condition(mut self, condition: TaskCondition) -> Self {
        self.condition = Some(condition);
        self
    }

    pub fn with_documents(mut self, ids: &[&str]) -> Self {
        self.related_documents = ids.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn with_stakeholder(mut self, role: StakeholderRole) -> Self {
        self.related_stakeholder_role = Some(role);
        self
    }

    /// Due `days` calendar days after the effective date.
    pub fn due_after_effective(mut self, days: i64) -> Self {
        self.deadline_type = DeadlineType::DaysFromEffective;
        self.deadline_days = Some(days);
        self
    }
}

/// A live task: one per definition per transaction.
///
/// `is_enabled` and `depended_on_by` are derived; everything else under
/// "status" is user state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub phase_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub task_type: TaskType,

    // Status
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub skipped: bool,
    #[serde(default)]
    pub skipped_at: Option<String>,
    #[serde(default)]
    pub notes: String,

    // Dependencies (informational, never blocking)
    #[serde(default)]
    pub depends_on: Vec<String>,
    #[serde(default)]
    pub depended_on_by: Vec<String>,
    #[serde(default)]
    pub external_dependency: Option<String>,

    #[serde(default)]
    pub user_time_estimate: String,
    #[serde(default)]
    pub external_wait_time: String,

    #[serde(default)]
    pub condition: Option<TaskCondition>,
    #[serde(default = "default_enabled")]
    pub is_enabled: bool,

    #[serde(default)]
    pub related_documents: Vec<String>,
    #[serde(default)]
    pub related_stakeholder_role: Option<StakeholderRole>,

    #[serde(default)]
    pub deadline_type: DeadlineType,
    #[serde(default)]
    pub deadline_days: Option<i64>,
    #[serde(default)]
    pub deadline_date: Option<NaiveDate>,
}

fn default_enabled() -> bool {
    true
}

impl Task {
    /// Fresh, untouched task for a definition.
    pub fn from_definition(phase_id: &str, def: &TaskDefinition, is_enabled: bool) -> Self {
        Self {
            id: def.id.clone(),
            phase_id: phase_id.to_string(),
            title: def.title.clone(),
            description: def.description.clone(),
            instructions: def.instructions.clone(),
            task_type: def.task_type,
            completed: false,
            completed_at: None,
            skipped: false,
            skipped_at: None,
            notes: String::new(),
            depends_on: def.depends_on.clone(),
            depended_on_by: Vec::new(),
            external_dependency: def.external_dependency.clone(),
            user_time_estimate: def.user_time_estimate.clone(),
            external_wait_time: def.external_wait_time.clone(),
            condition: def.condition.clone(),
            is_enabled,
            related_documents: def.related_documents.clone(),
            related_stakeholder_role: def.related_stakeholder_role,
            deadline_type: def.deadline_type,
            deadline_days: def.deadline_days,
            deadline_date: None,
        }
    }

    /// Skipped and still open.
    pub fn is_skipped_open(&self) -> bool {
        self.skipped && !self.completed
    }
}
