//! Task condition evaluation.

use super::model::TaskCondition;
use crate::transaction::model::Transaction;

/// The transaction flags conditions are evaluated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConditionFlags {
    pub has_hoa: bool,
    pub has_loan: bool,
    pub is_new_construction: bool,
}

impl From<&Transaction> for ConditionFlags {
    fn from(tx: &Transaction) -> Self {
        Self {
            has_hoa: tx.has_hoa,
            has_loan: tx.has_loan,
            is_new_construction: tx.is_new_construction,
        }
    }
}

/// Whether a task with `condition` applies under `flags`.
///
/// Unconditional tasks always apply. Custom conditions are labels only and
/// always evaluate to enabled.
pub fn evaluate(condition: Option<&TaskCondition>, flags: ConditionFlags) -> bool {
    match condition {
        None => true,
        Some(TaskCondition::HasHoa) => flags.has_hoa,
        Some(TaskCondition::HasLoan) => flags.has_loan,
        Some(TaskCondition::IsNewConstruction) => flags.is_new_construction,
        Some(TaskCondition::Custom { .. }) => true,
    }
}
