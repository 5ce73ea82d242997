//! Static reference data: phases, stages, documents, snippet templates
//! and stakeholder roles. Built once, never mutated.

mod documents;
mod phases;
mod roles;
mod snippets;
mod stages;

use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

use crate::records::snippet::SnippetCategory;
use crate::records::stakeholder::StakeholderRole;
use crate::task::condition::{evaluate, ConditionFlags};
use crate::task::model::{TaskCondition, TaskDefinition};

/// Identifier of one of the four navigation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StageId {
    OfferPrep,
    OptionPeriod,
    LoanTitle,
    Closing,
}

impl StageId {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "offer-prep" => Some(Self::OfferPrep),
            "option-period" => Some(Self::OptionPeriod),
            "loan-title" => Some(Self::LoanTitle),
            "closing" => Some(Self::Closing),
            _ => None,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OfferPrep => "offer-prep",
            Self::OptionPeriod => "option-period",
            Self::LoanTitle => "loan-title",
            Self::Closing => "closing",
        }
    }
}

/// An ordered phase of the purchase with its task definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseDefinition {
    pub id: String,
    pub number: u32,
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub stage_id: StageId,
    /// Typical window, in days relative to the effective date.
    pub typical_days_start: i64,
    pub typical_days_end: i64,
    pub tasks: Vec<TaskDefinition>,
}

/// A coarse grouping of phases for navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    pub id: StageId,
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub phase_ids: Vec<String>,
    pub order: u32,
}

impl Stage {
    pub fn contains_phase(&self, phase_id: &str) -> bool {
        self.phase_ids.iter().any(|p| p == phase_id)
    }
}

/// Maps a PDF form field onto a snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfFieldMapping {
    pub pdf_field_name: String,
    pub snippet_category: SnippetCategory,
    pub snippet_label: String,
    pub description: String,
}

/// A standard form used during the purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentDefinition {
    pub id: String,
    pub name: String,
    pub trec_form_number: Option<String>,
    pub official_url: String,
    pub local_pdf_path: String,
    pub description: String,
    pub phase_id: String,
    pub is_required: bool,
    pub condition: Option<TaskCondition>,
    pub form_fields: Vec<PdfFieldMapping>,
}

/// Seed for the default snippets of a new transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct SnippetTemplate {
    pub category: SnippetCategory,
    pub label: String,
    pub default_value: String,
    pub pdf_field_mapping: Vec<String>,
}

/// Display information for a stakeholder role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleInfo {
    pub role: StakeholderRole,
    pub label: &'static str,
    pub description: &'static str,
}

static PHASES: LazyLock<Vec<PhaseDefinition>> = LazyLock::new(phases::build);
static STAGES: LazyLock<Vec<Stage>> = LazyLock::new(stages::build);
static DOCUMENTS: LazyLock<Vec<DocumentDefinition>> = LazyLock::new(documents::build);
static SNIPPET_TEMPLATES: LazyLock<Vec<SnippetTemplate>> = LazyLock::new(snippets::build);

/// All phases, in order.
pub fn phases() -> &'static [PhaseDefinition] {
    &PHASES
}

/// All stages, in order.
pub fn stages() -> &'static [Stage] {
    &STAGES
}

/// All document definitions.
pub fn documents() -> &'static [DocumentDefinition] {
    &DOCUMENTS
}

/// Default snippet templates.
pub fn snippet_templates() -> &'static [SnippetTemplate] {
    &SNIPPET_TEMPLATES
}

/// All stakeholder roles with labels.
pub fn stakeholder_roles() -> &'static [RoleInfo] {
    roles::ROLES
}

pub fn phase(id: &str) -> Option<&'static PhaseDefinition> {
    phases().iter().find(|p| p.id == id)
}

pub fn stage(id: StageId) -> Option<&'static Stage> {
    stages().iter().find(|s| s.id == id)
}

/// The stage listing `phase_id`, if any.
pub fn stage_for_phase(phase_id: &str) -> Option<&'static Stage> {
    stages().iter().find(|s| s.contains_phase(phase_id))
}

pub fn document(id: &str) -> Option<&'static DocumentDefinition> {
    documents().iter().find(|d| d.id == id)
}

pub fn documents_for_phase(phase_id: &str) -> Vec<&'static DocumentDefinition> {
    documents().iter().filter(|d| d.phase_id == phase_id).collect()
}

/// Documents of one phase whose condition holds for the given flags.
pub fn applicable_documents_for_phase(
    phase_id: &str,
    flags: ConditionFlags,
) -> Vec<&'static DocumentDefinition> {
    documents_for_phase(phase_id)
        .into_iter()
        .filter(|d| evaluate(d.condition.as_ref(), flags))
        .collect()
}

/// Documents whose condition holds for the given flags, in phase order.
pub fn applicable_documents(flags: ConditionFlags) -> Vec<&'static DocumentDefinition> {
    phases()
        .iter()
        .flat_map(|p| applicable_documents_for_phase(&p.id, flags))
        .collect()
}

/// Human label for a role.
pub fn role_label(role: StakeholderRole) -> &'static str {
    stakeholder_roles()
        .iter()
        .find(|r| r.role == role)
        .map(|r| r.label)
        .unwrap_or_else(|| role.as_str())
}
