//! Communication log entries with stakeholders.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Channel of a logged communication.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationType {
    #[default]
    Call,
    Email,
    Text,
    InPerson,
    Other,
}

impl CommunicationType {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "call" => Some(Self::Call),
            "email" => Some(Self::Email),
            "text" => Some(Self::Text),
            "in_person" => Some(Self::InPerson),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Call => "Phone Call",
            Self::Email => "Email",
            Self::Text => "Text Message",
            Self::InPerson => "In Person",
            Self::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationLog {
    pub id: String,
    pub transaction_id: String,
    pub stakeholder_id: String,
    #[serde(default)]
    pub task_id: Option<String>,
    pub date: NaiveDate,
    #[serde(rename = "type", default)]
    pub kind: CommunicationType,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub follow_up_needed: bool,
    #[serde(default)]
    pub follow_up_date: Option<NaiveDate>,
}

/// Fields supplied when logging a communication.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCommunicationLog {
    pub stakeholder_id: String,
    pub task_id: Option<String>,
    pub date: NaiveDate,
    pub kind: CommunicationType,
    pub summary: String,
    pub follow_up_needed: bool,
    pub follow_up_date: Option<NaiveDate>,
}

impl NewCommunicationLog {
    pub(crate) fn into_log(self, transaction_id: &str) -> CommunicationLog {
        CommunicationLog {
            id: super::new_id(),
            transaction_id: transaction_id.to_string(),
            stakeholder_id: self.stakeholder_id,
            task_id: self.task_id,
            date: self.date,
            kind: self.kind,
            summary: self.summary,
            follow_up_needed: self.follow_up_needed,
            follow_up_date: self.follow_up_date,
        }
    }
}

/// Partial update of a log entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommunicationLogUpdate {
    pub task_id: Option<Option<String>>,
    pub date: Option<NaiveDate>,
    pub kind: Option<CommunicationType>,
    pub summary: Option<String>,
    pub follow_up_needed: Option<bool>,
    pub follow_up_date: Option<Option<NaiveDate>>,
}

impl CommunicationLogUpdate {
    pub fn apply(&self, log: &CommunicationLog) -> CommunicationLog {
        let mut log = log.clone();
        if let Some(v) = &self.task_id {
            log.task_id = v.clone();
        }
        if let Some(v) = self.date {
            log.date = v;
        }
        if let Some(v) = self.kind {
            log.kind = v;
        }
        if let Some(v) = &self.summary {
            log.summary = v.clone();
        }
        if let Some(v) = self.follow_up_needed {
            log.follow_up_needed = v;
        }
        if let Some(v) = self.follow_up_date {
            log.follow_up_date = v;
        }
        log
    }
}

/// Entries still needing a follow-up, earliest follow-up date first.
/// Entries without a follow-up date sort last, in log order.
pub fn pending_follow_ups(logs: &[CommunicationLog]) -> Vec<&CommunicationLog> {
    let mut pending: Vec<&CommunicationLog> =
        logs.iter().filter(|l| l.follow_up_needed).collect();
    pending.sort_by_key(|l| (l.follow_up_date.is_none(), l.follow_up_date));
    pending
}
