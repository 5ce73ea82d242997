//! Transaction domain models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle status of the purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionStatus {
    #[default]
    Draft,
    Active,
    Closed,
    Terminated,
}

impl TransactionStatus {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "draft" => Some(Self::Draft),
            "active" => Some(Self::Active),
            "closed" => Some(Self::Closed),
            "terminated" => Some(Self::Terminated),
            _ => None,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Closed => "closed",
            Self::Terminated => "terminated",
        }
    }
}

/// The single purchase being tracked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(default)]
    pub property_address: String,
    #[serde(default)]
    pub legal_description: String,
    #[serde(default)]
    pub purchase_price: f64,
    #[serde(default)]
    pub effective_date: Option<NaiveDate>,
    #[serde(default)]
    pub closing_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: TransactionStatus,
    pub created_at: String,
    pub updated_at: String,

    // Conditional flags
    #[serde(rename = "hasHOA", default)]
    pub has_hoa: bool,
    /// Financed purchase; `false` means cash.
    #[serde(default)]
    pub has_loan: bool,
    #[serde(default)]
    pub is_new_construction: bool,
}

impl Transaction {
    /// A blank draft transaction: financed, no HOA, resale.
    pub fn new() -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            property_address: String::new(),
            legal_description: String::new(),
            purchase_price: 0.0,
            effective_date: None,
            closing_date: None,
            status: TransactionStatus::Draft,
            created_at: now.clone(),
            updated_at: now,
            has_hoa: false,
            has_loan: true,
            is_new_construction: false,
        }
    }
}

impl Default for Transaction {
    fn default() -> Self {
        Self::new()
    }
}

/// Partial update of a transaction. Absent fields are left untouched.
///
/// Dates are doubly optional: `Some(None)` clears the date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionUpdate {
    pub property_address: Option<String>,
    pub legal_description: Option<String>,
    pub purchase_price: Option<f64>,
    pub effective_date: Option<Option<NaiveDate>>,
    pub closing_date: Option<Option<NaiveDate>>,
    pub status: Option<TransactionStatus>,
    pub has_hoa: Option<bool>,
    pub has_loan: Option<bool>,
    pub is_new_construction: Option<bool>,
}

impl TransactionUpdate {
    /// Whether the update names any of the condition flags.
    pub fn touches_flags(&self) -> bool {
        self.has_hoa.is_some() || self.has_loan.is_some() || self.is_new_construction.is_some()
    }

    /// Whether the update carries no fields at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge into `tx` and bump `updated_at`.
    ///
    /// Returns `true` when any condition flag was present in the update,
    /// whether or not its value actually changed.
    pub fn apply(&self, tx: &mut Transaction) -> bool {
        if let Some(v) = &self.property_address {
            tx.property_address = v.clone();
        }
        if let Some(v) = &self.legal_description {
            tx.legal_description = v.clone();
        }
        if let Some(v) = self.purchase_price {
            tx.purchase_price = v;
        }
        if let Some(v) = self.effective_date {
            tx.effective_date = v;
        }
        if let Some(v) = self.closing_date {
            tx.closing_date = v;
        }
        if let Some(v) = self.status {
            tx.status = v;
        }
        if let Some(v) = self.has_hoa {
            tx.has_hoa = v;
        }
        if let Some(v) = self.has_loan {
            tx.has_loan = v;
        }
        if let Some(v) = self.is_new_construction {
            tx.is_new_construction = v;
        }
        tx.updated_at = chrono::Utc::now().to_rfc3339();

        self.touches_flags()
    }
}
