//! Stakeholders: the people and companies involved in the purchase.

use serde::{Deserialize, Serialize};

/// Role a stakeholder plays in the transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StakeholderRole {
    Seller,
    SellerAgent,
    TitleCompany,
    Lender,
    Inspector,
    Appraiser,
    InsuranceAgent,
    Hoa,
    Other,
}

impl StakeholderRole {
    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "seller" => Some(Self::Seller),
            "seller_agent" => Some(Self::SellerAgent),
            "title_company" => Some(Self::TitleCompany),
            "lender" => Some(Self::Lender),
            "inspector" => Some(Self::Inspector),
            "appraiser" => Some(Self::Appraiser),
            "insurance_agent" => Some(Self::InsuranceAgent),
            "hoa" => Some(Self::Hoa),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seller => "seller",
            Self::SellerAgent => "seller_agent",
            Self::TitleCompany => "title_company",
            Self::Lender => "lender",
            Self::Inspector => "inspector",
            Self::Appraiser => "appraiser",
            Self::InsuranceAgent => "insurance_agent",
            Self::Hoa => "hoa",
            Self::Other => "other",
        }
    }
}

/// A user-entered contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stakeholder {
    pub id: String,
    pub transaction_id: String,
    pub role: StakeholderRole,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub notes: String,
}

impl Stakeholder {
    /// Name if given, otherwise the role label.
    pub fn display_name(&self) -> String {
        if self.name.is_empty() {
            crate::catalog::role_label(self.role).to_string()
        } else {
            self.name.clone()
        }
    }
}

/// Fields supplied when adding a stakeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStakeholder {
    pub role: StakeholderRole,
    pub name: String,
    pub company: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
}

impl NewStakeholder {
    /// Stakeholder with only a role and a name.
    pub fn named(role: StakeholderRole, name: &str) -> Self {
        Self {
            role,
            name: name.to_string(),
            company: String::new(),
            phone: String::new(),
            email: String::new(),
            notes: String::new(),
        }
    }

    pub(crate) fn into_stakeholder(self, transaction_id: &str) -> Stakeholder {
        Stakeholder {
            id: super::new_id(),
            transaction_id: transaction_id.to_string(),
            role: self.role,
            name: self.name,
            company: self.company,
            phone: self.phone,
            email: self.email,
            notes: self.notes,
        }
    }
}

/// Partial update of a stakeholder.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StakeholderUpdate {
    pub role: Option<StakeholderRole>,
    pub name: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

impl StakeholderUpdate {
    pub fn apply(&self, s: &Stakeholder) -> Stakeholder {
        let mut s = s.clone();
        if let Some(v) = self.role {
            s.role = v;
        }
        if let Some(v) = &self.name {
            s.name = v.clone();
        }
        if let Some(v) = &self.company {
            s.company = v.clone();
        }
        if let Some(v) = &self.phone {
            s.phone = v.clone();
        }
        if let Some(v) = &self.email {
            s.email = v.clone();
        }
        if let Some(v) = &self.notes {
            s.notes = v.clone();
        }
        s
    }
}
