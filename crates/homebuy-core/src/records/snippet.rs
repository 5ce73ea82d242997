//! Snippets: reusable text values mapped onto PDF form fields.

use serde::{Deserialize, Serialize};

/// Snippet grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SnippetCategory {
    Property,
    Buyer,
    Seller,
    Transaction,
    Custom,
}

impl SnippetCategory {
    pub const ALL: [SnippetCategory; 5] = [
        Self::Property,
        Self::Buyer,
        Self::Seller,
        Self::Transaction,
        Self::Custom,
    ];

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "property" => Some(Self::Property),
            "buyer" => Some(Self::Buyer),
            "seller" => Some(Self::Seller),
            "transaction" => Some(Self::Transaction),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }

    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Property => "property",
            Self::Buyer => "buyer",
            Self::Seller => "seller",
            Self::Transaction => "transaction",
            Self::Custom => "custom",
        }
    }

    /// Section heading for the category.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Property => "Property Info",
            Self::Buyer => "Buyer Info",
            Self::Seller => "Seller Info",
            Self::Transaction => "Transaction Info",
            Self::Custom => "Custom Snippets",
        }
    }
}

/// A reusable value such as the buyer's name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    pub id: String,
    pub transaction_id: String,
    pub category: SnippetCategory,
    pub label: String,
    #[serde(default)]
    pub value: String,
    /// PDF field names this snippet fills.
    #[serde(default)]
    pub pdf_field_mapping: Vec<String>,
}

/// Fields supplied when adding a snippet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSnippet {
    pub category: SnippetCategory,
    pub label: String,
    pub value: String,
    pub pdf_field_mapping: Vec<String>,
}

impl NewSnippet {
    pub(crate) fn into_snippet(self, transaction_id: &str) -> Snippet {
        Snippet {
            id: super::new_id(),
            transaction_id: transaction_id.to_string(),
            category: self.category,
            label: self.label,
            value: self.value,
            pdf_field_mapping: self.pdf_field_mapping,
        }
    }
}

/// Partial update of a snippet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnippetUpdate {
    pub category: Option<SnippetCategory>,
    pub label: Option<String>,
    pub value: Option<String>,
    pub pdf_field_mapping: Option<Vec<String>>,
}

impl SnippetUpdate {
    pub fn apply(&self, s: &Snippet) -> Snippet {
        let mut s = s.clone();
        if let Some(v) = self.category {
            s.category = v;
        }
        if let Some(v) = &self.label {
            s.label = v.clone();
        }
        if let Some(v) = &self.value {
            s.value = v.clone();
        }
        if let Some(v) = &self.pdf_field_mapping {
            s.pdf_field_mapping = v.clone();
        }
        s
    }
}
