use super::SnippetTemplate;
use crate::records::snippet::SnippetCategory;

use SnippetCategory::{Buyer, Property, Seller, Transaction};

const TEMPLATES: &[(SnippetCategory, &str, &str, &[&str])] = &[
    (Property, "Property Address", "", &["PropertyAddress"]),
    (Property, "City, State, ZIP", "", &["PropertyCityStateZip"]),
    (Property, "Legal Description", "", &["LegalDescription"]),
    (Property, "County", "", &["County"]),
    (Buyer, "Full Name", "", &["BuyerName", "Buyer1Name"]),
    (Buyer, "Mailing Address", "", &["BuyerAddress", "BuyerMailingAddress"]),
    (Buyer, "Phone", "", &["BuyerPhone"]),
    (Buyer, "Email", "", &["BuyerEmail"]),
    (Seller, "Full Name", "", &["SellerName", "Seller1Name"]),
    (Seller, "Mailing Address", "", &["SellerAddress"]),
    (Transaction, "Purchase Price", "", &["SalesPrice", "PurchasePrice"]),
    (Transaction, "Earnest Money", "", &["EarnestMoney"]),
    (Transaction, "Option Fee", "", &["OptionFee"]),
    (Transaction, "Option Period Days", "10", &["OptionPeriodDays"]),
    (Transaction, "Loan Amount", "", &["LoanAmount"]),
    (Transaction, "Down Payment", "", &["DownPayment"]),
];

pub(super) fn build() -> Vec<SnippetTemplate> {
    TEMPLATES
        .iter()
        .map(|(category, label, default_value, fields)| SnippetTemplate {
            category: *category,
            label: label.to_string(),
            default_value: default_value.to_string(),
            pdf_field_mapping: fields.iter().map(|f| f.to_string()).collect(),
        })
        .collect()
}
