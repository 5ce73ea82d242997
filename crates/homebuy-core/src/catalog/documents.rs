use super::{DocumentDefinition, PdfFieldMapping};
use crate::records::snippet::SnippetCategory;
use crate::task::model::TaskCondition;

fn field(pdf_field_name: &str, category: SnippetCategory, label: &str, description: &str) -> PdfFieldMapping {
    PdfFieldMapping {
        pdf_field_name: pdf_field_name.to_string(),
        snippet_category: category,
        snippet_label: label.to_string(),
        description: description.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn document(
    id: &str,
    name: &str,
    form: &str,
    url_slug: &str,
    pdf: &str,
    description: &str,
    phase_id: &str,
    is_required: bool,
    condition: Option<TaskCondition>,
    form_fields: Vec<PdfFieldMapping>,
) -> DocumentDefinition {
    DocumentDefinition {
        id: id.to_string(),
        name: name.to_string(),
        trec_form_number: Some(form.to_string()),
        official_url: format!("https://www.trec.texas.gov/forms/{}", url_slug),
        local_pdf_path: format!("/pdfs/{}.pdf", pdf),
        description: description.to_string(),
        phase_id: phase_id.to_string(),
        is_required,
        condition,
        form_fields,
    }
}

pub(super) fn build() -> Vec<DocumentDefinition> {
    use SnippetCategory::{Buyer, Property, Transaction};

    vec![
        document(
            "trec-contract",
            "One to Four Family Residential Contract (Resale)",
            "TREC 20-17",
            "one-four-family-residential-contract-resale",
            "trec-20-17",
            "The main contract form for purchasing a resale home in Texas",
            "offer-submit",
            true,
            None,
            vec![
                field("PropertyAddress", Property, "Property Address", "Full street address of property"),
                field("LegalDescription", Property, "Legal Description", "Legal description from deed or tax records"),
                field("BuyerName", Buyer, "Full Name", "Buyer full legal name"),
                field("BuyerAddress", Buyer, "Mailing Address", "Buyer current mailing address"),
                field("SalesPrice", Transaction, "Purchase Price", "Total purchase price"),
            ],
        ),
        document(
            "financing-addendum",
            "Third Party Financing Addendum",
            "TREC 40-9",
            "third-party-financing-addendum",
            "trec-40-9",
            "Required addendum when using a mortgage loan to purchase",
            "offer-submit",
            false,
            Some(TaskCondition::HasLoan),
            vec![field("LoanAmount", Transaction, "Loan Amount", "Mortgage loan amount")],
        ),
        document(
            "hoa-addendum",
            "Addendum for Property Subject to Mandatory Membership in HOA",
            "TREC 36-9",
            "addendum-property-subject-mandatory-membership-owners-association",
            "trec-36-9",
            "Required addendum when property is in an HOA",
            "offer-submit",
            false,
            Some(TaskCondition::HasHoa),
            Vec::new(),
        ),
        document(
            "amendment",
            "Amendment to Contract",
            "TREC 39-10",
            "amendment",
            "trec-39-10",
            "Used to make changes to the contract after execution (repairs, extensions, etc.)",
            "option-period",
            false,
            None,
            vec![field("PropertyAddress", Property, "Property Address", "Property address from original contract")],
        ),
        document(
            "termination-notice",
            "Notice of Buyer Termination of Contract",
            "TREC 38-6",
            "notice-buyers-termination-contract",
            "trec-38-6",
            "Form to terminate contract during option period",
            "option-period",
            false,
            None,
            Vec::new(),
        ),
        document(
            "sellers-disclosure",
            "Seller's Disclosure Notice",
            "TREC OP-H",
            "sellers-disclosure-notice",
            "trec-op-h",
            "Seller's disclosure of known property conditions",
            "pre-offer",
            true,
            None,
            Vec::new(),
        ),
    ]
}
