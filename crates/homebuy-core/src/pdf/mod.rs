//! Field values handed to the PDF form filler.
//!
//! Filling the form itself happens outside this crate; here we only
//! decide which snippet value goes into which named field.

use std::collections::BTreeMap;

use crate::catalog::{self, DocumentDefinition};
use crate::records::Snippet;
use crate::task::model::Task;

/// Values for a document's mapped form fields.
///
/// Each field takes the first snippet with the mapped category and label.
/// Fields with no such snippet, or whose snippet is empty, are left out.
pub fn field_values(document: &DocumentDefinition, snippets: &[Snippet]) -> BTreeMap<String, String> {
    document
        .form_fields
        .iter()
        .filter_map(|field| {
            let snippet = snippets.iter().find(|s| {
                s.category == field.snippet_category && s.label == field.snippet_label
            })?;
            (!snippet.value.is_empty())
                .then(|| (field.pdf_field_name.clone(), snippet.value.clone()))
        })
        .collect()
}

/// Values keyed by every field name listed on the snippets themselves.
///
/// When two snippets name the same field, the first one wins.
pub fn snippet_field_values(snippets: &[Snippet]) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();
    for snippet in snippets.iter().filter(|s| !s.value.is_empty()) {
        for field in &snippet.pdf_field_mapping {
            values
                .entry(field.clone())
                .or_insert_with(|| snippet.value.clone());
        }
    }
    values
}

/// Everything to hand the form filler for `document`.
///
/// Starts from the snippets' own field lists; the document's mappings
/// take precedence where both name a field.
pub fn form_values(document: &DocumentDefinition, snippets: &[Snippet]) -> BTreeMap<String, String> {
    let mut values = snippet_field_values(snippets);
    values.extend(field_values(document, snippets));
    values
}

/// First catalog document a task refers to.
pub fn document_for_task(task: &Task) -> Option<&'static DocumentDefinition> {
    task.related_documents
        .iter()
        .find_map(|id| catalog::document(id))
}
