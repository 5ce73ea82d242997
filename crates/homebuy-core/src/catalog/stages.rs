use super::{Stage, StageId};

const STAGES: &[(StageId, &str, &str, &str, &[&str])] = &[
    (
        StageId::OfferPrep,
        "Offer Preparation",
        "Offer Prep",
        "Get ready and submit your offer",
        &["pre-offer", "offer-submit", "execution"],
    ),
    (
        StageId::OptionPeriod,
        "Option Period",
        "Option Period",
        "Inspect the property and negotiate",
        &["option-period"],
    ),
    (
        StageId::LoanTitle,
        "Loan & Title",
        "Loan & Title",
        "Financing approval and title work",
        &["loan-process", "title-process"],
    ),
    (
        StageId::Closing,
        "Closing",
        "Closing",
        "Final steps and getting the keys",
        &["pre-closing", "closing", "post-closing"],
    ),
];

pub(super) fn build() -> Vec<Stage> {
    STAGES
        .iter()
        .enumerate()
        .map(|(i, (id, name, short_name, description, phase_ids))| Stage {
            id: *id,
            name: name.to_string(),
            short_name: short_name.to_string(),
            description: description.to_string(),
            phase_ids: phase_ids.iter().map(|p| p.to_string()).collect(),
            order: i as u32 + 1,
        })
        .collect()
}
