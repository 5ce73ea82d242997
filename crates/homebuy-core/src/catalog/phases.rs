use super::{PhaseDefinition, StageId};
use crate::records::stakeholder::StakeholderRole as Role;
use crate::task::model::TaskCondition::{HasHoa, HasLoan, IsNewConstruction};
use crate::task::model::TaskType::{Action, Paperwork, Payment, Waiting};
use crate::task::model::{TaskCondition, TaskDefinition as Def};

/// Option period length assumed by the deadline offsets below.
const OPTION_DAYS: i64 = 10;

#[allow(clippy::too_many_arguments)]
fn phase(
    id: &str,
    number: u32,
    name: &str,
    short_name: &str,
    description: &str,
    stage_id: StageId,
    days: (i64, i64),
    tasks: Vec<Def>,
) -> PhaseDefinition {
    PhaseDefinition {
        id: id.to_string(),
        number,
        name: name.to_string(),
        short_name: short_name.to_string(),
        description: description.to_string(),
        stage_id,
        typical_days_start: days.0,
        typical_days_end: days.1,
        tasks,
    }
}

pub(super) fn build() -> Vec<PhaseDefinition> {
    vec![
        phase(
            "pre-offer",
            1,
            "Pre-Offer Preparation",
            "Pre-Offer",
            "Line up financing and learn everything you can about the property",
            StageId::OfferPrep,
            (-30, -7),
            vec![
                Def::new("review-budget", "Set your budget", Action)
                    .with_description("Decide the maximum you are willing to pay, including closing costs")
                    .with_instructions(&[
                        "Add up savings available for down payment, earnest money and option fee",
                        "Budget 2-5% of the price for closing costs",
                        "Leave a cushion for moving and immediate repairs",
                    ])
                    .with_timing("1-2 hours", "none"),
                Def::new("get-preapproval", "Get mortgage pre-approval", Paperwork)
                    .with_description("Obtain a pre-approval letter to submit with your offer")
                    .with_instructions(&[
                        "Contact two or three lenders for quotes",
                        "Provide pay stubs, W-2s, tax returns and bank statements",
                        "Ask for a pre-approval letter for your target price",
                    ])
                    .with_depends_on(&["review-budget"])
                    .with_external("Lender underwriting review")
                    .with_timing("2-3 hours", "1-3 days")
                    .with_condition(HasLoan)
                    .with_stakeholder(Role::Lender),
                Def::new("proof-of-funds", "Gather proof of funds", Paperwork)
                    .with_description("Bank or brokerage statement showing cash for the full price")
                    .with_instructions(&[
                        "Download a recent statement from each account you will draw from",
                        "Redact account numbers except the last four digits",
                    ])
                    .with_depends_on(&["review-budget"])
                    .with_timing("30 min", "same day")
                    .with_condition(TaskCondition::custom("IF CASH")),
                Def::new("research-neighborhood", "Research the neighborhood", Action)
                    .with_description("Check schools, commute, flood zones and comparable sales")
                    .with_instructions(&[
                        "Look up recent sales of similar homes nearby",
                        "Check the FEMA flood map for the address",
                        "Drive the area at different times of day",
                    ])
                    .with_timing("2-4 hours", "none"),
                Def::new("tour-property", "Tour the property", Action)
                    .with_description("See the home in person and note visible issues")
                    .with_depends_on(&["research-neighborhood"])
                    .with_external("Showing appointment with listing agent")
                    .with_timing("1 hour", "1-2 days")
                    .with_stakeholder(Role::SellerAgent),
                Def::new("review-sellers-disclosure", "Review Seller's Disclosure", Paperwork)
                    .with_description("Read the seller's disclosure of known defects before making an offer")
                    .with_instructions(&[
                        "Request the disclosure from the listing agent",
                        "Note past repairs, water damage and foundation work",
                    ])
                    .with_depends_on(&["tour-property"])
                    .with_timing("30 min", "same day")
                    .with_documents(&["sellers-disclosure"])
                    .with_stakeholder(Role::SellerAgent),
                Def::new("review-hoa-rules", "Review HOA rules and dues", Paperwork)
                    .with_description("Understand deed restrictions, dues and special assessments")
                    .with_timing("1 hour", "none")
                    .with_condition(HasHoa)
                    .with_stakeholder(Role::Hoa),
                Def::new("research-builder", "Research the builder", Action)
                    .with_description("Check the builder's reputation, warranty and past projects")
                    .with_timing("1-2 hours", "none")
                    .with_condition(IsNewConstruction),
            ],
        ),
        phase(
            "offer-submit",
            2,
            "Offer Submission",
            "Offer",
            "Prepare the contract and addenda and submit your offer",
            StageId::OfferPrep,
            (-7, 0),
            vec![
                Def::new("determine-offer-price", "Determine your offer price", Action)
                    .with_description("Pick a price and terms based on comparable sales")
                    .with_depends_on(&["review-budget", "tour-property"])
                    .with_timing("1 hour", "none"),
                Def::new("fill-contract", "Fill out the resale contract", Paperwork)
                    .with_description("Complete TREC 20-17 with price, earnest money, option fee and dates")
                    .with_instructions(&[
                        "Use snippets to fill property and buyer information",
                        "Choose the option period length and option fee",
                        "Pick a title company and closing date",
                    ])
                    .with_depends_on(&["determine-offer-price"])
                    .with_timing("1-2 hours", "none")
                    .with_documents(&["trec-contract"]),
                Def::new("fill-financing-addendum", "Fill out the financing addendum", Paperwork)
                    .with_description("Complete TREC 40-9 describing your loan")
                    .with_depends_on(&["fill-contract", "get-preapproval"])
                    .with_timing("30 min", "none")
                    .with_condition(HasLoan)
                    .with_documents(&["financing-addendum"]),
                Def::new("fill-hoa-addendum", "Fill out the HOA addendum", Paperwork)
                    .with_description("Complete TREC 36-9 for mandatory HOA membership")
                    .with_depends_on(&["fill-contract"])
                    .with_timing("20 min", "none")
                    .with_condition(HasHoa)
                    .with_documents(&["hoa-addendum"]),
                Def::new("submit-offer", "Submit the offer", Action)
                    .with_description("Send the signed contract and addenda to the listing agent")
                    .with_depends_on(&["fill-contract"])
                    .with_external("Seller response")
                    .with_timing("15 min", "1-3 days")
                    .with_stakeholder(Role::SellerAgent),
                Def::new("negotiate-counter", "Negotiate counter-offers", Waiting)
                    .with_description("Respond to counter-offers until both sides agree")
                    .with_depends_on(&["submit-offer"])
                    .with_timing("varies", "1-5 days")
                    .with_stakeholder(Role::SellerAgent),
            ],
        ),
        phase(
            "execution",
            3,
            "Contract Execution",
            "Execution",
            "The contract is signed by all parties and the clock starts",
            StageId::OfferPrep,
            (0, 3),
            vec![
                Def::new("receive-executed-contract", "Receive the executed contract", Waiting)
                    .with_description("Get the fully signed contract with the effective date filled in")
                    .with_depends_on(&["submit-offer"])
                    .with_timing("5 min", "same day")
                    .with_stakeholder(Role::SellerAgent),
                Def::new("record-effective-date", "Record the effective date", Action)
                    .with_description("Enter the effective date so every deadline can be computed")
                    .with_depends_on(&["receive-executed-contract"])
                    .with_timing("5 min", "none"),
                Def::new("deliver-earnest-money", "Deliver earnest money", Payment)
                    .with_description("Deliver earnest money to the title company")
                    .with_instructions(&[
                        "Call the title company to confirm wiring instructions by phone",
                        "Wire or deliver a cashier's check",
                        "Get a receipt",
                    ])
                    .with_depends_on(&["receive-executed-contract"])
                    .with_timing("30 min", "same day")
                    .with_stakeholder(Role::TitleCompany)
                    .due_after_effective(3),
                Def::new("deliver-option-fee", "Deliver option fee", Payment)
                    .with_description("Pay the option fee to the seller through the title company")
                    .with_depends_on(&["receive-executed-contract"])
                    .with_timing("15 min", "same day")
                    .with_stakeholder(Role::TitleCompany)
                    .due_after_effective(3),
                Def::new("send-contract-to-title", "Send contract to the title company", Paperwork)
                    .with_description("Open title with the executed contract")
                    .with_depends_on(&["receive-executed-contract"])
                    .with_timing("15 min", "1 day")
                    .with_stakeholder(Role::TitleCompany),
                Def::new("send-contract-to-lender", "Send contract to your lender", Paperwork)
                    .with_description("Start the loan file with the executed contract")
                    .with_depends_on(&["receive-executed-contract"])
                    .with_timing("15 min", "1 day")
                    .with_condition(HasLoan)
                    .with_stakeholder(Role::Lender),
            ],
        ),
        phase(
            "option-period",
            4,
            "Option Period",
            "Option",
            "Inspect, negotiate repairs, or walk away with only the option fee at risk",
            StageId::OptionPeriod,
            (0, OPTION_DAYS),
            vec![
                Def::new("schedule-inspection", "Schedule the home inspection", Action)
                    .with_description("Book a licensed inspector early in the option period")
                    .with_depends_on(&["receive-executed-contract"])
                    .with_timing("20 min", "1-3 days")
                    .with_stakeholder(Role::Inspector)
                    .due_after_effective(2),
                Def::new("attend-inspection", "Attend the inspection", Action)
                    .with_description("Walk the property with the inspector")
                    .with_depends_on(&["schedule-inspection"])
                    .with_timing("2-4 hours", "none")
                    .with_stakeholder(Role::Inspector),
                Def::new("review-inspection-report", "Review the inspection report", Paperwork)
                    .with_description("Sort findings into safety issues, repairs and cosmetic items")
                    .with_depends_on(&["attend-inspection"])
                    .with_external("Inspector report delivery")
                    .with_timing("1-2 hours", "1-2 days"),
                Def::new("builder-inspection", "Schedule phased builder inspections", Action)
                    .with_description("Arrange pre-drywall and final inspections with the builder")
                    .with_depends_on(&["schedule-inspection"])
                    .with_timing("30 min", "varies")
                    .with_condition(IsNewConstruction),
                Def::new("request-hoa-documents", "Request HOA documents", Paperwork)
                    .with_description("Ask for the resale certificate and subdivision information")
                    .with_timing("15 min", "up to 10 days")
                    .with_condition(HasHoa)
                    .with_stakeholder(Role::Hoa)
                    .due_after_effective(3),
                Def::new("request-repairs", "Request repairs or credits", Paperwork)
                    .with_description("Send an amendment asking for repairs or a price reduction")
                    .with_depends_on(&["review-inspection-report"])
                    .with_timing("1 hour", "1-3 days")
                    .with_documents(&["amendment"])
                    .with_stakeholder(Role::SellerAgent)
                    .due_after_effective(OPTION_DAYS - 2),
                Def::new("negotiate-repairs", "Negotiate the repair amendment", Waiting)
                    .with_description("Agree on repairs before the option period ends")
                    .with_depends_on(&["request-repairs"])
                    .with_timing("varies", "1-3 days")
                    .with_stakeholder(Role::SellerAgent),
                Def::new("decide-proceed", "Decide to proceed or terminate", Action)
                    .with_description("Terminate with the notice before the option period ends, or continue")
                    .with_instructions(&[
                        "Terminating requires delivering TREC 38-6 before 5 p.m. on the last day",
                        "Doing nothing means you proceed",
                    ])
                    .with_depends_on(&["review-inspection-report"])
                    .with_timing("30 min", "none")
                    .with_documents(&["termination-notice"])
                    .due_after_effective(OPTION_DAYS),
            ],
        ),
        phase(
            "loan-process",
            5,
            "Loan Processing",
            "Loan",
            "Underwriting, appraisal and final loan approval",
            StageId::LoanTitle,
            (3, 21),
            vec![
                Def::new("submit-loan-application", "Submit the full loan application", Paperwork)
                    .with_description("Apply in earnest and sign initial disclosures")
                    .with_depends_on(&["send-contract-to-lender"])
                    .with_timing("1-2 hours", "1-3 days")
                    .with_condition(HasLoan)
                    .with_stakeholder(Role::Lender)
                    .due_after_effective(5),
                Def::new("lock-rate", "Lock your interest rate", Action)
                    .with_description("Lock the rate for long enough to cover closing")
                    .with_depends_on(&["submit-loan-application"])
                    .with_timing("15 min", "same day")
                    .with_condition(HasLoan)
                    .with_stakeholder(Role::Lender),
                Def::new("appraisal", "Appraisal", Waiting)
                    .with_description("The lender orders an appraisal to confirm the value")
                    .with_depends_on(&["submit-loan-application"])
                    .with_external("Appraiser visit and report")
                    .with_timing("none", "1-2 weeks")
                    .with_condition(HasLoan)
                    .with_stakeholder(Role::Appraiser),
                Def::new("provide-underwriting-docs", "Answer underwriting conditions", Paperwork)
                    .with_description("Send whatever extra documents the underwriter asks for")
                    .with_depends_on(&["submit-loan-application"])
                    .with_timing("1 hour", "varies")
                    .with_condition(HasLoan)
                    .with_stakeholder(Role::Lender),
                Def::new("financing-approval", "Receive financing approval", Waiting)
                    .with_description("Buyer approval under the financing addendum")
                    .with_depends_on(&["appraisal", "provide-underwriting-docs"])
                    .with_external("Underwriting decision")
                    .with_timing("none", "2-3 weeks")
                    .with_condition(HasLoan)
                    .with_stakeholder(Role::Lender)
                    .due_after_effective(21),
            ],
        ),
        phase(
            "title-process",
            6,
            "Title & Survey",
            "Title",
            "Title commitment, survey and objections",
            StageId::LoanTitle,
            (3, 25),
            vec![
                Def::new("review-title-commitment", "Review the title commitment", Paperwork)
                    .with_description("Look for liens, easements and exceptions")
                    .with_depends_on(&["send-contract-to-title"])
                    .with_external("Title company issues commitment")
                    .with_timing("1 hour", "up to 20 days")
                    .with_stakeholder(Role::TitleCompany)
                    .due_after_effective(20),
                Def::new("order-survey", "Order or obtain a survey", Action)
                    .with_description("Get the seller's existing survey or order a new one")
                    .with_depends_on(&["send-contract-to-title"])
                    .with_timing("15 min", "1-2 weeks")
                    .with_condition(TaskCondition::custom("IF SURVEY NEEDED"))
                    .with_stakeholder(Role::TitleCompany)
                    .due_after_effective(15),
                Def::new("review-survey", "Review the survey", Paperwork)
                    .with_description("Check boundaries, encroachments and easements")
                    .with_depends_on(&["order-survey"])
                    .with_timing("30 min", "none"),
                Def::new("title-objections", "Send title objections", Paperwork)
                    .with_description("Object in writing to anything unacceptable in title or survey")
                    .with_depends_on(&["review-title-commitment", "review-survey"])
                    .with_timing("30 min", "none")
                    .with_stakeholder(Role::TitleCompany)
                    .due_after_effective(25),
                Def::new("receive-hoa-resale-certificate", "Receive the HOA resale certificate", Waiting)
                    .with_description("Review dues, violations and transfer fees")
                    .with_depends_on(&["request-hoa-documents"])
                    .with_timing("30 min", "up to 10 days")
                    .with_condition(HasHoa)
                    .with_stakeholder(Role::Hoa),
            ],
        ),
        phase(
            "pre-closing",
            7,
            "Pre-Closing",
            "Pre-Close",
            "Insurance, utilities, final numbers and the walkthrough",
            StageId::Closing,
            (21, 30),
            vec![
                Def::new("get-insurance", "Buy homeowners insurance", Payment)
                    .with_description("Bind a policy effective on the closing date")
                    .with_timing("1-2 hours", "1-2 days")
                    .with_stakeholder(Role::InsuranceAgent)
                    .due_after_effective(21),
                Def::new("setup-utilities", "Set up utilities", Action)
                    .with_description("Electricity, water, gas, internet and trash in your name")
                    .with_timing("1 hour", "varies"),
                Def::new("review-closing-disclosure", "Review the Closing Disclosure", Paperwork)
                    .with_description("Compare final loan terms against your loan estimate")
                    .with_depends_on(&["financing-approval"])
                    .with_timing("1 hour", "3 days before closing")
                    .with_condition(HasLoan)
                    .with_stakeholder(Role::Lender)
                    .due_after_effective(27),
                Def::new("builder-walkthrough", "Builder orientation walkthrough", Action)
                    .with_description("Walk the home with the builder and create a punch list")
                    .with_depends_on(&["builder-inspection"])
                    .with_timing("2 hours", "none")
                    .with_condition(IsNewConstruction),
                Def::new("final-walkthrough", "Final walkthrough", Action)
                    .with_description("Confirm agreed repairs are done and nothing has changed")
                    .with_depends_on(&["negotiate-repairs"])
                    .with_timing("1 hour", "none")
                    .with_stakeholder(Role::SellerAgent)
                    .due_after_effective(29),
                Def::new("wire-closing-funds", "Wire closing funds", Payment)
                    .with_description("Send the cash to close after confirming instructions by phone")
                    .with_depends_on(&["review-title-commitment"])
                    .with_timing("30 min", "same day")
                    .with_stakeholder(Role::TitleCompany)
                    .due_after_effective(29),
            ],
        ),
        phase(
            "closing",
            8,
            "Closing Day",
            "Closing",
            "Sign, fund and record",
            StageId::Closing,
            (30, 30),
            vec![
                Def::new("confirm-closing-appointment", "Confirm the closing appointment", Action)
                    .with_description("Confirm time, place and what to bring")
                    .with_timing("10 min", "none")
                    .with_stakeholder(Role::TitleCompany),
                Def::new("sign-closing-documents", "Sign closing documents", Paperwork)
                    .with_description("Bring photo ID and sign the deed, note and settlement statement")
                    .with_depends_on(&["confirm-closing-appointment", "wire-closing-funds"])
                    .with_timing("1-2 hours", "none")
                    .with_stakeholder(Role::TitleCompany)
                    .due_after_effective(30),
                Def::new("receive-keys", "Receive the keys", Waiting)
                    .with_description("Possession transfers once the deal funds and records")
                    .with_depends_on(&["sign-closing-documents"])
                    .with_external("Funding and recording")
                    .with_timing("none", "same day"),
            ],
        ),
        phase(
            "post-closing",
            9,
            "Post-Closing",
            "Post-Close",
            "Wrap up after moving in",
            StageId::Closing,
            (30, 60),
            vec![
                Def::new("store-closing-documents", "Store closing documents", Paperwork)
                    .with_description("Keep the deed, settlement statement and policies somewhere safe")
                    .with_depends_on(&["receive-keys"])
                    .with_timing("15 min", "none"),
                Def::new("change-locks", "Change the locks", Action)
                    .with_depends_on(&["receive-keys"])
                    .with_timing("1 hour", "none"),
                Def::new("file-homestead-exemption", "File the homestead exemption", Paperwork)
                    .with_description("Apply with the county appraisal district to lower property taxes")
                    .with_depends_on(&["receive-keys"])
                    .with_timing("30 min", "weeks"),
                Def::new("register-builder-warranty", "Register the builder warranty", Paperwork)
                    .with_depends_on(&["receive-keys"])
                    .with_timing("20 min", "none")
                    .with_condition(IsNewConstruction),
                Def::new("hoa-introduction", "Introduce yourself to the HOA", Action)
                    .with_description("Set up dues payment and the community portal")
                    .with_depends_on(&["receive-keys"])
                    .with_timing("20 min", "none")
                    .with_condition(HasHoa)
                    .with_stakeholder(Role::Hoa),
            ],
        ),
    ]
}
