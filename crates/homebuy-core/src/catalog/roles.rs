use super::RoleInfo;
use crate::records::stakeholder::StakeholderRole;

pub(super) const ROLES: &[RoleInfo] = &[
    RoleInfo {
        role: StakeholderRole::Seller,
        label: "Seller",
        description: "The property owner selling the home",
    },
    RoleInfo {
        role: StakeholderRole::SellerAgent,
        label: "Listing Agent",
        description: "The seller's real estate agent",
    },
    RoleInfo {
        role: StakeholderRole::TitleCompany,
        label: "Title Company",
        description: "Handles escrow, title search, and closing",
    },
    RoleInfo {
        role: StakeholderRole::Lender,
        label: "Lender",
        description: "Mortgage company or loan officer",
    },
    RoleInfo {
        role: StakeholderRole::Inspector,
        label: "Home Inspector",
        description: "Licensed home inspector",
    },
    RoleInfo {
        role: StakeholderRole::Appraiser,
        label: "Appraiser",
        description: "Property appraiser (ordered by lender)",
    },
    RoleInfo {
        role: StakeholderRole::InsuranceAgent,
        label: "Insurance Agent",
        description: "Homeowners insurance provider",
    },
    RoleInfo {
        role: StakeholderRole::Hoa,
        label: "HOA",
        description: "Homeowners Association",
    },
    RoleInfo {
        role: StakeholderRole::Other,
        label: "Other",
        description: "Other party involved in transaction",
    },
];
