//! Stakeholder commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use homebuy_core::catalog;
use homebuy_core::records::{NewStakeholder, StakeholderRole};
use std::path::Path;

use crate::context::{resolve_id, AppContext};
use crate::output;

#[derive(Subcommand)]
pub enum StakeholderCommands {
    /// List stakeholders
    List,

    /// Add a stakeholder
    Add(AddStakeholderArgs),

    /// Remove a stakeholder
    Rm {
        /// Stakeholder ID (or unique prefix)
        stakeholder_id: String,
    },

    /// List the available roles
    Roles,
}

#[derive(Args)]
pub struct AddStakeholderArgs {
    /// Role (e.g. lender, inspector, title_company)
    pub role: String,

    /// Person's name
    pub name: String,

    #[arg(long, default_value = "")]
    pub company: String,

    #[arg(long, default_value = "")]
    pub phone: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub notes: String,
}

pub async fn execute(cmd: StakeholderCommands, data_dir: &Path) -> Result<()> {
    if let StakeholderCommands::Roles = cmd {
        for info in catalog::stakeholder_roles() {
            println!(
                "  {} {}",
                format!("{:<16}", info.role.as_str()).cyan(),
                info.description.dimmed()
            );
        }
        return Ok(());
    }

    let mut ctx = AppContext::open(data_dir)?;
    ctx.state.transaction()?;

    match cmd {
        StakeholderCommands::List => {
            output::print_stakeholders(&ctx.state.stakeholders);
        }

        StakeholderCommands::Add(args) => {
            let role = StakeholderRole::from_str(&args.role)
                .ok_or_else(|| anyhow::anyhow!("Unknown role: {} (see 'homebuy stakeholder roles')", args.role))?;
            let stakeholder = ctx.state.add_stakeholder(NewStakeholder {
                role,
                name: args.name,
                company: args.company,
                phone: args.phone,
                email: args.email,
                notes: args.notes,
            })?;
            ctx.save()?;
            println!(
                "{} Added {}: {} ({})",
                "✓".green().bold(),
                catalog::role_label(stakeholder.role),
                stakeholder.display_name().cyan(),
                output::short_id(&stakeholder.id).dimmed()
            );
        }

        StakeholderCommands::Rm { stakeholder_id } => {
            let id = resolve_id(
                ctx.state.stakeholders.iter().map(|s| s.id.as_str()),
                &stakeholder_id,
                "Stakeholder",
            )?;
            ctx.state.delete_stakeholder(&id)?;
            ctx.save()?;
            println!("{} Removed stakeholder {}", "✓".green().bold(), output::short_id(&id).dimmed());
        }

        StakeholderCommands::Roles => {}
    }

    Ok(())
}
