//! Starting a purchase and wiping all data.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use dialoguer::Confirm;
use homebuy_core::task::condition::ConditionFlags;
use std::path::Path;

use crate::context::AppContext;

#[derive(Args)]
pub struct InitArgs {
    /// Cash purchase (no mortgage)
    #[arg(long)]
    pub cash: bool,

    /// Property belongs to a homeowners association
    #[arg(long)]
    pub hoa: bool,

    /// Newly built home
    #[arg(long)]
    pub new_construction: bool,

    /// Replace an existing transaction and all of its data
    #[arg(long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ResetArgs {
    /// Skip the confirmation prompt
    #[arg(long)]
    pub yes: bool,
}

pub async fn execute(args: InitArgs, data_dir: &Path) -> Result<()> {
    let mut ctx = AppContext::open(data_dir)?;

    let flags = ConditionFlags {
        has_hoa: args.hoa,
        has_loan: !args.cash,
        is_new_construction: args.new_construction,
    };
    let tx_id = ctx.state.create_transaction(flags, args.force)?.id.clone();
    ctx.save()?;

    let progress = ctx.state.overall_progress();
    println!("{} Started a new purchase ({})", "✓".green().bold(), tx_id.dimmed());
    println!(
        "  {} applicable tasks, {} snippets ready to fill",
        progress.enabled.to_string().cyan(),
        ctx.state.snippets.len()
    );
    println!("  Data: {}", ctx.data_dir.display());
    println!();
    println!("{}", "Next steps:".bold());
    println!("  homebuy tx set --address \"...\" --price 350000   # Describe the property");
    println!("  homebuy snippet list                             # Fill in your details");
    println!("  homebuy task list                                # See what to do first");

    Ok(())
}

pub async fn reset(args: ResetArgs, data_dir: &Path) -> Result<()> {
    if !args.yes {
        println!("{}", "This will permanently delete:".red().bold());
        println!("  {} the transaction and every task's progress", "•".red());
        println!("  {} snippets, stakeholders and the communication log", "•".red());
        println!("  {} uploaded documents and saved PDFs", "•".red());
        println!();

        let confirmed = Confirm::new()
            .with_prompt("Delete everything?")
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;
        if !confirmed {
            println!("{}", "Nothing deleted.".dimmed());
            return Ok(());
        }
    }

    let mut ctx = AppContext::open(data_dir)?;
    let removed = ctx.store.clear()?;
    ctx.state.reset();

    println!("{} Deleted all data ({} keys)", "✓".green().bold(), removed);
    Ok(())
}
