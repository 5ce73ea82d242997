//! Progress overview, phases, stages and deadlines.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;

use crate::context::AppContext;
use crate::output;

#[derive(Args)]
pub struct DeadlinesArgs {
    /// Show at most this many deadlines
    #[arg(short, long)]
    pub limit: Option<usize>,
}

pub async fn status(data_dir: &Path) -> Result<()> {
    let ctx = AppContext::open(data_dir)?;
    let tx = ctx.state.transaction()?;

    output::print_transaction(tx);
    println!();
    output::print_overall(&ctx.state.overall_progress());
    println!();
    output::print_stage_states(&ctx.state.stage_states());
    println!();

    println!("{}", "Upcoming deadlines".bold());
    if tx.effective_date.is_none() {
        println!(
            "{}",
            "Set the effective date to see deadlines: homebuy tx set --effective YYYY-MM-DD"
                .dimmed()
        );
    } else {
        let items = ctx
            .state
            .upcoming_deadlines(AppContext::today(), ctx.config.window());
        let preview: Vec<_> = items
            .into_iter()
            .take(ctx.config.deadline_preview)
            .collect();
        output::print_deadlines(&preview);
    }

    let follow_ups = ctx.state.pending_follow_ups().len();
    if follow_ups > 0 {
        println!();
        println!(
            "{} {} pending follow-up(s): homebuy log list --pending",
            "↻".yellow(),
            follow_ups
        );
    }

    Ok(())
}

pub async fn phases(data_dir: &Path) -> Result<()> {
    let ctx = AppContext::open(data_dir)?;
    ctx.state.transaction()?;
    output::print_phase_states(&ctx.state.phase_states());
    Ok(())
}

pub async fn stages(data_dir: &Path) -> Result<()> {
    let ctx = AppContext::open(data_dir)?;
    ctx.state.transaction()?;
    output::print_stage_states(&ctx.state.stage_states());
    Ok(())
}

pub async fn deadlines(args: DeadlinesArgs, data_dir: &Path) -> Result<()> {
    let ctx = AppContext::open(data_dir)?;
    let tx = ctx.state.transaction()?;
    if tx.effective_date.is_none() {
        anyhow::bail!("No effective date set. Run 'homebuy tx set --effective YYYY-MM-DD' first.");
    }

    let items: Vec<_> = ctx
        .state
        .upcoming_deadlines(AppContext::today(), ctx.config.window())
        .into_iter()
        .take(args.limit.unwrap_or(usize::MAX))
        .collect();

    output::print_deadlines(&items);
    Ok(())
}
