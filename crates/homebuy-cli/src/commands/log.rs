//! Communication log commands.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use colored::Colorize;
use homebuy_core::records::{CommunicationLog, CommunicationType, NewCommunicationLog};
use std::path::Path;

use crate::context::{resolve_id, AppContext};
use crate::output;

#[derive(Subcommand)]
pub enum LogCommands {
    /// List logged communication, newest first
    List {
        /// Only entries still needing a follow-up
        #[arg(long)]
        pending: bool,
    },

    /// Log a call, email, text or meeting
    Add(AddLogArgs),

    /// Delete a log entry
    Rm {
        /// Log entry ID (or unique prefix)
        log_id: String,
    },
}

#[derive(Args)]
pub struct AddLogArgs {
    /// Stakeholder ID (or unique prefix)
    pub stakeholder_id: String,

    /// What was said or agreed
    pub summary: String,

    /// Type (call, email, text, in_person, other)
    #[arg(short = 't', long = "type", default_value = "call")]
    pub kind: String,

    /// Date of the communication (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Related task ID
    #[arg(long)]
    pub task: Option<String>,

    /// Needs a follow-up
    #[arg(long)]
    pub follow_up: bool,

    /// Follow up by this date (implies --follow-up)
    #[arg(long)]
    pub follow_up_date: Option<NaiveDate>,
}

pub async fn execute(cmd: LogCommands, data_dir: &Path) -> Result<()> {
    let mut ctx = AppContext::open(data_dir)?;
    ctx.state.transaction()?;

    match cmd {
        LogCommands::List { pending } => {
            let logs: Vec<&CommunicationLog> = if pending {
                ctx.state.pending_follow_ups()
            } else {
                let mut all: Vec<&CommunicationLog> = ctx.state.communication_logs.iter().collect();
                all.sort_by(|a, b| b.date.cmp(&a.date));
                all
            };
            output::print_logs(&logs, &ctx.state.stakeholders);
        }

        LogCommands::Add(args) => {
            let stakeholder_id = resolve_id(
                ctx.state.stakeholders.iter().map(|s| s.id.as_str()),
                &args.stakeholder_id,
                "Stakeholder",
            )?;
            let kind = CommunicationType::from_str(&args.kind)
                .ok_or_else(|| anyhow::anyhow!("Unknown communication type: {}", args.kind))?;

            let log = ctx.state.add_log(NewCommunicationLog {
                stakeholder_id,
                task_id: args.task,
                date: args.date.unwrap_or_else(AppContext::today),
                kind,
                summary: args.summary,
                follow_up_needed: args.follow_up || args.follow_up_date.is_some(),
                follow_up_date: args.follow_up_date,
            })?;
            ctx.save()?;
            println!(
                "{} Logged {} ({})",
                "✓".green().bold(),
                log.kind.label().cyan(),
                output::short_id(&log.id).dimmed()
            );
        }

        LogCommands::Rm { log_id } => {
            let id = resolve_id(
                ctx.state.communication_logs.iter().map(|l| l.id.as_str()),
                &log_id,
                "Log entry",
            )?;
            ctx.state.delete_log(&id)?;
            ctx.save()?;
            println!("{} Deleted log entry {}", "✓".green().bold(), output::short_id(&id).dimmed());
        }
    }

    Ok(())
}
