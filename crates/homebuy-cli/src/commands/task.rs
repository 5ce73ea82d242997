//! Checklist task commands.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use colored::Colorize;
use homebuy_core::catalog::{self, StageId};
use homebuy_core::task::{tasks_for_phase, tasks_for_stage, TaskBuckets};
use homebuy_core::HomebuyError;
use std::path::Path;

use crate::context::AppContext;
use crate::output;

#[derive(Subcommand)]
pub enum TaskCommands {
    /// List tasks, grouped by phase
    List(ListTaskArgs),

    /// Show a task's details and steps
    Show {
        /// Task ID
        task_id: String,
    },

    /// Mark a task complete
    Done {
        /// Task ID
        task_id: String,
    },

    /// Mark a completed task as not done
    Undo {
        /// Task ID
        task_id: String,
    },

    /// Skip a task for later
    Skip {
        /// Task ID
        task_id: String,
    },

    /// Move a skipped task back to the to-do list
    Unskip {
        /// Task ID
        task_id: String,
    },

    /// Pin a task's deadline to a date, or clear the pin
    Due {
        /// Task ID
        task_id: String,

        /// Deadline date (YYYY-MM-DD)
        #[arg(required_unless_present = "clear", conflicts_with = "clear")]
        date: Option<NaiveDate>,

        /// Remove the pinned date
        #[arg(long)]
        clear: bool,
    },

    /// Replace a task's notes
    Note {
        /// Task ID
        task_id: String,

        /// Note text (empty clears the notes)
        text: String,
    },
}

#[derive(Args)]
pub struct ListTaskArgs {
    /// Only this phase (e.g. option-period)
    #[arg(short, long, conflicts_with = "stage")]
    pub phase: Option<String>,

    /// Only this stage (offer-prep, option-period, loan-title, closing)
    #[arg(short, long)]
    pub stage: Option<String>,
}

pub async fn execute(cmd: TaskCommands, data_dir: &Path) -> Result<()> {
    let mut ctx = AppContext::open(data_dir)?;
    ctx.state.transaction()?;

    match cmd {
        TaskCommands::List(args) => list(&ctx, args)?,

        TaskCommands::Show { task_id } => {
            let task = ctx.state.task(&task_id)?;
            let blocking = ctx.state.blocking_tasks(&task_id)?;
            output::print_task(task, &blocking);
        }

        TaskCommands::Done { task_id } => {
            let waiting: Vec<String> = ctx
                .state
                .blocking_tasks(&task_id)?
                .iter()
                .map(|t| t.title.clone())
                .collect();
            let task = ctx.state.complete_task(&task_id)?;
            println!("{} Completed: {}", "✓".green().bold(), task.title.cyan());
            if !waiting.is_empty() {
                println!(
                    "  {} still open before this one: {}",
                    "note:".yellow(),
                    waiting.join(", ")
                );
            }
            ctx.save()?;
        }

        TaskCommands::Undo { task_id } => {
            let task = ctx.state.uncomplete_task(&task_id)?;
            println!("{} Reopened: {}", "↺".yellow().bold(), task.title.cyan());
            ctx.save()?;
        }

        TaskCommands::Skip { task_id } => {
            let task = ctx.state.skip_task(&task_id)?;
            if task.completed {
                println!("{} {} is already complete", "•".dimmed(), task.title.cyan());
            } else {
                println!("{} Skipped for later: {}", "→".yellow().bold(), task.title.cyan());
            }
            ctx.save()?;
        }

        TaskCommands::Unskip { task_id } => {
            let task = ctx.state.unskip_task(&task_id)?;
            println!("{} Back on the list: {}", "✓".green().bold(), task.title.cyan());
            ctx.save()?;
        }

        TaskCommands::Due { task_id, date, clear } => {
            let date = if clear { None } else { date };
            let task = ctx.state.set_task_deadline(&task_id, date)?;
            match task.deadline_date {
                Some(due) => println!(
                    "{} {} is due {}",
                    "✓".green().bold(),
                    task.title.cyan(),
                    due.to_string().yellow()
                ),
                None => println!("{} Cleared the date on {}", "✓".green().bold(), task.title.cyan()),
            }
            ctx.save()?;
        }

        TaskCommands::Note { task_id, text } => {
            let task = ctx.state.set_task_notes(&task_id, &text)?;
            println!("{} Saved notes for {}", "✓".green().bold(), task.title.cyan());
            ctx.save()?;
        }
    }

    Ok(())
}

fn list(ctx: &AppContext, args: ListTaskArgs) -> Result<()> {
    let tasks = &ctx.state.tasks;

    if let Some(phase_id) = args.phase {
        let phase = catalog::phase(&phase_id).ok_or(HomebuyError::PhaseNotFound(phase_id))?;
        let heading = format!("{}. {}", phase.number, phase.name);
        output::print_task_buckets(&heading, &TaskBuckets::partition(tasks_for_phase(tasks, &phase.id)));
        return Ok(());
    }

    if let Some(stage_name) = args.stage {
        let stage = StageId::from_str(&stage_name)
            .and_then(catalog::stage)
            .ok_or(HomebuyError::StageNotFound(stage_name))?;
        output::print_task_buckets(&stage.name, &TaskBuckets::partition(tasks_for_stage(tasks, stage)));
        return Ok(());
    }

    for (i, phase) in catalog::phases().iter().enumerate() {
        if i > 0 {
            println!();
        }
        let heading = format!("{}. {}", phase.number, phase.name);
        output::print_task_buckets(&heading, &TaskBuckets::partition(tasks_for_phase(tasks, &phase.id)));
    }
    Ok(())
}
