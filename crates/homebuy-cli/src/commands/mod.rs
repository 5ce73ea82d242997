//! CLI command definitions and handlers.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config;

pub mod backup;
pub mod document;
pub mod init;
pub mod log;
pub mod pdf;
pub mod progress;
pub mod snippet;
pub mod stakeholder;
pub mod task;
pub mod transaction;

/// Homebuy - step-by-step checklist for buying a home in Texas
#[derive(Parser)]
#[command(name = "homebuy")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Directory holding the database and config.toml
    #[arg(short, long, global = true, env = "HOMEBUY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start tracking a new purchase
    Init(init::InitArgs),

    /// Overview: progress, stages and the next deadlines
    Status,

    /// Show or edit the transaction
    #[command(subcommand)]
    Tx(transaction::TxCommands),

    /// Progress of every phase
    Phases,

    /// Progress of every stage
    Stages,

    /// Checklist tasks
    #[command(subcommand)]
    Task(task::TaskCommands),

    /// Upcoming deadlines
    Deadlines(progress::DeadlinesArgs),

    /// Reusable values for filling forms
    #[command(subcommand)]
    Snippet(snippet::SnippetCommands),

    /// People involved in the purchase
    #[command(subcommand)]
    Stakeholder(stakeholder::StakeholderCommands),

    /// Communication log
    #[command(subcommand)]
    Log(log::LogCommands),

    /// Uploaded documents
    #[command(subcommand)]
    Doc(document::DocCommands),

    /// Form fields and saved PDFs
    #[command(subcommand)]
    Pdf(pdf::PdfCommands),

    /// Export or import a backup file
    #[command(subcommand)]
    Backup(backup::BackupCommands),

    /// Delete all data
    Reset(init::ResetArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let data_dir = config::resolve_data_dir(self.data_dir)?;

        match self.command {
            Commands::Init(args) => init::execute(args, &data_dir).await,
            Commands::Status => progress::status(&data_dir).await,
            Commands::Tx(cmd) => transaction::execute(cmd, &data_dir).await,
            Commands::Phases => progress::phases(&data_dir).await,
            Commands::Stages => progress::stages(&data_dir).await,
            Commands::Task(cmd) => task::execute(cmd, &data_dir).await,
            Commands::Deadlines(args) => progress::deadlines(args, &data_dir).await,
            Commands::Snippet(cmd) => snippet::execute(cmd, &data_dir).await,
            Commands::Stakeholder(cmd) => stakeholder::execute(cmd, &data_dir).await,
            Commands::Log(cmd) => log::execute(cmd, &data_dir).await,
            Commands::Doc(cmd) => document::execute(cmd, &data_dir).await,
            Commands::Pdf(cmd) => pdf::execute(cmd, &data_dir).await,
            Commands::Backup(cmd) => backup::execute(cmd, &data_dir).await,
            Commands::Reset(args) => init::reset(args, &data_dir).await,
        }
    }
}
