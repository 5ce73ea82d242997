//! Backup export and import.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;
use homebuy_core::session;
use homebuy_store::{export_filename, parse_envelope};
use std::path::{Path, PathBuf};

use crate::context::AppContext;

#[derive(Subcommand)]
pub enum BackupCommands {
    /// Write every stored value to a JSON backup file
    Export {
        /// Output file (defaults to buyerselfserve-backup-<date>.json)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Replace all data with the contents of a backup file
    Import {
        /// Backup file
        path: PathBuf,

        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub async fn execute(cmd: BackupCommands, data_dir: &Path) -> Result<()> {
    let ctx = AppContext::open(data_dir)?;

    match cmd {
        BackupCommands::Export { out } => {
            let envelope = ctx.store.export()?;
            let out = out.unwrap_or_else(|| PathBuf::from(export_filename(AppContext::today())));

            tokio::fs::write(&out, envelope.to_json_pretty()?)
                .await
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!(
                "{} Exported {} keys to {}",
                "✓".green().bold(),
                envelope.data.len(),
                out.display().to_string().cyan()
            );
        }

        BackupCommands::Import { path, yes } => {
            let text = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let envelope = parse_envelope(&text).context("Import failed")?;

            if !yes && ctx.state.has_transaction() {
                let confirmed = Confirm::new()
                    .with_prompt("Importing replaces all current data. Continue?")
                    .default(false)
                    .interact()
                    .context("Failed to read confirmation")?;
                if !confirmed {
                    println!("{}", "Import cancelled.".dimmed());
                    return Ok(());
                }
            }

            let written = ctx.store.import(&envelope)?;
            let restored = session::load_state(&ctx.store)?;
            println!(
                "{} Imported {} keys from backup taken {}",
                "✓".green().bold(),
                written,
                envelope.timestamp.dimmed()
            );
            if let Ok(tx) = restored.transaction() {
                println!(
                    "  {} tasks restored for {}",
                    restored.tasks.len(),
                    if tx.property_address.is_empty() {
                        "the purchase"
                    } else {
                        tx.property_address.as_str()
                    }
                );
            }
        }
    }

    Ok(())
}
