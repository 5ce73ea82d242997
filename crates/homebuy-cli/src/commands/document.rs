//! Uploaded document commands.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::{Args, Subcommand};
use colored::Colorize;
use homebuy_core::records::{DocumentCategory, NewSavedDocument};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::context::{resolve_id, AppContext};
use crate::output;

#[derive(Subcommand)]
pub enum DocCommands {
    /// List uploaded documents
    List,

    /// Upload a file
    Add(AddDocArgs),

    /// Write an uploaded document back to disk
    Extract {
        /// Document ID (or unique prefix)
        document_id: String,

        /// Output path (defaults to the original file name)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Delete an uploaded document
    Rm {
        /// Document ID (or unique prefix)
        document_id: String,
    },
}

#[derive(Args)]
pub struct AddDocArgs {
    /// File to upload
    pub path: PathBuf,

    /// Display name (defaults to the file name)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Category (pre-approval, inspection, appraisal, title, insurance, contract, other)
    #[arg(short, long, default_value = "other")]
    pub category: String,

    /// MIME type (guessed from the extension when omitted)
    #[arg(long)]
    pub mime: Option<String>,

    /// Related task ID
    #[arg(long)]
    pub task: Option<String>,

    #[arg(long, default_value = "")]
    pub notes: String,
}

/// Read a file and base64-encode it.
pub async fn read_base64(path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    debug!(path = %path.display(), bytes = bytes.len(), "Read attachment");
    Ok(STANDARD.encode(bytes))
}

fn file_name_of(path: &Path) -> Result<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow::anyhow!("Not a file: {}", path.display()))
}

pub async fn execute(cmd: DocCommands, data_dir: &Path) -> Result<()> {
    let mut ctx = AppContext::open(data_dir)?;
    ctx.state.transaction()?;

    match cmd {
        DocCommands::List => {
            output::print_documents(&ctx.state.documents);
        }

        DocCommands::Add(args) => {
            let category = DocumentCategory::from_str(&args.category)
                .ok_or_else(|| anyhow::anyhow!("Unknown document category: {}", args.category))?;
            let file_name = file_name_of(&args.path)?;
            let file_base64 = read_base64(&args.path).await?;

            let document = ctx.state.add_document(NewSavedDocument {
                name: args.name.unwrap_or_else(|| file_name.clone()),
                file_name,
                mime_type: args.mime.unwrap_or_default(),
                file_base64,
                category,
                notes: args.notes,
                task_id: args.task,
            })?;
            ctx.save()?;
            println!(
                "{} Uploaded {} as {} ({})",
                "✓".green().bold(),
                document.file_name.cyan(),
                document.mime_type.dimmed(),
                output::short_id(&document.id).dimmed()
            );
        }

        DocCommands::Extract { document_id, out } => {
            let id = resolve_id(
                ctx.state.documents.iter().map(|d| d.id.as_str()),
                &document_id,
                "Document",
            )?;
            let document = ctx.state.document(&id)?;
            let bytes = ctx.state.document_bytes(&id)?;
            let out = out.unwrap_or_else(|| PathBuf::from(&document.file_name));

            tokio::fs::write(&out, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!(
                "{} Wrote {} ({} bytes)",
                "✓".green().bold(),
                out.display().to_string().cyan(),
                bytes.len()
            );
        }

        DocCommands::Rm { document_id } => {
            let id = resolve_id(
                ctx.state.documents.iter().map(|d| d.id.as_str()),
                &document_id,
                "Document",
            )?;
            ctx.state.delete_document(&id)?;
            ctx.save()?;
            println!("{} Deleted document {}", "✓".green().bold(), output::short_id(&id).dimmed());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_read_base64() {
        let path = std::env::temp_dir().join(format!("homebuy-doc-{}.txt", std::process::id()));
        tokio::fs::write(&path, b"hello").await.unwrap();
        assert_eq!(read_base64(&path).await.unwrap(), "aGVsbG8=");
        tokio::fs::remove_file(&path).await.unwrap();

        assert!(read_base64(&path).await.is_err());
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of(Path::new("/tmp/report.pdf")).unwrap(), "report.pdf");
        assert!(file_name_of(Path::new("/")).is_err());
    }
}
