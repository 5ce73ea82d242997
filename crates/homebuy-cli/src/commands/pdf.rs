//! Form field values and saved PDF commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use colored::Colorize;
use homebuy_core::catalog::{self, DocumentDefinition};
use homebuy_core::pdf;
use homebuy_core::records::{NewSavedPdf, SavedPdf};
use homebuy_core::task::condition::ConditionFlags;
use homebuy_core::HomebuyError;
use std::path::{Path, PathBuf};

use super::document::read_base64;
use crate::context::{resolve_id, AppContext};
use crate::output;

#[derive(Subcommand)]
pub enum PdfCommands {
    /// Show a form's fields and the values snippets supply
    Fields(FieldsArgs),

    /// Save a filled PDF as the next version of a form
    Save(SavePdfArgs),

    /// List saved PDFs
    List {
        /// Only versions of this form
        #[arg(long)]
        document: Option<String>,
    },

    /// Write a saved PDF back to disk
    Extract {
        /// Saved PDF ID (or unique prefix)
        pdf_id: String,

        /// Output path
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Delete a saved PDF
    Rm {
        /// Saved PDF ID (or unique prefix)
        pdf_id: String,
    },
}

#[derive(Args)]
pub struct FieldsArgs {
    /// Form ID (e.g. trec-contract); lists the applicable forms when omitted
    pub document_id: Option<String>,

    /// Use the first form related to this task
    #[arg(long, conflicts_with = "document_id")]
    pub task: Option<String>,

    /// Print the values as JSON for the form filler
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SavePdfArgs {
    /// Form ID (e.g. trec-contract)
    pub document_id: String,

    /// The filled PDF file
    pub file: PathBuf,

    /// Name for this version (defaults to the form name)
    #[arg(short, long)]
    pub name: Option<String>,
}

fn catalog_document(id: &str) -> Result<&'static DocumentDefinition> {
    Ok(catalog::document(id).ok_or_else(|| HomebuyError::DocumentNotFound(id.to_string()))?)
}

pub async fn execute(cmd: PdfCommands, data_dir: &Path) -> Result<()> {
    let mut ctx = AppContext::open(data_dir)?;
    let flags = ConditionFlags::from(ctx.state.transaction()?);

    match cmd {
        PdfCommands::Fields(args) => {
            let document = match (&args.document_id, &args.task) {
                (Some(id), _) => catalog_document(id)?,
                (None, Some(task_id)) => {
                    let task = ctx.state.task(task_id)?;
                    pdf::document_for_task(task).ok_or_else(|| {
                        anyhow::anyhow!("Task {} has no related form", task_id)
                    })?
                }
                (None, None) => {
                    let total = catalog::applicable_documents(flags).len();
                    println!("{} ({})", "Forms for this purchase".bold(), total);
                    for phase in catalog::phases() {
                        let forms = catalog::applicable_documents_for_phase(&phase.id, flags);
                        if forms.is_empty() {
                            continue;
                        }
                        println!("  {}", phase.name.dimmed());
                        for doc in forms {
                            let required = if doc.is_required { "required".yellow() } else { "".normal() };
                            println!(
                                "    {} {} {}",
                                format!("{:<20}", doc.id).cyan(),
                                doc.name,
                                required
                            );
                        }
                    }
                    return Ok(());
                }
            };

            let values = pdf::form_values(document, &ctx.state.snippets);
            if args.json {
                println!("{}", serde_json::to_string_pretty(&values)?);
            } else {
                output::print_form_fields(document, &pdf::field_values(document, &ctx.state.snippets));
            }
        }

        PdfCommands::Save(args) => {
            let document = catalog_document(&args.document_id)?;
            let pdf_base64 = read_base64(&args.file).await?;
            let filled_data = pdf::form_values(document, &ctx.state.snippets);

            let saved = ctx.state.save_pdf(NewSavedPdf {
                document_id: document.id.clone(),
                name: args.name.unwrap_or_else(|| document.name.clone()),
                filled_data,
                pdf_base64,
            })?;
            ctx.save()?;
            println!(
                "{} Saved {} version {} ({})",
                "✓".green().bold(),
                saved.name.cyan(),
                saved.version,
                output::short_id(&saved.id).dimmed()
            );
        }

        PdfCommands::List { document } => {
            let saved: Vec<&SavedPdf> = match document {
                Some(id) => ctx.state.saved_pdfs_for_document(&id),
                None => ctx.state.saved_pdfs.iter().collect(),
            };
            output::print_saved_pdfs(&saved);
        }

        PdfCommands::Extract { pdf_id, out } => {
            let id = resolve_id(
                ctx.state.saved_pdfs.iter().map(|p| p.id.as_str()),
                &pdf_id,
                "Saved PDF",
            )?;
            let saved = ctx.state.saved_pdf(&id)?;
            let bytes = ctx.state.saved_pdf_bytes(&id)?;
            let out = out.unwrap_or_else(|| {
                PathBuf::from(format!("{}-v{}.pdf", saved.document_id, saved.version))
            });

            tokio::fs::write(&out, &bytes)
                .await
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!("{} Wrote {}", "✓".green().bold(), out.display().to_string().cyan());
        }

        PdfCommands::Rm { pdf_id } => {
            let id = resolve_id(
                ctx.state.saved_pdfs.iter().map(|p| p.id.as_str()),
                &pdf_id,
                "Saved PDF",
            )?;
            ctx.state.delete_saved_pdf(&id)?;
            ctx.save()?;
            println!("{} Deleted saved PDF {}", "✓".green().bold(), output::short_id(&id).dimmed());
        }
    }

    Ok(())
}
