//! Snippet commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use homebuy_core::records::{NewSnippet, Snippet, SnippetCategory, SnippetUpdate};
use std::path::Path;

use crate::context::{resolve_id, AppContext};
use crate::output;

#[derive(Subcommand)]
pub enum SnippetCommands {
    /// List snippets by category
    List {
        /// Only this category (property, buyer, seller, transaction, custom)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Add a snippet
    Add(AddSnippetArgs),

    /// Change a snippet
    Set(SetSnippetArgs),

    /// Delete a snippet
    Rm {
        /// Snippet ID (or unique prefix)
        snippet_id: String,
    },
}

#[derive(Args)]
pub struct AddSnippetArgs {
    /// Label shown next to the value
    pub label: String,

    /// The value
    pub value: String,

    /// Category (property, buyer, seller, transaction, custom)
    #[arg(short, long, default_value = "custom")]
    pub category: String,

    /// PDF form field this snippet fills (repeatable)
    #[arg(short, long = "field")]
    pub fields: Vec<String>,
}

#[derive(Args)]
pub struct SetSnippetArgs {
    /// Snippet ID (or unique prefix)
    pub snippet_id: String,

    /// New value
    pub value: Option<String>,

    /// New label
    #[arg(long)]
    pub label: Option<String>,

    /// New category
    #[arg(short, long)]
    pub category: Option<String>,

    /// Replace the PDF field list (repeatable)
    #[arg(short, long = "field")]
    pub fields: Vec<String>,
}

fn parse_category(s: &str) -> Result<SnippetCategory> {
    SnippetCategory::from_str(s).ok_or_else(|| anyhow::anyhow!("Unknown snippet category: {}", s))
}

fn snippet_ids(snippets: &[Snippet]) -> impl Iterator<Item = &str> {
    snippets.iter().map(|s| s.id.as_str())
}

pub async fn execute(cmd: SnippetCommands, data_dir: &Path) -> Result<()> {
    let mut ctx = AppContext::open(data_dir)?;
    ctx.state.transaction()?;

    match cmd {
        SnippetCommands::List { category } => {
            let snippets: Vec<&Snippet> = match category {
                Some(c) => ctx.state.snippets_by_category(parse_category(&c)?),
                None => ctx.state.snippets.iter().collect(),
            };
            output::print_snippets(&snippets);
        }

        SnippetCommands::Add(args) => {
            let snippet = ctx.state.add_snippet(NewSnippet {
                category: parse_category(&args.category)?,
                label: args.label,
                value: args.value,
                pdf_field_mapping: args.fields,
            })?;
            ctx.save()?;
            println!(
                "{} Added snippet: {} ({})",
                "✓".green().bold(),
                snippet.label.cyan(),
                output::short_id(&snippet.id).dimmed()
            );
        }

        SnippetCommands::Set(args) => {
            let id = resolve_id(snippet_ids(&ctx.state.snippets), &args.snippet_id, "Snippet")?;
            let update = SnippetUpdate {
                category: args.category.as_deref().map(parse_category).transpose()?,
                label: args.label,
                value: args.value,
                pdf_field_mapping: if args.fields.is_empty() {
                    None
                } else {
                    Some(args.fields)
                },
            };
            let snippet = ctx.state.update_snippet(&id, &update)?;
            println!(
                "{} {} = {}",
                "✓".green().bold(),
                snippet.label.cyan(),
                snippet.value
            );
            ctx.save()?;
        }

        SnippetCommands::Rm { snippet_id } => {
            let id = resolve_id(snippet_ids(&ctx.state.snippets), &snippet_id, "Snippet")?;
            ctx.state.delete_snippet(&id)?;
            ctx.save()?;
            println!("{} Deleted snippet {}", "✓".green().bold(), output::short_id(&id).dimmed());
        }
    }

    Ok(())
}
