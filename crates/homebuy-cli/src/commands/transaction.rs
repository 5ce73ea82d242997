//! Transaction commands.

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use colored::Colorize;
use homebuy_core::transaction::{TransactionStatus, TransactionUpdate};
use std::path::Path;

use crate::context::AppContext;
use crate::output;

#[derive(Subcommand)]
pub enum TxCommands {
    /// Show the transaction
    Show,

    /// Update transaction fields
    Set(SetArgs),
}

#[derive(Args)]
pub struct SetArgs {
    /// Property street address
    #[arg(long)]
    pub address: Option<String>,

    /// Legal description from the deed or tax records
    #[arg(long)]
    pub legal: Option<String>,

    /// Purchase price in dollars
    #[arg(long)]
    pub price: Option<f64>,

    /// Contract effective date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "clear_effective")]
    pub effective: Option<NaiveDate>,

    /// Remove the effective date
    #[arg(long)]
    pub clear_effective: bool,

    /// Closing date (YYYY-MM-DD)
    #[arg(long, conflicts_with = "clear_closing")]
    pub closing: Option<NaiveDate>,

    /// Remove the closing date
    #[arg(long)]
    pub clear_closing: bool,

    /// Status (draft, active, closed, terminated)
    #[arg(long)]
    pub status: Option<String>,

    /// Financed with a mortgage (true/false)
    #[arg(long)]
    pub loan: Option<bool>,

    /// Part of an HOA (true/false)
    #[arg(long)]
    pub hoa: Option<bool>,

    /// New construction (true/false)
    #[arg(long)]
    pub new_construction: Option<bool>,
}

fn date_change(value: Option<NaiveDate>, clear: bool) -> Option<Option<NaiveDate>> {
    if clear {
        Some(None)
    } else {
        value.map(Some)
    }
}

impl SetArgs {
    fn into_update(self) -> Result<TransactionUpdate> {
        let status = match self.status.as_deref() {
            Some(s) => Some(
                TransactionStatus::from_str(s)
                    .ok_or_else(|| anyhow::anyhow!("Unknown status: {}", s))?,
            ),
            None => None,
        };

        if let Some(price) = self.price {
            if price < 0.0 || !price.is_finite() {
                anyhow::bail!("Price must be a non-negative number");
            }
        }

        Ok(TransactionUpdate {
            property_address: self.address,
            legal_description: self.legal,
            purchase_price: self.price,
            effective_date: date_change(self.effective, self.clear_effective),
            closing_date: date_change(self.closing, self.clear_closing),
            status,
            has_hoa: self.hoa,
            has_loan: self.loan,
            is_new_construction: self.new_construction,
        })
    }
}

pub async fn execute(cmd: TxCommands, data_dir: &Path) -> Result<()> {
    let mut ctx = AppContext::open(data_dir)?;

    match cmd {
        TxCommands::Show => {
            output::print_transaction(ctx.state.transaction()?);
        }

        TxCommands::Set(args) => {
            let update = args.into_update()?;
            if update.is_empty() {
                println!("{}", "Nothing to change.".dimmed());
                return Ok(());
            }

            let before = ctx.state.overall_progress().enabled;
            ctx.state.update_transaction(&update)?;
            ctx.save()?;

            println!("{} Updated transaction", "✓".green().bold());
            if update.touches_flags() {
                let after = ctx.state.overall_progress().enabled;
                println!(
                    "  Applicable tasks: {} {} {}",
                    before,
                    "→".dimmed(),
                    after.to_string().cyan()
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_args() -> SetArgs {
        SetArgs {
            address: None,
            legal: None,
            price: None,
            effective: None,
            clear_effective: false,
            closing: None,
            clear_closing: false,
            status: None,
            loan: None,
            hoa: None,
            new_construction: None,
        }
    }

    #[test]
    fn test_empty_args_make_empty_update() {
        assert!(empty_args().into_update().unwrap().is_empty());
    }

    #[test]
    fn test_clear_date() {
        let args = SetArgs {
            clear_closing: true,
            ..empty_args()
        };
        assert_eq!(args.into_update().unwrap().closing_date, Some(None));
    }

    #[test]
    fn test_rejects_bad_values() {
        let args = SetArgs {
            status: Some("sold".to_string()),
            ..empty_args()
        };
        assert!(args.into_update().is_err());

        let args = SetArgs {
            price: Some(-1.0),
            ..empty_args()
        };
        assert!(args.into_update().is_err());
    }
}
