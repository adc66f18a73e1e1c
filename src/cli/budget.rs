//! Budget CLI commands
//!
//! Shows the current month against the budget and changes the budget amount.

use chrono::Local;
use clap::Subcommand;

use super::parse_amount;
use crate::display::format_budget_status;
use crate::error::{PennywiseError, PennywiseResult};
use crate::models::{BudgetFrequency, BudgetSettings};
use crate::services::{BudgetContext, SettingsService};
use crate::storage::Storage;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show how much of this month's budget is left
    Show,

    /// Change the budget
    Set {
        /// Budget amount (e.g., "500" or "1,200.00")
        amount: String,
        /// Budget frequency: monthly or yearly
        #[arg(short, long)]
        frequency: Option<String>,
    },
}

/// Handle a budget command
pub fn handle_budget_command(storage: &Storage, cmd: BudgetCommands) -> PennywiseResult<()> {
    match cmd {
        BudgetCommands::Show => {
            let ctx = BudgetContext::load(storage)?;
            print!("{}", format_budget_status(&ctx, Local::now().date_naive()));
        }

        BudgetCommands::Set { amount, frequency } => {
            let service = SettingsService::new(storage);
            let current = service.budget()?;

            let frequency = match frequency {
                Some(raw) => raw
                    .parse::<BudgetFrequency>()
                    .map_err(PennywiseError::Validation)?,
                None => current.frequency,
            };
            let budget = service.update_budget(BudgetSettings::new(parse_amount(&amount)?, frequency))?;
            println!("Budget set to {}", budget);
        }
    }

    Ok(())
}
