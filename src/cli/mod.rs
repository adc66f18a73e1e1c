//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod budget;
pub mod history;
pub mod label;
pub mod session;
pub mod transaction;
pub mod warning;

pub use audit::handle_audit_command;
pub use budget::{handle_budget_command, BudgetCommands};
pub use history::handle_history_command;
pub use label::{handle_label_command, LabelCommands};
pub use session::{handle_login_command, handle_logout_command, handle_whoami_command};
pub use transaction::{handle_add_command, handle_transaction_command, AddArgs, TransactionCommands};
pub use warning::{handle_warning_command, WarningCommands};

use chrono::{DateTime, Local, NaiveDate, TimeZone, Utc};

use crate::error::{PennywiseError, PennywiseResult};
use crate::models::{LabelList, Money, TransactionLabel};

/// Parse a dollar amount such as `12.50` or `$1,200`
pub(crate) fn parse_amount(input: &str) -> PennywiseResult<Money> {
    Money::parse(input)
        .map_err(|e| PennywiseError::Validation(format!("Invalid amount '{}': {}", input, e)))
}

/// Parse `YYYY-MM-DD` as midday local time on that date
pub(crate) fn parse_date(input: &str) -> PennywiseResult<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        PennywiseError::Validation(format!("Invalid date '{}': expected YYYY-MM-DD", input))
    })?;
    let midday = date
        .and_hms_opt(12, 0, 0)
        .ok_or_else(|| PennywiseError::Validation(format!("Invalid date '{}'", input)))?;

    Local
        .from_local_datetime(&midday)
        .earliest()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| PennywiseError::Validation(format!("Invalid local date '{}'", input)))
}

/// Look a label up by id or name
pub(crate) fn resolve_label(labels: &LabelList, identifier: &str) -> PennywiseResult<TransactionLabel> {
    labels
        .find(identifier)
        .cloned()
        .ok_or_else(|| PennywiseError::label_not_found(identifier))
}
