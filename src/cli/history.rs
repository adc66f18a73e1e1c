//! Spending history command

use chrono::Local;

use crate::display::{format_history_tree, format_month_detail};
use crate::error::{PennywiseError, PennywiseResult};
use crate::models::MonthKey;
use crate::services::BudgetContext;
use crate::storage::Storage;

/// Handle `pennywise history [YYYY-MM]`
///
/// Without a month, prints every month with spending grouped by year.
/// With one, prints that month's totals and transactions.
pub fn handle_history_command(storage: &Storage, month: Option<String>) -> PennywiseResult<()> {
    let ctx = BudgetContext::load(storage)?;
    let today = Local::now().date_naive();

    match month {
        None => print!("{}", format_history_tree(&ctx.history(today))),
        Some(raw) => {
            let month =
                MonthKey::parse(&raw).map_err(|e| PennywiseError::Validation(e.to_string()))?;
            if month > MonthKey::from_date(today) {
                return Err(PennywiseError::Validation(format!(
                    "{} is in the future",
                    month
                )));
            }

            let summary = ctx.month_summary(month);
            let transactions: Vec<_> = ctx
                .month_transactions(month)
                .into_iter()
                .cloned()
                .collect();
            print!("{}", format_month_detail(&summary, &transactions));

            let previous = month.previous();
            let next = month.next();
            let mut nav = Vec::new();
            if ctx.has_data(previous) {
                nav.push(format!("previous: {}", previous.to_key_string()));
            }
            if ctx.has_data(next) && next <= MonthKey::from_date(today) {
                nav.push(format!("next: {}", next.to_key_string()));
            }
            if !nav.is_empty() {
                println!("\n({})", nav.join(", "));
            }
        }
    }

    Ok(())
}
