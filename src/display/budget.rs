//! Budget status formatting
//!
//! The text rendition of the current-budget screen: money left, how much of
//! the budget is spent, the warning state and the configured thresholds.

use chrono::NaiveDate;

use super::currency::format_currency;
use crate::services::BudgetContext;
use crate::warning::{WarningSettings, WarningState};

/// Width of the text progress bar
const BAR_WIDTH: usize = 30;

fn state_marker(state: WarningState) -> &'static str {
    match state {
        WarningState::Green => "[ok]",
        WarningState::Yellow => "[warning]",
        WarningState::Red => "[critical]",
    }
}

/// Text progress bar, full at 100% spent
pub fn format_progress_bar(percentage: u32) -> String {
    let filled = (percentage.min(100) as usize * BAR_WIDTH) / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        percentage
    )
}

/// Format the budget status for `today`
pub fn format_budget_status(ctx: &BudgetContext, today: NaiveDate) -> String {
    let budget = ctx.budget();
    let spent = ctx.current_month_spending(today);
    let left = ctx.budget_left(today);
    let state = ctx.current_warning_state(today);

    let mut output = String::new();
    output.push_str(&format!(
        "{}\n\n",
        crate::models::MonthKey::from_date(today)
    ));

    if left.is_negative() {
        output.push_str(&format!(
            "Over budget by {}\n",
            format_currency(left.abs().as_dollars_f64())
        ));
    } else {
        output.push_str(&format!(
            "{} left\n",
            format_currency(left.as_dollars_f64())
        ));
    }
    output.push_str(&format!(
        "Spent {} of {} ({})\n",
        format_currency(spent.as_dollars_f64()),
        format_currency(budget.amount.as_dollars_f64()),
        budget.frequency
    ));
    output.push_str(&format!(
        "{}\n",
        format_progress_bar(ctx.spent_percentage(today))
    ));
    output.push_str(&format!("Status: {} {}\n", state, state_marker(state)));

    if ctx.should_show_warning(today) {
        output.push_str("\nYou are close to or over your budget for this month.\n");
    }

    output
}

/// Format the warning threshold settings
pub fn format_warning_settings(settings: &WarningSettings) -> String {
    let descriptions = crate::warning::describe_thresholds(settings);
    let mut output = String::new();
    output.push_str("Warning thresholds:\n");
    output.push_str(&format!("  {}\n", descriptions.yellow_sentence()));
    output.push_str(&format!("  {}\n", descriptions.red_sentence()));
    output
}
