//! Spending history formatting
//!
//! A year/month tree for the overview and a detail view for one month.

use super::currency::format_currency;
use super::transaction::format_transaction_table;
use crate::models::Transaction;
use crate::services::{MonthSummary, YearHistory};

fn month_line(summary: &MonthSummary) -> String {
    let flag = if summary.is_over_budget {
        " over budget"
    } else {
        ""
    };
    format!(
        "{:16} {:>12} / {:<12} [{}]{}",
        summary.month.to_string(),
        format_currency(summary.spending.as_dollars_f64()),
        format_currency(summary.budget.as_dollars_f64()),
        summary.state,
        flag
    )
}

/// Format the history as a tree grouped by year
pub fn format_history_tree(history: &[YearHistory]) -> String {
    if history.is_empty() {
        return "No spending history yet.\n".to_string();
    }

    let mut output = String::new();

    for (i, year) in history.iter().enumerate() {
        output.push_str(&format!(
            "{}  total {}\n",
            year.year,
            format_currency(year.total_spending.as_dollars_f64())
        ));

        for (j, month) in year.months.iter().enumerate() {
            let prefix = if j == year.months.len() - 1 {
                "└── "
            } else {
                "├── "
            };
            output.push_str(&format!("  {}{}\n", prefix, month_line(month)));
        }

        if i < history.len() - 1 {
            output.push('\n');
        }
    }

    output
}

/// Format one month: spending against budget, leftover, and its transactions
pub fn format_month_detail(summary: &MonthSummary, transactions: &[Transaction]) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n\n", summary.month));
    output.push_str(&format!(
        "Spent:    {} / {}\n",
        format_currency(summary.spending.as_dollars_f64()),
        format_currency(summary.budget.as_dollars_f64())
    ));

    let leftover = summary.leftover();
    if leftover.is_negative() {
        output.push_str(&format!(
            "Over by:  {}\n",
            format_currency(leftover.abs().as_dollars_f64())
        ));
    } else {
        output.push_str(&format!(
            "Leftover: {}\n",
            format_currency(leftover.as_dollars_f64())
        ));
    }
    output.push_str(&format!("Status:   {}\n\n", summary.state));

    output.push_str(&format_transaction_table(transactions));
    output
}
