//! Transaction display formatting
//!
//! Register-style tables for active and deleted transactions, plus a detail
//! view. Dates are shown in local time.

use chrono::{DateTime, Local, Utc};

use crate::models::{DeletedTransaction, Transaction};

fn local_date(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d").to_string()
}

/// Format a single transaction as a table row
pub fn format_transaction_row(txn: &Transaction) -> String {
    format!(
        "{:12} {:10} {:20} {:>12}",
        txn.id.short(),
        local_date(txn.date),
        truncate(&txn.label, 20),
        txn.amount
    )
}

/// Format a list of transactions as a table
pub fn format_transaction_table(transactions: &[Transaction]) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:10} {:20} {:>12}\n",
        "ID", "Date", "Label", "Amount"
    ));
    output.push_str(&"-".repeat(57));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn));
        output.push('\n');
    }

    output.push_str(&"-".repeat(57));
    output.push('\n');
    let total: crate::models::Money = transactions.iter().map(|t| t.amount).sum();
    output.push_str(&format!("{:>44} {:>12}\n", "Total:", total));

    output
}

/// Format the trash, newest deletion first
pub fn format_deleted_table(deleted: &[DeletedTransaction]) -> String {
    if deleted.is_empty() {
        return "No deleted transactions.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:12} {:10} {:20} {:>12} {:10}\n",
        "ID", "Date", "Label", "Amount", "Deleted"
    ));
    output.push_str(&"-".repeat(68));
    output.push('\n');

    for record in deleted {
        let txn = &record.transaction;
        output.push_str(&format!(
            "{:12} {:10} {:20} {:>12} {:10}\n",
            txn.id.short(),
            local_date(txn.date),
            truncate(&txn.label, 20),
            txn.amount,
            local_date(record.deleted_at)
        ));
    }

    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!(
        "Date:        {}\n",
        txn.date.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    ));
    output.push_str(&format!("Amount:      {}\n", txn.amount));
    output.push_str(&format!("Label:       {}\n", txn.label));
    if let Some(label_id) = &txn.label_id {
        output.push_str(&format!("Label ID:    {}\n", label_id));
    }
    output.push_str(&format!("Budget:      {}\n", txn.budget_for_month));
    output.push_str(&format!("Full ID:     {}\n", txn.id.as_uuid()));

    output
}

/// Pad or cut a string to exactly `max_len` characters
pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
