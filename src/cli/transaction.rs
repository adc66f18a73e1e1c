//! Transaction CLI commands
//!
//! `add` runs typed keys through the keypad engine; the `txn` subcommands
//! list, inspect, edit, trash and restore recorded transactions.

use clap::{Args, Subcommand};

use super::{parse_amount, parse_date, resolve_label};
use crate::calculator::evaluate;
use crate::display::{
    format_deleted_table, format_transaction_details, format_transaction_table,
};
use crate::error::{PennywiseError, PennywiseResult};
use crate::models::MonthKey;
use crate::services::{
    CreateTransactionInput, SettingsService, TransactionFilter, TransactionService,
    UpdateTransactionInput,
};
use crate::storage::Storage;

/// Label used when neither a type nor custom text is given
const FALLBACK_LABEL: &str = "Transaction";

/// Arguments of `pennywise add`
#[derive(Args, Debug)]
pub struct AddArgs {
    /// Keypad keys, e.g. "12.5+3" (digits, '.', '+', '-', '=', '<' backspace, 'c' clear)
    pub keys: String,
    /// Transaction type (label name or ID)
    #[arg(short = 't', long = "type")]
    pub label_type: Option<String>,
    /// Custom label text, used when no type is given
    #[arg(short, long)]
    pub label: Option<String>,
    /// Transaction date (YYYY-MM-DD), defaults to now
    #[arg(short, long)]
    pub date: Option<String>,
}

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// List transactions, newest first
    List {
        /// Only this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
        /// Only this transaction type (label name or ID)
        #[arg(short = 't', long = "type")]
        label_type: Option<String>,
        /// Number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show transaction details
    Show {
        /// Transaction ID
        id: String,
    },

    /// Edit a transaction
    Edit {
        /// Transaction ID
        id: String,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New transaction type (label name or ID)
        #[arg(short = 't', long = "type")]
        label_type: Option<String>,
        /// New custom label text (detaches the transaction from its type)
        #[arg(short, long, conflicts_with = "label_type")]
        label: Option<String>,
        /// New date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
    },

    /// Move a transaction to the trash
    Delete {
        /// Transaction ID
        id: String,
    },

    /// Bring a transaction back from the trash
    Restore {
        /// Transaction ID
        id: String,
    },

    /// List trashed transactions
    Deleted,
}

/// Handle `pennywise add`
pub fn handle_add_command(storage: &Storage, args: AddArgs) -> PennywiseResult<()> {
    let (calc, amount) = evaluate(&args.keys)?;

    let mut input = match (&args.label_type, &args.label) {
        (Some(identifier), _) => {
            let labels = SettingsService::new(storage).labels()?;
            let label = resolve_label(&labels, identifier)?;
            CreateTransactionInput {
                label_id: Some(label.id),
                ..CreateTransactionInput::new(amount, label.name)
            }
        }
        (None, Some(text)) if !text.trim().is_empty() => {
            CreateTransactionInput::new(amount, text.trim())
        }
        _ => CreateTransactionInput::new(amount, FALLBACK_LABEL),
    };
    if let Some(date) = &args.date {
        input.date = Some(parse_date(date)?);
    }

    let txn = TransactionService::new(storage).add(input)?;

    println!("Added {} ({})", txn.amount, txn.label);
    if !calc.trace().is_empty() {
        println!("  {} = {}", calc.trace(), calc.display());
    }
    println!("  ID: {}", txn.id);
    Ok(())
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    cmd: TransactionCommands,
) -> PennywiseResult<()> {
    let service = TransactionService::new(storage);

    match cmd {
        TransactionCommands::List {
            month,
            label_type,
            limit,
        } => {
            let mut filter = TransactionFilter::new();
            if let Some(month) = month {
                let month = MonthKey::parse(&month)
                    .map_err(|e| PennywiseError::Validation(e.to_string()))?;
                filter = filter.month(month);
            }
            if let Some(identifier) = label_type {
                let labels = SettingsService::new(storage).labels()?;
                filter = filter.label(resolve_label(&labels, &identifier)?.id);
            }
            if let Some(limit) = limit {
                filter = filter.limit(limit);
            }

            let transactions = service.list(filter)?;
            print!("{}", format_transaction_table(&transactions));
        }

        TransactionCommands::Show { id } => {
            let txn = service.resolve(&id)?;
            print!("{}", format_transaction_details(&txn));
        }

        TransactionCommands::Edit {
            id,
            amount,
            label_type,
            label,
            date,
        } => {
            let txn = service.resolve(&id)?;

            let mut input = UpdateTransactionInput {
                amount: amount.as_deref().map(parse_amount).transpose()?,
                date: date.as_deref().map(parse_date).transpose()?,
                ..UpdateTransactionInput::default()
            };
            if let Some(identifier) = label_type {
                let labels = SettingsService::new(storage).labels()?;
                let resolved = resolve_label(&labels, &identifier)?;
                input.label = Some(resolved.name);
                input.label_id = Some(Some(resolved.id));
            } else if let Some(text) = label {
                input.label = Some(text);
                input.label_id = Some(None);
            }

            if input.is_empty() {
                println!("No changes specified. Use --amount, --type, --label, or --date.");
                return Ok(());
            }

            let updated = service.update(txn.id, input)?;
            println!("Updated transaction: {}", updated.id);
            print!("{}", format_transaction_details(&updated));
        }

        TransactionCommands::Delete { id } => {
            let txn = service.resolve(&id)?;
            let deleted = service.delete(txn.id)?;
            println!(
                "Moved to trash: {} {} ({})",
                deleted.id(),
                deleted.transaction.amount,
                deleted.transaction.label
            );
            println!("Run 'pennywise txn restore {}' to undo.", deleted.id());
        }

        TransactionCommands::Restore { id } => {
            let deleted = service.resolve_deleted(&id)?;
            let txn = service.restore(deleted.id())?;
            println!("Restored: {} {} ({})", txn.id, txn.amount, txn.label);
        }

        TransactionCommands::Deleted => {
            let deleted = service.list_deleted()?;
            print!("{}", format_deleted_table(&deleted));
        }
    }

    Ok(())
}
