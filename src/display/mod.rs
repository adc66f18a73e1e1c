//! Display formatting for terminal output
//!
//! Plain-text tables and summaries used by the CLI.

pub mod budget;
pub mod currency;
pub mod history;
pub mod label;
pub mod transaction;

pub use budget::{format_budget_status, format_progress_bar, format_warning_settings};
pub use currency::{format_currency, format_currency_exact};
pub use history::{format_history_tree, format_month_detail};
pub use label::format_label_list;
pub use transaction::{
    format_deleted_table, format_transaction_details, format_transaction_row,
    format_transaction_table,
};
