//! Core data models for Pennywise
//!
//! This module contains the data structures of the spending tracker:
//! transactions, labels, the budget, and calendar months.

pub mod budget;
pub mod ids;
pub mod label;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::{BudgetFrequency, BudgetSettings, BudgetValidationError, DEFAULT_BUDGET};
pub use ids::{InvalidUserId, LabelId, TransactionId, UserId};
pub use label::{
    default_labels, LabelList, LabelValidationError, TransactionLabel, DEFAULT_LABEL_COLOR,
    LABEL_PALETTE, MAX_LABEL_NAME_LEN,
};
pub use money::{Money, MoneyParseError};
pub use period::{MonthKey, MonthKeyParseError};
pub use transaction::{DeletedTransaction, Transaction, TransactionValidationError};
