//! Service layer for Pennywise
//!
//! Business logic on top of the storage layer: validation, audit logging,
//! change notifications, and the derived budget figures the front ends show.

pub mod budget;
pub mod settings;
pub mod transaction;

pub use budget::{BudgetContext, MonthSummary, YearHistory};
pub use settings::SettingsService;
pub use transaction::{
    CreateTransactionInput, TransactionFilter, TransactionService, UpdateTransactionInput,
};
