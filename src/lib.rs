//! Pennywise - keypad-first monthly spending tracker
//!
//! Spending is entered on a calculator keypad, tagged with a label, and
//! measured against a monthly budget. Warning thresholds turn the budget
//! header yellow and then red as the month's money runs out.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `auth`: The signed-in user
//! - `models`: Core data models (money, transactions, budgets, labels)
//! - `calculator`: The keypad engine and long-press detection
//! - `warning`: Warning thresholds and color classification
//! - `storage`: Per-user JSON file storage and the change feed
//! - `audit`: Audit logging system
//! - `services`: Business logic layer
//! - `cli`, `display`, `tui`: The front ends
//!
//! # Example
//!
//! ```rust,ignore
//! use pennywise::auth::Session;
//! use pennywise::config::paths::PennywisePaths;
//! use pennywise::services::BudgetContext;
//!
//! let session = Session::restore(PennywisePaths::new()?)?;
//! let storage = session.open_storage()?;
//! let ctx = BudgetContext::load(&storage)?;
//! ```

pub mod audit;
pub mod auth;
pub mod calculator;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;
pub mod tui;
pub mod warning;

pub use error::{PennywiseError, PennywiseResult};
