//! Terminal User Interface module
//!
//! The keypad screen for entering an amount, the label picker that records
//! it, and the budget header that stays in sync with storage.

pub mod app;
pub mod event;
pub mod handler;
pub mod layout;
pub mod terminal;
pub mod views;
pub mod widgets;

pub use app::App;
pub use terminal::run_tui;
