//! Audit log
//!
//! Every create, update, delete and restore is appended to the signed-in
//! user's `audit.log` as one JSON line with before/after values and a short
//! human-readable change summary.
//!
//! ```rust,ignore
//! use pennywise::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(user_paths.audit_log());
//! logger.log(&AuditEntry::create(
//!     EntityType::Transaction,
//!     txn.id.short(),
//!     Some(txn.label.clone()),
//!     &txn,
//! ))?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::{generate_diff, generate_list_diff};
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
