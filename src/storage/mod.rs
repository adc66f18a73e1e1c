//! Storage layer for Pennywise
//!
//! Each signed-in user gets their own directory of JSON documents, written
//! atomically. [`Storage`] bundles the repositories for one user together
//! with their audit log and a change feed that front ends can subscribe to.

pub mod deleted;
pub mod feed;
pub mod file_io;
pub mod settings;
pub mod transactions;

pub use deleted::DeletedTransactionRepository;
pub use feed::{ChangeFeed, StoreEvent};
pub use file_io::{read_json, read_json_opt, read_json_required, write_json_atomic};
pub use settings::SettingsRepository;
pub use transactions::TransactionRepository;

use std::fmt::Display;
use std::sync::mpsc::Receiver;

use serde::Serialize;

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::config::paths::{PennywisePaths, UserPaths};
use crate::error::PennywiseError;
use crate::models::UserId;

pub(crate) fn lock_error<E: Display>(e: E) -> PennywiseError {
    PennywiseError::Storage(format!("Failed to acquire lock: {}", e))
}

pub(crate) fn ambiguous_id(identifier: &str, count: usize) -> PennywiseError {
    PennywiseError::Validation(format!(
        "Ambiguous id '{}': {} transactions match, use more characters",
        identifier, count
    ))
}

/// One user's data
pub struct Storage {
    paths: UserPaths,
    pub transactions: TransactionRepository,
    pub deleted: DeletedTransactionRepository,
    pub settings: SettingsRepository,
    audit: AuditLogger,
    feed: ChangeFeed,
}

impl Storage {
    /// Open the storage of `user` under the application data directory
    pub fn open(paths: &PennywisePaths, user: &UserId) -> Result<Self, PennywiseError> {
        Self::new(paths.for_user(user))
    }

    /// Create a Storage instance rooted at a user directory
    pub fn new(paths: UserPaths) -> Result<Self, PennywiseError> {
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            deleted: DeletedTransactionRepository::new(paths.deleted_transactions_file()),
            settings: SettingsRepository::new(&paths),
            audit: AuditLogger::new(paths.audit_log()),
            feed: ChangeFeed::new(),
            paths,
        })
    }

    pub fn paths(&self) -> &UserPaths {
        &self.paths
    }

    /// Write default settings documents for a new user
    pub fn initialize(&self) -> Result<Vec<&'static str>, PennywiseError> {
        self.settings.initialize_defaults()
    }

    /// Whether every settings document exists
    pub fn is_initialized(&self) -> bool {
        self.paths.budget_file().exists()
            && self.paths.warning_file().exists()
            && self.paths.transaction_types_file().exists()
    }

    /// Load all data from disk
    pub fn load_all(&self) -> Result<(), PennywiseError> {
        self.transactions.load()?;
        self.deleted.load()?;
        self.settings.load()?;
        tracing::debug!(
            root = %self.paths.root().display(),
            transactions = self.transactions.count()?,
            deleted = self.deleted.count()?,
            "loaded user data"
        );
        Ok(())
    }

    /// Subscribe to change notifications
    pub fn subscribe(&self) -> Result<Receiver<StoreEvent>, PennywiseError> {
        self.feed.subscribe()
    }

    /// Publish a change notification
    pub fn notify(&self, event: StoreEvent) -> Result<(), PennywiseError> {
        self.feed.publish(event)
    }

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), PennywiseError> {
        self.audit.log(&AuditEntry::create(
            entity_type,
            entity_id,
            entity_name,
            entity,
        ))
    }

    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Result<(), PennywiseError> {
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff_summary,
        ))
    }

    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Result<(), PennywiseError> {
        self.audit.log(&AuditEntry::delete(
            entity_type,
            entity_id,
            entity_name,
            entity,
        ))
    }

    pub fn log_restore<B: Serialize, A: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &B,
        after: &A,
    ) -> Result<(), PennywiseError> {
        self.audit.log(&AuditEntry::restore(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PennywisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths, &UserId::parse("alice").unwrap()).unwrap();

        assert!(temp_dir.path().join("users").join("alice").join("settings").exists());
        assert!(!storage.is_initialized());

        storage.initialize().unwrap();
        assert!(storage.is_initialized());
        storage.load_all().unwrap();
    }

    #[test]
    fn test_users_are_isolated() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PennywisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let alice = Storage::open(&paths, &UserId::parse("alice").unwrap()).unwrap();
        let bob = Storage::open(&paths, &UserId::parse("bob").unwrap()).unwrap();

        alice.initialize().unwrap();
        assert!(alice.is_initialized());
        assert!(!bob.is_initialized());
    }

    #[test]
    fn test_notify_reaches_subscriber() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PennywisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths, &UserId::parse("alice").unwrap()).unwrap();

        let rx = storage.subscribe().unwrap();
        storage.notify(StoreEvent::WarningChanged).unwrap();
        assert_eq!(rx.try_recv(), Ok(StoreEvent::WarningChanged));
    }
}
