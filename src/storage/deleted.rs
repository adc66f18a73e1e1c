//! Deleted transaction repository
//!
//! Soft-deleted transactions live in deleted_transactions.json until they
//! are restored.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PennywiseError;
use crate::models::{DeletedTransaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};
use super::{ambiguous_id, lock_error};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct DeletedTransactionData {
    deleted_transactions: Vec<DeletedTransaction>,
}

pub struct DeletedTransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, DeletedTransaction>>,
}

impl DeletedTransactionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    pub fn load(&self) -> Result<(), PennywiseError> {
        let file_data: DeletedTransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        data.clear();
        for deleted in file_data.deleted_transactions {
            data.insert(deleted.id(), deleted);
        }

        Ok(())
    }

    pub fn save(&self) -> Result<(), PennywiseError> {
        let file_data = DeletedTransactionData {
            deleted_transactions: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn get(&self, id: TransactionId) -> Result<Option<DeletedTransaction>, PennywiseError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Find by full id or short prefix
    pub fn find(&self, identifier: &str) -> Result<Option<DeletedTransaction>, PennywiseError> {
        let data = self.data.read().map_err(lock_error)?;
        let matches: Vec<&DeletedTransaction> = data
            .values()
            .filter(|d| d.transaction.id.matches(identifier))
            .collect();
        match matches.as_slice() {
            [] => Ok(None),
            [deleted] => Ok(Some((*deleted).clone())),
            _ => Err(ambiguous_id(identifier, matches.len())),
        }
    }

    /// All deleted transactions, most recently deleted first
    pub fn get_all(&self) -> Result<Vec<DeletedTransaction>, PennywiseError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut deleted: Vec<_> = data.values().cloned().collect();
        deleted.sort_by(|a, b| {
            b.deleted_at
                .cmp(&a.deleted_at)
                .then(b.transaction.date.cmp(&a.transaction.date))
        });
        Ok(deleted)
    }

    pub fn upsert(&self, deleted: DeletedTransaction) -> Result<(), PennywiseError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.insert(deleted.id(), deleted);
        Ok(())
    }

    pub fn remove(&self, id: TransactionId) -> Result<Option<DeletedTransaction>, PennywiseError> {
        let mut data = self.data.write().map_err(lock_error)?;
        Ok(data.remove(&id))
    }

    pub fn count(&self) -> Result<usize, PennywiseError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}
