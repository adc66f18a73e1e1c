//! Transaction repository for JSON storage
//!
//! Manages loading and saving active transactions to transactions.json, with
//! a per-month index used by the budget views.

use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::PennywiseError;
use crate::models::{MonthKey, Transaction, TransactionId};

use super::file_io::{read_json, write_json_atomic};
use super::{ambiguous_id, lock_error};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with a month index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: local month -> transaction ids
    by_month: RwLock<BTreeMap<MonthKey, Vec<TransactionId>>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_month: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load transactions from disk and build the month index
    pub fn load(&self) -> Result<(), PennywiseError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_month = self.by_month.write().map_err(lock_error)?;

        data.clear();
        by_month.clear();

        for txn in file_data.transactions {
            by_month.entry(txn.month()).or_default().push(txn.id);
            data.insert(txn.id, txn);
        }

        Ok(())
    }

    /// Save transactions to disk, newest first
    pub fn save(&self) -> Result<(), PennywiseError> {
        let file_data = TransactionData {
            transactions: self.get_all()?,
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: TransactionId) -> Result<Option<Transaction>, PennywiseError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.get(&id).cloned())
    }

    /// Find a transaction by full id or short prefix
    ///
    /// A prefix shared by several transactions is rejected rather than
    /// resolved to one of them.
    pub fn find(&self, identifier: &str) -> Result<Option<Transaction>, PennywiseError> {
        let data = self.data.read().map_err(lock_error)?;
        let matches: Vec<&Transaction> =
            data.values().filter(|t| t.id.matches(identifier)).collect();
        match matches.as_slice() {
            [] => Ok(None),
            [txn] => Ok(Some((*txn).clone())),
            _ => Err(ambiguous_id(identifier, matches.len())),
        }
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, PennywiseError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Get the transactions of one local calendar month, newest first
    pub fn get_by_month(&self, month: MonthKey) -> Result<Vec<Transaction>, PennywiseError> {
        let data = self.data.read().map_err(lock_error)?;
        let by_month = self.by_month.read().map_err(lock_error)?;

        let ids = by_month.get(&month).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        sort_newest_first(&mut transactions);
        Ok(transactions)
    }

    /// Months that have at least one transaction, oldest first
    pub fn months(&self) -> Result<Vec<MonthKey>, PennywiseError> {
        let by_month = self.by_month.read().map_err(lock_error)?;
        Ok(by_month
            .iter()
            .filter(|(_, ids)| !ids.is_empty())
            .map(|(month, _)| *month)
            .collect())
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), PennywiseError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_month = self.by_month.write().map_err(lock_error)?;

        if let Some(old) = data.get(&txn.id) {
            if let Some(ids) = by_month.get_mut(&old.month()) {
                ids.retain(|&id| id != txn.id);
            }
        }

        by_month.entry(txn.month()).or_default().push(txn.id);
        data.insert(txn.id, txn);
        Ok(())
    }

    /// Remove a transaction, returning it if it existed
    pub fn remove(&self, id: TransactionId) -> Result<Option<Transaction>, PennywiseError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_month = self.by_month.write().map_err(lock_error)?;

        let removed = data.remove(&id);
        if let Some(txn) = &removed {
            if let Some(ids) = by_month.get_mut(&txn.month()) {
                ids.retain(|&tid| tid != id);
            }
        }
        Ok(removed)
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, PennywiseError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

fn sort_newest_first(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| {
        b.date
            .cmp(&a.date)
            .then(b.updated_at.cmp(&a.updated_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, DEFAULT_BUDGET};
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, TransactionRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("transactions.json");
        let repo = TransactionRepository::new(path);
        (temp_dir, repo)
    }

    fn txn(cents: i64, month: u32, day: u32) -> Transaction {
        let date = Utc.with_ymd_and_hms(2025, month, day, 12, 0, 0).unwrap();
        Transaction::new(Money::from_cents(cents), "Food", date, DEFAULT_BUDGET)
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.months().unwrap().is_empty());
    }

    #[test]
    fn test_upsert_and_get() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let t = txn(1250, 3, 10);
        let id = t.id;
        repo.upsert(t).unwrap();

        let retrieved = repo.get(id).unwrap().unwrap();
        assert_eq!(retrieved.amount, Money::from_cents(1250));
        assert_eq!(repo.find(&id.short()).unwrap().unwrap().id, id);
    }

    #[test]
    fn test_find_rejects_shared_prefix() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let mut first = txn(100, 3, 1);
        first.id = "abcd1111-0000-4000-8000-000000000000".parse().unwrap();
        let mut second = txn(200, 3, 2);
        second.id = "abcd2222-0000-4000-8000-000000000000".parse().unwrap();
        repo.upsert(first).unwrap();
        repo.upsert(second).unwrap();

        let err = repo.find("abcd").unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("2 transactions match"));

        assert_eq!(repo.find("abcd2").unwrap().unwrap().amount, Money::from_cents(200));
        assert_eq!(repo.find("txn-abcd1111").unwrap().unwrap().amount, Money::from_cents(100));
    }

    #[test]
    fn test_save_and_reload() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let t = txn(999, 2, 3);
        let id = t.id;
        repo.upsert(t).unwrap();
        repo.save().unwrap();

        let repo2 = TransactionRepository::new(temp_dir.path().join("transactions.json"));
        repo2.load().unwrap();
        assert_eq!(repo2.get(id).unwrap().unwrap().amount, Money::from_cents(999));
    }

    #[test]
    fn test_get_all_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.upsert(txn(100, 1, 5)).unwrap();
        repo.upsert(txn(200, 3, 5)).unwrap();
        repo.upsert(txn(300, 2, 5)).unwrap();

        let amounts: Vec<i64> = repo
            .get_all()
            .unwrap()
            .iter()
            .map(|t| t.amount.cents())
            .collect();
        assert_eq!(amounts, vec![200, 300, 100]);
    }

    #[test]
    fn test_month_index_follows_updates() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let march = MonthKey::new(2025, 3).unwrap();
        let april = MonthKey::new(2025, 4).unwrap();

        let mut t = txn(500, 3, 15);
        let id = t.id;
        repo.upsert(t.clone()).unwrap();
        repo.upsert(txn(700, 3, 20)).unwrap();
        assert_eq!(repo.get_by_month(march).unwrap().len(), 2);

        t.date = Utc.with_ymd_and_hms(2025, 4, 15, 12, 0, 0).unwrap();
        repo.upsert(t).unwrap();
        assert_eq!(repo.get_by_month(march).unwrap().len(), 1);
        assert_eq!(repo.get_by_month(april).unwrap()[0].id, id);
        assert_eq!(repo.months().unwrap(), vec![march, april]);

        repo.remove(id).unwrap();
        assert!(repo.get_by_month(april).unwrap().is_empty());
        assert_eq!(repo.months().unwrap(), vec![march]);
    }

    #[test]
    fn test_remove_missing() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert!(repo.remove(TransactionId::new()).unwrap().is_none());
    }
}
