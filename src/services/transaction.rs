//! Transaction service
//!
//! Business logic for recording, editing, trashing and restoring spending
//! transactions. Every mutation is saved, audited, and announced on the
//! storage change feed.

use chrono::{DateTime, Utc};

use crate::audit::{generate_diff, EntityType};
use crate::error::{PennywiseError, PennywiseResult};
use crate::models::{DeletedTransaction, LabelId, Money, MonthKey, Transaction, TransactionId};
use crate::storage::{Storage, StoreEvent};

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Only this local calendar month
    pub month: Option<MonthKey>,
    /// Only transactions filed under this label
    pub label_id: Option<LabelId>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn month(mut self, month: MonthKey) -> Self {
        self.month = Some(month);
        self
    }

    pub fn label(mut self, label_id: LabelId) -> Self {
        self.label_id = Some(label_id);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for recording a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub amount: Money,
    pub label: String,
    pub label_id: Option<LabelId>,
    /// Defaults to now
    pub date: Option<DateTime<Utc>>,
}

impl CreateTransactionInput {
    pub fn new(amount: Money, label: impl Into<String>) -> Self {
        Self {
            amount,
            label: label.into(),
            label_id: None,
            date: None,
        }
    }
}

/// Fields to change on an existing transaction; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct UpdateTransactionInput {
    pub amount: Option<Money>,
    pub label: Option<String>,
    /// `Some(None)` detaches the transaction from any label
    pub label_id: Option<Option<LabelId>>,
    pub date: Option<DateTime<Utc>>,
}

impl UpdateTransactionInput {
    pub fn is_empty(&self) -> bool {
        self.amount.is_none()
            && self.label.is_none()
            && self.label_id.is_none()
            && self.date.is_none()
    }
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new transaction
    ///
    /// The transaction is stamped with the budget amount currently in effect.
    pub fn add(&self, input: CreateTransactionInput) -> PennywiseResult<Transaction> {
        if let Some(label_id) = &input.label_id {
            self.ensure_label_exists(label_id)?;
        }

        let budget = self.storage.settings.budget()?;
        let date = input.date.unwrap_or_else(Utc::now);

        let txn = Transaction::new(input.amount, input.label.trim(), date, budget.amount)
            .with_label_id(input.label_id);

        txn.validate()
            .map_err(|e| PennywiseError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        self.storage.log_create(
            EntityType::Transaction,
            txn.id.short(),
            Some(txn.label.clone()),
            &txn,
        )?;
        self.storage.notify(StoreEvent::TransactionsChanged)?;

        tracing::info!(id = %txn.id, amount = %txn.amount, label = %txn.label, "transaction added");
        Ok(txn)
    }

    pub fn get(&self, id: TransactionId) -> PennywiseResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full id or short prefix
    pub fn find(&self, identifier: &str) -> PennywiseResult<Option<Transaction>> {
        self.storage.transactions.find(identifier)
    }

    /// Like [`find`](Self::find), but a miss is an error
    pub fn resolve(&self, identifier: &str) -> PennywiseResult<Transaction> {
        self.find(identifier)?
            .ok_or_else(|| PennywiseError::transaction_not_found(identifier))
    }

    /// List transactions, newest first
    pub fn list(&self, filter: TransactionFilter) -> PennywiseResult<Vec<Transaction>> {
        let mut transactions = match filter.month {
            Some(month) => self.storage.transactions.get_by_month(month)?,
            None => self.storage.transactions.get_all()?,
        };

        if let Some(label_id) = &filter.label_id {
            transactions.retain(|t| t.label_id.as_ref() == Some(label_id));
        }

        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Trashed transactions, most recently deleted first
    pub fn list_deleted(&self) -> PennywiseResult<Vec<DeletedTransaction>> {
        self.storage.deleted.get_all()
    }

    /// Find a trashed transaction by full id or short prefix
    pub fn resolve_deleted(&self, identifier: &str) -> PennywiseResult<DeletedTransaction> {
        self.storage
            .deleted
            .find(identifier)?
            .ok_or_else(|| PennywiseError::deleted_transaction_not_found(identifier))
    }

    /// Edit a transaction
    pub fn update(
        &self,
        id: TransactionId,
        input: UpdateTransactionInput,
    ) -> PennywiseResult<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| PennywiseError::transaction_not_found(id.short()))?;

        let before = txn.clone();

        if let Some(amount) = input.amount {
            txn.amount = amount;
        }
        if let Some(label) = input.label {
            txn.label = label.trim().to_string();
        }
        if let Some(label_id) = input.label_id {
            if let Some(new_id) = &label_id {
                if txn.label_id.as_ref() != Some(new_id) {
                    self.ensure_label_exists(new_id)?;
                }
            }
            txn.label_id = label_id;
        }
        if let Some(date) = input.date {
            txn.date = date;
        }

        txn.validate()
            .map_err(|e| PennywiseError::Validation(e.to_string()))?;

        if txn == before {
            return Ok(txn);
        }
        txn.touch();

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;

        let diff = generate_diff(
            &serde_json::to_value(&before)?,
            &serde_json::to_value(&txn)?,
        );
        self.storage.log_update(
            EntityType::Transaction,
            txn.id.short(),
            Some(txn.label.clone()),
            &before,
            &txn,
            diff,
        )?;
        self.storage.notify(StoreEvent::TransactionsChanged)?;

        tracing::info!(id = %txn.id, "transaction updated");
        Ok(txn)
    }

    /// Move a transaction to the trash
    pub fn delete(&self, id: TransactionId) -> PennywiseResult<DeletedTransaction> {
        let txn = self
            .storage
            .transactions
            .remove(id)?
            .ok_or_else(|| PennywiseError::transaction_not_found(id.short()))?;

        let deleted = DeletedTransaction::new(txn.clone(), Utc::now());
        self.storage.deleted.upsert(deleted.clone())?;

        // the trash is written before the active list
        if let Err(e) = self.storage.deleted.save() {
            self.undo_delete(&txn)?;
            return Err(e);
        }
        if let Err(e) = self.storage.transactions.save() {
            self.undo_delete(&txn)?;
            if let Err(rewrite) = self.storage.deleted.save() {
                tracing::warn!(%id, error = %rewrite, "trash still lists transaction after failed delete");
            }
            return Err(e);
        }

        self.storage.log_delete(
            EntityType::Transaction,
            id.short(),
            Some(deleted.transaction.label.clone()),
            &deleted.transaction,
        )?;
        self.storage.notify(StoreEvent::TransactionsChanged)?;
        self.storage.notify(StoreEvent::DeletedTransactionsChanged)?;

        tracing::info!(%id, "transaction moved to trash");
        Ok(deleted)
    }

    /// Bring a transaction back from the trash
    pub fn restore(&self, id: TransactionId) -> PennywiseResult<Transaction> {
        let deleted = self
            .storage
            .deleted
            .remove(id)?
            .ok_or_else(|| PennywiseError::deleted_transaction_not_found(id.short()))?;

        let txn = deleted.transaction.clone();
        self.storage.transactions.upsert(txn.clone())?;

        if let Err(e) = self.storage.transactions.save() {
            self.undo_restore(&deleted)?;
            return Err(e);
        }
        if let Err(e) = self.storage.deleted.save() {
            self.undo_restore(&deleted)?;
            if let Err(rewrite) = self.storage.transactions.save() {
                tracing::warn!(%id, error = %rewrite, "transaction still active after failed restore");
            }
            return Err(e);
        }

        self.storage.log_restore(
            EntityType::Transaction,
            id.short(),
            Some(txn.label.clone()),
            &deleted,
            &txn,
        )?;
        self.storage.notify(StoreEvent::DeletedTransactionsChanged)?;
        self.storage.notify(StoreEvent::TransactionsChanged)?;

        tracing::info!(%id, "transaction restored");
        Ok(txn)
    }

    /// Put the in-memory collections back after a failed delete
    fn undo_delete(&self, txn: &Transaction) -> PennywiseResult<()> {
        self.storage.deleted.remove(txn.id)?;
        self.storage.transactions.upsert(txn.clone())
    }

    /// Put the in-memory collections back after a failed restore
    fn undo_restore(&self, deleted: &DeletedTransaction) -> PennywiseResult<()> {
        self.storage.transactions.remove(deleted.id())?;
        self.storage.deleted.upsert(deleted.clone())
    }

    fn ensure_label_exists(&self, label_id: &LabelId) -> PennywiseResult<()> {
        let labels = self.storage.settings.labels()?;
        if labels.get(label_id).is_none() {
            return Err(PennywiseError::label_not_found(label_id.as_str()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::Operation;
    use crate::config::paths::PennywisePaths;
    use crate::models::{BudgetFrequency, BudgetSettings, UserId, DEFAULT_BUDGET};
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PennywisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths, &UserId::parse("tester").unwrap()).unwrap();
        storage.initialize().unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn at(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, month, day, 12, 0, 0).unwrap()
    }

    fn input(cents: i64, label: &str, date: DateTime<Utc>) -> CreateTransactionInput {
        CreateTransactionInput {
            date: Some(date),
            ..CreateTransactionInput::new(Money::from_cents(cents), label)
        }
    }

    #[test]
    fn test_add_stamps_current_budget() {
        let (_temp_dir, storage) = create_test_storage();
        storage
            .settings
            .set_budget(BudgetSettings::new(
                Money::from_cents(80_000),
                BudgetFrequency::Monthly,
            ))
            .unwrap();

        let service = TransactionService::new(&storage);
        let txn = service.add(input(1250, " Food ", at(3, 10))).unwrap();

        assert_eq!(txn.label, "Food");
        assert_eq!(txn.budget_for_month, Money::from_cents(80_000));
        assert_eq!(service.get(txn.id).unwrap().unwrap(), txn);

        let audit = storage.audit().read_all().unwrap();
        assert_eq!(audit.len(), 1);
        assert_eq!(audit[0].operation, Operation::Create);
    }

    #[test]
    fn test_add_rejects_invalid() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let err = service.add(input(0, "Food", at(3, 10))).unwrap_err();
        assert!(err.is_validation());

        let err = service.add(input(100, "  ", at(3, 10))).unwrap_err();
        assert!(err.is_validation());

        let mut unknown = input(100, "Food", at(3, 10));
        unknown.label_id = Some(LabelId::new("nope"));
        assert!(service.add(unknown).unwrap_err().is_not_found());
    }

    #[test]
    fn test_add_notifies_subscribers() {
        let (_temp_dir, storage) = create_test_storage();
        let rx = storage.subscribe().unwrap();

        TransactionService::new(&storage)
            .add(input(100, "Food", at(3, 10)))
            .unwrap();
        assert_eq!(rx.try_recv(), Ok(StoreEvent::TransactionsChanged));
    }

    #[test]
    fn test_list_filters() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let mut food = input(100, "Food", at(3, 10));
        food.label_id = Some(LabelId::new("food"));
        service.add(food).unwrap();
        service.add(input(200, "Transport", at(3, 12))).unwrap();
        service.add(input(300, "Food", at(4, 2))).unwrap();

        let march = service
            .list(TransactionFilter::new().month(MonthKey::new(2025, 3).unwrap()))
            .unwrap();
        assert_eq!(march.len(), 2);
        assert_eq!(march[0].amount, Money::from_cents(200));

        let labelled = service
            .list(TransactionFilter::new().label(LabelId::new("food")))
            .unwrap();
        assert_eq!(labelled.len(), 1);

        let newest = service.list(TransactionFilter::new().limit(1)).unwrap();
        assert_eq!(newest[0].amount, Money::from_cents(300));
    }

    #[test]
    fn test_update_fields() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service.add(input(1250, "Food", at(3, 10))).unwrap();

        let updated = service
            .update(
                txn.id,
                UpdateTransactionInput {
                    amount: Some(Money::from_cents(1500)),
                    label: Some("Transport".into()),
                    label_id: Some(Some(LabelId::new("transport"))),
                    date: Some(at(3, 11)),
                },
            )
            .unwrap();

        assert_eq!(updated.amount, Money::from_cents(1500));
        assert_eq!(updated.label, "Transport");
        assert_eq!(updated.label_id, Some(LabelId::new("transport")));
        assert_eq!(updated.budget_for_month, txn.budget_for_month);

        let audit = storage.audit().read_all().unwrap();
        let summary = audit[1].diff_summary.as_deref().unwrap();
        assert!(summary.contains("amount: $12.50 -> $15.00"));
    }

    #[test]
    fn test_update_rejects_non_positive_amount() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service.add(input(1250, "Food", at(3, 10))).unwrap();

        let err = service
            .update(
                txn.id,
                UpdateTransactionInput {
                    amount: Some(Money::zero()),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            service.get(txn.id).unwrap().unwrap().amount,
            Money::from_cents(1250)
        );
    }

    #[test]
    fn test_noop_update_is_not_audited() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service.add(input(1250, "Food", at(3, 10))).unwrap();

        service
            .update(txn.id, UpdateTransactionInput::default())
            .unwrap();
        assert_eq!(storage.audit().read_all().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_and_restore_round_trip() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service.add(input(700, "Bills", at(3, 10))).unwrap();

        let deleted = service.delete(txn.id).unwrap();
        assert_eq!(deleted.transaction, txn);
        assert!(service.get(txn.id).unwrap().is_none());
        assert_eq!(service.list_deleted().unwrap().len(), 1);

        let restored = service.restore(txn.id).unwrap();
        assert_eq!(restored, txn);
        assert!(service.list_deleted().unwrap().is_empty());
        assert!(service.get(txn.id).unwrap().is_some());

        let ops: Vec<_> = storage
            .audit()
            .read_all()
            .unwrap()
            .iter()
            .map(|e| e.operation)
            .collect();
        assert_eq!(
            ops,
            vec![Operation::Create, Operation::Delete, Operation::Restore]
        );
    }

    #[test]
    fn test_deleted_transactions_survive_reload() {
        let (temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service.add(input(700, "Bills", at(3, 10))).unwrap();
        service.delete(txn.id).unwrap();

        let paths = PennywisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let reopened = Storage::open(&paths, &UserId::parse("tester").unwrap()).unwrap();
        reopened.load_all().unwrap();
        let service = TransactionService::new(&reopened);
        assert!(service.find(&txn.id.short()).unwrap().is_none());
        assert_eq!(service.resolve_deleted(&txn.id.short()).unwrap().id(), txn.id);
    }

    #[test]
    fn test_missing_ids_are_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let id = TransactionId::new();

        assert!(service.delete(id).unwrap_err().is_not_found());
        assert!(service.restore(id).unwrap_err().is_not_found());
        assert!(service.resolve("txn-ffff").unwrap_err().is_not_found());
    }

    fn block_with_directory(path: &std::path::Path) {
        let _ = std::fs::remove_file(path);
        std::fs::create_dir(path).unwrap();
    }

    fn reopen(temp_dir: &TempDir) -> Storage {
        let paths = PennywisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths, &UserId::parse("tester").unwrap()).unwrap();
        storage.load_all().unwrap();
        storage
    }

    #[test]
    fn test_failed_trash_write_keeps_transaction() {
        let (temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service.add(input(700, "Bills", at(3, 10))).unwrap();

        let trash = storage.paths().deleted_transactions_file();
        block_with_directory(&trash);

        assert!(service.delete(txn.id).is_err());
        assert!(storage.transactions.get(txn.id).unwrap().is_some());
        assert_eq!(storage.deleted.count().unwrap(), 0);

        std::fs::remove_dir(&trash).unwrap();
        let reopened = reopen(&temp_dir);
        assert!(reopened.transactions.get(txn.id).unwrap().is_some());
    }

    #[test]
    fn test_failed_active_write_rolls_back_delete() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service.add(input(700, "Bills", at(3, 10))).unwrap();

        block_with_directory(&storage.paths().transactions_file());

        assert!(service.delete(txn.id).is_err());
        assert!(storage.transactions.get(txn.id).unwrap().is_some());
        assert_eq!(storage.deleted.count().unwrap(), 0);

        let trash = crate::storage::DeletedTransactionRepository::new(
            storage.paths().deleted_transactions_file(),
        );
        trash.load().unwrap();
        assert_eq!(trash.count().unwrap(), 0);
    }

    #[test]
    fn test_failed_restore_keeps_trashed_copy() {
        let (temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service.add(input(700, "Bills", at(3, 10))).unwrap();
        service.delete(txn.id).unwrap();

        let active = storage.paths().transactions_file();
        block_with_directory(&active);

        assert!(service.restore(txn.id).is_err());
        assert!(storage.transactions.get(txn.id).unwrap().is_none());
        assert!(storage.deleted.get(txn.id).unwrap().is_some());

        std::fs::remove_dir(&active).unwrap();
        let reopened = reopen(&temp_dir);
        assert!(reopened.deleted.get(txn.id).unwrap().is_some());
    }

    #[test]
    fn test_resolve_rejects_shared_prefix() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        for (cents, id) in [
            (100, "abcd1111-0000-4000-8000-000000000000"),
            (200, "abcd2222-0000-4000-8000-000000000000"),
        ] {
            let mut txn =
                Transaction::new(Money::from_cents(cents), "Food", at(3, 1), DEFAULT_BUDGET);
            txn.id = id.parse().unwrap();
            storage.transactions.upsert(txn).unwrap();
        }

        assert!(service.resolve("abcd").unwrap_err().is_validation());
        assert_eq!(service.resolve("abcd2222").unwrap().amount, Money::from_cents(200));
    }
}
