//! Transaction model
//!
//! A spending entry. Each transaction carries a snapshot of the budget that
//! was in effect when it was recorded, so past months keep their own budget.
//! Deleting moves a transaction to a separate trash list stamped with the
//! deletion time.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::budget::DEFAULT_BUDGET;
use super::ids::{LabelId, TransactionId};
use super::money::Money;
use super::period::MonthKey;

fn default_budget_for_month() -> Money {
    DEFAULT_BUDGET
}

/// A spending transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Amount spent, always positive
    pub amount: Money,

    /// Label name as shown to the user
    pub label: String,

    /// The transaction label this was filed under, if any
    #[serde(default)]
    pub label_id: Option<LabelId>,

    /// When the spending happened
    pub date: DateTime<Utc>,

    /// Budget amount in effect when this was recorded
    #[serde(default = "default_budget_for_month")]
    pub budget_for_month: Money,

    /// When the transaction was last modified
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Create a new transaction dated `date`
    pub fn new(
        amount: Money,
        label: impl Into<String>,
        date: DateTime<Utc>,
        budget_for_month: Money,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            amount,
            label: label.into(),
            label_id: None,
            date,
            budget_for_month,
            updated_at: Utc::now(),
        }
    }

    /// Attach a label id
    pub fn with_label_id(mut self, label_id: Option<LabelId>) -> Self {
        self.label_id = label_id;
        self
    }

    /// The local calendar month this transaction counts toward
    pub fn month(&self) -> MonthKey {
        MonthKey::of(self.date)
    }

    /// Mark as modified
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if self.label.trim().is_empty() {
            return Err(TransactionValidationError::EmptyLabel);
        }

        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.date.format("%Y-%m-%d"),
            self.label,
            self.amount
        )
    }
}

/// A transaction in the trash
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedTransaction {
    #[serde(flatten)]
    pub transaction: Transaction,

    pub deleted_at: DateTime<Utc>,
}

impl DeletedTransaction {
    pub fn new(transaction: Transaction, deleted_at: DateTime<Utc>) -> Self {
        Self {
            transaction,
            deleted_at,
        }
    }

    pub fn id(&self) -> TransactionId {
        self.transaction.id
    }

    /// Take the transaction back out of the trash
    pub fn into_transaction(self) -> Transaction {
        self.transaction
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    EmptyLabel,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::EmptyLabel => write!(f, "Transaction label cannot be empty"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
