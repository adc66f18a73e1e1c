//! Audit log records
//!
//! What changed (operation and entity) and the record's JSON snapshots
//! around the change.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    /// Moved to the trash
    Delete,
    /// Brought back from the trash
    Restore,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Update => write!(f, "UPDATE"),
            Operation::Delete => write!(f, "DELETE"),
            Operation::Restore => write!(f, "RESTORE"),
        }
    }
}

/// Types of records that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Transaction,
    BudgetSettings,
    WarningSettings,
    TransactionLabels,
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityType::Transaction => write!(f, "Transaction"),
            EntityType::BudgetSettings => write!(f, "Budget"),
            EntityType::WarningSettings => write!(f, "Warning"),
            EntityType::TransactionLabels => write!(f, "Labels"),
        }
    }
}

/// One line of the audit log
///
/// `before` and `after` are JSON snapshots of the record. A create has only
/// `after`, a delete only `before`. A restore carries the trashed record
/// (with its `deleted_at`) as `before`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub operation: Operation,
    pub entity_type: EntityType,
    pub entity_id: String,

    /// A transaction's label, for instance
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub before: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub after: Option<serde_json::Value>,

    /// Field-by-field summary of an update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff_summary: Option<String>,
}

fn snapshot<T: Serialize>(value: &T) -> Option<serde_json::Value> {
    serde_json::to_value(value).ok()
}

impl AuditEntry {
    fn stamped(
        operation: Operation,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: Option<serde_json::Value>,
        after: Option<serde_json::Value>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            operation,
            entity_type,
            entity_id: entity_id.into(),
            entity_name,
            before,
            after,
            diff_summary: None,
        }
    }

    pub fn create<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self::stamped(
            Operation::Create,
            entity_type,
            entity_id,
            entity_name,
            None,
            snapshot(entity),
        )
    }

    pub fn update<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
        diff_summary: Option<String>,
    ) -> Self {
        Self {
            diff_summary,
            ..Self::stamped(
                Operation::Update,
                entity_type,
                entity_id,
                entity_name,
                snapshot(before),
                snapshot(after),
            )
        }
    }

    /// A move to the trash
    pub fn delete<T: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) -> Self {
        Self::stamped(
            Operation::Delete,
            entity_type,
            entity_id,
            entity_name,
            snapshot(entity),
            None,
        )
    }

    pub fn restore<B: Serialize, A: Serialize>(
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        trashed: &B,
        restored: &A,
    ) -> Self {
        Self::stamped(
            Operation::Restore,
            entity_type,
            entity_id,
            entity_name,
            snapshot(trashed),
            snapshot(restored),
        )
    }

    /// `[time] OPERATION Entity id (name)`, then the changes on an
    /// indented second line when there are any
    pub fn format_human_readable(&self) -> String {
        let name = self
            .entity_name
            .as_deref()
            .map(|name| format!(" ({})", name))
            .unwrap_or_default();
        let changes = self
            .diff_summary
            .as_deref()
            .map(|diff| format!("\n  Changes: {}", diff))
            .unwrap_or_default();

        format!(
            "[{}] {} {} {}{}{}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.operation,
            self.entity_type,
            self.entity_id,
            name,
            changes
        )
    }
}
