//! Per-user settings documents
//!
//! Three small documents live under `settings/`: the budget, the warning
//! thresholds and the transaction labels. Each is written through to disk on
//! every change.

use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{de::DeserializeOwned, Serialize};

use crate::config::paths::UserPaths;
use crate::error::PennywiseError;
use crate::models::{BudgetSettings, LabelList};
use crate::warning::WarningSettings;

use super::file_io::{read_json_opt, write_json_atomic};
use super::lock_error;

/// Repository for the budget, warning and label documents
pub struct SettingsRepository {
    budget_path: PathBuf,
    warning_path: PathBuf,
    labels_path: PathBuf,
    budget: RwLock<BudgetSettings>,
    warning: RwLock<WarningSettings>,
    labels: RwLock<LabelList>,
}

impl SettingsRepository {
    pub fn new(paths: &UserPaths) -> Self {
        Self {
            budget_path: paths.budget_file(),
            warning_path: paths.warning_file(),
            labels_path: paths.transaction_types_file(),
            budget: RwLock::new(BudgetSettings::default()),
            warning: RwLock::new(WarningSettings::default()),
            labels: RwLock::new(LabelList::default()),
        }
    }

    /// Write defaults for whichever documents are missing
    ///
    /// Existing documents are never touched. Returns the file names that
    /// were created.
    pub fn initialize_defaults(&self) -> Result<Vec<&'static str>, PennywiseError> {
        let mut created = Vec::new();

        if !self.budget_path.exists() {
            write_json_atomic(&self.budget_path, &BudgetSettings::default())?;
            created.push("budget.json");
        }
        if !self.warning_path.exists() {
            write_json_atomic(&self.warning_path, &WarningSettings::default())?;
            created.push("warning.json");
        }
        if !self.labels_path.exists() {
            write_json_atomic(&self.labels_path, &LabelList::default())?;
            created.push("transaction_types.json");
        }

        if !created.is_empty() {
            tracing::debug!(?created, "initialized default settings");
        }
        Ok(created)
    }

    /// Load all three documents; missing ones read as defaults
    pub fn load(&self) -> Result<(), PennywiseError> {
        load_into(&self.budget_path, &self.budget)?;
        load_into(&self.warning_path, &self.warning)?;
        load_into(&self.labels_path, &self.labels)?;
        Ok(())
    }

    pub fn budget(&self) -> Result<BudgetSettings, PennywiseError> {
        Ok(*self.budget.read().map_err(lock_error)?)
    }

    pub fn warning(&self) -> Result<WarningSettings, PennywiseError> {
        Ok(*self.warning.read().map_err(lock_error)?)
    }

    pub fn labels(&self) -> Result<LabelList, PennywiseError> {
        Ok(self.labels.read().map_err(lock_error)?.clone())
    }

    pub fn set_budget(&self, budget: BudgetSettings) -> Result<(), PennywiseError> {
        store(&self.budget_path, &self.budget, budget)
    }

    pub fn set_warning(&self, warning: WarningSettings) -> Result<(), PennywiseError> {
        store(&self.warning_path, &self.warning, warning)
    }

    pub fn set_labels(&self, labels: LabelList) -> Result<(), PennywiseError> {
        store(&self.labels_path, &self.labels, labels)
    }
}

fn load_into<T>(path: &Path, slot: &RwLock<T>) -> Result<(), PennywiseError>
where
    T: DeserializeOwned + Default,
{
    let value = read_json_opt(path)?.unwrap_or_default();
    *slot.write().map_err(lock_error)? = value;
    Ok(())
}

fn store<T: Serialize>(path: &Path, slot: &RwLock<T>, value: T) -> Result<(), PennywiseError> {
    let mut guard = slot.write().map_err(lock_error)?;
    write_json_atomic(path, &value)?;
    *guard = value;
    Ok(())
}
