//! Settings service
//!
//! Edits the budget, the warning thresholds and the label list. Warning
//! thresholds are checked against the current budget before they are saved.

use crate::audit::{generate_diff, generate_list_diff, EntityType};
use crate::error::{PennywiseError, PennywiseResult};
use crate::models::{BudgetSettings, LabelId, LabelList, TransactionLabel};
use crate::storage::{Storage, StoreEvent};
use crate::warning::{validate_thresholds, WarningSettings};

pub struct SettingsService<'a> {
    storage: &'a Storage,
}

impl<'a> SettingsService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    pub fn budget(&self) -> PennywiseResult<BudgetSettings> {
        self.storage.settings.budget()
    }

    pub fn warning(&self) -> PennywiseResult<WarningSettings> {
        self.storage.settings.warning()
    }

    pub fn labels(&self) -> PennywiseResult<LabelList> {
        self.storage.settings.labels()
    }

    /// Replace the budget
    ///
    /// Existing transactions keep the budget they were recorded under.
    pub fn update_budget(&self, budget: BudgetSettings) -> PennywiseResult<BudgetSettings> {
        budget
            .validate()
            .map_err(|e| PennywiseError::Validation(e.to_string()))?;

        let before = self.storage.settings.budget()?;
        self.storage.settings.set_budget(budget)?;

        self.storage.log_update(
            EntityType::BudgetSettings,
            "budget",
            None,
            &before,
            &budget,
            generate_diff(&serde_json::to_value(before)?, &serde_json::to_value(budget)?),
        )?;
        self.storage.notify(StoreEvent::BudgetChanged)?;

        tracing::info!(amount = %budget.amount, frequency = %budget.frequency, "budget updated");
        Ok(budget)
    }

    /// Replace the warning thresholds after validating them against the
    /// current budget
    pub fn update_warning(&self, warning: WarningSettings) -> PennywiseResult<WarningSettings> {
        let budget = self.storage.settings.budget()?;
        validate_thresholds(
            &warning.yellow,
            &warning.red,
            Some(budget.amount.as_dollars_f64()),
        )?;

        let before = self.storage.settings.warning()?;
        self.storage.settings.set_warning(warning)?;

        self.storage.log_update(
            EntityType::WarningSettings,
            "warning",
            None,
            &before,
            &warning,
            generate_diff(
                &serde_json::to_value(before)?,
                &serde_json::to_value(warning)?,
            ),
        )?;
        self.storage.notify(StoreEvent::WarningChanged)?;

        tracing::info!(
            yellow = warning.yellow.value,
            red = warning.red.value,
            "warning thresholds updated"
        );
        Ok(warning)
    }

    /// Append a new label
    pub fn add_label(&self, label: TransactionLabel) -> PennywiseResult<TransactionLabel> {
        self.modify_labels(|labels| {
            labels
                .add(label.clone())
                .map_err(|e| PennywiseError::Validation(e.to_string()))
        })?;
        Ok(label)
    }

    /// Rename or recolor a label
    ///
    /// Transactions already filed under the label keep their stored label
    /// text.
    pub fn update_label(&self, label: TransactionLabel) -> PennywiseResult<TransactionLabel> {
        let id = label.id.clone();
        self.modify_labels(|labels| {
            if labels.get(&id).is_none() {
                return Err(PennywiseError::label_not_found(id.as_str()));
            }
            labels
                .update(label.clone())
                .map(|_| ())
                .map_err(|e| PennywiseError::Validation(e.to_string()))
        })?;
        Ok(label)
    }

    /// Remove a label
    pub fn remove_label(&self, id: &LabelId) -> PennywiseResult<TransactionLabel> {
        let mut removed = None;
        self.modify_labels(|labels| {
            removed = labels.remove(id);
            removed
                .as_ref()
                .map(|_| ())
                .ok_or_else(|| PennywiseError::label_not_found(id.as_str()))
        })?;
        removed.ok_or_else(|| PennywiseError::label_not_found(id.as_str()))
    }

    /// Move the label at `from` to position `to` (both zero-based)
    pub fn reorder_labels(&self, from: usize, to: usize) -> PennywiseResult<LabelList> {
        self.modify_labels(|labels| {
            labels
                .reorder(from, to)
                .map_err(|e| PennywiseError::Validation(e.to_string()))
        })
    }

    fn modify_labels<F>(&self, change: F) -> PennywiseResult<LabelList>
    where
        F: FnOnce(&mut LabelList) -> PennywiseResult<()>,
    {
        let before = self.storage.settings.labels()?;
        let mut after = before.clone();
        change(&mut after)?;

        if after == before {
            return Ok(after);
        }

        self.storage.settings.set_labels(after.clone())?;

        let diff = generate_list_diff(
            &serde_json::to_value(&before)?,
            &serde_json::to_value(&after)?,
        );
        self.storage.log_update(
            EntityType::TransactionLabels,
            "transaction_types",
            None,
            &before,
            &after,
            diff,
        )?;
        self.storage.notify(StoreEvent::LabelsChanged)?;

        tracing::debug!(count = after.len(), "labels updated");
        Ok(after)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PennywisePaths;
    use crate::models::{BudgetFrequency, Money, UserId};
    use crate::warning::Threshold;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = PennywisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths, &UserId::parse("tester").unwrap()).unwrap();
        storage.initialize().unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_update_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SettingsService::new(&storage);
        let rx = storage.subscribe().unwrap();

        let budget = BudgetSettings::new(Money::from_cents(120_000), BudgetFrequency::Yearly);
        service.update_budget(budget).unwrap();

        assert_eq!(service.budget().unwrap(), budget);
        assert_eq!(rx.try_recv(), Ok(StoreEvent::BudgetChanged));

        let audit = storage.audit().read_all().unwrap();
        let summary = audit[0].diff_summary.as_deref().unwrap();
        assert!(summary.contains("amount: $500.00 -> $1,200.00"));
    }

    #[test]
    fn test_negative_budget_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SettingsService::new(&storage);
        let err = service
            .update_budget(BudgetSettings::new(
                Money::from_cents(-100),
                BudgetFrequency::Monthly,
            ))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_update_warning_validates_against_budget() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SettingsService::new(&storage);

        // $150 yellow vs 20% of the $500 budget ($100) red: fine
        let ok = WarningSettings::new(Threshold::amount(150.0), Threshold::percentage(20.0));
        service.update_warning(ok).unwrap();
        assert_eq!(service.warning().unwrap(), ok);

        // 40% of $500 is $200, which a $250 red does not stay below
        let bad = WarningSettings::new(Threshold::percentage(40.0), Threshold::amount(250.0));
        let err = service.update_warning(bad).unwrap_err();
        assert!(err.is_validation());
        assert!(err
            .to_string()
            .contains("Red warning threshold must be lower than yellow warning threshold"));
        assert_eq!(service.warning().unwrap(), ok);
    }

    #[test]
    fn test_label_lifecycle() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SettingsService::new(&storage);

        let coffee = service
            .add_label(TransactionLabel::new("Coffee", "#f97316"))
            .unwrap();
        assert_eq!(service.labels().unwrap().len(), 6);

        let renamed = TransactionLabel::with_id(coffee.id.clone(), "Cafe", "#ec4899");
        service.update_label(renamed).unwrap();
        assert_eq!(service.labels().unwrap().get(&coffee.id).unwrap().name, "Cafe");

        let removed = service.remove_label(&coffee.id).unwrap();
        assert_eq!(removed.name, "Cafe");
        assert!(service.remove_label(&coffee.id).unwrap_err().is_not_found());

        let audit = storage.audit().read_all().unwrap();
        assert_eq!(audit.len(), 3);
        assert!(audit[0]
            .diff_summary
            .as_deref()
            .unwrap()
            .contains("added Coffee"));
    }

    #[test]
    fn test_invalid_label_rejected() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SettingsService::new(&storage);

        let err = service
            .add_label(TransactionLabel::new("", "#f97316"))
            .unwrap_err();
        assert!(err.is_validation());

        let stray = TransactionLabel::new("Stray", "#f97316");
        assert!(service.update_label(stray).unwrap_err().is_not_found());
    }

    #[test]
    fn test_reorder_labels() {
        let (_temp_dir, storage) = create_test_storage();
        let service = SettingsService::new(&storage);

        let labels = service.reorder_labels(4, 0).unwrap();
        assert_eq!(labels.as_slice()[0].name, "Bills");
        assert_eq!(service.labels().unwrap(), labels);

        assert!(service.reorder_labels(0, 9).unwrap_err().is_validation());
    }
}
