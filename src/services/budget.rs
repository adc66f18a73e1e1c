//! Budget context
//!
//! A read-only snapshot of one user's budget, warning thresholds, labels and
//! transactions. Front ends build one with [`BudgetContext::load`] and rebuild
//! it whenever the storage change feed reports a change.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::PennywiseResult;
use crate::models::{BudgetSettings, LabelList, Money, MonthKey, Transaction, DEFAULT_BUDGET};
use crate::storage::Storage;
use crate::warning::{
    classify, classify_over_budget, describe_thresholds, ThresholdDescriptions, WarningSettings,
    WarningState,
};

/// Spending summary for one month of history
#[derive(Debug, Clone, PartialEq)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub spending: Money,
    /// Budget recorded on the month's transactions
    pub budget: Money,
    pub is_over_budget: bool,
    pub state: WarningState,
}

/// One year of history, newest month first
#[derive(Debug, Clone, PartialEq)]
pub struct YearHistory {
    pub year: i32,
    /// Spending over every transaction dated in the year
    pub total_spending: Money,
    pub months: Vec<MonthSummary>,
}

#[derive(Debug, Clone)]
pub struct BudgetContext {
    budget: BudgetSettings,
    warning: WarningSettings,
    labels: LabelList,
    /// Newest first
    transactions: Vec<Transaction>,
}

impl BudgetContext {
    pub fn new(
        budget: BudgetSettings,
        warning: WarningSettings,
        labels: LabelList,
        mut transactions: Vec<Transaction>,
    ) -> Self {
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Self {
            budget,
            warning,
            labels,
            transactions,
        }
    }

    /// Snapshot the current state of `storage`
    pub fn load(storage: &Storage) -> PennywiseResult<Self> {
        Ok(Self::new(
            storage.settings.budget()?,
            storage.settings.warning()?,
            storage.settings.labels()?,
            storage.transactions.get_all()?,
        ))
    }

    pub fn budget(&self) -> &BudgetSettings {
        &self.budget
    }

    pub fn warning(&self) -> &WarningSettings {
        &self.warning
    }

    pub fn labels(&self) -> &LabelList {
        &self.labels
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions dated in `month`, newest first
    pub fn month_transactions(&self, month: MonthKey) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.month() == month)
            .collect()
    }

    /// Total spent in `month`
    pub fn month_spending(&self, month: MonthKey) -> Money {
        self.month_transactions(month)
            .into_iter()
            .map(|t| t.amount)
            .sum()
    }

    /// Budget recorded for `month`
    ///
    /// Taken from the newest transaction in the month; months without
    /// transactions report the default budget.
    pub fn month_budget(&self, month: MonthKey) -> Money {
        self.transactions
            .iter()
            .find(|t| t.month() == month)
            .map(|t| t.budget_for_month)
            .unwrap_or(DEFAULT_BUDGET)
    }

    /// Whether any transaction is dated in `month`
    pub fn has_data(&self, month: MonthKey) -> bool {
        self.transactions.iter().any(|t| t.month() == month)
    }

    /// Summary of a single month for the month detail view
    ///
    /// Unlike [`history`](Self::history), a month without transactions
    /// reports the currently configured budget.
    pub fn month_summary(&self, month: MonthKey) -> MonthSummary {
        let budget = if self.has_data(month) {
            self.month_budget(month)
        } else {
            self.budget.amount
        };
        summarize(month, self.month_spending(month), budget)
    }

    pub fn current_month_spending(&self, today: NaiveDate) -> Money {
        self.month_spending(MonthKey::from_date(today))
    }

    /// Budget minus this month's spending; negative once over budget
    pub fn budget_left(&self, today: NaiveDate) -> Money {
        self.budget.amount - self.current_month_spending(today)
    }

    /// Share of the budget spent this month, rounded to a whole percent
    ///
    /// With a zero budget this is 0 until something is spent, then 100.
    pub fn spent_percentage(&self, today: NaiveDate) -> u32 {
        let spent = self.current_month_spending(today);
        if !self.budget.amount.is_positive() {
            return if spent.is_positive() { 100 } else { 0 };
        }
        let ratio = spent.as_dollars_f64() / self.budget.amount.as_dollars_f64();
        (ratio * 100.0).round().max(0.0) as u32
    }

    pub fn current_warning_state(&self, today: NaiveDate) -> WarningState {
        classify(
            self.budget_left(today).as_dollars_f64(),
            self.budget.amount.as_dollars_f64(),
            &self.warning,
        )
    }

    /// Whether the red warning banner should be shown
    pub fn should_show_warning(&self, today: NaiveDate) -> bool {
        self.current_warning_state(today) == WarningState::Red
    }

    pub fn threshold_descriptions(&self) -> ThresholdDescriptions {
        describe_thresholds(&self.warning)
    }

    /// Spending history up to and including the month of `today`
    ///
    /// Only months with transactions appear. Years and months are newest first.
    pub fn history(&self, today: NaiveDate) -> Vec<YearHistory> {
        let current = MonthKey::from_date(today);

        let mut months: Vec<MonthKey> = self
            .transactions
            .iter()
            .map(Transaction::month)
            .filter(|m| *m <= current)
            .collect();
        months.sort_unstable_by(|a, b| b.cmp(a));
        months.dedup();

        let mut year_totals: BTreeMap<i32, Money> = BTreeMap::new();
        for txn in &self.transactions {
            *year_totals.entry(txn.month().year).or_insert_with(Money::zero) += txn.amount;
        }

        let mut years: Vec<YearHistory> = Vec::new();
        for month in months {
            let summary = summarize(month, self.month_spending(month), self.month_budget(month));

            match years.last_mut() {
                Some(year) if year.year == month.year => year.months.push(summary),
                _ => years.push(YearHistory {
                    year: month.year,
                    total_spending: year_totals.get(&month.year).copied().unwrap_or_default(),
                    months: vec![summary],
                }),
            }
        }
        years
    }
}

fn summarize(month: MonthKey, spending: Money, budget: Money) -> MonthSummary {
    MonthSummary {
        month,
        spending,
        budget,
        is_over_budget: spending > budget,
        state: classify_over_budget(spending.as_dollars_f64(), budget.as_dollars_f64()),
    }
}

impl MonthSummary {
    /// Budget minus spending; negative when over budget
    pub fn leftover(&self) -> Money {
        self.budget - self.spending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::PennywisePaths;
    use crate::models::{BudgetFrequency, UserId};
    use crate::services::{CreateTransactionInput, TransactionService};
    use chrono::{DateTime, TimeZone, Utc};
    use tempfile::TempDir;

    fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap()
    }

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn txn(cents: i64, date: DateTime<Utc>, budget_cents: i64) -> Transaction {
        Transaction::new(
            Money::from_cents(cents),
            "Food",
            date,
            Money::from_cents(budget_cents),
        )
    }

    fn context(budget_cents: i64, transactions: Vec<Transaction>) -> BudgetContext {
        BudgetContext::new(
            BudgetSettings::new(Money::from_cents(budget_cents), BudgetFrequency::Monthly),
            WarningSettings::default(),
            LabelList::default(),
            transactions,
        )
    }

    #[test]
    fn test_current_month_figures() {
        let ctx = context(
            100_000,
            vec![
                txn(30_000, at(2025, 3, 10), 100_000),
                txn(25_000, at(2025, 3, 14), 100_000),
                txn(99_900, at(2025, 2, 14), 100_000),
            ],
        );
        let today = day(2025, 3, 15);

        assert_eq!(ctx.current_month_spending(today), Money::from_cents(55_000));
        assert_eq!(ctx.budget_left(today), Money::from_cents(45_000));
        assert_eq!(ctx.spent_percentage(today), 55);
        assert_eq!(ctx.current_warning_state(today), WarningState::Green);
        assert!(!ctx.should_show_warning(today));
    }

    #[test]
    fn test_warning_states_follow_budget_left() {
        let today = day(2025, 3, 15);

        let yellow = context(100_000, vec![txn(70_000, at(2025, 3, 2), 100_000)]);
        assert_eq!(yellow.current_warning_state(today), WarningState::Yellow);

        let red = context(100_000, vec![txn(90_000, at(2025, 3, 2), 100_000)]);
        assert_eq!(red.current_warning_state(today), WarningState::Red);
        assert!(red.should_show_warning(today));

        let over = context(100_000, vec![txn(120_000, at(2025, 3, 2), 100_000)]);
        assert_eq!(over.budget_left(today), Money::from_cents(-20_000));
        assert_eq!(over.spent_percentage(today), 120);
        assert!(over.should_show_warning(today));
    }

    #[test]
    fn test_zero_budget_percentage() {
        let today = day(2025, 3, 15);
        assert_eq!(context(0, vec![]).spent_percentage(today), 0);
        assert_eq!(
            context(0, vec![txn(100, at(2025, 3, 2), 0)]).spent_percentage(today),
            100
        );
    }

    #[test]
    fn test_month_transactions_newest_first() {
        let ctx = context(
            50_000,
            vec![
                txn(100, at(2025, 3, 1), 50_000),
                txn(200, at(2025, 3, 20), 50_000),
                txn(300, at(2025, 4, 2), 50_000),
            ],
        );
        let march = ctx.month_transactions(MonthKey::new(2025, 3).unwrap());
        let amounts: Vec<_> = march.iter().map(|t| t.amount.cents()).collect();
        assert_eq!(amounts, vec![200, 100]);
        assert!(ctx
            .month_transactions(MonthKey::new(2024, 3).unwrap())
            .is_empty());
    }

    #[test]
    fn test_history_groups_by_year() {
        let ctx = context(
            50_000,
            vec![
                txn(5_000, at(2024, 11, 5), 40_000),
                txn(45_000, at(2024, 12, 5), 40_000),
                txn(20_000, at(2025, 1, 10), 50_000),
                txn(5_000, at(2025, 2, 10), 50_000),
                // Future month, left out of the history
                txn(1_000, at(2025, 6, 10), 50_000),
            ],
        );

        let history = ctx.history(day(2025, 2, 20));
        assert_eq!(history.len(), 2);

        let this_year = &history[0];
        assert_eq!(this_year.year, 2025);
        assert_eq!(
            this_year
                .months
                .iter()
                .map(|m| m.month.month)
                .collect::<Vec<_>>(),
            vec![2, 1]
        );
        // Year totals count every transaction dated in the year
        assert_eq!(this_year.total_spending, Money::from_cents(26_000));

        let last_year = &history[1];
        assert_eq!(last_year.year, 2024);
        assert_eq!(last_year.total_spending, Money::from_cents(50_000));

        let december = &last_year.months[0];
        assert_eq!(december.budget, Money::from_cents(40_000));
        assert!(december.is_over_budget);
        assert_eq!(december.state, WarningState::Red);

        let november = &last_year.months[1];
        assert!(!november.is_over_budget);
        assert_eq!(november.state, WarningState::Green);
    }

    #[test]
    fn test_month_budget_uses_newest_transaction() {
        let ctx = context(
            50_000,
            vec![
                txn(100, at(2025, 3, 1), 30_000),
                txn(100, at(2025, 3, 20), 60_000),
            ],
        );
        let march = MonthKey::new(2025, 3).unwrap();
        assert_eq!(ctx.month_budget(march), Money::from_cents(60_000));
        assert_eq!(
            ctx.month_budget(MonthKey::new(2025, 1).unwrap()),
            DEFAULT_BUDGET
        );
    }

    #[test]
    fn test_month_summary_falls_back_to_current_budget() {
        let ctx = context(
            80_000,
            vec![txn(45_000, at(2025, 3, 5), 40_000)],
        );

        let march = ctx.month_summary(MonthKey::new(2025, 3).unwrap());
        assert_eq!(march.budget, Money::from_cents(40_000));
        assert_eq!(march.leftover(), Money::from_cents(-5_000));
        assert!(march.is_over_budget);

        let april = MonthKey::new(2025, 4).unwrap();
        assert!(!ctx.has_data(april));
        let summary = ctx.month_summary(april);
        assert_eq!(summary.budget, Money::from_cents(80_000));
        assert_eq!(summary.spending, Money::zero());
        assert_eq!(summary.state, WarningState::Green);
    }

    #[test]
    fn test_load_from_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PennywisePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(&paths, &UserId::parse("tester").unwrap()).unwrap();
        storage.initialize().unwrap();
        storage.load_all().unwrap();

        TransactionService::new(&storage)
            .add(CreateTransactionInput {
                date: Some(at(2025, 3, 10)),
                ..CreateTransactionInput::new(Money::from_cents(12_500), "Food")
            })
            .unwrap();

        let ctx = BudgetContext::load(&storage).unwrap();
        assert_eq!(ctx.budget().amount, DEFAULT_BUDGET);
        assert_eq!(ctx.labels().len(), 5);
        assert_eq!(
            ctx.current_month_spending(day(2025, 3, 31)),
            Money::from_cents(12_500)
        );
        assert_eq!(
            ctx.threshold_descriptions().yellow_sentence(),
            "Yellow when 40% left"
        );
    }
}
