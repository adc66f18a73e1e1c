//! Budget settings model
//!
//! The user's spending budget. Frequency is recorded with the amount but
//! spending is always tracked per calendar month.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::money::Money;

/// Budget used until the user sets one ($500)
pub const DEFAULT_BUDGET: Money = Money::from_cents(50_000);

/// How often the budget renews
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BudgetFrequency {
    #[default]
    Monthly,
    Yearly,
}

impl fmt::Display for BudgetFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for BudgetFrequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" | "month" => Ok(Self::Monthly),
            "yearly" | "year" | "annual" => Ok(Self::Yearly),
            other => Err(format!("Unknown budget frequency: {}", other)),
        }
    }
}

/// The user's budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSettings {
    pub amount: Money,

    #[serde(default)]
    pub frequency: BudgetFrequency,
}

impl Default for BudgetSettings {
    fn default() -> Self {
        Self {
            amount: DEFAULT_BUDGET,
            frequency: BudgetFrequency::Monthly,
        }
    }
}

impl BudgetSettings {
    pub fn new(amount: Money, frequency: BudgetFrequency) -> Self {
        Self { amount, frequency }
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.amount.is_negative() {
            return Err(BudgetValidationError::NegativeBudget);
        }
        Ok(())
    }
}

impl fmt::Display for BudgetSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.frequency)
    }
}

/// Validation errors for budget settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeBudget,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeBudget => write!(f, "Budget amount cannot be negative"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
