//! Budget warning classification
//!
//! Maps how much budget is left to a three-level [`WarningState`]. None of
//! these functions fail: degenerate inputs short-circuit to a defined state.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::settings::{Threshold, WarningSettings};

/// Yellow default for spending-based classification (percent of budget left)
pub const SPENDING_YELLOW_VALUE: f64 = 60.0;

/// Red default for spending-based classification (percent of budget left)
pub const SPENDING_RED_VALUE: f64 = 80.0;

/// Severity of the remaining budget, ordered `Green < Yellow < Red`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningState {
    /// Safe spending level
    Green,
    /// Warning threshold reached
    Yellow,
    /// Critical threshold reached, or over budget
    Red,
}

impl WarningState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }
}

impl fmt::Display for WarningState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Thresholds applied when spending-based classification gets no settings
pub fn spending_defaults() -> WarningSettings {
    WarningSettings::new(
        Threshold::percentage(SPENDING_YELLOW_VALUE),
        Threshold::percentage(SPENDING_RED_VALUE),
    )
}

/// Classify the remaining budget
///
/// Anything at or below zero left is red. A zero or negative total budget
/// cannot be turned into ratios and is green. The red threshold is checked
/// before the yellow one, so settings with red above yellow still report red
/// for low remaining amounts.
///
/// # Examples
/// ```
/// use pennywise::warning::{classify, WarningSettings, WarningState};
///
/// let settings = WarningSettings::default(); // yellow at 40% left, red at 20%
/// assert_eq!(classify(500.0, 1000.0, &settings), WarningState::Green);
/// assert_eq!(classify(300.0, 1000.0, &settings), WarningState::Yellow);
/// assert_eq!(classify(100.0, 1000.0, &settings), WarningState::Red);
/// ```
pub fn classify(budget_left: f64, total_budget: f64, settings: &WarningSettings) -> WarningState {
    if budget_left <= 0.0 {
        return WarningState::Red;
    }
    if total_budget <= 0.0 {
        return WarningState::Green;
    }

    let settings = settings.normalized();
    let yellow_threshold = settings.yellow.to_amount(total_budget);
    let red_threshold = settings.red.to_amount(total_budget);

    if budget_left <= red_threshold {
        WarningState::Red
    } else if budget_left <= yellow_threshold {
        WarningState::Yellow
    } else {
        WarningState::Green
    }
}

/// Classify from the amount spent instead of the amount left
///
/// `None` uses [`spending_defaults`] (60% / 80%), not the general defaults.
pub fn classify_from_spending(
    spending: f64,
    total_budget: f64,
    settings: Option<&WarningSettings>,
) -> WarningState {
    let budget_left = total_budget - spending;
    match settings {
        Some(settings) => classify(budget_left, total_budget, settings),
        None => classify(budget_left, total_budget, &spending_defaults()),
    }
}

/// Classification used for past months: always red once spending exceeds the budget
pub fn classify_over_budget(spending: f64, total_budget: f64) -> WarningState {
    if spending > total_budget {
        WarningState::Red
    } else {
        classify_from_spending(spending, total_budget, None)
    }
}
