//! Threshold validation and descriptions for the settings editor

use thiserror::Error;

use super::settings::{Threshold, ThresholdType, WarningSettings};
use crate::display::currency::format_currency_exact;

/// Budget used to compare thresholds when the caller has none
pub const DEFAULT_VALIDATION_BUDGET: f64 = 1000.0;

/// Why a threshold edit cannot be saved
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ThresholdError {
    #[error("Red warning threshold must be lower than yellow warning threshold")]
    Ordering,

    #[error("{which} warning threshold must be a positive number")]
    InvalidValue { which: &'static str },
}

/// Check a yellow/red pair before it is saved
///
/// Both thresholds are converted to amounts against `total_budget`
/// (default [`DEFAULT_VALIDATION_BUDGET`]); red must come out strictly lower.
pub fn validate_thresholds(
    yellow: &Threshold,
    red: &Threshold,
    total_budget: Option<f64>,
) -> Result<(), ThresholdError> {
    for (which, threshold) in [("Yellow", yellow), ("Red", red)] {
        if !threshold.value.is_finite() || threshold.value <= 0.0 {
            return Err(ThresholdError::InvalidValue { which });
        }
    }

    let total = total_budget.unwrap_or(DEFAULT_VALIDATION_BUDGET);
    let yellow_amount = yellow.to_amount(total);
    let red_amount = red.to_amount(total);

    if red_amount >= yellow_amount {
        return Err(ThresholdError::Ordering);
    }

    Ok(())
}

/// Human-readable threshold summaries ("40% left", "$200.00 left")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdDescriptions {
    pub yellow: String,
    pub red: String,
}

impl ThresholdDescriptions {
    pub fn yellow_sentence(&self) -> String {
        format!("Yellow when {}", self.yellow)
    }

    pub fn red_sentence(&self) -> String {
        format!("Red when {}", self.red)
    }
}

/// Describe the configured thresholds, defaulting bad values like the classifier does
pub fn describe_thresholds(settings: &WarningSettings) -> ThresholdDescriptions {
    let settings = settings.normalized();
    ThresholdDescriptions {
        yellow: describe(&settings.yellow),
        red: describe(&settings.red),
    }
}

fn describe(threshold: &Threshold) -> String {
    match threshold.kind {
        ThresholdType::Percentage => format!("{}% left", threshold.value),
        ThresholdType::Amount => format!("{} left", format_currency_exact(threshold.value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_pair() {
        let result = validate_thresholds(
            &Threshold::percentage(40.0),
            &Threshold::percentage(20.0),
            Some(1000.0),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_inverted_pair_rejected() {
        let result = validate_thresholds(
            &Threshold::percentage(20.0),
            &Threshold::percentage(40.0),
            Some(1000.0),
        );
        assert_eq!(result, Err(ThresholdError::Ordering));
    }

    #[test]
    fn test_equal_amounts_rejected() {
        let result = validate_thresholds(
            &Threshold::percentage(20.0),
            &Threshold::amount(200.0),
            Some(1000.0),
        );
        assert_eq!(result, Err(ThresholdError::Ordering));
    }

    #[test]
    fn test_mixed_types_depend_on_budget() {
        let yellow = Threshold::amount(300.0);
        let red = Threshold::percentage(10.0);
        assert!(validate_thresholds(&yellow, &red, Some(1000.0)).is_ok());
        // 10% of 5000 is 500, above the 300 yellow amount
        assert_eq!(
            validate_thresholds(&yellow, &red, Some(5000.0)),
            Err(ThresholdError::Ordering)
        );
    }

    #[test]
    fn test_default_budget() {
        let yellow = Threshold::amount(150.0);
        let red = Threshold::percentage(10.0);
        assert!(validate_thresholds(&yellow, &red, None).is_ok());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = validate_thresholds(
            &Threshold::percentage(f64::NAN),
            &Threshold::percentage(20.0),
            None,
        )
        .unwrap_err();
        assert_eq!(err, ThresholdError::InvalidValue { which: "Yellow" });

        let err = validate_thresholds(&Threshold::amount(100.0), &Threshold::amount(0.0), None)
            .unwrap_err();
        assert_eq!(err.to_string(), "Red warning threshold must be a positive number");
    }

    #[test]
    fn test_describe_percentages() {
        let d = describe_thresholds(&WarningSettings::default());
        assert_eq!(d.yellow, "40% left");
        assert_eq!(d.red, "20% left");
        assert_eq!(d.yellow_sentence(), "Yellow when 40% left");
        assert_eq!(d.red_sentence(), "Red when 20% left");
    }

    #[test]
    fn test_describe_amounts() {
        let d = describe_thresholds(&WarningSettings::new(
            Threshold::amount(1500.0),
            Threshold::amount(200.0),
        ));
        assert_eq!(d.yellow, "$1,500.00 left");
        assert_eq!(d.red, "$200.00 left");
    }

    #[test]
    fn test_describe_fractional_percentage() {
        let d = describe_thresholds(&WarningSettings::new(
            Threshold::percentage(12.5),
            Threshold::percentage(f64::NAN),
        ));
        assert_eq!(d.yellow, "12.5% left");
        assert_eq!(d.red, "20% left");
    }
}
