//! Budget warning classification
//!
//! Turns the remaining budget and user-configured thresholds into a
//! green/yellow/red [`WarningState`], validates threshold edits, and maps
//! states to presentation colors.
//!
//! - `settings`: threshold types and the lenient settings document
//! - `classify`: the classifier and its spending-based variants
//! - `thresholds`: pre-save validation and human-readable descriptions
//! - `style`: color hooks per state

pub mod classify;
pub mod settings;
pub mod style;
pub mod thresholds;

pub use classify::{
    classify, classify_from_spending, classify_over_budget, spending_defaults, WarningState,
    SPENDING_RED_VALUE, SPENDING_YELLOW_VALUE,
};
pub use settings::{
    Threshold, ThresholdType, WarningSettings, DEFAULT_RED_VALUE, DEFAULT_YELLOW_VALUE,
};
pub use style::{OverBudgetStyle, StyleHook, WarningStyle};
pub use thresholds::{
    describe_thresholds, validate_thresholds, ThresholdDescriptions, ThresholdError,
    DEFAULT_VALIDATION_BUDGET,
};
