//! Warning threshold configuration
//!
//! The stored document is the flat object
//! `{"yellowType": "percentage", "yellowValue": 40, "redType": "percentage", "redValue": 20}`.
//! Threshold values are typed by hand in a settings form, so documents in the
//! wild may have missing, null or non-numeric fields. Deserialization never
//! rejects such a document; bad fields fall back to the defaults.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Yellow threshold used when none is configured (percent of budget left)
pub const DEFAULT_YELLOW_VALUE: f64 = 40.0;

/// Red threshold used when none is configured (percent of budget left)
pub const DEFAULT_RED_VALUE: f64 = 20.0;

/// How a threshold value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdType {
    /// Percentage of the total budget left
    #[default]
    Percentage,
    /// Absolute currency amount left
    Amount,
}

impl ThresholdType {
    /// Interpret a stored type string
    ///
    /// Missing or empty means percentage. Anything other than `"percentage"`
    /// is read as an amount.
    pub fn from_document(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") | Some("percentage") => Self::Percentage,
            Some(_) => Self::Amount,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Percentage => "percentage",
            Self::Amount => "amount",
        }
    }
}

impl fmt::Display for ThresholdType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ThresholdType {
    type Err = String;

    /// Strict parse for user input
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percentage" | "percent" | "%" => Ok(Self::Percentage),
            "amount" | "dollars" | "$" => Ok(Self::Amount),
            other => Err(format!(
                "Unknown threshold type '{}': expected 'percentage' or 'amount'",
                other
            )),
        }
    }
}

impl<'de> Deserialize<'de> for ThresholdType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(Self::from_document(raw.as_str()))
    }
}

/// One warning trigger: a type plus a value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Threshold {
    pub kind: ThresholdType,
    pub value: f64,
}

impl Threshold {
    pub const fn percentage(value: f64) -> Self {
        Self {
            kind: ThresholdType::Percentage,
            value,
        }
    }

    pub const fn amount(value: f64) -> Self {
        Self {
            kind: ThresholdType::Amount,
            value,
        }
    }

    /// Convert to an absolute amount of budget left
    pub fn to_amount(&self, total_budget: f64) -> f64 {
        match self.kind {
            ThresholdType::Percentage => self.value / 100.0 * total_budget,
            ThresholdType::Amount => self.value,
        }
    }

    /// Replace a NaN value with `fallback`
    fn or_value(self, fallback: f64) -> Self {
        if self.value.is_nan() {
            Self {
                value: fallback,
                ..self
            }
        } else {
            self
        }
    }
}

/// Yellow and red warning thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawWarningDocument", into = "WarningDocument")]
pub struct WarningSettings {
    pub yellow: Threshold,
    pub red: Threshold,
}

impl Default for WarningSettings {
    fn default() -> Self {
        Self {
            yellow: Threshold::percentage(DEFAULT_YELLOW_VALUE),
            red: Threshold::percentage(DEFAULT_RED_VALUE),
        }
    }
}

impl WarningSettings {
    pub fn new(yellow: Threshold, red: Threshold) -> Self {
        Self { yellow, red }
    }

    /// Settings with NaN values replaced by the defaults
    pub fn normalized(&self) -> Self {
        Self {
            yellow: self.yellow.or_value(DEFAULT_YELLOW_VALUE),
            red: self.red.or_value(DEFAULT_RED_VALUE),
        }
    }
}

/// Serialized form
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct WarningDocument {
    yellow_type: ThresholdType,
    yellow_value: f64,
    red_type: ThresholdType,
    red_value: f64,
}

impl From<WarningSettings> for WarningDocument {
    fn from(settings: WarningSettings) -> Self {
        let settings = settings.normalized();
        Self {
            yellow_type: settings.yellow.kind,
            yellow_value: settings.yellow.value,
            red_type: settings.red.kind,
            red_value: settings.red.value,
        }
    }
}

/// Lenient deserialized form
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
struct RawWarningDocument {
    yellow_type: Option<Value>,
    yellow_value: Option<Value>,
    red_type: Option<Value>,
    red_value: Option<Value>,
}

impl From<RawWarningDocument> for WarningSettings {
    fn from(raw: RawWarningDocument) -> Self {
        Self {
            yellow: Threshold {
                kind: ThresholdType::from_document(raw.yellow_type.as_ref().and_then(Value::as_str)),
                value: coerce_number(raw.yellow_value.as_ref()).unwrap_or(DEFAULT_YELLOW_VALUE),
            },
            red: Threshold {
                kind: ThresholdType::from_document(raw.red_type.as_ref().and_then(Value::as_str)),
                value: coerce_number(raw.red_value.as_ref()).unwrap_or(DEFAULT_RED_VALUE),
            },
        }
    }
}

/// Read a number from a JSON value, accepting numeric strings
fn coerce_number(value: Option<&Value>) -> Option<f64> {
    let parsed = match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    (!parsed.is_nan()).then_some(parsed)
}
