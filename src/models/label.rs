//! Transaction label model
//!
//! Labels are the user's spending categories ("Food", "Transport", ...). They
//! are kept as an ordered list; order is what the label picker shows.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::LabelId;
use crate::warning::style::parse_hex_rgb;

/// Longest allowed label name, in characters
pub const MAX_LABEL_NAME_LEN: usize = 30;

/// Colors offered when creating or editing a label
pub const LABEL_PALETTE: [&str; 12] = [
    "#ef4444", // red
    "#f59e0b", // amber
    "#eab308", // yellow
    "#22c55e", // green
    "#10b981", // emerald
    "#06b6d4", // cyan
    "#3b82f6", // blue
    "#6366f1", // indigo
    "#8b5cf6", // violet
    "#d946ef", // fuchsia
    "#ec4899", // pink
    "#f97316", // orange
];

/// Color used when none is picked
pub const DEFAULT_LABEL_COLOR: &str = LABEL_PALETTE[0];

/// A transaction label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLabel {
    pub id: LabelId,
    pub name: String,
    /// `#rrggbb`
    pub color: String,
}

impl TransactionLabel {
    /// Create a label with a fresh id; the name is trimmed
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self::with_id(LabelId::generate(), name, color)
    }

    pub fn with_id(id: LabelId, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into().trim().to_string(),
            color: color.into().trim().to_lowercase(),
        }
    }

    /// RGB components of the label color
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_rgb(&self.color)
    }

    /// Validate the label
    pub fn validate(&self) -> Result<(), LabelValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(LabelValidationError::EmptyName);
        }

        let len = name.chars().count();
        if len > MAX_LABEL_NAME_LEN {
            return Err(LabelValidationError::NameTooLong(len));
        }

        if parse_hex_rgb(&self.color).is_none() {
            return Err(LabelValidationError::InvalidColor(self.color.clone()));
        }

        Ok(())
    }
}

impl fmt::Display for TransactionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The labels a new user starts with
pub fn default_labels() -> Vec<TransactionLabel> {
    [
        ("food", "Food", "#ef4444"),
        ("transport", "Transport", "#3b82f6"),
        ("shopping", "Shopping", "#8b5cf6"),
        ("entertainment", "Entertainment", "#f59e0b"),
        ("bills", "Bills", "#10b981"),
    ]
    .into_iter()
    .map(|(id, name, color)| TransactionLabel::with_id(LabelId::new(id), name, color))
    .collect()
}

/// Ordered list of labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelList(Vec<TransactionLabel>);

impl Default for LabelList {
    fn default() -> Self {
        Self(default_labels())
    }
}

impl LabelList {
    pub fn new(labels: Vec<TransactionLabel>) -> Self {
        Self(labels)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransactionLabel> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[TransactionLabel] {
        &self.0
    }

    pub fn get(&self, id: &LabelId) -> Option<&TransactionLabel> {
        self.0.iter().find(|l| &l.id == id)
    }

    pub fn position(&self, id: &LabelId) -> Option<usize> {
        self.0.iter().position(|l| &l.id == id)
    }

    /// Find by id, then by case-insensitive name
    pub fn find(&self, identifier: &str) -> Option<&TransactionLabel> {
        let identifier = identifier.trim();
        self.0
            .iter()
            .find(|l| l.id.as_str() == identifier)
            .or_else(|| {
                self.0
                    .iter()
                    .find(|l| l.name.eq_ignore_ascii_case(identifier))
            })
    }

    /// Append a label after validating it
    pub fn add(&mut self, label: TransactionLabel) -> Result<(), LabelValidationError> {
        label.validate()?;
        if self.get(&label.id).is_some() {
            return Err(LabelValidationError::DuplicateId(label.id.to_string()));
        }
        self.0.push(label);
        Ok(())
    }

    /// Replace the label with the same id, returning the previous value
    pub fn update(
        &mut self,
        label: TransactionLabel,
    ) -> Result<TransactionLabel, LabelValidationError> {
        label.validate()?;
        let index = self
            .position(&label.id)
            .ok_or_else(|| LabelValidationError::UnknownId(label.id.to_string()))?;
        Ok(std::mem::replace(&mut self.0[index], label))
    }

    /// Remove a label by id
    pub fn remove(&mut self, id: &LabelId) -> Option<TransactionLabel> {
        let index = self.position(id)?;
        Some(self.0.remove(index))
    }

    /// Move the label at `from` so it ends up at index `to`
    pub fn reorder(&mut self, from: usize, to: usize) -> Result<(), LabelValidationError> {
        let len = self.0.len();
        if from >= len || to >= len {
            return Err(LabelValidationError::PositionOutOfRange {
                position: from.max(to),
                len,
            });
        }
        let label = self.0.remove(from);
        self.0.insert(to, label);
        Ok(())
    }
}

impl IntoIterator for LabelList {
    type Item = TransactionLabel;
    type IntoIter = std::vec::IntoIter<TransactionLabel>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a LabelList {
    type Item = &'a TransactionLabel;
    type IntoIter = std::slice::Iter<'a, TransactionLabel>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Validation errors for labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
    DuplicateId(String),
    UnknownId(String),
    PositionOutOfRange { position: usize, len: usize },
}

impl fmt::Display for LabelValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Label name cannot be empty"),
            Self::NameTooLong(len) => write!(
                f,
                "Label name too long ({} characters, max {})",
                len, MAX_LABEL_NAME_LEN
            ),
            Self::InvalidColor(color) => {
                write!(f, "Invalid label color '{}', expected #rrggbb", color)
            }
            Self::DuplicateId(id) => write!(f, "A label with id '{}' already exists", id),
            Self::UnknownId(id) => write!(f, "No label with id '{}'", id),
            Self::PositionOutOfRange { position, len } => write!(
                f,
                "Position {} is out of range (there are {} labels)",
                position, len
            ),
        }
    }
}

impl std::error::Error for LabelValidationError {}
