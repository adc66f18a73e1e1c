//! Strongly-typed ID wrappers
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of a transaction (active or soft-deleted)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(Uuid);

impl TransactionId {
    const DISPLAY_PREFIX: &'static str = "txn-";

    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Short prefix form used in tables ("txn-1a2b3c4d")
    pub fn short(&self) -> String {
        format!("{}{}", Self::DISPLAY_PREFIX, &self.0.simple().to_string()[..8])
    }

    /// Check whether a user-typed identifier refers to this ID
    ///
    /// Accepts the full UUID, or any prefix of at least four characters of
    /// its simple form, with or without the `txn-` prefix.
    pub fn matches(&self, identifier: &str) -> bool {
        let identifier = identifier.trim();
        if let Ok(uuid) = Uuid::parse_str(identifier) {
            return uuid == self.0;
        }
        let stub = identifier
            .strip_prefix(Self::DISPLAY_PREFIX)
            .unwrap_or(identifier)
            .to_ascii_lowercase();
        stub.len() >= 4 && self.0.simple().to_string().starts_with(&stub)
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short())
    }
}

impl FromStr for TransactionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s.trim())?))
    }
}

/// Identifier of a transaction label
///
/// Built-in labels use readable ids ("food"); user-created labels get a
/// random id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelId(String);

impl LabelId {
    /// Wrap an existing id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LabelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the signed-in user; also names their data directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Parse a user id, allowing `[A-Za-z0-9._@-]` only
    pub fn parse(s: &str) -> Result<Self, InvalidUserId> {
        let s = s.trim();
        if s.is_empty() || s.len() > 64 || s.starts_with('.') {
            return Err(InvalidUserId(s.to_string()));
        }
        if !s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '@' | '-'))
        {
            return Err(InvalidUserId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rejected user id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid user id '{0}': use letters, digits, '.', '_', '@' or '-'")]
pub struct InvalidUserId(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_id_display() {
        let id = TransactionId::new();
        let display = id.to_string();
        assert!(display.starts_with("txn-"));
        assert_eq!(display.len(), 12);
    }

    #[test]
    fn test_transaction_id_matches() {
        let id: TransactionId = "550e8400-e29b-41d4-a716-446655440000".parse().unwrap();
        assert!(id.matches("550e8400-e29b-41d4-a716-446655440000"));
        assert!(id.matches("txn-550e8400"));
        assert!(id.matches("550e"));
        assert!(!id.matches("550"));
        assert!(!id.matches("txn-deadbeef"));
    }

    #[test]
    fn test_transaction_id_serialization() {
        let id = TransactionId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: TransactionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_label_id_generate_is_unique() {
        assert_ne!(LabelId::generate(), LabelId::generate());
        assert_eq!(LabelId::new("food").as_str(), "food");
    }

    #[test]
    fn test_user_id_validation() {
        assert!(UserId::parse("alex@example.com").is_ok());
        assert!(UserId::parse("  sam_1 ").is_ok());
        assert!(UserId::parse("").is_err());
        assert!(UserId::parse("../etc").is_err());
        assert!(UserId::parse("a/b").is_err());
    }
}
