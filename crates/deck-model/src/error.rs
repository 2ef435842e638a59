//! Error types for the deck model
//!
//! - [`SnapshotError`]: invariant violations and snapshot decoding failures
//! - [`InvariantViolation`]: one broken invariant
//! - [`ConfigError`]: engine configuration loading failures

use crate::ids::{CardId, CategoryId};
use std::path::PathBuf;

/// Snapshot errors
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// One or more invariants do not hold
    #[error("snapshot violates {} invariant(s): {}", .0.len(), summarize(.0))]
    Invariants(Vec<InvariantViolation>),

    /// Snapshot JSON could not be decoded or encoded
    #[error("snapshot json: {0}")]
    Json(#[from] serde_json::Error),
}

impl SnapshotError {
    /// Violations carried by this error, if any
    #[must_use]
    pub fn violations(&self) -> &[InvariantViolation] {
        match self {
            Self::Invariants(v) => v,
            Self::Json(_) => &[],
        }
    }
}

fn summarize(violations: &[InvariantViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A single broken snapshot invariant
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvariantViolation {
    /// A card id occurs more than once in the order store
    #[error("card {0} appears more than once in the card order")]
    DuplicateCard(CardId),

    /// A known card id is missing from the order store
    #[error("card {0} is missing from the card order")]
    MissingCard(CardId),

    /// The order store holds a card id the registry does not know
    #[error("card {0} is not a registered card")]
    UnknownCard(CardId),

    /// A card in the order store has no assignment entry
    #[error("card {0} has no category assignment")]
    MissingAssignment(CardId),

    /// A card is assigned to a category that is neither ordered nor `available`
    #[error("card {card} is assigned to unknown category {category}")]
    DanglingAssignment {
        /// Card id
        card: CardId,
        /// Category it points to
        category: CategoryId,
    },

    /// A category id occurs more than once in the category order
    #[error("category {0} appears more than once in the category order")]
    DuplicateCategory(CategoryId),

    /// The category order contains the `available` sentinel
    #[error("category order contains the available sentinel")]
    AvailableInCategoryOrder,
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML could not be parsed
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration file could not be read
    #[error("cannot read configuration {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A value is out of range
    #[error("invalid configuration value for {field}: {reason}")]
    Invalid {
        /// Field name
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_error_lists_violations() {
        let err = SnapshotError::Invariants(vec![
            InvariantViolation::DuplicateCard(CardId::from("a")),
            InvariantViolation::AvailableInCategoryOrder,
        ]);
        let text = err.to_string();
        assert!(text.starts_with("snapshot violates 2 invariant(s)"));
        assert!(text.contains("card a appears more than once"));
        assert_eq!(err.violations().len(), 2);
    }
}
