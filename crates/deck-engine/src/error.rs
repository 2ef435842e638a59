//! Error types for the ordering engine
//!
//! Every rejected operation leaves the session exactly as it was, so hosts
//! may treat [`EngineError::is_noop`] errors as ignored input.

use deck_model::{CardId, CategoryId, SnapshotError};

/// Ordering engine error
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Card id is not part of the card order
    #[error("unknown card: {0}")]
    UnknownCard(CardId),

    /// Category id is neither ordered nor the `available` sentinel
    #[error("unknown category: {0}")]
    UnknownCategory(CategoryId),

    /// Operation is not allowed on a system category or `available`
    #[error("category {0} is protected")]
    ProtectedCategory(CategoryId),

    /// Display names must contain something besides whitespace
    #[error("category name must not be blank")]
    BlankName,

    /// Drop or hover received without an active drag
    #[error("no drag in progress")]
    NotDragging,

    /// Snapshot failed its invariant check
    #[error("invariant check failed: {0}")]
    Invariant(#[from] SnapshotError),
}

impl EngineError {
    /// Check if the error is a rejected input rather than an integrity failure
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        !matches!(self, Self::Invariant(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_input_is_noop() {
        assert!(EngineError::UnknownCard(CardId::from("x")).is_noop());
        assert!(EngineError::ProtectedCategory(CategoryId::available()).is_noop());
        assert!(EngineError::NotDragging.is_noop());
        assert!(!EngineError::Invariant(SnapshotError::Invariants(vec![])).is_noop());
    }

    #[test]
    fn messages_name_the_offender() {
        let err = EngineError::UnknownCategory(CategoryId::from("ghost"));
        assert_eq!(err.to_string(), "unknown category: ghost");
    }
}
