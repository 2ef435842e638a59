//! Persisted editor snapshot
//!
//! [`Snapshot`] is the unit exchanged with the external configuration
//! store: loaded when an editor opens, handed back on save.

use crate::assignment::AssignmentMap;
use crate::category::{CategoryConfigStore, CategoryOrder};
use crate::error::{InvariantViolation, SnapshotError};
use crate::ids::{CardId, CategoryId};
use crate::order::OrderStore;
use crate::registry::CardRegistry;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordering, membership, and display metadata of every card and category
///
/// Field names follow the host configuration store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Flat card order
    #[serde(default)]
    pub card_order: OrderStore,

    /// Card visibility flags
    #[serde(default)]
    pub card_visibility: IndexMap<CardId, bool>,

    /// Custom card titles
    #[serde(default)]
    pub card_titles: IndexMap<CardId, String>,

    /// Category order, without `available`
    #[serde(default)]
    pub category_order: CategoryOrder,

    /// Category display flags
    #[serde(default)]
    pub category_config: CategoryConfigStore,

    /// Card membership
    #[serde(default, rename = "cardCategoryAssignment")]
    pub assignment: AssignmentMap,

    /// Category display names
    #[serde(default)]
    pub category_names: IndexMap<CategoryId, String>,

    /// Category icon names
    #[serde(default)]
    pub category_icons: IndexMap<CategoryId, String>,
}

impl Snapshot {
    /// Create empty snapshot
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode from JSON
    ///
    /// # Errors
    /// Returns [`SnapshotError::Json`] when the input is malformed
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode as pretty JSON
    ///
    /// # Errors
    /// Returns [`SnapshotError::Json`] if encoding fails
    pub fn to_json_pretty(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Cards of one category in display order
    #[must_use]
    pub fn cards_in(&self, category: &CategoryId) -> Vec<CardId> {
        self.card_order.partition(&self.assignment, category)
    }

    /// Check if `category` is ordered or is the sentinel
    #[must_use]
    pub fn has_category(&self, category: &CategoryId) -> bool {
        category.is_available() || self.category_order.contains(category)
    }

    /// Card visibility, visible unless hidden explicitly
    #[must_use]
    pub fn card_visible(&self, card: &CardId) -> bool {
        self.card_visibility.get(card).copied().unwrap_or(true)
    }

    /// Collect every broken invariant
    ///
    /// `cards` is the universe of known card ids.
    #[must_use]
    pub fn violations(&self, cards: &CardRegistry) -> Vec<InvariantViolation> {
        let mut violations = Vec::new();

        let mut seen = HashSet::new();
        for card in self.card_order.iter() {
            if !seen.insert(card) {
                violations.push(InvariantViolation::DuplicateCard(card.clone()));
            }
            if !cards.contains(card) {
                violations.push(InvariantViolation::UnknownCard(card.clone()));
            }
            match self.assignment.get(card) {
                None => violations.push(InvariantViolation::MissingAssignment(card.clone())),
                Some(category) if !self.has_category(category) => {
                    violations.push(InvariantViolation::DanglingAssignment {
                        card: card.clone(),
                        category: category.clone(),
                    });
                }
                Some(_) => {}
            }
        }
        for card in cards.ids() {
            if !seen.contains(card) {
                violations.push(InvariantViolation::MissingCard(card.clone()));
            }
        }

        let mut seen_categories = HashSet::new();
        for category in self.category_order.iter() {
            if category.is_available() {
                violations.push(InvariantViolation::AvailableInCategoryOrder);
            } else if !seen_categories.insert(category) {
                violations.push(InvariantViolation::DuplicateCategory(category.clone()));
            }
        }

        violations
    }

    /// Verify all invariants
    ///
    /// # Errors
    /// Returns [`SnapshotError::Invariants`] listing every violation
    pub fn check_invariants(&self, cards: &CardRegistry) -> Result<(), SnapshotError> {
        let violations = self.violations(cards);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(SnapshotError::Invariants(violations))
        }
    }
}
