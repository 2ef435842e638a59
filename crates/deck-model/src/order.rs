//! Flat card order
//!
//! [`OrderStore`] is the single sequence of card ids that decides the
//! relative order of cards inside every category. Per-category views are
//! derived by filtering it against an [`AssignmentMap`].

use crate::assignment::AssignmentMap;
use crate::ids::{CardId, CategoryId};
use serde::{Deserialize, Serialize};

/// Ordered sequence of every known card id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderStore(Vec<CardId>);

impl OrderStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Borrow the flat order
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[CardId] {
        &self.0
    }

    /// Number of cards
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if store is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in global order
    pub fn iter(&self) -> impl Iterator<Item = &CardId> {
        self.0.iter()
    }

    /// Check membership
    #[inline]
    #[must_use]
    pub fn contains(&self, card: &CardId) -> bool {
        self.0.contains(card)
    }

    /// Global index of a card
    #[must_use]
    pub fn position(&self, card: &CardId) -> Option<usize> {
        self.0.iter().position(|c| c == card)
    }

    /// Remove a card, returning its former global index
    pub fn remove(&mut self, card: &CardId) -> Option<usize> {
        let index = self.position(card)?;
        self.0.remove(index);
        Some(index)
    }

    /// Insert a card at a global index, clamped to the end
    ///
    /// Callers remove the card first; the store never holds duplicates.
    pub fn insert(&mut self, index: usize, card: CardId) {
        debug_assert!(!self.contains(&card), "duplicate card id {card}");
        let index = index.min(self.0.len());
        self.0.insert(index, card);
    }

    /// Append a card at the end
    pub fn push(&mut self, card: CardId) {
        debug_assert!(!self.contains(&card), "duplicate card id {card}");
        self.0.push(card);
    }

    /// Keep only the cards matching `keep`
    pub fn retain(&mut self, keep: impl FnMut(&CardId) -> bool) {
        self.0.retain(keep);
    }

    /// Cards of one category, in global order
    #[must_use]
    pub fn partition(&self, assignment: &AssignmentMap, category: &CategoryId) -> Vec<CardId> {
        self.0
            .iter()
            .filter(|card| assignment.category_of(card) == category)
            .cloned()
            .collect()
    }

    /// Global index of the last card assigned to `category`
    #[must_use]
    pub fn last_position_in(
        &self,
        assignment: &AssignmentMap,
        category: &CategoryId,
    ) -> Option<usize> {
        self.0
            .iter()
            .rposition(|card| assignment.category_of(card) == category)
    }

    /// Check if any card is assigned to `category`
    #[must_use]
    pub fn has_cards_in(&self, assignment: &AssignmentMap, category: &CategoryId) -> bool {
        self.0
            .iter()
            .any(|card| assignment.category_of(card) == category)
    }
}

impl From<Vec<CardId>> for OrderStore {
    fn from(cards: Vec<CardId>) -> Self {
        Self(cards)
    }
}

impl FromIterator<CardId> for OrderStore {
    fn from_iter<I: IntoIterator<Item = CardId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
