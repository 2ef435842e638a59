//! Card to category membership
//!
//! [`AssignmentMap`] is authoritative for membership only. It carries no
//! ordering; see [`crate::OrderStore`] for that.

use crate::ids::{CardId, CategoryId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

fn available_id() -> &'static CategoryId {
    static ID: OnceLock<CategoryId> = OnceLock::new();
    ID.get_or_init(CategoryId::available)
}

/// Mapping from card id to category id
///
/// Cards without an entry belong to `available`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentMap(IndexMap<CardId, CategoryId>);

impl AssignmentMap {
    /// Create empty map
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Category of a card, defaulting to `available`
    #[must_use]
    pub fn category_of(&self, card: &CardId) -> &CategoryId {
        self.0.get(card).unwrap_or_else(|| available_id())
    }

    /// Raw entry, without the `available` default
    #[inline]
    #[must_use]
    pub fn get(&self, card: &CardId) -> Option<&CategoryId> {
        self.0.get(card)
    }

    /// Assign a card, returning the previous category
    pub fn assign(&mut self, card: CardId, category: CategoryId) -> Option<CategoryId> {
        self.0.insert(card, category)
    }

    /// Drop the entry of a card
    pub fn remove(&mut self, card: &CardId) -> Option<CategoryId> {
        self.0.shift_remove(card)
    }

    /// Move every card of `from` into `to`, returning the moved cards
    pub fn reassign_all(&mut self, from: &CategoryId, to: &CategoryId) -> Vec<CardId> {
        let mut moved = Vec::new();
        for (card, category) in &mut self.0 {
            if category == from {
                *category = to.clone();
                moved.push(card.clone());
            }
        }
        moved
    }

    /// Number of cards assigned to a category
    ///
    /// Only counts explicit entries; callers needing the `available`
    /// default should filter the order store instead.
    #[must_use]
    pub fn count_in(&self, category: &CategoryId) -> usize {
        self.0.values().filter(|c| *c == category).count()
    }

    /// Keep only the entries matching `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(&CardId, &CategoryId) -> bool) {
        self.0.retain(|card, category| keep(card, category));
    }

    /// Iterate over explicit entries
    pub fn iter(&self) -> impl Iterator<Item = (&CardId, &CategoryId)> {
        self.0.iter()
    }

    /// Number of explicit entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if map has no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(CardId, CategoryId)> for AssignmentMap {
    fn from_iter<I: IntoIterator<Item = (CardId, CategoryId)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
