//! Partitioned global order
//!
//! Categories are views over one flat [`OrderStore`]. Drag and drop speaks
//! in local indices (position among one category's cards); this module
//! translates them into global indices so that the flat order stays the only
//! place intra-category order is stored.
//!
//! # Algorithm
//!
//! 1. Remove the dragged card from the order.
//! 2. Filter the shortened order by the target category.
//! 3. Non-empty target: insert before the card at the local index, or one
//!    past the category's last card when appending.
//! 4. Empty target: insert after the last card of the nearest preceding
//!    category that still has cards, or at 0 if there is none.

use crate::error::EngineError;
use deck_model::{AssignmentMap, CardId, CategoryId, CategoryOrder, OrderStore};

/// A card move that changed the order or membership
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardMove {
    /// Card that moved
    pub card: CardId,
    /// Category the card came from
    pub from: CategoryId,
    /// Category the card landed in
    pub to: CategoryId,
    /// Global index before the move
    pub from_global: usize,
    /// Global index after the move
    pub to_global: usize,
}

impl CardMove {
    /// Check if the card changed category
    #[inline]
    #[must_use]
    pub fn crossed_categories(&self) -> bool {
        self.from != self.to
    }
}

/// Local index of a card within its current category
#[must_use]
pub fn local_index(order: &OrderStore, assignment: &AssignmentMap, card: &CardId) -> Option<usize> {
    let category = assignment.category_of(card);
    order
        .iter()
        .filter(|c| assignment.category_of(c) == category)
        .position(|c| c == card)
}

/// Global insertion index for a local index of `target`
///
/// `order` must not contain the card being placed. Local indices past the
/// end of the partition append.
#[must_use]
pub fn global_insertion_index(
    order: &OrderStore,
    assignment: &AssignmentMap,
    categories: &CategoryOrder,
    target: &CategoryId,
    local: usize,
) -> usize {
    let members: Vec<usize> = order
        .iter()
        .enumerate()
        .filter(|(_, card)| assignment.category_of(card) == target)
        .map(|(global, _)| global)
        .collect();

    match (members.get(local), members.last()) {
        (Some(&global), _) => global,
        (None, Some(&last)) => last + 1,
        (None, None) => categories
            .preceding(target)
            .find_map(|category| order.last_position_in(assignment, category))
            .map_or(0, |last| last + 1),
    }
}

/// Move a card to a local index of a category
///
/// Returns `Ok(None)` when the card already sits at that position; the order
/// is then left untouched.
///
/// # Errors
/// - [`EngineError::UnknownCard`] if the card is not in the order
/// - [`EngineError::UnknownCategory`] if the target is neither ordered nor `available`
pub fn move_card(
    order: &mut OrderStore,
    assignment: &mut AssignmentMap,
    categories: &CategoryOrder,
    card: &CardId,
    target: &CategoryId,
    local: usize,
) -> Result<Option<CardMove>, EngineError> {
    let Some(from_global) = order.position(card) else {
        return Err(EngineError::UnknownCard(card.clone()));
    };
    if !target.is_available() && !categories.contains(target) {
        return Err(EngineError::UnknownCategory(target.clone()));
    }

    let source = assignment.category_of(card).clone();
    if source == *target {
        let siblings = order
            .iter()
            .filter(|c| assignment.category_of(c) == target)
            .count();
        let clamped = local.min(siblings.saturating_sub(1));
        if local_index(order, assignment, card) == Some(clamped) {
            return Ok(None);
        }
    }

    order.remove(card);
    let to_global = global_insertion_index(order, assignment, categories, target, local);
    order.insert(to_global, card.clone());
    assignment.assign(card.clone(), target.clone());

    Ok(Some(CardMove {
        card: card.clone(),
        from: source,
        to: target.clone(),
        from_global,
        to_global,
    }))
}
