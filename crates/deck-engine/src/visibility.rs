//! Empty custom category heuristics
//!
//! Two passes share one eligibility rule: a custom category is eligible when
//! no card is assigned to it and it is not in the [`AlteredSet`].
//!
//! - [`auto_hide`] runs after every mutation and only clears `visible`.
//! - [`prune_for_save`] runs on save and drops eligible categories entirely.
//!
//! System categories and `available` are never eligible.

use deck_model::{AlteredSet, CategoryId, CategoryRegistry, Snapshot};

/// Check if a category may be hidden or pruned
#[must_use]
pub fn is_eligible(
    snapshot: &Snapshot,
    altered: &AlteredSet,
    registry: &CategoryRegistry,
    category: &CategoryId,
) -> bool {
    !category.is_available()
        && !registry.is_system(category)
        && !altered.contains(category)
        && !snapshot
            .card_order
            .has_cards_in(&snapshot.assignment, category)
}

fn eligible(
    snapshot: &Snapshot,
    altered: &AlteredSet,
    registry: &CategoryRegistry,
) -> Vec<CategoryId> {
    snapshot
        .category_order
        .iter()
        .filter(|category| is_eligible(snapshot, altered, registry, category))
        .cloned()
        .collect()
}

/// Force `visible = false` on eligible categories
///
/// Returns the categories whose flag actually changed.
pub fn auto_hide(
    snapshot: &mut Snapshot,
    altered: &AlteredSet,
    registry: &CategoryRegistry,
) -> Vec<CategoryId> {
    let mut hidden = Vec::new();
    for category in eligible(snapshot, altered, registry) {
        if snapshot.category_config.set_visible(&category, false) {
            tracing::debug!("Auto-hiding empty category {}", category);
            hidden.push(category);
        }
    }
    hidden
}

/// Drop eligible categories from every category collection
///
/// Returns the dropped categories.
pub fn prune_for_save(
    snapshot: &mut Snapshot,
    altered: &AlteredSet,
    registry: &CategoryRegistry,
) -> Vec<CategoryId> {
    let pruned = eligible(snapshot, altered, registry);
    for category in &pruned {
        snapshot.category_order.remove(category);
        snapshot.category_config.remove(category);
        snapshot.category_names.shift_remove(category);
        snapshot.category_icons.shift_remove(category);
    }
    if !pruned.is_empty() {
        tracing::info!("Pruned {} empty untouched categories", pruned.len());
    }
    pruned
}
