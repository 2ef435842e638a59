//! Registry-driven default layout

use deck_model::{CardRegistry, CategoryRegistry, Snapshot};

/// Fill an empty category order from the registries
///
/// Snapshots that already carry a category order are returned untouched.
/// Otherwise the system categories are laid out in registration order and
/// every card without an assignment lands in its default category, when
/// that category is one of them.
#[must_use]
pub fn default_layout(
    mut snapshot: Snapshot,
    cards: &CardRegistry,
    categories: &CategoryRegistry,
) -> Snapshot {
    if !snapshot.category_order.is_empty() {
        return snapshot;
    }

    snapshot.category_order = categories.system_ids().cloned().collect();
    for definition in cards.iter() {
        if snapshot.assignment.get(&definition.id).is_some() {
            continue;
        }
        if let Some(category) = definition
            .default_category
            .as_ref()
            .filter(|c| snapshot.category_order.contains(c))
        {
            snapshot
                .assignment
                .assign(definition.id.clone(), category.clone());
        }
    }
    tracing::debug!(
        "Applied default layout with {} categories",
        snapshot.category_order.len()
    );
    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_model::{CardDefinition, CardId, CategoryDefinition, CategoryId};
    use pretty_assertions::assert_eq;

    fn registries() -> (CardRegistry, CategoryRegistry) {
        let cards = [
            CardDefinition::new("weather", "Weather").in_category("news"),
            CardDefinition::new("links", "Links").in_category("tools"),
            CardDefinition::new("misc", "Misc").in_category("nowhere"),
        ]
        .into_iter()
        .collect();
        let categories = CategoryRegistry::with_system([
            CategoryDefinition::system("news", "News", "News"),
            CategoryDefinition::system("tools", "Tools", "Toolbox"),
        ]);
        (cards, categories)
    }

    #[test]
    fn empty_order_gets_system_layout() {
        let (cards, categories) = registries();
        let snap = default_layout(Snapshot::new(), &cards, &categories);

        assert_eq!(
            snap.category_order.as_slice(),
            &[CategoryId::from("news"), CategoryId::from("tools")]
        );
        assert_eq!(
            snap.assignment.category_of(&CardId::from("weather")),
            &CategoryId::from("news")
        );
        assert!(snap.assignment.category_of(&CardId::from("misc")).is_available());
    }

    #[test]
    fn existing_order_is_kept() {
        let (cards, categories) = registries();
        let mut snap = Snapshot::new();
        snap.category_order = vec![CategoryId::from("tools")].into();

        let out = default_layout(snap.clone(), &cards, &categories);
        assert_eq!(out, snap);
    }

    #[test]
    fn explicit_assignment_wins() {
        let (cards, categories) = registries();
        let mut snap = Snapshot::new();
        snap.assignment
            .assign(CardId::from("weather"), CategoryId::available());

        let out = default_layout(snap, &cards, &categories);
        assert!(out
            .assignment
            .category_of(&CardId::from("weather"))
            .is_available());
    }
}
