//! Testing utilities for the deck workspace
//!
//! Shared fixtures, snapshot builders, and proptest strategies.

#![allow(missing_docs)]

use deck_model::{
    CardDefinition, CardId, CardRegistry, CategoryConfig, CategoryDefinition, CategoryId,
    CategoryRegistry, Snapshot,
};
use proptest::prelude::*;

/// Card ids used by [`sample_cards`]
pub const SAMPLE_CARDS: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

pub fn card_ids(raw: &[&str]) -> Vec<CardId> {
    raw.iter().map(|s| CardId::from(*s)).collect()
}

pub fn card_registry(ids: &[&str]) -> CardRegistry {
    ids.iter()
        .map(|id| CardDefinition::new(*id, format!("Card {}", id.to_uppercase())))
        .collect()
}

pub fn sample_cards() -> CardRegistry {
    card_registry(&SAMPLE_CARDS)
}

/// Two system categories: `news` and `tools`
pub fn system_categories() -> CategoryRegistry {
    CategoryRegistry::with_system([
        CategoryDefinition::system("news", "News", "News"),
        CategoryDefinition::system("tools", "Tools", "Toolbox"),
    ])
}

/// Fluent snapshot construction for tests
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    snapshot: Snapshot,
}

impl SnapshotBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Card order; every card starts in `available`
    pub fn cards(mut self, ids: &[&str]) -> Self {
        for card in card_ids(ids) {
            self.snapshot
                .assignment
                .assign(card.clone(), CategoryId::available());
            self.snapshot.card_order.push(card);
        }
        self
    }

    pub fn categories(mut self, ids: &[&str]) -> Self {
        self.snapshot.category_order = ids.iter().map(|id| CategoryId::from(*id)).collect();
        self
    }

    pub fn assign(mut self, card: &str, category: &str) -> Self {
        self.snapshot
            .assignment
            .assign(CardId::from(card), CategoryId::from(category));
        self
    }

    pub fn name(mut self, category: &str, name: &str) -> Self {
        self.snapshot
            .category_names
            .insert(CategoryId::from(category), name.to_string());
        self
    }

    pub fn hidden(mut self, category: &str) -> Self {
        self.snapshot
            .category_config
            .set_visible(&CategoryId::from(category), false);
        self
    }

    pub fn build(self) -> Snapshot {
        self.snapshot
    }
}

/// `OrderStore=[a,b,c]`, `a,b` in `cat1`, `c` in `cat2`
pub fn two_category_snapshot() -> Snapshot {
    SnapshotBuilder::new()
        .cards(&["a", "b", "c"])
        .categories(&["cat1", "cat2"])
        .assign("a", "cat1")
        .assign("b", "cat1")
        .assign("c", "cat2")
        .build()
}

/// Display flags, any combination
pub fn arb_category_config() -> impl Strategy<Value = CategoryConfig> {
    (any::<bool>(), any::<bool>())
        .prop_map(|(visible, show_title)| CategoryConfig {
            visible,
            show_title,
        })
}

/// A valid snapshot over `cards` with up to four custom categories
///
/// Every custom category holds at least one card; the system categories
/// from [`system_categories`] may appear empty anywhere in the order. Card
/// titles, visibility, icons and display flags are filled at random, so the
/// snapshot exercises every collection and still survives a load/save round
/// trip unchanged.
pub fn arb_snapshot(cards: &'static [&'static str]) -> impl Strategy<Value = Snapshot> {
    let layout = (0usize..=4).prop_flat_map(move |categories| {
        (
            Just(categories),
            Just(card_ids(cards)).prop_shuffle(),
            proptest::collection::vec(0..=categories, cards.len()),
        )
    });
    let card_extras = proptest::collection::vec(
        (any::<bool>(), proptest::option::of("[A-Z][a-z]{2,8}")),
        cards.len(),
    );
    let category_extras = proptest::collection::vec(
        (proptest::option::of("[A-Z][a-z]{2,8}"), arb_category_config()),
        4,
    );
    let systems =
        proptest::collection::vec((any::<bool>(), any::<usize>(), arb_category_config()), 2);

    (layout, card_extras, category_extras, systems).prop_map(
        |((categories, order, slots), card_extras, category_extras, systems)| {
            let ordered: Vec<CategoryId> = (1..=categories)
                .map(|i| CategoryId::new(format!("cat{i}")))
                .collect();
            let mut snap = Snapshot::new();
            for ((card, slot), (visible, title)) in order.iter().zip(slots).zip(card_extras) {
                let category = match slot {
                    0 => CategoryId::available(),
                    n => ordered[n - 1].clone(),
                };
                snap.assignment.assign(card.clone(), category);
                if !visible {
                    snap.card_visibility.insert(card.clone(), false);
                }
                if let Some(title) = title {
                    snap.card_titles.insert(card.clone(), title);
                }
            }

            // keep only custom categories that received a card
            let mut used: Vec<CategoryId> = ordered
                .into_iter()
                .filter(|c| snap.assignment.count_in(c) > 0)
                .collect();
            for (category, (icon, config)) in used.iter().zip(category_extras) {
                snap.category_names
                    .insert(category.clone(), format!("Category {category}"));
                if let Some(icon) = icon {
                    snap.category_icons.insert(category.clone(), icon);
                }
                if config != CategoryConfig::default() {
                    snap.category_config.set(category.clone(), config);
                }
            }

            let system_ids: Vec<CategoryId> =
                system_categories().system_ids().cloned().collect();
            for (category, (include, position, config)) in system_ids.into_iter().zip(systems) {
                if !include {
                    continue;
                }
                if config != CategoryConfig::default() {
                    snap.category_config.set(category.clone(), config);
                }
                used.insert(position % (used.len() + 1), category);
            }

            snap.category_order = used.into_iter().collect();
            snap.card_order = order.into_iter().collect();
            snap
        },
    )
}
