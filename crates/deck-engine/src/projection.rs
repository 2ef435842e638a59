//! Render projection
//!
//! Both editor surfaces draw exclusively from an [`EditorView`]; nothing in
//! it is persisted.

use crate::drag::DragState;
use crate::session::OrderingEngine;
use deck_model::{CardId, CategoryId};
use serde::Serialize;

/// Display name of the `available` area
pub const AVAILABLE_NAME: &str = "Available";

/// One card as rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView {
    /// Card id
    pub id: CardId,
    /// Custom title, registry default, or the id
    pub title: String,
    /// Card visibility on the dashboard
    pub visible: bool,
    /// Card is being dragged
    pub dragging: bool,
}

/// One category with its cards, as rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    /// Category id
    pub id: CategoryId,
    /// Display name
    pub name: String,
    /// Icon name; empty when none is known
    pub icon: String,
    /// System categories cannot be renamed or deleted
    pub system: bool,
    /// Category visibility on the dashboard
    pub visible: bool,
    /// Heading visibility on the dashboard
    pub show_title: bool,
    /// Collapsed in the editor
    pub collapsed: bool,
    /// Touched this session
    pub altered: bool,
    /// Current drop candidate
    pub drop_highlight: bool,
    /// Local index of the card drop placeholder
    pub placeholder: Option<usize>,
    /// Cards in display order
    pub cards: Vec<CardView>,
}

/// Whole editor as rendered: ordered categories, then `available`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorView {
    /// Categories in category order
    pub categories: Vec<CategoryView>,
    /// The `available` area
    pub available: CategoryView,
}

impl EditorView {
    /// Ordered categories followed by `available`
    pub fn all(&self) -> impl Iterator<Item = &CategoryView> {
        self.categories.iter().chain(std::iter::once(&self.available))
    }

    /// Find a category by id
    #[must_use]
    pub fn category(&self, id: &CategoryId) -> Option<&CategoryView> {
        self.all().find(|view| view.id == *id)
    }
}

impl OrderingEngine {
    /// Project the session for rendering
    #[must_use]
    pub fn project(&self) -> EditorView {
        let categories = self
            .snapshot
            .category_order
            .iter()
            .map(|category| self.category_view(category))
            .collect();
        EditorView {
            categories,
            available: self.category_view(&CategoryId::available()),
        }
    }

    fn category_view(&self, category: &CategoryId) -> CategoryView {
        let (dragged_card, highlight, placeholder) = match self.drag.state() {
            DragState::Idle => (None, false, None),
            DragState::DraggingCard {
                card, candidate, ..
            } => match candidate {
                Some(target) if target.category == *category => {
                    (Some(card), true, Some(target.index))
                }
                _ => (Some(card), false, None),
            },
            DragState::DraggingCategory { candidate, .. } => {
                (None, candidate.as_ref() == Some(category), None)
            }
        };

        let name = if category.is_available() {
            self.snapshot
                .category_names
                .get(category)
                .map_or(AVAILABLE_NAME, String::as_str)
        } else {
            self.display_name(category)
        };
        let icon = self
            .snapshot
            .category_icons
            .get(category)
            .or_else(|| self.categories.get(category).map(|d| &d.icon))
            .cloned()
            .unwrap_or_default();
        let config = self.snapshot.category_config.get(category);

        let cards = self
            .snapshot
            .cards_in(category)
            .into_iter()
            .map(|card| CardView {
                title: self.card_title(&card),
                visible: self.snapshot.card_visible(&card),
                dragging: dragged_card == Some(&card),
                id: card,
            })
            .collect();

        CategoryView {
            id: category.clone(),
            name: name.to_string(),
            icon,
            system: self.categories.is_system(category),
            visible: config.visible,
            show_title: config.show_title,
            collapsed: self.collapsed.contains(category),
            altered: self.altered.contains(category),
            drop_highlight: highlight,
            placeholder,
            cards,
        }
    }

    fn card_title(&self, card: &CardId) -> String {
        self.snapshot
            .card_titles
            .get(card)
            .map(String::as_str)
            .or_else(|| self.cards.default_title(card))
            .unwrap_or_else(|| card.as_str())
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::DropZone;
    use crate::op::MutationOp;
    use deck_model::{
        CardDefinition, CardRegistry, CategoryDefinition, CategoryRegistry, EngineConfig,
        Snapshot,
    };
    use pretty_assertions::assert_eq;

    fn engine() -> OrderingEngine {
        let cards: CardRegistry = [
            CardDefinition::new("a", "Alpha"),
            CardDefinition::new("b", "Beta"),
        ]
        .into_iter()
        .collect();
        let categories =
            CategoryRegistry::with_system([CategoryDefinition::system("cat1", "One", "Home")]);
        let mut snap = Snapshot::new();
        snap.category_order = vec![CategoryId::from("cat1")].into();
        snap.assignment
            .assign(CardId::from("a"), CategoryId::from("cat1"));
        OrderingEngine::load(snap, cards, categories, EngineConfig::default())
    }

    #[test]
    fn available_renders_last_with_default_name() {
        let view = engine().project();
        assert_eq!(view.categories.len(), 1);
        assert_eq!(view.categories[0].name, "One");
        assert_eq!(view.categories[0].icon, "Home");
        assert!(view.categories[0].system);
        assert_eq!(view.available.name, AVAILABLE_NAME);
        assert_eq!(view.available.cards[0].title, "Beta");
        assert_eq!(view.all().count(), 2);
    }

    #[test]
    fn custom_title_wins() {
        let mut engine = engine();
        engine
            .apply(MutationOp::SetCardTitle {
                card: CardId::from("a"),
                title: Some("Mine".to_string()),
            })
            .unwrap();
        let view = engine.project();
        assert_eq!(view.categories[0].cards[0].title, "Mine");
    }

    #[test]
    fn card_drag_highlights_candidate() {
        let mut engine = engine();
        engine.begin_card_drag(&CardId::from("b")).unwrap();
        engine.drag_over(&DropZone::CardSlot {
            category: CategoryId::from("cat1"),
            index: 1,
        });

        let view = engine.project();
        let cat1 = view.category(&CategoryId::from("cat1")).unwrap();
        assert!(cat1.drop_highlight);
        assert_eq!(cat1.placeholder, Some(1));
        assert!(view.available.cards[0].dragging);
        assert!(!view.available.drop_highlight);

        engine.end_drag();
        let view = engine.project();
        assert!(view.all().all(|c| !c.drop_highlight && c.placeholder.is_none()));
        assert!(view.all().flat_map(|c| &c.cards).all(|card| !card.dragging));
    }
}
