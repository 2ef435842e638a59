//! Card and category registries
//!
//! Both registries are plain values handed to an editing session. Nothing
//! here is global, so independent sessions (and tests) never share state.

use crate::ids::{CardId, CategoryId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A card known to the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDefinition {
    /// Card id
    pub id: CardId,
    /// Title shown when no custom title is set
    pub default_title: String,
    /// Category used by the default layout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_category: Option<CategoryId>,
}

impl CardDefinition {
    /// Create definition without a default category
    #[must_use]
    pub fn new(id: impl Into<CardId>, default_title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            default_title: default_title.into(),
            default_category: None,
        }
    }

    /// With default category
    #[inline]
    #[must_use]
    pub fn in_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.default_category = Some(category.into());
        self
    }
}

/// The fixed universe of card ids, in registration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardRegistry {
    cards: IndexMap<CardId, CardDefinition>,
}

impl CardRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            cards: IndexMap::new(),
        }
    }

    /// Register a card; a later definition with the same id replaces the
    /// earlier one but keeps its position
    pub fn register(&mut self, definition: CardDefinition) {
        self.cards.insert(definition.id.clone(), definition);
    }

    /// Check if a card id is known
    #[inline]
    #[must_use]
    pub fn contains(&self, card: &CardId) -> bool {
        self.cards.contains_key(card)
    }

    /// Look up a definition
    #[inline]
    #[must_use]
    pub fn get(&self, card: &CardId) -> Option<&CardDefinition> {
        self.cards.get(card)
    }

    /// Default title of a card
    #[must_use]
    pub fn default_title(&self, card: &CardId) -> Option<&str> {
        self.cards.get(card).map(|d| d.default_title.as_str())
    }

    /// Card ids in registration order
    pub fn ids(&self) -> impl Iterator<Item = &CardId> {
        self.cards.keys()
    }

    /// Definitions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &CardDefinition> {
        self.cards.values()
    }

    /// Number of known cards
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if no cards are known
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl FromIterator<CardDefinition> for CardRegistry {
    fn from_iter<I: IntoIterator<Item = CardDefinition>>(iter: I) -> Self {
        let mut registry = Self::new();
        for definition in iter {
            registry.register(definition);
        }
        registry
    }
}

/// System categories ship with the dashboard; custom ones are admin-made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    /// Fixed category: can be hidden, never deleted or renamed
    System,
    /// Admin-created category: can be renamed, re-iconed, deleted
    Custom,
}

/// Definition of one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDefinition {
    /// Category id
    pub id: CategoryId,
    /// Default display name
    pub name: String,
    /// Default icon name
    pub icon: String,
    /// System or custom
    pub kind: CategoryKind,
}

impl CategoryDefinition {
    /// Create system category definition
    #[must_use]
    pub fn system(
        id: impl Into<CategoryId>,
        name: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            kind: CategoryKind::System,
        }
    }

    /// Create custom category definition
    #[must_use]
    pub fn custom(
        id: impl Into<CategoryId>,
        name: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            kind: CategoryKind::Custom,
        }
    }

    /// Check if this is a system category
    #[inline]
    #[must_use]
    pub fn is_system(&self) -> bool {
        self.kind == CategoryKind::System
    }
}

/// Registry of category definitions
///
/// Seeded with the system categories; custom categories are registered as
/// they are created or discovered while loading a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryRegistry {
    categories: IndexMap<CategoryId, CategoryDefinition>,
}

impl CategoryRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            categories: IndexMap::new(),
        }
    }

    /// Create registry from system definitions
    #[must_use]
    pub fn with_system(definitions: impl IntoIterator<Item = CategoryDefinition>) -> Self {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(CategoryDefinition {
                kind: CategoryKind::System,
                ..definition
            });
        }
        registry
    }

    /// Register a definition
    ///
    /// `available` is never registered; it is implied. Returns `false` if the
    /// id was ignored.
    pub fn register(&mut self, definition: CategoryDefinition) -> bool {
        if definition.id.is_available() {
            return false;
        }
        self.categories.insert(definition.id.clone(), definition);
        true
    }

    /// Remove a custom definition; system definitions stay
    pub fn remove_custom(&mut self, category: &CategoryId) -> Option<CategoryDefinition> {
        if self.is_system(category) {
            return None;
        }
        self.categories.shift_remove(category)
    }

    /// Look up a definition
    #[inline]
    #[must_use]
    pub fn get(&self, category: &CategoryId) -> Option<&CategoryDefinition> {
        self.categories.get(category)
    }

    /// Check if a category is known (the sentinel always is)
    #[must_use]
    pub fn knows(&self, category: &CategoryId) -> bool {
        category.is_available() || self.categories.contains_key(category)
    }

    /// Check if a category is a system category
    #[must_use]
    pub fn is_system(&self, category: &CategoryId) -> bool {
        self.categories
            .get(category)
            .is_some_and(CategoryDefinition::is_system)
    }

    /// Check if a category is a registered custom category
    #[must_use]
    pub fn is_custom(&self, category: &CategoryId) -> bool {
        self.categories
            .get(category)
            .is_some_and(|d| d.kind == CategoryKind::Custom)
    }

    /// System category ids in registration order
    pub fn system_ids(&self) -> impl Iterator<Item = &CategoryId> {
        self.categories
            .values()
            .filter(|d| d.is_system())
            .map(|d| &d.id)
    }

    /// All definitions in registration order
    pub fn iter(&self) -> impl Iterator<Item = &CategoryDefinition> {
        self.categories.values()
    }

    /// Smallest unused `<prefix><n>` id with `n >= 1`
    ///
    /// `taken` lets the caller exclude ids it knows about that are not
    /// registered here.
    #[must_use]
    pub fn allocate_custom_id(
        &self,
        prefix: &str,
        taken: impl Fn(&CategoryId) -> bool,
    ) -> CategoryId {
        (1u64..)
            .map(|n| CategoryId::new(format!("{prefix}{n}")))
            .find(|id| !self.knows(id) && !taken(id))
            .unwrap_or_else(|| CategoryId::new(format!("{prefix}{}", u64::MAX)))
    }

    /// Number of definitions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
