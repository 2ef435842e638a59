//! Mutation operations and their change sets
//!
//! A [`MutationOp`] is the resolved form of a drop or click. Applying it
//! yields a [`ChangeSet`] naming every collection that changed.

use deck_model::{CardId, CategoryId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One atomic edit of the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum MutationOp {
    /// Place a card at a local index of a category (reorder or cross-category move)
    MoveCard {
        /// Card to move
        card: CardId,
        /// Target category
        to: CategoryId,
        /// Position among the target's cards, ignoring the moved card
        index: usize,
    },

    /// Move a category to a position in the category order
    MoveCategory {
        /// Category to move
        category: CategoryId,
        /// Target position
        to_index: usize,
    },

    /// Create an empty custom category at the front
    CreateCategory,

    /// Delete a custom category; its cards fall back to `available`
    DeleteCategory {
        /// Category to delete
        category: CategoryId,
    },

    /// Rename a custom category
    RenameCategory {
        /// Category to rename
        category: CategoryId,
        /// New display name
        name: String,
    },

    /// Change the icon of a custom category
    SetCategoryIcon {
        /// Category to change
        category: CategoryId,
        /// New icon name
        icon: String,
    },

    /// Flip the `visible` flag of a category
    ToggleCategoryVisible {
        /// Category to toggle
        category: CategoryId,
    },

    /// Set the `visible` flag of a category
    SetCategoryVisible {
        /// Category to change
        category: CategoryId,
        /// New value
        visible: bool,
    },

    /// Flip the `show_title` flag of a category
    ToggleCategoryTitle {
        /// Category to toggle
        category: CategoryId,
    },

    /// Set card visibility
    SetCardVisible {
        /// Card to change
        card: CardId,
        /// New value
        visible: bool,
    },

    /// Flip card visibility
    ToggleCardVisible {
        /// Card to toggle
        card: CardId,
    },

    /// Set or clear a custom card title
    SetCardTitle {
        /// Card to change
        card: CardId,
        /// Custom title; `None` restores the default
        #[serde(default)]
        title: Option<String>,
    },

    /// Expand or collapse a category in the editor (session only)
    ToggleCollapsed {
        /// Category to toggle
        category: CategoryId,
    },
}

impl MutationOp {
    /// Short operation name for logs and statistics
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::MoveCard { .. } => "move_card",
            Self::MoveCategory { .. } => "move_category",
            Self::CreateCategory => "create_category",
            Self::DeleteCategory { .. } => "delete_category",
            Self::RenameCategory { .. } => "rename_category",
            Self::SetCategoryIcon { .. } => "set_category_icon",
            Self::ToggleCategoryVisible { .. } => "toggle_category_visible",
            Self::SetCategoryVisible { .. } => "set_category_visible",
            Self::ToggleCategoryTitle { .. } => "toggle_category_title",
            Self::SetCardVisible { .. } => "set_card_visible",
            Self::ToggleCardVisible { .. } => "toggle_card_visible",
            Self::SetCardTitle { .. } => "set_card_title",
            Self::ToggleCollapsed { .. } => "toggle_collapsed",
        }
    }
}

/// A collection of the session that an operation may change
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    /// Flat card order
    CardOrder,
    /// Card membership
    Assignment,
    /// Category order
    CategoryOrder,
    /// Category display flags
    CategoryConfig,
    /// Category display names
    CategoryNames,
    /// Category icons
    CategoryIcons,
    /// Card visibility flags
    CardVisibility,
    /// Custom card titles
    CardTitles,
    /// Session-only UI state (collapsed categories)
    SessionState,
}

/// What an applied operation changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    touched: BTreeSet<Collection>,
    /// Category created by the operation
    pub added: Option<CategoryId>,
    /// Category deleted by the operation
    pub deleted: Option<CategoryId>,
    /// Category whose name changed
    pub renamed: Option<CategoryId>,
    /// Category whose icon changed
    pub reiconed: Option<CategoryId>,
    /// Categories hidden by the empty-category pass
    pub hidden: Vec<CategoryId>,
}

impl ChangeSet {
    /// Empty change set
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Record a changed collection
    pub fn touch(&mut self, collection: Collection) -> &mut Self {
        self.touched.insert(collection);
        self
    }

    /// Builder form of [`ChangeSet::touch`]
    #[must_use]
    pub fn with(mut self, collection: Collection) -> Self {
        self.touched.insert(collection);
        self
    }

    /// Check if a collection changed
    #[inline]
    #[must_use]
    pub fn touches(&self, collection: Collection) -> bool {
        self.touched.contains(&collection)
    }

    /// Changed collections in a stable order
    pub fn collections(&self) -> impl Iterator<Item = Collection> + '_ {
        self.touched.iter().copied()
    }

    /// Check if nothing changed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.touched.is_empty()
    }

    /// Check if anything persisted changed
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.touched.iter().any(|c| *c != Collection::SessionState)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ops_use_tagged_json() {
        let op: MutationOp =
            serde_json::from_str(r#"{"op":"move_card","card":"b","to":"cat2","index":1}"#)
                .unwrap();
        assert_eq!(
            op,
            MutationOp::MoveCard {
                card: CardId::from("b"),
                to: CategoryId::from("cat2"),
                index: 1,
            }
        );
        assert_eq!(op.name(), "move_card");

        let create: MutationOp = serde_json::from_str(r#"{"op":"create_category"}"#).unwrap();
        assert_eq!(create, MutationOp::CreateCategory);

        let title: MutationOp =
            serde_json::from_str(r#"{"op":"set_card_title","card":"a"}"#).unwrap();
        assert_eq!(
            title,
            MutationOp::SetCardTitle {
                card: CardId::from("a"),
                title: None
            }
        );
    }

    #[test]
    fn session_state_is_not_persistent() {
        let changes = ChangeSet::none().with(Collection::SessionState);
        assert!(!changes.is_empty());
        assert!(!changes.is_persistent());

        let changes = changes.with(Collection::CardOrder);
        assert!(changes.is_persistent());
        assert_eq!(
            changes.collections().collect::<Vec<_>>(),
            vec![Collection::CardOrder, Collection::SessionState]
        );
    }
}
