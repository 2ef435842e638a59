//! Category-level collections
//!
//! - [`CategoryOrder`]: user order of categories, never containing `available`
//! - [`CategoryConfigStore`]: per-category `visible` / `show_title` flags
//! - [`AlteredSet`]: categories explicitly touched this session

use crate::ids::CategoryId;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Ordered category ids, excluding the `available` sentinel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryOrder(Vec<CategoryId>);

impl CategoryOrder {
    /// Create empty order
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Borrow the order
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[CategoryId] {
        &self.0
    }

    /// Number of ordered categories
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if no categories are ordered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in display order
    pub fn iter(&self) -> impl Iterator<Item = &CategoryId> {
        self.0.iter()
    }

    /// Check membership
    #[inline]
    #[must_use]
    pub fn contains(&self, category: &CategoryId) -> bool {
        self.0.contains(category)
    }

    /// Index of a category
    #[must_use]
    pub fn position(&self, category: &CategoryId) -> Option<usize> {
        self.0.iter().position(|c| c == category)
    }

    /// Insert at the front; ignores `available` and ids already present
    pub fn push_front(&mut self, category: CategoryId) -> bool {
        if category.is_available() || self.contains(&category) {
            return false;
        }
        self.0.insert(0, category);
        true
    }

    /// Append; ignores `available` and ids already present
    pub fn push(&mut self, category: CategoryId) -> bool {
        if category.is_available() || self.contains(&category) {
            return false;
        }
        self.0.push(category);
        true
    }

    /// Remove a category, returning its former index
    pub fn remove(&mut self, category: &CategoryId) -> Option<usize> {
        let index = self.position(category)?;
        self.0.remove(index);
        Some(index)
    }

    /// Move a category to `to_index` (clamped)
    ///
    /// The category is taken out first, then inserted at `to_index` of the
    /// shortened order. Returns `false` when the category is unknown or the
    /// order does not change.
    pub fn move_to(&mut self, category: &CategoryId, to_index: usize) -> bool {
        let Some(from) = self.position(category) else {
            return false;
        };
        let to = to_index.min(self.0.len() - 1);
        if from == to {
            return false;
        }
        let item = self.0.remove(from);
        self.0.insert(to, item);
        true
    }

    /// Categories preceding `category`, nearest first
    ///
    /// For an id that is not ordered (e.g. `available`, which renders
    /// last) every ordered category precedes it.
    pub fn preceding(&self, category: &CategoryId) -> impl Iterator<Item = &CategoryId> {
        let end = self.position(category).unwrap_or(self.0.len());
        self.0[..end].iter().rev()
    }

    /// Keep only the categories matching `keep`
    pub fn retain(&mut self, keep: impl FnMut(&CategoryId) -> bool) {
        self.0.retain(keep);
    }
}

impl From<Vec<CategoryId>> for CategoryOrder {
    fn from(categories: Vec<CategoryId>) -> Self {
        Self(categories)
    }
}

impl FromIterator<CategoryId> for CategoryOrder {
    fn from_iter<I: IntoIterator<Item = CategoryId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Display flags of one category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryConfig {
    /// Whether the category is rendered at all
    pub visible: bool,
    /// Whether the category header is rendered
    pub show_title: bool,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        Self {
            visible: true,
            show_title: true,
        }
    }
}

/// Per-category display flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryConfigStore(IndexMap<CategoryId, CategoryConfig>);

impl CategoryConfigStore {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Flags of a category; defaults when absent
    #[must_use]
    pub fn get(&self, category: &CategoryId) -> CategoryConfig {
        self.0.get(category).copied().unwrap_or_default()
    }

    /// Check if an explicit entry exists
    #[inline]
    #[must_use]
    pub fn contains(&self, category: &CategoryId) -> bool {
        self.0.contains_key(category)
    }

    /// Replace the flags of a category
    pub fn set(&mut self, category: CategoryId, config: CategoryConfig) {
        self.0.insert(category, config);
    }

    /// Set visibility; returns `true` if the flag changed
    pub fn set_visible(&mut self, category: &CategoryId, visible: bool) -> bool {
        let entry = self.0.entry(category.clone()).or_default();
        let changed = entry.visible != visible;
        entry.visible = visible;
        changed
    }

    /// Flip visibility, returning the new value
    pub fn toggle_visible(&mut self, category: &CategoryId) -> bool {
        let entry = self.0.entry(category.clone()).or_default();
        entry.visible = !entry.visible;
        entry.visible
    }

    /// Flip title visibility, returning the new value
    pub fn toggle_show_title(&mut self, category: &CategoryId) -> bool {
        let entry = self.0.entry(category.clone()).or_default();
        entry.show_title = !entry.show_title;
        entry.show_title
    }

    /// Drop the entry of a category
    pub fn remove(&mut self, category: &CategoryId) -> Option<CategoryConfig> {
        self.0.shift_remove(category)
    }

    /// Keep only the entries matching `keep`
    pub fn retain(&mut self, mut keep: impl FnMut(&CategoryId) -> bool) {
        self.0.retain(|category, _| keep(category));
    }

    /// Iterate over explicit entries
    pub fn iter(&self) -> impl Iterator<Item = (&CategoryId, &CategoryConfig)> {
        self.0.iter()
    }
}

impl FromIterator<(CategoryId, CategoryConfig)> for CategoryConfigStore {
    fn from_iter<I: IntoIterator<Item = (CategoryId, CategoryConfig)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Categories explicitly touched during the session
///
/// Renames, icon changes, creation, and cards routed into or out of a
/// category all mark it. Marks are sticky until the session ends and are
/// never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlteredSet(BTreeSet<CategoryId>);

impl AlteredSet {
    /// Create empty set
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Mark a category; returns `true` if it was not marked yet
    pub fn mark(&mut self, category: CategoryId) -> bool {
        self.0.insert(category)
    }

    /// Check if a category was touched
    #[inline]
    #[must_use]
    pub fn contains(&self, category: &CategoryId) -> bool {
        self.0.contains(category)
    }

    /// Forget a category (used when it is deleted)
    pub fn forget(&mut self, category: &CategoryId) -> bool {
        self.0.remove(category)
    }

    /// Iterate in id order
    pub fn iter(&self) -> impl Iterator<Item = &CategoryId> {
        self.0.iter()
    }

    /// Number of marked categories
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if nothing was touched
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(raw: &[&str]) -> CategoryOrder {
        raw.iter().map(|s| CategoryId::from(*s)).collect()
    }

    #[test]
    fn move_to_front() {
        let mut cats = order(&["cat1", "cat2"]);
        assert!(cats.move_to(&CategoryId::from("cat2"), 0));
        assert_eq!(cats, order(&["cat2", "cat1"]));
    }

    #[test]
    fn move_to_takes_target_slot_when_moving_down() {
        let mut cats = order(&["a", "b", "c"]);
        assert!(cats.move_to(&CategoryId::from("a"), 2));
        assert_eq!(cats, order(&["b", "c", "a"]));
    }

    #[test]
    fn move_to_clamps_and_ignores_unknown() {
        let mut cats = order(&["a", "b"]);
        assert!(cats.move_to(&CategoryId::from("a"), 50));
        assert_eq!(cats, order(&["b", "a"]));
        assert!(!cats.move_to(&CategoryId::from("zzz"), 0));
        assert!(!cats.move_to(&CategoryId::from("a"), 1));
    }

    #[test]
    fn push_rejects_available_and_duplicates() {
        let mut cats = order(&["a"]);
        assert!(!cats.push_front(CategoryId::available()));
        assert!(!cats.push(CategoryId::from("a")));
        assert!(cats.push_front(CategoryId::from("b")));
        assert_eq!(cats, order(&["b", "a"]));
    }

    #[test]
    fn preceding_walks_backwards() {
        let cats = order(&["a", "b", "c"]);
        let before_c: Vec<_> = cats.preceding(&CategoryId::from("c")).cloned().collect();
        assert_eq!(before_c, vec![CategoryId::from("b"), CategoryId::from("a")]);

        let before_available: Vec<_> = cats.preceding(&CategoryId::available()).collect();
        assert_eq!(before_available.len(), 3);
    }

    #[test]
    fn config_defaults_and_toggles() {
        let mut store = CategoryConfigStore::new();
        let id = CategoryId::from("news");
        assert_eq!(store.get(&id), CategoryConfig::default());

        assert!(!store.toggle_visible(&id));
        assert!(!store.toggle_show_title(&id));
        assert!(store.set_visible(&id, true));
        assert!(!store.set_visible(&id, true));
        assert_eq!(
            store.get(&id),
            CategoryConfig {
                visible: true,
                show_title: false
            }
        );
    }

    #[test]
    fn config_uses_camel_case_keys() {
        let json = serde_json::to_value(CategoryConfig::default()).unwrap();
        assert_eq!(json["showTitle"], true);
    }

    #[test]
    fn altered_marks_are_sticky() {
        let mut altered = AlteredSet::new();
        assert!(altered.mark(CategoryId::from("x")));
        assert!(!altered.mark(CategoryId::from("x")));
        assert!(altered.contains(&CategoryId::from("x")));
        assert!(altered.forget(&CategoryId::from("x")));
        assert!(altered.is_empty());
    }
}
