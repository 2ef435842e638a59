//! Category lifecycle: create, rename, re-icon, move, delete

use crate::error::EngineError;
use crate::op::{ChangeSet, Collection};
use crate::session::OrderingEngine;
use deck_model::{CategoryConfig, CategoryDefinition, CategoryId};

impl OrderingEngine {
    /// Create an empty custom category at the front of the order
    pub(crate) fn create_category(&mut self) -> ChangeSet {
        let snap = &self.snapshot;
        let id = self
            .categories
            .allocate_custom_id(&self.config.custom_id_prefix, |id| snap.has_category(id));
        let name = self.unique_name(&self.config.new_category_name);
        let icon = self.config.new_category_icon.clone();

        self.categories
            .register(CategoryDefinition::custom(id.clone(), name.clone(), icon.clone()));
        self.snapshot.category_order.push_front(id.clone());
        self.snapshot.category_names.insert(id.clone(), name);
        self.snapshot.category_icons.insert(id.clone(), icon);
        self.snapshot
            .category_config
            .set(id.clone(), CategoryConfig::default());
        self.altered.mark(id.clone());

        tracing::info!("Created category {}", id);
        let mut changes = ChangeSet::none()
            .with(Collection::CategoryOrder)
            .with(Collection::CategoryNames)
            .with(Collection::CategoryIcons)
            .with(Collection::CategoryConfig);
        changes.added = Some(id);
        changes
    }

    /// `base`, or `base N` with the smallest N >= 2 not already in use
    fn unique_name(&self, base: &str) -> String {
        let taken = |name: &str| {
            self.snapshot
                .category_order
                .iter()
                .any(|id| self.display_name(id) == name)
        };
        if !taken(base) {
            return base.to_string();
        }
        (2u32..)
            .map(|n| format!("{base} {n}"))
            .find(|name| !taken(name.as_str()))
            .unwrap_or_else(|| base.to_string())
    }

    /// Display name: snapshot override, registry name, then the raw id
    pub(crate) fn display_name<'a>(&'a self, category: &'a CategoryId) -> &'a str {
        self.snapshot
            .category_names
            .get(category)
            .map(String::as_str)
            .or_else(|| self.categories.get(category).map(|d| d.name.as_str()))
            .unwrap_or_else(|| category.as_str())
    }

    fn require_custom(&self, category: &CategoryId) -> Result<(), EngineError> {
        if category.is_available() || self.categories.is_system(category) {
            return Err(EngineError::ProtectedCategory(category.clone()));
        }
        if !self.snapshot.category_order.contains(category) {
            return Err(EngineError::UnknownCategory(category.clone()));
        }
        Ok(())
    }

    pub(crate) fn rename_category(
        &mut self,
        category: &CategoryId,
        name: &str,
    ) -> Result<ChangeSet, EngineError> {
        self.require_custom(category)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::BlankName);
        }

        self.snapshot
            .category_names
            .insert(category.clone(), name.to_string());
        if let Some(def) = self.categories.get(category).cloned() {
            self.categories.register(CategoryDefinition {
                name: name.to_string(),
                ..def
            });
        }
        self.altered.mark(category.clone());

        tracing::debug!("Renamed category {} to {:?}", category, name);
        let mut changes = ChangeSet::none().with(Collection::CategoryNames);
        changes.renamed = Some(category.clone());
        Ok(changes)
    }

    pub(crate) fn set_category_icon(
        &mut self,
        category: &CategoryId,
        icon: &str,
    ) -> Result<ChangeSet, EngineError> {
        self.require_custom(category)?;
        let icon = icon.trim();
        if icon.is_empty() {
            return Err(EngineError::BlankName);
        }

        self.snapshot
            .category_icons
            .insert(category.clone(), icon.to_string());
        if let Some(def) = self.categories.get(category).cloned() {
            self.categories.register(CategoryDefinition {
                icon: icon.to_string(),
                ..def
            });
        }
        self.altered.mark(category.clone());

        let mut changes = ChangeSet::none().with(Collection::CategoryIcons);
        changes.reiconed = Some(category.clone());
        Ok(changes)
    }

    pub(crate) fn move_category(
        &mut self,
        category: &CategoryId,
        to_index: usize,
    ) -> Result<ChangeSet, EngineError> {
        if category.is_available() {
            return Err(EngineError::ProtectedCategory(category.clone()));
        }
        if !self.snapshot.category_order.contains(category) {
            return Err(EngineError::UnknownCategory(category.clone()));
        }
        if self.snapshot.category_order.move_to(category, to_index) {
            Ok(ChangeSet::none().with(Collection::CategoryOrder))
        } else {
            Ok(ChangeSet::none())
        }
    }

    /// Delete a custom category, sending its cards to `available`
    ///
    /// The cards keep their place in the flat order.
    pub(crate) fn delete_category(
        &mut self,
        category: &CategoryId,
    ) -> Result<ChangeSet, EngineError> {
        self.require_custom(category)?;

        let available = CategoryId::available();
        let moved = self.snapshot.assignment.reassign_all(category, &available);
        self.snapshot.category_order.remove(category);
        self.snapshot.category_config.remove(category);
        self.snapshot.category_names.shift_remove(category);
        self.snapshot.category_icons.shift_remove(category);
        self.categories.remove_custom(category);
        self.altered.forget(category);
        self.collapsed.remove(category);
        if self.drag.cancel_if_involves(category) {
            tracing::debug!("Cancelled drag involving deleted category {}", category);
        }

        tracing::info!(
            "Deleted category {}; {} card(s) moved to available",
            category,
            moved.len()
        );
        let mut changes = ChangeSet::none()
            .with(Collection::CategoryOrder)
            .with(Collection::CategoryConfig)
            .with(Collection::CategoryNames)
            .with(Collection::CategoryIcons);
        if !moved.is_empty() {
            changes.touch(Collection::Assignment);
            self.altered.mark(available);
        }
        changes.deleted = Some(category.clone());
        Ok(changes)
    }
}
