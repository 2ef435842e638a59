//! Editing session
//!
//! [`OrderingEngine`] owns one in-memory copy of the [`Snapshot`] plus the
//! session-only state (altered categories, collapsed categories, drag
//! state). Every edit goes through [`OrderingEngine::apply`], which mutates
//! the collections and then runs the empty-category pass before returning,
//! so callers only ever observe complete transitions.

use crate::drag::{DragCoordinator, DragState, DropZone};
use crate::error::EngineError;
use crate::op::{ChangeSet, Collection, MutationOp};
use crate::partition;
use crate::visibility;
use deck_model::{
    AlteredSet, CardId, CardRegistry, CategoryDefinition, CategoryId, CategoryRegistry,
    EngineConfig, Snapshot,
};
use std::collections::{BTreeSet, HashSet};

/// The card & category ordering engine for one editor session
#[derive(Debug, Clone)]
pub struct OrderingEngine {
    pub(crate) snapshot: Snapshot,
    pub(crate) altered: AlteredSet,
    pub(crate) collapsed: BTreeSet<CategoryId>,
    pub(crate) drag: DragCoordinator,
    pub(crate) cards: CardRegistry,
    pub(crate) categories: CategoryRegistry,
    pub(crate) config: EngineConfig,
}

/// Everything a session hands back when it ends
#[derive(Debug, Clone)]
pub struct SessionParts {
    /// Working snapshot, unpruned
    pub snapshot: Snapshot,
    /// Card registry the session was opened with
    pub cards: CardRegistry,
    /// Category registry including categories created this session
    pub categories: CategoryRegistry,
}

impl OrderingEngine {
    /// Open a session over a copy of the host configuration
    ///
    /// The input is normalised so that all invariants hold: unknown and
    /// duplicate card ids are dropped, missing known cards are appended,
    /// every card gets an assignment, dangling assignments fall back to
    /// `available`, and ordered custom categories are registered.
    #[must_use]
    pub fn load(
        snapshot: Snapshot,
        cards: CardRegistry,
        categories: CategoryRegistry,
        config: EngineConfig,
    ) -> Self {
        let mut engine = Self {
            snapshot,
            altered: AlteredSet::new(),
            collapsed: BTreeSet::new(),
            drag: DragCoordinator::new(),
            cards,
            categories,
            config,
        };
        engine.normalize();
        if engine.config.auto_hide_empty {
            visibility::auto_hide(&mut engine.snapshot, &engine.altered, &engine.categories);
        }
        tracing::info!(
            "Loaded session: {} cards, {} categories",
            engine.snapshot.card_order.len(),
            engine.snapshot.category_order.len()
        );
        engine
    }

    fn normalize(&mut self) {
        let snap = &mut self.snapshot;

        // Categories: no sentinel, no duplicates
        let mut seen_categories = HashSet::new();
        snap.category_order.retain(|category| {
            if category.is_available() {
                tracing::warn!("Dropping available from category order");
                return false;
            }
            if !seen_categories.insert(category.clone()) {
                tracing::warn!("Dropping duplicate category {}", category);
                return false;
            }
            true
        });
        for category in snap.category_order.iter() {
            if !self.categories.knows(category) {
                let name = snap
                    .category_names
                    .get(category)
                    .cloned()
                    .unwrap_or_else(|| category.to_string());
                let icon = snap
                    .category_icons
                    .get(category)
                    .cloned()
                    .unwrap_or_else(|| self.config.new_category_icon.clone());
                self.categories
                    .register(CategoryDefinition::custom(category.clone(), name, icon));
            }
        }

        // Cards: known ids once each, then the missing ones in registry order
        let cards = &self.cards;
        let mut seen_cards = HashSet::new();
        snap.card_order.retain(|card| {
            if !cards.contains(card) {
                tracing::warn!("Dropping unknown card {}", card);
                return false;
            }
            if !seen_cards.insert(card.clone()) {
                tracing::warn!("Dropping duplicate card {}", card);
                return false;
            }
            true
        });
        for card in cards.ids() {
            if !seen_cards.contains(card) {
                tracing::debug!("Appending newly registered card {}", card);
                snap.card_order.push(card.clone());
            }
        }

        // Assignment: one entry per card, pointing at a live category
        snap.assignment.retain(|card, _| cards.contains(card));
        let order: Vec<CardId> = snap.card_order.iter().cloned().collect();
        for card in order {
            let category = snap.assignment.category_of(&card).clone();
            if snap.has_category(&category) {
                snap.assignment.assign(card, category);
            } else {
                tracing::warn!(
                    "Card {} points at unknown category {}; moving to available",
                    card,
                    category
                );
                snap.assignment.assign(card, CategoryId::available());
            }
        }

        snap.card_visibility.retain(|card, _| cards.contains(card));
        snap.card_titles.retain(|card, _| cards.contains(card));
    }

    /// Apply one operation as a single transition
    ///
    /// # Errors
    /// Returns an error, leaving the session untouched, when the operation
    /// names an unknown card or category or targets a protected category.
    pub fn apply(&mut self, op: MutationOp) -> Result<ChangeSet, EngineError> {
        let name = op.name();
        let mut reverted_by_hide = None;
        let mut changes = match op {
            MutationOp::MoveCard { card, to, index } => self.move_card(&card, &to, index)?,
            MutationOp::MoveCategory { category, to_index } => {
                self.move_category(&category, to_index)?
            }
            MutationOp::CreateCategory => self.create_category(),
            MutationOp::DeleteCategory { category } => self.delete_category(&category)?,
            MutationOp::RenameCategory { category, name } => {
                self.rename_category(&category, &name)?
            }
            MutationOp::SetCategoryIcon { category, icon } => {
                self.set_category_icon(&category, &icon)?
            }
            MutationOp::ToggleCategoryVisible { category } => {
                self.require_category(&category)?;
                let before = self.snapshot.category_config.get(&category).visible;
                self.snapshot.category_config.toggle_visible(&category);
                reverted_by_hide = Some((category, before));
                ChangeSet::none().with(Collection::CategoryConfig)
            }
            MutationOp::SetCategoryVisible { category, visible } => {
                self.require_category(&category)?;
                let before = self.snapshot.category_config.get(&category).visible;
                if self.snapshot.category_config.set_visible(&category, visible) {
                    reverted_by_hide = Some((category, before));
                    ChangeSet::none().with(Collection::CategoryConfig)
                } else {
                    ChangeSet::none()
                }
            }
            MutationOp::ToggleCategoryTitle { category } => {
                self.require_category(&category)?;
                self.snapshot.category_config.toggle_show_title(&category);
                ChangeSet::none().with(Collection::CategoryConfig)
            }
            MutationOp::SetCardVisible { card, visible } => {
                self.require_card(&card)?;
                if self.snapshot.card_visible(&card) == visible {
                    ChangeSet::none()
                } else {
                    self.snapshot.card_visibility.insert(card, visible);
                    ChangeSet::none().with(Collection::CardVisibility)
                }
            }
            MutationOp::ToggleCardVisible { card } => {
                self.require_card(&card)?;
                let visible = !self.snapshot.card_visible(&card);
                self.snapshot.card_visibility.insert(card, visible);
                ChangeSet::none().with(Collection::CardVisibility)
            }
            MutationOp::SetCardTitle { card, title } => self.set_card_title(card, title)?,
            MutationOp::ToggleCollapsed { category } => {
                self.require_category(&category)?;
                if !self.collapsed.remove(&category) {
                    self.collapsed.insert(category);
                }
                ChangeSet::none().with(Collection::SessionState)
            }
        };

        self.derive_visibility(&mut changes);
        // showing a category the hide pass immediately hides again is no change
        if let Some((category, before)) = reverted_by_hide {
            let after = self.snapshot.category_config.get(&category).visible;
            if after == before && changes.hidden.iter().all(|hidden| *hidden == category) {
                changes = ChangeSet::none();
            }
        }
        tracing::debug!(
            "Applied {}: {:?}",
            name,
            changes.collections().collect::<Vec<_>>()
        );

        #[cfg(feature = "strict-debug")]
        if let Err(e) = self.snapshot.check_invariants(&self.cards) {
            panic!("invariant broken after {name}: {e}");
        }

        Ok(changes)
    }

    /// Apply, treating rejected input as "nothing changed"
    ///
    /// Integrity failures are still reported.
    ///
    /// # Errors
    /// Returns only errors for which [`EngineError::is_noop`] is `false`
    pub fn apply_lenient(&mut self, op: MutationOp) -> Result<ChangeSet, EngineError> {
        match self.apply(op) {
            Err(e) if e.is_noop() => {
                tracing::debug!("Ignoring operation: {}", e);
                Ok(ChangeSet::none())
            }
            other => other,
        }
    }

    fn derive_visibility(&mut self, changes: &mut ChangeSet) {
        if !self.config.auto_hide_empty {
            return;
        }
        let hidden = visibility::auto_hide(&mut self.snapshot, &self.altered, &self.categories);
        if !hidden.is_empty() {
            changes.touch(Collection::CategoryConfig);
            changes.hidden = hidden;
        }
    }

    fn move_card(
        &mut self,
        card: &CardId,
        to: &CategoryId,
        index: usize,
    ) -> Result<ChangeSet, EngineError> {
        let moved = partition::move_card(
            &mut self.snapshot.card_order,
            &mut self.snapshot.assignment,
            &self.snapshot.category_order,
            card,
            to,
            index,
        )?;
        let Some(moved) = moved else {
            return Ok(ChangeSet::none());
        };

        let mut changes = ChangeSet::none();
        if moved.from_global != moved.to_global {
            changes.touch(Collection::CardOrder);
        }
        if moved.crossed_categories() {
            changes.touch(Collection::Assignment);
            self.altered.mark(moved.from.clone());
            self.altered.mark(moved.to.clone());
        }
        Ok(changes)
    }

    fn set_card_title(
        &mut self,
        card: CardId,
        title: Option<String>,
    ) -> Result<ChangeSet, EngineError> {
        self.require_card(&card)?;
        let title = title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());
        let changed = match title {
            Some(title) => self.snapshot.card_titles.insert(card, title.clone()) != Some(title),
            None => self.snapshot.card_titles.shift_remove(&card).is_some(),
        };
        Ok(if changed {
            ChangeSet::none().with(Collection::CardTitles)
        } else {
            ChangeSet::none()
        })
    }

    pub(crate) fn require_card(&self, card: &CardId) -> Result<(), EngineError> {
        if self.snapshot.card_order.contains(card) {
            Ok(())
        } else {
            Err(EngineError::UnknownCard(card.clone()))
        }
    }

    pub(crate) fn require_category(&self, category: &CategoryId) -> Result<(), EngineError> {
        if self.snapshot.has_category(category) {
            Ok(())
        } else {
            Err(EngineError::UnknownCategory(category.clone()))
        }
    }

    // Drag API

    /// Start dragging a card
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownCard`] for cards not in the order
    pub fn begin_card_drag(&mut self, card: &CardId) -> Result<(), EngineError> {
        self.require_card(card)?;
        self.drag.begin_card(card.clone(), &self.snapshot.assignment);
        Ok(())
    }

    /// Start dragging a category by its handle
    ///
    /// # Errors
    /// Returns [`EngineError::UnknownCategory`] unless the category is ordered
    pub fn begin_category_drag(&mut self, category: &CategoryId) -> Result<(), EngineError> {
        if !self.snapshot.category_order.contains(category) {
            return Err(EngineError::UnknownCategory(category.clone()));
        }
        self.drag.begin_category(category.clone());
        Ok(())
    }

    /// Pointer moved over a drop zone; updates the candidate only
    pub fn drag_over(&mut self, zone: &DropZone) -> bool {
        self.drag.hover(zone, &self.snapshot)
    }

    /// Pointer left every drop zone
    pub fn drag_leave(&mut self) {
        self.drag.leave();
    }

    /// Drop on a zone: resolve and apply, then return to idle
    ///
    /// The coordinator is idle afterwards whatever the outcome.
    ///
    /// # Errors
    /// - [`EngineError::NotDragging`] when no drag is in flight
    /// - any error of [`OrderingEngine::apply`] for the resolved operation
    pub fn drop_on(&mut self, zone: &DropZone) -> Result<ChangeSet, EngineError> {
        if self.drag.is_idle() {
            return Err(EngineError::NotDragging);
        }
        match self.drag.drop_on(zone, &self.snapshot) {
            Some(op) => self.apply(op),
            None => Ok(ChangeSet::none()),
        }
    }

    /// End the drag without dropping (escape, pointer left the editor)
    pub fn end_drag(&mut self) -> bool {
        self.drag.cancel()
    }

    // Queries

    /// Working snapshot
    #[inline]
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// Current drag state
    #[inline]
    #[must_use]
    pub fn drag_state(&self) -> &DragState {
        self.drag.state()
    }

    /// Categories touched this session
    #[inline]
    #[must_use]
    pub fn altered(&self) -> &AlteredSet {
        &self.altered
    }

    /// Check if a category is collapsed in the editor
    #[inline]
    #[must_use]
    pub fn is_collapsed(&self, category: &CategoryId) -> bool {
        self.collapsed.contains(category)
    }

    /// Card registry of the session
    #[inline]
    #[must_use]
    pub fn cards(&self) -> &CardRegistry {
        &self.cards
    }

    /// Category registry of the session
    #[inline]
    #[must_use]
    pub fn categories(&self) -> &CategoryRegistry {
        &self.categories
    }

    /// Engine configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Cards of one category in display order
    #[must_use]
    pub fn cards_in(&self, category: &CategoryId) -> Vec<CardId> {
        self.snapshot.cards_in(category)
    }

    /// Snapshot to persist
    ///
    /// Empty custom categories never touched this session are dropped (when
    /// `prune_on_save` is set), then every invariant is verified.
    ///
    /// # Errors
    /// Returns [`EngineError::Invariant`] if the result is inconsistent
    pub fn save(&self) -> Result<Snapshot, EngineError> {
        let mut out = self.snapshot.clone();
        if self.config.prune_on_save {
            visibility::prune_for_save(&mut out, &self.altered, &self.categories);
        }
        out.check_invariants(&self.cards)?;
        tracing::info!(
            "Saving snapshot: {} cards, {} categories",
            out.card_order.len(),
            out.category_order.len()
        );
        Ok(out)
    }

    /// End the session, handing back the working state and registries
    #[must_use]
    pub fn into_parts(self) -> SessionParts {
        SessionParts {
            snapshot: self.snapshot,
            cards: self.cards,
            categories: self.categories,
        }
    }
}
