//! Live property-pane editor
//!
//! Every accepted edit is pushed to the host straight away, one callback
//! per changed collection. The pane runs on the same session type as the
//! dialog; only the delivery differs.

use deck_engine::{
    ChangeSet, Collection, DropZone, EditorView, EngineError, MutationOp, OrderingEngine,
};
use deck_model::{
    AssignmentMap, CardId, CardRegistry, CategoryConfigStore, CategoryId, CategoryOrder,
    CategoryRegistry, EngineConfig, OrderStore, Snapshot,
};
use indexmap::IndexMap;

/// Receiver of live changes
///
/// Every method defaults to doing nothing, so hosts implement only the
/// fields they persist.
#[allow(unused_variables)]
pub trait LiveHost {
    /// Flat card order changed
    fn on_order_changed(&mut self, order: &OrderStore) {}

    /// Card visibility changed
    fn on_visibility_changed(&mut self, visibility: &IndexMap<CardId, bool>) {}

    /// Custom card titles changed
    fn on_card_titles_changed(&mut self, titles: &IndexMap<CardId, String>) {}

    /// A category got a new display name
    fn on_category_name_changed(&mut self, category: &CategoryId, name: &str) {}

    /// A category got a new icon
    fn on_category_icon_changed(&mut self, category: &CategoryId, icon: &str) {}

    /// Category order changed
    fn on_category_order_changed(&mut self, order: &CategoryOrder) {}

    /// Category display flags changed
    fn on_category_config_changed(&mut self, config: &CategoryConfigStore) {}

    /// Card membership changed
    fn on_card_category_changed(&mut self, assignment: &AssignmentMap) {}

    /// A custom category was created
    fn on_category_added(&mut self, category: &CategoryId) {}

    /// A custom category was deleted
    fn on_category_deleted(&mut self, category: &CategoryId) {}
}

/// Compact editor that applies changes immediately
#[derive(Debug)]
pub struct PropertyPaneEditor<H> {
    session: OrderingEngine,
    host: H,
}

impl<H: LiveHost> PropertyPaneEditor<H> {
    /// Open over the host's current configuration
    pub fn open(
        snapshot: Snapshot,
        cards: CardRegistry,
        categories: CategoryRegistry,
        config: EngineConfig,
        host: H,
    ) -> Self {
        let snapshot = crate::layout::default_layout(snapshot, &cards, &categories);
        Self {
            session: OrderingEngine::load(snapshot, cards, categories, config),
            host,
        }
    }

    /// Apply one edit and notify the host
    ///
    /// # Errors
    /// See [`OrderingEngine::apply`]; the host hears nothing on error.
    pub fn apply(&mut self, op: MutationOp) -> Result<ChangeSet, EngineError> {
        let changes = self.session.apply(op).map_err(|e| {
            tracing::debug!("Pane ignored edit: {}", e);
            e
        })?;
        self.dispatch(&changes);
        Ok(changes)
    }

    /// Start dragging a card
    ///
    /// # Errors
    /// See [`OrderingEngine::begin_card_drag`]
    pub fn begin_card_drag(&mut self, card: &CardId) -> Result<(), EngineError> {
        self.session.begin_card_drag(card)
    }

    /// Start dragging a category
    ///
    /// # Errors
    /// See [`OrderingEngine::begin_category_drag`]
    pub fn begin_category_drag(&mut self, category: &CategoryId) -> Result<(), EngineError> {
        self.session.begin_category_drag(category)
    }

    /// Pointer over a drop zone
    pub fn drag_over(&mut self, zone: &DropZone) -> bool {
        self.session.drag_over(zone)
    }

    /// Drop the dragged item and notify the host
    ///
    /// # Errors
    /// See [`OrderingEngine::drop_on`]
    pub fn drop_on(&mut self, zone: &DropZone) -> Result<ChangeSet, EngineError> {
        let changes = self.session.drop_on(zone).map_err(|e| {
            tracing::debug!("Pane ignored drop: {}", e);
            e
        })?;
        self.dispatch(&changes);
        Ok(changes)
    }

    /// Abandon the current drag
    pub fn end_drag(&mut self) -> bool {
        self.session.end_drag()
    }

    /// Render model
    #[must_use]
    pub fn view(&self) -> EditorView {
        self.session.project()
    }

    /// Underlying session
    #[must_use]
    pub fn session(&self) -> &OrderingEngine {
        &self.session
    }

    /// Host receiving the callbacks
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Close the pane, returning the host
    #[must_use]
    pub fn close(self) -> H {
        self.host
    }

    fn dispatch(&mut self, changes: &ChangeSet) {
        let snap = self.session.snapshot();
        let host = &mut self.host;

        if let Some(category) = &changes.deleted {
            host.on_category_deleted(category);
        }
        if let Some(category) = &changes.added {
            host.on_category_added(category);
        }

        for collection in changes.collections() {
            match collection {
                Collection::CardOrder => host.on_order_changed(&snap.card_order),
                Collection::Assignment => host.on_card_category_changed(&snap.assignment),
                Collection::CategoryOrder => host.on_category_order_changed(&snap.category_order),
                Collection::CategoryConfig => {
                    host.on_category_config_changed(&snap.category_config);
                }
                Collection::CardVisibility => host.on_visibility_changed(&snap.card_visibility),
                Collection::CardTitles => host.on_card_titles_changed(&snap.card_titles),
                Collection::CategoryNames => {
                    for category in changes.renamed.iter().chain(&changes.added) {
                        if let Some(name) = snap.category_names.get(category) {
                            host.on_category_name_changed(category, name);
                        }
                    }
                }
                Collection::CategoryIcons => {
                    for category in changes.reiconed.iter().chain(&changes.added) {
                        if let Some(icon) = snap.category_icons.get(category) {
                            host.on_category_icon_changed(category, icon);
                        }
                    }
                }
                Collection::SessionState => {}
            }
        }
        tracing::trace!(
            "Dispatched {} live change(s)",
            changes.collections().count()
        );
    }
}
