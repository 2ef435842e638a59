//! Batch dialog editor
//!
//! Edits accumulate in the session and reach the host only through a single
//! [`SaveHost::on_save`] call. Cancelling drops the session without calling
//! the host at all.

use crate::layout::default_layout;
use deck_engine::{ChangeSet, DropZone, EditorView, EngineError, MutationOp, OrderingEngine};
use deck_model::{CardId, CardRegistry, CategoryId, CategoryRegistry, EngineConfig, Snapshot};

/// Receiver of the saved snapshot
pub trait SaveHost {
    /// Persist the invariant-checked snapshot
    fn on_save(&mut self, snapshot: Snapshot);
}

impl<F> SaveHost for F
where
    F: FnMut(Snapshot),
{
    fn on_save(&mut self, snapshot: Snapshot) {
        self(snapshot);
    }
}

/// Full-screen editor that commits on save
#[derive(Debug)]
pub struct DialogEditor<H> {
    session: OrderingEngine,
    host: H,
}

impl<H: SaveHost> DialogEditor<H> {
    /// Open over a copy of the host configuration
    pub fn open(
        snapshot: Snapshot,
        cards: CardRegistry,
        categories: CategoryRegistry,
        config: EngineConfig,
        host: H,
    ) -> Self {
        let snapshot = default_layout(snapshot, &cards, &categories);
        Self {
            session: OrderingEngine::load(snapshot, cards, categories, config),
            host,
        }
    }

    /// Apply one edit
    ///
    /// # Errors
    /// See [`OrderingEngine::apply`]
    pub fn apply(&mut self, op: MutationOp) -> Result<ChangeSet, EngineError> {
        self.session.apply(op)
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

    /// Drop the dragged item
    ///
    /// # Errors
    /// See [`OrderingEngine::drop_on`]
    pub fn drop_on(&mut self, zone: &DropZone) -> Result<ChangeSet, EngineError> {
        self.session.drop_on(zone)
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

    /// Hand the snapshot to the host and close
    ///
    /// # Errors
    /// Returns [`EngineError::Invariant`] if the snapshot is inconsistent;
    /// the host is not called in that case.
    pub fn save(mut self) -> Result<H, EngineError> {
        let snapshot = self.session.save()?;
        self.host.on_save(snapshot);
        tracing::info!("Dialog saved");
        Ok(self.host)
    }

    /// Close without saving
    #[must_use]
    pub fn cancel(self) -> H {
        tracing::debug!("Dialog cancelled");
        self.host
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deck_model::{CardDefinition, CategoryDefinition};

    fn open(saved: &mut Vec<Snapshot>) -> DialogEditor<impl FnMut(Snapshot) + '_> {
        let cards = [CardDefinition::new("a", "A"), CardDefinition::new("b", "B")]
            .into_iter()
            .collect();
        let categories =
            CategoryRegistry::with_system([CategoryDefinition::system("news", "News", "News")]);
        DialogEditor::open(
            Snapshot::new(),
            cards,
            categories,
            EngineConfig::default(),
            move |snapshot| saved.push(snapshot),
        )
    }

    #[test]
    fn save_calls_host_once() {
        let mut saved = Vec::new();
        let mut dialog = open(&mut saved);
        dialog
            .apply(MutationOp::MoveCard {
                card: CardId::from("a"),
                to: CategoryId::from("news"),
                index: 0,
            })
            .unwrap();
        dialog.save().unwrap();

        assert_eq!(saved.len(), 1);
        assert_eq!(
            saved[0].cards_in(&CategoryId::from("news")),
            vec![CardId::from("a")]
        );
    }

    #[test]
    fn cancel_never_calls_host() {
        let mut saved = Vec::new();
        let mut dialog = open(&mut saved);
        dialog.apply(MutationOp::CreateCategory).unwrap();
        let _ = dialog.cancel();
        assert!(saved.is_empty());
    }
}
