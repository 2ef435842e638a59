//! Drag session state machine
//!
//! [`DragCoordinator`] tracks what is being dragged as one [`DragState`]
//! value. The candidate drop target lives inside the non-idle variants, so
//! an idle coordinator cannot carry a stale target and a card drag cannot
//! coexist with a category drag.
//!
//! ```text
//!            begin_card                      begin_category
//!   Idle ───────────────▶ DraggingCard     Idle ───────────▶ DraggingCategory
//!    ▲                        │ hover/leave                        │ hover/leave
//!    └──── drop / cancel ─────┘◀───────────── drop / cancel ───────┘
//! ```
//!
//! Hovering only updates the candidate. Dropping resolves the payload and
//! the zone into a [`MutationOp`] and always returns to `Idle`.

use crate::op::MutationOp;
use deck_model::{AssignmentMap, CardId, CategoryId, Snapshot};
use serde::{Deserialize, Serialize};

/// A position among one category's cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardTarget {
    /// Target category
    pub category: CategoryId,
    /// Local index, ignoring the dragged card
    pub index: usize,
}

/// Where the pointer currently is
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "zone", rename_all = "snake_case")]
pub enum DropZone {
    /// Between cards of a category
    CardSlot {
        /// Category the slot belongs to
        category: CategoryId,
        /// Local index of the slot
        index: usize,
    },
    /// A category header (reorder target for categories, append target for cards)
    CategoryHeader {
        /// Category of the header
        category: CategoryId,
    },
    /// The `available` area rendered after every category
    AvailableArea,
}

impl DropZone {
    /// Category the zone belongs to
    #[must_use]
    pub fn category(&self) -> CategoryId {
        match self {
            Self::CardSlot { category, .. } | Self::CategoryHeader { category } => {
                category.clone()
            }
            Self::AvailableArea => CategoryId::available(),
        }
    }
}

/// What is being dragged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    /// Nothing in flight
    #[default]
    Idle,
    /// A card is being dragged
    DraggingCard {
        /// Dragged card
        card: CardId,
        /// Category the card was in at drag start
        source: CategoryId,
        /// Current drop candidate
        candidate: Option<CardTarget>,
    },
    /// A category is being dragged by its handle
    DraggingCategory {
        /// Dragged category
        category: CategoryId,
        /// Category whose slot would be taken; `available` means the end
        candidate: Option<CategoryId>,
    },
}

impl DragState {
    /// Short state name for logs
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::DraggingCard { .. } => "dragging-card",
            Self::DraggingCategory { .. } => "dragging-category",
        }
    }
}

/// Drag session state machine
#[derive(Debug, Clone, Default)]
pub struct DragCoordinator {
    state: DragState,
}

impl DragCoordinator {
    /// Create idle coordinator
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Check if nothing is being dragged
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == DragState::Idle
    }

    /// Start dragging a card; the source comes from the assignment map
    ///
    /// A drag already in flight is abandoned.
    pub fn begin_card(&mut self, card: CardId, assignment: &AssignmentMap) {
        let source = assignment.category_of(&card).clone();
        self.replace(DragState::DraggingCard {
            card,
            source,
            candidate: None,
        });
    }

    /// Start dragging a category
    ///
    /// A drag already in flight is abandoned.
    pub fn begin_category(&mut self, category: CategoryId) {
        self.replace(DragState::DraggingCategory {
            category,
            candidate: None,
        });
    }

    fn replace(&mut self, next: DragState) {
        if !self.is_idle() {
            tracing::debug!("Abandoning {} drag for a new one", self.state.name());
        }
        tracing::debug!("Drag {} -> {}", self.state.name(), next.name());
        self.state = next;
    }

    /// Update the candidate target from a hovered zone
    ///
    /// Returns `false` while idle. Never touches the snapshot.
    pub fn hover(&mut self, zone: &DropZone, snapshot: &Snapshot) -> bool {
        match &mut self.state {
            DragState::Idle => false,
            DragState::DraggingCard {
                card, candidate, ..
            } => {
                *candidate = Some(card_target(card, zone, snapshot));
                true
            }
            DragState::DraggingCategory { candidate, .. } => {
                *candidate = Some(zone.category());
                true
            }
        }
    }

    /// Clear the candidate when the pointer leaves every drop zone
    pub fn leave(&mut self) {
        match &mut self.state {
            DragState::Idle => {}
            DragState::DraggingCard { candidate, .. } => *candidate = None,
            DragState::DraggingCategory { candidate, .. } => *candidate = None,
        }
    }

    /// Resolve a drop and return to `Idle`
    ///
    /// Returns `None` while idle or when the drop cannot change anything
    /// (a category dropped on itself).
    pub fn drop_on(&mut self, zone: &DropZone, snapshot: &Snapshot) -> Option<MutationOp> {
        let state = std::mem::take(&mut self.state);
        tracing::debug!("Drag {} -> idle (drop)", state.name());
        match state {
            DragState::Idle => None,
            DragState::DraggingCard { card, .. } => {
                let CardTarget { category, index } = card_target(&card, zone, snapshot);
                Some(MutationOp::MoveCard {
                    card,
                    to: category,
                    index,
                })
            }
            DragState::DraggingCategory { category, .. } => {
                let target = zone.category();
                if target == category {
                    return None;
                }
                let to_index = if target.is_available() {
                    snapshot.category_order.len().saturating_sub(1)
                } else {
                    snapshot.category_order.position(&target)?
                };
                Some(MutationOp::MoveCategory { category, to_index })
            }
        }
    }

    /// Abandon the drag; returns `true` if one was in flight
    pub fn cancel(&mut self) -> bool {
        let was_active = !self.is_idle();
        if was_active {
            tracing::debug!("Drag {} -> idle (cancel)", self.state.name());
        }
        self.state = DragState::Idle;
        was_active
    }

    /// Cancel if the in-flight drag involves `category`
    pub fn cancel_if_involves(&mut self, category: &CategoryId) -> bool {
        let involved = match &self.state {
            DragState::Idle => false,
            DragState::DraggingCard {
                source, candidate, ..
            } => source == category || candidate.as_ref().is_some_and(|t| &t.category == category),
            DragState::DraggingCategory {
                category: dragged,
                candidate,
            } => dragged == category || candidate.as_ref() == Some(category),
        };
        involved && self.cancel()
    }
}

/// Resolve a zone into a card position
///
/// Headers and the available area append: their index is the number of
/// cards in the category, not counting the dragged card.
fn card_target(card: &CardId, zone: &DropZone, snapshot: &Snapshot) -> CardTarget {
    match zone {
        DropZone::CardSlot { category, index } => CardTarget {
            category: category.clone(),
            index: *index,
        },
        DropZone::CategoryHeader { .. } | DropZone::AvailableArea => {
            let category = zone.category();
            let index = snapshot
                .cards_in(&category)
                .iter()
                .filter(|c| *c != card)
                .count();
            CardTarget { category, index }
        }
    }
}
