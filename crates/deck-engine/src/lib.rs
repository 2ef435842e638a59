//! Deck Engine - card & category ordering
//!
//! The engine behind dashboard configuration editors:
//! - Keeps one flat card order and derives each category's cards from it
//! - Translates local drop indices into global positions
//! - Runs pointer drags through a single idle/dragging state machine
//! - Creates, renames, reorders and deletes categories
//! - Hides empty untouched custom categories and prunes them on save
//!
//! # Example
//!
//! ```rust
//! use deck_engine::prelude::*;
//!
//! let cards: CardRegistry = [CardDefinition::new("a", "Alpha"), CardDefinition::new("b", "Beta")]
//!     .into_iter()
//!     .collect();
//! let mut engine = OrderingEngine::load(
//!     Snapshot::new(),
//!     cards,
//!     CategoryRegistry::new(),
//!     EngineConfig::default(),
//! );
//!
//! let created = engine.apply(MutationOp::CreateCategory).unwrap();
//! let category = created.added.unwrap();
//!
//! engine.begin_card_drag(&CardId::from("b")).unwrap();
//! engine.drop_on(&DropZone::CategoryHeader { category: category.clone() }).unwrap();
//!
//! assert_eq!(engine.cards_in(&category), vec![CardId::from("b")]);
//! let saved = engine.save().unwrap();
//! assert!(saved.check_invariants(engine.cards()).is_ok());
//! ```

#![warn(unreachable_pub)]
#![warn(missing_docs)]

pub mod drag;
pub mod error;
mod lifecycle;
pub mod op;
pub mod partition;
pub mod projection;
pub mod session;
pub mod simulator;
pub mod visibility;

// Re-exports for convenience
pub use drag::{CardTarget, DragCoordinator, DragState, DropZone};
pub use error::EngineError;
pub use op::{ChangeSet, Collection, MutationOp};
pub use partition::CardMove;
pub use projection::{CardView, CategoryView, EditorView};
pub use session::{OrderingEngine, SessionParts};
pub use simulator::{run_simulator, SimulatorConfig, SimulatorReport};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the ordering engine
    pub use crate::{
        ChangeSet, Collection, DragState, DropZone, EditorView, EngineError, MutationOp,
        OrderingEngine,
    };
    pub use deck_model::{
        CardDefinition, CardId, CardRegistry, CategoryDefinition, CategoryId, CategoryRegistry,
        EngineConfig, Snapshot,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
