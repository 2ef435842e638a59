//! Deck Model
//!
//! Collections behind the card & category ordering engine.
//!
//! # Core Concepts
//!
//! - [`OrderStore`]: one flat card order, authoritative for intra-category order
//! - [`AssignmentMap`]: card → category membership, defaulting to `available`
//! - [`CategoryOrder`]: user order of categories, never containing `available`
//! - [`CategoryConfigStore`]: per-category `visible` / `show_title` flags
//! - [`AlteredSet`]: categories touched this session
//! - [`Snapshot`]: the persisted tuple of all of the above plus display metadata
//! - [`CardRegistry`] / [`CategoryRegistry`]: explicit, passed-in registries
//!
//! # Example
//!
//! ```rust
//! use deck_model::{CardId, CategoryId, Snapshot};
//!
//! let mut snapshot = Snapshot::new();
//! snapshot.card_order.push(CardId::from("weather"));
//! snapshot.assignment.assign(CardId::from("weather"), CategoryId::available());
//! assert_eq!(snapshot.cards_in(&CategoryId::available()).len(), 1);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod assignment;
mod category;
mod config;
mod error;
mod ids;
mod order;
mod registry;
mod snapshot;

// Re-exports
pub use assignment::AssignmentMap;
pub use category::{AlteredSet, CategoryConfig, CategoryConfigStore, CategoryOrder};
pub use config::EngineConfig;
pub use error::{ConfigError, InvariantViolation, SnapshotError};
pub use ids::{CardId, CategoryId, AVAILABLE};
pub use order::OrderStore;
pub use registry::{
    CardDefinition, CardRegistry, CategoryDefinition, CategoryKind, CategoryRegistry,
};
pub use snapshot::Snapshot;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
