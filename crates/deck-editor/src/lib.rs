//! Deck Editor - host surfaces over the ordering engine
//!
//! Two surfaces share one [`OrderingEngine`](deck_engine::OrderingEngine):
//! - [`DialogEditor`]: batches edits and hands one snapshot to a [`SaveHost`]
//! - [`PropertyPaneEditor`]: pushes each change to a [`LiveHost`] as it happens
//!
//! Both open through [`default_layout`], which lays out the system
//! categories when the host has no category order yet.

#![warn(unreachable_pub)]
#![warn(missing_docs)]

mod dialog;
mod layout;
mod pane;

pub use dialog::{DialogEditor, SaveHost};
pub use layout::default_layout;
pub use pane::{LiveHost, PropertyPaneEditor};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
