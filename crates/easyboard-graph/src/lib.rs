//! EasyBoard Graph - the live character relationship graph
//!
//! This crate owns the universe currently shown on the board. The
//! presentation layer reads it, moves nodes, imports and exports archives,
//! and subscribes to replacements, all through a [`GraphModel`].
//!
//! # Example
//!
//! ```no_run
//! use easyboard_graph::{GraphModel, Position};
//!
//! let mut model = GraphModel::new();
//! model.subscribe_to_universe_update(|universe| {
//!     println!("{} characters loaded", universe.node_count());
//! });
//!
//! let bytes = std::fs::read("universe.zip").unwrap();
//! model.import_universe(&bytes).unwrap();
//! model.update_node_position("1", Position::new(120.0, 40.0));
//!
//! std::fs::write("universe.zip", model.export_universe().unwrap()).unwrap();
//! ```

mod model;
mod search;
mod subscription;

pub use easyboard_core::{CodecError, Edge, Node, Position, Tag, Universe};
pub use model::{GraphModel, ImportReport};
pub use search::{CharacterSummary, UNNAMED};
pub use subscription::{SubscriptionId, Subscribers, UniverseCallback};
