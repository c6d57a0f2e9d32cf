//! EasyBoard Core - character records and universe codecs
//!
//! A universe is a set of characters and the labeled relations between
//! them. On disk it is an archive with one JSON document per character,
//! each owning its outgoing relations. In memory it is a flat list of nodes
//! and edges that a board renderer can lay out directly.
//!
//! # Example
//!
//! ```no_run
//! use easyboard_core::{decode_archive, encode_archive};
//!
//! let bytes = std::fs::read("universe.zip").unwrap();
//! let decoded = decode_archive(&bytes).unwrap();
//! for skipped in &decoded.skipped {
//!     eprintln!("skipped {}", skipped);
//! }
//!
//! let exported = encode_archive(&decoded.universe).unwrap();
//! ```

pub mod archive;
mod character;
mod error;
pub mod sample;
pub mod simple;
mod universe;

pub use archive::{
    decode_archive, encode_archive, entry_path, DecodedArchive, ARCHIVE_FILE_NAME, CHARACTERS_DIR,
};
pub use character::{CharacterRecord, Position, Relation, Tag};
pub use error::{CodecError, Result, SkippedEntry};
pub use simple::{parse_universe_json, universe_to_json, JSON_FILE_NAME};
pub use universe::{edge_id, Edge, EdgeData, Node, NodeData, Universe, UniverseStats};
