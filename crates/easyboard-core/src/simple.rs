//! Single-file JSON universes: `{"nodes": [...], "edges": [...]}`.
//!
//! This older format stores the graph shape directly instead of one record
//! per character.

use crate::error::{CodecError, Result};
use crate::universe::Universe;
use serde_json::Value;

/// Suggested download name for an exported JSON universe.
pub const JSON_FILE_NAME: &str = "univers.json";

/// Parses a JSON universe.
///
/// # Errors
///
/// Returns [`CodecError::InvalidUniverse`] unless the document is an object
/// with both a `nodes` and an `edges` key.
pub fn parse_universe_json(text: &str) -> Result<Universe> {
    let value: Value = serde_json::from_str(text)?;

    let has_keys = value
        .as_object()
        .map(|object| object.contains_key("nodes") && object.contains_key("edges"))
        .unwrap_or(false);
    if !has_keys {
        return Err(CodecError::InvalidUniverse(
            "missing structure (nodes/edges)".to_string(),
        ));
    }

    Ok(serde_json::from_value(value)?)
}

pub fn universe_to_json(universe: &Universe) -> Result<String> {
    Ok(serde_json::to_string_pretty(universe)?)
}
