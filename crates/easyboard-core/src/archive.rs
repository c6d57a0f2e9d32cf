//! Universe archives: a ZIP container holding one JSON document per
//! character under `characters/`.
//!
//! Decoding is tolerant at the entry level. A character file that cannot be
//! read or parsed is skipped and reported, and the rest of the archive still
//! loads. Only a container that cannot be opened fails the whole decode.

use crate::character::CharacterRecord;
use crate::error::{Result, SkippedEntry};
use crate::universe::Universe;
use std::collections::HashSet;
use std::io::{Cursor, Read, Write};
use tracing::{debug, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Directory holding the character documents.
pub const CHARACTERS_DIR: &str = "characters/";

/// Suggested download name for an exported archive.
pub const ARCHIVE_FILE_NAME: &str = "universe.zip";

const ENTRY_EXTENSION: &str = ".json";

/// Output of [`decode_archive`].
#[derive(Debug, Clone, Default)]
pub struct DecodedArchive {
    /// The freshly built universe.
    pub universe: Universe,
    /// Character entries that were present but unusable.
    pub skipped: Vec<SkippedEntry>,
}

/// Returns true for entries that hold a character document.
pub fn is_character_entry(path: &str) -> bool {
    path.starts_with(CHARACTERS_DIR) && path.ends_with(ENTRY_EXTENSION)
}

/// Decodes an archive into a new universe.
///
/// # Errors
///
/// Fails only if the container itself cannot be opened. Unreadable or
/// malformed character entries end up in [`DecodedArchive::skipped`].
pub fn decode_archive(bytes: &[u8]) -> Result<DecodedArchive> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))?;
    let mut decoded = DecodedArchive::default();

    for index in 0..archive.len() {
        let path = match archive.name_for_index(index) {
            Some(name) if is_character_entry(name) => name.to_string(),
            name => {
                debug!("Ignoring archive entry {}", name.unwrap_or("<unnamed>"));
                continue;
            }
        };

        let mut entry = match archive.by_index(index) {
            Ok(entry) if entry.is_dir() => continue,
            Ok(entry) => entry,
            Err(e) => {
                let skipped = SkippedEntry::new(path, format!("open failed: {}", e));
                warn!("Skipping character entry {}", skipped);
                decoded.skipped.push(skipped);
                continue;
            }
        };

        let mut text = String::new();
        let parsed = entry
            .read_to_string(&mut text)
            .map_err(|e| format!("read failed: {}", e))
            .and_then(|_| {
                serde_json::from_str::<serde_json::Value>(&text)
                    .map_err(|e| format!("invalid JSON: {}", e))
            })
            .and_then(|value| CharacterRecord::from_value(&value));

        match parsed {
            Ok(record) => decoded.universe.push_record(record),
            Err(reason) => {
                let skipped = SkippedEntry::new(path, reason);
                warn!("Skipping character entry {}", skipped);
                decoded.skipped.push(skipped);
            }
        }
    }

    debug!(
        "Decoded archive: {} nodes, {} edges, {} skipped",
        decoded.universe.node_count(),
        decoded.universe.edge_count(),
        decoded.skipped.len()
    );

    Ok(decoded)
}

/// Encodes a universe as an archive, one entry per node.
///
/// Entry names come from [`entry_path`]. When two nodes map to the same
/// path, the later one is written as `<stem>_<id>.json` (plus a counter if
/// that is taken too), so no character is ever overwritten.
pub fn encode_archive(universe: &Universe) -> Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut used = HashSet::new();

    for node in &universe.nodes {
        let record = universe.record_for(node);
        let path = unique_entry_path(&record, &mut used);
        let json = serde_json::to_string_pretty(&record)?;

        writer.start_file(path, options)?;
        writer.write_all(json.as_bytes())?;
    }

    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

/// All character records of a universe, in node order.
pub fn records(universe: &Universe) -> Vec<CharacterRecord> {
    universe
        .nodes
        .iter()
        .map(|node| universe.record_for(node))
        .collect()
}

/// File stem for a character name: every whitespace run becomes one `_`.
pub fn entry_stem(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                stem.push('_');
            }
            in_space = true;
        } else {
            stem.push(c);
            in_space = false;
        }
    }
    stem
}

/// Archive path for a character name, before collision handling.
pub fn entry_path(name: &str) -> String {
    format!("{}{}{}", CHARACTERS_DIR, entry_stem(name), ENTRY_EXTENSION)
}

fn unique_entry_path(record: &CharacterRecord, used: &mut HashSet<String>) -> String {
    let plain = entry_path(&record.name);
    if used.insert(plain.clone()) {
        return plain;
    }

    let base = format!(
        "{}{}_{}",
        CHARACTERS_DIR,
        entry_stem(&record.name),
        entry_stem(&record.id)
    );
    let mut candidate = format!("{}{}", base, ENTRY_EXTENSION);
    let mut counter = 2;
    while !used.insert(candidate.clone()) {
        candidate = format!("{}_{}{}", base, counter, ENTRY_EXTENSION);
        counter += 1;
    }

    debug!("Entry {} already taken, writing {} instead", plain, candidate);
    candidate
}
