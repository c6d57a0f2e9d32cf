//! The graph model: sole owner of the live universe.
//!
//! Everything that reads or changes the board goes through a
//! [`GraphModel`]. Imports decode completely before the live universe is
//! swapped, so a failed import leaves the model exactly as it was and
//! subscribers only ever see whole universes.

use crate::search::{self, CharacterSummary};
use crate::subscription::{SubscriptionId, Subscribers};
use easyboard_core::{
    decode_archive, encode_archive, parse_universe_json, sample, universe_to_json, CodecError,
    Edge, Node, Position, SkippedEntry, Universe,
};
use tracing::{debug, info};

/// Outcome of a successful import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub node_count: usize,
    pub edge_count: usize,
    /// Character entries that were dropped during decoding.
    pub skipped: Vec<SkippedEntry>,
}

/// Owns the live universe and the subscribers watching it.
#[derive(Debug, Default)]
pub struct GraphModel {
    universe: Universe,
    subscribers: Subscribers,
}

impl GraphModel {
    /// Creates a model with an empty universe.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_universe(universe: Universe) -> Self {
        Self {
            universe,
            subscribers: Subscribers::new(),
        }
    }

    /// Creates a model holding the sample universe.
    pub fn seeded() -> Self {
        Self::with_universe(sample::sample_universe())
    }

    /// The live universe.
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Moves the first node with the given id.
    ///
    /// Unknown ids are ignored. Returns whether a node was moved.
    pub fn update_node_position(&mut self, id: &str, position: Position) -> bool {
        match self.universe.nodes.iter_mut().find(|node| node.id() == id) {
            Some(node) => {
                node.position = position;
                true
            }
            None => {
                debug!("No node {} to move", id);
                false
            }
        }
    }

    /// Appends a node with no tags or descriptions.
    ///
    /// Ids are not checked for collisions.
    pub fn add_node(
        &mut self,
        id: impl Into<String>,
        label: impl Into<String>,
        position: Option<Position>,
    ) {
        self.universe
            .nodes
            .push(Node::new(id, label, position.unwrap_or_default()));
    }

    /// Appends an edge. The label defaults to empty.
    pub fn add_edge(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        label: Option<String>,
    ) {
        self.universe
            .edges
            .push(Edge::new(source, target, label.unwrap_or_default()));
    }

    /// Replaces the universe with the contents of an archive.
    ///
    /// # Errors
    ///
    /// If the archive cannot be opened the universe is left untouched and
    /// no subscriber is called.
    pub fn import_universe(&mut self, bytes: &[u8]) -> Result<ImportReport, CodecError> {
        let decoded = decode_archive(bytes)?;
        let report = ImportReport {
            node_count: decoded.universe.node_count(),
            edge_count: decoded.universe.edge_count(),
            skipped: decoded.skipped,
        };

        info!(
            "Imported universe: {} characters, {} relations ({} entries skipped)",
            report.node_count,
            report.edge_count,
            report.skipped.len()
        );
        self.replace_universe(decoded.universe);
        Ok(report)
    }

    /// Replaces the universe with a single-file JSON universe.
    ///
    /// # Errors
    ///
    /// Invalid JSON, or a document without `nodes` and `edges`, leaves the
    /// universe untouched.
    pub fn import_universe_json(&mut self, text: &str) -> Result<ImportReport, CodecError> {
        let universe = parse_universe_json(text)?;
        let report = ImportReport {
            node_count: universe.node_count(),
            edge_count: universe.edge_count(),
            skipped: Vec::new(),
        };

        info!(
            "Imported JSON universe: {} characters, {} relations",
            report.node_count, report.edge_count
        );
        self.replace_universe(universe);
        Ok(report)
    }

    /// Encodes the live universe as an archive.
    pub fn export_universe(&self) -> Result<Vec<u8>, CodecError> {
        let bytes = encode_archive(&self.universe)?;
        info!(
            "Exported {} characters ({} bytes)",
            self.universe.node_count(),
            bytes.len()
        );
        Ok(bytes)
    }

    /// Encodes the live universe as single-file JSON.
    pub fn export_universe_json(&self) -> Result<String, CodecError> {
        universe_to_json(&self.universe)
    }

    /// Registers a callback for universe replacements.
    pub fn subscribe_to_universe_update<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&Universe) + Send + 'static,
    {
        self.subscribers.subscribe(Box::new(callback))
    }

    /// Returns false if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.unsubscribe(id)
    }

    /// Character list for the side panel.
    pub fn characters(&self) -> Vec<CharacterSummary> {
        search::summaries(&self.universe)
    }

    /// Characters whose name contains the query, ignoring case.
    pub fn search_characters(&self, query: &str) -> Vec<CharacterSummary> {
        search::search(&self.universe, query)
    }

    /// Full node for a character id.
    pub fn character(&self, id: &str) -> Option<&Node> {
        self.universe.node(id)
    }

    fn replace_universe(&mut self, universe: Universe) {
        self.universe = universe;
        self.subscribers.notify(&self.universe);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use easyboard_core::{CharacterRecord, Relation};
    use std::io::{Cursor, Write};
    use std::sync::{Arc, Mutex};
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn archive_of(entries: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for (path, content) in entries {
            writer
                .start_file(*path, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_update_node_position() {
        let mut model = GraphModel::seeded();

        assert!(model.update_node_position("2", Position::new(1.0, 2.0)));
        assert_eq!(
            model.character("2").unwrap().position,
            Position::new(1.0, 2.0)
        );
    }

    #[test]
    fn test_update_unknown_node_is_noop() {
        let mut model = GraphModel::seeded();
        let before = model.universe().clone();

        assert!(!model.update_node_position("missing", Position::new(9.0, 9.0)));
        assert_eq!(model.universe(), &before);
    }

    #[test]
    fn test_add_node_and_edge() {
        let mut model = GraphModel::new();
        model.add_node("1", "Arya", None);
        model.add_node("1", "Arya twin", Some(Position::new(3.0, 4.0)));
        model.add_edge("1", "2", Some("ami".to_string()));
        model.add_edge("1", "2", None);

        let universe = model.universe();
        assert_eq!(universe.node_count(), 2);
        assert_eq!(universe.nodes[0].position, Position::default());
        assert!(universe.nodes[0].data.tags.is_empty());
        assert_eq!(universe.nodes[1].position, Position::new(3.0, 4.0));
        assert_eq!(universe.edges[0].id(), "1-2-ami");
        assert_eq!(universe.edges[1].id(), "1-2-");
        assert_eq!(universe.edges[1].label(), "");
    }

    #[test]
    fn test_import_replaces_universe_and_notifies() {
        let mut model = GraphModel::seeded();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let first = {
            let seen = Arc::clone(&seen);
            model.subscribe_to_universe_update(move |u: &Universe| {
                seen.lock().unwrap().push(("first", u.node_count()))
            })
        };
        {
            let seen = Arc::clone(&seen);
            model.subscribe_to_universe_update(move |u: &Universe| {
                seen.lock().unwrap().push(("second", u.node_count()))
            });
        }

        let bytes = archive_of(&[
            ("characters/A.json", r#"{"id": "a", "name": "A", "relations": [{"target": "b", "label": "x"}]}"#),
            ("characters/B.json", r#"{"id": "b", "name": "B"}"#),
            ("characters/C.json", "not json"),
        ]);
        let report = model.import_universe(&bytes).unwrap();

        assert_eq!(report.node_count, 2);
        assert_eq!(report.edge_count, 1);
        assert_eq!(report.skipped.len(), 1);
        assert!(model.character("1").is_none());
        assert_eq!(model.character("a").unwrap().label(), "A");
        assert_eq!(*seen.lock().unwrap(), vec![("first", 2), ("second", 2)]);

        assert!(model.unsubscribe(first));
        model.import_universe(&bytes).unwrap();
        assert_eq!(
            *seen.lock().unwrap(),
            vec![("first", 2), ("second", 2), ("second", 2)]
        );
    }

    #[test]
    fn test_failed_import_leaves_universe_untouched() {
        let mut model = GraphModel::seeded();
        let before = model.universe().clone();
        let calls = Arc::new(Mutex::new(0));
        {
            let calls = Arc::clone(&calls);
            model.subscribe_to_universe_update(move |_: &Universe| *calls.lock().unwrap() += 1);
        }

        assert!(model.import_universe(b"PK\x03\x04 truncated").is_err());
        assert!(model.import_universe_json(r#"{"nodes": []}"#).is_err());
        assert!(model.import_universe_json("not json").is_err());

        assert_eq!(model.universe(), &before);
        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn test_export_then_import_round_trip() {
        let mut model = GraphModel::seeded();
        model.update_node_position("1", Position::new(-5.5, 12.0));
        let bytes = model.export_universe().unwrap();

        let mut restored = GraphModel::new();
        let report = restored.import_universe(&bytes).unwrap();

        assert!(report.skipped.is_empty());
        assert_eq!(restored.universe(), model.universe());
    }

    #[test]
    fn test_export_keeps_relations_of_added_edges() {
        let mut model = GraphModel::with_universe(Universe::from_records(vec![
            CharacterRecord::new("1", "Arya").with_relations(vec![Relation::new("2", "ami")]),
            CharacterRecord::new("2", "Jon"),
        ]));
        model.add_edge("2", "1", Some("protecteur".to_string()));

        let mut restored = GraphModel::new();
        restored
            .import_universe(&model.export_universe().unwrap())
            .unwrap();

        let ids: Vec<_> = restored.universe().edges.iter().map(Edge::id).collect();
        assert_eq!(ids, vec!["1-2-ami", "2-1-protecteur"]);
    }

    #[test]
    fn test_json_import_and_export() {
        let model = GraphModel::seeded();
        let text = model.export_universe_json().unwrap();

        let mut restored = GraphModel::new();
        let report = restored.import_universe_json(&text).unwrap();
        assert_eq!(report.node_count, 2);
        assert_eq!(restored.universe(), model.universe());
    }
}
