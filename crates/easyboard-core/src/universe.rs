//! The graph-side view of a universe.
//!
//! Character records are flattened into nodes and their relations into
//! edges. The JSON shape of nodes and edges (a `data` bag plus a position)
//! is what the board renderer consumes and what the single-file JSON format
//! stores.

use crate::character::{CharacterRecord, Position, Relation, Tag};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Builds the identifier of an edge.
///
/// Every place that creates an edge goes through here, so two relations with
/// the same source, target and label always share an id.
pub fn edge_id(source: &str, target: &str, label: &str) -> String {
    format!("{}-{}-{}", source, target, label)
}

/// Attribute bag of a node.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeData {
    pub id: String,
    pub label: String,
    pub short_description: String,
    pub description: String,
    pub tags: Vec<Tag>,
}

/// A character on the board.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub data: NodeData,
    #[serde(default)]
    pub position: Position,
}

impl Node {
    /// Creates a node with no descriptions or tags.
    pub fn new(id: impl Into<String>, label: impl Into<String>, position: Position) -> Self {
        Self {
            data: NodeData {
                id: id.into(),
                label: label.into(),
                ..NodeData::default()
            },
            position,
        }
    }

    pub fn id(&self) -> &str {
        &self.data.id
    }

    pub fn label(&self) -> &str {
        &self.data.label
    }
}

/// Attributes of an edge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeData {
    pub id: String,
    pub source: String,
    pub target: String,
    pub label: String,
}

/// A directed, labeled relation between two characters.
///
/// The endpoints are plain ids; nothing checks that they name an existing
/// node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    pub data: EdgeData,
}

impl Edge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        let source = source.into();
        let target = target.into();
        let label = label.into();
        Self {
            data: EdgeData {
                id: edge_id(&source, &target, &label),
                source,
                target,
                label,
            },
        }
    }

    pub fn id(&self) -> &str {
        &self.data.id
    }

    pub fn source(&self) -> &str {
        &self.data.source
    }

    pub fn target(&self) -> &str {
        &self.data.target
    }

    pub fn label(&self) -> &str {
        &self.data.label
    }
}

/// The complete graph: ordered nodes and ordered edges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Universe {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Counts for status output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UniverseStats {
    pub node_count: usize,
    pub edge_count: usize,
    /// Edges whose source or target names no node.
    pub dangling_edges: usize,
}

impl Universe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flattens character records into nodes and edges, one edge per
    /// relation, in record order.
    pub fn from_records(records: impl IntoIterator<Item = CharacterRecord>) -> Self {
        let mut universe = Self::new();
        for record in records {
            universe.push_record(record);
        }
        universe
    }

    /// Appends one record's node and its outgoing edges.
    pub fn push_record(&mut self, record: CharacterRecord) {
        for relation in &record.relations {
            self.edges
                .push(Edge::new(&record.id, &relation.target, &relation.label));
        }
        self.nodes.push(Node {
            data: NodeData {
                id: record.id,
                label: record.name,
                short_description: record.short_description,
                description: record.description,
                tags: record.tags,
            },
            position: record.position,
        });
    }

    /// Rebuilds the character record for a node, with the relations taken
    /// from every edge leaving it.
    pub fn record_for(&self, node: &Node) -> CharacterRecord {
        CharacterRecord {
            id: node.data.id.clone(),
            name: node.data.label.clone(),
            short_description: node.data.short_description.clone(),
            description: node.data.description.clone(),
            tags: node.data.tags.clone(),
            position: node.position,
            relations: self
                .outgoing(node.id())
                .map(|edge| Relation::new(edge.target(), edge.label()))
                .collect(),
        }
    }

    /// Edges whose source is `id`, in edge order.
    pub fn outgoing<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |edge| edge.source() == id)
    }

    /// First node with the given id.
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|node| node.id() == id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    pub fn stats(&self) -> UniverseStats {
        let ids: HashSet<&str> = self.nodes.iter().map(Node::id).collect();
        let dangling_edges = self
            .edges
            .iter()
            .filter(|edge| !ids.contains(edge.source()) || !ids.contains(edge.target()))
            .count();

        UniverseStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            dangling_edges,
        }
    }
}
