//! Character listing and name search for the side panel.

use easyboard_core::{Node, Tag, Universe};
use serde::Serialize;

/// Name shown for characters with an empty label.
///
/// Decoding turns a missing `name` into an empty label, so a missing name
/// and an empty one cannot be told apart here. Both get this placeholder so
/// the list never shows a blank row.
pub const UNNAMED: &str = "(unnamed)";

/// What the character list needs to know about one node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CharacterSummary {
    pub id: String,
    pub name: String,
    pub tags: Vec<Tag>,
    pub description: String,
}

impl From<&Node> for CharacterSummary {
    fn from(node: &Node) -> Self {
        let name = if node.label().is_empty() {
            UNNAMED.to_string()
        } else {
            node.label().to_string()
        };

        Self {
            id: node.id().to_string(),
            name,
            tags: node.data.tags.clone(),
            description: node.data.description.clone(),
        }
    }
}

/// Summaries of every node, in universe order.
pub fn summaries(universe: &Universe) -> Vec<CharacterSummary> {
    universe.nodes.iter().map(CharacterSummary::from).collect()
}

/// Summaries whose name contains the query, ignoring case. An empty query
/// matches everything.
pub fn search(universe: &Universe, query: &str) -> Vec<CharacterSummary> {
    let query_lower = query.to_lowercase();
    universe
        .nodes
        .iter()
        .map(CharacterSummary::from)
        .filter(|summary| summary.name.to_lowercase().contains(&query_lower))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use easyboard_core::sample::sample_universe;
    use easyboard_core::Position;
    use serde_json::json;

    #[test]
    fn test_search_ignores_case() {
        let universe = sample_universe();

        let names: Vec<_> = search(&universe, "SNOW")
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Jon Snow"]);

        assert_eq!(search(&universe, "").len(), 2);
        assert!(search(&universe, "lannister").is_empty());
    }

    #[test]
    fn test_summary_fields() {
        let universe = sample_universe();
        let arya = &summaries(&universe)[0];

        assert_eq!(arya.id, "1");
        assert_eq!(arya.description, "Une jeune fille de la maison Stark.");
        assert_eq!(arya.tags[1].value, json!(15));
    }

    #[test]
    fn test_unnamed_fallback() {
        let mut universe = Universe::new();
        universe.nodes.push(Node::new("x", "", Position::default()));

        let list = summaries(&universe);
        assert_eq!(list[0].name, UNNAMED);
        assert_eq!(search(&universe, "unnamed").len(), 1);
    }
}
