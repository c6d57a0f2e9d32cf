//! Character records: the unit of storage inside a universe archive.
//!
//! A record owns its outgoing relations. Reading is deliberately lax: only
//! the id is required, everything else falls back to an empty value.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A 2D position on the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Reads a position, falling back to the origin unless both `x` and `y`
    /// are numbers.
    pub fn from_value(value: &Value) -> Self {
        match (
            value.get("x").and_then(Value::as_f64),
            value.get("y").and_then(Value::as_f64),
        ) {
            (Some(x), Some(y)) => Self { x, y },
            _ => Self::default(),
        }
    }
}

impl<'de> Deserialize<'de> for Position {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// A typed key/value attribute on a character.
///
/// The declared type is advisory; `value` is kept as whatever JSON value
/// the file contained. Keys other than `name`, `type` and `value` are kept
/// in `extra` and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Tag {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Tag {
    pub fn new(name: impl Into<String>, kind: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
            value: value.into(),
            extra: Map::new(),
        }
    }

    /// Reads a tag from any JSON object. `name` and `type` are coerced to
    /// strings and default to empty; only non-objects are rejected.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let mut extra = object.clone();
        let name = extra.remove("name");
        let kind = extra.remove("type");
        let tag_value = extra.remove("value").unwrap_or(Value::Null);

        Some(Self {
            name: name.as_ref().and_then(scalar_to_string).unwrap_or_default(),
            kind: kind.as_ref().and_then(scalar_to_string).unwrap_or_default(),
            value: tag_value,
            extra,
        })
    }
}

impl<'de> Deserialize<'de> for Tag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_value(&value).ok_or_else(|| serde::de::Error::custom("tag is not an object"))
    }
}

/// An outgoing, labeled relation to another character.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Relation {
    pub target: String,
    pub label: String,
}

impl Relation {
    pub fn new(target: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            label: label.into(),
        }
    }
}

/// One character as stored in `characters/<name>.json`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CharacterRecord {
    pub id: String,
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub tags: Vec<Tag>,
    pub position: Position,
    pub relations: Vec<Relation>,
}

impl CharacterRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_descriptions(
        mut self,
        short_description: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        self.short_description = short_description.into();
        self.description = description.into();
        self
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    pub fn with_relations(mut self, relations: Vec<Relation>) -> Self {
        self.relations = relations;
        self
    }

    /// Builds a record from an arbitrary JSON document.
    ///
    /// Fails only when the document is not an object or has no usable id.
    /// Scalars are coerced to strings, non-array `tags`/`relations` become
    /// empty. Tag elements that are not objects and relations without a
    /// target are dropped.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let object = value
            .as_object()
            .ok_or_else(|| "document is not a JSON object".to_string())?;

        let id = object
            .get("id")
            .and_then(scalar_to_string)
            .ok_or_else(|| "record has no id".to_string())?;

        let name = object
            .get("name")
            .and_then(scalar_to_string)
            .unwrap_or_default();

        let tags = object
            .get("tags")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(Tag::from_value).collect())
            .unwrap_or_default();

        let relations = object
            .get("relations")
            .and_then(Value::as_array)
            .map(|items| items.iter().filter_map(relation_from_value).collect())
            .unwrap_or_default();

        Ok(Self {
            id,
            name,
            short_description: string_field(value, "shortDescription"),
            description: string_field(value, "description"),
            tags,
            position: object
                .get("position")
                .map(Position::from_value)
                .unwrap_or_default(),
            relations,
        })
    }
}

fn relation_from_value(value: &Value) -> Option<Relation> {
    let target = value.get("target").and_then(scalar_to_string)?;
    let label = value
        .get("label")
        .and_then(scalar_to_string)
        .unwrap_or_default();
    Some(Relation { target, label })
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(scalar_to_string)
        .unwrap_or_default()
}

/// Strings pass through, numbers and booleans use their JSON text.
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_position_defaults_when_malformed() {
        assert_eq!(Position::from_value(&json!({"x": 3.0})), Position::default());
        assert_eq!(
            Position::from_value(&json!({"x": "1", "y": 2})),
            Position::default()
        );
        assert_eq!(Position::from_value(&json!(null)), Position::default());
        assert_eq!(
            Position::from_value(&json!({"x": 1, "y": -2.5})),
            Position::new(1.0, -2.5)
        );
    }

    #[test]
    fn test_record_coerces_numeric_ids() {
        let record = CharacterRecord::from_value(&json!({
            "id": 7,
            "name": "Bran",
            "relations": [{"target": 8, "label": "frère"}]
        }))
        .unwrap();

        assert_eq!(record.id, "7");
        assert_eq!(record.relations, vec![Relation::new("8", "frère")]);
    }

    #[test]
    fn test_record_defaults_optional_fields() {
        let record = CharacterRecord::from_value(&json!({
            "id": "1",
            "name": "Arya",
            "tags": "not a list",
            "relations": {"target": "2"}
        }))
        .unwrap();

        assert_eq!(record.short_description, "");
        assert_eq!(record.description, "");
        assert!(record.tags.is_empty());
        assert!(record.relations.is_empty());
        assert_eq!(record.position, Position::default());
    }

    #[test]
    fn test_record_drops_malformed_elements() {
        let record = CharacterRecord::from_value(&json!({
            "id": "1",
            "name": "Arya",
            "tags": [{"name": "age", "type": "int", "value": 15}, "loose"],
            "relations": [{"label": "nobody"}, {"target": "2"}]
        }))
        .unwrap();

        assert_eq!(record.tags, vec![Tag::new("age", "int", 15)]);
        assert_eq!(record.relations, vec![Relation::new("2", "")]);
    }

    #[test]
    fn test_record_keeps_loosely_typed_tags() {
        let record = CharacterRecord::from_value(&json!({
            "id": "1",
            "name": "Arya",
            "tags": [
                {"name": "age", "type": null, "value": 15},
                {"name": "rank", "type": 1, "value": "first"},
                {"name": 7, "type": "int"},
                {"name": "ok", "type": "string", "value": "v", "note": "kept"}
            ]
        }))
        .unwrap();

        assert_eq!(record.tags.len(), 4);
        assert_eq!(record.tags[0].kind, "");
        assert_eq!(record.tags[0].value, json!(15));
        assert_eq!(record.tags[1].kind, "1");
        assert_eq!(record.tags[2].name, "7");
        assert_eq!(record.tags[2].value, Value::Null);
        assert_eq!(record.tags[3].extra.get("note"), Some(&json!("kept")));

        let written = serde_json::to_value(&record).unwrap();
        assert_eq!(
            written["tags"][3],
            json!({"name": "ok", "type": "string", "value": "v", "note": "kept"})
        );
    }

    #[test]
    fn test_record_coerces_scalar_descriptions() {
        let record = CharacterRecord::from_value(&json!({
            "id": "1",
            "name": "Arya",
            "shortDescription": 42,
            "description": true
        }))
        .unwrap();

        assert_eq!(record.short_description, "42");
        assert_eq!(record.description, "true");
    }

    #[test]
    fn test_record_requires_object_with_id() {
        assert!(CharacterRecord::from_value(&json!([1, 2])).is_err());
        assert!(CharacterRecord::from_value(&json!({"name": "Ghost"})).is_err());
    }

    #[test]
    fn test_record_serializes_camel_case() {
        let record = CharacterRecord::new("1", "Arya").with_descriptions("short", "long");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["shortDescription"], "short");
        assert_eq!(value["description"], "long");
        assert_eq!(value["position"], json!({"x": 0.0, "y": 0.0}));
    }
}
