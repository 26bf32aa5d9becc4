//! In-memory document tree
//!
//! Every loaded document (the root spec and anything it references) is parsed
//! from YAML into a [`Node`] tree. Mappings that carry a `$ref` key are lifted
//! into [`Node::Reference`] at parse time so the resolver can rewrite them with
//! an exhaustive match instead of probing shapes at runtime.
//!
//! JSON is a subset of YAML, so JSON documents go through the same parser.

pub mod pointer;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_yaml::Value;

use crate::error::Result;
use crate::error::document::parse_failed;

pub use pointer::JsonPointer;

/// The key that turns a mapping into a reference
pub const REF_KEY: &str = "$ref";

/// Ordered mapping entries; insertion order is preserved through to the bundle
pub type Entries = Vec<(String, Node)>;

/// A node of a parsed document
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Scalar(Scalar),
    Sequence(Vec<Node>),
    Mapping(Entries),
    Reference(Reference),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

/// A mapping carrying a `$ref` key
///
/// `fields` holds the whole original mapping (including `$ref`), so a reference
/// left unresolved is written back exactly as it was read.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    /// The `$ref` value, or `None` when it is not a string
    pub target: Option<String>,
    pub fields: Entries,
}

impl Reference {
    /// A bare local reference such as `{"$ref": "#/components/schemas/Pet"}`
    pub fn local(fragment: impl Into<String>) -> Self {
        let fragment = fragment.into();
        Self {
            fields: vec![(
                REF_KEY.to_string(),
                Node::Scalar(Scalar::String(fragment.clone())),
            )],
            target: Some(fragment),
        }
    }
}

impl Node {
    #[cfg(test)]
    pub fn string(value: impl Into<String>) -> Self {
        Node::Scalar(Scalar::String(value.into()))
    }

    /// Build a node from a parsed YAML value
    pub fn from_yaml(value: Value) -> Self {
        match value {
            Value::Null => Node::Scalar(Scalar::Null),
            Value::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Value::Number(n) => Node::Scalar(number_from_yaml(&n)),
            Value::String(s) => Node::Scalar(Scalar::String(s)),
            Value::Sequence(items) => Node::Sequence(items.into_iter().map(Node::from_yaml).collect()),
            Value::Mapping(mapping) => {
                let entries: Entries = mapping
                    .into_iter()
                    .map(|(key, value)| (key_to_string(key), Node::from_yaml(value)))
                    .collect();
                Node::from_entries(entries)
            }
            Value::Tagged(tagged) => Node::from_yaml(tagged.value),
        }
    }

    /// Wrap mapping entries, lifting them into a reference when `$ref` is present
    pub fn from_entries(entries: Entries) -> Self {
        let Some((_, value)) = entries.iter().find(|(key, _)| key == REF_KEY) else {
            return Node::Mapping(entries);
        };

        let target = match value {
            Node::Scalar(Scalar::String(target)) => Some(target.clone()),
            _ => None,
        };

        Node::Reference(Reference {
            target,
            fields: entries,
        })
    }

    /// Evaluate a JSON pointer against this node
    pub fn get(&self, pointer: &JsonPointer) -> Option<&Node> {
        pointer
            .tokens()
            .iter()
            .try_fold(self, |node, token| node.child(token))
    }

    fn child(&self, token: &str) -> Option<&Node> {
        match self {
            Node::Scalar(_) => None,
            Node::Sequence(items) => pointer::parse_index(token).and_then(|i| items.get(i)),
            Node::Mapping(entries) | Node::Reference(Reference { fields: entries, .. }) => entries
                .iter()
                .find(|(key, _)| key == token)
                .map(|(_, value)| value),
        }
    }
}

/// Parse a YAML (or JSON) document; `location` names the document in errors
///
/// Merge keys (`<<: *anchor`) are expanded before the tree is built.
pub fn parse(text: &str, location: &str) -> Result<Node> {
    let mut value: Value =
        serde_yaml::from_str(text).map_err(|e| parse_failed(location, e.to_string()))?;
    value
        .apply_merge()
        .map_err(|e| parse_failed(location, e.to_string()))?;
    Ok(Node::from_yaml(value))
}

fn number_from_yaml(number: &serde_yaml::Number) -> Scalar {
    if let Some(i) = number.as_i64() {
        return Scalar::Number(i.into());
    }
    if let Some(u) = number.as_u64() {
        return Scalar::Number(u.into());
    }

    // NaN and infinities have no JSON form
    number
        .as_f64()
        .and_then(serde_json::Number::from_f64)
        .map_or(Scalar::Null, Scalar::Number)
}

fn key_to_string(key: Value) -> String {
    match key {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Tagged(tagged) => key_to_string(tagged.value),
        other => serde_yaml::to_string(&other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Node::Scalar(scalar) => scalar.serialize(serializer),
            Node::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Node::Mapping(entries) | Node::Reference(Reference { fields: entries, .. }) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Bool(b) => serializer.serialize_bool(*b),
            Scalar::Number(n) => n.serialize(serializer),
            Scalar::String(s) => serializer.serialize_str(s),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lifts_references() {
        let node = parse(
            "schema:\n  $ref: '#/definitions/Pet'\n  description: ignored\n",
            "test",
        )
        .unwrap();

        let schema = node
            .get(&JsonPointer::parse("/schema").unwrap())
            .unwrap();
        match schema {
            Node::Reference(reference) => {
                assert_eq!(reference.target.as_deref(), Some("#/definitions/Pet"));
                assert_eq!(reference.fields.len(), 2);
            }
            other => panic!("Expected reference, got {other:?}"),
        }
    }

    #[test]
    fn test_non_string_ref_has_no_target() {
        let node = parse("$ref: 42\n", "test").unwrap();
        assert!(matches!(node, Node::Reference(Reference { target: None, .. })));
    }

    #[test]
    fn test_parse_accepts_json() {
        let node = parse(r#"{"openapi": "3.0.0", "paths": {}}"#, "test").unwrap();
        assert_eq!(
            node.get(&JsonPointer::parse("/openapi").unwrap()),
            Some(&Node::string("3.0.0"))
        );
    }

    #[test]
    fn test_parse_error_names_location() {
        let err = parse("key: [unclosed", "file:///tmp/broken.yaml").unwrap_err();
        assert!(err.to_string().contains("file:///tmp/broken.yaml"));
    }

    #[test]
    fn test_get_walks_sequences() {
        let node = parse("tags:\n  - name: pets\n  - name: owners\n", "test").unwrap();
        let pointer = JsonPointer::parse("/tags/1/name").unwrap();
        assert_eq!(node.get(&pointer), Some(&Node::string("owners")));
        assert_eq!(node.get(&JsonPointer::parse("/tags/2").unwrap()), None);
        assert_eq!(node.get(&JsonPointer::parse("/tags/01").unwrap()), None);
    }

    #[test]
    fn test_serialize_preserves_key_order() {
        let node = parse("zeta: 1\nalpha: 2\nmid: [true, null, 1.5]\n", "test").unwrap();
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"zeta":1,"alpha":2,"mid":[true,null,1.5]}"#);
    }

    #[test]
    fn test_non_finite_numbers_become_null() {
        let node = parse("value: .nan\n", "test").unwrap();
        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"value":null}"#);
    }

    #[test]
    fn test_merge_keys_are_applied() {
        let node = parse(
            "base: &b\n  type: object\nderived:\n  <<: *b\n  description: x\n",
            "test",
        )
        .unwrap();
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json["derived"],
            serde_json::json!({"type": "object", "description": "x"})
        );
        assert!(json["derived"].get("<<").is_none());
    }

    #[test]
    fn test_merge_keys_do_not_override_explicit_keys() {
        let node = parse(
            "base: &b\n  type: object\nderived:\n  <<: *b\n  type: string\n",
            "test",
        )
        .unwrap();
        let pointer = JsonPointer::parse("/derived/type").unwrap();
        assert_eq!(node.get(&pointer), Some(&Node::string("string")));
        assert_eq!(node.get(&JsonPointer::parse("/derived/<<").unwrap()), None);
    }

    #[test]
    fn test_invalid_merge_value_is_parse_error() {
        let err = parse("derived:\n  <<: 42\n", "file:///tmp/merge.yaml").unwrap_err();
        assert!(err.to_string().contains("file:///tmp/merge.yaml"));
    }

    #[test]
    fn test_non_string_keys_are_stringified() {
        let node = parse("responses:\n  200:\n    description: OK\n", "test").unwrap();
        let pointer = JsonPointer::parse("/responses/200/description").unwrap();
        assert_eq!(node.get(&pointer), Some(&Node::string("OK")));
    }
}
