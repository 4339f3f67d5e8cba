//! Token value trees
//!
//! A theme is an arbitrarily nested mapping from token category (e.g.
//! `colors`, `space`) to scalar values or further mappings. [`TokenValue`]
//! models that shape as a tagged union of scalars, ordered sequences, and
//! mappings, and [`merge`] implements the structural merge the rest of the
//! system is built on: mapping-vs-mapping recurses, every other collision
//! is replaced by the overlay wholesale.
//!
//! Merging never mutates its inputs and has no failure path.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping from token name to value.
pub type TokenMap = IndexMap<String, TokenValue>;

/// A single node in a token tree.
///
/// Deserializes untagged, so plain TOML or JSON documents map directly
/// onto the union without any markup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TokenValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<TokenValue>),
    Mapping(TokenMap),
}

impl TokenValue {
    /// True if this node is a mapping.
    pub fn is_mapping(&self) -> bool {
        matches!(self, TokenValue::Mapping(_))
    }

    /// Borrow the mapping contents, if this node is one.
    pub fn as_mapping(&self) -> Option<&TokenMap> {
        match self {
            TokenValue::Mapping(map) => Some(map),
            _ => None,
        }
    }

    /// Borrow the sequence contents, if this node is one.
    pub fn as_sequence(&self) -> Option<&[TokenValue]> {
        match self {
            TokenValue::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow the string contents, if this node is a string scalar.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TokenValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Numeric value of an integer or float scalar.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            TokenValue::Int(value) => Some(*value as f64),
            TokenValue::Float(value) => Some(*value),
            _ => None,
        }
    }

    /// Boolean value, if this node is a boolean scalar.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            TokenValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Render a scalar as its display string. `None` for sequences and
    /// mappings.
    pub fn to_scalar_string(&self) -> Option<String> {
        match self {
            TokenValue::Bool(value) => Some(value.to_string()),
            TokenValue::Int(value) => Some(value.to_string()),
            TokenValue::Float(value) => Some(value.to_string()),
            TokenValue::String(value) => Some(value.clone()),
            TokenValue::Sequence(_) | TokenValue::Mapping(_) => None,
        }
    }
}

impl From<TokenMap> for TokenValue {
    fn from(map: TokenMap) -> Self {
        TokenValue::Mapping(map)
    }
}

/// Deep structural merge of two token trees.
///
/// When both sides are mappings the merge recurses per key; in every other
/// case (scalars, sequences, mixed-type collisions) the overlay value
/// replaces the base value entirely. Right-most wins on conflict.
pub fn merge(base: &TokenValue, overlay: &TokenValue) -> TokenValue {
    match (base, overlay) {
        (TokenValue::Mapping(base), TokenValue::Mapping(overlay)) => {
            TokenValue::Mapping(merge_maps(base, overlay))
        }
        _ => overlay.clone(),
    }
}

/// Merge two token mappings key by key.
///
/// Keys only present in the base keep their position; overlay-only keys
/// are appended in overlay order.
pub fn merge_maps(base: &TokenMap, overlay: &TokenMap) -> TokenMap {
    let mut merged = base.clone();
    for (key, value) in overlay {
        match merged.get_mut(key) {
            Some(existing) => {
                let replacement = merge(existing, value);
                *existing = replacement;
            }
            None => {
                merged.insert(key.clone(), value.clone());
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(source: &str) -> TokenValue {
        serde_json::from_str(source).unwrap()
    }

    #[test]
    fn nested_mappings_merge_recursively() {
        let base = tree(r#"{"colors": {"text": "black", "canvas": "white"}}"#);
        let overlay = tree(r#"{"colors": {"text": "gray"}}"#);

        let merged = merge(&base, &overlay);
        let colors = merged.as_mapping().unwrap()["colors"].as_mapping().unwrap();
        assert_eq!(colors["text"].as_str(), Some("gray"));
        assert_eq!(colors["canvas"].as_str(), Some("white"));
    }

    #[test]
    fn scalars_are_replaced_not_combined() {
        let base = tree(r#"{"space": 4}"#);
        let overlay = tree(r#"{"space": 8}"#);

        let merged = merge(&base, &overlay);
        assert_eq!(merged.as_mapping().unwrap()["space"].as_f64(), Some(8.0));
    }

    #[test]
    fn sequences_are_replaced_wholesale() {
        let base = tree(r#"{"scale": [0, 4, 8, 16]}"#);
        let overlay = tree(r#"{"scale": [0, 2]}"#);

        let merged = merge(&base, &overlay);
        let scale = merged.as_mapping().unwrap()["scale"].as_sequence().unwrap();
        assert_eq!(scale.len(), 2);
    }

    #[test]
    fn mixed_type_collision_takes_overlay() {
        let base = tree(r#"{"colors": {"text": "black"}}"#);
        let overlay = tree(r#"{"colors": "none"}"#);

        let merged = merge(&base, &overlay);
        assert_eq!(merged.as_mapping().unwrap()["colors"].as_str(), Some("none"));
    }

    #[test]
    fn merge_does_not_mutate_inputs() {
        let base = tree(r#"{"colors": {"text": "black"}}"#);
        let overlay = tree(r#"{"colors": {"text": "white"}}"#);
        let base_before = base.clone();

        let _ = merge(&base, &overlay);
        assert_eq!(base, base_before);
    }

    #[test]
    fn overlay_only_keys_append_in_order() {
        let base = tree(r#"{"a": 1}"#);
        let overlay = tree(r#"{"c": 3, "b": 2}"#);

        let merged = merge(&base, &overlay);
        let keys: Vec<&str> = merged
            .as_mapping()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys, vec!["a", "c", "b"]);
    }

    #[test]
    fn untagged_round_trip_preserves_shape() {
        let original = tree(r#"{"flag": true, "count": 3, "ratio": 1.5, "name": "shade"}"#);
        let encoded = serde_json::to_string(&original).unwrap();
        let decoded: TokenValue = serde_json::from_str(&encoded).unwrap();
        assert_eq!(original, decoded);
    }
}
