//! Dotted-path access into token trees

use crate::value::{TokenMap, TokenValue};
use indexmap::IndexMap;

/// Look up a dotted path (e.g. `colors.text`) in a token mapping.
///
/// Returns `None` on any miss, including traversal through a non-mapping
/// node.
pub fn lookup<'a>(map: &'a TokenMap, path: &str) -> Option<&'a TokenValue> {
    let mut segments = path.split('.');
    let mut current = map.get(segments.next()?)?;
    for segment in segments {
        current = current.as_mapping()?.get(segment)?;
    }
    Some(current)
}

/// Flatten every scalar leaf into `dotted-path -> display string` pairs.
///
/// Sequences and empty mappings produce no entries.
pub fn flatten(map: &TokenMap) -> IndexMap<String, String> {
    let mut flattened = IndexMap::new();
    for (key, value) in map {
        flatten_value(key, value, &mut flattened);
    }
    flattened
}

/// Flatten one subtree under `prefix` into `out`.
pub fn flatten_value(prefix: &str, value: &TokenValue, out: &mut IndexMap<String, String>) {
    match value {
        TokenValue::Mapping(nested) => {
            for (key, value) in nested {
                flatten_value(&format!("{prefix}.{key}"), value, out);
            }
        }
        other => {
            if let Some(rendered) = other.to_scalar_string() {
                out.insert(prefix.to_string(), rendered);
            }
        }
    }
}
