//! Safe access into duck-typed component argument bags.

use glimsel_parser::ast::AttributePath;
use serde_json::Value;

/// Walk a dot-separated attribute path into a nested argument bag.
///
/// Returns `None` when any segment is missing, an intermediate value is not a
/// container, or the final key does not exist. Absence is a miss, never an
/// error.
pub fn resolve_path<'a>(bag: &'a Value, path: &AttributePath) -> Option<&'a Value> {
    let mut current = bag;
    for segment in &path.segments {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

/// Truthiness for bare constraints: `false`, `0`, the empty string and null
/// are falsy; mappings and sequences are always truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Render a scalar for the text-comparison operators. Mappings and sequences
/// have no text form and never match them.
pub fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
