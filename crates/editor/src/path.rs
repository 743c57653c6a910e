//! Dotted-path access into a JSON content document.
//!
//! Paths address object keys only (`"cards.phone.title"`). Policy for the
//! awkward cases: `get` returns `None` for an empty path, an empty segment,
//! or a walk through a non-object value; `set` creates missing intermediates
//! as objects, replaces a non-object intermediate with an object, and leaves
//! the document untouched when the path is empty.

use serde_json::{Map, Value};

/// Read the value at `path`, or `None` if any segment is absent.
pub fn get<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    let mut current = doc;
    for segment in path.split('.') {
        if segment.is_empty() {
            return None;
        }
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// Return a copy of `doc` with `value` placed at `path`, creating
/// intermediate objects as needed. The input document is not mutated.
pub fn set(doc: &Value, path: &str, value: Value) -> Value {
    let mut out = doc.clone();
    set_mut(&mut out, path, value);
    out
}

/// In-place variant of [`set`]. This is the primitive the draft-editing
/// paths use; `set` exists for callers that need the original intact.
pub fn set_mut(doc: &mut Value, path: &str, value: Value) {
    if path.is_empty() {
        return;
    }
    let mut segments = path.split('.').peekable();
    let mut current = doc;
    while let Some(segment) = segments.next() {
        if segment.is_empty() {
            return;
        }
        let map = coerce_object(current);
        if segments.peek().is_none() {
            map.insert(segment.to_string(), value);
            return;
        }
        current = map
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
    }
}

/// View `value` as an object map, replacing a non-object in place first.
pub(crate) fn coerce_object(value: &mut Value) -> &mut Map<String, Value> {
    if !value.is_object() {
        *value = Value::Object(Map::new());
    }
    match value {
        Value::Object(map) => map,
        _ => unreachable!(),
    }
}

/// Remove the value at `path`, if present. Returns the removed value.
pub fn remove(doc: &mut Value, path: &str) -> Option<Value> {
    if path.is_empty() {
        return None;
    }
    let (parent_path, leaf) = match path.rsplit_once('.') {
        Some((parent, leaf)) => (Some(parent), leaf),
        None => (None, path),
    };
    if leaf.is_empty() {
        return None;
    }
    let parent = match parent_path {
        Some(p) => get_mut(doc, p)?,
        None => doc,
    };
    parent.as_object_mut()?.remove(leaf)
}

fn get_mut<'a>(doc: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    let mut current = doc;
    for segment in path.split('.') {
        if segment.is_empty() {
            return None;
        }
        current = current.as_object_mut()?.get_mut(segment)?;
    }
    Some(current)
}
