//! Per-field style overrides.
//!
//! A content document may carry a parallel `styles` map:
//! `styles[fieldName] -> { fontFamily, fontSize, color, ... }`. The store is
//! deliberately untyped; font, color and size domains are all just strings
//! (or whatever the UI sends).

use serde_json::{Map, Value};

/// Key of the style map inside a content document.
pub const STYLES_KEY: &str = "styles";

/// Merge one property into `styles[field]`, creating the `styles` map and
/// the per-field bag if missing. No property outside `(field, property)` is
/// altered.
pub fn update_style_field(draft: &mut Value, field: &str, property: &str, value: Value) {
    let root = crate::path::coerce_object(draft);
    let styles = root
        .entry(STYLES_KEY.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    let bag = crate::path::coerce_object(styles)
        .entry(field.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    crate::path::coerce_object(bag).insert(property.to_string(), value);
}

/// The style bag for `field`, if one exists.
pub fn field_styles<'a>(doc: &'a Value, field: &str) -> Option<&'a Value> {
    doc.get(STYLES_KEY)?.get(field)
}

/// One style property of `field`, if set.
pub fn style_property<'a>(doc: &'a Value, field: &str, property: &str) -> Option<&'a Value> {
    field_styles(doc, field)?.get(property)
}
