//! Selective reset against the defaults snapshot.
//!
//! Every operation here is idempotent and all-or-nothing: it either fully
//! replaces its target with the default value or leaves the draft untouched.
//! A missing defaults document (or a missing sub-path inside it) is a silent
//! no-op, never an error.

use serde_json::Value;

use crate::path;
use crate::styles::STYLES_KEY;

/// Restore `draft[field]` and `draft.styles[field]` from the defaults.
///
/// When the defaults document exists but carries no value for the field, the
/// field (and its style bag) is removed from the draft.
pub fn reset_field(draft: &mut Value, defaults: Option<&Value>, field: &str) {
    let Some(defaults) = defaults else { return };
    match defaults.get(field) {
        Some(value) => path::set_mut(draft, field, value.clone()),
        None => {
            path::remove(draft, field);
        }
    }
    let style_path = format!("{STYLES_KEY}.{field}");
    match path::get(defaults, &style_path) {
        Some(bag) => {
            let bag = bag.clone();
            path::set_mut(draft, &style_path, bag);
        }
        None => {
            path::remove(draft, &style_path);
        }
    }
}

/// Restore exactly `draft.styles[field][property]`; no-op when the default
/// for that property is undefined.
pub fn reset_style_property(draft: &mut Value, defaults: Option<&Value>, field: &str, property: &str) {
    let Some(defaults) = defaults else { return };
    let prop_path = format!("{STYLES_KEY}.{field}.{property}");
    if let Some(value) = path::get(defaults, &prop_path) {
        let value = value.clone();
        path::set_mut(draft, &prop_path, value);
    }
}

/// Restore the value at `path` from the defaults; no-op when the default
/// path resolves to nothing.
pub fn reset_nested(draft: &mut Value, defaults: Option<&Value>, path: &str) {
    let Some(defaults) = defaults else { return };
    if let Some(value) = path::get(defaults, path) {
        let value = value.clone();
        path::set_mut(draft, path, value);
    }
}

/// A deep clone of the entire defaults document, replacing the draft
/// wholesale. `None` when there are no defaults to reset to; callers keep
/// their draft in that case.
pub fn reset_all(defaults: Option<&Value>) -> Option<Value> {
    let defaults = defaults?;
    tracing::debug!("resetting entire draft to defaults");
    Some(defaults.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reset_field_restores_value_and_styles() {
        let defaults = json!({"badge": "Spa", "styles": {"badge": {"color": "#111"}}});
        let mut draft = json!({"badge": "Spa Deluxe", "styles": {"badge": {"color": "#fff"}}});
        reset_field(&mut draft, Some(&defaults), "badge");
        assert_eq!(draft, defaults);
    }

    #[test]
    fn reset_field_is_idempotent() {
        let defaults = json!({"badge": "Spa", "styles": {"badge": {"color": "#111"}}});
        let mut draft = json!({"badge": "Spa Deluxe"});
        reset_field(&mut draft, Some(&defaults), "badge");
        let once = draft.clone();
        reset_field(&mut draft, Some(&defaults), "badge");
        assert_eq!(draft, once);
    }

    #[test]
    fn reset_field_without_defaults_is_noop() {
        let mut draft = json!({"badge": "Spa Deluxe"});
        reset_field(&mut draft, None, "badge");
        assert_eq!(draft, json!({"badge": "Spa Deluxe"}));
    }

    #[test]
    fn reset_field_unknown_to_defaults_removes_it() {
        let defaults = json!({"title": "Welcome"});
        let mut draft = json!({"badge": "New", "styles": {"badge": {"color": "#fff"}}});
        reset_field(&mut draft, Some(&defaults), "badge");
        assert_eq!(draft, json!({"styles": {}}));
    }

    #[test]
    fn reset_style_property_touches_only_that_property() {
        let defaults = json!({"styles": {"badge": {"color": "#111", "fontSize": "14px"}}});
        let mut draft = json!({"styles": {"badge": {"color": "#fff", "fontSize": "18px"}}});
        reset_style_property(&mut draft, Some(&defaults), "badge", "color");
        assert_eq!(
            draft,
            json!({"styles": {"badge": {"color": "#111", "fontSize": "18px"}}})
        );
    }

    #[test]
    fn reset_style_property_undefined_default_is_noop() {
        let defaults = json!({"styles": {"badge": {}}});
        let mut draft = json!({"styles": {"badge": {"color": "#fff"}}});
        reset_style_property(&mut draft, Some(&defaults), "badge", "color");
        assert_eq!(draft, json!({"styles": {"badge": {"color": "#fff"}}}));
    }

    #[test]
    fn reset_nested_restores_leaving_siblings() {
        let defaults = json!({"cards": {"phone": {"title": "Call Us", "description": "24/7"}}});
        let mut draft = json!({"cards": {"phone": {"title": "Phone", "description": "9-5"}}});
        reset_nested(&mut draft, Some(&defaults), "cards.phone.title");
        assert_eq!(
            draft,
            json!({"cards": {"phone": {"title": "Call Us", "description": "9-5"}}})
        );
    }

    #[test]
    fn reset_nested_unresolvable_default_is_noop() {
        let defaults = json!({"cards": {}});
        let mut draft = json!({"cards": {"phone": {"title": "Phone"}}});
        reset_nested(&mut draft, Some(&defaults), "cards.phone.title");
        assert_eq!(draft, json!({"cards": {"phone": {"title": "Phone"}}}));
    }

    #[test]
    fn reset_all_clones_defaults() {
        let defaults = json!({"badge": "Spa", "styles": {"badge": {"color": "#111"}}});
        assert_eq!(reset_all(Some(&defaults)), Some(defaults));
        assert_eq!(reset_all(None), None);
    }
}
