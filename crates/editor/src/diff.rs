//! Change detection against the defaults snapshot.
//!
//! Both checks are pure and O(depth). "Changed" always means the draft holds
//! a defined value that differs from the default; a field with no defaults
//! entry is new, not changed.

use serde_json::Value;

use crate::path;
use crate::styles;

/// True iff the defaults carry a style bag for `field`, the draft defines
/// `property` for it, and the two values differ.
pub fn is_style_property_changed(
    draft: &Value,
    defaults: &Value,
    field: &str,
    property: &str,
) -> bool {
    if styles::field_styles(defaults, field).is_none() {
        return false;
    }
    match styles::style_property(draft, field, property) {
        Some(current) => match styles::style_property(defaults, field, property) {
            Some(default) => current != default,
            // Defined in the draft, absent from the default bag.
            None => true,
        },
        None => false,
    }
}

/// True iff the draft defines a value at `path` that differs from the
/// defaults value at the same path.
pub fn is_nested_content_changed(draft: &Value, defaults: &Value, path: &str) -> bool {
    match path::get(draft, path) {
        Some(current) => Some(current) != path::get(defaults, path),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn style_change_detected() {
        let defaults = json!({"styles": {"badge": {"color": "#111"}}});
        let draft = json!({"styles": {"badge": {"color": "#fff"}}});
        assert!(is_style_property_changed(&draft, &defaults, "badge", "color"));
    }

    #[test]
    fn style_equal_is_unchanged() {
        let defaults = json!({"styles": {"badge": {"color": "#111"}}});
        let draft = defaults.clone();
        assert!(!is_style_property_changed(&draft, &defaults, "badge", "color"));
    }

    #[test]
    fn style_without_defaults_entry_is_never_changed() {
        // No defaults bag for the field: nothing to compare against.
        let defaults = json!({"styles": {}});
        let draft = json!({"styles": {"badge": {"color": "#fff"}}});
        assert!(!is_style_property_changed(&draft, &defaults, "badge", "color"));
    }

    #[test]
    fn style_property_missing_in_draft_is_unchanged() {
        let defaults = json!({"styles": {"badge": {"color": "#111"}}});
        let draft = json!({"styles": {"badge": {}}});
        assert!(!is_style_property_changed(&draft, &defaults, "badge", "color"));
    }

    #[test]
    fn style_property_set_where_default_bag_lacks_it() {
        let defaults = json!({"styles": {"badge": {}}});
        let draft = json!({"styles": {"badge": {"color": "#fff"}}});
        assert!(is_style_property_changed(&draft, &defaults, "badge", "color"));
    }

    #[test]
    fn nested_change_detected() {
        let defaults = json!({"cards": {"phone": {"title": "Call Us"}}});
        let draft = json!({"cards": {"phone": {"title": "Phone"}}});
        assert!(is_nested_content_changed(&draft, &defaults, "cards.phone.title"));
    }

    #[test]
    fn nested_equal_is_unchanged() {
        let defaults = json!({"cards": {"phone": {"title": "Call Us"}}});
        assert!(!is_nested_content_changed(&defaults.clone(), &defaults, "cards.phone.title"));
    }

    #[test]
    fn nested_undefined_in_draft_is_unchanged() {
        let defaults = json!({"cards": {"phone": {"title": "Call Us"}}});
        let draft = json!({"cards": {}});
        assert!(!is_nested_content_changed(&draft, &defaults, "cards.phone.title"));
    }

    #[test]
    fn nested_value_absent_from_defaults_is_changed() {
        let defaults = json!({});
        let draft = json!({"cards": {"phone": {"title": "Phone"}}});
        assert!(is_nested_content_changed(&draft, &defaults, "cards.phone.title"));
    }
}
