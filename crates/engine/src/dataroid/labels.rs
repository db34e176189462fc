//! Display labels for Dataroid event attributes.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use tapwire_util::title_case_camel;

static ATTRIBUTE_LABELS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("pageTitle", "Page Title"),
        ("pageType", "Page Type"),
        ("referrer", "Referrer"),
        ("userAgent", "User Agent"),
        ("viewport", "Viewport"),
        ("screenResolution", "Screen Resolution"),
        ("language", "Language"),
        ("timezone", "Timezone"),
        ("timestamp", "Timestamp"),
        ("userId", "User ID"),
        ("sessionDuration", "Session Duration"),
        ("pageLoadTime", "Page Load Time"),
        ("scrollDepth", "Scroll Depth"),
        ("clickCount", "Click Count"),
        ("formField", "Form Field"),
        ("buttonText", "Button Text"),
        ("linkText", "Link Text"),
        ("elementId", "Element ID"),
        ("elementClass", "Element Class"),
        ("customData", "Custom Data"),
        ("metadata", "Metadata"),
    ])
});

/// Human-friendly label for an attribute key.
///
/// Well-known keys use a fixed label (exact, case-sensitive match); anything
/// else is derived by splitting the camelCase key.
pub fn friendly_name(key: &str) -> String {
    match ATTRIBUTE_LABELS.get(key) {
        Some(label) => (*label).to_string(),
        None => title_case_camel(key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys_use_fixed_labels() {
        assert_eq!(friendly_name("pageTitle"), "Page Title");
        assert_eq!(friendly_name("userAgent"), "User Agent");
        assert_eq!(friendly_name("screenResolution"), "Screen Resolution");
        assert_eq!(friendly_name("customData"), "Custom Data");
    }

    #[test]
    fn fixed_labels_differ_from_derivation() {
        // derivation would give "User Id" / "Element Id"
        assert_eq!(friendly_name("userId"), "User ID");
        assert_eq!(friendly_name("elementId"), "Element ID");
    }

    #[test]
    fn unknown_keys_are_derived() {
        assert_eq!(friendly_name("unknownField"), "Unknown Field");
        assert_eq!(friendly_name("a"), "A");
        assert_eq!(friendly_name("PageTitle"), "Page Title");
        assert_eq!(friendly_name("productSKU"), "Product S K U");
    }
}
