#![forbid(unsafe_code)]

//! Style map → CSS declarations.
//!
//! Style keys are accepted in camelCase (`backgroundColor`), kebab-case, or
//! as custom properties (`--accent`). Numbers get a `px` unit unless the
//! property is unitless; zero stays bare. Values that are not strings or
//! numbers are dropped.

use pagecraft_core::StyleMap;
use serde_json::Value;

/// Properties whose numeric values take no unit.
const UNITLESS: &[&str] = &[
    "aspect-ratio",
    "column-count",
    "fill-opacity",
    "flex",
    "flex-grow",
    "flex-shrink",
    "font-weight",
    "grid-column",
    "grid-row",
    "line-height",
    "opacity",
    "order",
    "orphans",
    "stroke-opacity",
    "tab-size",
    "widows",
    "z-index",
    "zoom",
];

/// Convert a style key to a CSS property name.
#[must_use]
pub fn property_name(key: &str) -> String {
    if key.starts_with("--") || !key.bytes().any(|b| b.is_ascii_uppercase()) {
        return key.to_string();
    }
    let mut out = String::with_capacity(key.len() + 4);
    // Vendor prefixes: WebkitTransform -> -webkit-transform, msFlex -> -ms-flex
    if key.starts_with(|c: char| c.is_ascii_uppercase()) || key.starts_with("ms") {
        out.push('-');
    }
    for (i, ch) in key.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Format a style value for `property`, or `None` if it has no CSS form.
#[must_use]
pub fn property_value(property: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => {
            if n.as_f64() == Some(0.0) || UNITLESS.contains(&property) || property.starts_with("--") {
                Some(n.to_string())
            } else {
                Some(format!("{n}px"))
            }
        }
        _ => None,
    }
}

/// Declarations for a whole style map, in map order.
#[must_use]
pub fn declarations(style: &StyleMap) -> Vec<(String, String)> {
    style
        .iter()
        .filter_map(|(key, value)| {
            let property = property_name(key);
            let value = property_value(&property, value)?;
            Some((property, value))
        })
        .collect()
}
