//! Property tests for HTML escaping.
//!
//! 1. Escaped text contains no markup characters.
//! 2. Escaped attributes contain no quotes.
//! 3. Unescaping restores the input.

use pagecraft_render::html::{escape_attr, escape_text};
use pagecraft_render::{Element, Node};
use proptest::prelude::*;

fn unescape(s: &str) -> String {
    s.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

proptest! {
    #[test]
    fn escaped_text_has_no_markup(input in ".{0,64}") {
        let escaped = escape_text(&input);
        prop_assert!(!escaped.contains('<'));
        prop_assert!(!escaped.contains('>'));
        prop_assert_eq!(unescape(&escaped), input);
    }

    #[test]
    fn escaped_attrs_have_no_quotes(input in ".{0,64}") {
        let escaped = escape_attr(&input);
        prop_assert!(!escaped.contains('"'));
        prop_assert!(!escaped.contains('\''));
        prop_assert_eq!(unescape(&escaped), input);
    }

    #[test]
    fn text_children_cannot_open_tags(input in "[<>a-z/ ]{0,32}") {
        let html = Element::new("p").child(Node::text(input)).to_html();
        prop_assert_eq!(html.matches('<').count(), 2);
    }
}
