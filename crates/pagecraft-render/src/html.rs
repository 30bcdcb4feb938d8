#![forbid(unsafe_code)]

//! HTML serialization of the element tree.
//!
//! Text and attribute values are escaped. [`Node::Raw`] is written
//! verbatim: it carries author-supplied markup (rich text, custom code)
//! and is trusted.

use std::borrow::Cow;

use memchr::{memchr2, memchr3};

use crate::element::{Element, Node};

/// Elements with no closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

#[inline]
fn first_special(bytes: &[u8], attr: bool) -> Option<usize> {
    let markup = memchr3(b'&', b'<', b'>', bytes);
    if !attr {
        return markup;
    }
    match (markup, memchr2(b'"', b'\'', bytes)) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

fn escape(input: &str, attr: bool) -> Cow<'_, str> {
    let Some(start) = first_special(input.as_bytes(), attr) else {
        return Cow::Borrowed(input);
    };
    let mut out = String::with_capacity(input.len() + 16);
    out.push_str(&input[..start]);
    for ch in input[start..].chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            '\'' if attr => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

/// Escape text content.
#[must_use]
pub fn escape_text(input: &str) -> Cow<'_, str> {
    escape(input, false)
}

/// Escape an attribute value (double- or single-quoted).
#[must_use]
pub fn escape_attr(input: &str) -> Cow<'_, str> {
    escape(input, true)
}

/// Write `node` as HTML into `out`.
pub fn write_node(out: &mut String, node: &Node) {
    match node {
        Node::Text(text) => out.push_str(&escape_text(text)),
        Node::Raw(markup) => out.push_str(markup),
        Node::Element(el) => write_element(out, el),
    }
}

fn write_element(out: &mut String, el: &Element) {
    out.push('<');
    out.push_str(el.tag());

    let mut classes = el.class_list().peekable();
    if classes.peek().is_some() {
        out.push_str(" class=\"");
        for (i, class) in classes.enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&escape_attr(class));
        }
        out.push('"');
    }

    for (name, value) in el.attrs() {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape_attr(value));
        out.push('"');
    }

    let style = el.style_declarations();
    if !style.is_empty() {
        out.push_str(" style=\"");
        for (i, (property, value)) in style.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&escape_attr(property));
            out.push_str(": ");
            out.push_str(&escape_attr(value));
            out.push(';');
        }
        out.push('"');
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&el.tag()) {
        return;
    }
    for child in el.child_nodes() {
        write_node(out, child);
    }
    out.push_str("</");
    out.push_str(el.tag());
    out.push('>');
}

/// Serialize a list of top-level nodes.
#[must_use]
pub fn render_nodes(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

impl Node {
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_node(&mut out, self);
        out
    }
}

impl Element {
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        write_element(&mut out, self);
        out
    }
}
