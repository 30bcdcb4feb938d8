#![forbid(unsafe_code)]

//! Outline format for rendered frames.
//!
//! One line per node, indented two spaces per level:
//!
//! ```text
//! div.pc-grid [data-node="g" data-layout="2x3"] {display: grid}
//!   div.pc-cell [data-cell="0-0"] {grid-row: 1; grid-column: 1 / span 1}
//!     "plain text"
//!     raw "<b>markup</b>"
//! ```
//!
//! Elements show their tag, classes, attributes in insertion order, then
//! style declarations. Text is shown unescaped.

use std::fmt::Write as FmtWrite;

use pagecraft_render::{Element, Frame, Node};

/// Outline of every top-level node of a frame.
#[must_use]
pub fn frame_to_outline(frame: &Frame) -> String {
    let mut out = String::new();
    for node in &frame.nodes {
        write_node(&mut out, node, 0);
    }
    out
}

/// Outline of a single node and its subtree.
#[must_use]
pub fn node_to_outline(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0);
    out
}

fn write_node(out: &mut String, node: &Node, depth: usize) {
    let indent = "  ".repeat(depth);
    match node {
        Node::Text(text) => {
            let _ = writeln!(out, "{indent}\"{text}\"");
        }
        Node::Raw(markup) => {
            let _ = writeln!(out, "{indent}raw \"{markup}\"");
        }
        Node::Element(el) => {
            out.push_str(&indent);
            write_element_line(out, el);
            out.push('\n');
            for child in el.child_nodes() {
                write_node(out, child, depth + 1);
            }
        }
    }
}

fn write_element_line(out: &mut String, el: &Element) {
    out.push_str(el.tag());
    for class in el.class_list() {
        out.push('.');
        out.push_str(class);
    }

    let attrs: Vec<String> = el
        .attrs()
        .map(|(name, value)| format!("{name}=\"{value}\""))
        .collect();
    if !attrs.is_empty() {
        let _ = write!(out, " [{}]", attrs.join(" "));
    }

    let style: Vec<String> = el
        .style_declarations()
        .iter()
        .map(|(property, value)| format!("{property}: {value}"))
        .collect();
    if !style.is_empty() {
        let _ = write!(out, " {{{}}}", style.join("; "));
    }
}
