#![forbid(unsafe_code)]

//! Virtual element tree.
//!
//! Widgets build [`Node`]s; the host (or [`crate::html`]) turns them into
//! real markup. Elements are plain data: interactivity is attached as
//! `data-pc-on-*` attributes naming a [`HandlerId`] registered in the
//! [`crate::frame::Frame`].

use std::borrow::Cow;

use smallvec::SmallVec;

use crate::frame::{EventKind, HandlerId};

/// Attribute carrying the id of the component an element renders.
pub const NODE_ATTR: &str = "data-node";

/// A node in the rendered tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    /// Text, escaped on output.
    Text(String),
    /// Markup injected verbatim.
    Raw(String),
}

impl Node {
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    #[must_use]
    pub fn raw(markup: impl Into<String>) -> Self {
        Self::Raw(markup.into())
    }

    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Concatenated text and raw content below this node.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) | Self::Raw(text) => out.push_str(text),
            Self::Element(el) => {
                for child in &el.children {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

/// An HTML-like element.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    tag: &'static str,
    classes: SmallVec<[Cow<'static, str>; 4]>,
    attrs: SmallVec<[(Cow<'static, str>, String); 4]>,
    style: Vec<(String, String)>,
    children: Vec<Node>,
}

impl Element {
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            classes: SmallVec::new(),
            attrs: SmallVec::new(),
            style: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Shorthand for `Element::new("div")`.
    #[must_use]
    pub fn div() -> Self {
        Self::new("div")
    }

    /// Add a class. Strings containing whitespace add several classes.
    #[must_use]
    pub fn class(mut self, class: impl Into<Cow<'static, str>>) -> Self {
        let class = class.into();
        if class.split_whitespace().count() > 1 {
            for part in class.split_whitespace() {
                self.push_class(Cow::Owned(part.to_string()));
            }
        } else if !class.trim().is_empty() {
            self.push_class(class);
        }
        self
    }

    /// Add a class when `on` is true.
    #[must_use]
    pub fn class_if(self, on: bool, class: &'static str) -> Self {
        if on { self.class(class) } else { self }
    }

    fn push_class(&mut self, class: Cow<'static, str>) {
        if !self.classes.iter().any(|c| *c == class) {
            self.classes.push(class);
        }
    }

    /// Set an attribute, replacing any previous value.
    #[must_use]
    pub fn attr(mut self, name: impl Into<Cow<'static, str>>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn set_attr(&mut self, name: impl Into<Cow<'static, str>>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Tag the element with the component it renders.
    #[must_use]
    pub fn node_id(self, id: impl Into<String>) -> Self {
        self.attr(NODE_ATTR, id)
    }

    /// Set one style declaration, replacing any previous value.
    #[must_use]
    pub fn style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        let property = property.into();
        let value = value.into();
        match self.style.iter_mut().find(|(p, _)| *p == property) {
            Some(slot) => slot.1 = value,
            None => self.style.push((property, value)),
        }
        self
    }

    #[must_use]
    pub fn styles(self, declarations: impl IntoIterator<Item = (String, String)>) -> Self {
        declarations
            .into_iter()
            .fold(self, |el, (property, value)| el.style(property, value))
    }

    /// Attach a registered handler for `event`.
    #[must_use]
    pub fn on(self, event: EventKind, handler: HandlerId) -> Self {
        self.attr(event.attribute(), handler.to_string())
    }

    #[must_use]
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    #[must_use]
    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    #[must_use]
    pub fn raw(self, markup: impl Into<String>) -> Self {
        self.child(Node::Raw(markup.into()))
    }

    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Remove and return every child, leaving the element itself intact.
    pub fn take_children(&mut self) -> Vec<Node> {
        std::mem::take(&mut self.children)
    }

    // ── Accessors ───────────────────────────────────────────────────────

    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn class_list(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(|c| c.as_ref())
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    #[must_use]
    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(n, v)| (n.as_ref(), v.as_str()))
    }

    #[must_use]
    pub fn get_style(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn style_declarations(&self) -> &[(String, String)] {
        &self.style
    }

    #[must_use]
    pub fn child_nodes(&self) -> &[Node] {
        &self.children
    }

    /// Component id from [`NODE_ATTR`].
    #[must_use]
    pub fn rendered_node(&self) -> Option<&str> {
        self.get_attr(NODE_ATTR)
    }

    /// Handler attached for `event`, if any.
    #[must_use]
    pub fn handler(&self, event: EventKind) -> Option<HandlerId> {
        self.get_attr(event.attribute())?.parse().ok()
    }

    /// This element and every descendant element, pre-order.
    #[must_use]
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(el) = stack.pop() {
            out.push(el);
            stack.extend(
                el.children
                    .iter()
                    .rev()
                    .filter_map(Node::as_element),
            );
        }
        out
    }

    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.descendants()
            .into_iter()
            .filter(|el| el.has_class(class))
            .collect()
    }

    /// First element rendering component `id`.
    #[must_use]
    pub fn find_node(&self, id: &str) -> Option<&Element> {
        self.descendants()
            .into_iter()
            .find(|el| el.rendered_node() == Some(id))
    }

    #[must_use]
    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}
