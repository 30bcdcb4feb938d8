#![forbid(unsafe_code)]

//! Page documents.
//!
//! A [`Document`] is the ordered list of top-level nodes of a page and
//! serializes as a JSON array of components. Loading is the only place
//! the core reports data-shape problems as errors; once a tree is in
//! memory, rendering recovers locally from every anomaly.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Result |
//! |---------|-------|--------|
//! | `DocumentError::Json` | Malformed JSON or missing `id`/`type` | Load fails |
//! | `DocumentError::GridData` | `gridData` key not `"<row>-<col>"` | Load fails |
//! | `DocumentError::DuplicateId` | Same id twice in one tree | [`Document::validate`] only |

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::component::{Component, ComponentId};

/// Errors raised at the document boundary.
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid gridData on component {id:?}: {message}")]
    GridData { id: String, message: String },
    #[error("duplicate component id {0:?}")]
    DuplicateId(String),
}

pub type DocumentResult<T> = Result<T, DocumentError>;

/// Ordered top-level nodes of a page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    pub nodes: Vec<Component>,
}

impl Document {
    #[must_use]
    pub fn new(nodes: Vec<Component>) -> Self {
        Self { nodes }
    }

    /// Parse a document from JSON.
    ///
    /// Accepts either an array of components or a single component.
    pub fn from_json(json: &str) -> DocumentResult<Self> {
        if json.trim_start().starts_with('{') {
            let node: Component = serde_json::from_str(json)?;
            return Ok(Self { nodes: vec![node] });
        }
        Ok(Self {
            nodes: serde_json::from_str(json)?,
        })
    }

    pub fn to_json(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> DocumentResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Every node, depth-first, in document order.
    pub fn walk(&self) -> impl Iterator<Item = &Component> {
        self.nodes.iter().flat_map(Component::walk)
    }

    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Component> {
        self.walk().find(|node| node.id == id)
    }

    /// Direct parent of `id`; `None` for top-level or missing nodes.
    #[must_use]
    pub fn parent_of(&self, id: &str) -> Option<&Component> {
        self.walk()
            .find(|node| node.child_nodes().any(|child| child.id == id))
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Check that ids are unique across the whole tree.
    pub fn validate(&self) -> DocumentResult<()> {
        let mut seen: HashSet<&ComponentId> = HashSet::new();
        for node in self.walk() {
            if !seen.insert(&node.id) {
                return Err(DocumentError::DuplicateId(node.id.to_string()));
            }
        }
        Ok(())
    }
}

impl From<Vec<Component>> for Document {
    fn from(nodes: Vec<Component>) -> Self {
        Self { nodes }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ComponentKind;

    const PAGE: &str = r#"[
        {"id": "hdr", "type": "header", "props": {"title": "Shop"}},
        {"id": "body", "type": "container", "props": {"columns": 2}, "children": [
            {"id": "t1", "type": "text", "content": "<p>left</p>"},
            {"id": "g", "type": "grid", "props": {"layout": "2x3", "gridData": {
                "1-2": {"id": "btn", "type": "button", "props": {"label": "Buy"}}
            }}}
        ]}
    ]"#;

    #[test]
    fn parses_array_documents() {
        let doc = Document::from_json(PAGE).unwrap();
        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(doc.node_count(), 5);
        assert_eq!(doc.find("btn").unwrap().kind, ComponentKind::Button);
    }

    #[test]
    fn parses_single_component() {
        let doc = Document::from_json(r#"{"id": "x", "type": "text"}"#).unwrap();
        assert_eq!(doc.nodes.len(), 1);
    }

    #[test]
    fn reports_json_errors() {
        let err = Document::from_json(r#"[{"type": "text"}]"#).unwrap_err();
        assert!(matches!(err, DocumentError::Json(_)));
        assert!(err.to_string().contains("id"));
    }

    #[test]
    fn parent_lookup_covers_children_and_cells() {
        let doc = Document::from_json(PAGE).unwrap();
        assert_eq!(doc.parent_of("t1").unwrap().id, "body");
        assert_eq!(doc.parent_of("btn").unwrap().id, "g");
        assert!(doc.parent_of("hdr").is_none());
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        let doc = Document::new(vec![
            Component::new("a", ComponentKind::Text),
            Component::new("s", ComponentKind::Section)
                .with_child(Component::new("a", ComponentKind::Text)),
        ]);
        assert!(matches!(doc.validate(), Err(DocumentError::DuplicateId(id)) if id == "a"));
        assert!(Document::from_json(PAGE).unwrap().validate().is_ok());
    }

    #[test]
    fn json_round_trip() {
        let doc = Document::from_json(PAGE).unwrap();
        let again = Document::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(doc, again);
    }
}
