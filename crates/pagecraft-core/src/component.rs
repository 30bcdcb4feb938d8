#![forbid(unsafe_code)]

//! The component tree.
//!
//! A [`Component`] is one node of a page. Ownership is strictly
//! hierarchical: a node owns its `children` (simple and flex containers) or
//! its `grid_data` (grid containers) and nothing else refers back to it.
//! The render core only ever borrows a tree; every mutation happens in the
//! owning application.
//!
//! # Wire format
//!
//! ```json
//! {"id": "hero", "type": "grid", "style": {"padding": "16px"},
//!  "className": "hero", "props": {"layout": "2x3", "gridData": {"0-0": {...}}},
//!  "content": "<b>hi</b>", "children": []}
//! ```
//!
//! `props.gridData` is lifted into [`Component::grid_data`] on load and
//! written back into `props` on save. An explicit `"gridData": null` stays
//! in `props` untouched.
//!
//! `children` is a list of slots. A `null` entry is an empty slot; flex
//! containers render it as an empty column and it is saved back as `null`.

use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::cell::{CellKey, GridData};
use crate::document::DocumentError;
use crate::kind::ComponentKind;

/// Key under which grid cells are stored in serialized props.
pub const GRID_DATA_PROP: &str = "gridData";

/// Opaque, stable node identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentId(String);

impl ComponentId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ComponentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ComponentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Borrow<str> for ComponentId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ComponentId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ComponentId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Ordered presentation properties (`backgroundColor` → `"#fff"`).
pub type StyleMap = IndexMap<String, Value>;

/// Variant-specific configuration.
pub type Props = Map<String, Value>;

/// A node in the page tree.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawComponent")]
pub struct Component {
    pub id: ComponentId,
    pub kind: ComponentKind,
    pub style: StyleMap,
    pub class_name: Option<String>,
    pub props: Props,
    pub content: Option<String>,
    /// Child slots in order; `None` is an empty slot.
    pub children: Vec<Option<Component>>,
    /// Occupied grid cells; `None` when the document carried no `gridData`.
    pub grid_data: Option<GridData>,
}

impl Component {
    /// Create a bare node.
    #[must_use]
    pub fn new(id: impl Into<ComponentId>, kind: ComponentKind) -> Self {
        Self {
            id: id.into(),
            kind,
            style: StyleMap::new(),
            class_name: None,
            props: Props::new(),
            content: None,
            children: Vec::new(),
            grid_data: None,
        }
    }

    #[must_use]
    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<Value>) -> Self {
        self.style.insert(property.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_class(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    #[must_use]
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: Component) -> Self {
        self.children.push(Some(child));
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Component>) -> Self {
        self.children.extend(children.into_iter().map(Some));
        self
    }

    /// Append an empty child slot.
    #[must_use]
    pub fn with_empty_slot(mut self) -> Self {
        self.children.push(None);
        self
    }

    /// Populated children in slot order, skipping empty slots.
    pub fn filled_children(&self) -> impl Iterator<Item = &Component> {
        self.children.iter().flatten()
    }

    /// Child in slot `index`, if the slot exists and is populated.
    #[must_use]
    pub fn child_at(&self, index: usize) -> Option<&Component> {
        self.children.get(index).and_then(Option::as_ref)
    }

    /// Place `child` at grid cell `(row, col)`.
    #[must_use]
    pub fn with_cell(mut self, row: usize, col: usize, child: Component) -> Self {
        if self.props.get(GRID_DATA_PROP).is_some_and(Value::is_null) {
            self.props.shift_remove(GRID_DATA_PROP);
        }
        self.grid_data
            .get_or_insert_with(GridData::new)
            .insert(CellKey::new(row, col), child);
        self
    }

    /// Grid cells, or an empty view for nodes without `gridData`.
    #[must_use]
    pub fn cells(&self) -> impl Iterator<Item = (CellKey, &Component)> {
        self.grid_data.iter().flat_map(GridData::iter)
    }

    /// Grid cell occupant at `key`.
    #[must_use]
    pub fn cell(&self, key: CellKey) -> Option<&Component> {
        self.grid_data.as_ref().and_then(|data| data.get(key))
    }

    /// Direct descendants: populated `children` in order, then grid cells
    /// row-major.
    pub fn child_nodes(&self) -> impl Iterator<Item = &Component> {
        self.filled_children()
            .chain(self.grid_data.iter().flat_map(GridData::values))
    }

    /// Pre-order depth-first traversal starting at this node.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Number of nodes in this subtree, including `self`.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Find a node by id in this subtree.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&Component> {
        self.walk().find(|node| node.id == id)
    }

    /// String prop accessor.
    #[must_use]
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        self.props.get(key).and_then(Value::as_str)
    }

    /// Unsigned integer prop accessor; numeric strings are accepted.
    #[must_use]
    pub fn prop_u64(&self, key: &str) -> Option<u64> {
        match self.props.get(key)? {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Boolean prop accessor.
    #[must_use]
    pub fn prop_bool(&self, key: &str) -> Option<bool> {
        self.props.get(key).and_then(Value::as_bool)
    }

    /// Array prop accessor; missing or non-array props yield an empty slice.
    #[must_use]
    pub fn prop_array(&self, key: &str) -> &[Value] {
        self.props
            .get(key)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

/// Depth-first iterator returned by [`Component::walk`].
#[derive(Debug)]
pub struct Walk<'a> {
    stack: Vec<&'a Component>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Component;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let before = self.stack.len();
        self.stack.extend(node.child_nodes());
        self.stack[before..].reverse();
        Some(node)
    }
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawComponent {
    id: ComponentId,
    #[serde(rename = "type")]
    kind: ComponentKind,
    #[serde(default)]
    style: StyleMap,
    #[serde(default)]
    class_name: Option<String>,
    #[serde(default)]
    props: Props,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    children: Vec<Option<Component>>,
}

impl TryFrom<RawComponent> for Component {
    type Error = DocumentError;

    fn try_from(raw: RawComponent) -> Result<Self, Self::Error> {
        let mut props = raw.props;
        let grid_data = match props.get(GRID_DATA_PROP) {
            None | Some(Value::Null) => None,
            Some(_) => props.shift_remove(GRID_DATA_PROP),
        };
        let grid_data = grid_data
            .map(serde_json::from_value::<GridData>)
            .transpose()
            .map_err(|source| DocumentError::GridData {
                id: raw.id.to_string(),
                message: source.to_string(),
            })?;

        Ok(Self {
            id: raw.id,
            kind: raw.kind,
            style: raw.style,
            class_name: raw.class_name,
            props,
            content: raw.content,
            children: raw.children,
            grid_data,
        })
    }
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("type", &self.kind)?;
        if !self.style.is_empty() {
            map.serialize_entry("style", &self.style)?;
        }
        if let Some(class_name) = &self.class_name {
            map.serialize_entry("className", class_name)?;
        }
        if !self.props.is_empty() || self.grid_data.is_some() {
            map.serialize_entry(
                "props",
                &PropsWithGrid {
                    props: &self.props,
                    grid_data: self.grid_data.as_ref(),
                },
            )?;
        }
        if let Some(content) = &self.content {
            map.serialize_entry("content", content)?;
        }
        if !self.children.is_empty() {
            map.serialize_entry("children", &self.children)?;
        }
        map.end()
    }
}

/// Props re-joined with the lifted grid cells.
struct PropsWithGrid<'a> {
    props: &'a Props,
    grid_data: Option<&'a GridData>,
}

impl Serialize for PropsWithGrid<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for (key, value) in self.props {
            // A stored null is kept unless live cells replace it.
            if key != GRID_DATA_PROP || self.grid_data.is_none() {
                map.serialize_entry(key, value)?;
            }
        }
        if let Some(grid_data) = self.grid_data {
            map.serialize_entry(GRID_DATA_PROP, grid_data)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> Component {
        Component::new("root", ComponentKind::Section)
            .with_child(Component::new("a", ComponentKind::Heading).with_content("Hi"))
            .with_child(
                Component::new("g", ComponentKind::Grid)
                    .with_prop("layout", "2x2")
                    .with_cell(1, 0, Component::new("c10", ComponentKind::Text))
                    .with_cell(0, 1, Component::new("c01", ComponentKind::Text)),
            )
            .with_child(Component::new("b", ComponentKind::Button))
    }

    #[test]
    fn walk_is_preorder_children_then_cells() {
        let root = sample();
        let ids: Vec<_> = root.walk().map(|node| node.id.as_str()).collect();
        assert_eq!(ids, vec!["root", "a", "g", "c01", "c10", "b"]);
        assert_eq!(root.node_count(), 6);
    }

    #[test]
    fn find_reaches_grid_cells() {
        let root = sample();
        assert_eq!(root.find("c10").map(|n| n.kind.clone()), Some(ComponentKind::Text));
        assert!(root.find("missing").is_none());
    }

    #[test]
    fn grid_data_is_lifted_out_of_props() {
        let node: Component = serde_json::from_value(json!({
            "id": "g",
            "type": "grid",
            "props": {"layout": "2x3", "gap": "8px", "gridData": {
                "0-0": {"id": "x", "type": "text", "content": "cell"}
            }}
        }))
        .unwrap();

        assert_eq!(node.props.len(), 2);
        assert!(!node.props.contains_key(GRID_DATA_PROP));
        assert_eq!(node.cell(CellKey::new(0, 0)).unwrap().id, "x");
    }

    #[test]
    fn serializes_grid_data_back_into_props() {
        let node = Component::new("g", ComponentKind::Grid)
            .with_prop("layout", "1x2")
            .with_cell(0, 1, Component::new("x", ComponentKind::Text));
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "g",
                "type": "grid",
                "props": {"layout": "1x2", "gridData": {"0-1": {"id": "x", "type": "text"}}}
            })
        );
    }

    #[test]
    fn optional_fields_are_omitted() {
        let value = serde_json::to_value(Component::new("t", ComponentKind::Text)).unwrap();
        assert_eq!(value, json!({"id": "t", "type": "text"}));
    }

    #[test]
    fn style_order_is_preserved() {
        let json = r#"{"id":"s","type":"text","style":{"zIndex":1,"color":"red","margin":"0"}}"#;
        let node: Component = serde_json::from_str(json).unwrap();
        let keys: Vec<_> = node.style.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zIndex", "color", "margin"]);
        assert_eq!(serde_json::to_string(&node).unwrap(), json);
    }

    #[test]
    fn explicit_null_grid_data_survives_round_trip() {
        let json = r#"{"id":"g","type":"grid","props":{"gridData":null,"layout":"2x2"}}"#;
        let node: Component = serde_json::from_str(json).unwrap();
        assert!(node.grid_data.is_none());
        assert_eq!(serde_json::to_string(&node).unwrap(), json);

        let filled = node.with_cell(0, 0, Component::new("x", ComponentKind::Text));
        assert_eq!(
            serde_json::to_value(&filled).unwrap(),
            json!({"id": "g", "type": "grid", "props": {"layout": "2x2", "gridData": {"0-0": {"id": "x", "type": "text"}}}})
        );
    }

    #[test]
    fn null_child_slots_are_kept() {
        let json = r#"{"id":"c","type":"container","props":{"columns":3},"children":[null,{"id":"t","type":"text","content":"x"},null]}"#;
        let node: Component = serde_json::from_str(json).unwrap();
        assert_eq!(node.children.len(), 3);
        assert!(node.child_at(0).is_none());
        assert_eq!(node.child_at(1).map(|c| c.id.as_str()), Some("t"));
        assert!(node.child_at(2).is_none());
        let ids: Vec<_> = node.walk().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "t"]);
        assert_eq!(serde_json::to_string(&node).unwrap(), json);
    }

    #[test]
    fn malformed_cell_key_is_rejected() {
        let result: Result<Component, _> = serde_json::from_value(json!({
            "id": "g", "type": "grid", "props": {"gridData": {"zero": {"id": "x", "type": "text"}}}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn prop_accessors() {
        let node = Component::new("c", ComponentKind::Container)
            .with_prop("columns", "3")
            .with_prop("autoplay", true)
            .with_prop("items", json!([1, 2]));
        assert_eq!(node.prop_u64("columns"), Some(3));
        assert_eq!(node.prop_bool("autoplay"), Some(true));
        assert_eq!(node.prop_array("items").len(), 2);
        assert!(node.prop_array("missing").is_empty());
        assert_eq!(node.prop_str("columns"), Some("3"));
    }
}
