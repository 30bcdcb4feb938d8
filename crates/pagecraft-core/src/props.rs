#![forbid(unsafe_code)]

//! Typed views over the container props the core interprets.
//!
//! Leaf props stay opaque JSON. Only `container` (`columns`, `gap`) and
//! `grid` (`layout`, `gap`) are read here.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::component::Component;

/// Upper bound on declared flex columns.
pub const MAX_FLEX_COLUMNS: usize = 12;

/// Reference to a catalogued grid template.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutId(String);

impl LayoutId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayoutId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// CSS `gap` of a container. Bare numbers are read as pixels; blank strings
/// count as unset.
fn gap_of(node: &Component) -> Option<String> {
    match node.props.get("gap") {
        Some(Value::String(gap)) if !gap.trim().is_empty() => Some(gap.clone()),
        Some(Value::Number(n)) => Some(format!("{n}px")),
        _ => None,
    }
}

/// Props of a `container` node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerProps {
    /// Declared column count, `1..=MAX_FLEX_COLUMNS`.
    pub columns: usize,
    pub gap: Option<String>,
}

impl ContainerProps {
    /// Read `props.columns`, defaulting to one column per child slot.
    #[must_use]
    pub fn of(node: &Component) -> Self {
        let declared = node
            .prop_u64("columns")
            .map(|n| usize::try_from(n).unwrap_or(MAX_FLEX_COLUMNS))
            .unwrap_or(node.children.len());
        Self {
            columns: declared.clamp(1, MAX_FLEX_COLUMNS),
            gap: gap_of(node),
        }
    }
}

/// Props of a `grid` node (cells live in [`Component::grid_data`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridProps {
    /// Requested template; `None` means the catalogue default.
    pub layout: Option<LayoutId>,
    /// CSS gap, passed through. Bare numbers are read as pixels.
    pub gap: Option<String>,
}

impl GridProps {
    #[must_use]
    pub fn of(node: &Component) -> Self {
        Self {
            layout: node.prop_str("layout").map(LayoutId::from),
            gap: gap_of(node),
        }
    }
}
