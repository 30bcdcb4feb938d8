#![forbid(unsafe_code)]

//! Render mode and externally owned interaction state.

use crate::component::ComponentId;

/// Authoring vs. published rendering of the same tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderMode {
    /// Interactive authoring with selection, hover, and add affordances.
    Editor,
    /// Inert published output.
    #[default]
    Runtime,
}

impl RenderMode {
    #[inline]
    #[must_use]
    pub const fn from_editor_flag(is_editor: bool) -> Self {
        if is_editor { Self::Editor } else { Self::Runtime }
    }

    #[inline]
    #[must_use]
    pub const fn is_editor(self) -> bool {
        matches!(self, Self::Editor)
    }
}

/// Selection and hover, owned by the host and read once per render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    pub selected: Option<ComponentId>,
    pub hovered: Option<ComponentId>,
}

impl SelectionState {
    /// Nothing selected or hovered.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected(id: impl Into<ComponentId>) -> Self {
        Self {
            selected: Some(id.into()),
            hovered: None,
        }
    }

    #[must_use]
    pub fn with_hovered(mut self, id: impl Into<ComponentId>) -> Self {
        self.hovered = Some(id.into());
        self
    }

    #[must_use]
    pub fn is_selected(&self, id: &ComponentId) -> bool {
        self.selected.as_ref() == Some(id)
    }

    #[must_use]
    pub fn is_hovered(&self, id: &ComponentId) -> bool {
        self.hovered.as_ref() == Some(id)
    }

    /// Visual state of a node. Selection wins over hover.
    #[must_use]
    pub fn visual_state(&self, id: &ComponentId) -> NodeVisualState {
        if self.is_selected(id) {
            NodeVisualState::Selected
        } else if self.is_hovered(id) {
            NodeVisualState::Hovered
        } else {
            NodeVisualState::Idle
        }
    }
}

/// Editor-mode visual state of a single node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeVisualState {
    #[default]
    Idle,
    Hovered,
    Selected,
}

impl NodeVisualState {
    /// Whether the drag handle is shown.
    #[must_use]
    pub const fn shows_drag_handle(self) -> bool {
        !matches!(self, Self::Idle)
    }
}
