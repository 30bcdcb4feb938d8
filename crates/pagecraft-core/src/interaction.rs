#![forbid(unsafe_code)]

//! Interaction contract between the render core and its host.
//!
//! Rendering never mutates the tree. Every interactive element carries an
//! [`Intent`]; when the host activates that element the intent is delivered
//! to an [`EditorCallbacks`] implementation, which owns the mutation.
//!
//! Widget-internal intents ([`Intent::Widget`]) do not reach the callbacks;
//! they are consumed by whoever holds composite widget state.

use crate::component::ComponentId;
use crate::kind::ComponentKind;
use crate::props::LayoutId;
use crate::slot::SlotAddress;

/// Interaction that a composite widget handles on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetAction {
    /// Open or close the FAQ item at an index.
    ToggleItem(usize),
    /// Advance a slider.
    NextSlide,
    /// Step a slider back.
    PrevSlide,
    /// Jump a slider to an index.
    GoToSlide(usize),
}

/// A request emitted by the rendered output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Select(ComponentId),
    HoverEnter(ComponentId),
    HoverLeave(ComponentId),
    /// Insert a new node of `kind`; no container means the page root.
    AddToContainer {
        kind: ComponentKind,
        container: Option<ComponentId>,
        slot: Option<SlotAddress>,
    },
    ColumnClick {
        container: ComponentId,
        slot: SlotAddress,
    },
    ColumnAddClick {
        container: ComponentId,
        slot: SlotAddress,
    },
    AddColumn(ComponentId),
    RemoveColumn(ComponentId),
    AddAfter {
        node: ComponentId,
        kind: ComponentKind,
    },
    LayoutChange {
        grid: ComponentId,
        layout: LayoutId,
    },
    Widget {
        node: ComponentId,
        action: WidgetAction,
    },
}

impl Intent {
    /// Whether this intent targets authoring state (editor mode only).
    #[must_use]
    pub fn is_authoring(&self) -> bool {
        !matches!(self, Self::Widget { .. })
    }

    /// Route this intent to the host callbacks.
    ///
    /// Returns the widget action unhandled when the intent is widget-internal.
    pub fn deliver(self, callbacks: &mut dyn EditorCallbacks) -> Option<(ComponentId, WidgetAction)> {
        match self {
            Self::Select(id) => callbacks.on_select(&id),
            Self::HoverEnter(id) => callbacks.on_hover_enter(&id),
            Self::HoverLeave(id) => callbacks.on_hover_leave(&id),
            Self::AddToContainer {
                kind,
                container,
                slot,
            } => callbacks.on_add_to_container(&kind, container.as_ref(), slot),
            Self::ColumnClick { container, slot } => callbacks.on_column_click(&container, slot),
            Self::ColumnAddClick { container, slot } => {
                callbacks.on_column_add_click(&container, slot);
            }
            Self::AddColumn(id) => callbacks.on_add_column(&id),
            Self::RemoveColumn(id) => callbacks.on_remove_column(&id),
            Self::AddAfter { node, kind } => callbacks.on_add_after(&node, &kind),
            Self::LayoutChange { grid, layout } => callbacks.on_layout_change(&grid, &layout),
            Self::Widget { node, action } => return Some((node, action)),
        }
        None
    }
}

/// Host-side callbacks. Every method defaults to a no-op so hosts implement
/// only what they support.
pub trait EditorCallbacks {
    fn on_select(&mut self, _node: &ComponentId) {}
    fn on_hover_enter(&mut self, _node: &ComponentId) {}
    fn on_hover_leave(&mut self, _node: &ComponentId) {}
    fn on_add_to_container(
        &mut self,
        _kind: &ComponentKind,
        _container: Option<&ComponentId>,
        _slot: Option<SlotAddress>,
    ) {
    }
    fn on_column_click(&mut self, _container: &ComponentId, _slot: SlotAddress) {}
    fn on_column_add_click(&mut self, _container: &ComponentId, _slot: SlotAddress) {}
    fn on_add_column(&mut self, _container: &ComponentId) {}
    fn on_remove_column(&mut self, _container: &ComponentId) {}
    fn on_add_after(&mut self, _node: &ComponentId, _kind: &ComponentKind) {}
    fn on_layout_change(&mut self, _grid: &ComponentId, _layout: &LayoutId) {}
}

/// Callbacks that ignore everything (runtime pages).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCallbacks;

impl EditorCallbacks for NoopCallbacks {}

/// Callbacks that record every delivered intent, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingCallbacks {
    pub received: Vec<Intent>,
}

impl RecordingCallbacks {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl EditorCallbacks for RecordingCallbacks {
    fn on_select(&mut self, node: &ComponentId) {
        self.received.push(Intent::Select(node.clone()));
    }

    fn on_hover_enter(&mut self, node: &ComponentId) {
        self.received.push(Intent::HoverEnter(node.clone()));
    }

    fn on_hover_leave(&mut self, node: &ComponentId) {
        self.received.push(Intent::HoverLeave(node.clone()));
    }

    fn on_add_to_container(
        &mut self,
        kind: &ComponentKind,
        container: Option<&ComponentId>,
        slot: Option<SlotAddress>,
    ) {
        self.received.push(Intent::AddToContainer {
            kind: kind.clone(),
            container: container.cloned(),
            slot,
        });
    }

    fn on_column_click(&mut self, container: &ComponentId, slot: SlotAddress) {
        self.received.push(Intent::ColumnClick {
            container: container.clone(),
            slot,
        });
    }

    fn on_column_add_click(&mut self, container: &ComponentId, slot: SlotAddress) {
        self.received.push(Intent::ColumnAddClick {
            container: container.clone(),
            slot,
        });
    }

    fn on_add_column(&mut self, container: &ComponentId) {
        self.received.push(Intent::AddColumn(container.clone()));
    }

    fn on_remove_column(&mut self, container: &ComponentId) {
        self.received.push(Intent::RemoveColumn(container.clone()));
    }

    fn on_add_after(&mut self, node: &ComponentId, kind: &ComponentKind) {
        self.received.push(Intent::AddAfter {
            node: node.clone(),
            kind: kind.clone(),
        });
    }

    fn on_layout_change(&mut self, grid: &ComponentId, layout: &LayoutId) {
        self.received.push(Intent::LayoutChange {
            grid: grid.clone(),
            layout: layout.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_intents_reach_callbacks() {
        let mut rec = RecordingCallbacks::new();
        let intents = vec![
            Intent::Select("a".into()),
            Intent::ColumnAddClick {
                container: "g".into(),
                slot: SlotAddress::cell(1, 2),
            },
            Intent::LayoutChange {
                grid: "g".into(),
                layout: LayoutId::from("3x3"),
            },
        ];
        for intent in intents.clone() {
            assert!(intent.deliver(&mut rec).is_none());
        }
        assert_eq!(rec.received, intents);
    }

    #[test]
    fn widget_intents_are_returned() {
        let mut rec = RecordingCallbacks::new();
        let out = Intent::Widget {
            node: "faq".into(),
            action: WidgetAction::ToggleItem(2),
        }
        .deliver(&mut rec);
        assert_eq!(out, Some(("faq".into(), WidgetAction::ToggleItem(2))));
        assert!(rec.received.is_empty());
    }

    #[test]
    fn authoring_classification() {
        assert!(Intent::AddColumn("c".into()).is_authoring());
        assert!(
            !Intent::Widget {
                node: "s".into(),
                action: WidgetAction::NextSlide
            }
            .is_authoring()
        );
    }
}
