#![forbid(unsafe_code)]

//! Widgets: the render dispatcher and every component renderer.
//!
//! A render pass walks the component tree depth-first. Each node is turned
//! into an [`Element`] by the [`Widget`] for its kind; containers recurse
//! back into the dispatcher for their children. In editor mode the
//! dispatcher layers overlays (rings, badge, drag handle, add-after) on top
//! of each node's output.

pub mod composite;
pub mod containers;
pub mod dispatcher;
pub mod grid;
pub mod options;
pub mod overlay;
pub mod palette;
pub mod primitives;
pub mod state;

use pagecraft_core::{RenderMode, SelectionState};
use pagecraft_layout::ColumnSource;
use pagecraft_render::{Element, Frame};

pub use dispatcher::{PageRenderer, render_node};
pub use options::{Affordances, RenderOptions};
pub use state::{FaqState, SliderState, WidgetStates};

/// A renderer for one component kind.
///
/// Widgets are read-only views over a node; interactivity is registered
/// on the [`Frame`] held by the [`RenderContext`].
pub trait Widget {
    /// Render the widget's body.
    fn render(&self, ctx: &mut RenderContext<'_>) -> Element;

    /// Name used in render spans.
    fn name(&self) -> &'static str;
}

/// Everything a widget reads or writes during a render pass.
pub struct RenderContext<'a> {
    pub frame: &'a mut Frame,
    columns: &'a dyn ColumnSource,
    states: &'a WidgetStates,
    options: &'a RenderOptions,
    selection: SelectionState,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        frame: &'a mut Frame,
        columns: &'a dyn ColumnSource,
        states: &'a WidgetStates,
        options: &'a RenderOptions,
        selection: SelectionState,
    ) -> Self {
        Self {
            frame,
            columns,
            states,
            options,
            selection,
        }
    }

    #[inline]
    #[must_use]
    pub fn mode(&self) -> RenderMode {
        self.frame.mode()
    }

    #[inline]
    #[must_use]
    pub fn is_editor(&self) -> bool {
        self.frame.mode().is_editor()
    }

    #[must_use]
    pub fn columns(&self) -> &'a dyn ColumnSource {
        self.columns
    }

    #[must_use]
    pub fn states(&self) -> &'a WidgetStates {
        self.states
    }

    #[must_use]
    pub fn options(&self) -> &'a RenderOptions {
        self.options
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Run `f` with a different selection state, restoring the current one
    /// afterwards.
    pub fn with_selection<R>(
        &mut self,
        selection: SelectionState,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let saved = std::mem::replace(&mut self.selection, selection);
        let out = f(self);
        self.selection = saved;
        out
    }
}
