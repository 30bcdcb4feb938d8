#![forbid(unsafe_code)]

//! Page host.
//!
//! A [`Page`] owns everything that outlives a single render pass: the
//! document, the viewport registry, running region observations, widget
//! timers, and composite widget state. The document is never mutated here;
//! authoring intents are routed to the host's [`EditorCallbacks`], which
//! hands back a new document through [`Page::set_document`].

use pagecraft_core::{
    ComponentId, Document, EditorCallbacks, RenderMode, SelectionState, WidgetAction,
};
use pagecraft_layout::ViewportRegistry;
use pagecraft_render::{EventKind, Frame, HandlerId};
use pagecraft_widgets::{PageRenderer, RenderOptions, WidgetStates};

use crate::config::PageConfig;
use crate::lifecycle::{Lifecycle, ReconcileReport, WidgetTimer};

/// Result of [`Page::dispatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// No handler with that id and event in the current frame.
    Ignored,
    /// An authoring intent was delivered to the callbacks.
    Delivered,
    /// A composite widget changed state and the page re-rendered.
    WidgetUpdated(ComponentId),
}

pub struct Page {
    document: Document,
    mode: RenderMode,
    selection: SelectionState,
    options: RenderOptions,
    states: WidgetStates,
    lifecycle: Lifecycle,
    frame: Frame,
    last_report: ReconcileReport,
}

impl Page {
    /// Create a page and render it once.
    #[must_use]
    pub fn new(document: Document, mode: RenderMode, config: &PageConfig) -> Self {
        let registry = if config.observe_resize {
            ViewportRegistry::new(config.breakpoints)
        } else {
            ViewportRegistry::unavailable(config.breakpoints)
        };
        if let Some(width) = config.viewport_width {
            registry.set_viewport_width(width);
        }
        let mut page = Self {
            document,
            mode,
            selection: SelectionState::none(),
            options: config.render_options(),
            states: WidgetStates::new(),
            lifecycle: Lifecycle::new(registry),
            frame: Frame::new(mode),
            last_report: ReconcileReport::default(),
        };
        page.render();
        page
    }

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    #[must_use]
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    #[must_use]
    pub fn registry(&self) -> &ViewportRegistry {
        self.lifecycle.registry()
    }

    /// Output of the latest render pass.
    #[must_use]
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    #[must_use]
    pub fn states(&self) -> &WidgetStates {
        &self.states
    }

    /// What the latest reconcile started and stopped.
    #[must_use]
    pub fn last_report(&self) -> ReconcileReport {
        self.last_report
    }

    /// Replace the document (after a host-side edit) and re-render.
    pub fn set_document(&mut self, document: Document) -> &Frame {
        self.document = document;
        self.render()
    }

    pub fn set_selection(&mut self, selection: SelectionState) -> &Frame {
        self.selection = selection;
        self.render()
    }

    pub fn set_mode(&mut self, mode: RenderMode) -> &Frame {
        self.mode = mode;
        self.render()
    }

    /// Render the document and reconcile observations and timers with the
    /// new frame.
    pub fn render(&mut self) -> &Frame {
        let frame = PageRenderer::new(self.mode)
            .selection(self.selection.clone())
            .columns(self.lifecycle.registry())
            .states(&self.states)
            .options(&self.options)
            .render(&self.document.nodes);
        self.frame = frame;
        self.last_report = self.lifecycle.reconcile(&self.frame);
        let frame = &self.frame;
        self.states.retain(|id| frame.is_mounted(id.as_str()));
        tracing::debug!(
            nodes = frame.mounted().len(),
            handlers = frame.handlers().len(),
            mode = ?self.mode,
            "page rendered"
        );
        &self.frame
    }

    /// New viewport width. Re-renders if any region crossed a breakpoint;
    /// returns those regions.
    pub fn resize_viewport(&mut self, width: u32) -> Vec<ComponentId> {
        self.lifecycle.registry().set_viewport_width(width);
        self.after_resize()
    }

    /// New measured width for one region.
    pub fn resize_region(&mut self, region: &ComponentId, width: u32) -> Vec<ComponentId> {
        self.lifecycle.registry().set_region_width(region, width);
        self.after_resize()
    }

    fn after_resize(&mut self) -> Vec<ComponentId> {
        let crossed = self.lifecycle.refresh();
        if !crossed.is_empty() {
            tracing::debug!(regions = ?crossed, "breakpoint crossed");
            self.render();
        }
        crossed
    }

    /// Activate handler `id` for `event`.
    pub fn dispatch(
        &mut self,
        id: HandlerId,
        event: EventKind,
        callbacks: &mut dyn EditorCallbacks,
    ) -> Dispatch {
        let Some(intent) = self.frame.resolve(id, event).cloned() else {
            tracing::debug!(handler = %id, ?event, "no handler");
            return Dispatch::Ignored;
        };
        match intent.deliver(callbacks) {
            None => Dispatch::Delivered,
            Some((node, action)) => {
                if self.apply_widget_action(&node, action) {
                    self.render();
                    Dispatch::WidgetUpdated(node)
                } else {
                    Dispatch::Ignored
                }
            }
        }
    }

    /// Advance widget timers by `elapsed_ms`. Returns the number of actions
    /// applied; the page re-renders if any were.
    pub fn tick(&mut self, elapsed_ms: u64) -> usize {
        let fired = self.lifecycle.advance(elapsed_ms);
        let applied = fired
            .into_iter()
            .filter(|(node, action)| self.apply_widget_action(node, *action))
            .count();
        if applied > 0 {
            self.render();
        }
        applied
    }

    fn apply_widget_action(&mut self, node: &ComponentId, action: WidgetAction) -> bool {
        match self.document.find(node.as_str()) {
            Some(component) => self.states.apply(component, action),
            None => {
                tracing::warn!(node = %node, "widget action for missing node");
                false
            }
        }
    }

    #[must_use]
    pub fn active_observations(&self) -> usize {
        self.lifecycle.observations().len()
    }

    #[must_use]
    pub fn active_timers(&self) -> &[WidgetTimer] {
        self.lifecycle.timers()
    }

    /// Tear down: stop every observation and timer and drop widget state.
    pub fn unmount(&mut self) {
        self.lifecycle.clear();
        self.states = WidgetStates::new();
        self.frame = Frame::new(self.mode);
        tracing::debug!("page unmounted");
    }
}
