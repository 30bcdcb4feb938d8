#![forbid(unsafe_code)]

//! Frame = rendered nodes + metadata for a render pass.
//!
//! The `Frame` is the render target widgets write to. Besides the output
//! nodes it collects everything the host must wire up after rendering:
//!
//! - interaction handlers, each mapping a [`HandlerId`] to an [`Intent`]
//! - the ids of every mounted component
//! - regions that want width observation
//! - periodic timers requested by widgets
//!
//! A frame built in [`RenderMode::Runtime`] refuses authoring handlers, so
//! published output can never emit editor intents.

use std::fmt;
use std::str::FromStr;

use pagecraft_core::{ComponentId, Intent, RenderMode, WidgetAction};

use crate::element::{Element, Node};
use crate::html;

/// Identifier for a registered handler.
///
/// Ids start at 1; 0 is never issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandlerId(u32);

impl HandlerId {
    /// Create a handler id from a raw value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[inline]
    pub const fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for HandlerId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Host events a handler can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    PointerEnter,
    PointerLeave,
}

impl EventKind {
    /// Attribute name carrying the handler id on an element.
    #[must_use]
    pub const fn attribute(self) -> &'static str {
        match self {
            Self::Click => "data-pc-on-click",
            Self::PointerEnter => "data-pc-on-pointerenter",
            Self::PointerLeave => "data-pc-on-pointerleave",
        }
    }
}

/// A registered handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handler {
    pub id: HandlerId,
    pub event: EventKind,
    /// Component whose render registered the handler.
    pub owner: ComponentId,
    pub intent: Intent,
}

/// A region that wants its width observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedRegion {
    pub id: ComponentId,
    /// Declared column count of the region.
    pub base: usize,
}

/// A periodic timer a widget asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimerRequest {
    pub owner: ComponentId,
    pub interval_ms: u64,
    pub action: WidgetAction,
}

/// Output of one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Top-level rendered nodes, in document order.
    pub nodes: Vec<Node>,
    mode: RenderMode,
    handlers: Vec<Handler>,
    mounted: Vec<ComponentId>,
    regions: Vec<ObservedRegion>,
    timers: Vec<TimerRequest>,
}

impl Frame {
    #[must_use]
    pub fn new(mode: RenderMode) -> Self {
        Self {
            nodes: Vec::new(),
            mode,
            handlers: Vec::new(),
            mounted: Vec::new(),
            regions: Vec::new(),
            timers: Vec::new(),
        }
    }

    #[must_use]
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    // ── Handlers ────────────────────────────────────────────────────────

    /// Register a handler. Returns `None` when an authoring intent is
    /// registered on a runtime frame.
    pub fn register(
        &mut self,
        event: EventKind,
        owner: &ComponentId,
        intent: Intent,
    ) -> Option<HandlerId> {
        if intent.is_authoring() && !self.mode.is_editor() {
            pagecraft_core::debug!(owner = %owner, ?intent, "authoring handler refused in runtime frame");
            return None;
        }
        let id = HandlerId::new(u32::try_from(self.handlers.len() + 1).ok()?);
        self.handlers.push(Handler {
            id,
            event,
            owner: owner.clone(),
            intent,
        });
        Some(id)
    }

    /// Register a handler and attach it to `element`.
    #[must_use]
    pub fn bind(
        &mut self,
        element: Element,
        event: EventKind,
        owner: &ComponentId,
        intent: Intent,
    ) -> Element {
        match self.register(event, owner, intent) {
            Some(id) => element.on(event, id),
            None => element,
        }
    }

    #[must_use]
    pub fn handler(&self, id: HandlerId) -> Option<&Handler> {
        let index = usize::try_from(id.id()).ok()?.checked_sub(1)?;
        self.handlers.get(index)
    }

    #[must_use]
    pub fn handlers(&self) -> &[Handler] {
        &self.handlers
    }

    pub fn handlers_for<'a>(&'a self, owner: &'a str) -> impl Iterator<Item = &'a Handler> + 'a {
        self.handlers.iter().filter(move |h| h.owner == owner)
    }

    /// Intent to deliver when `event` fires on the element holding `id`.
    #[must_use]
    pub fn resolve(&self, id: HandlerId, event: EventKind) -> Option<&Intent> {
        self.handler(id)
            .filter(|h| h.event == event)
            .map(|h| &h.intent)
    }

    /// Every registered intent, in registration order.
    pub fn intents(&self) -> impl Iterator<Item = &Intent> {
        self.handlers.iter().map(|h| &h.intent)
    }

    /// Whether any registered handler targets authoring state.
    #[must_use]
    pub fn has_authoring_handlers(&self) -> bool {
        self.handlers.iter().any(|h| h.intent.is_authoring())
    }

    // ── Lifecycle metadata ──────────────────────────────────────────────

    /// Record that `id` was rendered in this pass.
    pub fn mount(&mut self, id: &ComponentId) {
        self.mounted.push(id.clone());
    }

    #[must_use]
    pub fn mounted(&self) -> &[ComponentId] {
        &self.mounted
    }

    #[must_use]
    pub fn is_mounted(&self, id: &str) -> bool {
        self.mounted.iter().any(|m| m == id)
    }

    /// Ask the host to observe the width of region `id`.
    pub fn observe_region(&mut self, id: &ComponentId, base: usize) {
        match self.regions.iter_mut().find(|r| r.id == *id) {
            Some(region) => region.base = base,
            None => self.regions.push(ObservedRegion {
                id: id.clone(),
                base,
            }),
        }
    }

    #[must_use]
    pub fn observed_regions(&self) -> &[ObservedRegion] {
        &self.regions
    }

    /// Ask the host to deliver `action` to `owner` every `interval_ms`.
    pub fn request_timer(&mut self, owner: &ComponentId, interval_ms: u64, action: WidgetAction) {
        self.timers.retain(|t| t.owner != *owner);
        self.timers.push(TimerRequest {
            owner: owner.clone(),
            interval_ms,
            action,
        });
    }

    #[must_use]
    pub fn timers(&self) -> &[TimerRequest] {
        &self.timers
    }

    // ── Output ──────────────────────────────────────────────────────────

    #[must_use]
    pub fn to_html(&self) -> String {
        html::render_nodes(&self.nodes)
    }

    /// Every element of the output, pre-order.
    #[must_use]
    pub fn elements(&self) -> Vec<&Element> {
        self.nodes
            .iter()
            .filter_map(Node::as_element)
            .flat_map(Element::descendants)
            .collect()
    }

    #[must_use]
    pub fn find_by_class(&self, class: &str) -> Vec<&Element> {
        self.elements()
            .into_iter()
            .filter(|el| el.has_class(class))
            .collect()
    }

    /// Root element of the rendered component `id`.
    #[must_use]
    pub fn find_node(&self, id: &str) -> Option<&Element> {
        self.elements()
            .into_iter()
            .find(|el| el.rendered_node() == Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> ComponentId {
        ComponentId::from(s)
    }

    #[test]
    fn handler_ids_start_at_one() {
        let mut frame = Frame::new(RenderMode::Editor);
        let first = frame
            .register(EventKind::Click, &id("a"), Intent::Select(id("a")))
            .unwrap();
        assert_eq!(first, HandlerId::new(1));
        assert_eq!(frame.handler(first).unwrap().owner, "a");
        assert!(frame.handler(HandlerId::new(0)).is_none());
    }

    #[test]
    fn runtime_frame_refuses_authoring_intents() {
        let mut frame = Frame::new(RenderMode::Runtime);
        assert!(
            frame
                .register(EventKind::Click, &id("a"), Intent::Select(id("a")))
                .is_none()
        );
        let toggle = Intent::Widget {
            node: id("faq"),
            action: WidgetAction::ToggleItem(0),
        };
        assert!(frame.register(EventKind::Click, &id("faq"), toggle).is_some());
        assert!(!frame.has_authoring_handlers());
    }

    #[test]
    fn bind_attaches_only_registered_handlers() {
        let mut runtime = Frame::new(RenderMode::Runtime);
        let el = runtime.bind(
            Element::div(),
            EventKind::Click,
            &id("a"),
            Intent::AddColumn(id("a")),
        );
        assert_eq!(el.handler(EventKind::Click), None);

        let mut editor = Frame::new(RenderMode::Editor);
        let el = editor.bind(
            Element::div(),
            EventKind::Click,
            &id("a"),
            Intent::AddColumn(id("a")),
        );
        let handler = el.handler(EventKind::Click).unwrap();
        assert_eq!(
            editor.resolve(handler, EventKind::Click),
            Some(&Intent::AddColumn(id("a")))
        );
        assert_eq!(editor.resolve(handler, EventKind::PointerEnter), None);
    }

    #[test]
    fn timers_are_replaced_per_owner() {
        let mut frame = Frame::new(RenderMode::Runtime);
        frame.request_timer(&id("s"), 3000, WidgetAction::NextSlide);
        frame.request_timer(&id("s"), 1000, WidgetAction::NextSlide);
        assert_eq!(frame.timers().len(), 1);
        assert_eq!(frame.timers()[0].interval_ms, 1000);
    }

    #[test]
    fn find_node_searches_all_roots() {
        let mut frame = Frame::new(RenderMode::Runtime);
        frame.nodes.push(Element::div().node_id("one").into());
        frame.nodes.push(
            Element::div()
                .node_id("two")
                .child(Element::new("p").node_id("inner"))
                .into(),
        );
        frame.mount(&id("one"));
        assert!(frame.find_node("inner").is_some());
        assert!(frame.is_mounted("one"));
        assert!(!frame.is_mounted("inner"));
    }
}
