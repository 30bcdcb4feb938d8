#![forbid(unsafe_code)]

//! Render dispatcher.
//!
//! [`render_node`] resolves a node's kind to its [`Widget`], renders it,
//! splices in any author code the node carries, and lets the overlay layer
//! decorate the result. Containers call back into
//! [`render_node`] for their children, so one call renders a whole subtree.
//!
//! [`PageRenderer`] drives a full pass over the top-level nodes of a page
//! and returns the [`Frame`] with the output and everything the host needs
//! to wire up afterwards (handlers, observed regions, timers).

use pagecraft_core::{Component, ComponentId, ComponentKind, Intent, RenderMode, SelectionState};
use pagecraft_layout::{ColumnSource, Unconstrained};
use pagecraft_render::{Element, Frame, Node};

use crate::composite::{
    Banner, Cart, ContactForm, DomainSearch, Faq, Footer, Header, NavMenu, Newsletter,
    PricingTable, ProductsGrid, Slider, Testimonials,
};
use crate::containers::{Card, FlexContainer, Section};
use crate::grid::Grid;
use crate::options::Affordances;
use crate::primitives::{
    Alert, Button, Code, CustomCode, Divider, Heading, Image, SocialIcons, Spacer, Text,
    UnknownKind, Video, inject_author_code,
};
use crate::{RenderContext, RenderOptions, Widget, WidgetStates, overlay, palette};

/// Owner id for handlers that belong to the page rather than a node.
pub const PAGE_OWNER: &str = "__page";

fn widget_for(node: &Component) -> Box<dyn Widget + '_> {
    match &node.kind {
        ComponentKind::Heading => Box::new(Heading(node)),
        ComponentKind::Text => Box::new(Text(node)),
        ComponentKind::Button => Box::new(Button(node)),
        ComponentKind::Image => Box::new(Image(node)),
        ComponentKind::Video { .. } => Box::new(Video(node)),
        ComponentKind::Divider => Box::new(Divider(node)),
        ComponentKind::Spacer => Box::new(Spacer(node)),
        ComponentKind::Code { .. } => Box::new(Code(node)),
        ComponentKind::Alert => Box::new(Alert(node)),
        ComponentKind::SocialIcons => Box::new(SocialIcons(node)),
        ComponentKind::CustomCode => Box::new(CustomCode(node)),
        ComponentKind::Section => Box::new(Section(node)),
        ComponentKind::Card => Box::new(Card(node)),
        ComponentKind::Container => Box::new(FlexContainer(node)),
        ComponentKind::Grid => Box::new(Grid(node)),
        ComponentKind::Header => Box::new(Header(node)),
        ComponentKind::Footer => Box::new(Footer(node)),
        ComponentKind::Cart => Box::new(Cart(node)),
        ComponentKind::Slider => Box::new(Slider(node)),
        ComponentKind::Banner => Box::new(Banner(node)),
        ComponentKind::NavMenu => Box::new(NavMenu(node)),
        ComponentKind::PricingTable => Box::new(PricingTable(node)),
        ComponentKind::Testimonials => Box::new(Testimonials(node)),
        ComponentKind::Faq => Box::new(Faq(node)),
        ComponentKind::DomainSearch => Box::new(DomainSearch(node)),
        ComponentKind::ProductsGrid => Box::new(ProductsGrid(node)),
        ComponentKind::ContactForm => Box::new(ContactForm(node)),
        ComponentKind::Newsletter => Box::new(Newsletter(node)),
        ComponentKind::Unknown(_) => Box::new(UnknownKind(node)),
    }
}

/// Render one node and its subtree.
pub fn render_node(node: &Component, ctx: &mut RenderContext<'_>) -> Node {
    let widget = widget_for(node);

    #[cfg(feature = "tracing")]
    let _span = tracing::debug_span!(
        "component_render",
        id = %node.id,
        kind = %node.kind,
        widget = widget.name(),
        editor = ctx.is_editor()
    )
    .entered();

    if node.kind.is_unknown() {
        pagecraft_core::warn!(id = %node.id, kind = %node.kind, "unknown component type");
    }

    ctx.frame.mount(&node.id);
    let body = inject_author_code(node, widget.render(ctx));
    overlay::decorate(node, body, ctx).into()
}

/// Builder for a full render pass.
///
/// ```ignore
/// let frame = PageRenderer::new(RenderMode::Editor)
///     .selection(SelectionState::selected("hero"))
///     .render(&document.nodes);
/// ```
pub struct PageRenderer<'a> {
    mode: RenderMode,
    selection: SelectionState,
    columns: &'a dyn ColumnSource,
    states: Option<&'a WidgetStates>,
    options: Option<&'a RenderOptions>,
}

impl<'a> PageRenderer<'a> {
    #[must_use]
    pub fn new(mode: RenderMode) -> Self {
        Self {
            mode,
            selection: SelectionState::none(),
            columns: &Unconstrained,
            states: None,
            options: None,
        }
    }

    #[must_use]
    pub fn selection(mut self, selection: SelectionState) -> Self {
        self.selection = selection;
        self
    }

    /// Source of effective column counts. Defaults to [`Unconstrained`].
    #[must_use]
    pub fn columns(mut self, columns: &'a dyn ColumnSource) -> Self {
        self.columns = columns;
        self
    }

    #[must_use]
    pub fn states(mut self, states: &'a WidgetStates) -> Self {
        self.states = Some(states);
        self
    }

    #[must_use]
    pub fn options(mut self, options: &'a RenderOptions) -> Self {
        self.options = Some(options);
        self
    }

    /// Render `nodes` in order.
    #[must_use]
    pub fn render(&self, nodes: &[Component]) -> Frame {
        let default_states;
        let states = match self.states {
            Some(states) => states,
            None => {
                default_states = WidgetStates::new();
                &default_states
            }
        };
        let default_options;
        let options = match self.options {
            Some(options) => options,
            None => {
                default_options = RenderOptions::default();
                &default_options
            }
        };

        let mut frame = Frame::new(self.mode);
        let mut ctx = RenderContext::new(
            &mut frame,
            self.columns,
            states,
            options,
            self.selection.clone(),
        );
        let mut out: Vec<Node> = nodes.iter().map(|node| render_node(node, &mut ctx)).collect();
        if nodes.is_empty() && ctx.is_editor() && options.shows(Affordances::EMPTY_SLOTS) {
            out.push(empty_page(&mut ctx).into());
        }
        frame.nodes = out;
        frame
    }
}

fn empty_page(ctx: &mut RenderContext<'_>) -> Element {
    let owner = ComponentId::from(PAGE_OWNER);
    Element::div()
        .class("pc-empty-page")
        .child(Element::new("p").text("Start building your page"))
        .child(palette::quick_insert(ctx, &owner, |kind| Intent::AddToContainer {
            kind: kind.clone(),
            container: None,
            slot: None,
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_core::{EditorCallbacks, RecordingCallbacks};
    use pagecraft_layout::{ColumnBreakpoints, FixedViewport};
    use pagecraft_render::EventKind;
    use pretty_assertions::assert_eq;

    fn text(id: &str) -> Component {
        Component::new(id, ComponentKind::Text).with_content(id)
    }

    #[test]
    fn unknown_kind_renders_notice_and_siblings() {
        let nodes = vec![
            text("before"),
            Component::new("x", ComponentKind::Unknown("nonexistent".into())),
            text("after"),
        ];
        let frame = PageRenderer::new(RenderMode::Runtime).render(&nodes);
        assert_eq!(frame.nodes.len(), 3);
        let notice = frame.find_node("x").map(Element::text_content);
        assert_eq!(notice.as_deref(), Some("Unknown component type: nonexistent"));
        assert!(frame.find_node("before").is_some());
        assert!(frame.find_node("after").is_some());
    }

    #[test]
    fn every_known_kind_renders_its_node() {
        let nodes: Vec<_> = ComponentKind::KNOWN
            .iter()
            .enumerate()
            .map(|(i, kind)| Component::new(format!("n{i}"), kind.clone()))
            .collect();
        for mode in [RenderMode::Editor, RenderMode::Runtime] {
            let frame = PageRenderer::new(mode).render(&nodes);
            for node in &nodes {
                assert!(frame.find_node(node.id.as_str()).is_some(), "{} missing", node.kind);
                assert!(frame.is_mounted(node.id.as_str()));
            }
        }
    }

    #[test]
    fn runtime_output_carries_no_authoring_state() {
        let nodes = vec![
            Component::new("c", ComponentKind::Container)
                .with_prop("columns", 3)
                .with_child(text("a")),
            Component::new("g", ComponentKind::Grid).with_cell(0, 0, text("b")),
        ];
        let frame = PageRenderer::new(RenderMode::Runtime)
            .selection(SelectionState::selected("a").with_hovered("b"))
            .render(&nodes);
        let html = frame.to_html();
        for marker in [
            "pc-selection-ring",
            "pc-hover-ring",
            "pc-drag-handle",
            "pc-add-after",
            "pc-type-badge",
            "data-pc-on-",
            "data-editable",
        ] {
            assert!(!html.contains(marker), "runtime output leaked {marker}");
        }
        assert!(!frame.has_authoring_handlers());
    }

    #[test]
    fn flex_with_fewer_children_shows_empty_trailing_columns() {
        let node = Component::new("c", ComponentKind::Container)
            .with_prop("columns", 3)
            .with_child(text("a"));
        let frame = PageRenderer::new(RenderMode::Editor).render(&[node]);
        let columns = frame.find_by_class("pc-column");
        assert_eq!(columns.len(), 3);
        assert!(columns[0].find_node("a").is_some());
        assert_eq!(columns[1].find_by_class("pc-empty-column").len(), 1);
        assert_eq!(columns[2].find_by_class("pc-empty-column").len(), 1);
    }

    #[test]
    fn middle_slot_only_container_from_json() {
        let doc = pagecraft_core::Document::from_json(
            r#"[{"id":"c","type":"container","props":{"columns":3},
                 "children":[null,{"id":"t","type":"text","content":"x"},null]}]"#,
        )
        .unwrap();
        let frame = PageRenderer::new(RenderMode::Editor).render(&doc.nodes);
        let columns = frame.find_by_class("pc-column");
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].find_by_class("pc-empty-column").len(), 1);
        assert!(columns[1].find_node("t").is_some());
        assert_eq!(columns[2].find_by_class("pc-empty-column").len(), 1);
        assert!(doc.to_json().unwrap().contains(r#""children":[null,"#));
    }

    #[test]
    fn author_html_replaces_body_of_any_kind() {
        let banner = Component::new("b", ComponentKind::Banner)
            .with_prop("htmlCode", "<b>Sale</b>")
            .with_prop("cssCode", ".pc-banner { color: red }");
        let frame = PageRenderer::new(RenderMode::Runtime).render(&[banner]);
        let html = frame.to_html();
        assert!(html.contains("<b>Sale</b>"), "{html}");
        assert!(html.contains("<style>.pc-banner { color: red }</style>"));
        assert!(!html.contains("pc-banner-title"), "default body replaced: {html}");
        assert_eq!(frame.find_node("b").map(Element::tag), Some("section"));
    }

    #[test]
    fn author_code_sits_inside_editor_overlay() {
        let heading = Component::new("h", ComponentKind::Heading)
            .with_content("Title")
            .with_prop("jsCode", "track()");
        let frame = PageRenderer::new(RenderMode::Editor)
            .selection(SelectionState::selected("h"))
            .render(&[heading]);
        let ring_outside = frame
            .find_node("h")
            .map(|el| el.find_by_class("pc-selection-ring").is_empty());
        assert_eq!(ring_outside, Some(true));
        assert_eq!(frame.find_by_class("pc-selection-ring").len(), 1);
        assert!(frame.to_html().contains("Title<script>track()</script>"));
    }

    #[test]
    fn selection_ring_reaches_flex_children() {
        let node = Component::new("c", ComponentKind::Container).with_child(text("a"));
        let frame = PageRenderer::new(RenderMode::Editor)
            .selection(SelectionState::selected("a"))
            .render(&[node]);
        let rings = frame.find_by_class("pc-selection-ring");
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].get_attr("data-editable"), Some("a"));
    }

    #[test]
    fn empty_editor_page_offers_root_palette() {
        let frame = PageRenderer::new(RenderMode::Editor).render(&[]);
        assert_eq!(frame.find_by_class("pc-empty-page").len(), 1);
        let intents: Vec<_> = frame.handlers_for(PAGE_OWNER).map(|h| h.intent.clone()).collect();
        assert_eq!(intents.len(), RenderOptions::default().palette.len());
        assert_eq!(
            intents[0],
            Intent::AddToContainer {
                kind: ComponentKind::Heading,
                container: None,
                slot: None
            }
        );

        let runtime = PageRenderer::new(RenderMode::Runtime).render(&[]);
        assert!(runtime.nodes.is_empty());
    }

    #[test]
    fn handler_activation_reaches_callbacks() {
        let frame = PageRenderer::new(RenderMode::Editor).render(&[text("t")]);
        let select = frame
            .handlers_for("t")
            .find(|h| h.event == EventKind::Click)
            .map(|h| h.id);
        let intent = select.and_then(|id| frame.resolve(id, EventKind::Click)).cloned();

        let mut callbacks = RecordingCallbacks::new();
        let widget = intent.and_then(|i| i.deliver(&mut callbacks as &mut dyn EditorCallbacks));
        assert!(widget.is_none());
        assert_eq!(callbacks.received, vec![Intent::Select("t".into())]);
    }

    #[test]
    fn measured_width_reduces_flex_columns() {
        let node = Component::new("c", ComponentKind::Container)
            .with_prop("columns", 4)
            .with_children([text("a"), text("b"), text("c"), text("d")]);
        let viewport = FixedViewport::new(600, ColumnBreakpoints::new(300, 500, 800));
        let frame = PageRenderer::new(RenderMode::Runtime)
            .columns(&viewport)
            .render(&[node]);
        assert_eq!(frame.find_by_class("pc-column").len(), 3);
        assert!(frame.find_node("d").is_none());
    }
}
