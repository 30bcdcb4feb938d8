#![forbid(unsafe_code)]

//! Editor overlays.
//!
//! In editor mode every node is wrapped in an editable frame:
//!
//! ```text
//! div.pc-editable[.pc-selection-ring][.pc-hover-ring]   click → Select, enter/leave → Hover*
//!   span.pc-type-badge          (selected)
//!   span.pc-drag-handle         (hovered or selected)
//!   <body>
//!   div.pc-add-after            (add-after enabled) → AddAfter{node, kind}
//! ```
//!
//! Runtime mode returns the body untouched.

use pagecraft_core::{Component, Intent, NodeVisualState};
use pagecraft_render::{Element, EventKind};

use crate::options::Affordances;
use crate::{RenderContext, palette};

/// Wrap `body` with the overlays for `node`'s visual state.
pub fn decorate(node: &Component, body: Element, ctx: &mut RenderContext<'_>) -> Element {
    if !ctx.is_editor() {
        return body;
    }
    let options = ctx.options();
    let state = ctx.selection().visual_state(&node.id);
    let id = &node.id;

    let mut wrapper = Element::div()
        .class("pc-editable")
        .class_if(
            state == NodeVisualState::Selected && options.shows(Affordances::SELECTION_RING),
            "pc-selection-ring",
        )
        .class_if(
            state == NodeVisualState::Hovered && options.shows(Affordances::HOVER_RING),
            "pc-hover-ring",
        )
        .attr("data-editable", id.as_str());
    wrapper = ctx
        .frame
        .bind(wrapper, EventKind::Click, id, Intent::Select(id.clone()));
    wrapper = ctx
        .frame
        .bind(wrapper, EventKind::PointerEnter, id, Intent::HoverEnter(id.clone()));
    wrapper = ctx
        .frame
        .bind(wrapper, EventKind::PointerLeave, id, Intent::HoverLeave(id.clone()));

    if state == NodeVisualState::Selected && options.shows(Affordances::TYPE_BADGE) {
        wrapper.push(
            Element::new("span")
                .class("pc-type-badge")
                .text(node.kind.label()),
        );
    }
    if state.shows_drag_handle() && options.shows(Affordances::DRAG_HANDLE) {
        wrapper.push(
            Element::new("span")
                .class("pc-drag-handle")
                .attr("draggable", "true")
                .attr("aria-label", "Drag to move")
                .text("⠿"),
        );
    }

    wrapper.push(body);

    if options.shows(Affordances::ADD_AFTER) && !options.palette.is_empty() {
        let add = Element::div()
            .class("pc-add-after")
            .child(Element::new("span").class("pc-add-after-icon").text("+"))
            .child(palette::quick_insert(ctx, id, |kind| Intent::AddAfter {
                node: id.clone(),
                kind: kind.clone(),
            }));
        wrapper.push(add);
    }
    wrapper
}
