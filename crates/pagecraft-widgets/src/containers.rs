#![forbid(unsafe_code)]

//! Simple containers (`section`, `card`) and the flex column container.

use pagecraft_core::{Component, ContainerProps, Intent, SelectionState, SlotAddress};
use pagecraft_layout::FlexPlan;
use pagecraft_render::{Element, EventKind};

use crate::dispatcher::render_node;
use crate::options::Affordances;
use crate::primitives::shell;
use crate::{RenderContext, Widget, palette};

/// Render `children` of a simple container. Children see a fresh selection
/// state: nothing selected, nothing hovered. Empty slots render nothing.
fn render_simple(node: &Component, el: Element, ctx: &mut RenderContext<'_>) -> Element {
    if node.filled_children().next().is_none() {
        if !ctx.is_editor() || !ctx.options().shows(Affordances::EMPTY_SLOTS) {
            return el;
        }
        let hint = Element::div()
            .class("pc-empty-container")
            .child(Element::new("span").text(format!("Empty {}", node.kind.label())))
            .child(palette::quick_insert(ctx, &node.id, |kind| Intent::AddToContainer {
                kind: kind.clone(),
                container: Some(node.id.clone()),
                slot: None,
            }));
        return el.child(hint);
    }
    let children = ctx.with_selection(SelectionState::default(), |ctx| {
        node.filled_children()
            .map(|child| render_node(child, ctx))
            .collect::<Vec<_>>()
    });
    el.children(children)
}

pub struct Section<'a>(pub &'a Component);

impl Widget for Section<'_> {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Element {
        render_simple(self.0, shell(self.0, "section", "pc-section"), ctx)
    }

    fn name(&self) -> &'static str {
        "Section"
    }
}

pub struct Card<'a>(pub &'a Component);

impl Widget for Card<'_> {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let mut el = shell(node, "div", "pc-card");
        if let Some(title) = node.prop_str("title") {
            el = el.child(Element::new("h3").class("pc-card-title").text(title));
        }
        render_simple(node, el, ctx)
    }

    fn name(&self) -> &'static str {
        "Card"
    }
}

/// Fixed-column container. Column `i` holds `children[i]`; empty slots
/// render as empty columns.
pub struct FlexContainer<'a>(pub &'a Component);

impl Widget for FlexContainer<'_> {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let plan = FlexPlan::build(node, ctx.columns());
        ctx.frame.observe_region(&node.id, plan.declared);
        let editor = ctx.is_editor();
        let options = ctx.options();

        let mut el = shell(node, "div", "pc-container")
            .style("display", "grid")
            .style(
                "grid-template-columns",
                format!("repeat({}, minmax(0, 1fr))", plan.effective),
            )
            .attr("data-columns", plan.declared.to_string());
        if let Some(gap) = ContainerProps::of(node).gap {
            el = el.style("gap", gap);
        }

        for slot in &plan.slots {
            let mut column = Element::div()
                .class("pc-column")
                .attr("data-slot", slot.index.to_string());
            if editor {
                column = ctx.frame.bind(
                    column,
                    EventKind::Click,
                    &node.id,
                    Intent::ColumnClick {
                        container: node.id.clone(),
                        slot: slot.slot(),
                    },
                );
            }
            match slot.child {
                Some(child) => column.push(render_node(child, ctx)),
                None if editor && options.shows(Affordances::EMPTY_SLOTS) => {
                    column.push(empty_column(node, slot.slot(), ctx));
                }
                None => {}
            }
            el.push(column);
        }

        if editor && options.shows(Affordances::COLUMN_CONTROLS) {
            el.push(column_controls(node, &plan, ctx));
        }
        el
    }

    fn name(&self) -> &'static str {
        "Container"
    }
}

fn empty_column(node: &Component, slot: SlotAddress, ctx: &mut RenderContext<'_>) -> Element {
    let target = Element::div().class("pc-empty-column").text("+ Add element");
    let target = ctx.frame.bind(
        target,
        EventKind::Click,
        &node.id,
        Intent::ColumnAddClick {
            container: node.id.clone(),
            slot,
        },
    );
    target.child(palette::quick_insert(ctx, &node.id, |kind| Intent::AddToContainer {
        kind: kind.clone(),
        container: Some(node.id.clone()),
        slot: Some(slot),
    }))
}

fn column_controls(node: &Component, plan: &FlexPlan<'_>, ctx: &mut RenderContext<'_>) -> Element {
    let mut controls = Element::div().class("pc-column-controls");
    if plan.can_add_column() {
        let add = Element::new("button")
            .class("pc-add-column")
            .attr("type", "button")
            .text("+ Column");
        controls.push(ctx.frame.bind(
            add,
            EventKind::Click,
            &node.id,
            Intent::AddColumn(node.id.clone()),
        ));
    }
    if plan.can_remove_column() {
        let remove = Element::new("button")
            .class("pc-remove-column")
            .attr("type", "button")
            .text("− Column");
        controls.push(ctx.frame.bind(
            remove,
            EventKind::Click,
            &node.id,
            Intent::RemoveColumn(node.id.clone()),
        ));
    }
    controls
}
