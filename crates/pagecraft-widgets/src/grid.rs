#![forbid(unsafe_code)]

//! Template grid widget.
//!
//! Cells are placed explicitly (`grid-row` / `grid-column`) so empty cells
//! can be omitted in runtime output without shifting their neighbours.
//! When the region is narrower than the template, tracks collapse to
//! `repeat(n, minmax(0, 1fr))`, spans clamp to `n`, and cells flow in
//! row-major order.
//!
//! In editor mode the toolbar sits beside the grid inside a
//! `div.pc-grid-editor` wrapper, so it never takes a grid track.

use pagecraft_core::{Component, GridProps, Intent, LayoutId};
use pagecraft_layout::{CATALOGUE, GridPlan, GridTracks, LayoutTemplate, PlannedCell};
use pagecraft_render::{Element, EventKind};

use crate::dispatcher::render_node;
use crate::options::Affordances;
use crate::primitives::shell;
use crate::{RenderContext, Widget, palette};

fn track_list(tracks: GridTracks) -> String {
    match tracks {
        GridTracks::Template(widths) => widths
            .iter()
            .map(|w| format!("{w}%"))
            .collect::<Vec<_>>()
            .join(" "),
        GridTracks::Uniform(n) => format!("repeat({n}, minmax(0, 1fr))"),
    }
}

pub struct Grid<'a>(pub &'a Component);

impl Widget for Grid<'_> {
    fn render(&self, ctx: &mut RenderContext<'_>) -> Element {
        let node = self.0;
        let plan = GridPlan::build(node, ctx.columns());
        ctx.frame.observe_region(&node.id, plan.template.columns);
        let editor = ctx.is_editor();
        let options = ctx.options();

        let mut el = shell(node, "div", "pc-grid")
            .attr("data-layout", plan.template.id)
            .style("display", "grid")
            .style("grid-template-columns", track_list(plan.tracks()));
        if let Some(gap) = GridProps::of(node).gap {
            el = el.style("gap", gap);
        }

        for planned in &plan.cells {
            if let Some(cell) = grid_cell(node, &plan, planned, ctx) {
                el.push(cell);
            }
        }
        if !editor {
            return el;
        }

        let mut toolbar = Element::div().class("pc-grid-toolbar");
        if options.shows(Affordances::GRID_BADGE) {
            toolbar.push(
                Element::new("span")
                    .class("pc-grid-badge")
                    .text(format!("{} × {}", plan.template.rows, plan.template.columns)),
            );
        }
        if options.shows(Affordances::LAYOUT_PICKER) {
            toolbar.push(layout_picker(node, plan.template, ctx));
        }
        Element::div().class("pc-grid-editor").child(toolbar).child(el)
    }

    fn name(&self) -> &'static str {
        "Grid"
    }
}

fn grid_cell(
    node: &Component,
    plan: &GridPlan<'_>,
    planned: &PlannedCell<'_>,
    ctx: &mut RenderContext<'_>,
) -> Option<Element> {
    let editor = ctx.is_editor();
    if planned.occupant.is_none() && !(editor && ctx.options().shows(Affordances::EMPTY_SLOTS)) {
        return None;
    }
    let cell = planned.cell;
    let span = plan.span_of(&cell);
    let mut el = Element::div()
        .class("pc-cell")
        .attr("data-cell", cell.key().to_string());
    el = if plan.is_collapsed() {
        el.style("grid-column", format!("span {span}"))
    } else {
        el.style("grid-row", (cell.row + 1).to_string())
            .style("grid-column", format!("{} / span {span}", cell.col + 1))
    };

    match planned.occupant {
        Some(child) => {
            if editor {
                el = ctx.frame.bind(
                    el,
                    EventKind::Click,
                    &node.id,
                    Intent::ColumnClick {
                        container: node.id.clone(),
                        slot: cell.slot(),
                    },
                );
            }
            el.push(render_node(child, ctx));
        }
        None => {
            let target = Element::div().class("pc-empty-cell").text("+ Add element");
            let target = ctx.frame.bind(
                target,
                EventKind::Click,
                &node.id,
                Intent::ColumnAddClick {
                    container: node.id.clone(),
                    slot: cell.slot(),
                },
            );
            let slot = cell.slot();
            el.push(target.child(palette::quick_insert(ctx, &node.id, |kind| {
                Intent::AddToContainer {
                    kind: kind.clone(),
                    container: Some(node.id.clone()),
                    slot: Some(slot),
                }
            })));
        }
    }
    Some(el)
}

/// Mini grid drawn from a template's matrix.
fn thumbnail(template: &LayoutTemplate) -> Element {
    let mut thumb = Element::div()
        .class("pc-layout-thumb")
        .style("display", "grid")
        .style(
            "grid-template-columns",
            format!("repeat({}, 1fr)", template.columns),
        );
    for (row, spans) in template.thumbnail().into_iter().enumerate() {
        for span in spans {
            thumb.push(
                Element::new("span")
                    .class("pc-layout-thumb-cell")
                    .attr("data-row", row.to_string())
                    .style("grid-column", format!("span {span}")),
            );
        }
    }
    thumb
}

fn layout_picker(node: &Component, active: &LayoutTemplate, ctx: &mut RenderContext<'_>) -> Element {
    let mut picker = Element::div()
        .class("pc-layout-picker")
        .attr("role", "listbox");
    for template in CATALOGUE.iter() {
        let option = Element::new("button")
            .class("pc-layout-option")
            .class_if(template.id == active.id, "is-active")
            .attr("type", "button")
            .attr("data-layout", template.id)
            .attr("title", template.label)
            .child(thumbnail(template));
        picker.push(ctx.frame.bind(
            option,
            EventKind::Click,
            &node.id,
            Intent::LayoutChange {
                grid: node.id.clone(),
                layout: LayoutId::from(template.id),
            },
        ));
    }
    picker
}
