#![forbid(unsafe_code)]

//! Quick-insert palette shown by add controls.

use pagecraft_core::{ComponentId, ComponentKind, Intent};
use pagecraft_render::{Element, EventKind};

use crate::RenderContext;

/// Render one button per configured kind, each emitting `intent_for(kind)`.
pub fn quick_insert(
    ctx: &mut RenderContext<'_>,
    owner: &ComponentId,
    intent_for: impl Fn(&ComponentKind) -> Intent,
) -> Element {
    let mut palette = Element::div().class("pc-palette");
    for kind in &ctx.options().palette {
        let button = Element::new("button")
            .class("pc-palette-item")
            .attr("type", "button")
            .attr("data-kind", kind.as_str())
            .text(kind.label());
        palette.push(ctx.frame.bind(button, EventKind::Click, owner, intent_for(kind)));
    }
    palette
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RenderOptions, WidgetStates};
    use pagecraft_core::{RenderMode, SelectionState};
    use pagecraft_layout::Unconstrained;
    use pagecraft_render::Frame;

    #[test]
    fn one_handler_per_palette_kind() {
        let mut frame = Frame::new(RenderMode::Editor);
        let states = WidgetStates::new();
        let options = RenderOptions::default().with_palette([ComponentKind::Text, ComponentKind::Grid]);
        let mut ctx = RenderContext::new(&mut frame, &Unconstrained, &states, &options, SelectionState::none());
        let owner = ComponentId::from("n");
        let el = quick_insert(&mut ctx, &owner, |kind| Intent::AddAfter {
            node: owner.clone(),
            kind: kind.clone(),
        });

        let items = el.find_by_class("pc-palette-item");
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].get_attr("data-kind"), Some("grid"));
        let handler = items[1].handler(EventKind::Click).unwrap();
        assert_eq!(
            frame.resolve(handler, EventKind::Click),
            Some(&Intent::AddAfter {
                node: owner.clone(),
                kind: ComponentKind::Grid
            })
        );
    }
}
