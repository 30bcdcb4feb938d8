//! Property tests for mount lifecycle bookkeeping.
//!
//! Whatever sequence of documents a page goes through, the running
//! observations and timers match exactly what the latest document renders,
//! and dropping the page releases every one of them.

use pagecraft_core::{Component, ComponentKind, Document, RenderMode};
use pagecraft_runtime::{Page, PageConfig};
use proptest::prelude::*;
use serde_json::json;

#[derive(Debug, Clone)]
struct Shape {
    containers: usize,
    grids: usize,
    sliders: usize,
    still_sliders: usize,
}

fn shape() -> impl Strategy<Value = Shape> {
    (0usize..4, 0usize..3, 0usize..3, 0usize..2).prop_map(
        |(containers, grids, sliders, still_sliders)| Shape {
            containers,
            grids,
            sliders,
            still_sliders,
        },
    )
}

fn document(shape: &Shape) -> Document {
    let mut nodes = Vec::new();
    for i in 0..shape.containers {
        nodes.push(
            Component::new(format!("c{i}"), ComponentKind::Container).with_prop("columns", 3),
        );
    }
    for i in 0..shape.grids {
        // Nested inside a section to exercise recursion.
        nodes.push(
            Component::new(format!("sec{i}"), ComponentKind::Section)
                .with_child(Component::new(format!("g{i}"), ComponentKind::Grid)),
        );
    }
    for i in 0..shape.sliders {
        nodes.push(
            Component::new(format!("s{i}"), ComponentKind::Slider)
                .with_prop("slides", json!([{"caption": "a"}, {"caption": "b"}])),
        );
    }
    for i in 0..shape.still_sliders {
        nodes.push(
            Component::new(format!("one{i}"), ComponentKind::Slider)
                .with_prop("slides", json!([{"caption": "only"}])),
        );
    }
    Document::new(nodes)
}

proptest! {
    #[test]
    fn running_resources_track_latest_document(
        shapes in proptest::collection::vec(shape(), 1..8),
        editor in any::<bool>(),
    ) {
        let mode = if editor { RenderMode::Editor } else { RenderMode::Runtime };
        let mut page = Page::new(Document::default(), mode, &PageConfig::default());
        let registry = page.registry().clone();

        for shape in &shapes {
            page.set_document(document(shape));
            prop_assert_eq!(page.active_observations(), shape.containers + shape.grids);
            prop_assert_eq!(registry.active_regions(), shape.containers + shape.grids);
            prop_assert_eq!(page.active_timers().len(), shape.sliders);
        }

        drop(page);
        prop_assert_eq!(registry.active_regions(), 0);
    }

    #[test]
    fn ticking_never_outlives_unmount(ms in 1u64..20_000) {
        let shape = Shape { containers: 1, grids: 1, sliders: 2, still_sliders: 1 };
        let mut page = Page::new(document(&shape), RenderMode::Runtime, &PageConfig::default());
        page.unmount();
        prop_assert_eq!(page.tick(ms), 0);
        prop_assert_eq!(page.registry().active_regions(), 0);
    }
}
