//! Benchmarks for page rendering.
//!
//! Run with: cargo bench -p pagecraft-widgets

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pagecraft_core::{Component, ComponentKind, RenderMode, SelectionState};
use pagecraft_layout::{ColumnBreakpoints, FixedViewport};
use pagecraft_widgets::PageRenderer;
use std::hint::black_box;

fn text(id: String) -> Component {
    Component::new(id.clone(), ComponentKind::Text).with_content(format!("<p>{id}</p>"))
}

/// `sections` sections, each holding a 3-column container and a hero grid.
fn page(sections: usize) -> Vec<Component> {
    (0..sections)
        .map(|s| {
            let columns = Component::new(format!("c{s}"), ComponentKind::Container)
                .with_prop("columns", 3)
                .with_children((0..3).map(|i| text(format!("c{s}-{i}"))));
            let grid = Component::new(format!("g{s}"), ComponentKind::Grid)
                .with_prop("layout", "2x3-hero")
                .with_cell(0, 0, text(format!("g{s}-top")))
                .with_cell(1, 1, text(format!("g{s}-mid")));
            Component::new(format!("s{s}"), ComponentKind::Section)
                .with_children([columns, grid])
        })
        .collect()
}

// ============================================================================
// Render passes
// ============================================================================

fn bench_render_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/page");
    let viewport = FixedViewport::new(1280, ColumnBreakpoints::DEFAULT);

    for sections in [1, 10, 50] {
        let nodes = page(sections);

        group.bench_with_input(BenchmarkId::new("runtime", sections), &nodes, |b, nodes| {
            b.iter(|| {
                let frame = PageRenderer::new(RenderMode::Runtime)
                    .columns(&viewport)
                    .render(nodes);
                black_box(frame);
            })
        });

        group.bench_with_input(BenchmarkId::new("editor", sections), &nodes, |b, nodes| {
            b.iter(|| {
                let frame = PageRenderer::new(RenderMode::Editor)
                    .columns(&viewport)
                    .selection(SelectionState::selected("c0-1"))
                    .render(nodes);
                black_box(frame);
            })
        });
    }

    group.finish();
}

fn bench_html_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("render/html");

    for sections in [10, 50] {
        let frame = PageRenderer::new(RenderMode::Editor).render(&page(sections));
        group.bench_with_input(BenchmarkId::new("to_html", sections), &frame, |b, frame| {
            b.iter(|| black_box(frame.to_html()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render_pass, bench_html_output);
criterion_main!(benches);
