// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_property::writer;
use arbor_tree::scroll::{fraction_from_position, position_from_fraction};
use arbor_tree::{Bounds, Element, ElementId, Panel, Tree};
use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Vec2;

/// A panel holding `rows` stacked 20 px rows, each with one nested label.
fn list_panel(rows: i32) -> (Tree, ElementId) {
    let mut tree = Tree::new();
    let panel = tree
        .insert(
            None,
            Element::panel(
                Bounds::new(0, 0, 300, 400),
                Panel::default().with_padding(4),
            ),
        )
        .unwrap();
    for i in 0..rows {
        let row = tree
            .insert(
                Some(panel),
                Element::new(Bounds::new(4, 4 + i * 20, 292, 20)),
            )
            .unwrap();
        tree.insert(Some(row), Element::new(Bounds::new(8, 6 + i * 20, 100, 16)))
            .unwrap();
    }
    (tree, panel)
}

fn bench_math(c: &mut Criterion) {
    let viewport = Bounds::new(0, 0, 300, 400);
    let mut group = c.benchmark_group("scroll_math");
    group.throughput(Throughput::Elements(1_000));
    group.bench_function("round_trip_1k", |b| {
        b.iter(|| {
            let mut acc = 0;
            for i in 0..1_000 {
                let content = Bounds::new(4, 4 - i, 292, 5_000);
                let s = fraction_from_position(black_box(viewport), content, 4);
                acc += position_from_fraction(viewport, content, s, 4).1;
            }
            black_box(acc)
        });
    });
    group.finish();
}

fn bench_panel(c: &mut Criterion) {
    let mut group = c.benchmark_group("panel");
    for rows in [100, 1_000] {
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_function(format!("scroll_by_{rows}_rows"), |b| {
            b.iter_batched(
                || list_panel(rows),
                |(mut tree, panel)| {
                    for _ in 0..10 {
                        tree.scroll_by(panel, 0, black_box(-37)).unwrap();
                    }
                    tree
                },
                BatchSize::LargeInput,
            );
        });
        group.bench_function(format!("set_scroll_{rows}_rows"), |b| {
            b.iter_batched(
                || list_panel(rows),
                |(mut tree, panel)| {
                    tree.set_scroll(panel, Vec2::new(0.0, black_box(0.5)), writer!())
                        .unwrap();
                    tree
                },
                BatchSize::LargeInput,
            );
        });
    }
    group.finish();
}

criterion_group!(benches, bench_math, bench_panel);
criterion_main!(benches);
