// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_responder::{Dispatcher, InputContext, InputEvent, MouseButton, Outcome};
use arbor_tree::{Bounds, Element, ElementId, Tree, Window};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Vec2};

/// A desktop with `n` cascading windows, each holding a grid of plain cells.
fn desktop(n: i32) -> (Tree, Vec<ElementId>) {
    let mut tree = Tree::new();
    let desk = tree
        .insert(None, Element::new(Bounds::new(0, 0, 1920, 1080)))
        .unwrap();
    let mut windows = Vec::new();
    for i in 0..n {
        let origin = (20 + i * 15, 20 + i * 15);
        let win = tree
            .insert(
                Some(desk),
                Element::window(Bounds::new(origin.0, origin.1, 400, 300), Window::new("w")),
            )
            .unwrap();
        for y in 0..10 {
            for x in 0..10 {
                tree.insert(
                    Some(win),
                    Element::new(Bounds::new(origin.0 + x * 40, origin.1 + 20 + y * 28, 40, 28)),
                )
                .unwrap();
            }
        }
        windows.push(win);
    }
    (tree, windows)
}

fn bench_hits(c: &mut Criterion) {
    let (tree, _) = desktop(32);
    c.bench_function("hits_at_32_windows", |b| {
        b.iter(|| black_box(tree.hits_at(black_box(Point::new(300.0, 300.0)))).len());
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let (mut tree, windows) = desktop(32);
    let mut d = Dispatcher::new();
    for w in &windows {
        d.set_handler(*w, |_: &mut Tree, _: &InputContext| Outcome::Continue);
    }
    c.bench_function("press_drag_release", |b| {
        b.iter(|| {
            let press = InputEvent::MousePress {
                button: MouseButton::Left,
                position: Point::new(500.0, 500.0),
            };
            d.dispatch(&mut tree, press);
            for _ in 0..8 {
                d.pointer_moved(&mut tree, Point::new(500.0, 500.0), Vec2::new(0.25, 0.0));
            }
            let release = InputEvent::MouseRelease {
                button: MouseButton::Left,
                position: Point::new(500.0, 500.0),
            };
            black_box(d.dispatch(&mut tree, release))
        });
    });
    c.bench_function("pointer_hover_sweep", |b| {
        b.iter(|| {
            for x in (0..1_000).step_by(25) {
                let pos = Point::new(f64::from(x), 200.0);
                black_box(d.pointer_moved(&mut tree, pos, Vec2::ZERO));
            }
        });
    });
}

criterion_group!(benches, bench_hits, bench_dispatch);
criterion_main!(benches);
