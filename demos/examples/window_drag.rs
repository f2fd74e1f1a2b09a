// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dragging, maximizing and closing a window.
//!
//! A desktop holds two overlapping windows. The demo presses on the title bar
//! of the back window (raising it), drags it past the desktop edge, then
//! maximizes, restores and closes it, rendering after each step.
//!
//! Run:
//! - `cargo run -p arbor_demos --example window_drag`

use arbor_demos::{LogSurface, init_logging};
use arbor_responder::{Dispatcher, InputEvent, MouseButton};
use arbor_tree::{Bounds, CloseOperation, Element, Tree, TreeError, Window};
use kurbo::{Point, Vec2};

fn press(d: &mut Dispatcher, tree: &mut Tree, x: f64, y: f64) {
    let event = InputEvent::MousePress {
        button: MouseButton::Left,
        position: Point::new(x, y),
    };
    let outcome = d.dispatch(tree, event);
    log::info!("press at ({x}, {y}) -> {outcome:?}");
}

fn release(d: &mut Dispatcher, tree: &mut Tree) {
    let event = InputEvent::MouseRelease {
        button: MouseButton::Left,
        position: d.pointer(),
    };
    d.dispatch(tree, event);
}

fn main() -> Result<(), TreeError> {
    init_logging();
    let mut tree = Tree::new();
    let mut surface = LogSurface::default();
    let desk = tree.insert(None, Element::new(Bounds::new(0, 0, 320, 200)))?;
    let back = tree.insert(
        Some(desk),
        Element::window(
            Bounds::new(10, 10, 160, 100),
            Window::new("Back").with_close_operation(CloseOperation::Dispose),
        ),
    )?;
    let front = tree.insert(
        Some(desk),
        Element::window(Bounds::new(60, 40, 160, 100), Window::new("Front")),
    )?;
    tree.insert(Some(back), Element::new(Bounds::new(20, 30, 40, 20)))?;

    let mut d = Dispatcher::new();
    let stats = tree.render(&mut surface);
    log::info!("initial frame: {stats:?}, {} calls", surface.take_calls());

    // Title bar of the back window, clear of the front one.
    press(&mut d, &mut tree, 30.0, 14.0);
    log::info!("z-order now {:?}", tree.children(desk));
    let mut pointer = d.pointer();
    for _ in 0..40 {
        pointer += Vec2::new(5.5, 3.25);
        d.pointer_moved(&mut tree, pointer, Vec2::new(5.5, 3.25));
    }
    release(&mut d, &mut tree);
    log::info!("back window dropped at {:?}", tree.bounds(back));

    let maximize = tree
        .window(back)
        .zip(tree.bounds(back))
        .map(|(w, b)| w.maximize_box(b))
        .unwrap_or_default();
    let (x, y) = (f64::from(maximize.x + 1), f64::from(maximize.y + 1));
    press(&mut d, &mut tree, x, y);
    release(&mut d, &mut tree);
    log::info!("maximized: {:?}", tree.bounds(back));
    tree.render(&mut surface);
    log::info!("maximized frame: {} calls", surface.take_calls());

    tree.toggle_maximized(back, arbor_property::writer!())?;
    log::info!("restored: {:?}", tree.bounds(back));

    let op = tree.close(back)?;
    let alive = tree.is_alive(back);
    log::info!("closed back window with {op:?}, alive: {alive}");
    d.prune(&tree);
    log::info!("front window still at {:?}", tree.bounds(front));
    let stats = tree.render(&mut surface);
    log::info!("final frame: {stats:?}");
    Ok(())
}
