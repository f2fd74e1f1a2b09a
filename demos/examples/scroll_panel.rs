// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scrolling list panel configured from JSON settings.
//!
//! The panel is built from a settings document, filled with rows, and then
//! scrolled with the wheel, the keyboard and a content drag. A listener on the
//! scroll property reports every change along with who made it.
//!
//! Run:
//! - `cargo run -p arbor_demos --example scroll_panel`

use arbor_config::Settings;
use arbor_demos::{LogSurface, init_logging};
use arbor_responder::{Dispatcher, InputEvent, Key, Modifiers, MouseButton};
use arbor_tree::{Bounds, Element, ElementFlags, Tree};
use kurbo::{Point, Vec2};

const SETTINGS: &str = r##"{
    "panel": { "padding": 4, "sensitivity": 12, "background": "#303030", "outline": "#808080" }
}"##;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();
    let settings = Settings::from_json_str(SETTINGS)?;

    let mut tree = Tree::new();
    let panel = tree.insert(
        None,
        Element::panel(Bounds::new(0, 0, 200, 120), settings.build_panel()).with_flags(
            ElementFlags::VISIBLE | ElementFlags::FOCUSABLE | ElementFlags::HOVERABLE,
        ),
    )?;
    for i in 0..20 {
        let row = Bounds::new(4, 4 + i * 18, 192, 18);
        tree.insert(Some(panel), Element::new(row))?;
    }
    tree.panel_hooks(panel)?.scroll(|h| {
        h.add_listener(|change| {
            log::info!(
                "scroll {:?} -> {:?} (by {})",
                change.old,
                change.new,
                change.writer.0
            );
        });
    });
    log::info!("scroll extent {:?}", tree.scroll_extent(panel));

    let mut d = Dispatcher::new();
    let inside = Point::new(100.0, 60.0);

    // Pressing focuses the panel so it can take keys.
    let press = InputEvent::MousePress {
        button: MouseButton::Left,
        position: inside,
    };
    d.dispatch(&mut tree, press);
    let above = Point::new(100.0, 20.0);
    d.pointer_moved(&mut tree, above, Vec2::new(0.0, -40.0));
    let release = InputEvent::MouseRelease {
        button: MouseButton::Left,
        position: above,
    };
    d.dispatch(&mut tree, release);

    let wheel = InputEvent::MouseScroll {
        position: inside,
        delta: Vec2::new(0.0, -3.0),
    };
    d.dispatch(&mut tree, wheel);
    for key in [Key::PageDown, Key::Down, Key::End, Key::Home] {
        let modifiers = Modifiers::empty();
        d.dispatch(&mut tree, InputEvent::KeyPress { key, modifiers });
    }

    let mut surface = LogSurface::default();
    let stats = tree.render(&mut surface);
    let first_row = tree.children(panel).first().and_then(|&row| tree.bounds(row));
    log::info!("frame: {stats:?}, first row at {first_row:?}");
    Ok(())
}
