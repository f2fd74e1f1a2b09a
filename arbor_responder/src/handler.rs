// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input handlers and the built-in behavior of windows and panels.

use arbor_property::writer;
use arbor_tree::{ElementId, ElementKind, Tree, TreeError, WindowPart};
use kurbo::Vec2;

use crate::types::{InputContext, InputEvent, Key, MouseButton, Outcome, Phase};

/// Per-element input callback.
///
/// Handlers get the whole tree so they can react by editing it. Returning
/// [`Outcome::Handled`] stops routing.
pub trait InputHandler {
    /// Offer one event.
    fn input(&mut self, tree: &mut Tree, cx: &InputContext) -> Outcome;
}

impl<F> InputHandler for F
where
    F: FnMut(&mut Tree, &InputContext) -> Outcome,
{
    fn input(&mut self, tree: &mut Tree, cx: &InputContext) -> Outcome {
        self(tree, cx)
    }
}

/// Kind-specific behavior, offered in the main phase after any custom handler.
pub(crate) fn builtin(tree: &mut Tree, cx: &InputContext) -> Result<Outcome, TreeError> {
    if cx.phase != Phase::Main {
        return Ok(Outcome::Continue);
    }
    match tree.element(cx.element).map(|e| e.kind()) {
        Some(ElementKind::Window(_)) => window_input(tree, cx),
        Some(ElementKind::Panel(_)) => panel_input(tree, cx),
        Some(ElementKind::Plain) | None => Ok(Outcome::Continue),
    }
}

fn window_input(tree: &mut Tree, cx: &InputContext) -> Result<Outcome, TreeError> {
    let id = cx.element;
    let Some(window) = tree.window(id) else {
        return Ok(Outcome::Continue);
    };
    match cx.event {
        InputEvent::MousePress {
            button: MouseButton::Left,
            position,
        } => {
            let bounds = tree.bounds(id).ok_or(TreeError::Stale(id))?;
            let part = window.part(bounds, position);
            tree.bring_to_front(id)?;
            match part {
                Some(WindowPart::CloseBox) => {
                    tree.close(id)?;
                }
                Some(WindowPart::MaximizeBox) => {
                    tree.toggle_maximized(id, writer!())?;
                }
                Some(WindowPart::TitleBar) => {
                    tree.begin_title_drag(id)?;
                }
                Some(WindowPart::Body) | None => {}
            }
            Ok(Outcome::Handled)
        }
        InputEvent::MouseDrag { .. } if window.is_title_dragging() => {
            let (dx, dy) = cx.drag;
            tree.drag_title(id, dx, dy)?;
            Ok(Outcome::Handled)
        }
        InputEvent::MouseRelease { .. } if window.is_title_dragging() => {
            tree.end_title_drag(id)?;
            Ok(Outcome::Handled)
        }
        _ => Ok(Outcome::Continue),
    }
}

fn panel_input(tree: &mut Tree, cx: &InputContext) -> Result<Outcome, TreeError> {
    let id = cx.element;
    let (Some(panel), Some((max_x, max_y)), Some(bounds)) =
        (tree.panel(id), tree.scroll_extent(id), tree.bounds(id))
    else {
        return Ok(Outcome::Continue);
    };
    let step = panel.sensitivity();
    let page = bounds
        .height
        .saturating_sub(panel.padding().saturating_mul(2))
        .max(step);
    let fraction = panel.scroll();
    let (can_x, can_y) = (max_x > 0, max_y > 0);

    let handled = match cx.event {
        InputEvent::MouseScroll { delta, .. } => {
            let (dx, dy) = wheel_step(delta, step);
            let dx = if can_x { dx } else { 0 };
            let dy = if can_y { dy } else { 0 };
            scroll(tree, id, dx, dy)?
        }
        InputEvent::KeyPress { key, .. } => match key {
            Key::Up if can_y => scroll(tree, id, 0, step)?,
            Key::Down if can_y => scroll(tree, id, 0, -step)?,
            Key::Left if can_x => scroll(tree, id, step, 0)?,
            Key::Right if can_x => scroll(tree, id, -step, 0)?,
            Key::PageUp if can_y => scroll(tree, id, 0, page)?,
            Key::PageDown if can_y => scroll(tree, id, 0, -page)?,
            Key::Home if can_y => {
                tree.set_scroll(id, Vec2::new(fraction.x, 0.0), writer!())?;
                true
            }
            Key::End if can_y => {
                tree.set_scroll(id, Vec2::new(fraction.x, 1.0), writer!())?;
                true
            }
            _ => false,
        },
        InputEvent::MousePress {
            button: MouseButton::Left,
            ..
        } => can_x || can_y,
        InputEvent::MouseDrag { .. } => {
            let (dx, dy) = cx.drag;
            tree.scroll_by(id, dx, dy)?;
            true
        }
        InputEvent::MouseRelease { .. } => tree.is_dragging(id),
        _ => false,
    };
    Ok(if handled {
        Outcome::Handled
    } else {
        Outcome::Continue
    })
}

fn scroll(tree: &mut Tree, id: ElementId, dx: i32, dy: i32) -> Result<bool, TreeError> {
    if dx == 0 && dy == 0 {
        return Ok(false);
    }
    tree.scroll_by(id, dx, dy)?;
    Ok(true)
}

/// Wheel notches to pixels. Positive notches move content towards the start.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Wheel deltas are small; `as` saturates otherwise."
)]
fn wheel_step(delta: Vec2, step: i32) -> (i32, i32) {
    let step = f64::from(step);
    ((delta.x * step) as i32, (delta.y * step) as i32)
}
