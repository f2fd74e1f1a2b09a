// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Render walk over the tree, and the drawing contracts it consumes.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::Tree;
use crate::element::ElementKind;
use crate::error::OverlayError;
use crate::panel::PanelStyle;
use crate::types::{Bounds, Color, ElementFlags, ElementId};
use crate::window::Window;

/// Host-defined font handle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct FontId(pub u32);

/// Drawing surface supplied by the host.
///
/// The tree never owns pixels; it only issues these primitives during
/// [`Tree::render`].
pub trait Surface {
    /// Fill `bounds` with `color`.
    fn fill_rect(&mut self, bounds: Bounds, color: Color);
    /// Draw a one-pixel outline just inside `bounds`.
    fn draw_outline(&mut self, bounds: Bounds, color: Color);
    /// Draw a drop shadow behind `bounds`.
    fn draw_shadow(&mut self, bounds: Bounds);
    /// Draw a single line of text with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, font: FontId, x: i32, y: i32, color: Color);
    /// Advance width of `text` in pixels.
    fn measure_text(&self, text: &str, font: FontId) -> i32;
    /// Break `text` into lines no wider than `max_width`.
    fn wrap_text(&self, text: &str, font: FontId, max_width: i32) -> Vec<String>;
}

/// Per-element paint strategy.
pub trait Paint {
    /// Paint `id` before its children.
    fn render(&self, tree: &Tree, id: ElementId, surface: &mut dyn Surface);

    /// Paint `id` after its children.
    fn post_render(&self, tree: &Tree, id: ElementId, surface: &mut dyn Surface) {
        let _ = (tree, id, surface);
    }
}

impl<F> Paint for F
where
    F: Fn(&Tree, ElementId, &mut dyn Surface),
{
    fn render(&self, tree: &Tree, id: ElementId, surface: &mut dyn Surface) {
        self(tree, id, surface);
    }
}

/// Independently owned layer drawn on top of the tree each frame.
///
/// Overlays are isolated from each other and from the tree: a failing overlay
/// is logged and skipped while the rest of the frame is drawn.
pub trait Overlay {
    /// Name used when reporting failures.
    fn name(&self) -> &str;
    /// Draw the overlay.
    fn render(&mut self, surface: &mut dyn Surface) -> Result<(), OverlayError>;
}

/// Summary of one [`Tree::render`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Elements painted (visible and attached).
    pub painted: usize,
    /// Overlays that returned an error or panicked.
    pub overlay_failures: usize,
}

/// Font used for window titles.
pub const TITLE_FONT: FontId = FontId(0);

const ELLIPSIS: &str = "...";

/// Longest prefix of `text` that fits in `max_width`, with an ellipsis if cut.
pub fn truncate_to_width(
    surface: &dyn Surface,
    text: &str,
    font: FontId,
    max_width: i32,
) -> String {
    if surface.measure_text(text, font) <= max_width {
        return String::from(text);
    }
    let budget = max_width.saturating_sub(surface.measure_text(ELLIPSIS, font));
    let mut cut = 0;
    for (i, c) in text.char_indices() {
        let end = i + c.len_utf8();
        if surface.measure_text(&text[..end], font) > budget {
            break;
        }
        cut = end;
    }
    if cut == 0 && budget < 0 {
        return String::new();
    }
    let mut out = String::from(&text[..cut]);
    out.push_str(ELLIPSIS);
    out
}

impl Tree {
    /// Register an overlay drawn after the tree, in registration order.
    pub fn add_overlay(&mut self, overlay: impl Overlay + 'static) {
        self.overlays.push(Box::new(overlay));
    }

    /// Paint every attached, visible element and then every overlay.
    ///
    /// Roots are painted back to front and children in insertion order, so
    /// later elements land on top. Hidden elements skip their whole subtree.
    pub fn render(&mut self, surface: &mut dyn Surface) -> FrameStats {
        let mut stats = FrameStats::default();
        for &root in self.roots() {
            stats.painted += self.render_element(root, surface);
        }
        let mut overlays = core::mem::take(&mut self.overlays);
        for overlay in &mut overlays {
            if let Err(err) = render_overlay(overlay.as_mut(), surface) {
                log::error!("overlay `{}` failed: {err}", overlay.name());
                stats.overlay_failures += 1;
            }
        }
        overlays.append(&mut self.overlays);
        self.overlays = overlays;
        stats
    }

    fn render_element(&self, id: ElementId, surface: &mut dyn Surface) -> usize {
        let Some(element) = self.element(id) else {
            return 0;
        };
        if !element.flags().contains(ElementFlags::VISIBLE) {
            return 0;
        }
        let bounds = element.bounds();
        match element.kind() {
            ElementKind::Plain => {}
            ElementKind::Panel(panel) => {
                if let PanelStyle::Paintable {
                    background,
                    outline,
                } = panel.style
                {
                    surface.fill_rect(bounds, background);
                    if let Some(outline) = outline {
                        surface.draw_outline(bounds, outline);
                    }
                }
            }
            ElementKind::Window(window) => paint_window(window, bounds, surface),
        }
        if let Some(painter) = &element.painter {
            painter.render(self, id, surface);
        }
        let mut painted = 1;
        for &child in self.children(id) {
            painted += self.render_element(child, surface);
        }
        if let Some(painter) = &element.painter {
            painter.post_render(self, id, surface);
        }
        painted
    }
}

fn paint_window(window: &Window, bounds: Bounds, surface: &mut dyn Surface) {
    surface.draw_shadow(bounds);
    surface.fill_rect(bounds, window.background());
    let bar = window.title_bar(bounds);
    if bar.height <= 0 {
        return;
    }
    surface.fill_rect(bar, window.title_bar_color);
    let text_width = bar
        .width
        .saturating_sub(bar.height.saturating_mul(2))
        .saturating_sub(6);
    if text_width > 0 {
        let title = truncate_to_width(surface, window.title(), TITLE_FONT, text_width);
        surface.draw_text(
            &title,
            TITLE_FONT,
            bar.x.saturating_add(3),
            bar.y.saturating_add(2),
            Color::WHITE,
        );
    }
    surface.draw_outline(window.maximize_box(bounds).inset(2), Color::WHITE);
    surface.draw_outline(window.close_box(bounds).inset(2), Color::WHITE);
}

#[cfg(feature = "std")]
fn render_overlay(
    overlay: &mut dyn Overlay,
    surface: &mut dyn Surface,
) -> Result<(), OverlayError> {
    use std::panic::{AssertUnwindSafe, catch_unwind};

    match catch_unwind(AssertUnwindSafe(|| overlay.render(surface))) {
        Ok(result) => result,
        Err(payload) => {
            let msg = payload
                .downcast_ref::<&str>()
                .map(|s| String::from(*s))
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| String::from("panic"));
            Err(OverlayError(alloc::format!("panicked: {msg}")))
        }
    }
}

#[cfg(not(feature = "std"))]
fn render_overlay(
    overlay: &mut dyn Overlay,
    surface: &mut dyn Surface,
) -> Result<(), OverlayError> {
    overlay.render(surface)
}
