// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll panels.
//!
//! A panel owns a scroll fraction and keeps its children's aggregate content
//! placed where that fraction says. Direct manipulation goes through
//! [`Tree::scroll_by`], which moves content first and then lets the fraction
//! catch up:
//!
//! 1. Move every child by the requested delta.
//! 2. Derive the fraction from where the content ended up (clamped).
//! 3. Move by the correction between the ideal placement for that fraction and
//!    the actual one.
//!
//! Overscroll past either end therefore lands exactly on the extreme within the
//! same call.

use arbor_property::filters::{clamp, clamp_vec2};
use arbor_property::{Hooks, Property, Writer, writer};
use kurbo::Vec2;

use crate::Tree;
use crate::element::ElementKind;
use crate::error::TreeError;
use crate::scroll;
use crate::types::{Color, ElementId};

/// How a panel paints itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PanelStyle {
    /// Draws nothing; only its children are visible.
    #[default]
    Transparent,
    /// Fills its bounds and optionally outlines them.
    Paintable {
        /// Fill color.
        background: Color,
        /// Outline color, if any.
        outline: Option<Color>,
    },
}

/// Scroll state of a panel element.
#[derive(Debug)]
pub struct Panel {
    /// Paint style.
    pub style: PanelStyle,
    pub(crate) scroll: Property<Vec2>,
    pub(crate) padding: Property<i32>,
    pub(crate) sensitivity: Property<i32>,
}

impl Default for Panel {
    fn default() -> Self {
        Self::new(PanelStyle::Transparent)
    }
}

impl Panel {
    /// Pixels moved per wheel notch or arrow key unless configured otherwise.
    pub const DEFAULT_SENSITIVITY: i32 = 10;

    /// A panel scrolled to the start, with no padding.
    pub fn new(style: PanelStyle) -> Self {
        let mut scroll = Property::new("scroll", Vec2::ZERO);
        scroll.add_filter(clamp_vec2(0.0, 1.0));
        let mut padding = Property::new("padding", 0);
        padding.add_filter(clamp(0, i32::MAX));
        let mut sensitivity = Property::new("sensitivity", Self::DEFAULT_SENSITIVITY);
        sensitivity.add_filter(clamp(1, i32::MAX));
        Self {
            style,
            scroll,
            padding,
            sensitivity,
        }
    }

    /// Set the initial padding.
    pub fn with_padding(mut self, padding: i32) -> Self {
        self.padding.set(padding, writer!());
        self
    }

    /// Set the initial sensitivity.
    pub fn with_sensitivity(mut self, sensitivity: i32) -> Self {
        self.sensitivity.set(sensitivity, writer!());
        self
    }

    /// Current scroll fraction, each axis in `[0, 1]`.
    pub fn scroll(&self) -> Vec2 {
        *self.scroll.get()
    }

    /// Inset applied on every side of the viewport.
    pub fn padding(&self) -> i32 {
        *self.padding.get()
    }

    /// Wheel/key step in pixels.
    pub fn sensitivity(&self) -> i32 {
        *self.sensitivity.get()
    }

    /// Read access to the scroll property.
    pub fn scroll_property(&self) -> &Property<Vec2> {
        &self.scroll
    }
}

/// Registration handles for a panel's properties.
///
/// A filter that changes the stored scroll fraction or padding re-settles the
/// panel's content immediately.
#[derive(Debug)]
pub struct PanelHooks<'a> {
    tree: &'a mut Tree,
    id: ElementId,
}

impl PanelHooks<'_> {
    /// Register filters or listeners on the scroll fraction.
    pub fn scroll(&mut self, register: impl FnOnce(&mut Hooks<'_, Vec2>)) -> &mut Self {
        self.register(|p| &mut p.scroll, register)
    }

    /// Register filters or listeners on the padding.
    pub fn padding(&mut self, register: impl FnOnce(&mut Hooks<'_, i32>)) -> &mut Self {
        self.register(|p| &mut p.padding, register)
    }

    /// Register filters or listeners on the sensitivity.
    pub fn sensitivity(&mut self, register: impl FnOnce(&mut Hooks<'_, i32>)) -> &mut Self {
        self.register(|p| &mut p.sensitivity, register)
    }

    fn register<T: PartialEq + Clone>(
        &mut self,
        field: fn(&mut Panel) -> &mut Property<T>,
        register: impl FnOnce(&mut Hooks<'_, T>),
    ) -> &mut Self {
        let id = self.id;
        let changed = self.tree.panel_mut(id).is_ok_and(|panel| {
            let property = field(panel);
            let old = property.get().clone();
            register(&mut property.hooks());
            *property.get() != old
        });
        if changed && let Err(err) = self.tree.settle(id) {
            log::warn!("settling {id:?} after filter registration failed: {err}");
        }
        self
    }
}

impl Tree {
    /// Panel state of `id`, if it is a live panel.
    pub fn panel(&self, id: ElementId) -> Option<&Panel> {
        match &self.element(id)?.kind {
            ElementKind::Panel(p) => Some(p),
            _ => None,
        }
    }

    fn panel_mut(&mut self, id: ElementId) -> Result<&mut Panel, TreeError> {
        match &mut self.node_mut(id)?.element.kind {
            ElementKind::Panel(p) => Ok(p),
            _ => Err(TreeError::WrongKind {
                id,
                expected: "panel",
            }),
        }
    }

    /// Registration handles for `id`'s scroll, padding and sensitivity.
    pub fn panel_hooks(&mut self, id: ElementId) -> Result<PanelHooks<'_>, TreeError> {
        self.panel_mut(id)?;
        Ok(PanelHooks { tree: self, id })
    }

    /// Scrollable distance of panel `id` along each axis.
    pub fn scroll_extent(&self, id: ElementId) -> Option<(i32, i32)> {
        let panel = self.panel(id)?;
        Some(scroll::max_scroll(
            self.bounds(id)?,
            self.content_bounds(id)?,
            panel.padding(),
        ))
    }

    /// Write the scroll fraction of panel `id` and place its content to match.
    ///
    /// The fraction is clamped to `[0, 1]` per axis, and stays at 0 on an axis
    /// with nothing to scroll. Returns whether the stored fraction changed;
    /// content is re-settled either way.
    pub fn set_scroll(
        &mut self,
        id: ElementId,
        fraction: Vec2,
        writer: Writer,
    ) -> Result<bool, TreeError> {
        let panel = self.panel_mut(id)?;
        let before = panel.scroll();
        panel.scroll.set(fraction, writer);
        self.settle(id)?;
        Ok(self.panel_mut(id)?.scroll() != before)
    }

    /// Move the content of panel `id` by `(dx, dy)` pixels and resync the fraction.
    ///
    /// Positive deltas move content right/down, towards the start of the
    /// scroll range. Movement past either end is corrected back to the extreme.
    pub fn scroll_by(&mut self, id: ElementId, dx: i32, dy: i32) -> Result<(), TreeError> {
        let padding = self.panel_mut(id)?.padding();
        if dx == 0 && dy == 0 {
            return Ok(());
        }
        self.move_children(id, dx, dy)?;
        let viewport = self.node(id)?.element.bounds();
        let Some(content) = self.content_bounds(id) else {
            return Ok(());
        };
        let fraction = scroll::fraction_from_position(viewport, content, padding);
        self.panel_mut(id)?.scroll.set(fraction, writer!());
        self.settle(id)
    }

    /// Move the content of panel `id` to the ideal placement for its fraction.
    ///
    /// An axis with nothing to scroll has its fraction pinned back to 0.
    pub fn settle(&mut self, id: ElementId) -> Result<(), TreeError> {
        let padding = self.panel_mut(id)?.padding();
        let viewport = self.node(id)?.element.bounds();
        let Some(content) = self.content_bounds(id) else {
            return Ok(());
        };
        let (max_x, max_y) = scroll::max_scroll(viewport, content, padding);
        let panel = self.panel_mut(id)?;
        let mut fraction = panel.scroll();
        if max_x == 0 {
            fraction.x = 0.0;
        }
        if max_y == 0 {
            fraction.y = 0.0;
        }
        panel.scroll.set(fraction, writer!());
        let fraction = panel.scroll();
        if self.children(id).is_empty() {
            return Ok(());
        }
        let (x, y) = scroll::position_from_fraction(viewport, content, fraction, padding);
        let (dx, dy) = (x.saturating_sub(content.x), y.saturating_sub(content.y));
        if dx != 0 || dy != 0 {
            log::trace!("settling {id:?} by ({dx}, {dy})");
            self.move_children(id, dx, dy)?;
        }
        Ok(())
    }

    /// Write the padding of panel `id` (negative values clamp to 0) and re-settle.
    pub fn set_padding(
        &mut self,
        id: ElementId,
        padding: i32,
        writer: Writer,
    ) -> Result<bool, TreeError> {
        let changed = self.panel_mut(id)?.padding.set(padding, writer);
        if changed {
            self.settle(id)?;
        }
        Ok(changed)
    }

    /// Write the sensitivity of panel `id` (values below 1 clamp to 1).
    pub fn set_sensitivity(
        &mut self,
        id: ElementId,
        sensitivity: i32,
        writer: Writer,
    ) -> Result<bool, TreeError> {
        Ok(self.panel_mut(id)?.sensitivity.set(sensitivity, writer))
    }

    /// Change the paint style of panel `id`.
    pub fn set_panel_style(&mut self, id: ElementId, style: PanelStyle) -> Result<(), TreeError> {
        self.panel_mut(id)?.style = style;
        Ok(())
    }
}
