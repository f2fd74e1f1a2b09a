// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Windows: title-bar dragging, maximize/restore, and close policies.

use alloc::string::String;

use arbor_property::{Hooks, Property, Writer, writer};
use kurbo::Point;

use crate::Tree;
use crate::element::ElementKind;
use crate::error::TreeError;
use crate::types::{Bounds, Color, ElementId};

/// What closing a window does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CloseOperation {
    /// Nothing.
    DoNothing,
    /// Clear the visible flag; the window stays attached and can be shown again.
    #[default]
    Hide,
    /// Remove the window and its subtree from the tree.
    Dispose,
    /// Ask the host to close its top-level surface.
    ///
    /// The request is raised on the tree and collected with
    /// [`Tree::take_close_request`].
    CloseHostSurface,
}

/// Region of a window under a point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WindowPart {
    /// The close box at the right end of the title bar.
    CloseBox,
    /// The maximize box, left of the close box.
    MaximizeBox,
    /// The rest of the title bar; pressing here starts a drag.
    TitleBar,
    /// Everything below the title bar.
    Body,
}

/// Window state.
#[derive(Debug)]
pub struct Window {
    pub(crate) title: Property<String>,
    pub(crate) close_operation: Property<CloseOperation>,
    pub(crate) maximized: Property<bool>,
    pub(crate) background: Property<Color>,
    /// Height of the title bar in pixels. Also the size of the title-bar boxes.
    pub title_bar_height: i32,
    /// Title bar fill.
    pub title_bar_color: Color,
    pub(crate) restored_bounds: Option<Bounds>,
    pub(crate) title_drag: bool,
}

impl Window {
    /// Default title bar height.
    pub const DEFAULT_TITLE_BAR_HEIGHT: i32 = 14;
    /// Default body fill.
    pub const DEFAULT_BACKGROUND: Color = Color(0xFF_20_20_24);
    /// Default title bar fill.
    pub const DEFAULT_TITLE_BAR_COLOR: Color = Color(0xFF_3A_3F_4B);

    /// A restored window that hides on close.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Property::new("title", title.into()),
            close_operation: Property::new("close_operation", CloseOperation::default()),
            maximized: Property::new("maximized", false),
            background: Property::new("background", Self::DEFAULT_BACKGROUND),
            title_bar_height: Self::DEFAULT_TITLE_BAR_HEIGHT,
            title_bar_color: Self::DEFAULT_TITLE_BAR_COLOR,
            restored_bounds: None,
            title_drag: false,
        }
    }

    /// Set the close operation.
    pub fn with_close_operation(mut self, op: CloseOperation) -> Self {
        self.close_operation.set(op, writer!());
        self
    }

    /// Set the body fill.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background.set(color, writer!());
        self
    }

    /// Set title bar height and fill. Negative heights clamp to zero.
    pub fn with_title_bar(mut self, height: i32, color: Color) -> Self {
        self.title_bar_height = height.max(0);
        self.title_bar_color = color;
        self
    }

    /// Title text.
    pub fn title(&self) -> &str {
        self.title.get()
    }

    /// Close policy.
    pub fn close_operation(&self) -> CloseOperation {
        *self.close_operation.get()
    }

    /// Whether the window is maximized.
    pub fn is_maximized(&self) -> bool {
        *self.maximized.get()
    }

    /// Body fill.
    pub fn background(&self) -> Color {
        *self.background.get()
    }

    /// Bounds to return to on restore. Only set while maximized.
    pub fn restored_bounds(&self) -> Option<Bounds> {
        self.restored_bounds
    }

    /// Whether a title-bar drag is in progress.
    pub fn is_title_dragging(&self) -> bool {
        self.title_drag
    }

    /// The title bar strip of a window occupying `bounds`.
    pub fn title_bar(&self, bounds: Bounds) -> Bounds {
        Bounds::new(
            bounds.x,
            bounds.y,
            bounds.width,
            self.title_bar_height.min(bounds.height),
        )
    }

    /// The close box of a window occupying `bounds`.
    pub fn close_box(&self, bounds: Bounds) -> Bounds {
        let bar = self.title_bar(bounds);
        Bounds::new(bar.right() - bar.height, bar.y, bar.height, bar.height)
    }

    /// The maximize box of a window occupying `bounds`.
    pub fn maximize_box(&self, bounds: Bounds) -> Bounds {
        let bar_height = self.title_bar(bounds).height;
        self.close_box(bounds).translate(-bar_height, 0)
    }

    /// Which part of a window occupying `bounds` lies under `pt`.
    pub fn part(&self, bounds: Bounds, pt: Point) -> Option<WindowPart> {
        if !bounds.contains(pt) {
            return None;
        }
        Some(if self.close_box(bounds).contains(pt) {
            WindowPart::CloseBox
        } else if self.maximize_box(bounds).contains(pt) {
            WindowPart::MaximizeBox
        } else if self.title_bar(bounds).contains(pt) {
            WindowPart::TitleBar
        } else {
            WindowPart::Body
        })
    }
}

/// Registration handles for a window's properties.
///
/// A filter that flips the stored maximized flag moves the window to match.
#[derive(Debug)]
pub struct WindowHooks<'a> {
    tree: &'a mut Tree,
    id: ElementId,
}

impl WindowHooks<'_> {
    /// Register filters or listeners on the title.
    pub fn title(&mut self, register: impl FnOnce(&mut Hooks<'_, String>)) -> &mut Self {
        self.register(|w| &mut w.title, register);
        self
    }

    /// Register filters or listeners on the close policy.
    pub fn close_operation(
        &mut self,
        register: impl FnOnce(&mut Hooks<'_, CloseOperation>),
    ) -> &mut Self {
        self.register(|w| &mut w.close_operation, register);
        self
    }

    /// Register filters or listeners on the maximized flag.
    pub fn maximized(&mut self, register: impl FnOnce(&mut Hooks<'_, bool>)) -> &mut Self {
        if self.register(|w| &mut w.maximized, register)
            && let Err(err) = self.tree.reflow_maximized(self.id, writer!())
        {
            log::warn!(
                "reflowing {:?} after filter registration failed: {err}",
                self.id
            );
        }
        self
    }

    /// Register filters or listeners on the body fill.
    pub fn background(&mut self, register: impl FnOnce(&mut Hooks<'_, Color>)) -> &mut Self {
        self.register(|w| &mut w.background, register);
        self
    }

    /// Run `register` and report whether it changed the stored value.
    fn register<T: PartialEq + Clone>(
        &mut self,
        field: fn(&mut Window) -> &mut Property<T>,
        register: impl FnOnce(&mut Hooks<'_, T>),
    ) -> bool {
        self.tree.window_mut(self.id).is_ok_and(|window| {
            let property = field(window);
            let old = property.get().clone();
            register(&mut property.hooks());
            *property.get() != old
        })
    }
}

/// Move `b` so it lies inside `outer` where possible.
///
/// A window larger than its parent is pinned to the parent's top-left corner.
fn clamp_into(b: Bounds, outer: Bounds) -> Bounds {
    let x = b.x.min(outer.right() - b.width).max(outer.x);
    let y = b.y.min(outer.bottom() - b.height).max(outer.y);
    b.with_position(x, y)
}

impl Tree {
    /// Window state of `id`, if it is a live window.
    pub fn window(&self, id: ElementId) -> Option<&Window> {
        match &self.element(id)?.kind {
            ElementKind::Window(w) => Some(w),
            _ => None,
        }
    }

    fn window_mut(&mut self, id: ElementId) -> Result<&mut Window, TreeError> {
        match &mut self.node_mut(id)?.element.kind {
            ElementKind::Window(w) => Ok(w),
            _ => Err(TreeError::WrongKind {
                id,
                expected: "window",
            }),
        }
    }

    /// Registration handles for `id`'s window properties.
    pub fn window_hooks(&mut self, id: ElementId) -> Result<WindowHooks<'_>, TreeError> {
        self.window_mut(id)?;
        Ok(WindowHooks { tree: self, id })
    }

    /// Write the title of window `id`.
    pub fn set_title(
        &mut self,
        id: ElementId,
        title: impl Into<String>,
        writer: Writer,
    ) -> Result<bool, TreeError> {
        Ok(self.window_mut(id)?.title.set(title.into(), writer))
    }

    /// Write the close policy of window `id`.
    pub fn set_close_operation(
        &mut self,
        id: ElementId,
        op: CloseOperation,
        writer: Writer,
    ) -> Result<bool, TreeError> {
        Ok(self.window_mut(id)?.close_operation.set(op, writer))
    }

    /// Write the body fill of window `id`.
    pub fn set_background(
        &mut self,
        id: ElementId,
        color: Color,
        writer: Writer,
    ) -> Result<bool, TreeError> {
        Ok(self.window_mut(id)?.background.set(color, writer))
    }

    /// Maximize or restore window `id`.
    ///
    /// Maximizing snapshots the current bounds and takes the parent's bounds
    /// (a window without a parent keeps its bounds). Restoring returns to the
    /// snapshot. Either transition re-lays out the window once, even when the
    /// bounds end up unchanged. Returns whether the state changed; a write
    /// rejected by a filter changes nothing.
    pub fn set_maximized(
        &mut self,
        id: ElementId,
        maximized: bool,
        writer: Writer,
    ) -> Result<bool, TreeError> {
        let w = self.window_mut(id)?;
        if w.is_maximized() == maximized {
            return Ok(false);
        }
        if !w.maximized.set(maximized, writer) {
            log::debug!("window {id:?}: maximized={maximized} rejected by a filter");
            return Ok(false);
        }
        self.reflow_maximized(id, writer)?;
        Ok(true)
    }

    /// Flip the maximized state of window `id`. Returns the resulting state.
    pub fn toggle_maximized(&mut self, id: ElementId, writer: Writer) -> Result<bool, TreeError> {
        let maximized = !self.window_mut(id)?.is_maximized();
        self.set_maximized(id, maximized, writer)?;
        Ok(self.window_mut(id)?.is_maximized())
    }

    /// Move window `id` to match its stored maximized flag.
    fn reflow_maximized(&mut self, id: ElementId, writer: Writer) -> Result<(), TreeError> {
        let current = self.node(id)?.element.bounds();
        let parent_bounds = self.parent(id).and_then(|p| self.bounds(p));
        let w = self.window_mut(id)?;
        let maximized = w.is_maximized();
        let target = if maximized {
            w.restored_bounds = Some(current);
            w.title_drag = false;
            parent_bounds.unwrap_or(current)
        } else {
            w.restored_bounds.take().unwrap_or(current)
        };
        log::debug!("{id:?} maximized={maximized}: {current:?} -> {target:?}");
        let (dx, dy) = self.apply_bounds(id, target, writer)?.unwrap_or((0, 0));
        self.relayout(id, dx, dy)
    }

    /// Close window `id` according to its close operation, which is returned.
    pub fn close(&mut self, id: ElementId) -> Result<CloseOperation, TreeError> {
        let op = self.window_mut(id)?.close_operation();
        log::debug!("closing window {id:?} with {op:?}");
        match op {
            CloseOperation::DoNothing => {}
            CloseOperation::Hide => {
                self.set_visible(id, false, writer!())?;
            }
            CloseOperation::Dispose => self.remove(id)?,
            CloseOperation::CloseHostSurface => self.request_host_close(),
        }
        Ok(op)
    }

    /// Start a title-bar drag. Maximized windows do not move; returns `false` then.
    pub fn begin_title_drag(&mut self, id: ElementId) -> Result<bool, TreeError> {
        let w = self.window_mut(id)?;
        if w.is_maximized() {
            return Ok(false);
        }
        w.title_drag = true;
        Ok(true)
    }

    /// Move window `id` by a whole-pixel drag step. Ignored outside a title drag.
    pub fn drag_title(&mut self, id: ElementId, dx: i32, dy: i32) -> Result<bool, TreeError> {
        if !self.window_mut(id)?.title_drag {
            return Ok(false);
        }
        let b = self.node(id)?.element.bounds();
        self.set_bounds(id, b.translate(dx, dy), writer!())
    }

    /// Finish a title-bar drag, pulling the window back inside its parent.
    pub fn end_title_drag(&mut self, id: ElementId) -> Result<(), TreeError> {
        let w = self.window_mut(id)?;
        if !core::mem::take(&mut w.title_drag) {
            return Ok(());
        }
        let Some(outer) = self.parent(id).and_then(|p| self.bounds(p)) else {
            return Ok(());
        };
        let b = self.node(id)?.element.bounds();
        self.set_bounds(id, clamp_into(b, outer), writer!())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Element, ElementFlags};
    use alloc::rc::Rc;
    use core::cell::Cell;

    fn desktop_with_window(window: Window) -> (Tree, ElementId, ElementId) {
        let mut tree = Tree::new();
        let desk = tree
            .insert(None, Element::new(Bounds::new(0, 0, 800, 600)))
            .unwrap();
        let win = tree
            .insert(
                Some(desk),
                Element::window(Bounds::new(10, 10, 200, 150), window),
            )
            .unwrap();
        (tree, desk, win)
    }

    #[test]
    fn maximize_and_restore() {
        let (mut tree, _, win) = desktop_with_window(Window::new("w"));
        assert!(tree.set_maximized(win, true, writer!()).unwrap());
        assert_eq!(tree.bounds(win), Some(Bounds::new(0, 0, 800, 600)));
        assert_eq!(
            tree.window(win).unwrap().restored_bounds(),
            Some(Bounds::new(10, 10, 200, 150))
        );
        assert!(!tree.set_maximized(win, true, writer!()).unwrap());
        assert!(!tree.toggle_maximized(win, writer!()).unwrap());
        assert_eq!(tree.bounds(win), Some(Bounds::new(10, 10, 200, 150)));
        assert!(!tree.window(win).unwrap().is_maximized());
    }

    #[test]
    fn maximize_without_parent_keeps_bounds_and_relayouts() {
        let runs = Rc::new(Cell::new(0));
        let counter = runs.clone();
        let mut tree = Tree::new();
        let win = tree
            .insert(
                None,
                Element::window(Bounds::new(5, 5, 50, 50), Window::new("w"))
                    .with_init(move |_, _| counter.set(counter.get() + 1)),
            )
            .unwrap();
        assert_eq!(runs.get(), 1);
        tree.set_maximized(win, true, writer!()).unwrap();
        assert_eq!(tree.bounds(win), Some(Bounds::new(5, 5, 50, 50)));
        assert_eq!(runs.get(), 2, "maximize always re-lays out");
    }

    #[test]
    fn rejected_maximize_leaves_the_window_alone() {
        let (mut tree, _, win) = desktop_with_window(Window::new("w"));
        tree.window_hooks(win).unwrap().maximized(|h| {
            h.add_filter(|_: bool| false);
        });
        assert!(!tree.set_maximized(win, true, writer!()).unwrap());
        assert!(!tree.toggle_maximized(win, writer!()).unwrap());
        assert_eq!(tree.bounds(win), Some(Bounds::new(10, 10, 200, 150)));
        assert_eq!(tree.window(win).unwrap().restored_bounds(), None);
    }

    #[test]
    fn maximized_filter_restores_the_window() {
        let (mut tree, _, win) = desktop_with_window(Window::new("w"));
        tree.set_maximized(win, true, writer!()).unwrap();
        tree.window_hooks(win).unwrap().maximized(|h| {
            h.add_filter(|_: bool| false);
        });
        assert!(!tree.window(win).unwrap().is_maximized());
        assert_eq!(tree.bounds(win), Some(Bounds::new(10, 10, 200, 150)));
        assert_eq!(tree.window(win).unwrap().restored_bounds(), None);
    }

    #[test]
    fn title_drag_moves_and_clamps_on_release() {
        let (mut tree, _, win) = desktop_with_window(Window::new("w"));
        let child = tree
            .insert(Some(win), Element::new(Bounds::new(20, 30, 10, 10)))
            .unwrap();
        assert!(tree.begin_title_drag(win).unwrap());
        tree.drag_title(win, -30, 5).unwrap();
        assert_eq!(tree.bounds(win), Some(Bounds::new(-20, 15, 200, 150)));
        assert_eq!(tree.bounds(child), Some(Bounds::new(-10, 35, 10, 10)));

        tree.end_title_drag(win).unwrap();
        assert_eq!(tree.bounds(win), Some(Bounds::new(0, 15, 200, 150)));
        assert_eq!(tree.bounds(child), Some(Bounds::new(10, 35, 10, 10)));
        assert!(
            !tree.drag_title(win, 5, 5).unwrap(),
            "no drag after release"
        );
    }

    #[test]
    fn maximized_windows_ignore_title_drag() {
        let (mut tree, _, win) = desktop_with_window(Window::new("w"));
        tree.set_maximized(win, true, writer!()).unwrap();
        assert!(!tree.begin_title_drag(win).unwrap());
        assert!(!tree.drag_title(win, 10, 10).unwrap());
        assert_eq!(tree.bounds(win), Some(Bounds::new(0, 0, 800, 600)));
    }

    #[test]
    fn oversized_window_pins_to_parent_origin() {
        let outer = Bounds::new(0, 0, 100, 100);
        assert_eq!(
            clamp_into(Bounds::new(50, 95, 300, 20), outer),
            Bounds::new(0, 80, 300, 20)
        );
    }

    #[test]
    fn close_operations() {
        let (mut tree, desk, win) = desktop_with_window(Window::new("w"));
        assert_eq!(tree.close(win), Ok(CloseOperation::Hide));
        assert!(!tree.flags(win).unwrap().contains(ElementFlags::VISIBLE));
        assert_eq!(tree.parent(win), Some(desk), "hidden windows stay attached");

        tree.set_close_operation(win, CloseOperation::DoNothing, writer!())
            .unwrap();
        tree.set_visible(win, true, writer!()).unwrap();
        tree.close(win).unwrap();
        assert!(tree.flags(win).unwrap().contains(ElementFlags::VISIBLE));

        tree.set_close_operation(win, CloseOperation::CloseHostSurface, writer!())
            .unwrap();
        tree.close(win).unwrap();
        assert!(tree.take_close_request());
        assert!(!tree.take_close_request(), "request is taken once");

        tree.set_close_operation(win, CloseOperation::Dispose, writer!())
            .unwrap();
        tree.close(win).unwrap();
        assert!(!tree.is_alive(win));
        assert!(tree.children(desk).is_empty());
    }

    #[test]
    fn parts_of_the_title_bar() {
        let w = Window::new("w").with_title_bar(10, Color::BLACK);
        let b = Bounds::new(0, 0, 100, 50);
        assert_eq!(w.part(b, Point::new(95.0, 5.0)), Some(WindowPart::CloseBox));
        assert_eq!(
            w.part(b, Point::new(85.0, 5.0)),
            Some(WindowPart::MaximizeBox)
        );
        assert_eq!(w.part(b, Point::new(20.0, 5.0)), Some(WindowPart::TitleBar));
        assert_eq!(w.part(b, Point::new(20.0, 30.0)), Some(WindowPart::Body));
        assert_eq!(w.part(b, Point::new(120.0, 30.0)), None);
    }

    #[test]
    fn window_ops_reject_other_kinds() {
        let mut tree = Tree::new();
        let plain = tree.insert(None, Element::new(Bounds::ZERO)).unwrap();
        let Err(TreeError::WrongKind { expected, .. }) = tree.close(plain) else {
            panic!("closing a plain element must fail");
        };
        assert_eq!(expected, "window");
    }
}
