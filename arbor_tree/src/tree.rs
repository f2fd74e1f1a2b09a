// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, properties, focus, hit testing.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::Cell;

use arbor_property::{Hooks, Writer, writer};
use kurbo::{Point, Vec2};

use crate::drag::DragAccumulator;
use crate::element::{Element, ElementKind};
use crate::error::TreeError;
use crate::render::Overlay;
use crate::types::{Bounds, ElementFlags, ElementId, InteractionState};

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// Retained element tree.
///
/// Elements live in generational slots; children are ordered id lists and the
/// parent link is a plain id, so there is a single owner for every element.
pub struct Tree {
    nodes: Vec<Option<Node>>,
    // Last generation per slot; persists across frees.
    generations: Vec<u32>,
    free_list: Vec<usize>,
    // Attached top-level elements, back to front.
    roots: Vec<ElementId>,
    focused: Option<ElementId>,
    close_requested: bool,
    pub(crate) overlays: Vec<Box<dyn Overlay>>,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("roots", &self.roots)
            .field("focused", &self.focused)
            .field("overlays", &self.overlays.len())
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub(crate) struct Node {
    generation: u32,
    pub(crate) parent: Option<ElementId>,
    pub(crate) children: Vec<ElementId>,
    pub(crate) element: Element,
    pub(crate) state: InteractionState,
    drag: DragAccumulator,
    content: Cell<Option<Bounds>>, // cached union of child bounds
}

impl Node {
    fn new(generation: u32, element: Element) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            element,
            state: InteractionState::empty(),
            drag: DragAccumulator::new(),
            content: Cell::new(None),
        }
    }
}

/// Registration handles for an element's own properties.
///
/// A filter registered here re-filters the stored value at once, and the
/// tree reacts to a changed value exactly as it reacts to a write.
#[derive(Debug)]
pub struct ElementHooks<'a> {
    tree: &'a mut Tree,
    id: ElementId,
}

impl ElementHooks<'_> {
    /// Register filters or listeners on the bounds property.
    pub fn bounds(&mut self, register: impl FnOnce(&mut Hooks<'_, Bounds>)) -> &mut Self {
        let id = self.id;
        let Some((old, new)) = self.tree.node_mut(id).ok().map(|node| {
            let old = node.element.bounds();
            register(&mut node.element.bounds.hooks());
            (old, node.element.bounds())
        }) else {
            return self;
        };
        if old != new {
            self.tree.bounds_changed(id);
            let (dx, dy) = (new.x.saturating_sub(old.x), new.y.saturating_sub(old.y));
            if let Err(err) = self.tree.relayout(id, dx, dy) {
                log::warn!("relayout of {id:?} after filter registration failed: {err}");
            }
        }
        self
    }

    /// Register filters or listeners on the flags property.
    pub fn flags(&mut self, register: impl FnOnce(&mut Hooks<'_, ElementFlags>)) -> &mut Self {
        let id = self.id;
        let Some((old, new)) = self.tree.node_mut(id).ok().map(|node| {
            let old = node.element.flags();
            register(&mut node.element.flags.hooks());
            (old, node.element.flags())
        }) else {
            return self;
        };
        if old != new
            && let Err(err) = self.tree.flags_changed(id, new)
        {
            log::warn!("reacting to flag filter on {id:?} failed: {err}");
        }
        self
    }
}

impl Tree {
    /// Create a new empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            roots: Vec::new(),
            focused: None,
            close_requested: false,
            overlays: Vec::new(),
        }
    }

    /// Insert `element` as the last child of `parent`, or as the front-most root.
    ///
    /// If the element carries an init callback it runs before this returns.
    pub fn insert(
        &mut self,
        parent: Option<ElementId>,
        element: Element,
    ) -> Result<ElementId, TreeError> {
        if let Some(p) = parent {
            self.node(p)?;
        }
        let has_init = element.init.is_some();
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, element));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, element)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "ElementId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = ElementId::new(idx, generation);
        match parent {
            Some(p) => self.link_parent(id, p),
            None => self.roots.push(id),
        }
        if has_init {
            self.reinitialize(id)?;
        }
        Ok(id)
    }

    /// Attach a detached element as the last child of `parent`.
    ///
    /// An element that is still attached elsewhere is moved.
    pub fn add(&mut self, parent: ElementId, child: ElementId) -> Result<(), TreeError> {
        self.node(parent)?;
        self.node(child)?;
        let mut cursor = Some(parent);
        while let Some(c) = cursor {
            if c == child {
                return Err(TreeError::Cycle { parent, child });
            }
            cursor = self.node(c)?.parent;
        }
        self.unlink(child);
        self.link_parent(child, parent);
        Ok(())
    }

    /// Detach `id` from its parent (or from the root list).
    ///
    /// The element stays alive but is no longer rendered or hit tested. Focus,
    /// hover, drag state and drag carry held anywhere in its subtree are cleared.
    pub fn detach(&mut self, id: ElementId) -> Result<(), TreeError> {
        self.node(id)?;
        self.clear_interaction(id);
        self.unlink(id);
        Ok(())
    }

    /// Detach `id` and free it with its whole subtree. Its ids become stale.
    pub fn remove(&mut self, id: ElementId) -> Result<(), TreeError> {
        self.detach(id)?;
        self.free_subtree(id);
        Ok(())
    }

    /// Returns true if `id` refers to a live element.
    pub fn is_alive(&self, id: ElementId) -> bool {
        self.node(id).is_ok()
    }

    /// Whether `id` is alive, attached under a root, and visible along its whole path.
    pub fn is_rendered(&self, id: ElementId) -> bool {
        let mut cursor = id;
        loop {
            let Ok(node) = self.node(cursor) else {
                return false;
            };
            if !node.element.flags().contains(ElementFlags::VISIBLE) {
                return false;
            }
            match node.parent {
                Some(p) => cursor = p,
                None => return self.roots.contains(&cursor),
            }
        }
    }

    /// Attached top-level elements, back to front.
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    /// Parent of `id`, if it has one.
    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.node(id).ok()?.parent
    }

    /// Children of `id` in insertion (render) order. Empty for stale ids.
    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// The element stored under `id`.
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.node(id).ok().map(|n| &n.element)
    }

    /// Registration handles for `id`'s bounds and flags.
    pub fn element_hooks(&mut self, id: ElementId) -> Result<ElementHooks<'_>, TreeError> {
        self.node(id)?;
        Ok(ElementHooks { tree: self, id })
    }

    /// Current bounds of `id`.
    pub fn bounds(&self, id: ElementId) -> Option<Bounds> {
        self.element(id).map(Element::bounds)
    }

    /// Current flags of `id`.
    pub fn flags(&self, id: ElementId) -> Option<ElementFlags> {
        self.element(id).map(Element::flags)
    }

    /// Transient interaction state of `id`.
    pub fn state(&self, id: ElementId) -> Option<InteractionState> {
        self.node(id).ok().map(|n| n.state)
    }

    /// Minimal rectangle enclosing the bounds of `id`'s children.
    ///
    /// With no children this is the degenerate rectangle at `id`'s origin.
    /// The result is cached until a child is added, removed, or moved.
    pub fn content_bounds(&self, id: ElementId) -> Option<Bounds> {
        let node = self.node(id).ok()?;
        if let Some(cached) = node.content.get() {
            return Some(cached);
        }
        let content = node
            .children
            .iter()
            .filter_map(|c| self.bounds(*c))
            .reduce(Bounds::union)
            .unwrap_or_else(|| node.element.bounds().origin());
        node.content.set(Some(content));
        Some(content)
    }

    /// Write the bounds of `id`.
    ///
    /// A committed change re-lays out the element: elements with an init
    /// callback are re-initialized, others carry their children along by the
    /// position delta. Panels then re-settle their content.
    pub fn set_bounds(
        &mut self,
        id: ElementId,
        bounds: Bounds,
        writer: Writer,
    ) -> Result<bool, TreeError> {
        let Some((dx, dy)) = self.apply_bounds(id, bounds, writer)? else {
            return Ok(false);
        };
        self.relayout(id, dx, dy)?;
        Ok(true)
    }

    /// Translate every direct child of `id` by `(dx, dy)`.
    ///
    /// Each child repositions its own subtree through [`Tree::set_bounds`].
    pub fn move_children(&mut self, id: ElementId, dx: i32, dy: i32) -> Result<(), TreeError> {
        let children = self.node(id)?.children.clone();
        if dx == 0 && dy == 0 {
            return Ok(());
        }
        for child in children {
            let b = self.node(child)?.element.bounds();
            self.set_bounds(child, b.translate(dx, dy), writer!())?;
        }
        Ok(())
    }

    /// Write the flags of `id`.
    ///
    /// Hiding an element clears interaction state in its subtree; dropping
    /// [`ElementFlags::FOCUSABLE`] releases focus held by the element itself.
    pub fn set_flags(
        &mut self,
        id: ElementId,
        flags: ElementFlags,
        writer: Writer,
    ) -> Result<bool, TreeError> {
        let node = self.node_mut(id)?;
        if !node.element.flags.set(flags, writer) {
            return Ok(false);
        }
        let flags = node.element.flags();
        self.flags_changed(id, flags)?;
        Ok(true)
    }

    /// Show or hide `id`.
    pub fn set_visible(
        &mut self,
        id: ElementId,
        visible: bool,
        writer: Writer,
    ) -> Result<bool, TreeError> {
        let mut flags = self.node(id)?.element.flags();
        flags.set(ElementFlags::VISIBLE, visible);
        self.set_flags(id, flags, writer)
    }

    /// First descendant of `id` matching `predicate`.
    ///
    /// Children are visited in insertion order. When `recursive` is set a
    /// child's subtree is searched before its next sibling.
    pub fn find_child(
        &self,
        id: ElementId,
        mut predicate: impl FnMut(ElementId, &Element) -> bool,
        recursive: bool,
    ) -> Option<ElementId> {
        self.find_in(id, &mut predicate, recursive)
    }

    fn find_in(
        &self,
        id: ElementId,
        predicate: &mut dyn FnMut(ElementId, &Element) -> bool,
        recursive: bool,
    ) -> Option<ElementId> {
        for &child in self.children(id) {
            let node = self.node(child).ok()?;
            if predicate(child, &node.element) {
                return Some(child);
            }
            if recursive && let Some(found) = self.find_in(child, predicate, true) {
                return Some(found);
            }
        }
        None
    }

    /// Clear `id`'s children and rebuild them with its init callback.
    ///
    /// Does nothing for elements without an init callback, and for an element
    /// whose callback is already running.
    pub fn reinitialize(&mut self, id: ElementId) -> Result<(), TreeError> {
        let Some(mut init) = self.node_mut(id)?.element.init.take() else {
            return Ok(());
        };
        log::debug!("reinitializing {id:?}");
        let children = self.node(id)?.children.clone();
        for child in children {
            self.remove(child)?;
        }
        init(self, id);
        if let Ok(node) = self.node_mut(id)
            && node.element.init.is_none()
        {
            node.element.init = Some(init);
        }
        if self.panel(id).is_some() {
            self.settle(id)?;
        }
        Ok(())
    }

    /// Move `id` to the end of its sibling list so it renders on top.
    pub fn bring_to_front(&mut self, id: ElementId) -> Result<(), TreeError> {
        let siblings = match self.node(id)?.parent {
            Some(p) => &mut self.node_mut(p)?.children,
            None => &mut self.roots,
        };
        if let Some(pos) = siblings.iter().position(|c| *c == id) {
            let moved = siblings.remove(pos);
            siblings.push(moved);
        }
        Ok(())
    }

    /// Every visible element under `pt`, front-most first.
    ///
    /// Later siblings come before earlier ones and descendants before their
    /// ancestors. Children are only considered where their parent contains
    /// the point.
    pub fn hits_at(&self, pt: Point) -> Vec<ElementId> {
        let mut out = Vec::new();
        for &root in self.roots.iter().rev() {
            self.collect_hits(root, pt, &mut out);
        }
        out
    }

    /// Root→target path to the front-most visible element under `pt`.
    pub fn hit_path(&self, pt: Point) -> Option<Vec<ElementId>> {
        let mut out = Vec::new();
        for &root in self.roots.iter().rev() {
            if let Some(target) = self.front_hit(root, pt) {
                out = self.path_to_root(target);
                break;
            }
        }
        (!out.is_empty()).then_some(out)
    }

    /// Path from the root ancestor of `id` down to `id` (inclusive).
    pub fn path_to_root(&self, mut id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        loop {
            out.push(id);
            match self.parent(id) {
                Some(p) => id = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    // --- focus ---

    /// The element holding focus.
    pub fn focused(&self) -> Option<ElementId> {
        self.focused
    }

    /// Move focus to `id`, or clear it with `None`. Returns the previous holder.
    ///
    /// The previous holder is cleared before the new one is marked, so at most
    /// one element is ever focused.
    pub fn set_focus(&mut self, id: Option<ElementId>) -> Result<Option<ElementId>, TreeError> {
        if let Some(id) = id {
            let flags = self.node(id)?.element.flags();
            if !flags.contains(ElementFlags::FOCUSABLE) {
                return Err(TreeError::NotFocusable(id));
            }
        }
        let previous = self.focused;
        if previous == id {
            return Ok(previous);
        }
        if let Some(prev) = self.focused.take()
            && let Ok(node) = self.node_mut(prev)
        {
            node.state.remove(InteractionState::FOCUSED);
        }
        if let Some(id) = id {
            self.node_mut(id)?.state.insert(InteractionState::FOCUSED);
            self.focused = Some(id);
        }
        log::debug!("focus {previous:?} -> {id:?}");
        Ok(previous)
    }

    /// Nearest focusable element on the path from `id` up to its root.
    pub fn focusable_ancestor(&self, id: ElementId) -> Option<ElementId> {
        let mut cursor = Some(id);
        while let Some(c) = cursor {
            let node = self.node(c).ok()?;
            if node.element.flags().contains(ElementFlags::FOCUSABLE) {
                return Some(c);
            }
            cursor = node.parent;
        }
        None
    }

    // --- hover and drag state ---

    /// Set or clear [`InteractionState::HOVERED`] on `id`.
    pub fn set_hovered(&mut self, id: ElementId, hovered: bool) -> Result<(), TreeError> {
        self.node_mut(id)?
            .state
            .set(InteractionState::HOVERED, hovered);
        Ok(())
    }

    /// Enter the dragging state and drop any stale drag carry.
    pub fn begin_drag(&mut self, id: ElementId) -> Result<(), TreeError> {
        let node = self.node_mut(id)?;
        node.state.insert(InteractionState::DRAGGING);
        node.drag.reset();
        Ok(())
    }

    /// Leave the dragging state. Also used for forced cancellation.
    pub fn end_drag(&mut self, id: ElementId) -> Result<(), TreeError> {
        let node = self.node_mut(id)?;
        node.state.remove(InteractionState::DRAGGING);
        node.drag.reset();
        if let ElementKind::Window(w) = &mut node.element.kind {
            w.title_drag = false;
        }
        Ok(())
    }

    /// Whether `id` is live and currently dragging.
    pub fn is_dragging(&self, id: ElementId) -> bool {
        self.state(id)
            .is_some_and(|s| s.contains(InteractionState::DRAGGING))
    }

    /// Feed a pointer delta into `id`'s accumulator and get the whole pixels to apply.
    pub fn accumulate_drag(&mut self, id: ElementId, delta: Vec2) -> Result<(i32, i32), TreeError> {
        Ok(self.node_mut(id)?.drag.accumulate(delta))
    }

    // --- host surface ---

    /// Returns and clears a pending request to close the host surface.
    pub fn take_close_request(&mut self) -> bool {
        core::mem::take(&mut self.close_requested)
    }

    pub(crate) fn request_host_close(&mut self) {
        log::debug!("host surface close requested");
        self.close_requested = true;
    }

    // --- internals ---

    pub(crate) fn node(&self, id: ElementId) -> Result<&Node, TreeError> {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .filter(|n| n.generation == id.1)
            .ok_or(TreeError::Stale(id))
    }

    pub(crate) fn node_mut(&mut self, id: ElementId) -> Result<&mut Node, TreeError> {
        self.nodes
            .get_mut(id.idx())
            .and_then(|n| n.as_mut())
            .filter(|n| n.generation == id.1)
            .ok_or(TreeError::Stale(id))
    }

    /// Store new bounds without reacting. Returns the position delta on change.
    pub(crate) fn apply_bounds(
        &mut self,
        id: ElementId,
        bounds: Bounds,
        writer: Writer,
    ) -> Result<Option<(i32, i32)>, TreeError> {
        let node = self.node_mut(id)?;
        let old = node.element.bounds();
        if !node.element.bounds.set(bounds, writer) {
            return Ok(None);
        }
        let new = node.element.bounds();
        self.bounds_changed(id);
        Ok(Some((
            new.x.saturating_sub(old.x),
            new.y.saturating_sub(old.y),
        )))
    }

    /// React to a committed bounds change of `id`.
    pub(crate) fn relayout(&mut self, id: ElementId, dx: i32, dy: i32) -> Result<(), TreeError> {
        if self.node(id)?.element.has_init() {
            self.reinitialize(id)?;
        } else {
            self.move_children(id, dx, dy)?;
            if self.panel(id).is_some() {
                self.settle(id)?;
            }
        }
        Ok(())
    }

    /// Drop cached content bounds that depend on `id`'s bounds.
    fn bounds_changed(&self, id: ElementId) {
        let Ok(node) = self.node(id) else {
            return;
        };
        node.content.set(None);
        if let Some(parent) = node.parent.and_then(|p| self.node(p).ok()) {
            parent.content.set(None);
        }
    }

    /// React to committed `flags` on `id`.
    fn flags_changed(&mut self, id: ElementId, flags: ElementFlags) -> Result<(), TreeError> {
        if !flags.contains(ElementFlags::VISIBLE) {
            self.clear_interaction(id);
        } else if !flags.contains(ElementFlags::FOCUSABLE) && self.focused == Some(id) {
            self.set_focus(None)?;
        }
        Ok(())
    }

    fn link_parent(&mut self, id: ElementId, parent: ElementId) {
        if let Ok(p) = self.node_mut(parent) {
            p.children.push(id);
            p.content.set(None);
        }
        if let Ok(n) = self.node_mut(id) {
            n.parent = Some(parent);
        }
    }

    /// Remove `id` from its parent's children or from the root list.
    fn unlink(&mut self, id: ElementId) {
        let parent = self.node_mut(id).ok().and_then(|n| n.parent.take());
        match parent {
            Some(p) => {
                if let Ok(p) = self.node_mut(p) {
                    p.children.retain(|c| *c != id);
                    p.content.set(None);
                }
            }
            None => self.roots.retain(|r| *r != id),
        }
    }

    fn clear_interaction(&mut self, id: ElementId) {
        if self.focused == Some(id) {
            self.focused = None;
        }
        let Ok(node) = self.node_mut(id) else {
            return;
        };
        node.state = InteractionState::empty();
        node.drag.reset();
        if let ElementKind::Window(w) = &mut node.element.kind {
            w.title_drag = false;
        }
        let children = node.children.clone();
        for child in children {
            self.clear_interaction(child);
        }
    }

    fn free_subtree(&mut self, id: ElementId) {
        let Ok(node) = self.node_mut(id) else {
            return;
        };
        let children = core::mem::take(&mut node.children);
        for child in children {
            self.free_subtree(child);
        }
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    fn collect_hits(&self, id: ElementId, pt: Point, out: &mut Vec<ElementId>) {
        let Ok(node) = self.node(id) else {
            return;
        };
        let e = &node.element;
        if !e.flags().contains(ElementFlags::VISIBLE) || !e.bounds().contains(pt) {
            return;
        }
        for &child in node.children.iter().rev() {
            self.collect_hits(child, pt, out);
        }
        out.push(id);
    }

    fn front_hit(&self, id: ElementId, pt: Point) -> Option<ElementId> {
        let node = self.node(id).ok()?;
        let e = &node.element;
        if !e.flags().contains(ElementFlags::VISIBLE) || !e.bounds().contains(pt) {
            return None;
        }
        node.children
            .iter()
            .rev()
            .find_map(|&c| self.front_hit(c, pt))
            .or(Some(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    fn plain(x: i32, y: i32, w: i32, h: i32) -> Element {
        Element::new(Bounds::new(x, y, w, h))
    }

    fn focusable(x: i32, y: i32, w: i32, h: i32) -> Element {
        let flags = ElementFlags::default() | ElementFlags::FOCUSABLE;
        plain(x, y, w, h).with_flags(flags)
    }

    #[test]
    fn insert_links_parent_and_children() {
        let mut tree = Tree::new();
        let root = tree.insert(None, plain(0, 0, 100, 100)).unwrap();
        let a = tree.insert(Some(root), plain(0, 0, 10, 10)).unwrap();
        let b = tree.insert(Some(root), plain(10, 0, 10, 10)).unwrap();
        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.parent(a), Some(root));
        assert_eq!(tree.roots(), &[root]);
    }

    #[test]
    fn insert_under_stale_parent_fails_without_allocating() {
        let mut tree = Tree::new();
        let root = tree.insert(None, plain(0, 0, 1, 1)).unwrap();
        tree.remove(root).unwrap();
        let err = tree.insert(Some(root), plain(0, 0, 1, 1)).unwrap_err();
        assert_eq!(err, TreeError::Stale(root));
        assert!(tree.roots().is_empty());
    }

    #[test]
    fn stale_ids_never_alias_reused_slots() {
        let mut tree = Tree::new();
        let root = tree.insert(None, plain(0, 0, 1, 1)).unwrap();
        let a = tree.insert(Some(root), plain(0, 0, 1, 1)).unwrap();
        tree.remove(a).unwrap();
        let b = tree.insert(Some(root), plain(0, 0, 1, 1)).unwrap();
        assert!(tree.is_alive(b));
        assert!(!tree.is_alive(a));
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
    }

    #[test]
    fn content_bounds_aggregates_children() {
        let mut tree = Tree::new();
        let root = tree.insert(None, plain(50, 60, 100, 100)).unwrap();
        assert_eq!(
            tree.content_bounds(root),
            Some(Bounds::new(50, 60, 0, 0)),
            "no children: degenerate at origin"
        );
        let a = tree.insert(Some(root), plain(0, 0, 10, 10)).unwrap();
        tree.insert(Some(root), plain(100, 20, 30, 5)).unwrap();
        assert_eq!(tree.content_bounds(root), Some(Bounds::new(0, 0, 130, 25)));
        tree.set_bounds(a, Bounds::new(-10, 0, 10, 10), writer!())
            .unwrap();
        assert_eq!(
            tree.content_bounds(root),
            Some(Bounds::new(-10, 0, 140, 25)),
            "cache must follow child moves"
        );
    }

    #[test]
    fn move_children_carries_grandchildren() {
        let mut tree = Tree::new();
        let root = tree.insert(None, plain(0, 0, 100, 100)).unwrap();
        let a = tree.insert(Some(root), plain(10, 10, 20, 20)).unwrap();
        let aa = tree.insert(Some(a), plain(12, 12, 5, 5)).unwrap();
        tree.move_children(root, 5, -3).unwrap();
        assert_eq!(tree.bounds(a), Some(Bounds::new(15, 7, 20, 20)));
        assert_eq!(tree.bounds(aa), Some(Bounds::new(17, 9, 5, 5)));
        assert_eq!(tree.bounds(root), Some(Bounds::new(0, 0, 100, 100)));
    }

    #[test]
    fn find_child_is_preorder() {
        let mut tree = Tree::new();
        let root = tree.insert(None, plain(0, 0, 100, 100)).unwrap();
        let a = tree.insert(Some(root), plain(0, 0, 1, 1)).unwrap();
        let deep = tree.insert(Some(a), plain(0, 0, 7, 7)).unwrap();
        let b = tree.insert(Some(root), plain(0, 0, 7, 7)).unwrap();
        let width_is_7 = |_: ElementId, e: &Element| e.bounds().width == 7;
        assert_eq!(tree.find_child(root, width_is_7, false), Some(b));
        assert_eq!(tree.find_child(root, width_is_7, true), Some(deep));
        assert_eq!(tree.find_child(root, |_, _| false, true), None);
    }

    #[test]
    fn add_rejects_cycles_and_moves_attached_children() {
        let mut tree = Tree::new();
        let root = tree.insert(None, plain(0, 0, 10, 10)).unwrap();
        let a = tree.insert(Some(root), plain(0, 0, 10, 10)).unwrap();
        let b = tree.insert(Some(a), plain(0, 0, 10, 10)).unwrap();
        assert_eq!(
            tree.add(b, a),
            Err(TreeError::Cycle {
                parent: b,
                child: a
            })
        );
        let cycle = TreeError::Cycle {
            parent: a,
            child: a,
        };
        assert_eq!(tree.add(a, a), Err(cycle));
        tree.add(root, b).unwrap();
        assert_eq!(tree.children(root), &[a, b]);
        assert!(tree.children(a).is_empty());
        assert_eq!(tree.parent(b), Some(root));
    }

    #[test]
    fn detach_clears_subtree_interaction_state() {
        let mut tree = Tree::new();
        let root = tree.insert(None, plain(0, 0, 100, 100)).unwrap();
        let a = tree.insert(Some(root), plain(0, 0, 50, 50)).unwrap();
        let field = tree.insert(Some(a), focusable(0, 0, 10, 10)).unwrap();
        tree.set_focus(Some(field)).unwrap();
        tree.set_hovered(a, true).unwrap();
        tree.begin_drag(field).unwrap();
        tree.accumulate_drag(field, Vec2::new(0.7, 0.0)).unwrap();

        tree.detach(a).unwrap();

        assert_eq!(tree.focused(), None);
        assert_eq!(tree.state(a), Some(InteractionState::empty()));
        assert_eq!(tree.state(field), Some(InteractionState::empty()));
        assert!(tree.is_alive(field), "detach keeps the subtree alive");
        assert_eq!(
            tree.accumulate_drag(field, Vec2::new(0.7, 0.0)),
            Ok((0, 0)),
            "carry must be dropped on detach"
        );
        assert!(tree.hits_at(Point::new(5.0, 5.0)).iter().all(|h| *h == root));
        assert!(!tree.is_rendered(field));
        tree.add(root, a).unwrap();
        assert!(tree.is_rendered(field), "re-attaching restores the subtree");
    }

    #[test]
    fn remove_frees_whole_subtree() {
        let mut tree = Tree::new();
        let root = tree.insert(None, plain(0, 0, 10, 10)).unwrap();
        let a = tree.insert(Some(root), plain(0, 0, 10, 10)).unwrap();
        let b = tree.insert(Some(a), plain(0, 0, 10, 10)).unwrap();
        tree.remove(a).unwrap();
        assert!(!tree.is_alive(a));
        assert!(!tree.is_alive(b));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.remove(a), Err(TreeError::Stale(a)));
    }

    #[test]
    fn focus_is_exclusive() {
        let mut tree = Tree::new();
        let root = tree.insert(None, plain(0, 0, 100, 100)).unwrap();
        let a = tree.insert(Some(root), focusable(0, 0, 10, 10)).unwrap();
        let b = tree.insert(Some(root), focusable(10, 0, 10, 10)).unwrap();
        let focused_count = |t: &Tree| {
            [root, a, b]
                .iter()
                .filter(|id| t.state(**id).unwrap().contains(InteractionState::FOCUSED))
                .count()
        };

        assert_eq!(tree.set_focus(Some(a)), Ok(None));
        assert_eq!(tree.set_focus(Some(b)), Ok(Some(a)));
        assert!(!tree.state(a).unwrap().contains(InteractionState::FOCUSED));
        assert!(tree.state(b).unwrap().contains(InteractionState::FOCUSED));
        assert_eq!(focused_count(&tree), 1);

        assert_eq!(
            tree.set_focus(Some(root)),
            Err(TreeError::NotFocusable(root))
        );
        assert_eq!(
            tree.focused(),
            Some(b),
            "failed transfer leaves focus alone"
        );
        tree.set_focus(None).unwrap();
        assert_eq!(focused_count(&tree), 0);
    }

    #[test]
    fn dropping_focusable_flag_releases_focus() {
        let mut tree = Tree::new();
        let a = tree.insert(None, focusable(0, 0, 10, 10)).unwrap();
        tree.set_focus(Some(a)).unwrap();
        tree.set_flags(a, ElementFlags::VISIBLE, writer!()).unwrap();
        assert_eq!(tree.focused(), None);
    }

    #[test]
    fn hits_are_front_most_first() {
        let mut tree = Tree::new();
        let root = tree.insert(None, plain(0, 0, 100, 100)).unwrap();
        let back = tree.insert(Some(root), plain(0, 0, 50, 50)).unwrap();
        let front = tree.insert(Some(root), plain(20, 20, 50, 50)).unwrap();
        let inner = tree.insert(Some(front), plain(25, 25, 10, 10)).unwrap();

        let pt = Point::new(30.0, 30.0);
        assert_eq!(tree.hits_at(pt), vec![inner, front, back, root]);
        assert_eq!(tree.hit_path(pt), Some(vec![root, front, inner]));

        tree.bring_to_front(back).unwrap();
        assert_eq!(tree.hits_at(pt), vec![back, inner, front, root]);
    }

    #[test]
    fn hidden_and_clipped_elements_are_not_hit() {
        let mut tree = Tree::new();
        let root = tree.insert(None, plain(0, 0, 100, 100)).unwrap();
        let hidden = tree.insert(Some(root), plain(0, 0, 50, 50)).unwrap();
        tree.set_visible(hidden, false, writer!()).unwrap();
        let _outside = tree.insert(Some(root), plain(150, 0, 50, 50)).unwrap();
        assert_eq!(tree.hits_at(Point::new(10.0, 10.0)), vec![root]);
        assert_eq!(tree.hit_path(Point::new(160.0, 10.0)), None);
    }

    #[test]
    fn init_runs_on_insert_and_reinitialize() {
        let runs = Rc::new(RefCell::new(0));
        let counter = runs.clone();
        let mut tree = Tree::new();
        let root = tree
            .insert(
                None,
                plain(0, 0, 100, 100).with_init(move |tree, id| {
                    *counter.borrow_mut() += 1;
                    let b = tree.bounds(id).unwrap();
                    tree.insert(Some(id), plain(b.x, b.y, b.width / 2, 10))
                        .unwrap();
                }),
            )
            .unwrap();
        assert_eq!(*runs.borrow(), 1);
        assert_eq!(tree.children(root).len(), 1);

        tree.set_bounds(root, Bounds::new(10, 10, 40, 40), writer!())
            .unwrap();
        assert_eq!(*runs.borrow(), 2);
        let children = tree.children(root);
        assert_eq!(children.len(), 1, "old children cleared before rebuilding");
        assert_eq!(tree.bounds(children[0]), Some(Bounds::new(10, 10, 20, 10)));
    }

    #[test]
    fn hooks_observe_tree_writes() {
        let mut tree = Tree::new();
        let a = tree.insert(None, plain(0, 0, 10, 10)).unwrap();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        tree.element_hooks(a).unwrap().bounds(|h| {
            h.add_listener(move |c| sink.borrow_mut().push((*c.old, *c.new)))
                .add_filter(|b: Bounds| Bounds::new(b.x, b.y, b.width.max(5), b.height.max(5)));
        });

        tree.set_bounds(a, Bounds::new(1, 1, 2, 2), Writer("tests"))
            .unwrap();
        assert_eq!(tree.bounds(a), Some(Bounds::new(1, 1, 5, 5)));
        assert_eq!(
            *seen.borrow(),
            vec![(Bounds::new(0, 0, 10, 10), Bounds::new(1, 1, 5, 5))]
        );
        assert_eq!(
            tree.element(a).unwrap().bounds_property().last_writer(),
            Writer("tests")
        );
    }

    #[test]
    fn filter_registration_relays_out_like_a_write() {
        let mut tree = Tree::new();
        let root = tree.insert(None, plain(0, 0, 100, 100)).unwrap();
        let a = tree.insert(Some(root), plain(5, 5, 10, 10)).unwrap();
        let inner = tree.insert(Some(a), plain(6, 6, 2, 2)).unwrap();
        assert_eq!(tree.content_bounds(root), Some(Bounds::new(5, 5, 10, 10)));

        tree.element_hooks(a).unwrap().bounds(|h| {
            h.add_filter(|b: Bounds| b.with_position(50, 50));
        });
        assert_eq!(tree.bounds(a), Some(Bounds::new(50, 50, 10, 10)));
        assert_eq!(tree.content_bounds(root), Some(Bounds::new(50, 50, 10, 10)));
        assert_eq!(tree.bounds(inner), Some(Bounds::new(51, 51, 2, 2)));
    }

    #[test]
    fn flag_filter_that_hides_clears_focus() {
        let mut tree = Tree::new();
        let a = tree.insert(None, focusable(0, 0, 10, 10)).unwrap();
        tree.set_focus(Some(a)).unwrap();
        tree.element_hooks(a).unwrap().flags(|h| {
            h.add_filter(|f: ElementFlags| f - ElementFlags::VISIBLE);
        });
        assert_eq!(tree.focused(), None);
        assert!(!tree.is_rendered(a));
    }

    #[test]
    fn hooks_for_stale_ids_are_refused() {
        let mut tree = Tree::new();
        let a = tree.insert(None, plain(0, 0, 1, 1)).unwrap();
        tree.remove(a).unwrap();
        assert_eq!(tree.element_hooks(a).unwrap_err(), TreeError::Stale(a));
    }
}
