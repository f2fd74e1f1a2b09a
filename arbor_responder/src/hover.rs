// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking: enter/leave transitions from hit-path changes.
//!
//! The hovered path is the hoverable subset of the root→target hit path under
//! the pointer. When it changes, the elements that dropped out receive `Leave`
//! from inner-most to outer-most, then the new ones receive `Enter` from
//! outer-most to inner-most. [`InteractionState::HOVERED`] on the tree follows
//! the same transitions.

use alloc::vec::Vec;

use arbor_tree::{ElementFlags, ElementId, InteractionState, Tree};
use kurbo::Point;

/// A hover transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent {
    /// Pointer entered the element.
    Enter(ElementId),
    /// Pointer left the element.
    Leave(ElementId),
}

/// Hovered path of one pointer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState {
    current: Vec<ElementId>,
}

impl HoverState {
    /// Nothing hovered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current hovered path, outer-most first.
    pub fn current_path(&self) -> &[ElementId] {
        &self.current
    }

    /// Recompute the hovered path for a pointer at `pos`.
    pub fn update(&mut self, tree: &mut Tree, pos: Point) -> Vec<HoverEvent> {
        let path: Vec<ElementId> = tree
            .hit_path(pos)
            .unwrap_or_default()
            .into_iter()
            .filter(|id| {
                tree.flags(*id)
                    .is_some_and(|f| f.contains(ElementFlags::HOVERABLE))
            })
            .collect();
        self.update_path(tree, &path)
    }

    /// Leave everything.
    pub fn clear(&mut self, tree: &mut Tree) -> Vec<HoverEvent> {
        self.update_path(tree, &[])
    }

    /// Move to `new_path` and apply the transitions to the tree.
    ///
    /// Elements that are no longer alive are dropped from the old path without
    /// a `Leave`.
    pub fn update_path(&mut self, tree: &mut Tree, new_path: &[ElementId]) -> Vec<HoverEvent> {
        self.current.retain(|id| tree.is_alive(*id));
        let shared = self
            .current
            .iter()
            .zip(new_path)
            .take_while(|(a, b)| a == b)
            .count();

        let mut out = Vec::new();
        for &id in self.current[shared..].iter().rev() {
            out.push(HoverEvent::Leave(id));
            let _ = tree.set_hovered(id, false);
        }
        for &id in &new_path[shared..] {
            out.push(HoverEvent::Enter(id));
            let _ = tree.set_hovered(id, true);
        }
        if !out.is_empty() {
            log::trace!("hover transitions: {out:?}");
        }
        self.current.clear();
        self.current.extend_from_slice(new_path);
        out
    }

    /// Whether `id` is on the hovered path according to the tree.
    pub fn is_hovered(tree: &Tree, id: ElementId) -> bool {
        tree.state(id)
            .is_some_and(|s| s.contains(InteractionState::HOVERED))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use arbor_property::writer;
    use arbor_tree::{Bounds, Element};

    /// root ⊃ {left, right ⊃ inner}
    fn scene() -> (Tree, [ElementId; 4]) {
        let mut tree = Tree::new();
        let root = tree
            .insert(None, Element::new(Bounds::new(0, 0, 100, 100)))
            .unwrap();
        let left = tree
            .insert(Some(root), Element::new(Bounds::new(0, 0, 50, 100)))
            .unwrap();
        let right = tree
            .insert(Some(root), Element::new(Bounds::new(50, 0, 50, 100)))
            .unwrap();
        let inner = tree
            .insert(Some(right), Element::new(Bounds::new(60, 10, 10, 10)))
            .unwrap();
        (tree, [root, left, right, inner])
    }

    #[test]
    fn enters_outer_to_inner() {
        let (mut tree, [root, _, right, inner]) = scene();
        let mut h = HoverState::new();
        let ev = h.update(&mut tree, Point::new(65.0, 15.0));
        assert_eq!(
            ev,
            vec![
                HoverEvent::Enter(root),
                HoverEvent::Enter(right),
                HoverEvent::Enter(inner)
            ]
        );
        assert!(HoverState::is_hovered(&tree, inner));
        assert!(HoverState::is_hovered(&tree, root));
    }

    #[test]
    fn branch_change_leaves_then_enters() {
        let (mut tree, [root, left, right, inner]) = scene();
        let mut h = HoverState::new();
        h.update(&mut tree, Point::new(65.0, 15.0));
        let ev = h.update(&mut tree, Point::new(10.0, 10.0));
        assert_eq!(
            ev,
            vec![
                HoverEvent::Leave(inner),
                HoverEvent::Leave(right),
                HoverEvent::Enter(left)
            ]
        );
        assert_eq!(h.current_path(), &[root, left]);
        assert!(!HoverState::is_hovered(&tree, right));
    }

    #[test]
    fn same_path_is_quiet() {
        let (mut tree, _) = scene();
        let mut h = HoverState::new();
        h.update(&mut tree, Point::new(10.0, 10.0));
        assert!(h.update(&mut tree, Point::new(11.0, 12.0)).is_empty());
    }

    #[test]
    fn non_hoverable_elements_are_skipped() {
        let (mut tree, [root, _, right, inner]) = scene();
        tree.set_flags(right, ElementFlags::VISIBLE, writer!())
            .unwrap();
        let mut h = HoverState::new();
        h.update(&mut tree, Point::new(65.0, 15.0));
        assert_eq!(h.current_path(), &[root, inner]);
        assert!(!HoverState::is_hovered(&tree, right));
    }

    #[test]
    fn removed_elements_leave_silently() {
        let (mut tree, [root, _, right, _]) = scene();
        let mut h = HoverState::new();
        h.update(&mut tree, Point::new(65.0, 15.0));
        tree.remove(right).unwrap();
        let ev = h.update(&mut tree, Point::new(65.0, 15.0));
        assert!(ev.is_empty(), "root is still hovered: {ev:?}");
        assert_eq!(h.current_path(), &[root]);
        assert_eq!(h.clear(&mut tree), vec![HoverEvent::Leave(root)]);
    }
}
