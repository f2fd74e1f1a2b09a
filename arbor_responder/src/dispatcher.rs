// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dispatcher: routes host input through a [`Tree`].
//!
//! ## Routing
//!
//! Pointer events (press, release, scroll) are offered in two phases:
//!
//! 1. [`Phase::Capture`]: custom handlers along the root→target hit path,
//!    ancestors first. Built-in behaviors do not run here.
//! 2. [`Phase::Main`]: every visible element under the pointer, front-most
//!    first. Each element's custom handler runs before its built-in behavior.
//!
//! The first [`Outcome::Handled`] stops routing. An event nobody handles has
//! no side effects.
//!
//! ## Claims
//!
//! The element that handles a press becomes the claimant. It enters the
//! dragging state, and the nearest focusable element on its path to the root
//! takes focus. Until the matching release, pointer motion is delivered to the
//! claimant as [`InputEvent::MouseDrag`] regardless of where the pointer is,
//! with the fractional delta accumulated so only whole pixels are applied.
//! The release also goes to the claimant and then ends the claim.
//!
//! ## Keyboard
//!
//! Key presses and typed characters go only to the focused element.

use alloc::boxed::Box;
use alloc::vec::Vec;

use arbor_tree::{ElementId, Tree};
use hashbrown::HashMap;
use kurbo::{Point, Vec2};

use crate::handler::{InputHandler, builtin};
use crate::hover::{HoverEvent, HoverState};
use crate::types::{InputContext, InputEvent, MouseButton, Outcome, Phase};

/// An active press claim.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Claim {
    /// Element receiving drag and release.
    pub element: ElementId,
    /// Button that started the claim.
    pub button: MouseButton,
}

/// Result of a pointer-move sample.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PointerUpdate {
    /// Outcome of the synthesized drag, if a claim was active.
    pub drag: Option<Outcome>,
    /// Hover transitions caused by the move.
    pub hover: Vec<HoverEvent>,
}

/// Routes input events through a tree.
///
/// Holds per-element handlers, the current claim, hover state, and the last
/// known pointer position. Like the tree it drives, it lives on the UI thread.
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<ElementId, Box<dyn InputHandler>>,
    claim: Option<Claim>,
    hover: HoverState,
    pointer: Point,
}

impl core::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.handlers.len())
            .field("claim", &self.claim)
            .field("hover", &self.hover)
            .field("pointer", &self.pointer)
            .finish()
    }
}

impl Dispatcher {
    /// Create a dispatcher with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the custom handler for `id`, returning the one it replaces.
    pub fn set_handler(
        &mut self,
        id: ElementId,
        handler: impl InputHandler + 'static,
    ) -> Option<Box<dyn InputHandler>> {
        self.handlers.insert(id, Box::new(handler))
    }

    /// Remove the custom handler for `id`.
    pub fn remove_handler(&mut self, id: ElementId) -> Option<Box<dyn InputHandler>> {
        self.handlers.remove(&id)
    }

    /// Drop handlers registered for elements that are no longer alive.
    ///
    /// [`Dispatcher::dispatch`] does this before routing each event.
    pub fn prune(&mut self, tree: &Tree) {
        self.handlers.retain(|id, _| tree.is_alive(*id));
    }

    /// The active claim.
    pub fn claim(&self) -> Option<Claim> {
        self.claim
    }

    /// Last pointer position seen.
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Current hovered path, outer-most first.
    pub fn hovered(&self) -> &[ElementId] {
        self.hover.current_path()
    }

    /// Route one event.
    pub fn dispatch(&mut self, tree: &mut Tree, event: InputEvent) -> Outcome {
        if let Some(pos) = event.position() {
            self.pointer = pos;
        }
        self.prune(tree);
        log::trace!("dispatch {:?}", event.kind());
        match event {
            InputEvent::MousePress { button, position } => {
                let Some(target) = self.route_pointer(tree, event, position) else {
                    return Outcome::Continue;
                };
                self.start_claim(tree, target, button);
                Outcome::Handled
            }
            InputEvent::MouseRelease { button, position } => match self.live_claim(tree) {
                Some(claim) if claim.button == button => {
                    let outcome = self.deliver(tree, Phase::Main, claim.element, event, (0, 0));
                    self.release(tree);
                    outcome
                }
                _ => match self.route_pointer(tree, event, position) {
                    Some(_) => Outcome::Handled,
                    None => Outcome::Continue,
                },
            },
            InputEvent::MouseDrag { delta, .. } => {
                let Some(claim) = self.live_claim(tree) else {
                    return Outcome::Continue;
                };
                let Ok(step) = tree.accumulate_drag(claim.element, delta) else {
                    return Outcome::Continue;
                };
                self.deliver(tree, Phase::Main, claim.element, event, step)
            }
            InputEvent::MouseScroll { position, .. } => {
                match self.route_pointer(tree, event, position) {
                    Some(_) => Outcome::Handled,
                    None => Outcome::Continue,
                }
            }
            InputEvent::KeyPress { .. } | InputEvent::CharType { .. } => {
                let Some(focused) = tree.focused() else {
                    return Outcome::Continue;
                };
                self.deliver(tree, Phase::Main, focused, event, (0, 0))
            }
        }
    }

    /// Feed a host pointer sample.
    ///
    /// With an active claim this synthesizes a [`InputEvent::MouseDrag`] to the
    /// claimant. Hover is updated either way.
    pub fn pointer_moved(
        &mut self,
        tree: &mut Tree,
        position: Point,
        delta: Vec2,
    ) -> PointerUpdate {
        let drag = match self.claim {
            Some(claim) => Some(self.dispatch(
                tree,
                InputEvent::MouseDrag {
                    button: claim.button,
                    position,
                    delta,
                },
            )),
            None => None,
        };
        self.pointer = position;
        let hover = self.hover.update(tree, position);
        PointerUpdate { drag, hover }
    }

    /// Drop the active claim without delivering a release.
    pub fn cancel(&mut self, tree: &mut Tree) {
        if let Some(claim) = self.claim {
            log::debug!("cancelling claim on {:?}", claim.element);
        }
        self.release(tree);
    }

    /// Pointer left the host surface: clear hover.
    pub fn pointer_left(&mut self, tree: &mut Tree) -> Vec<HoverEvent> {
        self.hover.clear(tree)
    }

    fn start_claim(&mut self, tree: &mut Tree, target: ElementId, button: MouseButton) {
        // A handler may have removed or hidden its own element.
        if !tree.is_rendered(target) {
            return;
        }
        if let Some(old) = self.claim.take() {
            let _ = tree.end_drag(old.element);
        }
        if tree.begin_drag(target).is_err() {
            return;
        }
        self.claim = Some(Claim {
            element: target,
            button,
        });
        log::debug!("{target:?} claimed {button:?}");
        if let Some(focus) = tree.focusable_ancestor(target) {
            let _ = tree.set_focus(Some(focus));
        }
    }

    fn release(&mut self, tree: &mut Tree) {
        if let Some(claim) = self.claim.take() {
            let _ = tree.end_drag(claim.element);
        }
    }

    /// The claim, if its element is still alive and dragging.
    fn live_claim(&mut self, tree: &Tree) -> Option<Claim> {
        let claim = self.claim?;
        if tree.is_dragging(claim.element) {
            return Some(claim);
        }
        log::warn!(
            "dropping claim on {:?}: element detached or cancelled",
            claim.element
        );
        self.claim = None;
        None
    }

    /// Offer a positional event to capture then main candidates.
    fn route_pointer(
        &mut self,
        tree: &mut Tree,
        event: InputEvent,
        pos: Point,
    ) -> Option<ElementId> {
        let path = tree.hit_path(pos)?;
        for &id in &path {
            if self.offer_custom(tree, Phase::Capture, id, event, (0, 0)).is_handled() {
                return Some(id);
            }
        }
        for id in tree.hits_at(pos) {
            if self.deliver(tree, Phase::Main, id, event, (0, 0)).is_handled() {
                return Some(id);
            }
        }
        None
    }

    /// Custom handler, then built-in behavior.
    fn deliver(
        &mut self,
        tree: &mut Tree,
        phase: Phase,
        element: ElementId,
        event: InputEvent,
        drag: (i32, i32),
    ) -> Outcome {
        if self.offer_custom(tree, phase, element, event, drag).is_handled() {
            return Outcome::Handled;
        }
        let cx = InputContext {
            phase,
            element,
            event,
            drag,
        };
        builtin(tree, &cx).unwrap_or_else(|err| {
            log::warn!("built-in input for {element:?} failed: {err}");
            Outcome::Continue
        })
    }

    fn offer_custom(
        &mut self,
        tree: &mut Tree,
        phase: Phase,
        element: ElementId,
        event: InputEvent,
        drag: (i32, i32),
    ) -> Outcome {
        let Some(handler) = self.handlers.get_mut(&element) else {
            return Outcome::Continue;
        };
        let cx = InputContext {
            phase,
            element,
            event,
            drag,
        };
        handler.input(tree, &cx)
    }
}
