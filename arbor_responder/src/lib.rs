// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_responder --heading-base-level=0

//! Arbor Responder: input dispatch for `arbor_tree`.
//!
//! ## Overview
//!
//! The [`Dispatcher`] takes discrete host events ([`InputEvent`]) and routes
//! them through a [`Tree`](arbor_tree::Tree):
//!
//! - Pointer events run a capture phase along the hit path, then a main phase
//!   over every element under the pointer, front-most first.
//! - A handled press claims the pointer: drag and release go to the claimant
//!   until the claim ends, and the claimant's nearest focusable ancestor takes
//!   focus.
//! - Keyboard input goes to the focused element only.
//! - Pointer samples update hover with leave/enter transitions.
//!
//! Custom behavior is attached per element as an [`InputHandler`]. Windows and
//! panels carry built-in behavior (title drag, close and maximize boxes, wheel
//! and key scrolling, content drag) that runs when no custom handler claims
//! the event first.
//!
//! ## Minimal usage
//!
//! ```
//! use arbor_responder::{Dispatcher, InputEvent, MouseButton, Outcome};
//! use arbor_tree::{Bounds, Element, Tree, Window};
//! use kurbo::{Point, Vec2};
//!
//! let mut tree = Tree::new();
//! let desk = tree.insert(None, Element::new(Bounds::new(0, 0, 640, 480))).unwrap();
//! let win = tree
//!     .insert(Some(desk), Element::window(Bounds::new(20, 20, 200, 100), Window::new("Hi")))
//!     .unwrap();
//!
//! let mut dispatcher = Dispatcher::new();
//! let grab = InputEvent::MousePress {
//!     button: MouseButton::Left,
//!     position: Point::new(60.0, 25.0),
//! };
//! assert_eq!(dispatcher.dispatch(&mut tree, grab), Outcome::Handled);
//! dispatcher.pointer_moved(&mut tree, Point::new(70.0, 35.0), Vec2::new(10.0, 10.0));
//! assert_eq!(tree.bounds(win), Some(Bounds::new(30, 30, 200, 100)));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod dispatcher;
mod handler;
pub mod hover;
pub mod types;

pub use dispatcher::{Claim, Dispatcher, PointerUpdate};
pub use handler::InputHandler;
pub use types::{
    EventKind, InputContext, InputEvent, Key, Modifiers, MouseButton, Outcome, Phase,
};
