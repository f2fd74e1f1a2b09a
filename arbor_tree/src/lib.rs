// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=arbor_tree --heading-base-level=0

//! Arbor Tree: a retained-mode element tree for immediate-feedback UIs.
//!
//! - Elements live in a generational arena. Children are ordered id lists and
//!   the parent link is a plain id, so there is exactly one owner per element.
//! - Every mutable attribute is an observable [`Property`](arbor_property::Property).
//!   Writes go through [`Tree`] setters so that layout reactions (moving
//!   children, re-initializing, re-settling scroll content) always run.
//! - Element kinds are a closed enum: plain elements, scroll [`Panel`]s and
//!   [`Window`]s. Painting and child construction are strategy objects
//!   ([`Paint`](render::Paint), init callbacks) rather than subtypes.
//!
//! Bounds are integer rectangles in absolute screen space. Moving an element
//! moves its subtree with it.
//!
//! ## Not an input router
//!
//! This crate keeps interaction *state* (hovered, focused, dragging, drag
//! carry) and exposes the operations input handling needs. Routing events to
//! elements lives in `arbor_responder`.
//!
//! ## API overview
//!
//! - [`Tree`]: the arena, structure edits, hit testing, focus.
//! - [`Element`]: bounds, flags, kind, painter, init callback.
//! - [`scroll`]: pure scroll math between fractions and content placement.
//! - [`Panel`] and [`Window`]: kind-specific controllers implemented on [`Tree`].
//! - [`render`]: the [`Surface`](render::Surface) contract and the paint walk.
//!
//! ### Minimal usage
//!
//! ```
//! use arbor_property::writer;
//! use arbor_tree::{Bounds, Element, Panel, Tree};
//! use kurbo::{Point, Vec2};
//!
//! let mut tree = Tree::new();
//! let panel = tree
//!     .insert(None, Element::panel(Bounds::new(0, 0, 100, 100), Panel::default()))
//!     .unwrap();
//! let content = tree
//!     .insert(Some(panel), Element::new(Bounds::new(0, 0, 300, 100)))
//!     .unwrap();
//!
//! // Half-way across a 200 px scroll range.
//! tree.set_scroll(panel, Vec2::new(0.5, 0.0), writer!()).unwrap();
//! assert_eq!(tree.bounds(content).unwrap().x, -100);
//!
//! // The content is hit first where it overlaps the panel.
//! assert_eq!(tree.hits_at(Point::new(10.0, 10.0)), vec![content, panel]);
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod drag;
mod element;
mod error;
mod panel;
pub mod render;
pub mod scroll;
mod tree;
mod types;
mod window;

pub use drag::DragAccumulator;
pub use element::{Element, ElementKind, InitFn};
pub use error::{OverlayError, TreeError};
pub use panel::{Panel, PanelHooks, PanelStyle};
pub use tree::{ElementHooks, Tree};
pub use types::{Bounds, Color, ElementFlags, ElementId, InteractionState};
pub use window::{CloseOperation, Window, WindowHooks, WindowPart};
