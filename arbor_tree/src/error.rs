// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

use crate::ElementId;

/// Precondition violations reported by [`Tree`](crate::Tree) operations.
///
/// Every operation returning this error checks its preconditions before
/// mutating anything, so an `Err` leaves the tree untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    /// The identifier does not refer to a live element.
    #[error("element {0:?} is not alive")]
    Stale(ElementId),
    /// Attaching `child` under `parent` would make an element its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// Requested parent.
        parent: ElementId,
        /// Element being attached.
        child: ElementId,
    },
    /// The operation needs a specific element kind.
    #[error("element {id:?} is not a {expected}")]
    WrongKind {
        /// Offending element.
        id: ElementId,
        /// Kind the operation needs (`"window"`, `"panel"`).
        expected: &'static str,
    },
    /// Focus was requested for an element that is not
    /// [`FOCUSABLE`](crate::ElementFlags::FOCUSABLE).
    #[error("element {0:?} is not focusable")]
    NotFocusable(ElementId),
}

/// Failure reported by an [`Overlay`](crate::render::Overlay) while rendering.
///
/// The tree logs these and carries on with the frame.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct OverlayError(pub String);
