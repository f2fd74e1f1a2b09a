// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for dispatch: phases, outcomes, input events, and handler context.

use arbor_tree::ElementId;
use kurbo::{Point, Vec2};

/// Phases of event routing.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Root→target walk along the hit path, before any element claims the event.
    Capture,
    /// Front-most first over every element under the pointer, or the focused
    /// element for keyboard input.
    Main,
}

/// Handler outcome controlling propagation.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum Outcome {
    /// Not interested; offer the event to the next candidate.
    #[default]
    Continue,
    /// Consumed; routing stops here.
    Handled,
}

impl Outcome {
    /// Whether the event was consumed.
    pub fn is_handled(self) -> bool {
        self == Self::Handled
    }
}

/// Mouse button identifier.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
    /// Any other button, by host index.
    Other(u16),
}

/// Keys the built-in behaviors understand. Everything else arrives as `Other`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Home.
    Home,
    /// End.
    End,
    /// Enter / return.
    Enter,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Host key code.
    Other(u32),
}

bitflags::bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0001;
        /// Control.
        const CTRL  = 0b0010;
        /// Alt / option.
        const ALT   = 0b0100;
        /// Meta / command / super.
        const META  = 0b1000;
    }
}

/// Discrete input from the host.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A button went down.
    MousePress {
        /// Button.
        button: MouseButton,
        /// Pointer position.
        position: Point,
    },
    /// A button went up.
    MouseRelease {
        /// Button.
        button: MouseButton,
        /// Pointer position.
        position: Point,
    },
    /// The pointer moved while a press was claimed.
    ///
    /// Usually synthesized by [`Dispatcher::pointer_moved`](crate::Dispatcher::pointer_moved).
    MouseDrag {
        /// Button held by the claim.
        button: MouseButton,
        /// Pointer position.
        position: Point,
        /// Raw pointer delta; may be fractional.
        delta: Vec2,
    },
    /// Wheel motion, in notches. Positive `y` is away from the user.
    MouseScroll {
        /// Pointer position.
        position: Point,
        /// Wheel delta.
        delta: Vec2,
    },
    /// A key went down.
    KeyPress {
        /// Key.
        key: Key,
        /// Held modifiers.
        modifiers: Modifiers,
    },
    /// A character was typed.
    CharType {
        /// The character.
        ch: char,
    },
}

/// The closed set of event kinds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum EventKind {
    /// [`InputEvent::MousePress`].
    MousePress,
    /// [`InputEvent::MouseRelease`].
    MouseRelease,
    /// [`InputEvent::MouseDrag`].
    MouseDrag,
    /// [`InputEvent::MouseScroll`].
    MouseScroll,
    /// [`InputEvent::KeyPress`].
    KeyPress,
    /// [`InputEvent::CharType`].
    CharType,
}

impl InputEvent {
    /// Kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::MousePress { .. } => EventKind::MousePress,
            Self::MouseRelease { .. } => EventKind::MouseRelease,
            Self::MouseDrag { .. } => EventKind::MouseDrag,
            Self::MouseScroll { .. } => EventKind::MouseScroll,
            Self::KeyPress { .. } => EventKind::KeyPress,
            Self::CharType { .. } => EventKind::CharType,
        }
    }

    /// Pointer position for mouse events.
    pub fn position(&self) -> Option<Point> {
        match *self {
            Self::MousePress { position, .. }
            | Self::MouseRelease { position, .. }
            | Self::MouseDrag { position, .. }
            | Self::MouseScroll { position, .. } => Some(position),
            Self::KeyPress { .. } | Self::CharType { .. } => None,
        }
    }
}

/// What a handler sees for one delivery.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InputContext {
    /// Routing phase.
    pub phase: Phase,
    /// Element the event is offered to.
    pub element: ElementId,
    /// The event.
    pub event: InputEvent,
    /// Whole-pixel drag step for [`InputEvent::MouseDrag`], after sub-pixel
    /// accumulation on the claimant. Zero for every other event.
    pub drag: (i32, i32),
}
