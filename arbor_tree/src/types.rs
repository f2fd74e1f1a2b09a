// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public value types: element identifiers, flags, interaction state, integer bounds, colors.

use kurbo::{Point, Rect};

/// Identifier for an element in the tree.
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ElementId` for it is now stale.
/// - On reuse of a freed slot, its generation is incremented.
///
/// Stale identifiers never alias a different live element because the
/// generation must match. Use [`Tree::is_alive`](crate::Tree::is_alive) to check.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ElementId(pub(crate) u32, pub(crate) u32);

impl ElementId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Static per-element behavior flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ElementFlags: u8 {
        /// Element is rendered and takes part in hit testing.
        const VISIBLE   = 0b0000_0001;
        /// Element may hold keyboard focus.
        const FOCUSABLE = 0b0000_0010;
        /// Element tracks pointer hover.
        const HOVERABLE = 0b0000_0100;
    }
}

impl Default for ElementFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::HOVERABLE
    }
}

bitflags::bitflags! {
    /// Transient interaction state, maintained by the tree and the input dispatcher.
    ///
    /// Hovered and focused are independent. Dragging is entered on a claimed press
    /// and left on release or cancellation.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct InteractionState: u8 {
        /// The pointer is over this element (or one of its hoverable descendants).
        const HOVERED  = 0b0000_0001;
        /// This element holds keyboard focus. At most one element per tree.
        const FOCUSED  = 0b0000_0010;
        /// This element claimed a press and receives drag and release events.
        const DRAGGING = 0b0000_0100;
    }
}

/// Integer rectangle in absolute screen space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width; never meaningful below zero.
    pub width: i32,
    /// Height; never meaningful below zero.
    pub height: i32,
}

impl Bounds {
    /// The empty rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create bounds from position and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Exclusive right edge. Saturates at the `i32` range.
    pub const fn right(self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge. Saturates at the `i32` range.
    pub const fn bottom(self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Degenerate bounds at this rectangle's origin.
    pub const fn origin(self) -> Self {
        Self::new(self.x, self.y, 0, 0)
    }

    /// Same size, moved by `(dx, dy)`. The position saturates.
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.x.saturating_add(dx),
            self.y.saturating_add(dy),
            self.width,
            self.height,
        )
    }

    /// Same size, placed at `(x, y)`.
    pub const fn with_position(self, x: i32, y: i32) -> Self {
        Self::new(x, y, self.width, self.height)
    }

    /// Shrink by `amount` on every side. Sizes do not go below zero.
    pub fn inset(self, amount: i32) -> Self {
        let shrink = amount.saturating_mul(2);
        Self::new(
            self.x.saturating_add(amount),
            self.y.saturating_add(amount),
            self.width.saturating_sub(shrink).max(0),
            self.height.saturating_sub(shrink).max(0),
        )
    }

    /// Smallest rectangle enclosing both.
    pub fn union(self, other: Self) -> Self {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Self::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y))
    }

    /// Whether `pt` lies inside, left/top inclusive and right/bottom exclusive.
    pub fn contains(self, pt: Point) -> bool {
        pt.x >= f64::from(self.x)
            && pt.x < f64::from(self.right())
            && pt.y >= f64::from(self.y)
            && pt.y < f64::from(self.bottom())
    }

    /// Convert to a Kurbo rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x),
            f64::from(self.y),
            f64::from(self.right()),
            f64::from(self.bottom()),
        )
    }
}

/// A color packed as `0xAARRGGBB`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u32);

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self(0x0000_0000);
    /// Opaque black.
    pub const BLACK: Self = Self(0xFF00_0000);
    /// Opaque white.
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    /// Pack individual channels.
    pub const fn from_argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        let argb = (a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32;
        Self(argb)
    }

    /// Opaque color from RGB channels.
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_argb(0xFF, r, g, b)
    }

    /// Packed `0xAARRGGBB` value.
    pub const fn argb(self) -> u32 {
        self.0
    }

    /// Alpha channel.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Only the top byte remains after the shift."
    )]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self((self.0 & 0x00FF_FFFF) | (a as u32) << 24)
    }

    /// Parse `#RRGGBB` (opaque) or `#AARRGGBB`. The leading `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let s = hex.strip_prefix('#').unwrap_or(hex);
        let raw = u32::from_str_radix(s, 16).ok()?;
        match s.len() {
            6 => Some(Self(0xFF00_0000 | raw)),
            8 => Some(Self(raw)),
            _ => None,
        }
    }
}
