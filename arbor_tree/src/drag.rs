// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sub-pixel drag accumulation.

use kurbo::Vec2;

/// Carries the fractional part of pointer deltas between events.
///
/// Each call applies only the integer part (truncated toward zero) of the
/// remainder plus the new delta, and keeps the rest for the next call, so slow
/// pointer motion is never lost to repeated truncation.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DragAccumulator {
    remainder: Vec2,
}

impl DragAccumulator {
    /// Fresh accumulator with no carry.
    pub const fn new() -> Self {
        Self {
            remainder: Vec2::ZERO,
        }
    }

    /// Add `delta` and return the whole pixels to apply now.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Truncation toward zero is the point; `as` saturates on overflow."
    )]
    pub fn accumulate(&mut self, delta: Vec2) -> (i32, i32) {
        let total = self.remainder + delta;
        let dx = total.x as i32;
        let dy = total.y as i32;
        self.remainder = Vec2::new(total.x - f64::from(dx), total.y - f64::from(dy));
        (dx, dy)
    }

    /// Fraction carried into the next call.
    pub fn remainder(&self) -> Vec2 {
        self.remainder
    }

    /// Drop any carry.
    pub fn reset(&mut self) {
        self.remainder = Vec2::ZERO;
    }
}
