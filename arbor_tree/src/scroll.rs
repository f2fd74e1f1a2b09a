// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll math: mapping between a normalized scroll fraction and content placement.
//!
//! All functions are pure. Given a viewport `V`, content `C`, fraction `s` in
//! `[0, 1]²` and padding `p`:
//!
//! - `max_scroll = max(0, C.size - (V.size - 2p))` per axis.
//! - Placement: `C.pos = V.pos + p - round(s * max_scroll)`.
//! - Inverse: `s = ((V.pos + p) - C.pos) / max_scroll`, or `0` when nothing can
//!   scroll, clamped to `[0, 1]`.
//!
//! At `s = 0` the content's leading edge sits on the padded leading edge of the
//! viewport; at `s = 1` its trailing edge sits on the padded trailing edge.
//!
//! ```
//! use arbor_tree::Bounds;
//! use arbor_tree::scroll::{max_scroll, position_from_fraction};
//! use kurbo::Vec2;
//!
//! let viewport = Bounds::new(0, 0, 100, 100);
//! let content = Bounds::new(0, 0, 300, 100);
//! assert_eq!(max_scroll(viewport, content, 0), (200, 0));
//! assert_eq!(position_from_fraction(viewport, content, Vec2::new(0.5, 0.0), 0), (-100, 0));
//! ```

use kurbo::Vec2;

use crate::Bounds;

/// Scrollable distance along one axis.
pub fn max_scroll_axis(viewport_size: i32, content_size: i32, padding: i32) -> i32 {
    let padded = viewport_size.saturating_sub(padding.saturating_mul(2));
    content_size.saturating_sub(padded).max(0)
}

/// Scrollable distance along both axes.
pub fn max_scroll(viewport: Bounds, content: Bounds, padding: i32) -> (i32, i32) {
    (
        max_scroll_axis(viewport.width, content.width, padding),
        max_scroll_axis(viewport.height, content.height, padding),
    )
}

/// Content origin for the given scroll fraction.
///
/// Only the content's size is read; its current position is irrelevant.
pub fn position_from_fraction(
    viewport: Bounds,
    content: Bounds,
    fraction: Vec2,
    padding: i32,
) -> (i32, i32) {
    let (max_x, max_y) = max_scroll(viewport, content, padding);
    (
        viewport
            .x
            .saturating_add(padding)
            .saturating_sub(round(fraction.x * f64::from(max_x))),
        viewport
            .y
            .saturating_add(padding)
            .saturating_sub(round(fraction.y * f64::from(max_y))),
    )
}

/// Scroll fraction implied by the content's current position.
pub fn fraction_from_position(viewport: Bounds, content: Bounds, padding: i32) -> Vec2 {
    let (max_x, max_y) = max_scroll(viewport, content, padding);
    Vec2::new(
        axis_fraction(
            viewport.x.saturating_add(padding).saturating_sub(content.x),
            max_x,
        ),
        axis_fraction(
            viewport.y.saturating_add(padding).saturating_sub(content.y),
            max_y,
        ),
    )
}

fn axis_fraction(offset: i32, max: i32) -> f64 {
    if max <= 0 {
        return 0.0;
    }
    (f64::from(offset) / f64::from(max)).clamp(0.0, 1.0)
}

/// Round half away from zero without `std`.
#[allow(
    clippy::cast_possible_truncation,
    reason = "Inputs are bounded by i32 scroll extents; `as` saturates otherwise."
)]
fn round(v: f64) -> i32 {
    if v >= 0.0 {
        (v + 0.5) as i32
    } else {
        (v - 0.5) as i32
    }
}
