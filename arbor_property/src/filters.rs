// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Common filters for [`Property`](crate::Property).

use kurbo::Vec2;

/// Clamp an ordered scalar into `min..=max`.
///
/// Values that do not compare (NaN) collapse to `min`.
pub fn clamp<T: PartialOrd + Copy>(min: T, max: T) -> impl Fn(T) -> T {
    move |v| {
        if v >= max {
            max
        } else if v >= min {
            v
        } else {
            min
        }
    }
}

/// Clamp both components of a [`Vec2`] into `min..=max`.
pub fn clamp_vec2(min: f64, max: f64) -> impl Fn(Vec2) -> Vec2 {
    let c = clamp(min, max);
    move |v| Vec2::new(c(v.x), c(v.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_scalar_edges() {
        let c = clamp(0, 10);
        assert_eq!(c(-1), 0);
        assert_eq!(c(5), 5);
        assert_eq!(c(11), 10);
    }

    #[test]
    fn clamp_nan_falls_to_min() {
        let c = clamp(0.0_f64, 1.0);
        assert_eq!(c(f64::NAN), 0.0);
    }

    #[test]
    fn clamp_vec2_is_componentwise() {
        let c = clamp_vec2(0.0, 1.0);
        assert_eq!(c(Vec2::new(-0.5, 1.5)), Vec2::new(0.0, 1.0));
        assert_eq!(c(Vec2::new(0.3, 0.7)), Vec2::new(0.3, 0.7));
    }
}
