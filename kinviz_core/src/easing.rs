// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Easing curves for timed progressions.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Maps linear time `t ∈ [0, 1]` onto eased progress.
///
/// Every curve maps `0 → 0` and `1 → 1` exactly.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum Easing {
    /// Identity.
    Linear,
    /// CSS `ease`-like cubic Bézier `(0.42, 0, 1, 1)`.
    Ease,
    /// [`Easing::Ease`] mirrored around the midpoint.
    ///
    /// This is the default chart transition curve. It is symmetric, so `0.5 → 0.5`.
    #[default]
    EaseInOut,
    /// Exponential ease-out, used by the counter's count-up.
    EaseOutExpo,
    /// A cubic Bézier timing curve through `(0, 0)`, `(x1, y1)`, `(x2, y2)`, `(1, 1)`.
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// Applies the curve to `t`, clamping `t` into `[0, 1]` first.
    pub fn apply(self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            Self::Linear => t,
            Self::Ease => cubic_bezier(0.42, 0.0, 1.0, 1.0, t),
            Self::EaseInOut => {
                if t < 0.5 {
                    Self::Ease.apply(t * 2.0) / 2.0
                } else {
                    1.0 - Self::Ease.apply((1.0 - t) * 2.0) / 2.0
                }
            }
            Self::EaseOutExpo => (1.0 - 2.0_f64.powf(-10.0 * t)) * 1024.0 / 1023.0,
            Self::CubicBezier(x1, y1, x2, y2) => cubic_bezier(x1, y1, x2, y2, t),
        }
    }
}

const NEWTON_ITERATIONS: usize = 8;
const NEWTON_MIN_SLOPE: f64 = 1e-3;
const SUBDIVISION_PRECISION: f64 = 1e-7;
const SUBDIVISION_MAX_ITERATIONS: usize = 32;

fn bezier_component(a1: f64, a2: f64, s: f64) -> f64 {
    // B(s) for a curve with endpoints 0 and 1.
    let inv = 1.0 - s;
    3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
}

fn bezier_slope(a1: f64, a2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
}

/// Solves `x(s) = x` for the curve parameter, then evaluates `y(s)`.
fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    if x1 == y1 && x2 == y2 {
        return x;
    }

    let mut s = x;
    for _ in 0..NEWTON_ITERATIONS {
        let slope = bezier_slope(x1, x2, s);
        if slope.abs() < NEWTON_MIN_SLOPE {
            break;
        }
        let err = bezier_component(x1, x2, s) - x;
        if err.abs() < SUBDIVISION_PRECISION {
            return bezier_component(y1, y2, s);
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..SUBDIVISION_MAX_ITERATIONS {
        let err = bezier_component(x1, x2, s) - x;
        if err.abs() < SUBDIVISION_PRECISION {
            break;
        }
        if err > 0.0 {
            hi = s;
        } else {
            lo = s;
        }
        s = (lo + hi) / 2.0;
    }
    bezier_component(y1, y2, s)
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    const CURVES: [Easing; 5] = [
        Easing::Linear,
        Easing::Ease,
        Easing::EaseInOut,
        Easing::EaseOutExpo,
        Easing::CubicBezier(0.25, 0.1, 0.25, 1.0),
    ];

    #[test]
    fn endpoints_are_exact() {
        for curve in CURVES {
            assert_eq!(curve.apply(0.0), 0.0, "{curve:?} at 0");
            assert_eq!(curve.apply(1.0), 1.0, "{curve:?} at 1");
            assert_eq!(curve.apply(-2.0), 0.0, "{curve:?} clamps below");
            assert_eq!(curve.apply(3.0), 1.0, "{curve:?} clamps above");
        }
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        assert_eq!(Easing::EaseInOut.apply(0.5), 0.5);
        for t in [0.1, 0.2, 0.35, 0.45] {
            let a = Easing::EaseInOut.apply(t);
            let b = Easing::EaseInOut.apply(1.0 - t);
            assert!((a + b - 1.0).abs() < 1e-6, "t={t}: {a} + {b}");
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for curve in CURVES {
            let mut last = 0.0;
            for i in 1..=100 {
                let v = curve.apply(f64::from(i) / 100.0);
                assert!(v + 1e-9 >= last, "{curve:?} decreased at {i}");
                last = v;
            }
        }
    }

    #[test]
    fn ease_starts_slowly() {
        assert!(Easing::Ease.apply(0.25) < 0.25, "ease-in shape");
        assert!(Easing::EaseOutExpo.apply(0.25) > 0.8, "expo front-loads progress");
    }

    #[test]
    fn linear_bezier_is_identity() {
        let curve = Easing::CubicBezier(0.3, 0.3, 0.7, 0.7);
        assert_eq!(curve.apply(0.37), 0.37);
    }
}
