// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear gradient vectors in object-bounding-box units.

use kurbo::Point;

/// The `x1 y1 x2 y2` attributes of an SVG `<linearGradient>`, each `0` or `1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientVector {
    /// Start x.
    pub x1: f64,
    /// Start y.
    pub y1: f64,
    /// End x.
    pub x2: f64,
    /// End y.
    pub y2: f64,
}

impl GradientVector {
    /// Top edge to bottom edge.
    pub const TOP_TO_BOTTOM: Self = Self {
        x1: 0.0,
        y1: 0.0,
        x2: 0.0,
        y2: 1.0,
    };

    /// Bottom edge to top edge.
    pub const BOTTOM_TO_TOP: Self = Self {
        x1: 0.0,
        y1: 1.0,
        x2: 0.0,
        y2: 0.0,
    };

    /// Runs along each axis from whichever of `from` and `to` has the smaller coordinate.
    ///
    /// Ties resolve toward `to` first, so a vertical chord yields `x1 = 1, x2 = 0`.
    pub fn between(from: Point, to: Point) -> Self {
        let (x1, x2) = if from.x < to.x { (0.0, 1.0) } else { (1.0, 0.0) };
        let (y1, y2) = if from.y < to.y { (0.0, 1.0) } else { (1.0, 0.0) };
        Self { x1, y1, x2, y2 }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn follows_the_chord_direction() {
        let v = GradientVector::between(Point::new(0.0, 10.0), Point::new(5.0, 2.0));
        assert_eq!(
            v,
            GradientVector {
                x1: 0.0,
                y1: 1.0,
                x2: 1.0,
                y2: 0.0
            }
        );
        let tie = GradientVector::between(Point::new(3.0, 3.0), Point::new(3.0, 3.0));
        assert_eq!((tie.x1, tie.x2), (1.0, 0.0), "ties start from the far edge");
    }
}
