// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rounded bar geometry.

use kinviz_core::PathData;
use kurbo::Affine;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Builds a vertical bar `width` wide and `height` tall with fully rounded ends.
///
/// The path starts at the bar's bottom-left corner, sitting at `y = 0`, and grows upward. A bar
/// shorter than its width degrades into a lens (two facing arcs), and a zero height is empty.
pub fn bar_path(width: f64, height: f64) -> PathData {
    let mut path = PathData::new();
    if height == 0.0 || height.is_nan() {
        return path;
    }
    let r = width / 2.0;
    let straight = height - width;
    if straight < 0.0 {
        let dy = -straight / 2.0;
        let dx = r - (r * r - dy * dy).max(0.0).sqrt();
        path.move_to((dx, dy));
        path.arc_by(r, false, false, (2.0 * (r - dx), 0.0));
        path.arc_by(r, false, false, (2.0 * (dx - r), 0.0));
    } else {
        path.move_to((0.0, 0.0));
        path.arc_by(r, false, false, (width, 0.0));
        path.vertical_by(-straight);
        path.arc_by(r, false, false, (-width, 0.0));
    }
    path.close();
    path
}

/// Bar dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarMarkSpec {
    /// Bar width.
    pub width: f64,
    /// Height of a full (value `1`) bar.
    pub height: f64,
}

impl BarMarkSpec {
    /// Creates a bar spec.
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The full-height background capsule.
    pub fn background(&self) -> PathData {
        bar_path(self.width, self.height)
    }

    /// The foreground bar for `value` (`1` is full height).
    pub fn foreground(&self, value: f64) -> PathData {
        bar_path(self.width, self.height * value)
    }

    /// Places the bar paths in the chart box: bottom-aligned, with the lower cap inside the box.
    pub fn transform(&self) -> Affine {
        Affine::translate((0.0, self.height - self.width / 2.0))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kinviz_core::PathCommand;
    use kurbo::{Point, Shape};

    use super::*;

    #[test]
    fn zero_height_is_empty() {
        assert!(bar_path(24.0, 0.0).is_empty());
        assert!(BarMarkSpec::new(24.0, 100.0).foreground(0.0).is_empty());
    }

    #[test]
    fn full_value_is_a_capsule() {
        let spec = BarMarkSpec::new(24.0, 100.0);
        assert_eq!(
            spec.foreground(1.0).to_svg(),
            "M0 0 a12 12 0 0 0 24 0 v-76 a12 12 0 0 0 -24 0 Z"
        );
        assert_eq!(spec.foreground(1.0), spec.background());
    }

    #[test]
    fn capsule_fills_the_box_once_placed() {
        let spec = BarMarkSpec::new(24.0, 100.0);
        let placed = spec.transform() * spec.background().to_bez_path(1e-4);
        let bounds = placed.bounding_box();
        for (got, want) in [
            (bounds.x0, 0.0),
            (bounds.y0, 0.0),
            (bounds.x1, 24.0),
            (bounds.y1, 100.0),
        ] {
            assert!((got - want).abs() < 1e-2, "{bounds:?}");
        }
    }

    #[test]
    fn short_bar_is_a_lens() {
        let path = bar_path(24.0, 12.0);
        let commands = path.commands();
        assert_eq!(commands.len(), 4);
        let PathCommand::MoveTo(start) = commands[0] else {
            panic!("expected a move, got {:?}", commands[0]);
        };
        let dx = 12.0 - 108.0_f64.sqrt();
        assert!((start.x - dx).abs() < 1e-12, "{start:?}");
        assert_eq!(start.y, 6.0);
        let PathCommand::ArcBy { radius, delta, .. } = commands[1] else {
            panic!("expected an arc, got {:?}", commands[1]);
        };
        assert_eq!(radius, 12.0);
        assert!((delta.x - 2.0 * (12.0 - dx)).abs() < 1e-12, "{delta:?}");
        assert_eq!(delta.y, 0.0);

        let lens = path.to_bez_path(1e-3).bounding_box();
        assert!((lens.height() - 12.0).abs() < 1e-2, "lens height {lens:?}");
        assert!(path.contains_even_odd(Point::new(12.0, 6.0), 0.1), "lens middle is filled");
    }
}
