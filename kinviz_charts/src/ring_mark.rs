// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ring (donut) segment geometry.
//!
//! Angles are in degrees, clockwise on screen from the positive x axis, around the center
//! `(R, R)` of a `2R × 2R` box. The chart's rotation is a transform around that center and is not
//! baked into the paths.

extern crate alloc;

use alloc::vec::Vec;

use kinviz_core::PathData;
use kurbo::{Affine, Point, Vec2};

use crate::GradientVector;

/// The angular extent of one ring segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sweep {
    /// Start angle in degrees.
    pub start: f64,
    /// Angular extent in degrees.
    pub sweep: f64,
}

impl Sweep {
    /// End angle in degrees.
    pub fn end(self) -> f64 {
        self.start + self.sweep
    }

    /// The angle reported when this segment is selected.
    ///
    /// This is the segment's mid angle plus `rotation`, shifted up by 360 once if negative. A
    /// full circle reports `0`, and an empty segment reports its start boundary.
    pub fn selection_angle(self, rotation: f64) -> f64 {
        let angle = if self.sweep == 360.0 {
            0.0
        } else {
            self.start + self.sweep / 2.0 + rotation
        };
        if angle < 0.0 { angle + 360.0 } else { angle }
    }
}

/// Converts a percentage-normalized series into cumulative sweeps.
pub fn sweeps(series: &[f64]) -> Vec<Sweep> {
    let mut acc = 0.0;
    series
        .iter()
        .map(|&v| {
            let sweep = Sweep {
                start: acc * 360.0,
                sweep: v * 360.0,
            };
            acc += v;
            sweep
        })
        .collect()
}

/// The geometry of one ring segment.
#[derive(Clone, Debug, PartialEq)]
pub struct RingSegment {
    /// The angular extent the path was built from.
    pub sweep: Sweep,
    /// The segment outline; empty for a zero sweep.
    pub path: PathData,
    /// Direction of the segment's fill gradient, following its inner arc.
    pub gradient: GradientVector,
}

/// Ring dimensions, and the segment and decoration paths derived from them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingMarkSpec {
    /// Outer radius `R`.
    pub outer_radius: f64,
    /// Inner radius `r`.
    pub inner_radius: f64,
}

impl RingMarkSpec {
    /// Creates a ring spec.
    pub fn new(outer_radius: f64, inner_radius: f64) -> Self {
        Self {
            outer_radius,
            inner_radius,
        }
    }

    /// The ring center `(R, R)`.
    pub fn center(&self) -> Point {
        Point::new(self.outer_radius, self.outer_radius)
    }

    /// Side length of the ring's square box, `2R`.
    pub fn size(&self) -> f64 {
        2.0 * self.outer_radius
    }

    /// Rotation by `degrees` around the center.
    pub fn rotation(&self, degrees: f64) -> Affine {
        Affine::rotate_about(degrees.to_radians(), self.center())
    }

    fn on_circle(&self, radius: f64, degrees: f64) -> Point {
        self.center() + Vec2::from_angle(degrees.to_radians()) * radius
    }

    /// Builds the segment for one sweep.
    ///
    /// The outline runs along the inner arc, round-caps to the outer circle, runs back along the
    /// outer arc, and round-caps home. A sweep of 360° or more renders both full circles.
    pub fn segment(&self, sweep: Sweep) -> RingSegment {
        let (big_r, r) = (self.outer_radius, self.inner_radius);
        let inner_start = self.on_circle(r, sweep.start);
        let inner_end = self.on_circle(r, sweep.end());
        let gradient = GradientVector::between(inner_start, inner_end);

        let path = if sweep.sweep == 0.0 || sweep.sweep.is_nan() {
            PathData::new()
        } else if sweep.sweep >= 360.0 {
            self.ring_path()
        } else {
            let large_arc = sweep.sweep > 180.0;
            let cap = (big_r - r) / 2.0;
            let mut path = PathData::new();
            path.move_to(inner_start);
            path.arc_to(r, large_arc, true, inner_end);
            path.arc_to(cap, false, false, self.on_circle(big_r, sweep.end()));
            path.arc_to(big_r, large_arc, false, self.on_circle(big_r, sweep.start));
            path.arc_to(cap, false, true, inner_start);
            path.close();
            path
        };

        RingSegment {
            sweep,
            path,
            gradient,
        }
    }

    /// Builds one segment per element of a percentage-normalized series.
    pub fn segments(&self, series: &[f64]) -> Vec<RingSegment> {
        sweeps(series)
            .into_iter()
            .map(|sweep| self.segment(sweep))
            .collect()
    }

    /// The full annulus: outer and inner circles, for even-odd filling.
    pub fn ring_path(&self) -> PathData {
        let mut path = PathData::new();
        for radius in [self.outer_radius, self.inner_radius] {
            path.move_to((self.outer_radius + radius, self.outer_radius));
            path.arc_by(radius, false, true, (-2.0 * radius, 0.0));
            path.arc_by(radius, false, true, (2.0 * radius, 0.0));
        }
        path.close();
        path
    }

    /// The inner shadow clip: the ring box minus a disc of `clip_radius`, for even-odd clipping.
    pub fn clip_path(&self, clip_radius: f64) -> PathData {
        let (big_r, cr) = (self.outer_radius, clip_radius);
        let mut path = PathData::new();
        path.move_to((0.0, 0.0));
        path.horizontal_by(2.0 * big_r);
        path.vertical_by(2.0 * big_r);
        path.horizontal_by(-2.0 * big_r);
        path.close();
        path.move_to((big_r - cr, big_r));
        path.arc_by(cr, false, false, (2.0 * cr, 0.0));
        path.close();
        path.move_to((big_r + cr, big_r));
        path.arc_by(cr, false, false, (-2.0 * cr, 0.0));
        path.close();
        path
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn equal_shares_split_the_circle_evenly() {
        let s = sweeps(&[0.2; 5]);
        assert_eq!(s.len(), 5);
        for (i, sweep) in s.iter().enumerate() {
            assert!(close(sweep.sweep, 72.0), "sweep {i}: {sweep:?}");
            assert!(close(sweep.start, 72.0 * i as f64), "start {i}: {sweep:?}");
        }
    }

    #[test]
    fn sweeps_total_follows_the_input_sum() {
        for series in [&[0.1, 0.3, 0.15][..], &[0.5, 0.5], &[], &[0.0, 0.0]] {
            let total: f64 = sweeps(series).iter().map(|s| s.sweep).sum();
            let sum: f64 = series.iter().sum();
            assert!(close(total, 360.0 * sum), "{series:?}: {total}");
        }
    }

    #[test]
    fn quarter_segment_path() {
        let ring = RingMarkSpec::new(75.0, 55.0);
        let seg = ring.segment(Sweep {
            start: 0.0,
            sweep: 90.0,
        });
        assert_eq!(
            seg.path.to_svg(),
            "M130 75 A55 55 0 0 1 75 130 A10 10 0 0 0 75 150 A75 75 0 0 0 150 75 A10 10 0 0 1 130 75 Z"
        );
        assert_eq!(
            seg.gradient,
            GradientVector {
                x1: 1.0,
                y1: 0.0,
                x2: 0.0,
                y2: 1.0
            }
        );
    }

    #[test]
    fn large_arc_flag_past_half_circle() {
        let ring = RingMarkSpec::new(75.0, 55.0);
        let flags = |sweep: f64| {
            let seg = ring.segment(Sweep { start: 10.0, sweep });
            match seg.path.commands()[1] {
                kinviz_core::PathCommand::ArcTo { large_arc, .. } => large_arc,
                other => panic!("expected an arc, got {other:?}"),
            }
        };
        assert!(!flags(180.0), "exactly half is not large");
        assert!(flags(180.5), "just past half is large");
    }

    #[test]
    fn single_full_value_renders_two_circles() {
        let ring = RingMarkSpec::new(75.0, 55.0);
        let segs = ring.segments(&[1.0]);
        assert_eq!(segs.len(), 1);
        assert_eq!(
            segs[0].path.to_svg(),
            "M150 75 a75 75 0 0 1 -150 0 a75 75 0 0 1 150 0 M130 75 a55 55 0 0 1 -110 0 a55 55 0 0 1 110 0 Z"
        );
        assert_eq!(segs[0].path, ring.ring_path());
        assert_eq!(segs[0].sweep.selection_angle(-90.0), 0.0, "full circles report 0");
    }

    #[test]
    fn zero_sweep_is_empty_and_selects_its_start() {
        let ring = RingMarkSpec::new(75.0, 55.0);
        let segs = ring.segments(&[0.5, 0.0, 0.5]);
        assert!(segs[1].path.is_empty());
        assert_eq!(segs[1].path.to_svg(), "");
        assert_eq!(segs[1].sweep.selection_angle(-90.0), 90.0);
        assert_eq!(segs[1].sweep.selection_angle(0.0), 180.0);

        let first = ring.segments(&[0.0, 1.0]);
        assert_eq!(first[0].sweep.selection_angle(-90.0), 270.0, "wrapped once");
    }

    #[test]
    fn selection_angle_is_the_rotated_midpoint() {
        let s = Sweep {
            start: 72.0,
            sweep: 72.0,
        };
        assert_eq!(s.selection_angle(-90.0), 18.0);
        assert_eq!(s.selection_angle(0.0), 108.0);
        let first = Sweep {
            start: 0.0,
            sweep: 72.0,
        };
        assert_eq!(first.selection_angle(-90.0), 306.0);
    }

    #[test]
    fn clip_path_cuts_a_disc() {
        let ring = RingMarkSpec::new(75.0, 55.0);
        let clip = ring.clip_path(45.0);
        assert_eq!(
            clip.to_svg(),
            "M0 0 h150 v150 h-150 Z M30 75 a45 45 0 0 0 90 0 Z M120 75 a45 45 0 0 0 -90 0 Z"
        );
        assert!(!clip.contains_even_odd(Point::new(75.0, 70.0), 0.1), "disc is removed");
        assert!(clip.contains_even_odd(Point::new(75.0, 125.0), 0.1), "ring area kept");
    }

    #[test]
    fn rotation_turns_around_the_center() {
        let ring = RingMarkSpec::new(75.0, 55.0);
        let p = ring.rotation(-90.0) * Point::new(150.0, 75.0);
        assert!(close(p.x, 75.0) && close(p.y, 0.0), "{p:?}");
    }
}
