// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Area chart geometry: a stroked line over a filled region.

extern crate alloc;

use alloc::vec::Vec;

use kinviz_core::PathData;
use kurbo::Point;

/// How far a curve control point reaches, as a share of the distance between its neighbors.
const SMOOTHING: f64 = 0.2;

/// The stroke and fill outlines of an area chart.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AreaPaths {
    /// The data line.
    pub stroke: PathData,
    /// The data line closed down to the bottom edge.
    pub fill: PathData,
}

/// Area chart dimensions and line style.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaMarkSpec {
    /// Chart width.
    pub width: f64,
    /// Chart height.
    pub height: f64,
    /// Share of the height, at the bottom, kept below the lowest data point (`0..=1`).
    pub horizon: f64,
    /// Stroke width; twice this is kept free above the highest data point.
    pub thickness: f64,
    /// Join points with cubic curves instead of straight segments.
    pub smooth: bool,
}

impl AreaMarkSpec {
    /// Creates a spec with horizon `0.4`, thickness `2` and smoothing on.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            horizon: 0.4,
            thickness: 2.0,
            smooth: true,
        }
    }

    /// Sets the horizon ratio.
    pub fn with_horizon(mut self, horizon: f64) -> Self {
        self.horizon = horizon;
        self
    }

    /// Sets the stroke width.
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    /// Enables or disables curve smoothing.
    pub fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
        self
    }

    /// Top padding above a data value of `1`.
    pub fn padding(&self) -> f64 {
        2.0 * self.thickness
    }

    /// Maps a comparison-normalized series to chart points, spread evenly across the width.
    ///
    /// A single value sits at `x = 0`.
    pub fn points(&self, series: &[f64]) -> Vec<Point> {
        let last = series.len().saturating_sub(1);
        let span = self.height - self.height * self.horizon;
        let padding = self.padding();
        series
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let x = if last == 0 {
                    0.0
                } else {
                    i as f64 / last as f64 * self.width
                };
                Point::new(x, (1.0 - v) * span + padding)
            })
            .collect()
    }

    /// The line through `points`, straight or smoothed per [`AreaMarkSpec::smooth`].
    pub fn stroke_path(&self, points: &[Point]) -> PathData {
        let mut path = PathData::new();
        let Some(&first) = points.first() else {
            return path;
        };
        path.move_to(first);
        for (i, &p) in points.iter().enumerate().skip(1) {
            if self.smooth {
                let before = points[i - 1];
                let start = control_point(
                    before,
                    i.checked_sub(2).map_or(before, |j| points[j]),
                    p,
                    false,
                );
                let end = control_point(p, before, points.get(i + 1).copied().unwrap_or(p), true);
                path.curve_to(start, end, p);
            } else {
                path.line_to(p);
            }
        }
        path
    }

    /// Builds the stroke and fill paths for a comparison-normalized series.
    ///
    /// An empty series yields two empty paths.
    pub fn paths(&self, series: &[f64]) -> AreaPaths {
        let points = self.points(series);
        let stroke = self.stroke_path(&points);
        if stroke.is_empty() {
            return AreaPaths::default();
        }
        let mut fill = stroke.clone();
        fill.line_to((self.width, self.height));
        fill.line_to((0.0, self.height));
        fill.close();
        AreaPaths { stroke, fill }
    }
}

/// Offsets `cur` along the `prev → next` direction, backwards when `reverse` is set.
fn control_point(cur: Point, prev: Point, next: Point, reverse: bool) -> Point {
    let reach = (next - prev) * SMOOTHING;
    if reverse { cur - reach } else { cur + reach }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kinviz_core::PathCommand;

    use super::*;

    #[test]
    fn points_span_the_width() {
        let spec = AreaMarkSpec::new(140.0, 60.0);
        let pts = spec.points(&[0.0, 0.5, 1.0, 0.25]);
        assert_eq!(pts.len(), 4);
        assert_eq!(pts[0].x, 0.0);
        assert_eq!(pts[3].x, 140.0);
        // span = 60 - 24 = 36, padding = 4
        assert_eq!(pts[0].y, 40.0);
        assert_eq!(pts[1].y, 22.0);
        assert_eq!(pts[2].y, 4.0);
    }

    #[test]
    fn single_point_sits_at_the_left_edge() {
        let pts = AreaMarkSpec::new(140.0, 60.0).points(&[1.0]);
        assert_eq!(pts, [Point::new(0.0, 4.0)]);
    }

    #[test]
    fn straight_mode_uses_line_segments() {
        let spec = AreaMarkSpec::new(100.0, 50.0)
            .with_horizon(0.0)
            .with_thickness(0.0)
            .with_smooth(false);
        let paths = spec.paths(&[1.0, 0.0, 1.0]);
        assert_eq!(paths.stroke.to_svg(), "M0 0 L50 50 L100 0");
        assert_eq!(paths.fill.to_svg(), "M0 0 L50 50 L100 0 L100 50 L0 50 Z");
    }

    #[test]
    fn smooth_controls_follow_neighbors() {
        let spec = AreaMarkSpec::new(100.0, 50.0)
            .with_horizon(0.0)
            .with_thickness(0.0);
        let paths = spec.paths(&[1.0, 0.0, 1.0]);
        let commands = paths.stroke.commands();
        assert_eq!(commands.len(), 3);
        // First curve: leaves (0, 0) toward (50, 50), arrives at (50, 50) along (100, 0) - (0, 0).
        assert_eq!(
            commands[1],
            PathCommand::CurveTo(
                Point::new(10.0, 10.0),
                Point::new(30.0, 50.0),
                Point::new(50.0, 50.0)
            )
        );
        // Last curve: the trailing control point falls back to the end point itself.
        assert_eq!(
            commands[2],
            PathCommand::CurveTo(
                Point::new(70.0, 50.0),
                Point::new(90.0, 10.0),
                Point::new(100.0, 0.0)
            )
        );
    }

    #[test]
    fn empty_series_draws_nothing() {
        let paths = AreaMarkSpec::new(140.0, 60.0).paths(&[]);
        assert!(paths.stroke.is_empty());
        assert!(paths.fill.is_empty());
    }
}
