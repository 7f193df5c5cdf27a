// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! SVG path data.
//!
//! Chart geometry is specified in SVG path terms (elliptical arcs with large-arc/sweep flags,
//! relative moves), so it is kept in that form rather than flattened into a `kurbo::BezPath`.
//! [`PathData`] renders the exact `d` attribute, and converts to a `BezPath` when curve math is
//! needed (bounds, hit testing).

extern crate alloc;

use alloc::string::String;
use core::fmt::{self, Write as _};

use kurbo::{Arc, BezPath, Point, Shape, SvgArc, Vec2};
use smallvec::SmallVec;

/// A single SVG path command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    /// `M x y`
    MoveTo(Point),
    /// `L x y`
    LineTo(Point),
    /// `C x1 y1 x2 y2 x y`
    CurveTo(Point, Point, Point),
    /// `A r r 0 large sweep x y`: a circular arc to an absolute point.
    ArcTo {
        /// Circle radius.
        radius: f64,
        /// Take the longer of the two candidate arcs.
        large_arc: bool,
        /// Travel in the positive-angle direction (clockwise on screen).
        sweep: bool,
        /// End point.
        to: Point,
    },
    /// `a r r 0 large sweep dx dy`: a circular arc to a point relative to the current one.
    ArcBy {
        /// Circle radius.
        radius: f64,
        /// Take the longer of the two candidate arcs.
        large_arc: bool,
        /// Travel in the positive-angle direction (clockwise on screen).
        sweep: bool,
        /// Offset of the end point from the current point.
        delta: Vec2,
    },
    /// `h dx`
    HorizontalBy(f64),
    /// `v dy`
    VerticalBy(f64),
    /// `Z`
    Close,
}

/// An SVG path: an ordered list of [`PathCommand`]s.
///
/// An empty `PathData` renders as the empty string, which SVG treats as "draw nothing".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData {
    commands: SmallVec<[PathCommand; 6]>,
}

impl PathData {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the path has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The commands, in order.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Appends a raw command.
    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    /// Appends `M`.
    pub fn move_to(&mut self, p: impl Into<Point>) {
        self.push(PathCommand::MoveTo(p.into()));
    }

    /// Appends `L`.
    pub fn line_to(&mut self, p: impl Into<Point>) {
        self.push(PathCommand::LineTo(p.into()));
    }

    /// Appends `C`.
    pub fn curve_to(&mut self, c1: impl Into<Point>, c2: impl Into<Point>, p: impl Into<Point>) {
        self.push(PathCommand::CurveTo(c1.into(), c2.into(), p.into()));
    }

    /// Appends an absolute circular arc.
    pub fn arc_to(&mut self, radius: f64, large_arc: bool, sweep: bool, to: impl Into<Point>) {
        self.push(PathCommand::ArcTo {
            radius,
            large_arc,
            sweep,
            to: to.into(),
        });
    }

    /// Appends a relative circular arc.
    pub fn arc_by(&mut self, radius: f64, large_arc: bool, sweep: bool, delta: impl Into<Vec2>) {
        self.push(PathCommand::ArcBy {
            radius,
            large_arc,
            sweep,
            delta: delta.into(),
        });
    }

    /// Appends `h`.
    pub fn horizontal_by(&mut self, dx: f64) {
        self.push(PathCommand::HorizontalBy(dx));
    }

    /// Appends `v`.
    pub fn vertical_by(&mut self, dy: f64) {
        self.push(PathCommand::VerticalBy(dy));
    }

    /// Appends `Z`.
    pub fn close(&mut self) {
        self.push(PathCommand::Close);
    }

    /// Appends all commands of `other`.
    pub fn extend_from(&mut self, other: &Self) {
        self.commands.extend_from_slice(&other.commands);
    }

    /// Renders the `d` attribute string.
    pub fn to_svg(&self) -> String {
        let mut out = String::new();
        // Writing into a `String` cannot fail.
        let _ = write!(out, "{self}");
        out
    }

    /// Converts to a `BezPath`, approximating arcs with cubic Béziers within `tolerance`.
    ///
    /// Degenerate arcs follow SVG rules: a zero-length arc is skipped and a zero-radius arc is a
    /// straight line.
    pub fn to_bez_path(&self, tolerance: f64) -> BezPath {
        let mut path = BezPath::new();
        let mut current = Point::ZERO;
        let mut start = Point::ZERO;
        for &command in &self.commands {
            match command {
                PathCommand::MoveTo(p) => {
                    path.move_to(p);
                    current = p;
                    start = p;
                }
                PathCommand::LineTo(p) => {
                    path.line_to(p);
                    current = p;
                }
                PathCommand::CurveTo(c1, c2, p) => {
                    path.curve_to(c1, c2, p);
                    current = p;
                }
                PathCommand::ArcTo {
                    radius,
                    large_arc,
                    sweep,
                    to,
                } => {
                    append_arc(&mut path, current, to, radius, large_arc, sweep, tolerance);
                    current = to;
                }
                PathCommand::ArcBy {
                    radius,
                    large_arc,
                    sweep,
                    delta,
                } => {
                    let to = current + delta;
                    append_arc(&mut path, current, to, radius, large_arc, sweep, tolerance);
                    current = to;
                }
                PathCommand::HorizontalBy(dx) => {
                    current.x += dx;
                    path.line_to(current);
                }
                PathCommand::VerticalBy(dy) => {
                    current.y += dy;
                    path.line_to(current);
                }
                PathCommand::Close => {
                    path.close_path();
                    current = start;
                }
            }
        }
        path
    }

    /// Tests `pt` against the path with the even-odd fill rule.
    pub fn contains_even_odd(&self, pt: Point, tolerance: f64) -> bool {
        self.to_bez_path(tolerance).winding(pt) % 2 != 0
    }
}

fn append_arc(
    path: &mut BezPath,
    from: Point,
    to: Point,
    radius: f64,
    large_arc: bool,
    sweep: bool,
    tolerance: f64,
) {
    let arc = SvgArc {
        from,
        to,
        radii: Vec2::new(radius, radius),
        x_rotation: 0.0,
        large_arc,
        sweep,
    };
    match Arc::from_svg_arc(&arc) {
        Some(arc) => path.extend(arc.append_iter(tolerance)),
        None if from != to => path.line_to(to),
        None => {}
    }
}

/// Formats a coordinate, printing negative zero as `0`.
struct Num(f64);

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = if self.0 == 0.0 { 0.0 } else { self.0 };
        write!(f, "{v}")
    }
}

fn flag(b: bool) -> u8 {
    u8::from(b)
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::MoveTo(p) => write!(f, "M{} {}", Num(p.x), Num(p.y)),
            Self::LineTo(p) => write!(f, "L{} {}", Num(p.x), Num(p.y)),
            Self::CurveTo(c1, c2, p) => write!(
                f,
                "C{} {} {} {} {} {}",
                Num(c1.x),
                Num(c1.y),
                Num(c2.x),
                Num(c2.y),
                Num(p.x),
                Num(p.y)
            ),
            Self::ArcTo {
                radius,
                large_arc,
                sweep,
                to,
            } => write!(
                f,
                "A{r} {r} 0 {} {} {} {}",
                flag(large_arc),
                flag(sweep),
                Num(to.x),
                Num(to.y),
                r = Num(radius),
            ),
            Self::ArcBy {
                radius,
                large_arc,
                sweep,
                delta,
            } => write!(
                f,
                "a{r} {r} 0 {} {} {} {}",
                flag(large_arc),
                flag(sweep),
                Num(delta.x),
                Num(delta.y),
                r = Num(radius),
            ),
            Self::HorizontalBy(dx) => write!(f, "h{}", Num(dx)),
            Self::VerticalBy(dy) => write!(f, "v{}", Num(dy)),
            Self::Close => f.write_str("Z"),
        }
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{command}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn annulus(outer: f64, inner: f64) -> PathData {
        let mut d = PathData::new();
        for r in [outer, inner] {
            d.move_to((outer + r, outer));
            d.arc_by(r, false, true, (-2.0 * r, 0.0));
            d.arc_by(r, false, true, (2.0 * r, 0.0));
        }
        d.close();
        d
    }

    #[test]
    fn renders_svg_commands() {
        let mut d = PathData::new();
        d.move_to((0.0, 0.0));
        d.arc_by(12.0, false, false, (24.0, 0.0));
        d.vertical_by(-76.0);
        d.arc_to(12.0, true, true, (0.5, -0.0));
        d.line_to((1.0, 2.0));
        d.curve_to((1.0, 2.0), (3.0, 4.0), (5.0, 6.0));
        d.horizontal_by(-3.0);
        d.close();
        assert_eq!(
            d.to_svg(),
            "M0 0 a12 12 0 0 0 24 0 v-76 A12 12 0 1 1 0.5 0 L1 2 C1 2 3 4 5 6 h-3 Z"
        );
    }

    #[test]
    fn empty_path_renders_empty() {
        assert_eq!(PathData::new().to_svg(), "");
        assert!(PathData::new().to_bez_path(0.1).elements().is_empty());
    }

    #[test]
    fn relative_arcs_follow_the_current_point() {
        let bez = annulus(75.0, 55.0).to_bez_path(1e-4);
        let bounds = bez.bounding_box();
        for (got, want) in [
            (bounds.x0, 0.0),
            (bounds.y0, 0.0),
            (bounds.x1, 150.0),
            (bounds.y1, 150.0),
        ] {
            assert!((got - want).abs() < 1e-2, "{bounds:?}");
        }
    }

    #[test]
    fn even_odd_leaves_the_hole_empty() {
        let d = annulus(75.0, 55.0);
        assert!(d.contains_even_odd(Point::new(75.0, 10.0), 0.1), "inside the ring");
        assert!(!d.contains_even_odd(Point::new(75.0, 75.0), 0.1), "center hole");
        assert!(!d.contains_even_odd(Point::new(-5.0, 75.0), 0.1), "outside");
    }

    #[test]
    fn zero_radius_arc_is_a_line() {
        let mut d = PathData::new();
        d.move_to((0.0, 0.0));
        d.arc_to(0.0, false, true, (10.0, 0.0));
        let bez = d.to_bez_path(0.1);
        assert_eq!(bez.elements().len(), 2);
        assert_eq!(bez.elements()[1], kurbo::PathEl::LineTo(Point::new(10.0, 0.0)));
    }
}
