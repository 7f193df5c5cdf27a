// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Linear interpolation and the previous/current state pairs it blends.

extern crate alloc;

use alloc::vec::Vec;

/// Blends `from` toward `to` by `t`.
///
/// `t` is not clamped: spring progressions overshoot past `1` and the blend follows them.
#[inline]
pub fn interpolate(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Blends two equal-length series element-wise into `out`.
///
/// `out` is cleared first so callers can reuse one buffer across frames. Extra elements of the
/// longer input are ignored.
pub fn interpolate_series(from: &[f64], to: &[f64], t: f64, out: &mut Vec<f64>) {
    out.clear();
    out.extend(from.iter().zip(to).map(|(&a, &b)| interpolate(a, b, t)));
}

/// The previous and current normalized series of a chart.
///
/// Both sides always have the same length.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeriesTransition {
    /// The series the running transition starts from.
    pub previous: Vec<f64>,
    /// The series the running transition ends at.
    pub current: Vec<f64>,
}

impl SeriesTransition {
    /// Creates an empty transition.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `next` the current series and demotes the old current to previous.
    ///
    /// When the length changes, the previous series is replaced by zeros of the new length so the
    /// transition grows from empty.
    pub fn push(&mut self, next: Vec<f64>) {
        let mut previous = core::mem::replace(&mut self.current, next);
        if previous.len() != self.current.len() {
            previous.clear();
            previous.resize(self.current.len(), 0.0);
        }
        self.previous = previous;
    }

    /// Writes the blended series at progress `t` into `out`.
    pub fn blend_into(&self, t: f64, out: &mut Vec<f64>) {
        interpolate_series(&self.previous, &self.current, t, out);
    }

    /// Number of elements on each side.
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Returns `true` when the current series is empty.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }
}

/// The previous and current value of a scalar chart.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScalarTransition {
    /// The value the running transition starts from.
    pub previous: f64,
    /// The value the running transition ends at.
    pub current: f64,
}

impl ScalarTransition {
    /// Creates a settled transition at `value`.
    pub fn settled(value: f64) -> Self {
        Self {
            previous: value,
            current: value,
        }
    }

    /// Makes `next` the current value and demotes the old current to previous.
    ///
    /// Returns `false` (and changes nothing) when `next` equals the current value.
    pub fn push(&mut self, next: f64) -> bool {
        if next == self.current {
            return false;
        }
        self.previous = self.current;
        self.current = next;
        true
    }

    /// The blended value at progress `t`.
    pub fn at(&self, t: f64) -> f64 {
        interpolate(self.previous, self.current, t)
    }
}
