// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The animated ring (donut) chart.
//!
//! Each input is normalized to percentages, and the chart transitions from the previously shown
//! shares to the new ones over one timed progression, rebuilding every segment path per frame.

extern crate alloc;

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::time::Duration;

use kinviz_core::{
    AnimationDriver, ColorInput, ColorStop, ConfigError, FrameLoop, Motion, NormalizePolicy,
    SeriesTransition, TimingConfig, color_stops, normalize, resolve_color,
};
use kurbo::Point;
use peniko::Color;

use crate::pending::PendingInputs;
use crate::ring_mark::{RingMarkSpec, RingSegment, Sweep, sweeps};
use crate::svg;

/// Gradient pairs used when none are configured; one pair per segment.
pub const DEFAULT_RING_COLORS: [(&str, &str); 5] = [
    ("#7CF3FF", "#00B4EB"),
    ("#0066FF", "#1EA5FF"),
    ("#FFB031", "#FFDA80"),
    ("#FF5E31", "#FFA339"),
    ("#F32C61", "#FF79B0"),
];

/// Curve tolerance for hit testing, in view-box units.
const HIT_TOLERANCE: f64 = 0.1;

/// Ring chart configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct RingConfig {
    /// Outer radius `R` (default `75`). The chart box is `2R × 2R`.
    pub outer_radius: f64,
    /// Inner radius `r` (default `55`).
    pub inner_radius: f64,
    /// Radius of the disc cut out of the inner shadow (default `45`).
    pub clip_radius: f64,
    /// Rotation of the segments in degrees (default `-90`, so the first segment starts at the top).
    pub rotation: f64,
    /// Segment gradients. The series may not be longer than this list.
    pub colors: Vec<ColorInput>,
    /// Color of the radial shadow inside the ring (default `#ECF0F4`).
    pub inner_shadow_color: String,
    /// Fill of the ring track behind the segments (default `transparent`).
    pub outer_ring_color: String,
    /// Transition between successive inputs.
    pub transition: TimingConfig,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            outer_radius: 75.0,
            inner_radius: 55.0,
            clip_radius: 45.0,
            rotation: -90.0,
            colors: DEFAULT_RING_COLORS.iter().map(|&c| c.into()).collect(),
            inner_shadow_color: "#ECF0F4".to_string(),
            outer_ring_color: "transparent".to_string(),
            transition: TimingConfig::default(),
        }
    }
}

impl RingConfig {
    /// Sets the outer and inner radii.
    pub fn with_radii(mut self, outer: f64, inner: f64) -> Self {
        self.outer_radius = outer;
        self.inner_radius = inner;
        self
    }

    /// Sets the shadow clip radius.
    pub fn with_clip_radius(mut self, clip_radius: f64) -> Self {
        self.clip_radius = clip_radius;
        self
    }

    /// Sets the rotation in degrees.
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Replaces the segment colors.
    pub fn with_colors<C: Into<ColorInput>>(mut self, colors: impl IntoIterator<Item = C>) -> Self {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the inner shadow color.
    pub fn with_inner_shadow_color(mut self, color: impl Into<String>) -> Self {
        self.inner_shadow_color = color.into();
        self
    }

    /// Sets the ring track color.
    pub fn with_outer_ring_color(mut self, color: impl Into<String>) -> Self {
        self.outer_ring_color = color.into();
        self
    }

    /// Sets the transition timing.
    pub fn with_transition(mut self, transition: TimingConfig) -> Self {
        self.transition = transition;
        self
    }

    /// Checks dimensions and parses every color.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.resolve().map(|_| ())
    }

    fn resolve(&self) -> Result<RingPalette, ConfigError> {
        ConfigError::check_non_negative("outer_radius", self.outer_radius)?;
        ConfigError::check_non_negative("inner_radius", self.inner_radius)?;
        ConfigError::check_non_negative("clip_radius", self.clip_radius)?;
        if self.inner_radius > self.outer_radius {
            return Err(ConfigError::InvalidDimension {
                field: "inner_radius",
                value: self.inner_radius,
            });
        }
        if !self.rotation.is_finite() {
            return Err(ConfigError::InvalidDimension {
                field: "rotation",
                value: self.rotation,
            });
        }
        Ok(RingPalette {
            segments: self
                .colors
                .iter()
                .map(color_stops)
                .collect::<Result<_, _>>()?,
            shadow: resolve_color(&self.inner_shadow_color)?,
            track: resolve_color(&self.outer_ring_color)?,
        })
    }
}

#[derive(Clone, Debug)]
struct RingPalette {
    segments: Vec<[ColorStop; 2]>,
    shadow: Color,
    track: Color,
}

impl RingPalette {
    fn check_len(&self, segments: usize) -> Result<(), ConfigError> {
        if segments > self.segments.len() {
            return Err(ConfigError::TooManySegments {
                segments,
                colors: self.segments.len(),
            });
        }
        Ok(())
    }
}

/// A selected segment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Selection {
    /// Segment index in the input series.
    pub index: usize,
    /// The segment's mid angle in degrees, including the chart rotation, in `[0, 360)` for
    /// typical rotations.
    pub angle: f64,
}

#[derive(Debug)]
struct RingState {
    config: RingConfig,
    palette: RingPalette,
    spec: RingMarkSpec,
    transition: SeriesTransition,
    blended: Vec<f64>,
    segments: Vec<RingSegment>,
    /// Sweeps of the latest input, used for selection.
    targets: Vec<Sweep>,
    driver: AnimationDriver,
}

impl RingState {
    fn redraw(&mut self, progress: f64) {
        self.transition.blend_into(progress, &mut self.blended);
        self.segments = self.spec.segments(&self.blended);
    }

    fn push_data(shared: &Rc<RefCell<Self>>, data: &[f64]) -> Result<(), ConfigError> {
        let mut state = shared.borrow_mut();
        state.palette.check_len(data.len())?;

        let next = normalize(data, NormalizePolicy::Percentage);
        state.targets = sweeps(&next);
        state.transition.push(next);
        state.driver.set_value(0.0);
        state.redraw(0.0);

        log::debug!("ring chart: transition to {} segments", data.len());
        let weak = Rc::downgrade(shared);
        let timing = state.config.transition;
        state.driver.start(Motion::timing(1.0, timing), move |tick| {
            if let Some(shared) = weak.upgrade() {
                shared.borrow_mut().redraw(tick.value);
            }
        });
        Ok(())
    }
}

/// An animated ring chart.
///
/// Dropping the chart detaches its frame listener and cancels pending scheduled inputs.
pub struct RingChart {
    frames: FrameLoop,
    state: Rc<RefCell<RingState>>,
    pending: PendingInputs,
    on_select: Option<Box<dyn FnMut(Selection)>>,
}

impl fmt::Debug for RingChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingChart")
            .field("state", &self.state)
            .field("pending", &self.pending)
            .field("on_select", &self.on_select.is_some())
            .finish_non_exhaustive()
    }
}

impl RingChart {
    /// Creates the chart and starts the transition from empty to `data`.
    pub fn new(frames: &FrameLoop, config: RingConfig, data: &[f64]) -> Result<Self, ConfigError> {
        let palette = config.resolve()?;
        palette.check_len(data.len())?;
        let state = Rc::new(RefCell::new(RingState {
            spec: RingMarkSpec::new(config.outer_radius, config.inner_radius),
            config,
            palette,
            transition: SeriesTransition::new(),
            blended: Vec::new(),
            segments: Vec::new(),
            targets: Vec::new(),
            driver: AnimationDriver::new(frames),
        }));
        RingState::push_data(&state, data)?;
        Ok(Self {
            frames: frames.clone(),
            state,
            pending: PendingInputs::default(),
            on_select: None,
        })
    }

    /// Sets the selection callback.
    pub fn with_on_select(mut self, on_select: impl FnMut(Selection) + 'static) -> Self {
        self.on_select = Some(Box::new(on_select));
        self
    }

    /// Replaces the input series, transitioning from what is currently shown.
    pub fn set_data(&mut self, data: &[f64]) -> Result<(), ConfigError> {
        RingState::push_data(&self.state, data)
    }

    /// Replaces the input series after `delay`.
    ///
    /// The length is checked now; the timer is cancelled if the chart is dropped first.
    pub fn schedule_data(&mut self, delay: Duration, data: &[f64]) -> Result<(), ConfigError> {
        self.state.borrow().palette.check_len(data.len())?;
        let data = data.to_vec();
        self.pending
            .schedule(&self.frames, delay, &self.state, "ring chart", move |state| {
                RingState::push_data(state, &data)
            });
        Ok(())
    }

    /// Number of scheduled inputs that have not been applied yet.
    pub fn pending_inputs(&self) -> usize {
        self.pending.len()
    }

    /// Replaces the configuration, keeping the current data and animation progress.
    pub fn set_config(&mut self, config: RingConfig) -> Result<(), ConfigError> {
        let palette = config.resolve()?;
        let mut state = self.state.borrow_mut();
        palette.check_len(state.transition.len())?;
        state.spec = RingMarkSpec::new(config.outer_radius, config.inner_radius);
        state.config = config;
        state.palette = palette;
        let progress = state.driver.value();
        state.redraw(progress);
        Ok(())
    }

    /// The current configuration.
    pub fn config(&self) -> RingConfig {
        self.state.borrow().config.clone()
    }

    /// The shares currently on screen.
    pub fn values(&self) -> Vec<f64> {
        self.state.borrow().blended.clone()
    }

    /// The segments currently on screen.
    pub fn segments(&self) -> Vec<RingSegment> {
        self.state.borrow().segments.clone()
    }

    /// Returns `true` while a transition is running.
    pub fn is_animating(&self) -> bool {
        self.state.borrow().driver.is_animating()
    }

    /// Selects segment `index` of the latest input and reports it to the selection callback.
    ///
    /// Returns `None` if there is no such segment.
    pub fn select(&mut self, index: usize) -> Option<Selection> {
        let selection = {
            let state = self.state.borrow();
            let sweep = state.targets.get(index)?;
            Selection {
                index,
                angle: sweep.selection_angle(state.config.rotation),
            }
        };
        log::debug!("ring chart: selected {selection:?}");
        if let Some(on_select) = &mut self.on_select {
            on_select(selection);
        }
        Some(selection)
    }

    /// Selects the segment drawn under `point` (in view-box coordinates), if any.
    ///
    /// Later segments are drawn over earlier ones, so they win.
    pub fn select_at(&mut self, point: Point) -> Option<Selection> {
        let index = {
            let state = self.state.borrow();
            let local = state.spec.rotation(state.config.rotation).inverse() * point;
            state
                .segments
                .iter()
                .rposition(|seg| seg.path.contains_even_odd(local, HIT_TOLERANCE))?
        };
        self.select(index)
    }

    /// Renders the chart as it currently looks.
    pub fn to_svg(&self) -> String {
        self.to_svg_with_prefix("kinviz-ring")
    }

    /// Renders the chart, prefixing element ids so several charts can share one document.
    pub fn to_svg_with_prefix(&self, prefix: &str) -> String {
        let state = self.state.borrow();
        let spec = state.spec;
        let (big_r, r) = (spec.outer_radius, spec.inner_radius);
        let mut out = String::new();
        svg::open_svg(&mut out, spec.size(), spec.size(), false);

        out.push_str("<defs>\n");
        out.push_str(&format!(r#"<radialGradient id="{prefix}-shadow">"#));
        out.push('\n');
        let shadow = svg::hex(state.palette.shadow);
        let shadow_mid = if r > 0.0 {
            state.config.clip_radius / r
        } else {
            0.0
        };
        for (offset, opacity) in [(0.0, 0.8), (shadow_mid, 0.5), (1.0, 0.0)] {
            svg::write_stop(&mut out, offset, &shadow, opacity);
        }
        out.push_str("</radialGradient>\n");
        for (i, (seg, stops)) in state.segments.iter().zip(&state.palette.segments).enumerate() {
            svg::write_linear_gradient(
                &mut out,
                &format!("{prefix}-linear-{i}"),
                seg.gradient,
                stops,
            );
        }
        out.push_str(&format!(r#"<clipPath id="{prefix}-clip">"#));
        out.push('\n');
        svg::write_path(
            &mut out,
            &spec.clip_path(state.config.clip_radius),
            r#" clip-rule="evenodd""#,
        );
        out.push_str("</clipPath>\n</defs>\n");

        out.push_str(&format!(
            r#"<circle cx="{big_r}" cy="{big_r}" r="{r}" fill="url(#{prefix}-shadow)" clip-path="url(#{prefix}-clip)"/>"#
        ));
        out.push('\n');

        let mut track = String::new();
        svg::write_paint_attr(&mut track, "fill", state.palette.track);
        track.push_str(r#" fill-rule="evenodd""#);
        svg::write_path(&mut out, &spec.ring_path(), &track);

        out.push_str(&format!(
            r#"<g transform="rotate({} {big_r} {big_r})">"#,
            state.config.rotation
        ));
        out.push('\n');
        for (i, seg) in state.segments.iter().enumerate() {
            svg::write_path(
                &mut out,
                &seg.path,
                &format!(r#" fill="url(#{prefix}-linear-{i})" fill-rule="evenodd""#),
            );
        }
        out.push_str("</g>\n");
        svg::close_svg(&mut out);
        out
    }
}
