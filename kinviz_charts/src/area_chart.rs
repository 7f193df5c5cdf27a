// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The animated area chart.

extern crate alloc;

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

use crate::area_mark::{AreaMarkSpec, AreaPaths};
use crate::pending::PendingInputs;
use crate::{GradientVector, svg};

/// Area chart configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct AreaConfig {
    /// Chart width (default `140`).
    pub width: f64,
    /// Chart height (default `60`).
    pub height: f64,
    /// Share of the height kept below the lowest data point (default `0.4`).
    pub horizon: f64,
    /// Line color (default `#0066FF`).
    pub stroke_color: String,
    /// Line width (default `2`).
    pub thickness: f64,
    /// Fill gradient, top to bottom (default `rgba(0, 153, 255, 0.4)` to `rgba(0, 102, 255, 0)`).
    pub fill_color: ColorInput,
    /// Curved line with round caps instead of straight segments with square caps (default `true`).
    pub smooth: bool,
    /// Transition between successive inputs.
    pub transition: TimingConfig,
}

impl Default for AreaConfig {
    fn default() -> Self {
        Self {
            width: 140.0,
            height: 60.0,
            horizon: 0.4,
            stroke_color: "#0066FF".to_string(),
            thickness: 2.0,
            fill_color: ("rgba(0, 153, 255, 0.4)", "rgba(0, 102, 255, 0)").into(),
            smooth: true,
            transition: TimingConfig::default(),
        }
    }
}

impl AreaConfig {
    /// Sets the chart size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the horizon ratio.
    pub fn with_horizon(mut self, horizon: f64) -> Self {
        self.horizon = horizon;
        self
    }

    /// Sets the line color.
    pub fn with_stroke_color(mut self, color: impl Into<String>) -> Self {
        self.stroke_color = color.into();
        self
    }

    /// Sets the line width.
    pub fn with_thickness(mut self, thickness: f64) -> Self {
        self.thickness = thickness;
        self
    }

    /// Sets the fill color or gradient.
    pub fn with_fill_color(mut self, fill: impl Into<ColorInput>) -> Self {
        self.fill_color = fill.into();
        self
    }

    /// Enables or disables smoothing.
    pub fn with_smooth(mut self, smooth: bool) -> Self {
        self.smooth = smooth;
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

    fn spec(&self) -> AreaMarkSpec {
        AreaMarkSpec::new(self.width, self.height)
            .with_horizon(self.horizon)
            .with_thickness(self.thickness)
            .with_smooth(self.smooth)
    }

    fn resolve(&self) -> Result<(Color, [ColorStop; 2]), ConfigError> {
        ConfigError::check_non_negative("width", self.width)?;
        ConfigError::check_non_negative("height", self.height)?;
        ConfigError::check_non_negative("thickness", self.thickness)?;
        ConfigError::check_unit("horizon", self.horizon)?;
        Ok((
            resolve_color(&self.stroke_color)?,
            color_stops(&self.fill_color)?,
        ))
    }
}

#[derive(Debug)]
struct AreaState {
    config: AreaConfig,
    spec: AreaMarkSpec,
    stroke: Color,
    fill: [ColorStop; 2],
    transition: SeriesTransition,
    blended: Vec<f64>,
    paths: AreaPaths,
    driver: AnimationDriver,
}

impl AreaState {
    fn redraw(&mut self, progress: f64) {
        self.transition.blend_into(progress, &mut self.blended);
        self.paths = self.spec.paths(&self.blended);
    }

    fn push_data(shared: &Rc<RefCell<Self>>, data: &[f64]) {
        let mut state = shared.borrow_mut();
        state.transition.push(normalize(data, NormalizePolicy::Comparison));
        state.driver.set_value(0.0);
        state.redraw(0.0);

        log::debug!("area chart: transition to {} points", data.len());
        let weak = Rc::downgrade(shared);
        let timing = state.config.transition;
        state.driver.start(Motion::timing(1.0, timing), move |tick| {
            if let Some(shared) = weak.upgrade() {
                shared.borrow_mut().redraw(tick.value);
            }
        });
    }
}

/// An animated area chart.
///
/// Each input is normalized against its maximum. Dropping the chart detaches its frame listener
/// and cancels pending scheduled inputs.
pub struct AreaChart {
    frames: FrameLoop,
    state: Rc<RefCell<AreaState>>,
    pending: PendingInputs,
}

impl fmt::Debug for AreaChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AreaChart")
            .field("state", &self.state)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl AreaChart {
    /// Creates the chart and starts the transition from a flat baseline to `data`.
    pub fn new(frames: &FrameLoop, config: AreaConfig, data: &[f64]) -> Result<Self, ConfigError> {
        let (stroke, fill) = config.resolve()?;
        let state = Rc::new(RefCell::new(AreaState {
            spec: config.spec(),
            config,
            stroke,
            fill,
            transition: SeriesTransition::new(),
            blended: Vec::new(),
            paths: AreaPaths::default(),
            driver: AnimationDriver::new(frames),
        }));
        AreaState::push_data(&state, data);
        Ok(Self {
            frames: frames.clone(),
            state,
            pending: PendingInputs::default(),
        })
    }

    /// Replaces the input series, transitioning from the previous one.
    pub fn set_data(&mut self, data: &[f64]) {
        AreaState::push_data(&self.state, data);
    }

    /// Replaces the input series after `delay`.
    pub fn schedule_data(&mut self, delay: Duration, data: &[f64]) {
        let data = data.to_vec();
        self.pending
            .schedule(&self.frames, delay, &self.state, "area chart", move |state| {
                AreaState::push_data(state, &data);
                Ok(())
            });
    }

    /// Number of scheduled inputs that have not been applied yet.
    pub fn pending_inputs(&self) -> usize {
        self.pending.len()
    }

    /// Replaces the configuration, keeping the current data and animation progress.
    pub fn set_config(&mut self, config: AreaConfig) -> Result<(), ConfigError> {
        let (stroke, fill) = config.resolve()?;
        let mut state = self.state.borrow_mut();
        state.spec = config.spec();
        state.config = config;
        state.stroke = stroke;
        state.fill = fill;
        let progress = state.driver.value();
        state.redraw(progress);
        Ok(())
    }

    /// The current configuration.
    pub fn config(&self) -> AreaConfig {
        self.state.borrow().config.clone()
    }

    /// The normalized values currently on screen.
    pub fn values(&self) -> Vec<f64> {
        self.state.borrow().blended.clone()
    }

    /// The data points currently on screen.
    pub fn points(&self) -> Vec<Point> {
        let state = self.state.borrow();
        state.spec.points(&state.blended)
    }

    /// The stroke and fill paths currently on screen.
    pub fn paths(&self) -> AreaPaths {
        self.state.borrow().paths.clone()
    }

    /// Returns `true` while a transition is running.
    pub fn is_animating(&self) -> bool {
        self.state.borrow().driver.is_animating()
    }

    /// Renders the chart as it currently looks.
    pub fn to_svg(&self) -> String {
        self.to_svg_with_prefix("kinviz-area")
    }

    /// Renders the chart, prefixing element ids so several charts can share one document.
    pub fn to_svg_with_prefix(&self, prefix: &str) -> String {
        let state = self.state.borrow();
        let config = &state.config;
        let mut out = String::new();
        svg::open_svg(&mut out, config.width, config.height, true);

        out.push_str("<defs>\n");
        svg::write_linear_gradient(
            &mut out,
            &format!("{prefix}-fill"),
            GradientVector::TOP_TO_BOTTOM,
            &state.fill,
        );
        out.push_str("</defs>\n");

        svg::write_path(
            &mut out,
            &state.paths.fill,
            &format!(r#" fill="url(#{prefix}-fill)""#),
        );

        let mut line = format!(r#" stroke-width="{}""#, config.thickness);
        svg::write_paint_attr(&mut line, "stroke", state.stroke);
        line.push_str(if config.smooth {
            r#" stroke-linecap="round" fill="none""#
        } else {
            r#" stroke-linecap="square" fill="none""#
        });
        svg::write_path(&mut out, &state.paths.stroke, &line);
        svg::close_svg(&mut out);
        out
    }
}
