// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The animated single-value bar chart.

extern crate alloc;

use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;
use core::fmt;
use core::time::Duration;

use kinviz_core::{
    AnimationDriver, ColorInput, ColorStop, ConfigError, FrameLoop, Motion, PathData,
    ScalarTransition, TimingConfig, color_stops,
};

use crate::bar_mark::BarMarkSpec;
use crate::pending::PendingInputs;
use crate::{GradientVector, svg};

/// Bar chart configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct BarConfig {
    /// Bar width (default `24`).
    pub width: f64,
    /// Height of a full bar (default `100`).
    pub height: f64,
    /// Track fill, bottom to top (default `#F6F8FD`).
    pub background_color: ColorInput,
    /// Bar fill, bottom to top (default `#647DF8` to `#72F3FD`).
    pub foreground_color: ColorInput,
    /// Transition between successive values.
    pub transition: TimingConfig,
}

impl Default for BarConfig {
    fn default() -> Self {
        Self {
            width: 24.0,
            height: 100.0,
            background_color: "#F6F8FD".into(),
            foreground_color: ("#647DF8", "#72F3FD").into(),
            transition: TimingConfig::default(),
        }
    }
}

impl BarConfig {
    /// Sets the bar size.
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Sets the track fill.
    pub fn with_background_color(mut self, color: impl Into<ColorInput>) -> Self {
        self.background_color = color.into();
        self
    }

    /// Sets the bar fill.
    pub fn with_foreground_color(mut self, color: impl Into<ColorInput>) -> Self {
        self.foreground_color = color.into();
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

    fn resolve(&self) -> Result<[[ColorStop; 2]; 2], ConfigError> {
        ConfigError::check_non_negative("width", self.width)?;
        ConfigError::check_non_negative("height", self.height)?;
        Ok([
            color_stops(&self.background_color)?,
            color_stops(&self.foreground_color)?,
        ])
    }
}

#[derive(Debug)]
struct BarState {
    config: BarConfig,
    spec: BarMarkSpec,
    background: [ColorStop; 2],
    foreground: [ColorStop; 2],
    transition: ScalarTransition,
    displayed: f64,
    bar: PathData,
    driver: AnimationDriver,
}

impl BarState {
    fn sync(&mut self, value: f64) {
        self.displayed = value;
        self.bar = self.spec.foreground(value);
    }

    fn push_value(shared: &Rc<RefCell<Self>>, value: f64) {
        let mut state = shared.borrow_mut();
        if !state.transition.push(value) {
            // Redraw at the target now; an in-flight transition keeps running.
            state.sync(value);
            return;
        }
        state.driver.set_value(0.0);
        let from = state.transition.at(0.0);
        state.sync(from);

        log::debug!("bar chart: {} -> {value}", state.transition.previous);
        let weak = Rc::downgrade(shared);
        let timing = state.config.transition;
        state.driver.start(Motion::timing(1.0, timing), move |tick| {
            if let Some(shared) = weak.upgrade() {
                let mut state = shared.borrow_mut();
                let value = state.transition.at(tick.value);
                state.sync(value);
            }
        });
    }
}

/// An animated bar showing one value in `[0, 1]`.
///
/// Setting the value it already has redraws it at that value immediately instead of starting a
/// new transition. A transition already in flight carries on from its next frame.
pub struct BarChart {
    frames: FrameLoop,
    state: Rc<RefCell<BarState>>,
    pending: PendingInputs,
}

impl fmt::Debug for BarChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BarChart")
            .field("state", &self.state)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl BarChart {
    /// Creates the chart showing `value`, without animating.
    pub fn new(frames: &FrameLoop, config: BarConfig, value: f64) -> Result<Self, ConfigError> {
        let [background, foreground] = config.resolve()?;
        let spec = BarMarkSpec::new(config.width, config.height);
        let state = Rc::new(RefCell::new(BarState {
            config,
            spec,
            background,
            foreground,
            transition: ScalarTransition::settled(value),
            displayed: value,
            bar: spec.foreground(value),
            driver: AnimationDriver::new(frames),
        }));
        Ok(Self {
            frames: frames.clone(),
            state,
            pending: PendingInputs::default(),
        })
    }

    /// Animates to `value`.
    pub fn set_value(&mut self, value: f64) {
        BarState::push_value(&self.state, value);
    }

    /// Animates to `value` after `delay`.
    pub fn schedule_value(&mut self, delay: Duration, value: f64) {
        self.pending
            .schedule(&self.frames, delay, &self.state, "bar chart", move |state| {
                BarState::push_value(state, value);
                Ok(())
            });
    }

    /// Number of scheduled values that have not been applied yet.
    pub fn pending_inputs(&self) -> usize {
        self.pending.len()
    }

    /// Replaces the configuration, keeping the displayed value.
    pub fn set_config(&mut self, config: BarConfig) -> Result<(), ConfigError> {
        let [background, foreground] = config.resolve()?;
        let mut state = self.state.borrow_mut();
        state.spec = BarMarkSpec::new(config.width, config.height);
        state.config = config;
        state.background = background;
        state.foreground = foreground;
        let displayed = state.displayed;
        state.sync(displayed);
        Ok(())
    }

    /// The current configuration.
    pub fn config(&self) -> BarConfig {
        self.state.borrow().config.clone()
    }

    /// The value currently on screen.
    pub fn value(&self) -> f64 {
        self.state.borrow().displayed
    }

    /// The bar outline currently on screen, before [`BarMarkSpec::transform`] is applied.
    pub fn bar_path(&self) -> PathData {
        self.state.borrow().bar.clone()
    }

    /// Returns `true` while a transition is running.
    pub fn is_animating(&self) -> bool {
        self.state.borrow().driver.is_animating()
    }

    /// Renders the chart as it currently looks.
    pub fn to_svg(&self) -> String {
        self.to_svg_with_prefix("kinviz-bar")
    }

    /// Renders the chart, prefixing element ids so several charts can share one document.
    pub fn to_svg_with_prefix(&self, prefix: &str) -> String {
        let state = self.state.borrow();
        let spec = state.spec;
        let mut out = String::new();
        svg::open_svg(&mut out, spec.width, spec.height, true);

        out.push_str("<defs>\n");
        svg::write_linear_gradient(
            &mut out,
            &format!("{prefix}-bg"),
            GradientVector::BOTTOM_TO_TOP,
            &state.background,
        );
        svg::write_linear_gradient(
            &mut out,
            &format!("{prefix}-fg"),
            GradientVector::BOTTOM_TO_TOP,
            &state.foreground,
        );
        out.push_str("</defs>\n");

        let offset = spec.transform().translation();
        out.push_str(&format!(
            r#"<g transform="translate({} {})">"#,
            offset.x, offset.y
        ));
        out.push('\n');
        svg::write_path(
            &mut out,
            &spec.background(),
            &format!(r#" fill="url(#{prefix}-bg)""#),
        );
        svg::write_path(&mut out, &state.bar, &format!(r#" fill="url(#{prefix}-fg)""#));
        out.push_str("</g>\n");
        svg::close_svg(&mut out);
        out
    }
}
