// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A rotating pointer driven by a spring.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};

use kinviz_core::{AnimationDriver, ConfigError, FrameLoop, Motion, SpringConfig, resolve_color};
use peniko::Color;

use crate::svg;

/// Triangle drawn at the pointer tip, in a `4 × 8` box pointing right.
pub const POINTER_SHAPE: &str = "0 0 4 4 0 8";

/// The CSS transform for a rotation of `degrees`.
///
/// The angle is not wrapped or clamped, so spring overshoot shows through as-is.
pub fn rotation(degrees: f64) -> String {
    format!("rotate({degrees}deg)")
}

/// Pointer configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerConfig {
    /// Side of the square the pointer rotates in (default `105`).
    pub size: f64,
    /// Tip color (default `#0066FF`).
    pub color: String,
    /// Spring used to reach new angles (default tension `3`, friction `4`).
    pub spring: SpringConfig,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            size: 105.0,
            color: "#0066FF".to_string(),
            spring: SpringConfig::from_tension_friction(3.0, 4.0),
        }
    }
}

impl PointerConfig {
    /// Sets the rotation box size.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Sets the tip color.
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the spring.
    pub fn with_spring(mut self, spring: SpringConfig) -> Self {
        self.spring = spring;
        self
    }

    fn resolve(&self) -> Result<Color, ConfigError> {
        ConfigError::check_non_negative("size", self.size)?;
        resolve_color(&self.color)
    }
}

/// A pointer that springs toward its target angle.
///
/// The pointer starts at `0°`. Retargeting while it moves keeps its momentum.
#[derive(Debug)]
pub struct Pointer {
    config: PointerConfig,
    color: Color,
    target: f64,
    driver: AnimationDriver,
}

impl Pointer {
    /// Creates a pointer at `0°` and springs it toward `degrees`.
    pub fn new(frames: &FrameLoop, config: PointerConfig, degrees: f64) -> Result<Self, ConfigError> {
        let color = config.resolve()?;
        let mut pointer = Self {
            config,
            color,
            target: 0.0,
            driver: AnimationDriver::new(frames),
        };
        pointer.set_angle(degrees);
        Ok(pointer)
    }

    /// Springs toward `degrees`. Setting the current target again does nothing.
    pub fn set_angle(&mut self, degrees: f64) {
        if degrees == self.target && (self.driver.is_animating() || self.angle() == degrees) {
            return;
        }
        self.target = degrees;
        log::debug!("pointer: {:.1}deg -> {degrees}deg", self.angle());
        self.driver
            .start(Motion::spring(degrees, self.config.spring), |tick| {
                log::trace!("pointer: {:.3}deg", tick.value);
            });
    }

    /// The target angle in degrees.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// The angle currently on screen, in degrees.
    pub fn angle(&self) -> f64 {
        self.driver.value()
    }

    /// The current rotation as a CSS transform.
    pub fn transform(&self) -> String {
        rotation(self.angle())
    }

    /// Returns `true` while the spring is moving.
    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }

    /// Stops the spring where it is.
    pub fn stop(&mut self) {
        self.driver.stop();
    }

    /// Renders the pointer as it currently looks.
    ///
    /// The tip sits at the right edge of the box, vertically centered, before rotation.
    pub fn to_svg(&self) -> String {
        let size = self.config.size;
        let c = size / 2.0;
        let mut out = String::new();
        svg::open_svg(&mut out, size, size, true);
        out.push_str(&format!(
            r#"<g transform="rotate({} {c} {c})">"#,
            self.angle()
        ));
        out.push('\n');
        out.push_str(&format!(
            r#"<polygon points="{POINTER_SHAPE}" transform="translate({} {})""#,
            size - 4.0,
            c - 4.0
        ));
        svg::write_paint_attr(&mut out, "fill", self.color);
        out.push_str("/>\n</g>\n");
        svg::close_svg(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use core::time::Duration;

    use super::*;

    fn run(frames: &FrameLoop, pointer: &Pointer, mut now: u64) -> (u64, f64) {
        let mut max = f64::NEG_INFINITY;
        while pointer.is_animating() {
            now += 16;
            assert!(now < 60_000, "pointer never settled");
            frames.tick(Duration::from_millis(now));
            max = max.max(pointer.angle());
        }
        (now, max)
    }

    #[test]
    fn springs_to_the_target_with_unclamped_overshoot() {
        let frames = FrameLoop::new();
        let pointer = Pointer::new(&frames, PointerConfig::default(), 270.0).unwrap();
        assert_eq!(pointer.angle(), 0.0, "starts at rest");
        assert_eq!(pointer.transform(), "rotate(0deg)");

        let (_, max) = run(&frames, &pointer, 0);
        assert!(max > 270.0, "default spring overshoots, max {max}");
        assert_eq!(pointer.angle(), 270.0);
        assert_eq!(pointer.transform(), "rotate(270deg)");
        assert_eq!(frames.frame_listener_count(), 0);
    }

    #[test]
    fn same_target_does_not_restart() {
        let frames = FrameLoop::new();
        let mut pointer = Pointer::new(&frames, PointerConfig::default(), 90.0).unwrap();
        frames.tick(Duration::from_millis(16));
        let moving = pointer.angle();
        pointer.set_angle(90.0);
        assert_eq!(pointer.angle(), moving);
        assert_eq!(frames.frame_listener_count(), 1);

        run(&frames, &pointer, 16);
        pointer.set_angle(90.0);
        assert!(!pointer.is_animating(), "already there");
    }

    #[test]
    fn retargeting_mid_flight_keeps_one_listener() {
        let frames = FrameLoop::new();
        let mut pointer = Pointer::new(&frames, PointerConfig::default(), 180.0).unwrap();
        for t in 1..=5 {
            frames.tick(Duration::from_millis(t * 16));
        }
        pointer.set_angle(30.0);
        assert_eq!(frames.frame_listener_count(), 1);
        run(&frames, &pointer, 80);
        assert_eq!(pointer.angle(), 30.0);
        drop(pointer);
        assert!(frames.is_idle());
    }

    #[test]
    fn svg_rotates_about_the_center() {
        let frames = FrameLoop::new();
        let pointer = Pointer::new(&frames, PointerConfig::default(), 0.0).unwrap();
        let svg = pointer.to_svg();
        assert!(svg.contains(r#"viewBox="0 0 105 105""#), "{svg}");
        assert!(svg.contains(r#"rotate(0 52.5 52.5)"#), "{svg}");
        assert!(svg.contains(r##"points="0 0 4 4 0 8" transform="translate(101 48.5)" fill="#0066ff""##), "{svg}");
    }
}
