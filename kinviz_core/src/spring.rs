// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Damped spring integration.

use core::time::Duration;

/// Longest stretch of time simulated per frame.
///
/// Gaps between frames longer than this are treated as this long.
const MAX_FRAME_STEP: Duration = Duration::from_millis(64);

/// Integration step, in seconds.
const STEP: f64 = 0.001;

/// Spring parameters.
///
/// `stiffness` and `damping` are in physical units (unit mass). Use
/// [`SpringConfig::from_tension_friction`] for the origami-style tension/friction knobs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringConfig {
    /// Restoring force per unit displacement.
    pub stiffness: f64,
    /// Resisting force per unit velocity.
    pub damping: f64,
    /// Speed under which the spring may come to rest.
    pub rest_speed: f64,
    /// Distance to the target under which the spring may come to rest.
    pub rest_displacement: f64,
    /// Stop as soon as the value passes the target instead of oscillating.
    pub overshoot_clamping: bool,
}

impl SpringConfig {
    /// Converts origami tension/friction into stiffness/damping.
    pub fn from_tension_friction(tension: f64, friction: f64) -> Self {
        Self {
            stiffness: (tension - 30.0) * 3.62 + 194.0,
            damping: (friction - 8.0) * 3.0 + 25.0,
            ..Self::default()
        }
    }

    /// Sets the overshoot clamping flag.
    pub fn with_overshoot_clamping(mut self, clamp: bool) -> Self {
        self.overshoot_clamping = clamp;
        self
    }

    /// Sets both rest thresholds.
    pub fn with_rest_thresholds(mut self, speed: f64, displacement: f64) -> Self {
        self.rest_speed = speed;
        self.rest_displacement = displacement;
        self
    }

    fn acceleration(&self, to: f64, position: f64, velocity: f64) -> f64 {
        self.stiffness * (to - position) - self.damping * velocity
    }
}

impl Default for SpringConfig {
    /// Origami tension 40, friction 7.
    fn default() -> Self {
        Self {
            stiffness: 230.2,
            damping: 22.0,
            rest_speed: 0.001,
            rest_displacement: 0.001,
            overshoot_clamping: false,
        }
    }
}

/// A spring in flight.
#[derive(Clone, Debug)]
pub(crate) struct SpringState {
    config: SpringConfig,
    from: f64,
    to: f64,
    position: f64,
    velocity: f64,
    last: Duration,
}

impl SpringState {
    pub(crate) fn new(
        config: SpringConfig,
        from: f64,
        to: f64,
        velocity: f64,
        now: Duration,
    ) -> Self {
        Self {
            config,
            from,
            to,
            position: from,
            velocity,
            last: now,
        }
    }

    pub(crate) fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Integrates up to `now` in fixed 1 ms RK4 steps.
    ///
    /// Returns the new position and whether the spring has come to rest.
    pub(crate) fn advance(&mut self, now: Duration) -> (f64, bool) {
        let now = now.min(self.last + MAX_FRAME_STEP);
        let elapsed = now.saturating_sub(self.last);
        let steps = elapsed.as_millis();
        for _ in 0..steps {
            self.step();
        }
        self.last += Duration::from_millis(u64::try_from(steps).unwrap_or(u64::MAX));

        let c = &self.config;
        let overshooting = c.overshoot_clamping
            && c.stiffness != 0.0
            && if self.from < self.to {
                self.position > self.to
            } else {
                self.position < self.to
            };
        let resting_speed = self.velocity.abs() <= c.rest_speed;
        let resting_displacement =
            c.stiffness == 0.0 || (self.to - self.position).abs() <= c.rest_displacement;

        if overshooting || (resting_speed && resting_displacement) {
            if c.stiffness != 0.0 {
                self.position = self.to;
            }
            self.velocity = 0.0;
            return (self.position, true);
        }
        (self.position, false)
    }

    fn step(&mut self) {
        let c = self.config;
        let (x, v, to) = (self.position, self.velocity, self.to);

        let av = v;
        let aa = c.acceleration(to, x, v);

        let bv = v + aa * STEP / 2.0;
        let ba = c.acceleration(to, x + av * STEP / 2.0, bv);

        let cv = v + ba * STEP / 2.0;
        let ca = c.acceleration(to, x + bv * STEP / 2.0, cv);

        let dv = v + ca * STEP;
        let da = c.acceleration(to, x + cv * STEP, dv);

        let dxdt = (av + 2.0 * (bv + cv) + dv) / 6.0;
        let dvdt = (aa + 2.0 * (ba + ca) + da) / 6.0;

        self.position = x + dxdt * STEP;
        self.velocity = v + dvdt * STEP;
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn run_to_rest(state: &mut SpringState, frame: Duration) -> (f64, usize, f64, f64) {
        let mut now = Duration::ZERO;
        let (mut min, mut max) = (f64::INFINITY, f64::NEG_INFINITY);
        for frames in 1..10_000 {
            now += frame;
            let (value, done) = state.advance(now);
            min = min.min(value);
            max = max.max(value);
            if done {
                return (value, frames, min, max);
            }
        }
        panic!("spring never settled");
    }

    #[test]
    fn origami_conversion() {
        let c = SpringConfig::from_tension_friction(3.0, 4.0);
        assert!((c.stiffness - 96.26).abs() < 1e-9, "stiffness {}", c.stiffness);
        assert_eq!(c.damping, 13.0);
        let d = SpringConfig::from_tension_friction(40.0, 7.0);
        assert!((d.stiffness - SpringConfig::default().stiffness).abs() < 1e-9, "defaults match");
    }

    #[test]
    fn underdamped_spring_overshoots_then_settles_on_target() {
        let config = SpringConfig::from_tension_friction(3.0, 4.0);
        let mut s = SpringState::new(config, 0.0, 270.0, 0.0, Duration::ZERO);
        let (value, frames, _, max) = run_to_rest(&mut s, Duration::from_millis(16));
        assert_eq!(value, 270.0);
        assert!(max > 270.0, "expected overshoot, max was {max}");
        assert!(frames > 10, "settled suspiciously fast: {frames} frames");
    }

    #[test]
    fn overshoot_clamping_stops_at_the_target() {
        let config = SpringConfig::from_tension_friction(3.0, 4.0).with_overshoot_clamping(true);
        let mut s = SpringState::new(config, 360.0, 90.0, 0.0, Duration::ZERO);
        let (value, _, min, _) = run_to_rest(&mut s, Duration::from_millis(16));
        assert_eq!(value, 90.0);
        assert_eq!(min, 90.0, "clamped spring never reports a value past the target");
    }

    #[test]
    fn long_frames_are_capped() {
        let mut s = SpringState::new(SpringConfig::default(), 0.0, 1.0, 0.0, Duration::ZERO);
        let (value, done) = s.advance(Duration::from_secs(10));
        assert!(!done, "a single capped frame cannot settle");
        assert!(value > 0.0 && value < 1.0, "value {value}");
        assert_eq!(s.last, MAX_FRAME_STEP);
    }
}
