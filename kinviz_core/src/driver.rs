// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The animation driver.
//!
//! An [`AnimationDriver`] owns one animated value and at most one in-flight progression of it.
//! Each progression registers a single frame listener on the [`FrameLoop`]; starting another
//! progression, stopping, settling, or dropping the driver detaches that listener before anything
//! else happens, so two progressions never write to the same value on alternating frames.

extern crate alloc;

use alloc::rc::{Rc, Weak};
use core::cell::RefCell;
use core::time::Duration;

use crate::spring::SpringState;
use crate::{Easing, FrameLoop, SpringConfig, Subscription, interpolate};

/// Parameters of a timed progression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingConfig {
    /// Time from start to finish (default 350 ms).
    pub duration: Duration,
    /// Curve applied to linear time (default [`Easing::EaseInOut`]).
    pub easing: Easing,
    /// Time to hold the start value before moving (default zero).
    pub delay: Duration,
}

impl TimingConfig {
    /// Creates a config with the given duration and default easing.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    /// Sets the easing curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Sets the start delay.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(350),
            easing: Easing::default(),
            delay: Duration::ZERO,
        }
    }
}

/// What a progression moves the driver's value toward, and how.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Motion {
    /// Reach `to` after a fixed duration.
    Timing {
        /// Target value.
        to: f64,
        /// Duration, easing and delay.
        config: TimingConfig,
    },
    /// Approach `to` with a damped spring until it comes to rest.
    Spring {
        /// Target value.
        to: f64,
        /// Spring parameters.
        config: SpringConfig,
    },
}

impl Motion {
    /// A timed motion toward `to`.
    pub fn timing(to: f64, config: TimingConfig) -> Self {
        Self::Timing { to, config }
    }

    /// A spring motion toward `to`.
    pub fn spring(to: f64, config: SpringConfig) -> Self {
        Self::Spring { to, config }
    }

    /// The value this motion ends at.
    pub fn target(&self) -> f64 {
        match *self {
            Self::Timing { to, .. } | Self::Spring { to, .. } => to,
        }
    }
}

/// One frame's worth of progress, passed to the listener given to [`AnimationDriver::start`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tick {
    /// The driver's value on this frame.
    pub value: f64,
    /// `true` on the final frame; no further ticks follow.
    pub finished: bool,
}

#[derive(Clone, Debug)]
struct TimedState {
    from: f64,
    to: f64,
    /// Set on the first frame after `start`, so a stale clock cannot skip the progression.
    start: Option<Duration>,
    config: TimingConfig,
}

impl TimedState {
    fn advance(&mut self, now: Duration) -> (f64, bool) {
        let start = *self
            .start
            .get_or_insert_with(|| now.saturating_add(self.config.delay));
        if now < start {
            return (self.from, false);
        }
        let elapsed = now - start;
        let total = self.config.duration;
        if elapsed >= total {
            return (self.to, true);
        }
        let t = elapsed.as_nanos() as f64 / total.as_nanos() as f64;
        (
            interpolate(self.from, self.to, self.config.easing.apply(t)),
            false,
        )
    }
}

#[derive(Clone, Debug)]
enum Progression {
    Timed(TimedState),
    Spring(SpringState),
}

impl Progression {
    fn advance(&mut self, now: Duration) -> (f64, bool) {
        match self {
            Self::Timed(timed) => timed.advance(now),
            Self::Spring(spring) => spring.advance(now),
        }
    }

    fn velocity(&self) -> f64 {
        match self {
            Self::Timed(_) => 0.0,
            Self::Spring(spring) => spring.velocity(),
        }
    }
}

#[derive(Debug)]
struct Active {
    generation: u64,
    spring: bool,
    subscription: Subscription,
}

#[derive(Debug, Default)]
struct DriverState {
    value: f64,
    velocity: f64,
    generation: u64,
    active: Option<Active>,
}

impl DriverState {
    /// Takes the active progression if it belongs to `generation`.
    fn take_active(&mut self, generation: u64) -> Option<Active> {
        if self.active.as_ref()?.generation == generation {
            self.active.take()
        } else {
            None
        }
    }
}

/// Drives one value through timed or spring progressions on a [`FrameLoop`].
#[derive(Debug)]
pub struct AnimationDriver {
    frames: FrameLoop,
    state: Rc<RefCell<DriverState>>,
}

impl AnimationDriver {
    /// Creates a driver at value `0` on `frames`.
    pub fn new(frames: &FrameLoop) -> Self {
        Self {
            frames: frames.clone(),
            state: Rc::default(),
        }
    }

    /// The current value.
    pub fn value(&self) -> f64 {
        self.state.borrow().value
    }

    /// Returns `true` while a progression is in flight.
    pub fn is_animating(&self) -> bool {
        self.state.borrow().active.is_some()
    }

    /// Stops any progression and jumps to `value`.
    pub fn set_value(&mut self, value: f64) {
        self.stop();
        let mut state = self.state.borrow_mut();
        state.value = value;
        state.velocity = 0.0;
    }

    /// Starts a progression from the current value, replacing any in-flight one.
    ///
    /// `start` returns immediately. `listener` runs on each subsequent [`FrameLoop::tick`] with the
    /// new value, until the progression finishes (the last call has [`Tick::finished`] set) or is
    /// stopped (no further calls at all). A spring started while another spring is in flight
    /// keeps its velocity.
    ///
    /// A timed progression measures its delay and duration from the first tick it sees, which
    /// reports the start value. Springs integrate at most a few frames' worth of time per tick.
    pub fn start(&mut self, motion: Motion, mut listener: impl FnMut(Tick) + 'static) -> AnimationHandle {
        let replaced = self.state.borrow_mut().active.take();
        let (from, velocity, generation) = {
            let mut state = self.state.borrow_mut();
            let velocity = match &replaced {
                Some(active) if active.spring => state.velocity,
                _ => 0.0,
            };
            state.generation += 1;
            (state.value, velocity, state.generation)
        };
        if replaced.is_some() {
            log::trace!("driver: replacing in-flight progression");
        }
        drop(replaced);

        let now = self.frames.now();
        let mut progression = match motion {
            Motion::Timing { to, config } => Progression::Timed(TimedState {
                from,
                to,
                start: None,
                config,
            }),
            Motion::Spring { to, config } => {
                Progression::Spring(SpringState::new(config, from, to, velocity, now))
            }
        };
        let spring = matches!(progression, Progression::Spring(_));
        log::debug!(
            "driver: start {} {from} -> {}",
            if spring { "spring" } else { "timing" },
            motion.target()
        );

        let weak: Weak<RefCell<DriverState>> = Rc::downgrade(&self.state);
        let subscription = self.frames.on_frame(move |now| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            let (value, finished) = progression.advance(now);
            let settled = {
                let mut state = state.borrow_mut();
                state.value = value;
                state.velocity = progression.velocity();
                if finished {
                    state.take_active(generation)
                } else {
                    None
                }
            };
            if finished {
                log::debug!("driver: settled at {value}");
            }
            listener(Tick { value, finished });
            drop(settled);
        });

        self.state.borrow_mut().active = Some(Active {
            generation,
            spring,
            subscription,
        });
        AnimationHandle {
            state: Rc::downgrade(&self.state),
            generation,
        }
    }

    /// Stops the in-flight progression, if any, leaving the value where it is.
    ///
    /// Returns `true` if a progression was stopped.
    pub fn stop(&mut self) -> bool {
        let active = {
            let mut state = self.state.borrow_mut();
            state.velocity = 0.0;
            state.active.take()
        };
        if active.is_some() {
            log::debug!("driver: stopped");
        }
        active.is_some()
    }
}

impl Drop for AnimationDriver {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Refers to one progression started by [`AnimationDriver::start`].
///
/// A handle only ever affects its own progression: once the driver has moved on to a newer one,
/// [`AnimationHandle::stop`] does nothing.
#[derive(Clone, Debug)]
pub struct AnimationHandle {
    state: Weak<RefCell<DriverState>>,
    generation: u64,
}

impl AnimationHandle {
    /// Cancels the progression, detaching its frame listener.
    ///
    /// Returns `true` if the progression was still running.
    pub fn stop(&self) -> bool {
        let Some(state) = self.state.upgrade() else {
            return false;
        };
        let active = {
            let mut state = state.borrow_mut();
            let active = state.take_active(self.generation);
            if active.is_some() {
                state.velocity = 0.0;
            }
            active
        };
        active.is_some()
    }

    /// Returns `true` while the progression is running.
    pub fn is_active(&self) -> bool {
        self.state.upgrade().is_some_and(|state| {
            state
                .borrow()
                .active
                .as_ref()
                .is_some_and(|active| active.generation == self.generation)
        })
    }
}
