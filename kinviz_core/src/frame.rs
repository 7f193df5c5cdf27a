// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-driven frame loop.
//!
//! A [`FrameLoop`] stands in for a UI host's animation-frame and timeout facilities. The host calls
//! [`FrameLoop::tick`] once per rendering frame with a monotonic timestamp; due timers fire first,
//! then every per-frame listener runs once in registration order.
//!
//! Registration hands back a [`Subscription`]. Dropping it (or calling
//! [`Subscription::cancel`]) detaches the callback, so a component that owns its subscriptions
//! releases all of them on teardown. Listener and timer counts are observable for leak checks.

extern crate alloc;

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;
use core::time::Duration;

use hashbrown::HashMap;

type FrameListener = Rc<RefCell<dyn FnMut(Duration)>>;

struct Timer {
    due: Duration,
    callback: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Registry {
    now: Duration,
    last_id: u64,
    frames: HashMap<u64, FrameListener>,
    timers: HashMap<u64, Timer>,
}

impl Registry {
    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("now", &self.now)
            .field("frames", &self.frames.len())
            .field("timers", &self.timers.len())
            .finish_non_exhaustive()
    }
}

/// A single-threaded source of frame callbacks and one-shot timers.
///
/// Cloning a `FrameLoop` yields another handle to the same loop.
#[derive(Clone, Debug, Default)]
pub struct FrameLoop {
    registry: Rc<RefCell<Registry>>,
}

impl FrameLoop {
    /// Creates a loop whose clock starts at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// The timestamp of the most recent tick.
    pub fn now(&self) -> Duration {
        self.registry.borrow().now
    }

    /// Registers `listener` to run on every subsequent tick.
    pub fn on_frame(&self, listener: impl FnMut(Duration) + 'static) -> Subscription {
        let listener: FrameListener = Rc::new(RefCell::new(listener));
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id();
        registry.frames.insert(id, listener);
        self.subscription(Slot::Frame(id))
    }

    /// Schedules `callback` to run once, on the first tick at or after `now() + delay`.
    pub fn after(&self, delay: Duration, callback: impl FnOnce() + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id();
        let due = registry.now.saturating_add(delay);
        registry.timers.insert(
            id,
            Timer {
                due,
                callback: Box::new(callback),
            },
        );
        self.subscription(Slot::Timer(id))
    }

    /// Advances the clock to `now` and dispatches callbacks.
    ///
    /// Timestamps earlier than the current clock are ignored for timing purposes (the clock never
    /// runs backwards). Due timers fire first, in deadline order, then every frame listener runs.
    /// Callbacks may register or cancel subscriptions: a listener cancelled during this tick is not
    /// invoked afterwards, and a listener registered by another frame listener first runs on the
    /// next tick.
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly from inside one of its own callbacks.
    pub fn tick(&self, now: Duration) {
        let now = {
            let mut registry = self.registry.borrow_mut();
            registry.now = registry.now.max(now);
            registry.now
        };

        let mut due: Vec<(Duration, u64)> = self
            .registry
            .borrow()
            .timers
            .iter()
            .filter(|(_, timer)| timer.due <= now)
            .map(|(&id, timer)| (timer.due, id))
            .collect();
        due.sort_unstable();
        for (_, id) in due {
            let timer = self.registry.borrow_mut().timers.remove(&id);
            if let Some(timer) = timer {
                log::trace!("frame loop: timer {id} fired at {now:?}");
                (timer.callback)();
            }
        }

        let mut listeners: Vec<(u64, FrameListener)> = self
            .registry
            .borrow()
            .frames
            .iter()
            .map(|(&id, listener)| (id, Rc::clone(listener)))
            .collect();
        listeners.sort_unstable_by_key(|(id, _)| *id);
        for (id, listener) in listeners {
            if !self.registry.borrow().frames.contains_key(&id) {
                continue;
            }
            let mut listener = listener.borrow_mut();
            (&mut *listener)(now);
        }
    }

    /// Number of registered per-frame listeners.
    pub fn frame_listener_count(&self) -> usize {
        self.registry.borrow().frames.len()
    }

    /// Number of timers that have not fired or been cancelled.
    pub fn timer_count(&self) -> usize {
        self.registry.borrow().timers.len()
    }

    /// Returns `true` when nothing is registered.
    pub fn is_idle(&self) -> bool {
        let registry = self.registry.borrow();
        registry.frames.is_empty() && registry.timers.is_empty()
    }

    fn subscription(&self, slot: Slot) -> Subscription {
        Subscription {
            slot,
            registry: Rc::downgrade(&self.registry),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Slot {
    Frame(u64),
    Timer(u64),
}

/// A registered frame listener or timer.
///
/// The registration lives exactly as long as this value.
#[must_use = "dropping a `Subscription` cancels it"]
#[derive(Debug)]
pub struct Subscription {
    slot: Slot,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Detaches the callback. Equivalent to dropping the subscription.
    pub fn cancel(self) {
        drop(self);
    }

    /// Returns `true` while the callback is still registered.
    ///
    /// A timer stops being active once it has fired.
    pub fn is_active(&self) -> bool {
        let Some(registry) = self.registry.upgrade() else {
            return false;
        };
        let registry = registry.borrow();
        match self.slot {
            Slot::Frame(id) => registry.frames.contains_key(&id),
            Slot::Timer(id) => registry.timers.contains_key(&id),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        // Removed callbacks are dropped after the registry borrow ends: their captures may own
        // further subscriptions.
        let (frame, timer) = {
            let mut registry = registry.borrow_mut();
            match self.slot {
                Slot::Frame(id) => (registry.frames.remove(&id), None),
                Slot::Timer(id) => (None, registry.timers.remove(&id)),
            }
        };
        drop(frame);
        drop(timer);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;
    use core::cell::Cell;

    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn listeners_run_every_tick_until_dropped() {
        let frames = FrameLoop::new();
        let calls = Rc::new(Cell::new(0));
        let sub = frames.on_frame({
            let calls = Rc::clone(&calls);
            move |_| calls.set(calls.get() + 1)
        });
        assert_eq!(frames.frame_listener_count(), 1);

        frames.tick(ms(16));
        frames.tick(ms(32));
        assert_eq!(calls.get(), 2);

        drop(sub);
        assert_eq!(frames.frame_listener_count(), 0);
        frames.tick(ms(48));
        assert_eq!(calls.get(), 2, "no calls after the subscription is dropped");
    }

    #[test]
    fn timers_fire_once_in_due_order() {
        let frames = FrameLoop::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let late = frames.after(ms(50), {
            let log = Rc::clone(&log);
            move || log.borrow_mut().push("late")
        });
        let early = frames.after(ms(20), {
            let log = Rc::clone(&log);
            move || log.borrow_mut().push("early")
        });
        assert_eq!(frames.timer_count(), 2);

        frames.tick(ms(10));
        assert!(log.borrow().is_empty(), "nothing due yet");
        frames.tick(ms(60));
        frames.tick(ms(70));
        assert_eq!(*log.borrow(), vec!["early", "late"]);
        assert!(!early.is_active(), "fired timers are inactive");
        assert!(!late.is_active());
        assert!(frames.is_idle());
    }

    #[test]
    fn cancelled_timers_never_fire() {
        let frames = FrameLoop::new();
        let fired = Rc::new(Cell::new(false));
        let timer = frames.after(ms(10), {
            let fired = Rc::clone(&fired);
            move || fired.set(true)
        });
        timer.cancel();
        assert_eq!(frames.timer_count(), 0);
        frames.tick(ms(100));
        assert!(!fired.get(), "cancelled timer fired");
    }

    #[test]
    fn unbounded_delays_wait_forever() {
        let frames = FrameLoop::new();
        frames.tick(ms(16));
        let fired = Rc::new(Cell::new(false));
        let _timer = frames.after(Duration::MAX, {
            let fired = Rc::clone(&fired);
            move || fired.set(true)
        });
        frames.tick(ms(1_000_000));
        assert!(!fired.get(), "deadline saturates at the end of time");
        assert_eq!(frames.timer_count(), 1);
    }

    #[test]
    fn a_listener_can_cancel_a_later_listener_mid_tick() {
        let frames = FrameLoop::new();
        let victim_calls = Rc::new(Cell::new(0));
        let victim_slot: Rc<RefCell<Option<Subscription>>> = Rc::new(RefCell::new(None));

        let _killer = frames.on_frame({
            let victim_slot = Rc::clone(&victim_slot);
            move |_| drop(victim_slot.borrow_mut().take())
        });
        let victim = frames.on_frame({
            let victim_calls = Rc::clone(&victim_calls);
            move |_| victim_calls.set(victim_calls.get() + 1)
        });
        *victim_slot.borrow_mut() = Some(victim);

        frames.tick(ms(16));
        assert_eq!(victim_calls.get(), 0, "cancelled mid-tick, never invoked");
        assert_eq!(frames.frame_listener_count(), 1);
    }

    #[test]
    fn the_clock_is_monotonic() {
        let frames = FrameLoop::new();
        frames.tick(ms(100));
        frames.tick(ms(40));
        assert_eq!(frames.now(), ms(100));
        let seen = Rc::new(Cell::new(Duration::ZERO));
        let _sub = frames.on_frame({
            let seen = Rc::clone(&seen);
            move |now| seen.set(now)
        });
        frames.tick(ms(90));
        assert_eq!(seen.get(), ms(100));
    }

    #[test]
    fn subscriptions_outliving_the_loop_are_inert() {
        let frames = FrameLoop::new();
        let sub = frames.on_frame(|_| {});
        drop(frames);
        assert!(!sub.is_active());
        drop(sub);
    }
}
