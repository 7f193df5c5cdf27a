// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delayed input changes owned by a chart component.

extern crate alloc;

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::time::Duration;

use kinviz_core::{ConfigError, FrameLoop, Subscription};

/// One-shot timers that apply input to a component's shared state.
///
/// The timers only hold a weak reference to the state, and dropping a `PendingInputs` cancels
/// every timer that has not fired yet.
#[derive(Debug, Default)]
pub(crate) struct PendingInputs {
    timers: Vec<Subscription>,
}

impl PendingInputs {
    /// Runs `apply` against `target` once `delay` has elapsed on `frames`.
    ///
    /// `apply` can still fail when it fires (the component's configuration may have changed in the
    /// meantime); such failures are logged and dropped.
    pub(crate) fn schedule<T: 'static>(
        &mut self,
        frames: &FrameLoop,
        delay: Duration,
        target: &Rc<RefCell<T>>,
        component: &'static str,
        apply: impl FnOnce(&Rc<RefCell<T>>) -> Result<(), ConfigError> + 'static,
    ) {
        self.timers.retain(Subscription::is_active);
        let weak = Rc::downgrade(target);
        let timer = frames.after(delay, move || {
            let Some(target) = weak.upgrade() else {
                return;
            };
            if let Err(err) = apply(&target) {
                log::warn!("{component}: dropped scheduled input: {err}");
            }
        });
        log::trace!("{component}: input scheduled in {delay:?}");
        self.timers.push(timer);
    }

    /// Number of timers that have not fired yet.
    pub(crate) fn len(&self) -> usize {
        self.timers.iter().filter(|t| t.is_active()).count()
    }
}
