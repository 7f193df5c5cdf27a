// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An animated numeric counter.

extern crate alloc;

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::Rc;
use alloc::string::String;
use core::cell::RefCell;
use core::fmt;
use core::time::Duration;

use kinviz_core::{AnimationDriver, Easing, FrameLoop, Motion, TimingConfig};
use peniko::Color;

/// Text color of a highlighted counter, `#0066FF`.
pub const HIGHLIGHT_COLOR: Color = Color::from_rgb8(0x00, 0x66, 0xff);

/// Text color of a plain counter, `#141619`.
pub const TEXT_COLOR: Color = Color::from_rgb8(0x14, 0x16, 0x19);

/// How a counter displays its number.
#[derive(Clone, Debug, PartialEq)]
pub struct CounterFormat {
    /// Text before the number (default empty).
    pub prefix: String,
    /// Text after the number (default empty).
    pub suffix: String,
    /// Digits after the decimal separator (default `2`).
    pub decimals: usize,
    /// Decimal separator (default `.`).
    pub decimal: String,
    /// Thousands separator; empty disables grouping (default empty).
    pub separator: String,
    /// Draw in [`HIGHLIGHT_COLOR`] instead of [`TEXT_COLOR`] (default `true`).
    pub highlight: bool,
    /// Length of a count (default 350 ms).
    pub duration: Duration,
}

impl Default for CounterFormat {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            decimals: 2,
            decimal: ".".into(),
            separator: String::new(),
            highlight: true,
            duration: Duration::from_millis(350),
        }
    }
}

impl CounterFormat {
    /// Sets the prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets the suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Sets the number of decimals.
    pub fn with_decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    /// Sets the decimal separator.
    pub fn with_decimal(mut self, decimal: impl Into<String>) -> Self {
        self.decimal = decimal.into();
        self
    }

    /// Sets the thousands separator.
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Sets the highlight flag.
    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    /// Sets the count duration.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Formats `value` for display.
    pub fn format(&self, value: f64) -> String {
        let fixed = format!("{:.*}", self.decimals, value);
        let (negative, digits) = match fixed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, fixed.as_str()),
        };
        let (int_part, frac_part) = match digits.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (digits, None),
        };
        let is_zero = digits.bytes().all(|b| b == b'0' || b == b'.');

        let mut out = String::with_capacity(fixed.len() + self.prefix.len() + self.suffix.len());
        out.push_str(&self.prefix);
        if negative && !is_zero {
            out.push('-');
        }
        for (i, ch) in int_part.char_indices() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                out.push_str(&self.separator);
            }
            out.push(ch);
        }
        if let Some(frac_part) = frac_part {
            out.push_str(&self.decimal);
            out.push_str(frac_part);
        }
        out.push_str(&self.suffix);
        out
    }

    /// The text color.
    pub fn color(&self) -> Color {
        if self.highlight {
            HIGHLIGHT_COLOR
        } else {
            TEXT_COLOR
        }
    }
}

type Callback = Box<dyn FnMut()>;

#[derive(Default)]
struct Callbacks {
    on_start: Option<Callback>,
    on_end: Option<Callback>,
}

/// A number that counts toward each new value with an exponential ease-out.
///
/// Counts start from the value currently displayed, so retargeting mid-count continues smoothly.
pub struct Counter {
    format: CounterFormat,
    target: f64,
    driver: AnimationDriver,
    callbacks: Rc<RefCell<Callbacks>>,
}

impl fmt::Debug for Counter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let callbacks = self.callbacks.borrow();
        f.debug_struct("Counter")
            .field("format", &self.format)
            .field("target", &self.target)
            .field("driver", &self.driver)
            .field("on_start", &callbacks.on_start.is_some())
            .field("on_end", &callbacks.on_end.is_some())
            .finish()
    }
}

impl Counter {
    /// Creates a counter at `0` and counts up to `value`.
    pub fn new(frames: &FrameLoop, format: CounterFormat, value: f64) -> Self {
        let mut counter = Self {
            format,
            target: 0.0,
            driver: AnimationDriver::new(frames),
            callbacks: Rc::default(),
        };
        counter.set_value(value);
        counter
    }

    /// Sets the callback run when a count starts.
    pub fn with_on_start(self, on_start: impl FnMut() + 'static) -> Self {
        self.callbacks.borrow_mut().on_start = Some(Box::new(on_start));
        self
    }

    /// Sets the callback run when a count reaches its target.
    ///
    /// A count that is stopped or replaced never ends.
    pub fn with_on_end(self, on_end: impl FnMut() + 'static) -> Self {
        self.callbacks.borrow_mut().on_end = Some(Box::new(on_end));
        self
    }

    /// Counts toward `value`. Setting the current target again does nothing.
    pub fn set_value(&mut self, value: f64) {
        if value == self.target {
            return;
        }
        self.target = value;
        log::debug!("counter: {} -> {value}", self.driver.value());

        let timing = TimingConfig::new(self.format.duration).with_easing(Easing::EaseOutExpo);
        let callbacks = Rc::downgrade(&self.callbacks);
        self.driver
            .start(Motion::timing(value, timing), move |tick| {
                if !tick.finished {
                    return;
                }
                log::debug!("counter: ended at {}", tick.value);
                if let Some(callbacks) = callbacks.upgrade() {
                    fire(&callbacks, |c| &mut c.on_end);
                }
            });
        fire(&self.callbacks, |c| &mut c.on_start);
    }

    /// Stops the count where it is; the end callback does not run.
    pub fn stop(&mut self) {
        if self.driver.stop() {
            self.target = self.driver.value();
        }
    }

    /// The number being counted toward.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// The number currently displayed.
    pub fn value(&self) -> f64 {
        self.driver.value()
    }

    /// The formatted text currently displayed.
    pub fn text(&self) -> String {
        self.format.format(self.value())
    }

    /// The text color.
    pub fn color(&self) -> Color {
        self.format.color()
    }

    /// Returns `true` while counting.
    pub fn is_animating(&self) -> bool {
        self.driver.is_animating()
    }
}

/// Runs one callback without holding the borrow, so it may replace itself.
fn fire(callbacks: &RefCell<Callbacks>, slot: impl Fn(&mut Callbacks) -> &mut Option<Callback>) {
    let taken = slot(&mut callbacks.borrow_mut()).take();
    if let Some(mut callback) = taken {
        callback();
        slot(&mut callbacks.borrow_mut()).get_or_insert(callback);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec::Vec;
    use core::cell::Cell;

    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn formats_with_separators() {
        let format = CounterFormat::default()
            .with_prefix("$")
            .with_suffix(" USD")
            .with_separator(",")
            .with_decimal(",")
            .with_decimals(1);
        let format = CounterFormat {
            separator: ".".into(),
            ..format
        };
        assert_eq!(format.format(1_234_567.21), "$1.234.567,2 USD");
        assert_eq!(format.format(-999.0), "$-999,0 USD");
        assert_eq!(format.format(-0.01), "$0,0 USD", "no negative zero");
    }

    #[test]
    fn default_format() {
        let format = CounterFormat::default();
        assert_eq!(format.format(0.0), "0.00");
        assert_eq!(format.format(1234.5), "1234.50");
        assert_eq!(CounterFormat::default().with_decimals(0).format(2.6), "3");
        assert_eq!(format.color(), HIGHLIGHT_COLOR);
        assert_eq!(format.with_highlight(false).color(), TEXT_COLOR);
    }

    #[test]
    fn counts_up_from_zero_and_ends_once() {
        let frames = FrameLoop::new();
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut counter = Counter::new(&frames, CounterFormat::default(), 0.0)
            .with_on_start({
                let events = Rc::clone(&events);
                move || events.borrow_mut().push("start")
            })
            .with_on_end({
                let events = Rc::clone(&events);
                move || events.borrow_mut().push("end")
            });
        assert!(!counter.is_animating(), "zero target needs no count");

        counter.set_value(100.0);
        assert_eq!(counter.text(), "0.00");
        frames.tick(ms(0));
        frames.tick(ms(100));
        let early = counter.value();
        assert!(early > 80.0 && early < 100.0, "expo front-loads, got {early}");
        frames.tick(ms(350));
        frames.tick(ms(400));
        assert_eq!(counter.text(), "100.00");
        assert_eq!(*events.borrow(), ["start", "end"]);
        assert_eq!(frames.frame_listener_count(), 0);
    }

    #[test]
    fn unchanged_target_does_not_restart() {
        let frames = FrameLoop::new();
        let starts = Rc::new(Cell::new(0));
        let mut counter = Counter::new(&frames, CounterFormat::default(), 5.0).with_on_start({
            let starts = Rc::clone(&starts);
            move || starts.set(starts.get() + 1)
        });
        frames.tick(ms(100));
        let value = counter.value();
        counter.set_value(5.0);
        assert_eq!(starts.get(), 0);
        assert_eq!(counter.value(), value);
    }

    #[test]
    fn stop_freezes_the_count() {
        let frames = FrameLoop::new();
        let ended = Rc::new(Cell::new(false));
        let mut counter = Counter::new(&frames, CounterFormat::default(), 10.0).with_on_end({
            let ended = Rc::clone(&ended);
            move || ended.set(true)
        });
        frames.tick(ms(0));
        frames.tick(ms(50));
        counter.stop();
        let frozen = counter.text();
        for t in [100, 200, 400, 800] {
            frames.tick(ms(t));
        }
        assert_eq!(counter.text(), frozen);
        assert!(!ended.get(), "stopped counts never end");
        assert_eq!(frames.frame_listener_count(), 0);
    }

    #[test]
    fn retarget_continues_from_the_displayed_value() {
        let frames = FrameLoop::new();
        let mut counter = Counter::new(&frames, CounterFormat::default(), 100.0);
        frames.tick(ms(0));
        frames.tick(ms(35));
        let shown = counter.value();
        counter.set_value(0.0);
        frames.tick(ms(36));
        assert!(counter.value() <= shown, "counts down from {shown}");
        assert!(counter.value() > 0.0);
        frames.tick(ms(400));
        assert_eq!(counter.value(), 0.0);
    }
}
