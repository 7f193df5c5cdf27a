// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation runtime core for `kinviz`.
//!
//! This crate holds everything a chart needs that is not chart-specific:
//! - **Normalization** of raw series into the `[0, 1]` domain.
//! - **Interpolation** of scalars and series, plus explicit previous/current transition state.
//! - **Color stops** resolved from CSS color strings.
//! - **SVG path data** that renders to an exact path string and converts to a `kurbo::BezPath`.
//! - A single-threaded **frame loop** that hands out RAII subscriptions for per-frame listeners
//!   and one-shot timers.
//! - An **animation driver** that runs timed (eased) or spring progressions on that frame loop.
//!
//! The host owns the clock: it calls [`FrameLoop::tick`] once per rendering frame, and every
//! listener registered through the loop runs synchronously inside that call.

#![no_std]

extern crate alloc;

mod color;
mod driver;
mod easing;
mod error;
#[cfg(not(feature = "std"))]
mod float;
mod frame;
mod interpolate;
mod normalize;
mod path;
mod spring;

pub use color::{ColorInput, ColorStop, color_stops, resolve_color};
pub use driver::{AnimationDriver, AnimationHandle, Motion, Tick, TimingConfig};
pub use easing::Easing;
pub use error::ConfigError;
pub use frame::{FrameLoop, Subscription};
pub use interpolate::{ScalarTransition, SeriesTransition, interpolate, interpolate_series};
pub use normalize::{NormalizePolicy, normalize, normalize_by_name};
pub use path::{PathCommand, PathData};
pub use spring::SpringConfig;
