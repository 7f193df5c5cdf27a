// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animated SVG charts built on `kinviz_core`.
//!
//! The crate has two layers:
//! - **Marks** are pure geometry builders: a normalized series plus dimensions in, SVG path data
//!   out ([`RingMarkSpec`], [`AreaMarkSpec`], [`bar_path`]).
//! - **Components** own an [`kinviz_core::AnimationDriver`] and the previous/current input, and
//!   rebuild their marks on every frame of a transition ([`RingChart`], [`AreaChart`],
//!   [`BarChart`], [`Pointer`], [`Counter`]).
//!
//! Components render themselves with `to_svg`; the host only has to tick the shared
//! [`kinviz_core::FrameLoop`].

#![no_std]

extern crate alloc;

mod area_chart;
mod area_mark;
mod bar_chart;
mod bar_mark;
mod counter;
#[cfg(not(feature = "std"))]
mod float;
mod gradient;
mod pending;
mod pointer;
mod ring_chart;
mod ring_mark;
mod svg;

pub use area_chart::{AreaChart, AreaConfig};
pub use area_mark::{AreaMarkSpec, AreaPaths};
pub use bar_chart::{BarChart, BarConfig};
pub use bar_mark::{BarMarkSpec, bar_path};
pub use counter::{Counter, CounterFormat, HIGHLIGHT_COLOR, TEXT_COLOR};
pub use gradient::GradientVector;
pub use pointer::{POINTER_SHAPE, Pointer, PointerConfig, rotation};
pub use ring_chart::{DEFAULT_RING_COLORS, RingChart, RingConfig, Selection};
pub use ring_mark::{RingMarkSpec, RingSegment, Sweep, sweeps};
