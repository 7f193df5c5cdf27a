// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gradient color stops resolved from CSS color strings.

extern crate alloc;

use alloc::format;
use alloc::string::{String, ToString};

use peniko::Color;
use peniko::color::{Srgb, parse_color};

use crate::ConfigError;

/// A color argument: either one CSS color or a start/end pair for a gradient.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ColorInput {
    /// A single color, treated as a gradient whose two ends are equal.
    Single(String),
    /// A start/end color pair.
    Pair(String, String),
}

impl ColorInput {
    /// The `(start, end)` color strings.
    pub fn ends(&self) -> (&str, &str) {
        match self {
            Self::Single(c) => (c, c),
            Self::Pair(a, b) => (a, b),
        }
    }
}

impl From<&str> for ColorInput {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for ColorInput {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<(&str, &str)> for ColorInput {
    fn from((start, end): (&str, &str)) -> Self {
        Self::Pair(start.to_string(), end.to_string())
    }
}

impl From<[&str; 2]> for ColorInput {
    fn from([start, end]: [&str; 2]) -> Self {
        Self::Pair(start.to_string(), end.to_string())
    }
}

/// One stop of a gradient definition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorStop {
    /// Position along the gradient, `0` at the start and `1` at the end.
    pub offset: f64,
    /// The stop color with its alpha forced to opaque.
    pub color: Color,
    /// The stop opacity taken from the input color's alpha.
    pub opacity: f32,
}

impl ColorStop {
    /// The stop color as a lowercase `#rrggbb` string.
    pub fn hex(&self) -> String {
        let rgba = self.color.to_rgba8();
        format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
    }
}

/// Parses a CSS color string (hex, `rgb()`/`rgba()`, named colors, `transparent`).
pub fn resolve_color(input: &str) -> Result<Color, ConfigError> {
    parse_color(input.trim())
        .map(|c| c.to_alpha_color::<Srgb>())
        .map_err(|_| ConfigError::InvalidColor(input.to_string()))
}

/// Resolves a color input into its two gradient stops at offsets `0` and `1`.
pub fn color_stops(input: &ColorInput) -> Result<[ColorStop; 2], ConfigError> {
    let (start, end) = input.ends();
    Ok([stop(0.0, start)?, stop(1.0, end)?])
}

fn stop(offset: f64, input: &str) -> Result<ColorStop, ConfigError> {
    let color = resolve_color(input)?;
    let opacity = color.components[3];
    Ok(ColorStop {
        offset,
        color: color.with_alpha(1.0),
        opacity,
    })
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn single_color_is_a_degenerate_pair() {
        let [a, b] = color_stops(&"#F6F8FD".into()).unwrap();
        assert_eq!(a.offset, 0.0);
        assert_eq!(b.offset, 1.0);
        assert_eq!(a.hex(), "#f6f8fd");
        assert_eq!(a.color, b.color);
        assert_eq!(a.opacity, 1.0);
    }

    #[test]
    fn alpha_moves_into_opacity() {
        let input = ColorInput::from(("rgba(0, 153, 255, 0.4)", "rgba(0, 102, 255, 0)"));
        let [start, end] = color_stops(&input).unwrap();
        assert_eq!(start.hex(), "#0099ff");
        assert!((start.opacity - 0.4).abs() < 1e-6, "opacity {}", start.opacity);
        assert_eq!(start.color.to_rgba8().a, 255);
        assert_eq!(end.hex(), "#0066ff");
        assert_eq!(end.opacity, 0.0);
    }

    #[test]
    fn transparent_and_named_colors_resolve() {
        let [stop, _] = color_stops(&"transparent".into()).unwrap();
        assert_eq!(stop.opacity, 0.0);
        let [red, _] = color_stops(&"red".into()).unwrap();
        assert_eq!(red.hex(), "#ff0000");
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(
            color_stops(&("#7CF3FF", "not-a-color").into()),
            Err(ConfigError::InvalidColor("not-a-color".into()))
        );
    }
}
