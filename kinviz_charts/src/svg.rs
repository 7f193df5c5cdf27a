// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG writing helpers shared by the chart components.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use core::fmt::Display;

use kinviz_core::{ColorStop, PathData};
use peniko::Color;

use crate::GradientVector;

/// Opens an `<svg>` root whose `viewBox` is `0 0 width height`.
///
/// When `sized` is set the element also carries matching `width`/`height` attributes.
pub(crate) fn open_svg(out: &mut String, width: f64, height: f64, sized: bool) {
    out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1""#);
    out.push_str(&format!(r#" viewBox="0 0 {width} {height}""#));
    if sized {
        out.push_str(&format!(r#" width="{width}" height="{height}""#));
    }
    out.push_str(">\n");
}

pub(crate) fn close_svg(out: &mut String) {
    out.push_str("</svg>\n");
}

/// The color as `#rrggbb`, ignoring alpha.
pub(crate) fn hex(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}

fn svg_paint(color: Color) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    let value = hex(color);
    let opacity = if rgba.a == 255 {
        None
    } else {
        Some(f64::from(rgba.a) / 255.0)
    };
    (value, opacity)
}

/// Writes ` name="#rrggbb"`, plus ` name-opacity` when the color is translucent.
pub(crate) fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    let (value, opacity) = svg_paint(color);
    out.push_str(&format!(r#" {name}="{value}""#));
    if let Some(o) = opacity {
        out.push_str(&format!(r#" {name}-opacity="{o}""#));
    }
}

pub(crate) fn write_stop(out: &mut String, offset: f64, color: &str, opacity: impl Display) {
    out.push_str(&format!(
        r#"<stop offset="{offset}" stop-color="{color}" stop-opacity="{opacity}"/>"#
    ));
    out.push('\n');
}

pub(crate) fn write_linear_gradient(
    out: &mut String,
    id: &str,
    vector: GradientVector,
    stops: &[ColorStop],
) {
    out.push_str(&format!(
        r#"<linearGradient id="{id}" x1="{}" y1="{}" x2="{}" y2="{}">"#,
        vector.x1, vector.y1, vector.x2, vector.y2
    ));
    out.push('\n');
    for stop in stops {
        write_stop(out, stop.offset, &stop.hex(), stop.opacity);
    }
    out.push_str("</linearGradient>\n");
}

/// Writes `<path d="..."` followed by `attrs` and closes the element.
pub(crate) fn write_path(out: &mut String, d: &PathData, attrs: &str) {
    out.push_str(&format!(r#"<path d="{d}"{attrs}/>"#));
    out.push('\n');
}

#[cfg(test)]
mod tests {
    extern crate std;

    use kinviz_core::{ColorInput, color_stops};

    use super::*;

    #[test]
    fn translucent_paint_gets_an_opacity_attribute() {
        let mut out = String::new();
        write_paint_attr(&mut out, "fill", Color::TRANSPARENT);
        assert_eq!(out, r##" fill="#000000" fill-opacity="0""##);

        out.clear();
        write_paint_attr(&mut out, "stroke", Color::from_rgb8(0, 0x66, 0xff));
        assert_eq!(out, r##" stroke="#0066ff""##);
    }

    #[test]
    fn gradients_list_their_stops() {
        let stops = color_stops(&ColorInput::from(("#647DF8", "#72F3FD"))).unwrap();
        let mut out = String::new();
        write_linear_gradient(&mut out, "fg", GradientVector::BOTTOM_TO_TOP, &stops);
        assert_eq!(
            out,
            concat!(
                r#"<linearGradient id="fg" x1="0" y1="1" x2="0" y2="0">"#,
                "\n",
                r##"<stop offset="0" stop-color="#647df8" stop-opacity="1"/>"##,
                "\n",
                r##"<stop offset="1" stop-color="#72f3fd" stop-opacity="1"/>"##,
                "\n</linearGradient>\n",
            )
        );
    }
}
