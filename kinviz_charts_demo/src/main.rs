// Copyright 2025 the kinviz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart demos for `kinviz_charts`.
//!
//! Drives a [`FrameLoop`] with simulated 16 ms frames and captures each chart at a few points of
//! its animation.
mod html;

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use kinviz_charts::{
    AreaChart, AreaConfig, BarChart, BarConfig, Counter, CounterFormat, Pointer, PointerConfig,
    RingChart, RingConfig,
};
use kinviz_core::{Easing, FrameLoop, TimingConfig};
use kurbo::{Point, Vec2};
use peniko::Color;

use html::{HtmlSection, figure};

const FRAME: Duration = Duration::from_millis(16);

fn main() {
    let frames = FrameLoop::new();
    let sections = vec![
        ring_demo(&frames),
        ring_selection_demo(&frames),
        area_demo(&frames),
        bar_demo(&frames),
        pointer_demo(&frames),
        counter_demo(&frames),
    ];
    assert!(frames.is_idle(), "every demo chart was dropped");

    let html = html::render_report("kinviz charts demo", &sections);
    std::fs::write("kinviz_charts_demo.html", html).expect("write kinviz_charts_demo.html");
    println!("wrote kinviz_charts_demo.html");
}

/// Ticks at display rate until `duration` has passed.
///
/// Starts with a frame at the current time, which is where newly started transitions anchor.
fn advance(frames: &FrameLoop, duration: Duration) {
    let mut now = frames.now();
    let end = now + duration;
    frames.tick(now);
    while now < end {
        now = (now + FRAME).min(end);
        frames.tick(now);
    }
}

fn caption(elapsed: Duration) -> String {
    format!("t = {} ms", elapsed.as_millis())
}

fn ring_demo(frames: &FrameLoop) -> HtmlSection {
    let mut ring = RingChart::new(frames, RingConfig::default(), &[30.0, 20.0, 25.0, 15.0, 10.0])
        .expect("default ring config");
    let mut body = String::new();
    let mut elapsed = Duration::ZERO;
    for step in [0, 80, 120, 150] {
        let step = Duration::from_millis(step);
        advance(frames, step);
        elapsed += step;
        body.push_str(&figure(
            &caption(elapsed),
            &ring.to_svg_with_prefix(&format!("ring-a{}", elapsed.as_millis())),
        ));
    }

    ring.set_data(&[10.0, 10.0, 60.0])
        .expect("three segments fit five colors");
    for step in [120, 230] {
        advance(frames, Duration::from_millis(step));
        body.push_str(&figure(
            &format!("new input +{step} ms"),
            &ring.to_svg_with_prefix(&format!("ring-b{step}")),
        ));
    }

    HtmlSection {
        title: "Ring",
        description: "Shares grow from an empty ring, then morph to a shorter input. Each segment has rounded ends and its own gradient along its chord.",
        body,
    }
}

fn ring_selection_demo(frames: &FrameLoop) -> HtmlSection {
    let config = RingConfig::default()
        .with_rotation(0.0)
        .with_colors([("#FF7A45", "#FFC069"), ("#36CFC9", "#5CDBD3")])
        .with_outer_ring_color("#F0F2F5");
    let selected = Rc::new(Cell::new(None));
    let mut ring = RingChart::new(frames, config, &[3.0, 1.0])
        .expect("two colors for two segments")
        .with_on_select({
            let selected = Rc::clone(&selected);
            move |s| selected.set(Some(s))
        });
    advance(frames, Duration::from_millis(400));

    let point = Point::new(75.0, 75.0) + Vec2::from_angle(300.0_f64.to_radians()) * 65.0;
    let hit = ring.select_at(point);
    let text = match selected.get() {
        Some(s) => format!("segment {} at {:.0}°", s.index, s.angle),
        None => "nothing".to_string(),
    };
    debug_assert_eq!(hit, selected.get(), "callback sees the returned selection");

    HtmlSection {
        title: "Ring selection",
        description: "A hit test through the rotation picks the topmost segment under a point and reports its mid angle.",
        body: figure(&format!("point hits {text}"), &ring.to_svg_with_prefix("ring-sel")),
    }
}

fn area_demo(frames: &FrameLoop) -> HtmlSection {
    let mut smooth = AreaChart::new(
        frames,
        AreaConfig::default(),
        &[12.0, 18.0, 9.0, 24.0, 16.0, 30.0, 22.0],
    )
    .expect("default area config");
    let straight_config = AreaConfig::default()
        .with_smooth(false)
        .with_stroke_color("#13C2C2")
        .with_fill_color(("rgba(19, 194, 194, 0.35)", "rgba(19, 194, 194, 0)"))
        .with_transition(TimingConfig::new(Duration::from_millis(600)).with_easing(Easing::Linear));
    let mut straight = AreaChart::new(frames, straight_config, &[5.0, 3.0, 8.0, 6.0, 9.0])
        .expect("valid straight area config");

    advance(frames, Duration::from_millis(600));
    smooth.schedule_data(Duration::from_millis(200), &[30.0, 22.0, 16.0, 24.0, 9.0, 18.0, 12.0]);
    straight.set_data(&[9.0, 6.0, 8.0, 3.0, 5.0]);

    let mut body = String::new();
    body.push_str(&figure("settled", &smooth.to_svg_with_prefix("area-smooth-0")));
    advance(frames, Duration::from_millis(375));
    body.push_str(&figure(
        "scheduled input mid-way",
        &smooth.to_svg_with_prefix("area-smooth-1"),
    ));
    body.push_str(&figure(
        "linear, 600 ms",
        &straight.to_svg_with_prefix("area-straight-1"),
    ));
    advance(frames, Duration::from_millis(400));
    body.push_str(&figure("settled", &smooth.to_svg_with_prefix("area-smooth-2")));
    body.push_str(&figure("settled", &straight.to_svg_with_prefix("area-straight-2")));

    HtmlSection {
        title: "Area",
        description: "Series normalized against their maximum. A scheduled input lands after 200 ms and eases in from the shown shape.",
        body,
    }
}

fn bar_demo(frames: &FrameLoop) -> HtmlSection {
    let mut body = String::new();
    let warm = BarConfig::default().with_foreground_color(("#F5222D", "#FFA39E"));
    let mut bars: Vec<BarChart> = [BarConfig::default(), BarConfig::default(), warm]
        .into_iter()
        .map(|config| BarChart::new(frames, config, 0.0).expect("valid bar config"))
        .collect();
    for (bar, value) in bars.iter_mut().zip([0.05, 0.4, 1.0]) {
        bar.set_value(value);
    }
    advance(frames, Duration::from_millis(175));
    for (i, bar) in bars.iter().enumerate() {
        body.push_str(&figure(
            &format!("{:.2} mid-way", bar.value()),
            &bar.to_svg_with_prefix(&format!("bar-mid-{i}")),
        ));
    }
    advance(frames, Duration::from_millis(175));
    for (i, bar) in bars.iter().enumerate() {
        body.push_str(&figure(
            &format!("{:.2}", bar.value()),
            &bar.to_svg_with_prefix(&format!("bar-end-{i}")),
        ));
    }

    HtmlSection {
        title: "Bar",
        description: "Bars shorter than their width draw as a lens; taller ones as a capsule with rounded ends.",
        body,
    }
}

fn pointer_demo(frames: &FrameLoop) -> HtmlSection {
    let mut pointer = Pointer::new(frames, PointerConfig::default(), 135.0).expect("default pointer");
    let mut body = String::new();
    let mut elapsed = Duration::ZERO;
    for step in [0, 200, 400, 600, 1200] {
        let step = Duration::from_millis(step);
        advance(frames, step);
        elapsed += step;
        body.push_str(&figure(
            &format!("{} ({:.1}°)", caption(elapsed), pointer.angle()),
            &pointer.to_svg(),
        ));
    }
    pointer.stop();

    HtmlSection {
        title: "Pointer",
        description: "A spring with tension 3 and friction 4 swings the pointer past its target before it settles.",
        body,
    }
}

fn counter_demo(frames: &FrameLoop) -> HtmlSection {
    let ended = Rc::new(Cell::new(false));
    let format = CounterFormat::default()
        .with_prefix("$")
        .with_separator(",")
        .with_decimals(2);
    let mut counter = Counter::new(frames, format.clone(), 1_234_567.89).with_on_end({
        let ended = Rc::clone(&ended);
        move || ended.set(true)
    });
    let mut plain = Counter::new(frames, format.with_highlight(false).with_suffix(" pts"), 0.0);
    plain.set_value(-42.5);

    let mut body = String::new();
    let mut elapsed = Duration::ZERO;
    for step in [0, 30, 70, 250] {
        let step = Duration::from_millis(step);
        advance(frames, step);
        elapsed += step;
        for c in [&counter, &plain] {
            body.push_str(&figure(&caption(elapsed), &counter_markup(c)));
        }
    }
    counter.stop();
    debug_assert!(ended.get(), "the count reached its target");

    HtmlSection {
        title: "Counter",
        description: "Numbers count toward their target with an exponential ease-out, formatted with a prefix and thousands separators.",
        body,
    }
}

fn counter_markup(counter: &Counter) -> String {
    format!(
        "<div style=\"font: 600 1.5rem monospace; color: {}\">{}</div>\n",
        css_hex(counter.color()),
        html::escape_xml(&counter.text())
    )
}

fn css_hex(color: Color) -> String {
    let rgba = color.to_rgba8();
    format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b)
}
