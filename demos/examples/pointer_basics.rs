// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer dispatch basics.
//!
//! Drive a tiny scene (a panel holding a button and a slider) with scripted
//! mouse and touch input, printing every event the engine delivers.
//!
//! Run:
//! - `cargo run -p understory_demos --example pointer_basics`
//! - `RUST_LOG=understory_pointer=debug cargo run -p understory_demos --example pointer_basics`

use kurbo::{Point, Rect};
use smallvec::smallvec;
use tracing::info;
use tracing_subscriber::EnvFilter;
use understory_pointer::{
    ButtonChannel, Capabilities, DeviceId, DispatchConfig, Dispatcher, EventKind, EventSink,
    HandlerContext, InputSample, PointerId, PointerKind, TargetChain, TouchPhase, UiEvent,
};

const PANEL: u32 = 1;
const BUTTON: u32 = 2;
const SLIDER: u32 = 3;

fn name(id: u32) -> &'static str {
    match id {
        PANEL => "panel",
        BUTTON => "button",
        SLIDER => "slider",
        _ => "?",
    }
}

/// Panel at (0,0)-(300,100); button on the left, slider on the right.
fn raycast(point: Point, _viewport: Option<Rect>) -> Option<TargetChain<u32>> {
    let button = Rect::new(10.0, 10.0, 110.0, 90.0);
    let slider = Rect::new(150.0, 40.0, 290.0, 60.0);
    let panel = Rect::new(0.0, 0.0, 300.0, 100.0);
    if button.contains(point) {
        Some(smallvec![BUTTON, PANEL])
    } else if slider.contains(point) {
        Some(smallvec![SLIDER, PANEL])
    } else if panel.contains(point) {
        Some(smallvec![PANEL])
    } else {
        None
    }
}

struct Widgets;

impl EventSink<u32> for Widgets {
    fn capabilities(&self, target: u32) -> Option<Capabilities> {
        Some(match target {
            PANEL => Capabilities::HOVER | Capabilities::SCROLL,
            BUTTON => {
                Capabilities::HOVER
                    | Capabilities::POINTER_DOWN
                    | Capabilities::POINTER_UP
                    | Capabilities::POINTER_CLICK
                    | Capabilities::SELECTABLE
            }
            SLIDER => Capabilities::HOVER | Capabilities::POINTER_DOWN | Capabilities::DRAGGABLE,
            _ => return None,
        })
    }

    fn handle(&mut self, event: &UiEvent<u32>, cx: &mut HandlerContext<u32>) {
        let target = name(event.target);
        match event.pointer() {
            Some(p) => println!(
                "  {:?} -> {target} at ({:.0}, {:.0}) clicks={} delta=({:.0}, {:.0})",
                event.kind, p.position.x, p.position.y, p.click_count, p.delta.x, p.delta.y
            ),
            None => println!("  {:?} -> {target}", event.kind),
        }
        match event.kind {
            // Sliders follow the pointer immediately.
            EventKind::InitializePotentialDrag if event.target == SLIDER => {
                cx.set_use_drag_threshold(false);
            }
            EventKind::PointerClick if event.target == BUTTON => cx.select(BUTTON),
            _ => {}
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mouse = PointerId::for_device(DeviceId(0));
    let finger = PointerId::for_touch(DeviceId(1), 0);
    let mut dispatcher = Dispatcher::new(DispatchConfig::default());
    let mut widgets = Widgets;

    let ticks: Vec<(&str, Vec<InputSample>)> = vec![
        (
            "mouse enters the button",
            vec![InputSample::Point {
                source: mouse,
                kind: PointerKind::MouseOrPen,
                position: Point::new(50.0, 50.0),
            }],
        ),
        (
            "double click",
            vec![
                InputSample::Button {
                    source: mouse,
                    channel: ButtonChannel::Left,
                    pressed: true,
                },
                InputSample::Button {
                    source: mouse,
                    channel: ButtonChannel::Left,
                    pressed: false,
                },
                InputSample::Button {
                    source: mouse,
                    channel: ButtonChannel::Left,
                    pressed: true,
                },
                InputSample::Button {
                    source: mouse,
                    channel: ButtonChannel::Left,
                    pressed: false,
                },
            ],
        ),
        (
            "scroll over the panel",
            vec![InputSample::Scroll {
                source: mouse,
                delta: kurbo::Vec2::new(0.0, -40.0),
            }],
        ),
        (
            "a finger grabs the slider (the mouse pointer retires)",
            vec![InputSample::Touch {
                source: finger,
                phase: TouchPhase::Began,
                position: Point::new(160.0, 50.0),
            }],
        ),
        (
            "slide",
            vec![InputSample::Touch {
                source: finger,
                phase: TouchPhase::Moved,
                position: Point::new(164.0, 52.0),
            }],
        ),
        (
            "lift",
            vec![InputSample::Touch {
                source: finger,
                phase: TouchPhase::Ended,
                position: Point::new(164.0, 52.0),
            }],
        ),
    ];

    for (ix, (label, samples)) in ticks.into_iter().enumerate() {
        info!(tick = ix, "{label}");
        println!("tick {ix}: {label}");
        for sample in samples {
            dispatcher.push_sample(sample);
        }
        dispatcher.process_tick(ix as f64 * 0.1, &raycast, &(), &mut widgets);
    }

    println!(
        "selected: {:?}, live pointers: {}",
        dispatcher.current_selected().map(name),
        dispatcher.pointer_count()
    );
}
