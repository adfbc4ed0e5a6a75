// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gamepad navigation basics.
//!
//! A 2×2 grid of tiles is driven two ways: the left stick moves the selection
//! with repeat pacing, and a virtual cursor steered by the right stick acts as a
//! mouse.
//!
//! Run:
//! - `cargo run -p understory_demos --example gamepad_navigation`

use kurbo::{Point, Rect, Vec2};
use smallvec::smallvec;
use tracing_subscriber::EnvFilter;
use understory_pointer::{
    ButtonChannel, Capabilities, DeviceId, DispatchConfig, Dispatcher, EventKind, EventSink,
    HandlerContext, InputSample, MoveDirection, NavigationGeometry, PointerId, RootId,
    TargetChain, UiEvent, VirtualCursor,
};

const TILE: f64 = 100.0;

/// Tiles are numbered 0..4, row-major.
fn tile_at(point: Point) -> Option<u32> {
    if !(0.0..2.0 * TILE).contains(&point.x) || !(0.0..2.0 * TILE).contains(&point.y) {
        return None;
    }
    Some((point.y / TILE) as u32 * 2 + (point.x / TILE) as u32)
}

fn raycast(point: Point, _viewport: Option<Rect>) -> Option<TargetChain<u32>> {
    tile_at(point).map(|tile| smallvec![tile])
}

struct Grid;

impl NavigationGeometry<u32> for Grid {
    fn find_next_selectable(&self, current: u32, direction: MoveDirection) -> Option<u32> {
        let (col, row) = (current % 2, current / 2);
        let (col, row) = match direction {
            MoveDirection::Left => (col.checked_sub(1)?, row),
            MoveDirection::Right => (col + 1, row),
            MoveDirection::Up => (col, row.checked_sub(1)?),
            MoveDirection::Down => (col, row + 1),
        };
        (col < 2 && row < 2).then_some(row * 2 + col)
    }
}

struct Tiles;

impl EventSink<u32> for Tiles {
    fn capabilities(&self, _target: u32) -> Option<Capabilities> {
        Some(Capabilities::all())
    }

    fn handle(&mut self, event: &UiEvent<u32>, cx: &mut HandlerContext<u32>) {
        match event.axis() {
            Some(axis) => println!("  {:?} tile {} {:?}", event.kind, event.target, axis.move_dir),
            None => println!("  {:?} tile {}", event.kind, event.target),
        }
        if event.kind == EventKind::PointerClick {
            cx.select(event.target);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut dispatcher = Dispatcher::new(DispatchConfig::default());
    let mut tiles = Tiles;
    dispatcher.set_first_selected(Some(0));

    println!("holding the left stick right, then down:");
    let mut now = 0.0;
    for step in 0..12 {
        let axis = if step < 8 {
            Vec2::new(1.0, 0.0)
        } else {
            Vec2::new(0.0, -1.0)
        };
        dispatcher.push_sample(InputSample::Navigate {
            root: RootId(0),
            axis,
        });
        dispatcher.process_tick(now, &raycast, &Grid, &mut tiles);
        now += 0.1;
    }
    dispatcher.push_sample(InputSample::Submit {
        root: RootId(0),
        pressed: true,
    });
    dispatcher.push_sample(InputSample::Navigate {
        root: RootId(0),
        axis: Vec2::ZERO,
    });
    dispatcher.process_tick(now, &raycast, &Grid, &mut tiles);

    println!("steering the virtual cursor to tile 0 and clicking:");
    let mut cursor = VirtualCursor::new(
        PointerId::for_device(DeviceId(42)),
        Point::new(150.0, 150.0),
        Rect::new(0.0, 0.0, 200.0, 200.0),
    );
    cursor.cursor_speed = 400.0;
    for _ in 0..4 {
        now += 0.1;
        dispatcher.push_sample(cursor.step(now, Vec2::new(-1.0, 1.0)));
        dispatcher.process_tick(now, &raycast, &Grid, &mut tiles);
    }
    for pressed in [true, false] {
        if let Some(sample) = cursor.button(ButtonChannel::Left, pressed) {
            dispatcher.push_sample(sample);
        }
    }
    now += 0.1;
    dispatcher.process_tick(now, &raycast, &Grid, &mut tiles);

    println!(
        "cursor at {:?}, selected tile {:?}",
        cursor.position(),
        dispatcher.current_selected()
    );
}
