// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection, directional navigation, submit and cancel.

use kurbo::{Rect, Vec2};
use understory_pointer::{
    DispatchConfig, Dispatcher, EventKind, InputSample, MoveDirection, RootId,
};

mod common;

use common::{LEFT, PARENT, RIGHT, Recorder, Scene, SplitGeometry, left, mouse, point};

fn navigate(x: f64, y: f64) -> InputSample {
    InputSample::Navigate {
        root: RootId(0),
        axis: Vec2::new(x, y),
    }
}

fn submit(pressed: bool) -> InputSample {
    InputSample::Submit {
        root: RootId(0),
        pressed,
    }
}

fn tick(d: &mut Dispatcher<u32>, now: f64, sink: &mut Recorder) {
    d.process_tick(now, &Scene::split(), &SplitGeometry, sink);
}

fn selected_left(sink: &mut Recorder) -> Dispatcher<u32> {
    let mut d = Dispatcher::new(DispatchConfig::default());
    d.set_selected(Some(LEFT), sink);
    assert_eq!(sink.take(), [(EventKind::Select, LEFT)]);
    d
}

#[test]
fn held_direction_moves_then_repeats() {
    let mut sink = Recorder::new();
    let mut d = selected_left(&mut sink);

    d.push_sample(navigate(1.0, 0.0));
    tick(&mut d, 0.0, &mut sink);
    let axis = *sink.first(EventKind::Move).axis().unwrap();
    assert_eq!(axis.move_dir, MoveDirection::Right);
    assert_eq!(axis.move_vector, Vec2::new(1.0, 0.0));
    assert_eq!(
        sink.take(),
        [
            (EventKind::Move, LEFT),
            (EventKind::Deselect, LEFT),
            (EventKind::Select, RIGHT),
        ]
    );
    assert_eq!(d.current_selected(), Some(RIGHT));

    tick(&mut d, 0.25, &mut sink);
    assert!(sink.events.is_empty(), "still inside the repeat delay");

    tick(&mut d, 0.5, &mut sink);
    assert_eq!(sink.take(), [(EventKind::Move, RIGHT)]);

    tick(&mut d, 0.55, &mut sink);
    assert!(sink.events.is_empty(), "still inside the repeat rate");

    tick(&mut d, 0.75, &mut sink);
    assert_eq!(sink.take(), [(EventKind::Move, RIGHT)]);

    tick(&mut d, 10.0, &mut sink);
    assert_eq!(sink.take(), [(EventKind::Move, RIGHT)], "one repeat per tick");
    assert_eq!(
        d.selection().last_move_direction(),
        Some(MoveDirection::Right)
    );

    d.push_sample(navigate(0.0, 0.0));
    tick(&mut d, 10.2, &mut sink);
    assert!(sink.events.is_empty());
    assert_eq!(d.selection().last_move_direction(), None);
}

#[test]
fn changing_direction_fires_immediately() {
    let mut sink = Recorder::new();
    let mut d = selected_left(&mut sink);

    d.push_sample(navigate(0.0, 1.0));
    tick(&mut d, 0.0, &mut sink);
    d.push_sample(navigate(0.0, -1.0));
    tick(&mut d, 0.1, &mut sink);

    let dirs: Vec<_> = sink
        .events
        .iter()
        .filter_map(|e| e.axis().map(|a| a.move_dir))
        .collect();
    assert_eq!(dirs, [MoveDirection::Up, MoveDirection::Down]);
    assert_eq!(d.current_selected(), Some(LEFT), "no neighbour vertically");
}

#[test]
fn deadzone_and_diagonal_bias() {
    let mut sink = Recorder::new();
    let mut d = Dispatcher::new(DispatchConfig {
        diagonal_bias: 2.0,
        ..DispatchConfig::default()
    });
    d.set_selected(Some(RIGHT), &mut sink);
    sink.events.clear();

    d.push_sample(navigate(0.3, 0.0));
    tick(&mut d, 0.0, &mut sink);
    assert!(sink.events.is_empty(), "below the deadzone");

    d.push_sample(navigate(-0.6, 0.8));
    tick(&mut d, 0.1, &mut sink);
    let axis = *sink.first(EventKind::Move).axis().unwrap();
    assert_eq!(axis.move_dir, MoveDirection::Left);
    assert!((axis.move_vector.hypot() - 1.0).abs() < 1e-9);
    assert_eq!(d.current_selected(), Some(LEFT));
}

#[test]
fn submit_and_cancel_are_edge_triggered() {
    let mut sink = Recorder::new();
    let mut d = selected_left(&mut sink);

    d.push_sample(submit(true));
    tick(&mut d, 0.0, &mut sink);
    tick(&mut d, 0.1, &mut sink);
    assert_eq!(sink.take(), [(EventKind::Submit, LEFT)]);

    d.push_sample(submit(false));
    d.push_sample(submit(true));
    d.push_sample(InputSample::Cancel {
        root: RootId(0),
        pressed: true,
    });
    tick(&mut d, 0.2, &mut sink);
    assert_eq!(
        sink.take(),
        [(EventKind::Submit, LEFT), (EventKind::Cancel, LEFT)]
    );

    d.set_selected(None, &mut sink);
    assert_eq!(sink.take(), [(EventKind::Deselect, LEFT)]);
    d.push_sample(submit(false));
    d.push_sample(submit(true));
    tick(&mut d, 0.3, &mut sink);
    assert!(sink.events.is_empty(), "nothing selected");
}

#[test]
fn samples_for_other_roots_are_ignored() {
    let mut sink = Recorder::new();
    let mut d = selected_left(&mut sink);

    d.push_sample(InputSample::Navigate {
        root: RootId(4),
        axis: Vec2::new(1.0, 0.0),
    });
    d.push_sample(InputSample::Submit {
        root: RootId(4),
        pressed: true,
    });
    tick(&mut d, 0.0, &mut sink);
    assert!(sink.events.is_empty());
}

#[test]
fn disabled_navigation_still_selects_from_clicks() {
    let mut sink = Recorder::new().on_event(|event, cx| {
        if event.kind == EventKind::PointerClick {
            cx.select(event.target);
        }
    });
    let mut d = Dispatcher::new(DispatchConfig {
        send_navigation_events: false,
        ..DispatchConfig::default()
    });

    d.push_sample(point(mouse(), 150.0, 50.0));
    tick(&mut d, 0.0, &mut sink);
    sink.events.clear();

    d.push_sample(left(mouse(), true));
    d.push_sample(left(mouse(), false));
    tick(&mut d, 0.1, &mut sink);
    assert_eq!(
        sink.take(),
        [
            (EventKind::PointerDown, RIGHT),
            (EventKind::InitializePotentialDrag, RIGHT),
            (EventKind::PointerUp, RIGHT),
            (EventKind::PointerClick, RIGHT),
            (EventKind::Select, RIGHT),
        ]
    );

    d.push_sample(navigate(-1.0, 0.0));
    tick(&mut d, 0.2, &mut sink);
    assert!(sink.events.is_empty(), "move events are suppressed");
    assert_eq!(d.current_selected(), Some(RIGHT));
}

#[test]
fn background_press_deselects() {
    let mut sink = Recorder::new();
    let mut d = selected_left(&mut sink);

    d.push_sample(point(mouse(), 500.0, 50.0));
    d.push_sample(left(mouse(), true));
    tick(&mut d, 0.0, &mut sink);
    assert_eq!(sink.take(), [(EventKind::Deselect, LEFT)]);
    assert_eq!(d.current_selected(), None);
}

#[test]
fn background_press_can_preserve_selection() {
    let mut sink = Recorder::new();
    let mut d = Dispatcher::new(DispatchConfig {
        deselect_on_background_click: false,
        ..DispatchConfig::default()
    });
    d.set_selected(Some(LEFT), &mut sink);
    sink.events.clear();

    d.push_sample(point(mouse(), 500.0, 50.0));
    d.push_sample(left(mouse(), true));
    tick(&mut d, 0.0, &mut sink);
    assert!(sink.events.is_empty());
    assert_eq!(d.current_selected(), Some(LEFT));
}

#[test]
fn press_outside_the_viewport_is_invisible() {
    let mut sink = Recorder::new();
    let mut d =
        Dispatcher::new(DispatchConfig::default()).with_viewport(Rect::new(0.0, 0.0, 200.0, 100.0));
    d.set_selected(Some(LEFT), &mut sink);
    sink.events.clear();

    d.push_sample(point(mouse(), 50.0, 150.0));
    d.push_sample(left(mouse(), true));
    tick(&mut d, 0.0, &mut sink);
    assert!(sink.events.is_empty());
    assert_eq!(d.current_selected(), Some(LEFT));
}

#[test]
fn first_selected_applies_on_the_first_tick() {
    let mut sink = Recorder::new();
    let mut d = Dispatcher::new(DispatchConfig::default());
    d.set_first_selected(Some(PARENT));
    assert_eq!(d.current_selected(), None);

    tick(&mut d, 0.0, &mut sink);
    assert_eq!(sink.take(), [(EventKind::Select, PARENT)]);
    tick(&mut d, 0.1, &mut sink);
    assert!(sink.events.is_empty());
}

#[test]
fn move_handler_can_choose_the_next_selection() {
    let mut sink = Recorder::new().on_event(|event, cx| {
        if event.kind == EventKind::Move {
            cx.select(PARENT);
        }
    });
    let mut d = selected_left(&mut sink);

    d.push_sample(navigate(1.0, 0.0));
    tick(&mut d, 0.0, &mut sink);
    assert_eq!(
        sink.take(),
        [
            (EventKind::Move, LEFT),
            (EventKind::Deselect, LEFT),
            (EventKind::Select, PARENT),
        ]
    );
    assert_eq!(d.current_selected(), Some(PARENT));
}

#[test]
fn selection_requests_during_select_are_ignored() {
    let mut sink = Recorder::new().on_event(|event, cx| {
        if event.kind == EventKind::Select {
            cx.select(RIGHT);
        }
    });
    let mut d = Dispatcher::new(DispatchConfig::default());
    d.set_selected(Some(LEFT), &mut sink);
    assert_eq!(sink.take(), [(EventKind::Select, LEFT)]);
    assert_eq!(d.current_selected(), Some(LEFT));
}
