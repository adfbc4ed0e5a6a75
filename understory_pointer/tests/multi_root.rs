// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Independent UI roots sharing one input stream.

use kurbo::{Rect, Vec2};
use understory_pointer::{
    DispatchConfig, EventKind, InputSample, MultiRootRouter, RootId, RouterError,
};

mod common;

use common::{LEFT, PARENT, RIGHT, Recorder, Scene, SplitGeometry, mouse, point};

const WEST: RootId = RootId(1);
const EAST: RootId = RootId(2);

fn split_router() -> MultiRootRouter<u32> {
    let mut router = MultiRootRouter::new();
    router
        .add_root(
            WEST,
            Some(Rect::new(0.0, 0.0, 100.0, 100.0)),
            DispatchConfig::default(),
        )
        .unwrap();
    router
        .add_root(
            EAST,
            Some(Rect::new(100.0, 0.0, 200.0, 100.0)),
            DispatchConfig::default(),
        )
        .unwrap();
    router
}

#[test]
fn viewports_partition_pointer_targets() {
    let scene = Scene::split();
    let mut sink = Recorder::new();
    let mut router = split_router();

    router.push_sample(point(mouse(), 50.0, 50.0));
    router.process_tick(0.0, &scene, &SplitGeometry, &mut sink);
    assert_eq!(
        sink.take(),
        [(EventKind::PointerEnter, LEFT), (EventKind::PointerEnter, PARENT)]
    );
    assert!(router.root(WEST).unwrap().is_pointer_over(mouse()));
    assert!(!router.root(EAST).unwrap().is_pointer_over(mouse()));

    router.push_sample(point(mouse(), 150.0, 50.0));
    router.process_tick(0.1, &scene, &SplitGeometry, &mut sink);
    assert_eq!(
        sink.take(),
        [
            (EventKind::PointerExit, LEFT),
            (EventKind::PointerExit, PARENT),
            (EventKind::PointerEnter, RIGHT),
            (EventKind::PointerEnter, PARENT),
        ],
        "roots process in registration order"
    );
}

#[test]
fn each_root_has_its_own_selection() {
    let scene = Scene::split();
    let mut sink = Recorder::new();
    let mut router = split_router();

    router
        .root_mut(WEST)
        .unwrap()
        .set_selected(Some(LEFT), &mut sink);
    router
        .root_mut(EAST)
        .unwrap()
        .set_selected(Some(RIGHT), &mut sink);
    sink.events.clear();

    router.push_sample(InputSample::Navigate {
        root: EAST,
        axis: Vec2::new(-1.0, 0.0),
    });
    router.process_tick(0.0, &scene, &SplitGeometry, &mut sink);
    assert_eq!(
        sink.take(),
        [
            (EventKind::Move, RIGHT),
            (EventKind::Deselect, RIGHT),
            (EventKind::Select, LEFT),
        ]
    );
    assert_eq!(router.root(WEST).unwrap().current_selected(), Some(LEFT));
    assert_eq!(router.root(EAST).unwrap().current_selected(), Some(LEFT));
}

#[test]
fn background_press_only_deselects_the_root_it_lands_in() {
    let scene = Scene::split();
    let mut sink = Recorder::new();
    let mut router = MultiRootRouter::new();
    router
        .add_root(
            WEST,
            Some(Rect::new(0.0, 0.0, 100.0, 200.0)),
            DispatchConfig::default(),
        )
        .unwrap();
    router
        .add_root(
            EAST,
            Some(Rect::new(100.0, 0.0, 200.0, 200.0)),
            DispatchConfig::default(),
        )
        .unwrap();
    router
        .root_mut(WEST)
        .unwrap()
        .set_selected(Some(LEFT), &mut sink);
    router
        .root_mut(EAST)
        .unwrap()
        .set_selected(Some(RIGHT), &mut sink);
    sink.events.clear();

    // Below the scene but inside the west viewport.
    router.push_sample(point(mouse(), 50.0, 150.0));
    router.push_sample(common::left(mouse(), true));
    router.process_tick(0.0, &scene, &SplitGeometry, &mut sink);
    assert_eq!(sink.take(), [(EventKind::Deselect, LEFT)]);
    assert_eq!(router.root(EAST).unwrap().current_selected(), Some(RIGHT));
}

#[test]
fn roots_are_unique() {
    let mut router = split_router();
    assert_eq!(
        router.add_root(WEST, None, DispatchConfig::default()),
        Err(RouterError::DuplicateRoot(WEST))
    );
    assert_eq!(router.roots().count(), 2);
}

#[test]
fn removing_a_root_cleans_up_its_pointers() {
    let scene = Scene::split();
    let mut sink = Recorder::new();
    let mut router = split_router();

    router.push_sample(point(mouse(), 50.0, 50.0));
    router.process_tick(0.0, &scene, &SplitGeometry, &mut sink);
    sink.events.clear();

    router.remove_root(WEST, &mut sink).unwrap();
    assert_eq!(
        sink.take(),
        [(EventKind::PointerExit, LEFT), (EventKind::PointerExit, PARENT)]
    );
    assert!(router.root(WEST).is_none());
    assert_eq!(
        router.remove_root(WEST, &mut sink),
        Err(RouterError::UnknownRoot(WEST))
    );
}
