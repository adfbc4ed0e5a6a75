// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-pointer state and its transition rules.
//!
//! This is plain data owned by the registry. Only the synthesizer mutates it,
//! and handlers only ever see [`PointerEventData`] snapshots of it.

use glam::{DQuat, DVec3};
use kurbo::{Point, Vec2};
use smallvec::SmallVec;
use understory_event_state::click::{ClickDetection, ClickState};
use understory_event_state::drag::DragState;
use understory_event_state::hover::HoverState;

use crate::event::PointerEventData;
use crate::types::{ButtonChannel, PointerId, PointerKind, TargetChain};

/// A button level change recorded while consuming samples.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Edge {
    /// Pressed at the pointer position current when the sample arrived.
    Press(Point),
    Release,
}

/// Why a pointer is scheduled for destruction at the end of the tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Removal {
    /// The contact lifted: releases complete normally, including click and drop.
    Release,
    /// The device went away: interactions are cancelled.
    Cancel,
}

/// State of one button channel.
#[derive(Clone, Debug)]
pub(crate) struct ButtonState<K> {
    pub(crate) is_pressed: bool,
    pub(crate) press_position: Point,
    pub(crate) press_target: Option<K>,
    pub(crate) raw_press_target: Option<K>,
    pub(crate) press_raycast: Option<K>,
    pub(crate) last_press_target: Option<K>,
    pub(crate) click: ClickState,
    pub(crate) eligible_for_click: bool,
    pub(crate) dragging: bool,
    pub(crate) use_drag_threshold: bool,
    pub(crate) drag_target: Option<K>,
    pub(crate) drag: DragState,
    pub(crate) edges: SmallVec<[Edge; 4]>,
}

impl<K> Default for ButtonState<K> {
    fn default() -> Self {
        Self {
            is_pressed: false,
            press_position: Point::ZERO,
            press_target: None,
            raw_press_target: None,
            press_raycast: None,
            last_press_target: None,
            click: ClickState::default(),
            eligible_for_click: false,
            dragging: false,
            use_drag_threshold: true,
            drag_target: None,
            drag: DragState::default(),
            edges: SmallVec::new(),
        }
    }
}

impl<K: Copy + Eq> ButtonState<K> {
    /// Record a level change, ignoring samples that repeat the current level.
    pub(crate) fn record(&mut self, pressed: bool, at: Point) {
        let level = match self.edges.last() {
            Some(Edge::Press(_)) => true,
            Some(Edge::Release) => false,
            None => self.is_pressed,
        };
        if pressed != level {
            self.edges.push(if pressed {
                Edge::Press(at)
            } else {
                Edge::Release
            });
        }
    }

    /// Start a press. Targets are assigned after the down event has been delivered.
    pub(crate) fn prepare_press(&mut self, position: Point, raycast: Option<K>) {
        self.is_pressed = true;
        self.press_position = position;
        self.press_raycast = raycast;
        self.eligible_for_click = true;
        self.use_drag_threshold = true;
        self.dragging = false;
        self.drag_target = None;
    }

    /// Assign the targets resolved by the down event.
    ///
    /// A new press target always forgets the previous one.
    pub(crate) fn accept_press(&mut self, press_target: Option<K>, raw: Option<K>) {
        self.last_press_target = None;
        self.press_target = press_target;
        self.raw_press_target = raw;
    }

    pub(crate) fn apply_click(&mut self, detection: &ClickDetection) {
        self.click.apply(detection, self.press_position);
        self.eligible_for_click = detection.eligible_for_click;
        self.use_drag_threshold = detection.use_drag_threshold;
    }

    pub(crate) fn arm_drag(&mut self, target: K) {
        self.drag_target = Some(target);
        self.drag.track(self.press_position);
    }

    /// Clear press and drag state after a release has been fully delivered.
    pub(crate) fn finish_release(&mut self) {
        self.is_pressed = false;
        self.last_press_target = self.press_target.take();
        self.raw_press_target = None;
        self.eligible_for_click = false;
        self.dragging = false;
        self.drag_target = None;
        self.drag.end();
    }
}

/// State of one logical pointer.
#[derive(Clone, Debug)]
pub(crate) struct PointerState<K: Copy + Eq> {
    pub(crate) id: PointerId,
    pub(crate) source: PointerId,
    pub(crate) kind: PointerKind,
    pub(crate) position: Point,
    pub(crate) previous_position: Point,
    pub(crate) scroll_accumulator: Vec2,
    pub(crate) scroll_delta: Vec2,
    pub(crate) enter_target: Option<K>,
    pub(crate) hover: HoverState<K>,
    pub(crate) current_raycast: Option<K>,
    pub(crate) buttons: [ButtonState<K>; 3],
    pub(crate) world_position: DVec3,
    pub(crate) orientation: DQuat,
    pub(crate) ray_hit: bool,
    pub(crate) removal: Option<Removal>,
}

impl<K: Copy + Eq> PointerState<K> {
    pub(crate) fn new(id: PointerId, kind: PointerKind) -> Self {
        Self {
            id,
            source: id,
            kind,
            position: Point::ZERO,
            previous_position: Point::ZERO,
            scroll_accumulator: Vec2::ZERO,
            scroll_delta: Vec2::ZERO,
            enter_target: None,
            hover: HoverState::new(),
            current_raycast: None,
            buttons: [
                ButtonState::default(),
                ButtonState::default(),
                ButtonState::default(),
            ],
            world_position: DVec3::ZERO,
            orientation: DQuat::IDENTITY,
            ray_hit: true,
            removal: None,
        }
    }

    pub(crate) fn delta(&self) -> Vec2 {
        self.position - self.previous_position
    }

    pub(crate) fn button(&self, channel: ButtonChannel) -> &ButtonState<K> {
        &self.buttons[channel.index()]
    }

    pub(crate) fn button_mut(&mut self, channel: ButtonChannel) -> &mut ButtonState<K> {
        &mut self.buttons[channel.index()]
    }

    pub(crate) fn any_pressed(&self) -> bool {
        self.buttons.iter().any(|b| b.is_pressed)
    }

    /// Snapshot the pointer as seen through `channel`.
    pub(crate) fn snapshot(&self, channel: ButtonChannel) -> PointerEventData<K> {
        let button = self.button(channel);
        PointerEventData {
            pointer_id: self.id,
            source: self.source,
            kind: self.kind,
            button: channel,
            position: self.position,
            delta: self.delta(),
            press_position: button.press_position,
            click_time: button.click.click_time,
            click_count: button.click.click_count,
            eligible_for_click: button.eligible_for_click,
            dragging: button.dragging,
            use_drag_threshold: button.use_drag_threshold,
            enter_target: self.enter_target,
            hovered: TargetChain::from_slice(self.hover.hovered()),
            press_target: button.press_target,
            raw_press_target: button.raw_press_target,
            last_press_target: button.last_press_target,
            drag_target: button.drag_target,
            current_raycast: self.current_raycast,
            press_raycast: button.press_raycast,
            scroll_delta: self.scroll_delta,
            tracked_position: self.world_position,
            tracked_orientation: self.orientation,
        }
    }

    /// Snapshot for press, release and click events, which report no motion.
    pub(crate) fn button_snapshot(&self, channel: ButtonChannel) -> PointerEventData<K> {
        let mut data = self.snapshot(channel);
        data.delta = Vec2::ZERO;
        data
    }
}
