// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Selection state and non-pointer navigation.
//!
//! Each UI root has one selected target. Navigation input moves it in discrete
//! directions, with repeat pacing for held input; submit and cancel go straight to
//! it. Pointer handlers can also move it through their
//! [`HandlerContext`](crate::handler::HandlerContext).

use core::fmt::Debug;

use kurbo::Vec2;
use tracing::trace;
use understory_event_state::navigate::{MoveDirection, MoveRepeat, classify};

use crate::event::{AxisEventData, EventData, EventKind};
use crate::handler::EventSink;
use crate::synth::Scope;

/// Spatial lookup used to pick the next selection target.
pub trait NavigationGeometry<K> {
    /// The target to select when moving from `current` in `direction`, if any.
    fn find_next_selectable(&self, current: K, direction: MoveDirection) -> Option<K>;
}

/// No geometry: navigation only produces move events.
impl<K> NavigationGeometry<K> for () {
    fn find_next_selectable(&self, _: K, _: MoveDirection) -> Option<K> {
        None
    }
}

/// Selection bookkeeping for one UI root.
#[derive(Clone, Debug)]
pub struct SelectionState<K> {
    pub(crate) current: Option<K>,
    pub(crate) repeat: MoveRepeat,
    pub(crate) changing: bool,
}

impl<K> Default for SelectionState<K> {
    fn default() -> Self {
        Self {
            current: None,
            repeat: MoveRepeat::default(),
            changing: false,
        }
    }
}

impl<K: Copy> SelectionState<K> {
    /// The selected target.
    pub fn current_selected(&self) -> Option<K> {
        self.current
    }

    /// Direction of the last move event, while navigation input is held.
    pub fn last_move_direction(&self) -> Option<MoveDirection> {
        self.repeat.last_direction
    }
}

/// Navigation input levels collected from samples.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct NavigationInput {
    pub(crate) axis: Vec2,
    submit_held: bool,
    submit_pressed: bool,
    cancel_held: bool,
    cancel_pressed: bool,
}

impl NavigationInput {
    pub(crate) fn submit(&mut self, pressed: bool) {
        self.submit_pressed |= pressed && !self.submit_held;
        self.submit_held = pressed;
    }

    pub(crate) fn cancel(&mut self, pressed: bool) {
        self.cancel_pressed |= pressed && !self.cancel_held;
        self.cancel_held = pressed;
    }
}

/// Run navigation for one tick: move, then submit, then cancel.
pub(crate) fn process_navigation<K, S, G>(
    scope: &mut Scope<'_, K, S>,
    input: &mut NavigationInput,
    geometry: &G,
) where
    K: Copy + Eq + Debug,
    S: EventSink<K> + ?Sized,
    G: NavigationGeometry<K> + ?Sized,
{
    let config = scope.config;
    let direction = if config.send_navigation_events {
        classify(input.axis, config.navigation_deadzone, config.diagonal_bias)
    } else {
        None
    };
    let settings = config.repeat_settings();
    if scope.selection.repeat.update(direction, scope.now, &settings) {
        if let Some(direction) = direction {
            navigate(scope, direction, input.axis, geometry);
        }
    }

    if core::mem::take(&mut input.submit_pressed) {
        if let Some(selected) = scope.selection.current {
            scope.deliver(EventKind::Submit, selected, || EventData::Base);
        }
    }
    if core::mem::take(&mut input.cancel_pressed) {
        if let Some(selected) = scope.selection.current {
            scope.deliver(EventKind::Cancel, selected, || EventData::Base);
        }
    }
}

fn navigate<K, S, G>(scope: &mut Scope<'_, K, S>, direction: MoveDirection, axis: Vec2, geometry: &G)
where
    K: Copy + Eq + Debug,
    S: EventSink<K> + ?Sized,
    G: NavigationGeometry<K> + ?Sized,
{
    let Some(current) = scope.selection.current else {
        trace!(?direction, "navigation with nothing selected");
        return;
    };
    let data = AxisEventData {
        move_dir: direction,
        move_vector: axis / axis.hypot(),
    };
    scope.deliver(EventKind::Move, current, || EventData::Axis(data));

    // A move handler that picked its own successor wins over geometry.
    if scope.selection.current != Some(current) {
        return;
    }
    if let Some(next) = geometry.find_next_selectable(current, direction) {
        scope.change_selection(Some(next));
    }
}
