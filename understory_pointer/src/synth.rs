// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-tick event synthesizer.
//!
//! For one pointer in one tick, events are produced in this order, each step only
//! when its transition happened:
//!
//! `Exit* → Enter* → Down → InitializePotentialDrag → Up → EndDrag → Drop → Click →
//! BeginDrag → Drag → Scroll`
//!
//! Handlers run synchronously. Requests they make through the
//! [`HandlerContext`] are applied before the next step, so a drag-threshold
//! override made during `InitializePotentialDrag` affects the same tick's drag
//! start, and a selection change made during `Click` is visible to later events.

use core::fmt::Debug;

use kurbo::{Rect, Vec2};
use tracing::{trace, warn};
use understory_event_state::hover::HoverEvent;

use crate::config::DispatchConfig;
use crate::event::{EventData, EventKind, UiEvent};
use crate::handler::{EventSink, HandlerContext, SelectionRequest};
use crate::navigation::SelectionState;
use crate::pointer::{Edge, PointerState, Removal};
use crate::raycast::{Raycaster, resolve_chain};
use crate::types::{ButtonChannel, TargetChain};

/// Everything a delivery needs besides the pointer itself.
pub(crate) struct Scope<'a, K, S: ?Sized> {
    pub(crate) config: &'a DispatchConfig,
    pub(crate) selection: &'a mut SelectionState<K>,
    pub(crate) sink: &'a mut S,
    pub(crate) viewport: Option<Rect>,
    pub(crate) now: f64,
}

/// What a handler asked for while handling an event.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct Delivered {
    pub(crate) use_drag_threshold: Option<bool>,
}

impl<K, S> Scope<'_, K, S>
where
    K: Copy + Eq + Debug,
    S: EventSink<K> + ?Sized,
{
    fn can_handle(&self, target: K, kind: EventKind) -> bool {
        match self.sink.capabilities(target) {
            Some(caps) => caps.contains(kind.capability()),
            None => {
                trace!(?target, ?kind, "skipping stale target");
                false
            }
        }
    }

    /// Deliver to exactly `target`, if it handles `kind`.
    pub(crate) fn deliver(
        &mut self,
        kind: EventKind,
        target: K,
        data: impl FnOnce() -> EventData<K>,
    ) -> Option<Delivered> {
        if !self.can_handle(target, kind) {
            return None;
        }
        let event = UiEvent {
            kind,
            target,
            data: data(),
        };
        let mut cx = HandlerContext::new(self.selection.current);
        self.sink.handle(&event, &mut cx);
        if let Some(request) = cx.take_selection() {
            let new = match request {
                SelectionRequest::Select(target) => Some(target),
                SelectionRequest::Clear => None,
            };
            self.change_selection(new);
        }
        Some(Delivered {
            use_drag_threshold: cx.drag_threshold_override(),
        })
    }

    /// First target in `chain` (leaf→root) that handles `kind`.
    pub(crate) fn find_handler(&self, chain: &[K], kind: EventKind) -> Option<K> {
        chain.iter().copied().find(|&k| self.can_handle(k, kind))
    }

    /// Deliver to the first handler in `chain`, returning it.
    pub(crate) fn deliver_bubbling(
        &mut self,
        chain: &[K],
        kind: EventKind,
        data: impl FnOnce() -> EventData<K>,
    ) -> Option<K> {
        let target = self.find_handler(chain, kind)?;
        self.deliver(kind, target, data).map(|_| target)
    }

    /// Move the selection, notifying the old and new targets.
    ///
    /// Requests made while a change is already being delivered are dropped.
    pub(crate) fn change_selection(&mut self, new: Option<K>) {
        if self.selection.changing {
            warn!(?new, "ignoring selection request made during a selection change");
            return;
        }
        let old = self.selection.current;
        if old == new {
            return;
        }
        self.selection.changing = true;
        if let Some(old) = old {
            self.deliver(EventKind::Deselect, old, || EventData::Base);
        }
        self.selection.current = new;
        if let Some(new) = new {
            self.deliver(EventKind::Select, new, || EventData::Base);
        }
        self.selection.changing = false;
    }
}

/// Run one tick for one pointer.
pub(crate) fn process_pointer<K, S, R>(
    scope: &mut Scope<'_, K, S>,
    pointer: &mut PointerState<K>,
    raycaster: &R,
) where
    K: Copy + Eq + Debug,
    S: EventSink<K> + ?Sized,
    R: Raycaster<K> + ?Sized,
{
    if pointer.removal == Some(Removal::Cancel) {
        retire(scope, pointer);
        return;
    }

    let raycast: TargetChain<K> = if pointer.ray_hit {
        resolve_chain(raycaster, pointer.position, scope.viewport)
    } else {
        TargetChain::new()
    };
    pointer.current_raycast = raycast.first().copied();

    // A lifting contact stops hovering before its release is delivered. One that
    // also touched down this tick hovers first, so its press still follows Enter.
    let lifting = pointer.removal.is_some();
    let tapping = lifting
        && pointer
            .buttons
            .iter()
            .any(|b| b.edges.iter().any(|e| matches!(e, Edge::Press(_))));
    let hover: &[K] = if lifting { &[] } else { raycast.as_slice() };
    update_hover(scope, pointer, if tapping { raycast.as_slice() } else { hover });

    for channel in ButtonChannel::ALL {
        let edges = core::mem::take(&mut pointer.button_mut(channel).edges);
        for edge in edges {
            match edge {
                Edge::Press(at) => press(scope, pointer, channel, at, &raycast, raycaster),
                Edge::Release => {
                    if lifting {
                        update_hover(scope, pointer, &[]);
                    }
                    release(scope, pointer, channel, &raycast, hover, false);
                }
            }
        }
    }

    if !lifting {
        for channel in ButtonChannel::ALL {
            progress_drag(scope, pointer, channel);
        }
        scroll(scope, pointer, hover);
    } else {
        pointer.scroll_accumulator = Vec2::ZERO;
        retire(scope, pointer);
    }

    pointer.previous_position = pointer.position;
}

/// Force a pointer out of every interaction: exits, then up and end-drag per pressed channel.
pub(crate) fn retire<K, S>(scope: &mut Scope<'_, K, S>, pointer: &mut PointerState<K>)
where
    K: Copy + Eq + Debug,
    S: EventSink<K> + ?Sized,
{
    update_hover(scope, pointer, &[]);
    release_all(scope, pointer);
}

/// Release every pressed channel without clicking or dropping.
pub(crate) fn release_all<K, S>(scope: &mut Scope<'_, K, S>, pointer: &mut PointerState<K>)
where
    K: Copy + Eq + Debug,
    S: EventSink<K> + ?Sized,
{
    for channel in ButtonChannel::ALL {
        pointer.button_mut(channel).edges.clear();
        release(scope, pointer, channel, &[], &[], true);
    }
}

fn update_hover<K, S>(scope: &mut Scope<'_, K, S>, pointer: &mut PointerState<K>, chain: &[K])
where
    K: Copy + Eq + Debug,
    S: EventSink<K> + ?Sized,
{
    let leaf = chain.first().copied();
    for event in pointer.hover.plan(chain) {
        let kind = match event {
            HoverEvent::Exit(_) => EventKind::PointerExit,
            HoverEvent::Enter(_) => {
                pointer.enter_target = leaf;
                EventKind::PointerEnter
            }
        };
        scope.deliver(kind, event.node(), || {
            EventData::Pointer(pointer.snapshot(ButtonChannel::Left))
        });
        pointer.hover.apply(event);
    }
    pointer.enter_target = leaf;
    pointer.hover.settle(chain);
}

fn press<K, S, R>(
    scope: &mut Scope<'_, K, S>,
    pointer: &mut PointerState<K>,
    channel: ButtonChannel,
    at: kurbo::Point,
    raycast: &[K],
    raycaster: &R,
) where
    K: Copy + Eq + Debug,
    S: EventSink<K> + ?Sized,
    R: Raycaster<K> + ?Sized,
{
    // The press resolves against where the pointer was when the button went down.
    let chain: TargetChain<K> = if at == pointer.position {
        TargetChain::from_slice(raycast)
    } else if pointer.ray_hit {
        resolve_chain(raycaster, at, scope.viewport)
    } else {
        TargetChain::new()
    };
    let raw = chain.first().copied();

    let inside_viewport = scope.viewport.is_none_or(|v| v.contains(at));
    if raw.is_none() && inside_viewport && scope.config.deselect_on_background_click {
        scope.change_selection(None);
    }

    pointer.button_mut(channel).prepare_press(at, raw);

    let press_target = scope
        .deliver_bubbling(&chain, EventKind::PointerDown, || {
            EventData::Pointer(pointer.button_snapshot(channel))
        })
        .or_else(|| scope.find_handler(&chain, EventKind::PointerClick));

    let settings = scope.config.click_settings();
    let button = pointer.button_mut(channel);
    button.accept_press(press_target, raw);
    let detection = button.click.detect(scope.now, at, &settings);
    button.apply_click(&detection);

    let Some(drag_target) = scope.find_handler(&chain, EventKind::Drag) else {
        return;
    };
    pointer.button_mut(channel).arm_drag(drag_target);
    let delivered = scope.deliver(EventKind::InitializePotentialDrag, drag_target, || {
        EventData::Pointer(pointer.button_snapshot(channel))
    });
    if let Some(use_threshold) = delivered.and_then(|d| d.use_drag_threshold) {
        pointer.button_mut(channel).use_drag_threshold = use_threshold;
    }
}

fn release<K, S>(
    scope: &mut Scope<'_, K, S>,
    pointer: &mut PointerState<K>,
    channel: ButtonChannel,
    raycast: &[K],
    hover: &[K],
    cancel: bool,
) where
    K: Copy + Eq + Debug,
    S: EventSink<K> + ?Sized,
{
    let button = pointer.button(channel);
    if !button.is_pressed {
        return;
    }
    let press_target = button.press_target;

    match press_target {
        Some(target) => {
            scope.deliver(EventKind::PointerUp, target, || {
                EventData::Pointer(pointer.button_snapshot(channel))
            });
        }
        None => {
            scope.deliver_bubbling(hover, EventKind::PointerUp, || {
                EventData::Pointer(pointer.button_snapshot(channel))
            });
        }
    }

    let button = pointer.button(channel);
    if button.dragging {
        if let Some(drag_target) = button.drag_target {
            // The press is already over from the drag target's point of view.
            scope.deliver(EventKind::EndDrag, drag_target, || {
                let mut data = pointer.snapshot(channel);
                data.last_press_target = data.press_target.take();
                data.raw_press_target = None;
                EventData::Pointer(data)
            });
        }
        if !cancel {
            scope.deliver_bubbling(raycast, EventKind::Drop, || {
                EventData::Pointer(pointer.snapshot(channel))
            });
        }
    }

    let eligible = pointer.button(channel).eligible_for_click;
    if !cancel && eligible && press_target.is_some() {
        let over = scope.find_handler(raycast, EventKind::PointerClick);
        if let (Some(target), true) = (press_target, over == press_target) {
            scope.deliver(EventKind::PointerClick, target, || {
                EventData::Pointer(pointer.button_snapshot(channel))
            });
        }
    }

    pointer.button_mut(channel).finish_release();
}

fn progress_drag<K, S>(
    scope: &mut Scope<'_, K, S>,
    pointer: &mut PointerState<K>,
    channel: ButtonChannel,
) where
    K: Copy + Eq + Debug,
    S: EventSink<K> + ?Sized,
{
    let button = pointer.button(channel);
    let Some(drag_target) = button.drag_target else {
        return;
    };
    if !button.is_pressed || pointer.delta() == Vec2::ZERO {
        return;
    }

    if !button.dragging
        && button.drag.should_begin(
            pointer.position,
            scope.config.drag_threshold,
            button.use_drag_threshold,
        )
    {
        scope.deliver(EventKind::BeginDrag, drag_target, || {
            EventData::Pointer(pointer.snapshot(channel))
        });
        pointer.button_mut(channel).dragging = true;
    }

    let position = pointer.position;
    let button = pointer.button_mut(channel);
    button.drag.update(position);
    if button.dragging {
        scope.deliver(EventKind::Drag, drag_target, || {
            EventData::Pointer(pointer.snapshot(channel))
        });
    }
}

fn scroll<K, S>(scope: &mut Scope<'_, K, S>, pointer: &mut PointerState<K>, hover: &[K])
where
    K: Copy + Eq + Debug,
    S: EventSink<K> + ?Sized,
{
    let raw = core::mem::replace(&mut pointer.scroll_accumulator, Vec2::ZERO);
    if raw == Vec2::ZERO {
        return;
    }
    let per_line = scope.config.scroll_pixels_per_line;
    pointer.scroll_delta = if per_line > 0.0 { raw / per_line } else { raw };
    scope.deliver_bubbling(hover, EventKind::Scroll, || {
        EventData::Pointer(pointer.snapshot(ButtonChannel::Left))
    });
    pointer.scroll_delta = Vec2::ZERO;
}
