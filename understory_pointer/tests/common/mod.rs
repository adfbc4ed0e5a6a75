// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared scene, sink and sample helpers for dispatch integration tests.

#![allow(
    missing_docs,
    dead_code,
    reason = "Integration-test helper module; not every test binary uses every helper."
)]

use std::collections::{HashMap, HashSet};

use kurbo::{Point, Rect, Vec2};
use understory_pointer::{
    ButtonChannel, Capabilities, DeviceId, EventKind, EventSink, HandlerContext, InputSample,
    MoveDirection, NavigationGeometry, PointerId, PointerKind, Raycaster, TargetChain,
    TouchPhase, UiEvent,
};

pub(crate) const PARENT: u32 = 1;
pub(crate) const LEFT: u32 = 2;
pub(crate) const RIGHT: u32 = 3;

pub(crate) struct Node {
    pub(crate) id: u32,
    pub(crate) rect: Rect,
    pub(crate) parent: Option<u32>,
}

/// Rectangles hit-tested topmost (last) first; chains follow parent links.
pub(crate) struct Scene {
    pub(crate) nodes: Vec<Node>,
}

impl Scene {
    /// A 200×100 parent split into two 100×100 children.
    pub(crate) fn split() -> Self {
        Self {
            nodes: vec![
                Node {
                    id: PARENT,
                    rect: Rect::new(0.0, 0.0, 200.0, 100.0),
                    parent: None,
                },
                Node {
                    id: LEFT,
                    rect: Rect::new(0.0, 0.0, 100.0, 100.0),
                    parent: Some(PARENT),
                },
                Node {
                    id: RIGHT,
                    rect: Rect::new(100.0, 0.0, 200.0, 100.0),
                    parent: Some(PARENT),
                },
            ],
        }
    }

    fn parent_of(&self, id: u32) -> Option<u32> {
        self.nodes.iter().find(|n| n.id == id).and_then(|n| n.parent)
    }
}

impl Raycaster<u32> for Scene {
    fn raycast(&self, point: Point, _viewport: Option<Rect>) -> Option<TargetChain<u32>> {
        let hit = self.nodes.iter().rev().find(|n| n.rect.contains(point))?;
        let mut chain = TargetChain::new();
        let mut next = Some(hit.id);
        while let Some(id) = next {
            chain.push(id);
            next = self.parent_of(id);
        }
        Some(chain)
    }
}

/// Left and right children are horizontal neighbours.
pub(crate) struct SplitGeometry;

impl NavigationGeometry<u32> for SplitGeometry {
    fn find_next_selectable(&self, current: u32, direction: MoveDirection) -> Option<u32> {
        match (current, direction) {
            (LEFT, MoveDirection::Right) => Some(RIGHT),
            (RIGHT, MoveDirection::Left) => Some(LEFT),
            _ => None,
        }
    }
}

type Behavior = Box<dyn FnMut(&UiEvent<u32>, &mut HandlerContext<u32>)>;

/// Records every delivered event and optionally reacts to them.
pub(crate) struct Recorder {
    pub(crate) events: Vec<UiEvent<u32>>,
    pub(crate) caps: HashMap<u32, Capabilities>,
    pub(crate) default_caps: Capabilities,
    pub(crate) removed: HashSet<u32>,
    behavior: Option<Behavior>,
}

impl Default for Recorder {
    fn default() -> Self {
        Self {
            events: Vec::new(),
            caps: HashMap::new(),
            default_caps: Capabilities::all(),
            removed: HashSet::new(),
            behavior: None,
        }
    }
}

impl Recorder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Every target gets exactly `caps` unless overridden per target.
    pub(crate) fn with_default_caps(mut self, caps: Capabilities) -> Self {
        self.default_caps = caps;
        self
    }

    pub(crate) fn with_caps(mut self, target: u32, caps: Capabilities) -> Self {
        self.caps.insert(target, caps);
        self
    }

    pub(crate) fn on_event(
        mut self,
        behavior: impl FnMut(&UiEvent<u32>, &mut HandlerContext<u32>) + 'static,
    ) -> Self {
        self.behavior = Some(Box::new(behavior));
        self
    }

    /// Kinds and targets of everything recorded, then clear the log.
    pub(crate) fn take(&mut self) -> Vec<(EventKind, u32)> {
        self.events.drain(..).map(|e| (e.kind, e.target)).collect()
    }

    pub(crate) fn kinds(&self) -> Vec<EventKind> {
        self.events.iter().map(|e| e.kind).collect()
    }

    /// The first recorded event of `kind`.
    pub(crate) fn first(&self, kind: EventKind) -> &UiEvent<u32> {
        self.events
            .iter()
            .find(|e| e.kind == kind)
            .unwrap_or_else(|| panic!("no {kind:?} event in {:?}", self.kinds()))
    }

    pub(crate) fn count(&self, kind: EventKind) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }
}

impl EventSink<u32> for Recorder {
    fn capabilities(&self, target: u32) -> Option<Capabilities> {
        if self.removed.contains(&target) {
            return None;
        }
        Some(self.caps.get(&target).copied().unwrap_or(self.default_caps))
    }

    fn handle(&mut self, event: &UiEvent<u32>, cx: &mut HandlerContext<u32>) {
        self.events.push(event.clone());
        if let Some(behavior) = &mut self.behavior {
            behavior(event, cx);
        }
    }
}

pub(crate) fn mouse() -> PointerId {
    PointerId::for_device(DeviceId(0))
}

pub(crate) fn finger(contact: u32) -> PointerId {
    PointerId::for_touch(DeviceId(5), contact)
}

pub(crate) fn point(source: PointerId, x: f64, y: f64) -> InputSample {
    InputSample::Point {
        source,
        kind: PointerKind::MouseOrPen,
        position: Point::new(x, y),
    }
}

pub(crate) fn button(source: PointerId, channel: ButtonChannel, pressed: bool) -> InputSample {
    InputSample::Button {
        source,
        channel,
        pressed,
    }
}

pub(crate) fn left(source: PointerId, pressed: bool) -> InputSample {
    button(source, ButtonChannel::Left, pressed)
}

pub(crate) fn scroll(source: PointerId, x: f64, y: f64) -> InputSample {
    InputSample::Scroll {
        source,
        delta: Vec2::new(x, y),
    }
}

pub(crate) fn touch(source: PointerId, phase: TouchPhase, x: f64, y: f64) -> InputSample {
    InputSample::Touch {
        source,
        phase,
        position: Point::new(x, y),
    }
}
