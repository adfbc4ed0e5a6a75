// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dispatch context for one UI root.
//!
//! A [`Dispatcher`] owns every mutable table the engine needs: the pointer
//! registry, the selection, buffered input and configuration. There is no global
//! state; hosts drive it by pushing samples and calling
//! [`Dispatcher::process_tick`] once per frame.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use smallvec::smallvec;
//! use understory_pointer::dispatcher::Dispatcher;
//! use understory_pointer::event::{Capabilities, EventKind, UiEvent};
//! use understory_pointer::handler::{EventSink, HandlerContext};
//! use understory_pointer::sample::InputSample;
//! use understory_pointer::types::{ButtonChannel, DeviceId, PointerId, PointerKind, TargetChain};
//!
//! struct Log(Vec<(EventKind, u32)>);
//!
//! impl EventSink<u32> for Log {
//!     fn capabilities(&self, _: u32) -> Option<Capabilities> {
//!         Some(Capabilities::all())
//!     }
//!     fn handle(&mut self, event: &UiEvent<u32>, _: &mut HandlerContext<u32>) {
//!         self.0.push((event.kind, event.target));
//!     }
//! }
//!
//! // One button (id 1) covering the left half of the screen.
//! let raycast = |p: Point, _: Option<Rect>| -> Option<TargetChain<u32>> {
//!     (p.x < 100.0).then(|| smallvec![1])
//! };
//!
//! let mouse = PointerId::for_device(DeviceId(0));
//! let mut dispatcher = Dispatcher::new(Default::default());
//! let mut log = Log(Vec::new());
//!
//! dispatcher.push_sample(InputSample::Point {
//!     source: mouse,
//!     kind: PointerKind::MouseOrPen,
//!     position: Point::new(10.0, 10.0),
//! });
//! dispatcher.push_sample(InputSample::Button {
//!     source: mouse,
//!     channel: ButtonChannel::Left,
//!     pressed: true,
//! });
//! dispatcher.process_tick(1.0, &raycast, &(), &mut log);
//! assert!(dispatcher.is_pointer_over(mouse));
//!
//! let kinds: Vec<_> = log.0.iter().map(|(kind, _)| *kind).collect();
//! assert_eq!(
//!     kinds,
//!     [EventKind::PointerEnter, EventKind::PointerDown, EventKind::InitializePotentialDrag]
//! );
//! ```

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::{Point, Rect};
use tracing::{debug, trace};

use crate::config::{ConsolidationPolicy, DispatchConfig};
use crate::event::PointerEventData;
use crate::handler::EventSink;
use crate::navigation::{NavigationGeometry, NavigationInput, SelectionState, process_navigation};
use crate::pointer::Removal;
use crate::raycast::{Raycaster, UiPlane};
use crate::registry::PointerRegistry;
use crate::sample::{InputSample, TouchPhase};
use crate::synth::{Scope, process_pointer, release_all, retire};
use crate::types::{ButtonChannel, PointerId, PointerKind, RootId};

/// Pointer and navigation dispatch for one UI root.
#[derive(Debug)]
pub struct Dispatcher<K: Copy + Eq> {
    root: RootId,
    viewport: Option<Rect>,
    config: DispatchConfig,
    registry: PointerRegistry<K>,
    selection: SelectionState<K>,
    navigation: NavigationInput,
    pending: Vec<InputSample>,
    pending_policy: Option<ConsolidationPolicy>,
    first_selected: Option<K>,
    now: f64,
}

impl<K: Copy + Eq + Debug> Dispatcher<K> {
    /// Create a dispatcher for [`RootId(0)`](RootId) with no viewport.
    pub fn new(config: DispatchConfig) -> Self {
        Self {
            root: RootId::default(),
            viewport: None,
            registry: PointerRegistry::new(config.consolidation),
            config,
            selection: SelectionState::default(),
            navigation: NavigationInput::default(),
            pending: Vec::new(),
            pending_policy: None,
            first_selected: None,
            now: 0.0,
        }
    }

    /// Address navigation samples for `root` to this dispatcher.
    #[must_use]
    pub fn with_root(mut self, root: RootId) -> Self {
        self.root = root;
        self
    }

    /// Restrict pointer resolution to `viewport`.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Rect) -> Self {
        self.viewport = Some(viewport);
        self
    }

    /// The root this dispatcher serves.
    pub fn root(&self) -> RootId {
        self.root
    }

    /// The screen rectangle pointers must fall in, if any.
    pub fn viewport(&self) -> Option<Rect> {
        self.viewport
    }

    /// Change the screen rectangle pointers must fall in.
    pub fn set_viewport(&mut self, viewport: Option<Rect>) {
        self.viewport = viewport;
    }

    /// The active configuration.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Replace the configuration.
    ///
    /// A different consolidation policy takes effect at the start of the next tick.
    pub fn set_config(&mut self, config: DispatchConfig) {
        if config.consolidation != self.config.consolidation {
            self.pending_policy = Some(config.consolidation);
        }
        self.config = config;
    }

    /// Change the consolidation policy, starting with the next tick.
    pub fn set_policy(&mut self, policy: ConsolidationPolicy) {
        self.config.consolidation = policy;
        self.pending_policy = Some(policy);
    }

    /// The consolidation policy currently applied to live pointers.
    pub fn policy(&self) -> ConsolidationPolicy {
        self.registry.policy()
    }

    /// Buffer a sample for the next tick.
    pub fn push_sample(&mut self, sample: InputSample) {
        self.pending.push(sample);
    }

    /// Select `target` on the next tick, if nothing else has selected anything yet.
    pub fn set_first_selected(&mut self, target: Option<K>) {
        self.first_selected = target;
    }

    /// Register pointer-capable input from `source` and return the pointer it drives.
    pub fn begin_pointer(&mut self, source: PointerId, kind: PointerKind) -> PointerId {
        self.registry.begin(source, kind)
    }

    /// Destroy a pointer now, delivering exits, ups and end-drags for whatever it still
    /// references. Unknown ids are ignored.
    pub fn end_pointer<S>(&mut self, id: PointerId, sink: &mut S)
    where
        S: EventSink<K> + ?Sized,
    {
        let Some(mut pointer) = self.registry.remove(id) else {
            trace!(pointer = %id, "ignoring end of unknown pointer");
            return;
        };
        let mut scope = Scope {
            config: &self.config,
            selection: &mut self.selection,
            sink,
            viewport: self.viewport,
            now: self.now,
        };
        retire(&mut scope, &mut pointer);
    }

    /// Select `target`, or clear the selection, notifying both sides now.
    pub fn set_selected<S>(&mut self, target: Option<K>, sink: &mut S)
    where
        S: EventSink<K> + ?Sized,
    {
        self.first_selected = None;
        let mut scope = Scope {
            config: &self.config,
            selection: &mut self.selection,
            sink,
            viewport: self.viewport,
            now: self.now,
        };
        scope.change_selection(target);
    }

    /// Run one tick at time `now` (seconds).
    ///
    /// Applies a pending policy change, consumes buffered samples in arrival order,
    /// processes every pointer in registration order, destroys pointers scheduled for
    /// removal, and finally runs navigation.
    pub fn process_tick<R, G, S>(&mut self, now: f64, raycaster: &R, geometry: &G, sink: &mut S)
    where
        R: Raycaster<K> + ?Sized,
        G: NavigationGeometry<K> + ?Sized,
        S: EventSink<K> + ?Sized,
    {
        self.now = now;
        let mut scope = Scope {
            config: &self.config,
            selection: &mut self.selection,
            sink,
            viewport: self.viewport,
            now,
        };

        if let Some(policy) = self.pending_policy.take() {
            if policy != self.registry.policy() {
                debug!(from = ?self.registry.policy(), to = ?policy, "changing consolidation policy");
                for pointer in self.registry.iter_mut() {
                    release_all(&mut scope, pointer);
                }
                for id in self.registry.merged_under(policy) {
                    if let Some(mut pointer) = self.registry.remove(id) {
                        retire(&mut scope, &mut pointer);
                    }
                }
                self.registry.set_policy(policy);
            }
        }

        if let Some(first) = self.first_selected.take() {
            if scope.selection.current.is_none() {
                scope.change_selection(Some(first));
            }
        }

        let mut samples = core::mem::take(&mut self.pending);
        for sample in samples.drain(..) {
            consume(
                &mut self.registry,
                &mut self.navigation,
                self.root,
                &self.config.ui_plane,
                sample,
            );
        }
        self.pending = samples;

        for pointer in self.registry.iter_mut() {
            process_pointer(&mut scope, pointer, raycaster);
        }
        while let Some(mut pointer) = self.registry.pop_scheduled() {
            // Already cleaned up while processing; this only catches stragglers.
            retire(&mut scope, &mut pointer);
        }

        process_navigation(&mut scope, &mut self.navigation, geometry);
    }

    /// Whether the pointer hovers anything.
    pub fn is_pointer_over(&self, id: PointerId) -> bool {
        self.registry
            .get(id)
            .is_some_and(|pointer| !pointer.hover.is_empty())
    }

    /// Whether any pointer hovers anything.
    pub fn is_any_pointer_over(&self) -> bool {
        self.registry.iter().any(|pointer| !pointer.hover.is_empty())
    }

    /// The targets a pointer hovers, leaf first. Empty for unknown ids.
    pub fn hover_chain(&self, id: PointerId) -> &[K] {
        self.registry
            .get(id)
            .map_or(&[], |pointer| pointer.hover.hovered())
    }

    /// Live pointers in registration order.
    pub fn pointer_ids(&self) -> impl Iterator<Item = PointerId> + '_ {
        self.registry.iter().map(|pointer| pointer.id)
    }

    /// Number of live pointers.
    pub fn pointer_count(&self) -> usize {
        self.registry.len()
    }

    /// Kind of the device currently driving a pointer.
    pub fn pointer_kind(&self, id: PointerId) -> Option<PointerKind> {
        self.registry.get(id).map(|pointer| pointer.kind)
    }

    /// Screen position of a pointer.
    pub fn pointer_position(&self, id: PointerId) -> Option<Point> {
        self.registry.get(id).map(|pointer| pointer.position)
    }

    /// Snapshot of a pointer as an event would see it through `channel`.
    pub fn snapshot(&self, id: PointerId, channel: ButtonChannel) -> Option<PointerEventData<K>> {
        self.registry
            .get(id)
            .map(|pointer| pointer.snapshot(channel))
    }

    /// The selected target.
    pub fn current_selected(&self) -> Option<K> {
        self.selection.current_selected()
    }

    /// Selection bookkeeping, including navigation repeat state.
    pub fn selection(&self) -> &SelectionState<K> {
        &self.selection
    }
}

fn consume<K: Copy + Eq>(
    registry: &mut PointerRegistry<K>,
    navigation: &mut NavigationInput,
    root: RootId,
    plane: &UiPlane,
    sample: InputSample,
) {
    if let Some(target) = sample.root() {
        if target != root {
            trace!(?target, ?root, "ignoring navigation sample for another root");
            return;
        }
    }
    match sample {
        InputSample::Point {
            source,
            kind,
            position,
        } => {
            let id = registry.begin(source, kind);
            if let Some(pointer) = registry.get_mut(id) {
                pointer.position = position;
            }
        }
        InputSample::Button {
            source,
            channel,
            pressed,
        } => {
            let id = registry.route_detached(source);
            if let Some(pointer) = registry.get_mut(id) {
                let channel = match pointer.kind {
                    PointerKind::MouseOrPen => channel,
                    PointerKind::Touch | PointerKind::Tracked => ButtonChannel::Left,
                };
                let at = pointer.position;
                pointer.button_mut(channel).record(pressed, at);
            }
        }
        InputSample::Scroll { source, delta } => {
            let id = registry.route_detached(source);
            if let Some(pointer) = registry.get_mut(id) {
                pointer.scroll_accumulator += delta;
            }
        }
        InputSample::TrackedPose {
            source,
            position,
            orientation,
        } => {
            let id = registry.begin(source, PointerKind::Tracked);
            if let Some(pointer) = registry.get_mut(id) {
                pointer.world_position = position;
                pointer.orientation = orientation;
                match plane.project(position, orientation) {
                    Some(point) => {
                        pointer.position = point;
                        pointer.ray_hit = true;
                    }
                    None => pointer.ray_hit = false,
                }
            }
        }
        InputSample::Touch {
            source,
            phase,
            position,
        } => match phase {
            TouchPhase::Began | TouchPhase::Moved => {
                let id = registry.begin(source, PointerKind::Touch);
                if let Some(pointer) = registry.get_mut(id) {
                    pointer.position = position;
                    if phase == TouchPhase::Began {
                        pointer.button_mut(ButtonChannel::Left).record(true, position);
                    }
                }
            }
            TouchPhase::Ended | TouchPhase::Canceled => {
                let Some(id) = registry.route(source) else {
                    trace!(%source, "touch ended without a pointer");
                    return;
                };
                if let Some(pointer) = registry.get_mut(id) {
                    pointer.position = position;
                    pointer.button_mut(ButtonChannel::Left).record(false, position);
                    if pointer.kind == PointerKind::Touch && pointer.source == source {
                        pointer.removal = Some(match phase {
                            TouchPhase::Ended => Removal::Release,
                            _ => Removal::Cancel,
                        });
                    }
                }
            }
        },
        InputSample::DeviceRemoved { device } => {
            debug!(?device, "device removed");
            registry.cancel_device(device);
        }
        InputSample::Navigate { axis, .. } => navigation.axis = axis,
        InputSample::Submit { pressed, .. } => navigation.submit(pressed),
        InputSample::Cancel { pressed, .. } => navigation.cancel(pressed),
    }
}
