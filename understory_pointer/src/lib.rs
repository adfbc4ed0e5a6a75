// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pointer --heading-base-level=0

//! Understory Pointer: deterministic pointer and navigation event dispatch.
//!
//! This crate turns raw input samples (mouse, pen, touch, tracked 6-DOF devices,
//! gamepad or keyboard navigation) into an ordered stream of UI events for a
//! retained-mode scene:
//!
//! - Enter and exit as pointers move across the hit chain.
//! - The press lifecycle: down, up, multi-click counting and click.
//! - The drag lifecycle: potential drag, begin, drag, end and drop.
//! - Scroll.
//! - Directional navigation with repeat pacing, submit and cancel.
//! - Select and deselect.
//!
//! The engine does not know about your scene. It asks a [`Raycaster`] what lies
//! under each pointer, a [`NavigationGeometry`] where a move should go, and
//! delivers events to an [`EventSink`] that knows which handlers each target has.
//!
//! ## Ticks
//!
//! All work happens in [`Dispatcher::process_tick`]. Samples pushed between ticks
//! are buffered and consumed in arrival order; pointers are then processed in
//! registration order. For one pointer in one tick the events are ordered
//!
//! `Exit* → Enter* → Down → InitializePotentialDrag → Up → EndDrag → Drop → Click →
//! BeginDrag → Drag → Scroll`
//!
//! Navigation runs after every pointer. Handlers run synchronously and may
//! request selection changes or a drag-threshold override through
//! [`HandlerContext`]; those apply before the next step of the same tick.
//!
//! ## Click counting
//!
//! `PointerDown` reports the click state of the previous press. Detection runs
//! after it, so `InitializePotentialDrag`, `PointerUp` and `PointerClick` see the
//! updated count.
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use smallvec::smallvec;
//! use understory_pointer::{
//!     ButtonChannel, Capabilities, DeviceId, Dispatcher, EventKind, EventSink,
//!     HandlerContext, InputSample, PointerId, PointerKind, TargetChain, UiEvent,
//! };
//!
//! /// Records (kind, click count) for every pointer event.
//! struct Counts(Vec<(EventKind, u32)>);
//!
//! impl EventSink<u32> for Counts {
//!     fn capabilities(&self, _: u32) -> Option<Capabilities> {
//!         Some(Capabilities::POINTER_DOWN | Capabilities::POINTER_UP | Capabilities::POINTER_CLICK)
//!     }
//!     fn handle(&mut self, event: &UiEvent<u32>, _: &mut HandlerContext<u32>) {
//!         let count = event.pointer().map_or(0, |p| p.click_count);
//!         self.0.push((event.kind, count));
//!     }
//! }
//!
//! let button = |_: Point, _: Option<Rect>| -> Option<TargetChain<u32>> { Some(smallvec![7]) };
//! let mouse = PointerId::for_device(DeviceId(0));
//! let mut dispatcher = Dispatcher::new(Default::default());
//! let mut sink = Counts(Vec::new());
//!
//! let click = |dispatcher: &mut Dispatcher<u32>, pressed| {
//!     dispatcher.push_sample(InputSample::Button {
//!         source: mouse,
//!         channel: ButtonChannel::Left,
//!         pressed,
//!     });
//! };
//!
//! dispatcher.push_sample(InputSample::Point {
//!     source: mouse,
//!     kind: PointerKind::MouseOrPen,
//!     position: Point::new(5.0, 5.0),
//! });
//! click(&mut dispatcher, true);
//! click(&mut dispatcher, false);
//! dispatcher.process_tick(1.0, &button, &(), &mut sink);
//! click(&mut dispatcher, true);
//! dispatcher.process_tick(1.2, &button, &(), &mut sink);
//!
//! assert_eq!(
//!     sink.0,
//!     [
//!         (EventKind::PointerDown, 0),
//!         (EventKind::PointerUp, 1),
//!         (EventKind::PointerClick, 1),
//!         (EventKind::PointerDown, 1),
//!     ]
//! );
//! assert_eq!(dispatcher.snapshot(mouse, ButtonChannel::Left).unwrap().click_count, 2);
//! ```
//!
//! ## Multiple pointers
//!
//! A [`ConsolidationPolicy`] decides how many logical pointers concurrent devices
//! produce. Destroyed pointers always get their exits, ups and end-drags first;
//! interaction state is never dropped silently. Several independent UI roots can
//! share one input stream through a [`MultiRootRouter`].
//!
//! ## Features
//!
//! - `std` (default): build dependencies with the standard library.
//! - `libm`: build float functions with `libm` for `no_std` targets.
//! - `serde`: derive `Serialize`/`Deserialize` for configuration types.
//!
//! This crate is `no_std` compatible (with `alloc`).
//!
//! [`Raycaster`]: raycast::Raycaster
//! [`NavigationGeometry`]: navigation::NavigationGeometry
//! [`EventSink`]: handler::EventSink
//! [`HandlerContext`]: handler::HandlerContext
//! [`Dispatcher::process_tick`]: dispatcher::Dispatcher::process_tick
//! [`ConsolidationPolicy`]: config::ConsolidationPolicy
//! [`MultiRootRouter`]: router::MultiRootRouter

#![no_std]

extern crate alloc;

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod handler;
pub mod navigation;
pub mod raycast;
pub mod router;
pub mod sample;
pub mod types;
pub mod virtual_cursor;

mod pointer;
mod registry;
mod synth;

pub use config::{ConsolidationPolicy, DispatchConfig};
pub use dispatcher::Dispatcher;
pub use error::{ChainError, RouterError};
pub use event::{AxisEventData, Capabilities, EventData, EventKind, PointerEventData, UiEvent};
pub use handler::{EventSink, HandlerContext, SelectionRequest};
pub use navigation::{NavigationGeometry, SelectionState};
pub use raycast::{Raycaster, UiPlane, validate_chain};
pub use router::MultiRootRouter;
pub use sample::{InputSample, TouchPhase};
pub use types::{ButtonChannel, DeviceId, PointerId, PointerKind, RootId, TargetChain};
pub use understory_event_state::navigate::MoveDirection;
pub use virtual_cursor::VirtualCursor;
