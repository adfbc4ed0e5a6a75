// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event kinds, handler capabilities, and the immutable payloads delivered to targets.
//!
//! Every event carries a snapshot of the relevant engine state taken at the moment
//! of delivery. Handlers never see live pointer state; any change they want to make
//! goes through [`HandlerContext`](crate::handler::HandlerContext).

use glam::{DQuat, DVec3};
use kurbo::{Point, Vec2};
use understory_event_state::navigate::MoveDirection;

use crate::types::{ButtonChannel, PointerId, PointerKind, TargetChain};

/// The kind of a UI event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// The pointer started hovering the target.
    PointerEnter,
    /// The pointer stopped hovering the target.
    PointerExit,
    /// A button was pressed over the target.
    PointerDown,
    /// A button pressed on the target was released.
    PointerUp,
    /// A press and release completed on the same target.
    PointerClick,
    /// A press landed on a draggable target; a drag may follow.
    InitializePotentialDrag,
    /// A drag started.
    BeginDrag,
    /// The pointer moved while dragging.
    Drag,
    /// A drag finished.
    EndDrag,
    /// A drag was released over the target.
    Drop,
    /// Scroll input while hovering the target.
    Scroll,
    /// Directional navigation with the target selected.
    Move,
    /// Submit with the target selected.
    Submit,
    /// Cancel with the target selected.
    Cancel,
    /// The target became selected.
    Select,
    /// The target stopped being selected.
    Deselect,
}

bitflags::bitflags! {
    /// The set of handlers a target implements.
    ///
    /// Delivery is skipped for targets lacking the capability of an event.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Capabilities: u32 {
        /// Handles [`EventKind::PointerEnter`].
        const POINTER_ENTER = 1 << 0;
        /// Handles [`EventKind::PointerExit`].
        const POINTER_EXIT = 1 << 1;
        /// Handles [`EventKind::PointerDown`].
        const POINTER_DOWN = 1 << 2;
        /// Handles [`EventKind::PointerUp`].
        const POINTER_UP = 1 << 3;
        /// Handles [`EventKind::PointerClick`].
        const POINTER_CLICK = 1 << 4;
        /// Handles [`EventKind::InitializePotentialDrag`].
        const INITIALIZE_POTENTIAL_DRAG = 1 << 5;
        /// Handles [`EventKind::BeginDrag`].
        const BEGIN_DRAG = 1 << 6;
        /// Handles [`EventKind::Drag`].
        const DRAG = 1 << 7;
        /// Handles [`EventKind::EndDrag`].
        const END_DRAG = 1 << 8;
        /// Handles [`EventKind::Drop`].
        const DROP = 1 << 9;
        /// Handles [`EventKind::Scroll`].
        const SCROLL = 1 << 10;
        /// Handles [`EventKind::Move`].
        const MOVE = 1 << 11;
        /// Handles [`EventKind::Submit`].
        const SUBMIT = 1 << 12;
        /// Handles [`EventKind::Cancel`].
        const CANCEL = 1 << 13;
        /// Handles [`EventKind::Select`].
        const SELECT = 1 << 14;
        /// Handles [`EventKind::Deselect`].
        const DESELECT = 1 << 15;

        /// Enter and exit.
        const HOVER = Self::POINTER_ENTER.bits() | Self::POINTER_EXIT.bits();
        /// The full drag lifecycle.
        const DRAGGABLE = Self::INITIALIZE_POTENTIAL_DRAG.bits()
            | Self::BEGIN_DRAG.bits()
            | Self::DRAG.bits()
            | Self::END_DRAG.bits();
        /// Select and deselect.
        const SELECTABLE = Self::SELECT.bits() | Self::DESELECT.bits();
    }
}

impl EventKind {
    /// The capability a target needs to receive this event.
    pub const fn capability(self) -> Capabilities {
        match self {
            Self::PointerEnter => Capabilities::POINTER_ENTER,
            Self::PointerExit => Capabilities::POINTER_EXIT,
            Self::PointerDown => Capabilities::POINTER_DOWN,
            Self::PointerUp => Capabilities::POINTER_UP,
            Self::PointerClick => Capabilities::POINTER_CLICK,
            Self::InitializePotentialDrag => Capabilities::INITIALIZE_POTENTIAL_DRAG,
            Self::BeginDrag => Capabilities::BEGIN_DRAG,
            Self::Drag => Capabilities::DRAG,
            Self::EndDrag => Capabilities::END_DRAG,
            Self::Drop => Capabilities::DROP,
            Self::Scroll => Capabilities::SCROLL,
            Self::Move => Capabilities::MOVE,
            Self::Submit => Capabilities::SUBMIT,
            Self::Cancel => Capabilities::CANCEL,
            Self::Select => Capabilities::SELECT,
            Self::Deselect => Capabilities::DESELECT,
        }
    }
}

/// Snapshot of a pointer and one of its button channels.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEventData<K> {
    /// Logical pointer.
    pub pointer_id: PointerId,
    /// Source currently feeding the pointer. Differs from `pointer_id` when the
    /// pointer has been consolidated across devices.
    pub source: PointerId,
    /// Current pointer kind.
    pub kind: PointerKind,
    /// Button channel whose state this snapshot reports.
    pub button: ButtonChannel,
    /// Screen position.
    pub position: Point,
    /// Motion since the previous tick.
    pub delta: Vec2,
    /// Position of the current or most recent press.
    pub press_position: Point,
    /// Time of the most recent click detection.
    pub click_time: f64,
    /// Click count of the current sequence.
    pub click_count: u32,
    /// Whether a release would still produce a click.
    pub eligible_for_click: bool,
    /// Whether a drag is in progress.
    pub dragging: bool,
    /// Whether drag start waits for the drag threshold.
    pub use_drag_threshold: bool,
    /// Topmost hovered target.
    pub enter_target: Option<K>,
    /// Targets considered hovered at the time of delivery.
    pub hovered: TargetChain<K>,
    /// Target that accepted the current press.
    pub press_target: Option<K>,
    /// Leaf hit by the current press, whether or not it accepted it.
    pub raw_press_target: Option<K>,
    /// Press target of the previous press.
    pub last_press_target: Option<K>,
    /// Target receiving drag events.
    pub drag_target: Option<K>,
    /// Leaf of the latest raycast.
    pub current_raycast: Option<K>,
    /// Leaf of the raycast taken at press time.
    pub press_raycast: Option<K>,
    /// Scroll amount in lines.
    pub scroll_delta: Vec2,
    /// World position of a tracked pointer.
    pub tracked_position: DVec3,
    /// Orientation of a tracked pointer.
    pub tracked_orientation: DQuat,
}

/// Payload of a [`EventKind::Move`] event.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisEventData {
    /// Quantized direction.
    pub move_dir: MoveDirection,
    /// Normalized axis value, `+y` up.
    pub move_vector: Vec2,
}

/// Event payload variants.
#[derive(Clone, Debug, PartialEq)]
pub enum EventData<K> {
    /// Pointer events.
    Pointer(PointerEventData<K>),
    /// Move events.
    Axis(AxisEventData),
    /// Submit, cancel, select and deselect carry no data.
    Base,
}

/// An event addressed to a single target.
#[derive(Clone, Debug, PartialEq)]
pub struct UiEvent<K> {
    /// What happened.
    pub kind: EventKind,
    /// Receiving target.
    pub target: K,
    /// Snapshot payload.
    pub data: EventData<K>,
}

impl<K> UiEvent<K> {
    /// The pointer payload, if this is a pointer event.
    pub fn pointer(&self) -> Option<&PointerEventData<K>> {
        match &self.data {
            EventData::Pointer(data) => Some(data),
            _ => None,
        }
    }

    /// The axis payload, if this is a move event.
    pub fn axis(&self) -> Option<&AxisEventData> {
        match &self.data {
            EventData::Axis(data) => Some(data),
            _ => None,
        }
    }
}
