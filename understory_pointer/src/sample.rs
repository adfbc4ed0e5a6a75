// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw input samples, buffered between ticks and consumed in arrival order.
//!
//! Samples are produced by a binding layer that has already mapped physical
//! controls to semantic channels.

use glam::{DQuat, DVec3};
use kurbo::{Point, Vec2};

use crate::types::{ButtonChannel, DeviceId, PointerId, PointerKind, RootId};

/// Touch contact phase.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// The contact started; presses the implicit primary channel.
    Began,
    /// The contact moved.
    Moved,
    /// The contact lifted; releases, then the pointer is destroyed.
    Ended,
    /// The contact was cancelled by the platform; the pointer is destroyed without a click.
    Canceled,
}

/// One input sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputSample {
    /// A screen position from a pointer-capable source.
    Point {
        /// Source device.
        source: PointerId,
        /// Kind of device.
        kind: PointerKind,
        /// Screen position.
        position: Point,
    },
    /// A button level change.
    ///
    /// A source without a pointer of its own (a keyboard key bound to "click", for
    /// example) drives the most recently active pointer.
    Button {
        /// Source device.
        source: PointerId,
        /// Which channel changed.
        channel: ButtonChannel,
        /// New level.
        pressed: bool,
    },
    /// Raw scroll input, accumulated over the tick.
    Scroll {
        /// Source device.
        source: PointerId,
        /// Raw scroll amount.
        delta: Vec2,
    },
    /// A 6-DOF pose for a tracked device.
    TrackedPose {
        /// Source device.
        source: PointerId,
        /// World position.
        position: DVec3,
        /// World orientation.
        orientation: DQuat,
    },
    /// A touch contact update.
    Touch {
        /// Source contact, see [`PointerId::for_touch`].
        source: PointerId,
        /// Contact phase.
        phase: TouchPhase,
        /// Screen position.
        position: Point,
    },
    /// A device was disconnected; every pointer it drives is destroyed.
    DeviceRemoved {
        /// The removed device.
        device: DeviceId,
    },
    /// Navigation axis level for a root, `+y` up.
    Navigate {
        /// Addressed root.
        root: RootId,
        /// Axis value.
        axis: Vec2,
    },
    /// Submit button level for a root.
    Submit {
        /// Addressed root.
        root: RootId,
        /// New level.
        pressed: bool,
    },
    /// Cancel button level for a root.
    Cancel {
        /// Addressed root.
        root: RootId,
        /// New level.
        pressed: bool,
    },
}

impl InputSample {
    /// The root a navigation sample is addressed to, or `None` for pointer samples.
    pub fn root(&self) -> Option<RootId> {
        match *self {
            Self::Navigate { root, .. } | Self::Submit { root, .. } | Self::Cancel { root, .. } => {
                Some(root)
            }
            _ => None,
        }
    }
}
