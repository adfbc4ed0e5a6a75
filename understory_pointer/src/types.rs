// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identifiers and small enums shared by the dispatch engine.

use core::fmt;

use smallvec::SmallVec;

/// Identifier of a physical input device.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeviceId(pub u32);

/// Identifier of a logical pointer, or of the input source feeding it.
///
/// A pointer id is a device id plus, for multi-touch devices, the touch contact
/// id. Ids are unique among live pointers and may be reused once a pointer has
/// been destroyed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointerId {
    device: DeviceId,
    contact: Option<u32>,
}

impl PointerId {
    /// Id for a device that produces a single pointer (mouse, pen, tracked controller).
    pub const fn for_device(device: DeviceId) -> Self {
        Self {
            device,
            contact: None,
        }
    }

    /// Id for one contact of a touch device.
    pub const fn for_touch(device: DeviceId, contact: u32) -> Self {
        Self {
            device,
            contact: Some(contact),
        }
    }

    /// The device half of the id.
    pub const fn device(self) -> DeviceId {
        self.device
    }

    /// The touch contact half of the id, if any.
    pub const fn contact(self) -> Option<u32> {
        self.contact
    }
}

impl fmt::Display for PointerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.contact {
            Some(contact) => write!(f, "{}:{}", self.device.0, contact),
            None => write!(f, "{}", self.device.0),
        }
    }
}

/// What kind of device backs a pointer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerKind {
    /// A mouse or pen: hovers without pressing, has three buttons.
    MouseOrPen,
    /// A touch contact: exists only while touching, presses [`ButtonChannel::Left`].
    Touch,
    /// A 6-DOF tracked device whose ray is projected onto the UI plane.
    Tracked,
}

/// A pointer button channel.
///
/// Touch and tracked pointers drive only [`ButtonChannel::Left`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ButtonChannel {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Middle button.
    Middle,
}

impl ButtonChannel {
    /// All channels in processing order.
    pub const ALL: [Self; 3] = [Self::Left, Self::Right, Self::Middle];

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
            Self::Middle => 2,
        }
    }
}

/// Identifier of a UI root handled by a [`MultiRootRouter`](crate::router::MultiRootRouter).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RootId(pub u32);

/// An ordered list of targets from the hit leaf outward to the root.
pub type TargetChain<K> = SmallVec<[K; 8]>;
