// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The raycast contract and tracked-ray projection.
//!
//! A [`Raycaster`] maps a screen point to the chain of targets under it, leaf
//! first. The engine calls it once per pointer per tick and expects it to be free
//! of side effects. Chains are validated before use; an empty or cyclic chain is
//! logged and treated as a miss.
//!
//! Tracked pointers have no screen point of their own. Their forward ray
//! (`orientation * +Z`) is intersected with a [`UiPlane`] to obtain one.

use glam::{DQuat, DVec3};
use kurbo::{Point, Rect};
use tracing::warn;

use crate::error::ChainError;
use crate::types::TargetChain;

/// Scene query used to resolve pointer targets.
pub trait Raycaster<K> {
    /// Return the chain of targets under `point`, ordered leaf→root.
    ///
    /// `viewport` is the screen rectangle of the UI root issuing the query, if it
    /// has one. Return `None` for a miss.
    fn raycast(&self, point: Point, viewport: Option<Rect>) -> Option<TargetChain<K>>;
}

impl<K, F> Raycaster<K> for F
where
    F: Fn(Point, Option<Rect>) -> Option<TargetChain<K>>,
{
    fn raycast(&self, point: Point, viewport: Option<Rect>) -> Option<TargetChain<K>> {
        self(point, viewport)
    }
}

/// Check that a chain is non-empty and free of repeated entries.
pub fn validate_chain<K: PartialEq>(chain: &[K]) -> Result<(), ChainError> {
    if chain.is_empty() {
        return Err(ChainError::Empty);
    }
    for (depth, k) in chain.iter().enumerate().skip(1) {
        if let Some(first) = chain[..depth].iter().position(|other| other == k) {
            return Err(ChainError::Cycle { first, depth });
        }
    }
    Ok(())
}

/// Raycast `point` for a root with an optional viewport, discarding malformed results.
///
/// Points outside the viewport never hit.
pub(crate) fn resolve_chain<K, R>(
    raycaster: &R,
    point: Point,
    viewport: Option<Rect>,
) -> TargetChain<K>
where
    K: Copy + PartialEq + core::fmt::Debug,
    R: Raycaster<K> + ?Sized,
{
    if viewport.is_some_and(|v| !v.contains(point)) {
        return TargetChain::new();
    }
    let Some(chain) = raycaster.raycast(point, viewport) else {
        return TargetChain::new();
    };
    match validate_chain(&chain) {
        Ok(()) => chain,
        Err(err) => {
            warn!(%err, ?chain, x = point.x, y = point.y, "discarding malformed raycast result");
            TargetChain::new()
        }
    }
}

/// The plane tracked-device rays are projected onto.
///
/// Screen coordinates of a hit are its offsets along `right` and `down` from
/// `origin`, scaled by `pixels_per_unit` and shifted by `screen_origin`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UiPlane {
    /// A point on the plane, mapped to `screen_origin`.
    pub origin: DVec3,
    /// Plane normal.
    pub normal: DVec3,
    /// World direction of screen `+x`.
    pub right: DVec3,
    /// World direction of screen `+y`.
    pub down: DVec3,
    /// Screen pixels per world unit.
    pub pixels_per_unit: f64,
    /// Screen position of `origin`.
    pub screen_origin: Point,
    /// Rays longer than this miss.
    pub max_distance: f64,
}

impl Default for UiPlane {
    /// A plane one unit in front of the world origin, facing back towards it.
    fn default() -> Self {
        Self {
            origin: DVec3::new(0.0, 0.0, 1.0),
            normal: DVec3::NEG_Z,
            right: DVec3::X,
            down: DVec3::NEG_Y,
            pixels_per_unit: 100.0,
            screen_origin: Point::ZERO,
            max_distance: 1000.0,
        }
    }
}

impl UiPlane {
    /// Project a device pose onto the plane, returning the screen point hit.
    ///
    /// Returns `None` when the ray is parallel to the plane, points away from it,
    /// or reaches it beyond `max_distance`.
    pub fn project(&self, position: DVec3, orientation: DQuat) -> Option<Point> {
        let direction = orientation * DVec3::Z;
        let denom = self.normal.dot(direction);
        if denom.abs() < 1e-9 {
            return None;
        }
        let t = self.normal.dot(self.origin - position) / denom;
        if !(0.0..=self.max_distance).contains(&t) {
            return None;
        }
        let local = position + direction * t - self.origin;
        Some(Point::new(
            self.screen_origin.x + local.dot(self.right) * self.pixels_per_unit,
            self.screen_origin.y + local.dot(self.down) * self.pixels_per_unit,
        ))
    }
}
