// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover state helper: compute exit/enter transitions between leaf→root hover chains.
//!
//! Unlike a focus path, a hover chain is ordered from the hit leaf outward to the
//! root. Transitions are computed as set differences between the old and the new
//! chain:
//!
//! - Exits cover `old − new`, leaf first.
//! - Enters cover `new − old`, leaf first, and always come after every exit.
//!
//! The hovered set can be updated one transition at a time with
//! [`HoverState::apply`], so observers notified between steps see exactly the
//! members processed so far. [`HoverState::settle`] restores leaf→root order once
//! a plan has been fully applied.
//!
//! ## Minimal example
//!
//! ```
//! use understory_event_state::hover::{HoverEvent, HoverState};
//!
//! let mut hover: HoverState<u32> = HoverState::new();
//! // Pointer lands on child 2 inside parent 1.
//! let plan = hover.update_chain(&[2, 1]);
//! assert_eq!(plan.as_slice(), &[HoverEvent::Enter(2), HoverEvent::Enter(1)]);
//!
//! // Pointer moves to sibling 3; the shared parent is untouched.
//! let plan = hover.update_chain(&[3, 1]);
//! assert_eq!(plan.as_slice(), &[HoverEvent::Exit(2), HoverEvent::Enter(3)]);
//! assert_eq!(hover.hovered(), &[3, 1]);
//! ```

use smallvec::SmallVec;

/// A hover transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// The pointer left this node.
    Exit(K),
    /// The pointer entered this node.
    Enter(K),
}

impl<K: Copy> HoverEvent<K> {
    /// The node this transition concerns.
    pub fn node(&self) -> K {
        match *self {
            Self::Exit(k) | Self::Enter(k) => k,
        }
    }
}

/// An ordered list of transitions: all exits, then all enters.
pub type HoverPlan<K> = SmallVec<[HoverEvent<K>; 16]>;

/// The set of nodes currently considered hovered by one pointer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HoverState<K: Copy + Eq> {
    hovered: SmallVec<[K; 8]>,
}

impl<K: Copy + Eq> HoverState<K> {
    /// Create an empty hover state.
    pub fn new() -> Self {
        Self {
            hovered: SmallVec::new(),
        }
    }

    /// Nodes currently hovered. Leaf→root after [`HoverState::settle`].
    pub fn hovered(&self) -> &[K] {
        &self.hovered
    }

    /// Returns `true` if `node` is in the hovered set.
    pub fn contains(&self, node: K) -> bool {
        self.hovered.contains(&node)
    }

    /// Returns `true` if nothing is hovered.
    pub fn is_empty(&self) -> bool {
        self.hovered.is_empty()
    }

    /// Compute the transitions needed to move to `new_chain` without applying them.
    pub fn plan(&self, new_chain: &[K]) -> HoverPlan<K> {
        let mut out = HoverPlan::new();
        out.extend(
            self.hovered
                .iter()
                .filter(|k| !new_chain.contains(k))
                .map(|&k| HoverEvent::Exit(k)),
        );
        out.extend(
            new_chain
                .iter()
                .filter(|k| !self.hovered.contains(k))
                .map(|&k| HoverEvent::Enter(k)),
        );
        out
    }

    /// Apply a single transition to the hovered set.
    pub fn apply(&mut self, event: HoverEvent<K>) {
        match event {
            HoverEvent::Exit(k) => {
                if let Some(ix) = self.hovered.iter().position(|&h| h == k) {
                    self.hovered.remove(ix);
                }
            }
            HoverEvent::Enter(k) => {
                if !self.hovered.contains(&k) {
                    self.hovered.push(k);
                }
            }
        }
    }

    /// Replace the hovered set with `chain`, in chain order.
    pub fn settle(&mut self, chain: &[K]) {
        self.hovered.clear();
        self.hovered.extend_from_slice(chain);
    }

    /// Plan, apply and settle in one step.
    pub fn update_chain(&mut self, new_chain: &[K]) -> HoverPlan<K> {
        let plan = self.plan(new_chain);
        self.settle(new_chain);
        plan
    }
}
