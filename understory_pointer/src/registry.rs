// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The live pointer table and the consolidation policy that shapes it.
//!
//! Pointers are kept in registration order, which is also the order in which a
//! tick processes them. A routing table maps each input source to the logical
//! pointer it currently drives.

use alloc::vec::Vec;

use hashbrown::HashMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::config::ConsolidationPolicy;
use crate::pointer::{PointerState, Removal};
use crate::types::{DeviceId, PointerId, PointerKind};

#[derive(Debug)]
pub(crate) struct PointerRegistry<K: Copy + Eq> {
    pointers: Vec<PointerState<K>>,
    routes: HashMap<PointerId, PointerId>,
    policy: ConsolidationPolicy,
    last_active: Option<PointerId>,
}

impl<K: Copy + Eq> PointerRegistry<K> {
    pub(crate) fn new(policy: ConsolidationPolicy) -> Self {
        Self {
            pointers: Vec::new(),
            routes: HashMap::new(),
            policy,
            last_active: None,
        }
    }

    pub(crate) fn policy(&self) -> ConsolidationPolicy {
        self.policy
    }

    pub(crate) fn len(&self) -> usize {
        self.pointers.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &PointerState<K>> {
        self.pointers.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut PointerState<K>> {
        self.pointers.iter_mut()
    }

    /// Look up a pointer by id. Prefers a live pointer over one being destroyed.
    pub(crate) fn get(&self, id: PointerId) -> Option<&PointerState<K>> {
        self.live_index(id)
            .or_else(|| self.pointers.iter().position(|p| p.id == id))
            .map(|ix| &self.pointers[ix])
    }

    pub(crate) fn get_mut(&mut self, id: PointerId) -> Option<&mut PointerState<K>> {
        let ix = self
            .live_index(id)
            .or_else(|| self.pointers.iter().position(|p| p.id == id))?;
        Some(&mut self.pointers[ix])
    }

    fn live_index(&self, id: PointerId) -> Option<usize> {
        self.pointers
            .iter()
            .position(|p| p.id == id && p.removal.is_none())
    }

    /// The live pointer a source is routed to, if any.
    pub(crate) fn route(&self, source: PointerId) -> Option<PointerId> {
        let id = *self.routes.get(&source)?;
        self.live_index(id).map(|_| id)
    }

    /// Route pointer-capable input from `source`, creating a pointer if the policy calls for one.
    ///
    /// The chosen pointer is re-tagged with `source` and `kind`.
    pub(crate) fn begin(&mut self, source: PointerId, kind: PointerKind) -> PointerId {
        let existing = match self.policy {
            ConsolidationPolicy::AllPointersAsIs => self.route(source),
            ConsolidationPolicy::SingleUnifiedPointer => self
                .pointers
                .iter()
                .find(|p| p.removal.is_none())
                .map(|p| p.id),
            ConsolidationPolicy::SingleMouseOrPenButMultiTouchAndTrack => {
                if kind == PointerKind::MouseOrPen {
                    self.pointers
                        .iter()
                        .find(|p| p.removal.is_none() && p.kind == PointerKind::MouseOrPen)
                        .map(|p| p.id)
                } else {
                    self.route(source)
                        .filter(|id| self.get(*id).is_some_and(|p| p.kind == kind))
                }
            }
        };

        let id = match existing {
            Some(id) => {
                if let Some(pointer) = self.get_mut(id) {
                    if pointer.source != source || pointer.kind != kind {
                        debug!(pointer = %id, %source, ?kind, "re-tagging pointer");
                    }
                    pointer.source = source;
                    pointer.kind = kind;
                }
                id
            }
            None => self.create(source, kind),
        };
        self.routes.insert(source, id);
        self.last_active = Some(id);
        id
    }

    fn create(&mut self, source: PointerId, kind: PointerKind) -> PointerId {
        if self.policy == ConsolidationPolicy::SingleMouseOrPenButMultiTouchAndTrack
            && kind != PointerKind::MouseOrPen
        {
            for pointer in &mut self.pointers {
                if pointer.kind == PointerKind::MouseOrPen && pointer.removal.is_none() {
                    debug!(pointer = %pointer.id, "retiring mouse/pen pointer for {kind:?} input");
                    pointer.removal = Some(Removal::Cancel);
                }
            }
        }
        debug!(pointer = %source, ?kind, policy = ?self.policy, "creating pointer");
        self.pointers.push(PointerState::new(source, kind));
        source
    }

    /// Route input from a source that is not necessarily pointer-capable.
    ///
    /// Prefers the source's own pointer, then the most recently active one, then any
    /// live pointer. Only creates a pointer when none exists.
    pub(crate) fn route_detached(&mut self, source: PointerId) -> PointerId {
        let found = self
            .route(source)
            .or_else(|| self.last_active.filter(|id| self.live_index(*id).is_some()))
            .or_else(|| {
                self.pointers
                    .iter()
                    .find(|p| p.removal.is_none())
                    .map(|p| p.id)
            });
        match found {
            Some(id) => {
                self.last_active = Some(id);
                id
            }
            None => self.begin(source, PointerKind::MouseOrPen),
        }
    }

    /// Schedule every live pointer fed by `device` for cancellation.
    pub(crate) fn cancel_device(&mut self, device: DeviceId) {
        for pointer in &mut self.pointers {
            if pointer.source.device() == device && pointer.removal.is_none() {
                pointer.removal = Some(Removal::Cancel);
            }
        }
    }

    /// Remove a pointer, keeping the others in registration order.
    pub(crate) fn remove(&mut self, id: PointerId) -> Option<PointerState<K>> {
        let ix = self
            .live_index(id)
            .or_else(|| self.pointers.iter().position(|p| p.id == id))?;
        let pointer = self.pointers.remove(ix);
        self.routes.retain(|_, target| *target != id);
        if self.last_active == Some(id) {
            self.last_active = None;
        }
        debug!(pointer = %id, "removed pointer");
        Some(pointer)
    }

    /// Remove the first pointer scheduled for destruction.
    pub(crate) fn pop_scheduled(&mut self) -> Option<PointerState<K>> {
        let ix = self.pointers.iter().position(|p| p.removal.is_some())?;
        let id = self.pointers[ix].id;
        let pointer = self.pointers.remove(ix);
        if self.live_index(id).is_none() {
            self.routes.retain(|_, target| *target != id);
            if self.last_active == Some(id) {
                self.last_active = None;
            }
        }
        debug!(pointer = %id, "destroyed pointer");
        Some(pointer)
    }

    /// Pointers that `policy` would fold into another pointer.
    pub(crate) fn merged_under(&self, policy: ConsolidationPolicy) -> SmallVec<[PointerId; 4]> {
        let mut keep_mouse = false;
        let mut keep_any = false;
        let mut out = SmallVec::new();
        for pointer in &self.pointers {
            let merged = match policy {
                ConsolidationPolicy::AllPointersAsIs => false,
                ConsolidationPolicy::SingleUnifiedPointer => {
                    core::mem::replace(&mut keep_any, true)
                }
                ConsolidationPolicy::SingleMouseOrPenButMultiTouchAndTrack => {
                    pointer.kind == PointerKind::MouseOrPen
                        && core::mem::replace(&mut keep_mouse, true)
                }
            };
            if merged {
                out.push(pointer.id);
            }
        }
        out
    }

    /// Switch to `policy`, re-keying surviving pointers to their current source.
    pub(crate) fn set_policy(&mut self, policy: ConsolidationPolicy) {
        self.policy = policy;
        for ix in 0..self.pointers.len() {
            let source = self.pointers[ix].source;
            let taken = self
                .pointers
                .iter()
                .enumerate()
                .any(|(other, p)| other != ix && p.id == source);
            if !taken {
                if self.last_active == Some(self.pointers[ix].id) {
                    self.last_active = Some(source);
                }
                self.pointers[ix].id = source;
            }
        }
        self.routes.clear();
        for pointer in &self.pointers {
            self.routes.insert(pointer.source, pointer.id);
        }
    }
}
