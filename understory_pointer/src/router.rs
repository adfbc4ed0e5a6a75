// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Several independent UI roots sharing one input stream.
//!
//! Each root is a full [`Dispatcher`] with its own pointers, selection and
//! viewport. Pointer samples are broadcast to every root, and each root's viewport
//! decides which of them can resolve targets inside it. Navigation samples name
//! their root and reach only that one.
//!
//! ```
//! use kurbo::Rect;
//! use understory_pointer::router::MultiRootRouter;
//! use understory_pointer::types::RootId;
//!
//! let mut router = MultiRootRouter::<u32>::new();
//! let left = Rect::new(0.0, 0.0, 400.0, 600.0);
//! let right = Rect::new(400.0, 0.0, 800.0, 600.0);
//! router.add_root(RootId(1), Some(left), Default::default()).unwrap();
//! router.add_root(RootId(2), Some(right), Default::default()).unwrap();
//! assert!(router.add_root(RootId(1), None, Default::default()).is_err());
//! assert_eq!(router.roots().count(), 2);
//! ```

use alloc::vec::Vec;
use core::fmt::Debug;

use kurbo::Rect;
use tracing::{debug, warn};

use crate::config::DispatchConfig;
use crate::dispatcher::Dispatcher;
use crate::error::RouterError;
use crate::handler::EventSink;
use crate::navigation::NavigationGeometry;
use crate::raycast::Raycaster;
use crate::sample::InputSample;
use crate::types::RootId;

/// Dispatches one input stream to several UI roots.
#[derive(Debug)]
pub struct MultiRootRouter<K: Copy + Eq> {
    roots: Vec<Dispatcher<K>>,
}

impl<K: Copy + Eq> Default for MultiRootRouter<K> {
    fn default() -> Self {
        Self { roots: Vec::new() }
    }
}

impl<K: Copy + Eq + Debug> MultiRootRouter<K> {
    /// Create a router with no roots.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a root. Roots are processed in registration order.
    pub fn add_root(
        &mut self,
        id: RootId,
        viewport: Option<Rect>,
        config: DispatchConfig,
    ) -> Result<(), RouterError> {
        if self.root(id).is_some() {
            warn!(root = ?id, "root registered twice");
            return Err(RouterError::DuplicateRoot(id));
        }
        let mut dispatcher = Dispatcher::new(config).with_root(id);
        dispatcher.set_viewport(viewport);
        self.roots.push(dispatcher);
        debug!(root = ?id, ?viewport, "added root");
        Ok(())
    }

    /// Unregister a root, delivering cleanup for its pointers through `sink`.
    pub fn remove_root<S>(&mut self, id: RootId, sink: &mut S) -> Result<(), RouterError>
    where
        S: EventSink<K> + ?Sized,
    {
        let ix = self
            .roots
            .iter()
            .position(|root| root.root() == id)
            .ok_or(RouterError::UnknownRoot(id))?;
        let mut dispatcher = self.roots.remove(ix);
        let ids: Vec<_> = dispatcher.pointer_ids().collect();
        for pointer in ids {
            dispatcher.end_pointer(pointer, sink);
        }
        debug!(root = ?id, "removed root");
        Ok(())
    }

    /// The dispatcher for a root.
    pub fn root(&self, id: RootId) -> Option<&Dispatcher<K>> {
        self.roots.iter().find(|root| root.root() == id)
    }

    /// Mutable access to the dispatcher for a root.
    pub fn root_mut(&mut self, id: RootId) -> Option<&mut Dispatcher<K>> {
        self.roots.iter_mut().find(|root| root.root() == id)
    }

    /// All roots in processing order.
    pub fn roots(&self) -> impl Iterator<Item = &Dispatcher<K>> + '_ {
        self.roots.iter()
    }

    /// Buffer a sample for the next tick.
    pub fn push_sample(&mut self, sample: InputSample) {
        match sample.root() {
            Some(id) => match self.root_mut(id) {
                Some(root) => root.push_sample(sample),
                None => warn!(root = ?id, "navigation sample for unknown root"),
            },
            None => {
                for root in &mut self.roots {
                    root.push_sample(sample);
                }
            }
        }
    }

    /// Run one tick for every root, in registration order.
    pub fn process_tick<R, G, S>(&mut self, now: f64, raycaster: &R, geometry: &G, sink: &mut S)
    where
        R: Raycaster<K> + ?Sized,
        G: NavigationGeometry<K> + ?Sized,
        S: EventSink<K> + ?Sized,
    {
        for root in &mut self.roots {
            root.process_tick(now, raycaster, geometry, sink);
        }
    }
}
