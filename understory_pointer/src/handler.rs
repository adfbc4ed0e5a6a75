// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The consumer side of dispatch: how targets advertise handlers and receive events.
//!
//! The engine never calls into a target that lacks the capability for an event,
//! and never calls into a target whose capabilities lookup returns `None` (a
//! target destroyed earlier in the tick). Both cases are silent skips.
//!
//! ## Minimal example
//!
//! ```
//! use understory_pointer::event::{Capabilities, EventKind, UiEvent};
//! use understory_pointer::handler::{EventSink, HandlerContext};
//!
//! /// Every target is a slider: it wants immediate drags.
//! struct Sliders;
//!
//! impl EventSink<u32> for Sliders {
//!     fn capabilities(&self, _target: u32) -> Option<Capabilities> {
//!         Some(Capabilities::DRAGGABLE | Capabilities::POINTER_DOWN)
//!     }
//!
//!     fn handle(&mut self, event: &UiEvent<u32>, cx: &mut HandlerContext<u32>) {
//!         if event.kind == EventKind::InitializePotentialDrag {
//!             cx.set_use_drag_threshold(false);
//!         }
//!     }
//! }
//! # let _ = Sliders;
//! ```

use crate::event::{Capabilities, UiEvent};

/// Receives events for targets of type `K`.
pub trait EventSink<K> {
    /// Handlers implemented by `target`, or `None` if the target no longer exists.
    fn capabilities(&self, target: K) -> Option<Capabilities>;

    /// Handle one event.
    ///
    /// Requests made through `cx` are applied as soon as this call returns,
    /// before the engine takes its next step.
    fn handle(&mut self, event: &UiEvent<K>, cx: &mut HandlerContext<K>);
}

/// A selection change requested by a handler.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SelectionRequest<K> {
    /// Select the given target.
    Select(K),
    /// Clear the selection.
    Clear,
}

/// Requests a handler can make while handling an event.
#[derive(Debug)]
pub struct HandlerContext<K> {
    current_selected: Option<K>,
    use_drag_threshold: Option<bool>,
    selection: Option<SelectionRequest<K>>,
}

impl<K: Copy> HandlerContext<K> {
    pub(crate) fn new(current_selected: Option<K>) -> Self {
        Self {
            current_selected,
            use_drag_threshold: None,
            selection: None,
        }
    }

    /// The selection at the time of delivery.
    pub fn current_selected(&self) -> Option<K> {
        self.current_selected
    }

    /// Override whether the pending drag waits for the drag threshold.
    ///
    /// Only meaningful while handling
    /// [`InitializePotentialDrag`](crate::event::EventKind::InitializePotentialDrag).
    pub fn set_use_drag_threshold(&mut self, use_threshold: bool) {
        self.use_drag_threshold = Some(use_threshold);
    }

    /// Select `target` in the root that delivered this event.
    pub fn select(&mut self, target: K) {
        self.selection = Some(SelectionRequest::Select(target));
    }

    /// Clear the selection of the root that delivered this event.
    pub fn clear_selection(&mut self) {
        self.selection = Some(SelectionRequest::Clear);
    }

    pub(crate) fn drag_threshold_override(&self) -> Option<bool> {
        self.use_drag_threshold
    }

    pub(crate) fn take_selection(&mut self) -> Option<SelectionRequest<K>> {
        self.selection.take()
    }
}
