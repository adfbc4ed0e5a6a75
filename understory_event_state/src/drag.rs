// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag tracking: follow a pressed pointer and decide when motion becomes a drag.
//!
//! ## Usage
//!
//! 1) When a button goes down on something draggable, call [`DragState::track`] with the
//!    press position.
//! 2) On each motion, ask [`DragState::should_begin`] whether the drag threshold has been
//!    crossed, then call [`DragState::update`] for the incremental delta.
//! 3) Call [`DragState::end`] on release.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.track(Point::new(10.0, 20.0));
//!
//! // Incidental jitter does not start a drag.
//! assert!(!drag.should_begin(Point::new(12.0, 21.0), 10.0, true));
//!
//! // Moving far enough does.
//! assert!(drag.should_begin(Point::new(25.0, 20.0), 10.0, true));
//! let delta = drag.update(Point::new(25.0, 20.0)).unwrap();
//! assert_eq!(delta.x, 15.0);
//! assert_eq!(drag.total_offset(Point::new(25.0, 20.0)).unwrap().x, 15.0);
//! ```

use kurbo::{Point, Vec2};

/// Tracks a potential or active drag for one button.
#[derive(Debug, Clone, Default, Copy, PartialEq)]
pub struct DragState {
    /// Position where tracking started (the press position).
    pub start_pos: Option<Point>,
    /// Last position passed to [`DragState::update`].
    pub last_pos: Option<Point>,
}

impl DragState {
    /// Start tracking from the given press position.
    pub fn track(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Record a new position and return the movement since the last one.
    ///
    /// Returns `None` while not tracking.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.start_pos?;
        let last = self.last_pos.replace(pos)?;
        Some(pos - last)
    }

    /// Offset from the press position, if tracking.
    pub fn total_offset(&self, current_pos: Point) -> Option<Vec2> {
        self.start_pos.map(|start| current_pos - start)
    }

    /// Whether motion to `pos` is enough to begin a drag.
    ///
    /// With `use_threshold == false` any motion away from the press position
    /// qualifies; otherwise the distance from the press position must reach `threshold`.
    pub fn should_begin(&self, pos: Point, threshold: f64, use_threshold: bool) -> bool {
        match self.total_offset(pos) {
            None => false,
            Some(offset) if !use_threshold => offset != Vec2::ZERO,
            Some(offset) => offset.hypot2() >= threshold * threshold,
        }
    }

    /// Stop tracking.
    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
    }

    /// Returns `true` between [`DragState::track`] and [`DragState::end`].
    pub fn is_tracking(&self) -> bool {
        self.start_pos.is_some()
    }
}
