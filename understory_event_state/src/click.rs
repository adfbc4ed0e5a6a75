// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click detection: decide whether a press continues a multi-click sequence.
//!
//! ## Usage
//!
//! 1) Keep one [`ClickState`] per pointer button.
//! 2) When the button goes down, deliver your "pointer down" notification first, so
//!    listeners observe the *previous* click count.
//! 3) Call [`ClickState::detect`] with the press time and position, then
//!    [`ClickState::apply`] the result before notifying drag initialization.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use understory_event_state::click::{ClickSettings, ClickState};
//!
//! let settings = ClickSettings::default();
//! let mut click = ClickState::default();
//!
//! let first = click.detect(1.0, Point::new(5.0, 5.0), &settings);
//! assert_eq!(first.click_count, 1);
//! click.apply(&first, Point::new(5.0, 5.0));
//!
//! // A second press shortly after, at the same spot, is a double click.
//! let second = click.detect(1.2, Point::new(5.0, 5.0), &settings);
//! assert_eq!(second.click_count, 2);
//! assert_eq!(second.click_time, 1.2);
//! ```

use kurbo::Point;

/// Temporal and spatial tolerance for repeated clicks.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClickSettings {
    /// Maximum time in seconds between the previous click and a new press.
    pub speed: f64,
    /// Maximum distance between the previous press position and a new press.
    pub distance: f64,
}

impl Default for ClickSettings {
    fn default() -> Self {
        Self {
            speed: 0.3,
            distance: 10.0,
        }
    }
}

/// Click history for one button.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ClickState {
    /// Time of the most recent detected click.
    pub click_time: f64,
    /// Number of clicks in the current sequence; `0` before the first press.
    pub click_count: u32,
    /// Press position that produced the most recent click.
    pub position: Point,
}

/// The outcome of [`ClickState::detect`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ClickDetection {
    /// Timestamp of this press.
    pub click_time: f64,
    /// Updated click count.
    pub click_count: u32,
    /// Always `true`: a fresh press is eligible for a click until something cancels it.
    pub eligible_for_click: bool,
    /// Default drag-threshold policy for the press. Listeners may override it.
    pub use_drag_threshold: bool,
}

impl ClickState {
    /// Decide the click count for a press at `now` and `position`.
    ///
    /// The count increments when the press falls within both the speed and the
    /// distance tolerance of the previous click, and restarts at `1` otherwise.
    /// This does not mutate `self`; see [`ClickState::apply`].
    pub fn detect(&self, now: f64, position: Point, settings: &ClickSettings) -> ClickDetection {
        let within_time = now - self.click_time <= settings.speed;
        let within_distance =
            (position - self.position).hypot2() <= settings.distance * settings.distance;
        let click_count = if within_time && within_distance {
            self.click_count.saturating_add(1)
        } else {
            1
        };
        ClickDetection {
            click_time: now,
            click_count,
            eligible_for_click: true,
            use_drag_threshold: true,
        }
    }

    /// Record a detection result made at `position`.
    pub fn apply(&mut self, detection: &ClickDetection, position: Point) {
        self.click_time = detection.click_time;
        self.click_count = detection.click_count;
        self.position = position;
    }
}

/// Free-function form of [`ClickState::detect`].
pub fn detect(
    state: &ClickState,
    now: f64,
    position: Point,
    settings: &ClickSettings,
) -> ClickDetection {
    state.detect(now, position, settings)
}
