// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatch configuration.

use understory_event_state::click::ClickSettings;
use understory_event_state::navigate::RepeatSettings;

use crate::raycast::UiPlane;

/// How many logical pointers concurrent devices produce.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConsolidationPolicy {
    /// Every device and touch contact drives one shared pointer.
    SingleUnifiedPointer,
    /// Every device and touch contact gets its own pointer.
    AllPointersAsIs,
    /// Mice and pens share one pointer; each touch contact and tracked device gets
    /// its own. Touch or tracked activity retires the mouse/pen pointer.
    #[default]
    SingleMouseOrPenButMultiTouchAndTrack,
}

/// Tunables for a [`Dispatcher`](crate::dispatcher::Dispatcher).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DispatchConfig {
    /// Maximum seconds between clicks of a multi-click.
    pub click_speed: f64,
    /// Maximum pixels between presses of a multi-click.
    pub click_distance: f64,
    /// Pixels a press must travel before a drag begins.
    pub drag_threshold: f64,
    /// Seconds before a held navigation direction first repeats.
    pub move_repeat_delay: f64,
    /// Seconds between later repeats.
    pub move_repeat_rate: f64,
    /// Navigation axis magnitude below which input is ignored.
    pub navigation_deadzone: f64,
    /// Horizontal preference when classifying diagonal navigation input.
    pub diagonal_bias: f64,
    /// Pointer consolidation policy.
    pub consolidation: ConsolidationPolicy,
    /// Whether a press on empty space clears the selection.
    pub deselect_on_background_click: bool,
    /// Whether navigation input produces move events.
    pub send_navigation_events: bool,
    /// Raw scroll units per reported scroll line.
    pub scroll_pixels_per_line: f64,
    /// Projection plane for tracked pointers.
    pub ui_plane: UiPlane,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            click_speed: 0.3,
            click_distance: 10.0,
            drag_threshold: 10.0,
            move_repeat_delay: 0.5,
            move_repeat_rate: 0.1,
            navigation_deadzone: 0.5,
            diagonal_bias: 1.0,
            consolidation: ConsolidationPolicy::default(),
            deselect_on_background_click: true,
            send_navigation_events: true,
            scroll_pixels_per_line: 20.0,
            ui_plane: UiPlane::default(),
        }
    }
}

impl DispatchConfig {
    pub(crate) fn click_settings(&self) -> ClickSettings {
        ClickSettings {
            speed: self.click_speed,
            distance: self.click_distance,
        }
    }

    pub(crate) fn repeat_settings(&self) -> RepeatSettings {
        RepeatSettings {
            delay: self.move_repeat_delay,
            rate: self.move_repeat_rate,
        }
    }
}
