// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Directional navigation helpers: quantize a 2D axis and pace repeated moves.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Vec2;
//! use understory_event_state::navigate::{classify, MoveDirection, MoveRepeat, RepeatSettings};
//!
//! let settings = RepeatSettings { delay: 0.5, rate: 0.1 };
//! let mut repeat = MoveRepeat::default();
//!
//! let dir = classify(Vec2::new(1.0, 0.5), 0.5, 1.0);
//! assert_eq!(dir, Some(MoveDirection::Right));
//!
//! assert!(repeat.update(dir, 0.0, &settings)); // first move fires immediately
//! assert!(!repeat.update(dir, 0.4, &settings)); // still inside the initial delay
//! assert!(repeat.update(dir, 0.5, &settings)); // first repeat
//! assert!(repeat.update(dir, 0.7, &settings)); // subsequent repeats at `rate`
//! ```

use kurbo::Vec2;

/// A discrete navigation direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MoveDirection {
    /// Towards negative x.
    Left,
    /// Towards positive axis y.
    Up,
    /// Towards positive x.
    Right,
    /// Towards negative axis y.
    Down,
}

/// Quantize a navigation axis into a direction.
///
/// Axis values use "stick" orientation: `+y` is up. Returns `None` when the axis
/// magnitude is below `deadzone`. The horizontal component wins when
/// `|x| * diagonal_bias > |y|`, so a bias above `1.0` favours left/right on diagonals.
pub fn classify(axis: Vec2, deadzone: f64, diagonal_bias: f64) -> Option<MoveDirection> {
    if axis.hypot2() < deadzone * deadzone || axis.hypot2() == 0.0 {
        return None;
    }
    Some(if axis.x.abs() * diagonal_bias > axis.y.abs() {
        if axis.x > 0.0 {
            MoveDirection::Right
        } else {
            MoveDirection::Left
        }
    } else if axis.y > 0.0 {
        MoveDirection::Up
    } else {
        MoveDirection::Down
    })
}

/// Repeat pacing for held navigation input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RepeatSettings {
    /// Time before the first repeat of a held direction.
    pub delay: f64,
    /// Time between subsequent repeats.
    pub rate: f64,
}

/// Move repeat timer.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MoveRepeat {
    /// Direction of the last emitted move.
    pub last_direction: Option<MoveDirection>,
    /// Moves emitted since the direction last changed.
    pub consecutive: u32,
    /// Time of the last emitted move.
    pub last_move_time: f64,
}

impl MoveRepeat {
    /// Feed the current direction at `now`; returns `true` if a move should fire.
    ///
    /// A changed direction fires immediately. A held direction fires again after
    /// `delay` and then every `rate`. At most one move fires per call, however much
    /// time has elapsed.
    pub fn update(
        &mut self,
        direction: Option<MoveDirection>,
        now: f64,
        settings: &RepeatSettings,
    ) -> bool {
        let Some(direction) = direction else {
            self.reset();
            return false;
        };
        if self.last_direction != Some(direction) {
            self.consecutive = 0;
        }
        let elapsed = now - self.last_move_time;
        let fire = match self.consecutive {
            0 => true,
            1 => elapsed >= settings.delay,
            _ => elapsed >= settings.rate,
        };
        if fire {
            self.last_direction = Some(direction);
            self.consecutive = self.consecutive.saturating_add(1);
            self.last_move_time = now;
        }
        fire
    }

    /// Forget the held direction.
    pub fn reset(&mut self) {
        self.last_direction = None;
        self.consecutive = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS: RepeatSettings = RepeatSettings {
        delay: 0.5,
        rate: 0.1,
    };

    #[test]
    fn dominant_axis_decides() {
        assert_eq!(
            classify(Vec2::new(1.0, 0.5), 0.5, 1.0),
            Some(MoveDirection::Right)
        );
        assert_eq!(
            classify(Vec2::new(-0.5, 1.0), 0.5, 1.0),
            Some(MoveDirection::Up)
        );
        assert_eq!(
            classify(Vec2::new(0.5, -1.0), 0.5, 1.0),
            Some(MoveDirection::Down)
        );
        assert_eq!(
            classify(Vec2::new(-1.0, 0.0), 0.5, 1.0),
            Some(MoveDirection::Left)
        );
    }

    #[test]
    fn exact_diagonal_is_vertical_without_bias() {
        assert_eq!(
            classify(Vec2::new(1.0, 1.0), 0.5, 1.0),
            Some(MoveDirection::Up)
        );
        assert_eq!(
            classify(Vec2::new(1.0, 1.0), 0.5, 1.5),
            Some(MoveDirection::Right)
        );
    }

    #[test]
    fn deadzone_filters_small_input() {
        assert_eq!(classify(Vec2::new(0.3, 0.3), 0.5, 1.0), None);
        assert_eq!(classify(Vec2::ZERO, 0.0, 1.0), None);
    }

    #[test]
    fn direction_change_fires_immediately() {
        let mut repeat = MoveRepeat::default();
        assert!(repeat.update(Some(MoveDirection::Right), 0.0, &SETTINGS));
        assert!(repeat.update(Some(MoveDirection::Left), 0.01, &SETTINGS));
        assert_eq!(repeat.consecutive, 1);
    }

    // A long tick never produces more than one move.
    #[test]
    fn long_gap_fires_once() {
        let mut repeat = MoveRepeat::default();
        assert!(repeat.update(Some(MoveDirection::Down), 0.0, &SETTINGS));
        assert!(repeat.update(Some(MoveDirection::Down), 10.0, &SETTINGS));
        assert!(!repeat.update(Some(MoveDirection::Down), 10.05, &SETTINGS));
        assert!(repeat.update(Some(MoveDirection::Down), 10.2, &SETTINGS));
    }

    #[test]
    fn releasing_resets() {
        let mut repeat = MoveRepeat::default();
        assert!(repeat.update(Some(MoveDirection::Up), 0.0, &SETTINGS));
        assert!(!repeat.update(None, 0.1, &SETTINGS));
        assert_eq!(repeat.last_direction, None);
        assert!(repeat.update(Some(MoveDirection::Up), 0.2, &SETTINGS));
    }
}
