// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A gamepad-driven mouse.
//!
//! [`VirtualCursor`] integrates a stick into a screen position and produces the
//! same samples a physical mouse would, so the rest of the engine cannot tell the
//! difference.

use kurbo::{Point, Rect, Vec2};

use crate::sample::InputSample;
use crate::types::{ButtonChannel, PointerId, PointerKind};

/// A virtual MouseOrPen device steered by an analog stick.
#[derive(Clone, Debug)]
pub struct VirtualCursor {
    source: PointerId,
    position: Point,
    bounds: Rect,
    /// Pixels per second at full stick deflection.
    pub cursor_speed: f64,
    /// Raw scroll units per second at full deflection.
    pub scroll_speed: f64,
    last_time: Option<f64>,
    buttons: [bool; 3],
}

impl VirtualCursor {
    /// A cursor for `source`, starting at `position` and confined to `bounds`.
    pub fn new(source: PointerId, position: Point, bounds: Rect) -> Self {
        Self {
            source,
            position: clamp(position, bounds),
            bounds,
            cursor_speed: 1000.0,
            scroll_speed: 45.0,
            last_time: None,
            buttons: [false; 3],
        }
    }

    /// The source id samples are attributed to.
    pub fn source(&self) -> PointerId {
        self.source
    }

    /// Current cursor position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Change the confining rectangle, pulling the cursor inside it.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.position = clamp(self.position, bounds);
    }

    /// Advance to `now` with the stick at `stick` (`+y` up), returning the new position.
    ///
    /// The first call only records the time.
    pub fn step(&mut self, now: f64, stick: Vec2) -> InputSample {
        let dt = self.last_time.map_or(0.0, |last| (now - last).max(0.0));
        self.last_time = Some(now);
        let motion = Vec2::new(stick.x, -stick.y) * self.cursor_speed * dt;
        self.position = clamp(self.position + motion, self.bounds);
        InputSample::Point {
            source: self.source,
            kind: PointerKind::MouseOrPen,
            position: self.position,
        }
    }

    /// Scroll sample for a scroll stick over `dt` seconds, or `None` at rest.
    pub fn scroll(&self, stick: Vec2, dt: f64) -> Option<InputSample> {
        let delta = stick * self.scroll_speed * dt;
        (delta != Vec2::ZERO).then_some(InputSample::Scroll {
            source: self.source,
            delta,
        })
    }

    /// Button sample when `channel`'s level changes.
    pub fn button(&mut self, channel: ButtonChannel, pressed: bool) -> Option<InputSample> {
        let level = &mut self.buttons[channel.index()];
        if *level == pressed {
            return None;
        }
        *level = pressed;
        Some(InputSample::Button {
            source: self.source,
            channel,
            pressed,
        })
    }
}

fn clamp(point: Point, bounds: Rect) -> Point {
    let bounds = bounds.abs();
    Point::new(
        point.x.clamp(bounds.x0, bounds.x1),
        point.y.clamp(bounds.y0, bounds.y1),
    )
}
