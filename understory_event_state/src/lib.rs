// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_event_state --heading-base-level=0

//! Understory Event State: small interaction state machines for UI input.
//!
//! This crate provides focused building blocks for the stateful parts of pointer
//! and navigation handling. Each module handles one interaction pattern and knows
//! nothing about scene graphs or event delivery:
//!
//! - [`click`]: Multi-click counting with time and distance tolerance
//! - [`drag`]: Press tracking with a drag threshold and movement deltas
//! - [`hover`]: Exit/enter transitions between leaf→root hover chains
//! - [`navigate`]: Axis→direction quantization and move-repeat pacing
//!
//! The `understory_pointer` dispatch engine composes these into a full pointer
//! pipeline, but each piece is usable on its own.
//!
//! ## Usage Patterns
//!
//! ### Hover Tracking
//!
//! ```rust
//! use understory_event_state::hover::{HoverEvent, HoverState};
//!
//! let mut hover = HoverState::new();
//!
//! // Pointer enters a nested element, chain ordered leaf→root: [child, parent, root]
//! let plan = hover.update_chain(&[3, 2, 1]);
//! assert_eq!(plan.as_slice(), &[
//!     HoverEvent::Enter(3),
//!     HoverEvent::Enter(2),
//!     HoverEvent::Enter(1),
//! ]);
//!
//! // Pointer moves to a sibling: only the leaf changes.
//! let plan = hover.update_chain(&[4, 2, 1]);
//! assert_eq!(plan.as_slice(), &[HoverEvent::Exit(3), HoverEvent::Enter(4)]);
//! ```
//!
//! ### Click Counting
//!
//! The detector is a pure function of the previous click and the new press:
//!
//! ```rust
//! use kurbo::Point;
//! use understory_event_state::click::{ClickSettings, ClickState};
//!
//! let settings = ClickSettings { speed: 0.3, distance: 10.0 };
//! let mut click = ClickState::default();
//!
//! let d = click.detect(1.0, Point::new(10.0, 10.0), &settings);
//! click.apply(&d, Point::new(10.0, 10.0));
//! assert_eq!(click.click_count, 1);
//!
//! let d = click.detect(1.2, Point::new(11.0, 10.0), &settings);
//! assert_eq!(d.click_count, 2);
//! ```
//!
//! ### Drag Thresholds
//!
//! ```rust
//! use kurbo::Point;
//! use understory_event_state::drag::DragState;
//!
//! let mut drag = DragState::default();
//! drag.track(Point::new(10.0, 10.0));
//! assert!(!drag.should_begin(Point::new(12.0, 10.0), 10.0, true));
//! assert!(drag.should_begin(Point::new(12.0, 10.0), 10.0, false));
//! ```
//!
//! ### Navigation Repeat
//!
//! ```rust
//! use kurbo::Vec2;
//! use understory_event_state::navigate::{classify, MoveRepeat, RepeatSettings};
//!
//! let settings = RepeatSettings { delay: 0.5, rate: 0.1 };
//! let mut repeat = MoveRepeat::default();
//! let dir = classify(Vec2::new(0.0, -1.0), 0.5, 1.0);
//! assert!(repeat.update(dir, 0.0, &settings));
//! assert!(!repeat.update(dir, 0.2, &settings));
//! ```
//!
//! ## Features
//!
//! - `std` (default): build Kurbo with the standard library.
//! - `libm`: build Kurbo's float functions with `libm` for `no_std` targets.
//!
//! This crate is `no_std` compatible (with `alloc`) for all modules.

#![no_std]

extern crate alloc;

pub mod click;
pub mod drag;
pub mod hover;
pub mod navigate;
