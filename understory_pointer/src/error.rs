// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! None of these escape a tick: a malformed raycast result is logged and treated
//! as "no hit" for the affected pointer.

use thiserror::Error;

use crate::types::RootId;

/// A target chain returned by a raycaster could not be used.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ChainError {
    /// The raycaster reported a hit with no targets.
    #[error("raycast returned an empty target chain")]
    Empty,
    /// A target appears twice, so the chain does not describe a tree path.
    #[error("target chain revisits the entry at depth {first} at depth {depth}")]
    Cycle {
        /// Depth of the first occurrence.
        first: usize,
        /// Depth of the repeated occurrence.
        depth: usize,
    },
}

/// Misuse of a [`MultiRootRouter`](crate::router::MultiRootRouter).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum RouterError {
    /// A root with this id already exists.
    #[error("root {0:?} is already registered")]
    DuplicateRoot(RootId),
    /// No root with this id exists.
    #[error("root {0:?} is not registered")]
    UnknownRoot(RootId),
}
