// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Region lifecycle states.
//!
//! Implements the region lifecycle: Unattached → Attached → Unattached.
//! A failed attach leaves the state unchanged; there is no error state.

use serde::Serialize;

/// Lifecycle state of a [`crate::shm::SharedRegion`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RegionState {
    /// No mapping held. Reads and writes are rejected.
    Unattached,

    /// Mapped into this process and usable.
    Attached,
}

impl RegionState {
    /// Get the state name for error messages.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Unattached => "Unattached",
            Self::Attached => "Attached",
        }
    }
}

impl std::fmt::Display for RegionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How an attached region came to exist in this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Origin {
    /// This instance created the OS object.
    Created,

    /// This instance opened an object someone else created.
    Connected,
}

impl Origin {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Created => "Created",
            Self::Connected => "Connected",
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
