// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! CLI command modules.

use clap::ValueEnum;
use thiserror::Error;

use shmregion_core::{SharedMemoryError, SharedRegion};

use crate::RegionArgs;

pub mod create;
pub mod info;
pub mod read;
pub mod smoke;
pub mod validate;
pub mod watch;
pub mod write;

/// Errors raised by the command handlers themselves.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Invalid {kind} value '{value}': {reason}")]
    InvalidValue {
        kind: &'static str,
        value: String,
        reason: String,
    },

    #[error("Smoke test failed: {failed} of {total} checks")]
    SmokeFailed { failed: usize, total: usize },
}

/// Typed value layouts supported by `read` and `write`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ValueKind {
    /// 4-byte little-endian signed integer
    Int,
    /// 1 byte, zero is false
    Bool,
    /// 1 unsigned byte
    Byte,
    /// Code units in the configured text encoding
    Text,
}

impl ValueKind {
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Bool => "bool",
            Self::Byte => "byte",
            Self::Text => "text",
        }
    }

    /// Byte width of fixed-size kinds.
    pub const fn fixed_width(&self) -> Option<usize> {
        match self {
            Self::Int => Some(4),
            Self::Bool | Self::Byte => Some(1),
            Self::Text => None,
        }
    }
}

/// Connect to an existing region.
pub fn connect(args: &RegionArgs) -> Result<SharedRegion, SharedMemoryError> {
    let mut region = SharedRegion::new();
    region.try_connect(&args.name, args.capacity)?;
    Ok(region)
}

/// Reject an access up front instead of letting the typed accessor panic.
pub fn ensure_fits(
    region: &SharedRegion,
    offset: usize,
    length: usize,
) -> Result<(), SharedMemoryError> {
    let capacity = region.capacity();
    match offset.checked_add(length) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(SharedMemoryError::BoundsViolation {
            offset,
            length,
            capacity,
        }),
    }
}
