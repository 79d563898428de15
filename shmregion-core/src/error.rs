// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Custom error types for shmregion.
//!
//! This module defines explicit enum error types as per coding guidelines.
//! No `Box<dyn Error>`, no `anyhow::Result` - all errors are strongly typed.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for the shmregion library.
#[derive(Debug, Error)]
pub enum RegionError {
    // =========================================================================
    // Configuration Errors - Fail-Fast on Invalid Config
    // =========================================================================
    #[error("Hard validation error: {0}")]
    HardValidation(#[from] HardValidationError),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("Process-wide configuration is already initialized")]
    ConfigAlreadyInstalled,

    // =========================================================================
    // Shared Memory Errors
    // =========================================================================
    #[error("Shared memory error: {0}")]
    SharedMemory(#[from] SharedMemoryError),

    // =========================================================================
    // System Errors
    // =========================================================================
    #[error("IO error: {context} - {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Hard validation errors for configuration values and region names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HardValidationError {
    #[error("Invalid field value: {field} = {value} - {reason}")]
    InvalidFieldValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid region name '{name}': {reason}")]
    InvalidRegionName { name: String, reason: String },
}

/// Classification of a [`SharedMemoryError`].
///
/// `AttachFailure` is expected at runtime and recoverable. The other two are
/// programmer errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    AttachFailure,
    InvalidState,
    BoundsViolation,
}

/// Shared memory errors.
#[derive(Debug, Error)]
pub enum SharedMemoryError {
    #[error("Failed to create shared memory region: {name} - {reason}")]
    CreateFailed { name: String, reason: String },

    #[error("Failed to open shared memory region: {name} - {reason}")]
    OpenFailed { name: String, reason: String },

    #[error("Failed to map shared memory region: {name} - {reason}")]
    MapFailed { name: String, reason: String },

    #[error("Invalid region name: {0}")]
    InvalidName(#[from] HardValidationError),

    #[error("Invalid capacity {capacity}: {reason}")]
    InvalidCapacity { capacity: usize, reason: String },

    #[error("Shared memory already attached to '{name}'")]
    AlreadyAttached { name: String },

    #[error("Cannot {operation}: shared memory is not attached")]
    NotAttached { operation: &'static str },

    #[error("Exceeded shared memory size: offset {offset} + length {length} > capacity {capacity}")]
    BoundsViolation {
        offset: usize,
        length: usize,
        capacity: usize,
    },
}

impl SharedMemoryError {
    /// Which part of the fault taxonomy this error belongs to.
    pub fn kind(&self) -> FaultKind {
        match self {
            Self::CreateFailed { .. }
            | Self::OpenFailed { .. }
            | Self::MapFailed { .. }
            | Self::InvalidName(_)
            | Self::InvalidCapacity { .. } => FaultKind::AttachFailure,
            Self::AlreadyAttached { .. } | Self::NotAttached { .. } => FaultKind::InvalidState,
            Self::BoundsViolation { .. } => FaultKind::BoundsViolation,
        }
    }

    /// True for misuse of the API (wrong state, out of bounds).
    pub fn is_programmer_error(&self) -> bool {
        self.kind() != FaultKind::AttachFailure
    }
}

/// Result type alias using RegionError.
pub type RegionResult<T> = Result<T, RegionError>;
