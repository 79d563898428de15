// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Shared Memory IPC module.
//!
//! Named POSIX shared memory regions with bounds-checked raw and typed
//! access. No synchronization between processes is provided.

mod mapping;
mod region;
mod text;

pub use region::{RegionInfo, SharedRegion};
pub use text::TextEncoding;
