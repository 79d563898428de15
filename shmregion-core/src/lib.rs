//! shmregion Core Library
//!
//! Named, OS-backed shared memory regions for inter-process communication.
//! Provides the `SharedRegion` handle, region name encoding, text layout,
//! configuration parsing and the error taxonomy.

pub mod config;
pub mod error;
pub mod name;
pub mod shm;
pub mod state;

// Re-export commonly used types
pub use config::{Config, ConfigLoader, RegionConfig};
pub use error::{FaultKind, HardValidationError, RegionError, RegionResult, SharedMemoryError};
pub use name::RegionName;
pub use shm::{RegionInfo, SharedRegion, TextEncoding};
pub use state::{Origin, RegionState};
