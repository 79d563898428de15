// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Region names and their platform-native encoding.
//!
//! A region name is user-facing text. The OS sees `/<prefix><name>` as a
//! NUL-terminated C string, which is what `shm_open` and `shm_unlink` take.

use std::ffi::CString;
use std::fmt;

use crate::error::HardValidationError;

/// Longest object name (including the leading `/`) accepted by the OS.
#[cfg(target_os = "macos")]
pub const MAX_OS_NAME_LEN: usize = 31;
#[cfg(not(target_os = "macos"))]
pub const MAX_OS_NAME_LEN: usize = 255;

/// Validated region name.
/// Must be non-empty, contain no `/` or NUL, and not be `.` or `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionName(String);

impl RegionName {
    /// Create a new RegionName with validation.
    pub fn new(name: impl Into<String>) -> Result<Self, HardValidationError> {
        let name = name.into();
        check_component(&name, "Region name")?;
        Ok(Self(name))
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Encode as the OS object name, `/<prefix><name>`.
    pub fn os_name(&self, prefix: &str) -> Result<CString, HardValidationError> {
        let full = format!("/{}{}", prefix, self.0);

        if full.len() > MAX_OS_NAME_LEN {
            return Err(HardValidationError::InvalidRegionName {
                name: self.0.clone(),
                reason: format!(
                    "OS name '{}' is {} bytes (max {})",
                    full,
                    full.len(),
                    MAX_OS_NAME_LEN
                ),
            });
        }

        CString::new(full).map_err(|e| HardValidationError::InvalidRegionName {
            name: self.0.clone(),
            reason: format!("Invalid C string: {}", e),
        })
    }
}

/// Shared rules for names and name prefixes.
pub(crate) fn check_component(value: &str, what: &str) -> Result<(), HardValidationError> {
    let reject = |reason: String| HardValidationError::InvalidRegionName {
        name: value.to_string(),
        reason,
    };

    if value.is_empty() {
        return Err(reject(format!("{} cannot be empty", what)));
    }
    if value.contains('/') {
        return Err(reject(format!("{} must not contain '/'", what)));
    }
    if value.contains('\0') {
        return Err(reject(format!("{} must not contain NUL bytes", what)));
    }
    if value == "." || value == ".." {
        return Err(reject(format!("{} cannot be '.' or '..'", what)));
    }
    Ok(())
}

impl fmt::Display for RegionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for RegionName {
    type Error = HardValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for RegionName {
    type Error = HardValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RegionName> for String {
    fn from(name: RegionName) -> Self {
        name.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_region_name() {
        let name = RegionName::new("test").unwrap();
        assert_eq!(name.as_str(), "test");
        assert_eq!(name.os_name("").unwrap().to_str().unwrap(), "/test");
    }

    #[test]
    fn test_prefix_applied() {
        let name = RegionName::new("counter").unwrap();
        assert_eq!(
            name.os_name("app.").unwrap().to_str().unwrap(),
            "/app.counter"
        );
    }

    #[test]
    fn test_invalid_region_names() {
        assert!(RegionName::new("").is_err());
        assert!(RegionName::new("a/b").is_err());
        assert!(RegionName::new("nul\0byte").is_err());
        assert!(RegionName::new(".").is_err());
        assert!(RegionName::new("..").is_err());
    }

    #[test]
    fn test_os_name_too_long() {
        let name = RegionName::new("x".repeat(MAX_OS_NAME_LEN)).unwrap();
        // The leading '/' pushes it one byte over.
        assert!(name.os_name("").is_err());

        let name = RegionName::new("x".repeat(MAX_OS_NAME_LEN - 1)).unwrap();
        assert!(name.os_name("").is_ok());
    }
}
