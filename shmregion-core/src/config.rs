// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! YAML configuration parser with strict schema validation.
//!
//! Region defaults (name prefix, permissions, capacity ceiling, unlink policy,
//! text encoding) come from here. A [`RegionConfig`] can be passed to each
//! region explicitly, or installed once as the process-wide default with
//! [`install_global`]. The process-wide value is immutable once set.

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{HardValidationError, RegionError, RegionResult};
use crate::name::check_component;
use crate::shm::TextEncoding;

/// Absolute ceiling for a single region (1 GB).
pub const MAX_REGION_CAPACITY: usize = 1024 * 1024 * 1024;

/// Raw region configuration as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRegionConfig {
    #[serde(default)]
    name_prefix: String,
    #[serde(default = "default_mode")]
    mode: String,
    #[serde(default = "default_max_capacity")]
    max_capacity: usize,
    #[serde(default = "default_unlink_on_close")]
    unlink_on_close: bool,
    #[serde(default)]
    text_encoding: TextEncoding,
}

fn default_mode() -> String {
    "0600".to_string()
}

fn default_max_capacity() -> usize {
    MAX_REGION_CAPACITY
}

fn default_unlink_on_close() -> bool {
    true
}

impl Default for RawRegionConfig {
    fn default() -> Self {
        Self {
            name_prefix: String::new(),
            mode: default_mode(),
            max_capacity: default_max_capacity(),
            unlink_on_close: default_unlink_on_close(),
            text_encoding: TextEncoding::default(),
        }
    }
}

/// Raw root configuration file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    shm: RawRegionConfig,
}

/// Validated region configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionConfig {
    /// Prepended to every region name before it reaches the OS.
    pub name_prefix: String,
    /// Permission bits for newly created objects.
    pub mode: u32,
    /// Largest capacity an attach call accepts.
    pub max_capacity: usize,
    /// Whether the creating instance unlinks the name when it closes.
    pub unlink_on_close: bool,
    /// Layout used by the text accessors.
    pub text_encoding: TextEncoding,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            name_prefix: String::new(),
            mode: 0o600,
            max_capacity: MAX_REGION_CAPACITY,
            unlink_on_close: true,
            text_encoding: TextEncoding::Utf16Le,
        }
    }
}

/// Complete validated configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub shm: RegionConfig,
}

/// Configuration loader with strict validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a YAML file.
    /// Returns HardValidationError for any invalid fields.
    pub fn load_file(path: impl AsRef<Path>) -> RegionResult<Config> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(RegionError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| RegionError::Io {
            context: "reading config file",
            source: e,
        })?;

        Self::load_string(&content)
    }

    /// Load and validate configuration from a YAML string.
    pub fn load_string(content: &str) -> RegionResult<Config> {
        // An empty document means "all defaults".
        if content.trim().is_empty() {
            return Ok(Config {
                shm: RegionConfig::default(),
            });
        }

        let raw: RawConfig =
            serde_yaml::from_str(content).map_err(|e| RegionError::ConfigParse {
                message: format!("YAML parse error: {}", e),
            })?;

        Ok(Config {
            shm: Self::validate_region(raw.shm)?,
        })
    }

    fn validate_region(raw: RawRegionConfig) -> RegionResult<RegionConfig> {
        if !raw.name_prefix.is_empty() {
            check_component(&raw.name_prefix, "Name prefix")?;
        }

        let mode = parse_mode(&raw.mode)?;

        if raw.max_capacity == 0 || raw.max_capacity > MAX_REGION_CAPACITY {
            return Err(HardValidationError::InvalidFieldValue {
                field: "max_capacity",
                value: raw.max_capacity.to_string(),
                reason: format!("Must be between 1 and {} bytes", MAX_REGION_CAPACITY),
            }
            .into());
        }

        Ok(RegionConfig {
            name_prefix: raw.name_prefix,
            mode,
            max_capacity: raw.max_capacity,
            unlink_on_close: raw.unlink_on_close,
            text_encoding: raw.text_encoding,
        })
    }
}

/// Parse an octal permission string such as `"0600"` or `"0o640"`.
fn parse_mode(value: &str) -> Result<u32, HardValidationError> {
    let invalid = |reason: &str| HardValidationError::InvalidFieldValue {
        field: "mode",
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let digits = value.strip_prefix("0o").unwrap_or(value);
    let mode = u32::from_str_radix(digits, 8).map_err(|_| invalid("Must be an octal number"))?;

    if mode > 0o777 {
        return Err(invalid("Only permission bits (0..=0777) are allowed"));
    }
    if mode & 0o600 != 0o600 {
        return Err(invalid("Owner must have read and write permission"));
    }

    Ok(mode)
}

static GLOBAL: OnceLock<RegionConfig> = OnceLock::new();

/// Install the process-wide default configuration.
///
/// Succeeds once. Fails with [`RegionError::ConfigAlreadyInstalled`] if a
/// value was installed before or [`global`] already fell back to defaults.
pub fn install_global(config: RegionConfig) -> RegionResult<()> {
    GLOBAL
        .set(config)
        .map_err(|_| RegionError::ConfigAlreadyInstalled)?;
    tracing::debug!("Installed process-wide region configuration");
    Ok(())
}

/// The process-wide default configuration (defaults if none was installed).
pub fn global() -> &'static RegionConfig {
    GLOBAL.get_or_init(RegionConfig::default)
}
