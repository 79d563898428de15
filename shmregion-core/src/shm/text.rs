// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Ankit Kumar Pandey

//! Fixed-width text layout for region text accessors.
//!
//! Writer and reader must agree on the encoding. Text is stored as a run of
//! code units with no length prefix and no terminator:
//!
//! | encoding  | bytes per unit | byte order    |
//! |-----------|----------------|---------------|
//! | `utf16le` | 2              | little-endian |
//! | `utf8`    | 1              | n/a           |

use serde::{Deserialize, Serialize};

/// Encoding used by `write_text` / `read_text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// UTF-16 code units, 2 bytes each, little-endian.
    #[default]
    Utf16Le,
    /// UTF-8 code units, 1 byte each.
    Utf8,
}

impl TextEncoding {
    /// Bytes per code unit.
    pub const fn unit_width(&self) -> usize {
        match self {
            Self::Utf16Le => 2,
            Self::Utf8 => 1,
        }
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Self::Utf16Le => "utf16le",
            Self::Utf8 => "utf8",
        }
    }

    /// Encode `text` into its in-region byte layout.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            Self::Utf8 => text.as_bytes().to_vec(),
        }
    }

    /// Decode a run of code units, stopping at the first NUL unit.
    ///
    /// Invalid sequences decode to U+FFFD. A trailing odd byte in UTF-16 is
    /// ignored.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            Self::Utf16Le => {
                let units: Vec<u16> = bytes
                    .chunks_exact(2)
                    .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
                    .take_while(|&unit| unit != 0)
                    .collect();
                String::from_utf16_lossy(&units)
            }
            Self::Utf8 => {
                let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
                String::from_utf8_lossy(&bytes[..end]).into_owned()
            }
        }
    }
}

impl std::fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
