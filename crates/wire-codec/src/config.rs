// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for config operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error while reading.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Config text is not a valid [`CodecConfig`].
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Output knobs for [`dump_with`](crate::dump_with) and [`dumps`](crate::dumps).
///
/// Every field has a default, so a config file only names what it changes:
///
/// ```json
/// { "indent": null, "gzip_level": 6 }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Spaces per nesting level; `None` writes compact JSON.
    pub indent: Option<usize>,
    /// gzip compression level, 0 to 9.
    pub gzip_level: u32,
    /// bzip2 block size, 1 to 9.
    pub bzip2_level: u32,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            indent: Some(2),
            gzip_level: 9,
            bzip2_level: 9,
        }
    }
}

impl CodecConfig {
    /// Parses a JSON config blob. An empty blob yields the defaults.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, ConfigError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Loads the config at `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match fs::read(path) {
            Ok(bytes) => Self::from_json_slice(&bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }
}
