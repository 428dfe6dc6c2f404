// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! File handle configuration
//!
//! Options can be built in code or read from YAML:
//!
//! ```yaml
//! link_extension: ".ln"
//! digest: sha256
//! digest_buffer_size: 16384
//! creation_mode: private
//! stable_age_ms: 2000
//! ```

use crate::digest::DigestAlgorithm;
use crate::error::Result;
use crate::sys::CreationMode;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Suffix that marks a portable link file
pub const DEFAULT_LINK_EXTENSION: &str = ".ln";

/// Block size used when streaming a file through the digest
pub const DEFAULT_DIGEST_BUFFER_SIZE: usize = 65536;

/// Age a file must reach before the path-based stability check accepts it
pub const DEFAULT_STABLE_AGE_MS: u64 = 5000;

/// Per-handle configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileOptions {
    /// Reserved suffix of portable link files
    pub link_extension: String,

    /// Hash function behind `FileHandle::digest`
    pub digest: DigestAlgorithm,

    /// Read block size while digesting
    pub digest_buffer_size: usize,

    /// Permission for files and directories created by `output`.
    /// `None` uses the process-wide mode from [`crate::sys::creation_mode`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creation_mode: Option<CreationMode>,

    /// Minimum age for [`crate::sys::file_stable`]
    pub stable_age_ms: u64,
}

impl Default for FileOptions {
    fn default() -> Self {
        Self {
            link_extension: DEFAULT_LINK_EXTENSION.to_string(),
            digest: DigestAlgorithm::default(),
            digest_buffer_size: DEFAULT_DIGEST_BUFFER_SIZE,
            creation_mode: None,
            stable_age_ms: DEFAULT_STABLE_AGE_MS,
        }
    }
}

impl FileOptions {
    /// Parse options from a YAML document. Missing keys take defaults.
    pub fn from_yaml(text: &str) -> Result<Self> {
        let options: FileOptions = serde_yaml_ng::from_str(text)?;
        options.validate()?;
        Ok(options)
    }

    /// Read options from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| crate::Error::io(path, e))?;
        Self::from_yaml(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.link_extension.is_empty() {
            return Err(crate::Error::Config(
                "link_extension must not be empty".to_string(),
            ));
        }
        if self.digest_buffer_size == 0 {
            return Err(crate::Error::Config(
                "digest_buffer_size must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// Creation mode in effect for this handle
    #[must_use]
    pub fn effective_creation_mode(&self) -> CreationMode {
        self.creation_mode.unwrap_or_else(crate::sys::creation_mode)
    }

    #[must_use]
    pub fn stable_age(&self) -> Duration {
        Duration::from_millis(self.stable_age_ms)
    }
}
