// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Path-level helpers that work without a [`crate::FileHandle`]
//!
//! The creation mode is process-wide: it starts as
//! [`CreationMode::Default`] and stays whatever it was last set to.
//! Handles can override it per instance through
//! [`crate::FileOptions::creation_mode`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::{Duration, SystemTime};

/// Permission applied to newly created files and directories
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreationMode {
    /// Platform default, filtered by the process umask
    #[default]
    Default,
    /// Owner only: files 0o600, directories 0o700
    Private,
}

impl CreationMode {
    #[must_use]
    pub fn file_mode(self) -> u32 {
        match self {
            CreationMode::Default => 0o666,
            CreationMode::Private => 0o600,
        }
    }

    #[must_use]
    pub fn dir_mode(self) -> u32 {
        match self {
            CreationMode::Default => 0o777,
            CreationMode::Private => 0o700,
        }
    }
}

static CREATION_MODE: AtomicU8 = AtomicU8::new(0);

/// Set the process-wide creation mode
pub fn set_creation_mode(mode: CreationMode) {
    let raw = match mode {
        CreationMode::Default => 0,
        CreationMode::Private => 1,
    };
    CREATION_MODE.store(raw, Ordering::Relaxed);
}

/// Current process-wide creation mode
#[must_use]
pub fn creation_mode() -> CreationMode {
    match CREATION_MODE.load(Ordering::Relaxed) {
        1 => CreationMode::Private,
        _ => CreationMode::Default,
    }
}

/// Create subsequent files and directories owner-only
pub fn mode_private() {
    set_creation_mode(CreationMode::Private);
}

/// Restore platform-default creation permissions
pub fn mode_default() {
    set_creation_mode(CreationMode::Default);
}

#[must_use]
pub fn file_exists(path: &Path) -> bool {
    std::fs::metadata(path).is_ok()
}

/// Size in bytes, or `None` if nothing is at `path`
#[must_use]
pub fn file_size(path: &Path) -> Option<u64> {
    std::fs::metadata(path).ok().map(|m| m.len())
}

/// Permission bits, or `None` if nothing is at `path`
#[must_use]
pub fn file_mode(path: &Path) -> Option<u32> {
    std::fs::metadata(path)
        .ok()
        .map(|m| crate::metadata::permission_bits(&m))
}

/// Delete a file. A missing file is not an error.
pub fn file_delete(path: &Path) -> Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// True when the file exists and was last modified at least `min_age` ago
#[must_use]
pub fn file_stable(path: &Path, min_age: Duration) -> bool {
    let Some(modified) = std::fs::metadata(path).ok().and_then(|m| m.modified().ok()) else {
        return false;
    };
    SystemTime::now()
        .duration_since(modified)
        .is_ok_and(|age| age >= min_age)
}

/// Create a directory and any missing parents. Existing directories are fine.
pub fn dir_create(path: &Path, mode: CreationMode) -> Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode.dir_mode());
    }
    #[cfg(not(unix))]
    let _ = mode;
    builder.create(path).map_err(|e| Error::io(path, e))
}

/// Remove an empty directory. A missing directory is not an error.
pub fn dir_delete(path: &Path) -> Result<()> {
    match std::fs::remove_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(path, e)),
    }
}
