// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use hostfile::{FileHandle, FileOptions};
use std::path::PathBuf;

/// Remove each path. Links are removed, not their targets.
pub fn rm_command(options: &FileOptions, paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        FileHandle::with_options(None, path, options.clone())?.remove()?;
    }
    Ok(())
}
