// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use hostfile::{FileHandle, FileOptions};
use std::path::PathBuf;

/// Print `<hex>  <path>` for each file, in the style of `sha1sum`
pub fn digest_command(
    options: &FileOptions,
    paths: &[PathBuf],
    mut output: impl FnMut(String),
) -> Result<()> {
    for path in paths {
        let mut handle = FileHandle::with_options(None, path, options.clone())?;
        let hex = handle
            .digest()
            .with_context(|| format!("Failed to digest {}", path.display()))?;
        output(format!("{}  {}", hex, path.display()));
    }
    Ok(())
}
