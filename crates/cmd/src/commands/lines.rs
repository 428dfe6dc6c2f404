// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use hostfile::{FileHandle, FileOptions};
use std::path::Path;

/// Emit each line of a text file prefixed with its line number
pub fn lines_command(
    options: &FileOptions,
    path: &Path,
    mut output: impl FnMut(String),
) -> Result<usize> {
    let mut handle = FileHandle::with_options(None, path, options.clone())?;
    handle
        .input()
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut count = 0;
    while let Some(line) = handle.readln()? {
        count += 1;
        output(format!("{:>6}  {}", count, line));
    }
    Ok(count)
}
