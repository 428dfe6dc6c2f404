// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use diagnostics::debug;
use hostfile::{FileHandle, FileOptions};
use std::io::Write;
use std::path::Path;

/// Copy a file (following portable links) to `out`, one chunk at a time
pub fn cat_command(
    options: &FileOptions,
    path: &Path,
    chunk_size: usize,
    out: &mut impl Write,
) -> Result<u64> {
    let mut handle = FileHandle::with_options(None, path, options.clone())?;
    handle
        .input()
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let chunk_size = chunk_size.max(1);
    let mut offset = 0u64;
    loop {
        let chunk = handle.read(chunk_size, offset)?;
        out.write_all(chunk.data())?;
        offset += chunk.len() as u64;
        if handle.eof() {
            break;
        }
    }
    handle.close();
    out.flush()?;

    let name = path.display().to_string();
    debug!(
        "Copied {offset} bytes from {name}",
        offset: offset,
        name: name
    );
    Ok(offset)
}
