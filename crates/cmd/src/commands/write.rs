// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use diagnostics::info;
use hostfile::{Chunk, FileHandle, FileOptions};
use std::path::Path;

/// Write `data` into `path` at `offset`, creating the file if needed
pub fn write_command(
    options: &FileOptions,
    path: &Path,
    offset: u64,
    data: &[u8],
) -> Result<()> {
    let mut handle = FileHandle::with_options(None, path, options.clone())?;
    handle
        .output()
        .with_context(|| format!("Failed to open {} for writing", path.display()))?;
    handle.write(&Chunk::new(data), offset)?;
    handle.close();

    let name = path.display().to_string();
    let len = data.len();
    info!(
        "Wrote {len} bytes to {name} at {offset}",
        len: len,
        name: name,
        offset: offset
    );
    Ok(())
}
