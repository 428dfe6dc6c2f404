// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Result, bail};
use hostfile::{FileOptions, symlink};
use std::path::Path;

/// Create a portable link file at `link` naming `target`
pub fn link_command(options: &FileOptions, link: &Path, target: &Path) -> Result<()> {
    if !symlink::is_link_name(link, &options.link_extension) {
        bail!(
            "Link name {} must end in {}",
            link.display(),
            options.link_extension
        );
    }
    symlink::create(link, target)?;
    Ok(())
}
