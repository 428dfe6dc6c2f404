// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Portable links
//!
//! A portable link is a plain text file whose name ends in the link
//! extension (`.ln` by default) and whose first line is the path of the
//! real file. It works the same on every platform and is followed only
//! by this crate, never by the operating system.

use crate::error::{Error, Result};
use diagnostics::{debug, warn};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// True if `path`'s final component ends with `extension` and has a
/// non-empty stem before it
#[must_use]
pub fn is_link_name(path: &Path, extension: &str) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    !extension.is_empty() && name.len() > extension.len() && name.ends_with(extension)
}

/// Read the target named by a link file.
///
/// Returns `Ok(None)` if the file does not exist. A link whose first
/// line is blank is an [`Error::InvalidLink`].
pub fn read_target(link: &Path) -> Result<Option<PathBuf>> {
    let file = match std::fs::File::open(link) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io(link, e)),
    };

    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .map_err(|e| Error::io(link, e))?;

    let target = line.trim_end_matches(['\n', '\r']);
    if target.trim().is_empty() {
        let link_display = link.display().to_string();
        warn!(
            "Portable link {link_display} has no target",
            link_display: link_display
        );
        return Err(Error::invalid_link(link));
    }

    let link_display = link.display().to_string();
    debug!(
        "Portable link {link_display} -> {target}",
        link_display: link_display,
        target: target
    );
    Ok(Some(PathBuf::from(target)))
}

/// Write a link file at `link` pointing at `target`, replacing any
/// existing file
pub fn create(link: &Path, target: &Path) -> Result<()> {
    let mut file = std::fs::File::create(link).map_err(|e| Error::io(link, e))?;
    writeln!(file, "{}", target.display()).map_err(|e| Error::io(link, e))?;
    file.flush().map_err(|e| Error::io(link, e))
}
