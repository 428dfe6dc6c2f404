// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use crate::common::{format_file_size, format_kind, format_mode, format_time};
use anyhow::Result;
use hostfile::{FileHandle, FileOptions, sys};
use std::path::PathBuf;

/// Print one line of metadata per path. A file is `settled` once its
/// modification time is older than the configured stable age.
pub fn stat_command(
    options: &FileOptions,
    paths: &[PathBuf],
    mut output: impl FnMut(String),
) -> Result<()> {
    for path in paths {
        let handle = FileHandle::with_options(None, path, options.clone())?;
        let snap = handle.snapshot();
        let access = format!(
            "{}{}",
            if snap.readable { 'r' } else { '-' },
            if snap.writeable { 'w' } else { '-' }
        );
        let settled = if sys::file_stable(handle.target(), options.stable_age()) {
            "settled"
        } else {
            "active"
        };
        let name = match handle.link_target() {
            Some(target) => format!("{} -> {}", path.display(), target.display()),
            None => path.display().to_string(),
        };
        output(format!(
            "{:<9} {} {} {:>8} {} {:<7} {}",
            format_kind(snap.kind),
            format_mode(snap.mode),
            access,
            format_file_size(snap.size),
            format_time(snap.modified),
            settled,
            name
        ));
    }
    Ok(())
}
