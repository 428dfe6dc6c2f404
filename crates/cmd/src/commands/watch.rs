// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use diagnostics::debug;
use hostfile::{FileHandle, FileOptions};
use std::path::Path;
use std::time::Duration;

/// Poll until the file stops changing or `max_polls` observations pass.
/// Returns whether the file was found stable.
pub fn watch_command(
    options: &FileOptions,
    path: &Path,
    interval: Duration,
    max_polls: u32,
    mut output: impl FnMut(String),
) -> Result<bool> {
    let mut handle = FileHandle::with_options(None, path, options.clone())?;
    for poll in 1..=max_polls {
        if handle.is_stable() {
            output(format!(
                "{} stable at {} bytes after {} polls",
                path.display(),
                handle.cursize(),
                poll
            ));
            return Ok(true);
        }
        let size = handle.cursize();
        debug!(
            "Poll {poll}: size {size}, not yet stable",
            poll: poll,
            size: size
        );
        if poll < max_polls {
            std::thread::sleep(interval);
        }
    }
    output(format!(
        "{} not stable after {} polls",
        path.display(),
        max_polls
    ));
    Ok(false)
}
