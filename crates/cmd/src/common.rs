// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use hostfile::{EntryKind, FileOptions};
use std::path::Path;
use std::time::SystemTime;

/// Load options from `--config`, or defaults when none was given
pub fn load_options(config: Option<&Path>) -> Result<FileOptions> {
    match config {
        Some(path) => FileOptions::load(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(FileOptions::default()),
    }
}

/// Helper function to format file sizes
pub fn format_file_size(size: u64) -> String {
    if size >= 1024 * 1024 {
        format!("{:.1}MB", size as f64 / (1024.0 * 1024.0))
    } else if size >= 1024 {
        format!("{:.1}KB", size as f64 / 1024.0)
    } else {
        format!("{}B", size)
    }
}

/// `rwxr-x---` style rendering of the low nine permission bits
pub fn format_mode(mode: u32) -> String {
    const FLAGS: [(u32, char); 9] = [
        (0o400, 'r'),
        (0o200, 'w'),
        (0o100, 'x'),
        (0o040, 'r'),
        (0o020, 'w'),
        (0o010, 'x'),
        (0o004, 'r'),
        (0o002, 'w'),
        (0o001, 'x'),
    ];
    FLAGS
        .iter()
        .map(|&(bit, c)| if mode & bit != 0 { c } else { '-' })
        .collect()
}

pub fn format_time(time: Option<SystemTime>) -> String {
    match time {
        Some(time) => DateTime::<Utc>::from(time)
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string(),
        None => "-".to_string(),
    }
}

pub fn format_kind(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Missing => "missing",
        EntryKind::Directory => "directory",
        EntryKind::Regular => "file",
        EntryKind::Other => "other",
    }
}
