// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;
use std::time::SystemTime;

/// Type of a filesystem entry as seen by the last stat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EntryKind {
    /// Nothing at the path
    #[default]
    Missing,
    Directory,
    Regular,
    /// Sockets, devices, fifos
    Other,
}

/// Metadata captured at one point in time.
///
/// A snapshot never changes by itself; it only describes the disk as of
/// the stat that produced it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    pub kind: EntryKind,
    /// Size in bytes (0 when missing)
    pub size: u64,
    /// Last modification time, if the platform reports one
    pub modified: Option<SystemTime>,
    /// Permission bits (`st_mode & 0o7777` on Unix)
    pub mode: u32,
    /// The current process may read the entry
    pub readable: bool,
    /// The current process may write the entry
    pub writeable: bool,
}

/// The subset of a snapshot used to detect change: existence, size and
/// modification time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Observation {
    pub exists: bool,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

impl Snapshot {
    /// Stat `path` now. Any stat failure yields a `Missing` snapshot.
    #[must_use]
    pub fn capture(path: &Path) -> Self {
        let Ok(metadata) = std::fs::metadata(path) else {
            return Self::default();
        };

        let kind = if metadata.is_dir() {
            EntryKind::Directory
        } else if metadata.is_file() {
            EntryKind::Regular
        } else {
            EntryKind::Other
        };

        Self {
            kind,
            size: metadata.len(),
            modified: metadata.modified().ok(),
            mode: permission_bits(&metadata),
            readable: access::readable(path, &metadata),
            writeable: access::writeable(path, &metadata),
        }
    }

    #[must_use]
    pub fn exists(&self) -> bool {
        self.kind != EntryKind::Missing
    }

    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    #[must_use]
    pub fn is_regular(&self) -> bool {
        self.kind == EntryKind::Regular
    }

    #[must_use]
    pub fn observation(&self) -> Observation {
        Observation {
            exists: self.exists(),
            size: self.size,
            modified: self.modified,
        }
    }
}

impl Observation {
    /// Stat only what change detection needs
    #[must_use]
    pub fn capture(path: &Path) -> Self {
        match std::fs::metadata(path) {
            Ok(metadata) => Self {
                exists: true,
                size: metadata.len(),
                modified: metadata.modified().ok(),
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(unix)]
pub(crate) fn permission_bits(metadata: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
pub(crate) fn permission_bits(metadata: &std::fs::Metadata) -> u32 {
    if metadata.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

/// Effective access for the current process, as opposed to raw mode bits
#[cfg(unix)]
mod access {
    use nix::unistd::{AccessFlags, access};
    use std::path::Path;

    pub fn readable(path: &Path, _metadata: &std::fs::Metadata) -> bool {
        access(path, AccessFlags::R_OK).is_ok()
    }

    pub fn writeable(path: &Path, _metadata: &std::fs::Metadata) -> bool {
        access(path, AccessFlags::W_OK).is_ok()
    }
}

#[cfg(not(unix))]
mod access {
    use std::path::Path;

    pub fn readable(path: &Path, metadata: &std::fs::Metadata) -> bool {
        metadata.is_dir() || std::fs::File::open(path).is_ok()
    }

    pub fn writeable(_path: &Path, metadata: &std::fs::Metadata) -> bool {
        !metadata.permissions().readonly()
    }
}
