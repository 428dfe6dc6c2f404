// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use std::path::{Path, PathBuf};

pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by file handles and path utilities
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Path is empty")]
    EmptyPath,

    #[error("Path not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Is a directory: {}", .0.display())]
    IsDirectory(PathBuf),

    #[error("File not open for {mode}: {}", .path.display())]
    NotOpen { path: PathBuf, mode: &'static str },

    #[error("Invalid portable link: {}", .0.display())]
    InvalidLink(PathBuf),

    #[error("Short write to {}: {written} of {expected} bytes", .path.display())]
    ShortWrite {
        path: PathBuf,
        written: usize,
        expected: usize,
    },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    pub fn not_found<P: AsRef<Path>>(path: P) -> Self {
        Error::NotFound(path.as_ref().to_path_buf())
    }

    pub fn is_directory<P: AsRef<Path>>(path: P) -> Self {
        Error::IsDirectory(path.as_ref().to_path_buf())
    }

    pub fn not_open<P: AsRef<Path>>(path: P, mode: &'static str) -> Self {
        Error::NotOpen {
            path: path.as_ref().to_path_buf(),
            mode,
        }
    }

    pub fn invalid_link<P: AsRef<Path>>(path: P) -> Self {
        Error::InvalidLink(path.as_ref().to_path_buf())
    }

    /// Wrap an IO error with the path it concerns. `NotFound` is
    /// surfaced as its own variant so callers can match on it.
    pub fn io<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            return Error::not_found(path);
        }
        Error::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// True for errors meaning the path does not exist
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

impl From<serde_yaml_ng::Error> for Error {
    fn from(err: serde_yaml_ng::Error) -> Error {
        Error::Config(err.to_string())
    }
}
