// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Hostfile -- snapshot metadata and chunked I/O for a single host file
//!
//! A [`FileHandle`] wraps one path on the host filesystem. Its metadata
//! is refreshed only on request, so directory pollers can compare two
//! snapshots taken around a scan and decide whether a file is still being
//! written ([`FileHandle::has_changed`], [`FileHandle::is_stable`]).
//!
//! Reads and writes move [`Chunk`]s at explicit offsets. Files ending in
//! `.ln` may be portable links whose first line names the real file; see
//! [`symlink`].

pub mod chunk;
pub mod digest;
pub mod error;
pub mod handle;
pub mod metadata;
pub mod options;
pub mod symlink;
pub mod sys;

#[cfg(test)]
mod tests;

pub use chunk::Chunk;
pub use digest::DigestAlgorithm;
pub use error::{Error, Result};
pub use handle::{FileHandle, StreamState};
pub use metadata::{EntryKind, Observation, Snapshot};
pub use options::FileOptions;
pub use sys::CreationMode;
