// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

use bytes::{Bytes, BytesMut};
use std::fmt;
use std::ops::Deref;

/// A length-bounded byte buffer used as the payload of chunked reads
/// and writes.
///
/// `len()` is the number of valid bytes; `capacity()` is the size the
/// chunk was allocated for. A read that hits end of file returns a chunk
/// whose length is smaller than its capacity.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Chunk {
    data: BytesMut,
    capacity: usize,
}

impl Chunk {
    /// Create a chunk holding a copy of `data`
    #[must_use]
    pub fn new(data: &[u8]) -> Self {
        Self {
            data: BytesMut::from(data),
            capacity: data.len(),
        }
    }

    /// Create an empty chunk able to hold `capacity` bytes
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    /// Number of valid bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Size the chunk was allocated for
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Raw access to the valid bytes
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Append bytes, up to the chunk's capacity. Returns how many bytes
    /// were taken from `data`.
    pub fn append(&mut self, data: &[u8]) -> usize {
        let room = self.capacity.saturating_sub(self.data.len());
        let take = room.min(data.len());
        self.data.extend_from_slice(&data[..take]);
        take
    }

    /// Mutable buffer sized to `capacity`, zero-filled past the valid
    /// bytes. Pair with [`Chunk::set_len`] after filling it.
    pub(crate) fn spare(&mut self) -> &mut [u8] {
        self.data.resize(self.capacity, 0);
        &mut self.data
    }

    pub(crate) fn set_len(&mut self, len: usize) {
        self.data.truncate(len.min(self.capacity));
    }

    /// Freeze into shared immutable bytes
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.data.freeze()
    }
}

impl Deref for Chunk {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.data
    }
}

impl From<Vec<u8>> for Chunk {
    fn from(data: Vec<u8>) -> Self {
        Self::new(&data)
    }
}

impl From<&[u8]> for Chunk {
    fn from(data: &[u8]) -> Self {
        Self::new(data)
    }
}

impl From<&str> for Chunk {
    fn from(data: &str) -> Self {
        Self::new(data.as_bytes())
    }
}

impl fmt::Debug for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chunk")
            .field("len", &self.data.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}
