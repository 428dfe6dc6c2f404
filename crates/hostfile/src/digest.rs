// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Content digests fed incrementally with byte spans

use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::io::Read;

/// Hash function used for file digests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    /// 160-bit digest, 40 hex characters
    #[default]
    Sha1,
    /// 256-bit digest, 64 hex characters
    Sha256,
}

impl DigestAlgorithm {
    /// Length of the hex string this algorithm produces
    #[must_use]
    pub fn hex_len(self) -> usize {
        match self {
            DigestAlgorithm::Sha1 => 40,
            DigestAlgorithm::Sha256 => 64,
        }
    }
}

/// Incremental hasher producing a lowercase hex string
#[derive(Clone)]
pub enum Hasher {
    Sha1(Sha1),
    Sha256(Sha256),
}

impl Hasher {
    #[must_use]
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        match algorithm {
            DigestAlgorithm::Sha1 => Hasher::Sha1(Sha1::new()),
            DigestAlgorithm::Sha256 => Hasher::Sha256(Sha256::new()),
        }
    }

    /// Feed the next span of bytes
    pub fn update(&mut self, data: &[u8]) {
        match self {
            Hasher::Sha1(h) => h.update(data),
            Hasher::Sha256(h) => h.update(data),
        }
    }

    /// Consume a reader to the end in blocks of `block_size` bytes
    pub fn update_reader<R: Read>(&mut self, reader: &mut R, block_size: usize) -> std::io::Result<u64> {
        let mut buf = vec![0u8; block_size.max(1)];
        let mut total = 0u64;
        loop {
            let n = match reader.read(&mut buf) {
                Ok(0) => return Ok(total),
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            self.update(&buf[..n]);
            total += n as u64;
        }
    }

    /// Finish and return the digest as lowercase hex
    #[must_use]
    pub fn finalize_hex(self) -> String {
        match self {
            Hasher::Sha1(h) => hex::encode(h.finalize()),
            Hasher::Sha256(h) => hex::encode(h.finalize()),
        }
    }
}

/// Digest a byte slice in one call
#[must_use]
pub fn digest_bytes(algorithm: DigestAlgorithm, data: &[u8]) -> String {
    let mut hasher = Hasher::new(algorithm);
    hasher.update(data);
    hasher.finalize_hex()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha1_known_value() {
        assert_eq!(
            digest_bytes(DigestAlgorithm::Sha1, b"abc"),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            digest_bytes(DigestAlgorithm::Sha1, b""),
            "da39a3ee5e6b4b0d3255bfef95601890afd80709"
        );
    }

    #[test]
    fn test_sha256_known_value() {
        assert_eq!(
            digest_bytes(DigestAlgorithm::Sha256, b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_spans_match_single_update() {
        let mut hasher = Hasher::new(DigestAlgorithm::Sha1);
        hasher.update(b"hello ");
        hasher.update(b"world");
        assert_eq!(
            hasher.finalize_hex(),
            digest_bytes(DigestAlgorithm::Sha1, b"hello world")
        );
    }

    #[test]
    fn test_reader_with_small_blocks() {
        let data = vec![7u8; 1000];
        let mut hasher = Hasher::new(DigestAlgorithm::Sha256);
        let total = hasher
            .update_reader(&mut std::io::Cursor::new(&data), 3)
            .expect("cursor read");
        assert_eq!(total, 1000);
        let hex = hasher.finalize_hex();
        assert_eq!(hex.len(), DigestAlgorithm::Sha256.hex_len());
        assert_eq!(hex, digest_bytes(DigestAlgorithm::Sha256, &data));
    }
}
