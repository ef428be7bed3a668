//! SHA-256 hashing utilities for the share-validation pipeline.
//!
//! All hashing is deterministic and reproducible across platforms.
//! Uses sha2 crate for audited, constant-time SHA-256 implementation.
//!
//! Every hash this system emits is **byte-reversed** relative to the raw
//! SHA-256 digest - this is a domain convention, not a bug, and it is how
//! digests turn into little-endian integers downstream (seed extraction,
//! target comparison preimages). See [`sha256_reversed`].

use crate::hexcodec::{bytes_to_hex, hex_to_bytes, reversed};
use sha2::{Digest, Sha256};

/// Compute the raw SHA-256 hash of arbitrary bytes.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute SHA-256 of multiple byte slices (concatenated, streamed).
pub fn sha256_multi(data_slices: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    for slice in data_slices {
        hasher.update(slice);
    }
    hasher.finalize().into()
}

/// Compute SHA-256 of `data`, reverse the 32 output bytes, and hex-encode.
///
/// This is the hash function used everywhere in the pipeline: seed
/// derivation, worker/queen-bee challenge hashes, and the final share hash.
pub fn sha256_reversed(data: &[u8]) -> String {
    let digest = sha256(data);
    bytes_to_hex(&reversed(&digest))
}

/// Same as [`sha256_reversed`] but operating on several concatenated slices,
/// avoiding an intermediate allocation of the joined payload.
pub fn sha256_reversed_multi(data_slices: &[&[u8]]) -> String {
    let digest = sha256_multi(data_slices);
    bytes_to_hex(&reversed(&digest))
}
