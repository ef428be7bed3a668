//! Target classification (spec §4.G): big-endian byte-wise comparison of a
//! share hash against the job and block targets.

use crate::hexcodec::hex_to_bytes;
use std::cmp::Ordering;

/// Outcome of comparing a share hash against both targets, before the
/// block-found splice is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyOutcome {
    ShareRejected,
    ShareAccepted,
    BlockFound,
}

/// Compare two 32-byte big-endian values byte-by-byte, deciding on the first
/// differing byte (spec §4.G). Equal-length prefixes in `hash`/`target` are
/// assumed; mismatched lengths compare as if the shorter were zero-padded on
/// the right, which never arises in practice since both sides are always
/// 32-byte hashes.
fn compare_be(hash: &[u8], target: &[u8]) -> Ordering {
    for i in 0..hash.len().max(target.len()) {
        let h = hash.get(i).copied().unwrap_or(0);
        let t = target.get(i).copied().unwrap_or(0);
        match h.cmp(&t) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

/// Classify `hash_hex` against `job_target_hex` and `block_target_hex`
/// (spec §4.G): `hash > jobTarget` rejects; `jobTarget >= hash > blockTarget`
/// accepts; `hash <= blockTarget` finds a block.
pub fn classify(hash_hex: &str, job_target_hex: &str, block_target_hex: &str) -> ClassifyOutcome {
    let hash = hex_to_bytes(hash_hex);
    let job_target = hex_to_bytes(job_target_hex);
    let block_target = hex_to_bytes(block_target_hex);

    if compare_be(&hash, &job_target) == Ordering::Greater {
        return ClassifyOutcome::ShareRejected;
    }
    if compare_be(&hash, &block_target) == Ordering::Greater {
        return ClassifyOutcome::ShareAccepted;
    }
    ClassifyOutcome::BlockFound
}

/// Splice a newly-assembled share onto the tail of the original block body
/// (spec §4.G): everything from hex-character offset
/// [`crate::types::BLOCK_HEX_SPLICE_OFFSET`] onward in `original_block_hex`
/// is kept, and `share_data_hex` replaces everything before it.
pub fn splice_block_hex(share_data_hex: &str, original_block_hex: &str) -> String {
    let tail_start = crate::types::BLOCK_HEX_SPLICE_OFFSET.min(original_block_hex.len());
    format!("{share_data_hex}{}", &original_block_hex[tail_start..])
}
