//! Wire-visible constants and the result/verdict types returned at the
//! external boundary (spec §3, §6).
//!
//! Field order is explicit - these types cross the FFI/Python boundary, and
//! the JSON verdict shape is part of the host contract.

use serde::{Deserialize, Serialize};

/// Codec version for forward/backward compatibility.
pub const CODEC_VERSION: u8 = 1;

/// Largest graph the pipeline will ever generate (worker + queen vertex counts
/// always sum to this).
pub const MAX_GRID_SIZE: usize = 2008;

/// Worker vertex count range: `[WORKER_N_MIN, WORKER_N_MAX)`.
pub const WORKER_N_MIN: usize = 1892;
pub const WORKER_N_MAX: usize = 1920;

/// Edge probability for the worker graph, in tenths of a percent (500 = 50.0%).
pub const WORKER_EDGE_PROB_X10: u32 = 500;

/// Edge probability for the queen-bee graph, in tenths of a percent.
pub const QUEEN_EDGE_PROB_X10: u32 = 125;

/// Trailing `0xFF` padding length (bytes) appended to the initial-hash payload.
pub const INITIAL_HASH_PADDING_BYTES: usize = 2 * MAX_GRID_SIZE;

/// Largest accepted `blockData` hex length before a share is rejected as
/// `InvalidData`.
pub const MAX_BLOCK_DATA_HEX_LEN: usize = 10_000;

/// Hex-character offset at which a found block's original body is spliced
/// onto the newly-assembled share data.
pub const BLOCK_HEX_SPLICE_OFFSET: usize = 8192;

/// Share verdict discriminant (spec §3, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictType {
    ShareRejected,
    ShareAccepted,
    BlockFound,
    Error,
}

/// Verdict object returned by [`crate::dispatch::validate_share_async`] -
/// resolves exactly once, never rejects (spec §4.H).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    #[serde(rename = "type")]
    pub verdict_type: VerdictType,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_hex_updated: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Verdict {
    pub fn rejected(hash: String, target: String, nonce: String, path: String) -> Self {
        Verdict {
            verdict_type: VerdictType::ShareRejected,
            hash: Some(hash),
            target: Some(target),
            nonce: Some(nonce),
            path: Some(path),
            block_hex_updated: None,
            error: None,
        }
    }

    pub fn rejected_with_reason(
        hash: String,
        target: String,
        nonce: String,
        path: String,
        reason: String,
    ) -> Self {
        Verdict {
            error: Some(reason),
            ..Verdict::rejected(hash, target, nonce, path)
        }
    }

    pub fn accepted(hash: String, target: String, nonce: String, path: String) -> Self {
        Verdict {
            verdict_type: VerdictType::ShareAccepted,
            hash: Some(hash),
            target: Some(target),
            nonce: Some(nonce),
            path: Some(path),
            block_hex_updated: None,
            error: None,
        }
    }

    pub fn block_found(
        hash: String,
        target: String,
        nonce: String,
        path: String,
        block_hex_updated: String,
    ) -> Self {
        Verdict {
            verdict_type: VerdictType::BlockFound,
            hash: Some(hash),
            target: Some(target),
            nonce: Some(nonce),
            path: Some(path),
            block_hex_updated: Some(block_hex_updated),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Verdict {
            verdict_type: VerdictType::Error,
            hash: None,
            target: None,
            nonce: None,
            path: None,
            block_hex_updated: None,
            error: Some(message),
        }
    }
}

/// Simpler result shape used by the synchronous share-construction step
/// (spec §3 `ShareResult`), before a target classification has been applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareResult {
    pub valid: bool,
    pub hash: String,
    pub data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
