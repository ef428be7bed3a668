//! Two-stage share-construction pipeline (spec §4.F): initial hash -> worker
//! challenge -> queen-bee hash -> queen challenge -> final hash.

use crate::cycle::{self, SENTINEL};
use crate::errors::{Result, ValidatorError};
use crate::graph::generate_graph_v2;
use crate::hash::sha256_reversed;
use crate::hexcodec::{hex_to_bytes, reversed};
use crate::types::{
    INITIAL_HASH_PADDING_BYTES, MAX_BLOCK_DATA_HEX_LEN, QUEEN_EDGE_PROB_X10, WORKER_EDGE_PROB_X10,
    WORKER_N_MIN, WORKER_N_MAX, MAX_GRID_SIZE,
};
use crate::varint;
use tracing::debug;

/// Output of a successful share construction: the final hash and the
/// concatenated share data (spec §3 `ShareResult` minus the `valid` flag,
/// which the caller derives from `Ok`/`Err`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructedShare {
    pub hash: String,
    pub data: String,
}

/// Run the full share-construction pipeline.
///
/// `block_data_hex`, `nonce_hex`, and `path_hex` are lowercase hex; `now_unix`
/// gates the 2-opt ground-state check inside [`cycle::verify`].
pub fn construct_share(
    block_data_hex: &str,
    nonce_hex: &str,
    path_hex: &str,
    now_unix: u64,
) -> Result<ConstructedShare> {
    if block_data_hex.len() > MAX_BLOCK_DATA_HEX_LEN {
        return Err(ValidatorError::InvalidData);
    }

    let block_data = hex_to_bytes(block_data_hex);
    let nonce = hex_to_bytes(nonce_hex);
    let path = hex_to_bytes(path_hex);

    // Step 1 - initial hash.
    let mut payload = Vec::with_capacity(block_data.len() + nonce.len() + INITIAL_HASH_PADDING_BYTES);
    payload.extend_from_slice(&block_data);
    payload.extend_from_slice(&nonce);
    payload.extend(std::iter::repeat(0xFFu8).take(INITIAL_HASH_PADDING_BYTES));
    let h1 = sha256_reversed(&payload);
    debug!(h1 = %h1, "share pipeline: initial hash");

    // Step 2 - worker challenge.
    let first8 = &h1[0..8.min(h1.len())];
    let x = u32::from_str_radix(first8, 16).unwrap_or(0);
    let worker_n = WORKER_N_MIN + (x as usize % (WORKER_N_MAX - WORKER_N_MIN));
    let queen_n = MAX_GRID_SIZE - worker_n;

    let worker_cycle = parse_cycle(&path, 0, worker_n);
    let queen_cycle = parse_cycle(&path, 2 * worker_n, queen_n);

    let gw = generate_graph_v2(&h1, worker_n, WORKER_EDGE_PROB_X10);
    if !cycle::verify(&gw, &worker_cycle, now_unix) {
        return Err(ValidatorError::InvalidWorkerCycle);
    }
    debug!(worker_n, queen_n, "share pipeline: worker cycle verified");

    // Step 3 - derive queen-bee hash.
    let mut prefix = varint::encode(worker_cycle.len() as u64);
    for &v in &worker_cycle {
        prefix.extend_from_slice(&v.to_le_bytes());
    }
    prefix.extend_from_slice(&reversed(&hex_to_bytes(&h1)));
    let hq = sha256_reversed(&prefix);
    debug!(hq = %hq, "share pipeline: queen-bee hash");

    // Step 4 - queen challenge.
    let gq = generate_graph_v2(&hq, queen_n, QUEEN_EDGE_PROB_X10);
    if !cycle::verify(&gq, &queen_cycle, now_unix) {
        return Err(ValidatorError::InvalidQueenCycle);
    }
    debug!("share pipeline: queen cycle verified");

    // Step 5 - final hash.
    let mut final_payload = Vec::with_capacity(block_data.len() + nonce.len() + path.len());
    final_payload.extend_from_slice(&block_data);
    final_payload.extend_from_slice(&nonce);
    final_payload.extend_from_slice(&path);
    let hfinal = sha256_reversed(&final_payload);
    debug!(hfinal = %hfinal, "share pipeline: final classification hash");

    let data = format!("{block_data_hex}{nonce_hex}{path_hex}");

    Ok(ConstructedShare { hash: hfinal, data })
}

/// Scan a window of `count` two-byte little-endian slots starting at byte
/// `offset` in `path`, skipping any slot that reads as [`SENTINEL`] - either
/// a literal `0xFFFF` in the buffer, or a position past the end of `path`
/// (spec §4.F/§9: "0xFFFF entries skipped but structural length target
/// still Nw/Nq"). A skipped slot is not pushed, so the returned vector can
/// be shorter than `count` when the buffer is short or sentinel-padded;
/// that length mismatch is what causes [`cycle::verify`] to reject the
/// cycle, not any check performed here.
fn parse_cycle(path: &[u8], offset: usize, count: usize) -> Vec<u16> {
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let start = offset + i * 2;
        let v = match path.get(start..start + 2) {
            Some(pair) => u16::from_le_bytes([pair[0], pair[1]]),
            None => SENTINEL,
        };
        if v != SENTINEL {
            out.push(v);
        }
    }
    out
}
