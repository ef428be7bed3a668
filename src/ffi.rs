//! C-ABI layer for non-Rust hosts (cgo, etc).
//!
//! CRITICAL: every function here must stay byte-for-byte consistent with the
//! Python bindings in [`crate::python`] and with the plain Rust API - any
//! divergence between bindings means a miner and the pool disagree on a
//! share's validity.

use std::ffi::CStr;
use std::os::raw::{c_char, c_uint};
use std::slice;

use crate::graph::{generate_graph, generate_graph_v2};
use crate::types::Verdict;

/// Result codes for C FFI functions.
#[repr(C)]
pub enum ShaipotResult {
    Ok = 0,
    ErrorInvalidInput = 1,
    ErrorEncoding = 2,
    ErrorBufferTooSmall = 3,
}

/// # Safety
/// `hash_hex` must be a valid, null-terminated C string. `out_matrix` must
/// point to a buffer of at least `n * n` bytes; each byte is written `1` or
/// `0`.
#[no_mangle]
pub unsafe extern "C" fn shaipot_generate_graph(
    hash_hex: *const c_char,
    n: c_uint,
    out_matrix: *mut u8,
    out_capacity: c_uint,
) -> ShaipotResult {
    generate_into_buffer(hash_hex, n, out_matrix, out_capacity, |hash, n| {
        generate_graph(hash, n as usize)
    })
}

/// # Safety
/// Same contract as [`shaipot_generate_graph`], plus `percentage_x10` should
/// be in `[0, 1000]` (out-of-range values saturate the same way the Rust API
/// does - no bound is enforced at this boundary).
#[no_mangle]
pub unsafe extern "C" fn shaipot_generate_graph_v2(
    hash_hex: *const c_char,
    n: c_uint,
    percentage_x10: c_uint,
    out_matrix: *mut u8,
    out_capacity: c_uint,
) -> ShaipotResult {
    generate_into_buffer(hash_hex, n, out_matrix, out_capacity, |hash, n| {
        generate_graph_v2(hash, n as usize, percentage_x10)
    })
}

unsafe fn generate_into_buffer(
    hash_hex: *const c_char,
    n: c_uint,
    out_matrix: *mut u8,
    out_capacity: c_uint,
    generate: impl Fn(&str, c_uint) -> crate::graph::Graph,
) -> ShaipotResult {
    if hash_hex.is_null() || out_matrix.is_null() {
        return ShaipotResult::ErrorInvalidInput;
    }

    let needed = (n as u64) * (n as u64);
    if (out_capacity as u64) < needed {
        return ShaipotResult::ErrorBufferTooSmall;
    }

    let hash_str = match CStr::from_ptr(hash_hex).to_str() {
        Ok(s) => s,
        Err(_) => return ShaipotResult::ErrorEncoding,
    };

    let graph = generate(hash_str, n);
    let out = slice::from_raw_parts_mut(out_matrix, needed as usize);
    for i in 0..n as usize {
        for j in 0..n as usize {
            out[i * n as usize + j] = graph.has_edge(i, j) as u8;
        }
    }

    ShaipotResult::Ok
}

/// Validate a share synchronously and write the verdict as JSON into
/// `out_json`. Truncation is reported as `ErrorBufferTooSmall` rather than
/// silently cutting the buffer.
///
/// # Safety
/// All `*const c_char` parameters must be valid, null-terminated C strings.
/// `out_json` must point to a writable buffer of `out_capacity` bytes.
#[no_mangle]
pub unsafe extern "C" fn shaipot_validate_share(
    block_data_hex: *const c_char,
    nonce_hex: *const c_char,
    path_hex: *const c_char,
    job_target_hex: *const c_char,
    block_target_hex: *const c_char,
    block_hex: *const c_char,
    out_json: *mut c_char,
    out_capacity: c_uint,
) -> ShaipotResult {
    let params = [
        block_data_hex,
        nonce_hex,
        path_hex,
        job_target_hex,
        block_target_hex,
        block_hex,
    ];
    if params.iter().any(|p| p.is_null()) || out_json.is_null() {
        return ShaipotResult::ErrorInvalidInput;
    }

    let mut strs = Vec::with_capacity(params.len());
    for p in params {
        match CStr::from_ptr(p).to_str() {
            Ok(s) => strs.push(s),
            Err(_) => return ShaipotResult::ErrorEncoding,
        }
    }

    let verdict: Verdict = crate::dispatch::validate_share(
        strs[0], strs[1], strs[2], strs[3], strs[4], strs[5],
    );

    let json = match serde_json::to_string(&verdict) {
        Ok(j) => j,
        Err(_) => return ShaipotResult::ErrorEncoding,
    };

    let bytes = json.as_bytes();
    if bytes.len() + 1 > out_capacity as usize {
        return ShaipotResult::ErrorBufferTooSmall;
    }

    let out = slice::from_raw_parts_mut(out_json as *mut u8, bytes.len() + 1);
    out[..bytes.len()].copy_from_slice(bytes);
    out[bytes.len()] = 0;

    ShaipotResult::Ok
}

/// Get the library version as a static, nul-terminated string (do not free).
#[no_mangle]
pub extern "C" fn shaipot_version() -> *const c_char {
    concat!(env!("CARGO_PKG_VERSION"), "\0").as_ptr() as *const c_char
}
