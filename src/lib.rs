//! Hamiltonian-cycle proof-of-work share validator.
//!
//! This crate provides a deterministic, verifiable implementation of the
//! mining-pool share protocol: a worker submits a block, a nonce, and a
//! two-stage Hamiltonian-cycle path; the pool regenerates the same
//! deterministic graphs from the same hashes and confirms the submitted
//! cycles, then classifies the resulting hash against the job and block
//! targets.
//!
//! # Architecture
//!
//! - **hexcodec**: hex <-> byte conversions, the leaf-most module.
//! - **hash**: SHA-256 and the domain's byte-reversed digest convention.
//! - **prng**: seeded MT19937-64 and the bit-exact uniform-integer sampler.
//! - **graph**: deterministic adjacency-matrix generation (legacy V1 and V2).
//! - **cycle**: Hamiltonian cycle verification, including the time-gated
//!   2-opt ground-state check.
//! - **varint**: Bitcoin-style compact-size length prefix.
//! - **share**: the two-stage share-construction pipeline.
//! - **classify**: target comparison and block-found splicing.
//! - **dispatch**: async entry point over a tokio blocking pool.
//! - **types**: wire-visible constants and the verdict/result shapes.
//! - **errors**: typed, non-panicking error handling.
//! - **python**: PyO3 bindings (feature-gated).
//! - **ffi**: C-ABI bindings (feature-gated).
//!
//! # Usage
//!
//! ```rust
//! use shaipot_validator::graph::generate_graph_v2;
//!
//! let g = generate_graph_v2(&"0".repeat(64), 10, 500);
//! assert_eq!(g.len(), 10);
//! ```

pub mod classify;
pub mod cycle;
pub mod dispatch;
pub mod errors;
pub mod graph;
pub mod hash;
pub mod hexcodec;
pub mod prng;
pub mod share;
pub mod types;
pub mod varint;

#[cfg(feature = "ffi")]
pub mod ffi;

#[cfg(feature = "python")]
pub mod python;

pub use dispatch::{validate_share, validate_share_async, validate_share_with_clock};
pub use errors::{Result, ValidatorError};
pub use graph::{generate_graph, generate_graph_v2, generate_graph_v2_debug, Graph};
pub use types::{
    Verdict, VerdictType, BLOCK_HEX_SPLICE_OFFSET, CODEC_VERSION, MAX_BLOCK_DATA_HEX_LEN,
    MAX_GRID_SIZE, QUEEN_EDGE_PROB_X10, WORKER_EDGE_PROB_X10, WORKER_N_MAX, WORKER_N_MIN,
};

/// Library version (matches Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get version info as a string.
pub fn version_info() -> String {
    format!("{} v{} (codec v{})", NAME, VERSION, CODEC_VERSION)
}
