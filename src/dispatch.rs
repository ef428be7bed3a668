//! Async dispatch (spec §4.H): each call enqueues one CPU-bound job onto the
//! tokio blocking pool; the returned future always resolves to a [`Verdict`],
//! never rejects.

use crate::classify::{self, ClassifyOutcome};
use crate::share;
use crate::types::Verdict;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::{error, trace, warn};

fn now_unix() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Synchronous core of share validation, with an injectable clock so the
/// 2-opt ground-state gate (spec §4.E) can be tested on both sides of its
/// activation time without touching the wall clock.
pub fn validate_share_with_clock(
    block_data_hex: &str,
    nonce_hex: &str,
    path_hex: &str,
    job_target_hex: &str,
    block_target_hex: &str,
    block_hex: &str,
    now: u64,
) -> Verdict {
    let constructed = match share::construct_share(block_data_hex, nonce_hex, path_hex, now) {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, code = e.error_code(), "share construction rejected");
            return Verdict::rejected_with_reason(
                String::new(),
                job_target_hex.to_string(),
                nonce_hex.to_string(),
                path_hex.to_string(),
                e.share_message(),
            );
        }
    };

    match classify::classify(&constructed.hash, job_target_hex, block_target_hex) {
        ClassifyOutcome::ShareRejected => Verdict::rejected(
            constructed.hash,
            job_target_hex.to_string(),
            nonce_hex.to_string(),
            path_hex.to_string(),
        ),
        ClassifyOutcome::ShareAccepted => Verdict::accepted(
            constructed.hash,
            job_target_hex.to_string(),
            nonce_hex.to_string(),
            path_hex.to_string(),
        ),
        ClassifyOutcome::BlockFound => {
            let block_hex_updated = classify::splice_block_hex(&constructed.data, block_hex);
            Verdict::block_found(
                constructed.hash,
                job_target_hex.to_string(),
                nonce_hex.to_string(),
                path_hex.to_string(),
                block_hex_updated,
            )
        }
    }
}

/// Same as [`validate_share_with_clock`] but reads the current wall-clock
/// time, for production callers that don't need to control the 2-opt gate.
pub fn validate_share(
    block_data_hex: &str,
    nonce_hex: &str,
    path_hex: &str,
    job_target_hex: &str,
    block_target_hex: &str,
    block_hex: &str,
) -> Verdict {
    validate_share_with_clock(
        block_data_hex,
        nonce_hex,
        path_hex,
        job_target_hex,
        block_target_hex,
        block_hex,
        now_unix(),
    )
}

/// Enqueue one validation job on the tokio blocking pool and resolve with its
/// verdict. Never rejects: a panic inside the job surfaces as
/// `{type: "error", error: ...}` instead of propagating a `JoinError`.
pub async fn validate_share_async(
    block_data_hex: String,
    nonce_hex: String,
    path_hex: String,
    job_target_hex: String,
    block_target_hex: String,
    block_hex: String,
) -> Verdict {
    trace!("validation job enqueued on blocking pool");
    let join = tokio::task::spawn_blocking(move || {
        trace!("validation job dequeued, running on worker thread");
        validate_share(
            &block_data_hex,
            &nonce_hex,
            &path_hex,
            &job_target_hex,
            &block_target_hex,
            &block_hex,
        )
    })
    .await;

    match join {
        Ok(verdict) => {
            trace!(verdict_type = ?verdict.verdict_type, "validation job completed");
            verdict
        }
        Err(e) => {
            error!(error = %e, "validation worker task failed");
            Verdict::error(format!("worker task failed: {e}"))
        }
    }
}
