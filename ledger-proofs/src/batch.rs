//! Batch verification.
//!
//! Proofs in a batch are independent, so the work fans out per proof with
//! rayon. Small batches stay on the calling thread. Results come back in input
//! order, one per proof; a rejected proof never affects its neighbours.

use ledger_accumulator::TransactionAccumulatorProof;
use ledger_proof_primitives::{HashValue, LeafHash, TransactionInfoDomain, VerifyError};
use ledger_proof_version::{check_v0, version::ProofVersion};
use ledger_sparse_merkle_tree::SparseMerkleProof;
use rayon::prelude::*;
use tracing::{debug, debug_span};

use crate::error::Result;

/// Below this many proofs a batch is verified sequentially.
pub const PARALLEL_THRESHOLD: usize = 4;

/// One key lookup against the state tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateProofRequest {
    /// Queried key.
    pub key: HashValue,
    /// Expected value digest, or `None` to prove absence.
    pub value_hash: Option<HashValue>,
    /// Proof returned for the key.
    pub proof: SparseMerkleProof,
}

/// One transaction to check against the transaction accumulator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransactionInclusionRequest {
    /// Digest of the transaction info.
    pub transaction_info_hash: LeafHash<TransactionInfoDomain>,
    /// Index of the transaction in the ledger.
    pub transaction_index: u64,
    /// Proof returned for the transaction.
    pub proof: TransactionAccumulatorProof,
}

/// Verify every state proof in `requests` against `expected_root`.
///
/// The outer error is only returned for an unknown method version.
pub fn verify_state_proofs_batch(
    requests: &[StateProofRequest],
    expected_root: HashValue,
    version: &ProofVersion,
) -> Result<Vec<core::result::Result<(), VerifyError>>> {
    check_v0!(
        "verify_state_proofs_batch",
        version.sparse_merkle.batch_verify_membership
    );
    let _span = debug_span!("verify_state_proofs_batch", count = requests.len()).entered();
    let results = fan_out(requests, |request| {
        request
            .proof
            .verify(expected_root, request.key, request.value_hash)
    });
    log_rejections(&results);
    Ok(results)
}

/// Verify every transaction in `requests` against one accumulator root.
///
/// The outer error is only returned for an unknown method version.
pub fn verify_transaction_inclusions_batch(
    requests: &[TransactionInclusionRequest],
    expected_root: HashValue,
    num_transactions: u64,
    version: &ProofVersion,
) -> Result<Vec<core::result::Result<(), VerifyError>>> {
    check_v0!(
        "verify_transaction_inclusions_batch",
        version.accumulator.batch_verify_inclusion
    );
    let _span = debug_span!(
        "verify_transaction_inclusions_batch",
        count = requests.len(),
        num_transactions
    )
    .entered();
    let results = fan_out(requests, |request| {
        request.proof.verify(
            expected_root,
            request.transaction_info_hash,
            request.transaction_index,
            num_transactions,
        )
    });
    log_rejections(&results);
    Ok(results)
}

fn fan_out<T, F>(requests: &[T], verify: F) -> Vec<core::result::Result<(), VerifyError>>
where
    T: Sync,
    F: Fn(&T) -> core::result::Result<(), VerifyError> + Sync + Send,
{
    if requests.len() < PARALLEL_THRESHOLD {
        requests.iter().map(verify).collect()
    } else {
        requests.par_iter().map(verify).collect()
    }
}

fn log_rejections(results: &[core::result::Result<(), VerifyError>]) {
    let rejected = results.iter().filter(|result| result.is_err()).count();
    if rejected > 0 {
        debug!(rejected, total = results.len(), "batch contains rejected proofs");
    }
}
