//! Versioned accumulator verification.

use ledger_accumulator::{
    EventAccumulatorProof, TransactionAccumulatorConsistencyProof, TransactionAccumulatorProof,
    TransactionAccumulatorRangeProof,
};
use ledger_proof_primitives::{EventDomain, HashValue, LeafHash, TransactionInfoDomain};
use ledger_proof_version::{check_v0, error::ProofVersionError, version::ProofVersion};

use crate::{Error, error::Result};

/// Verify that `transaction_info_hash` is transaction `transaction_index` of
/// the ledger whose transaction accumulator has `num_transactions` leaves and
/// root `expected_root`.
pub fn verify_transaction_inclusion(
    proof: &TransactionAccumulatorProof,
    expected_root: HashValue,
    transaction_info_hash: LeafHash<TransactionInfoDomain>,
    transaction_index: u64,
    num_transactions: u64,
    version: &ProofVersion,
) -> Result<()> {
    match version.accumulator.verify_inclusion {
        0 => Ok(proof.verify(
            expected_root,
            transaction_info_hash,
            transaction_index,
            num_transactions,
        )?),
        version => Err(Error::VersionError(
            ProofVersionError::UnknownVersionMismatch {
                method: "verify_transaction_inclusion".to_string(),
                known_versions: vec![0],
                received: version,
            },
        )),
    }
}

/// Verify that `event_hash` is event `event_index` of a transaction's event
/// accumulator with `num_events` leaves and root `expected_root`.
pub fn verify_event_inclusion(
    proof: &EventAccumulatorProof,
    expected_root: HashValue,
    event_hash: LeafHash<EventDomain>,
    event_index: u64,
    num_events: u64,
    version: &ProofVersion,
) -> Result<()> {
    check_v0!(
        "verify_event_inclusion",
        version.accumulator.verify_inclusion
    );
    Ok(proof.verify(expected_root, event_hash, event_index, num_events)?)
}

/// Verify that `transaction_info_hashes` are the transactions starting at
/// `first_transaction_index`.
pub fn verify_transaction_range(
    proof: &TransactionAccumulatorRangeProof,
    expected_root: HashValue,
    num_transactions: u64,
    first_transaction_index: u64,
    transaction_info_hashes: &[LeafHash<TransactionInfoDomain>],
    version: &ProofVersion,
) -> Result<()> {
    check_v0!(
        "verify_transaction_range",
        version.accumulator.verify_range
    );
    Ok(proof.verify(
        expected_root,
        num_transactions,
        first_transaction_index,
        transaction_info_hashes,
    )?)
}

/// Verify that the ledger at `new_num_transactions` extends the ledger at
/// `old_num_transactions` without rewriting history.
pub fn verify_accumulator_consistency(
    proof: &TransactionAccumulatorConsistencyProof,
    old_root: HashValue,
    old_num_transactions: u64,
    new_root: HashValue,
    new_num_transactions: u64,
    version: &ProofVersion,
) -> Result<()> {
    check_v0!(
        "verify_accumulator_consistency",
        version.accumulator.verify_consistency
    );
    Ok(proof.verify(
        old_root,
        old_num_transactions,
        new_root,
        new_num_transactions,
    )?)
}
