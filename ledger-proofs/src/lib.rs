//! Client-side verification of ledger proofs.
//!
//! A client holds a trusted root (from a signed ledger header obtained
//! elsewhere) and an untrusted proof from a server. Every function here
//! recomputes the root from the proof and compares; none of them touches
//! storage or the network.
//!
//! - Transaction and event accumulators: [`verify_transaction_inclusion`],
//!   [`verify_event_inclusion`], [`verify_transaction_range`],
//!   [`verify_accumulator_consistency`].
//! - Account state: [`verify_state_proof`].
//! - Batches: [`verify_state_proofs_batch`],
//!   [`verify_transaction_inclusions_batch`].
//!
//! Each entry point takes a [`ProofVersion`] selecting the method version to
//! run; [`ProofVersion::latest`] is the usual choice.

#![warn(missing_docs)]

mod accumulator;
mod batch;
mod error;
mod state;

pub use accumulator::{
    verify_accumulator_consistency, verify_event_inclusion, verify_transaction_inclusion,
    verify_transaction_range,
};
pub use batch::{
    PARALLEL_THRESHOLD, StateProofRequest, TransactionInclusionRequest,
    verify_state_proofs_batch, verify_transaction_inclusions_batch,
};
pub use error::{Error, Result};
pub use ledger_accumulator::{
    AccumulatorConsistencyProof, AccumulatorProof, AccumulatorRangeProof, EventAccumulatorProof,
    Position, TransactionAccumulatorConsistencyProof, TransactionAccumulatorProof,
    TransactionAccumulatorRangeProof,
};
pub use ledger_proof_primitives::{
    ACCUMULATOR_PLACEHOLDER_HASH, EventDomain, HashValue, LeafHash, SPARSE_MERKLE_PLACEHOLDER_HASH,
    SparseMerkleLeafDomain, TransactionInfoDomain, VerifyError, hash_leaf,
};
pub use ledger_proof_version::{error::ProofVersionError, version::ProofVersion};
pub use ledger_sparse_merkle_tree::{SPARSE_MERKLE_TREE_DEPTH, SparseMerkleLeaf, SparseMerkleProof};
pub use state::verify_state_proof;
