//! Append-only Merkle accumulator proofs.
//!
//! The accumulator is a complete binary tree over leaf digests whose height is
//! the smallest that fits every leaf. Empty subtrees hash to
//! [`ACCUMULATOR_PLACEHOLDER_HASH`](ledger_proof_primitives::ACCUMULATOR_PLACEHOLDER_HASH),
//! so the root only depends on the leaves and their count.
//!
//! # Proofs
//!
//! - [`AccumulatorProof`]: one leaf against a root.
//! - [`AccumulatorRangeProof`]: a contiguous run of leaves against a root.
//! - [`AccumulatorConsistencyProof`]: a larger root extends a smaller one.
//!
//! Each is generic over the internal-node domain, so a transaction
//! accumulator proof cannot be checked against an event accumulator root
//! without a type error.
//!
//! # Test utilities
//!
//! - [`MockAccumulator`]: honest proof generation (requires `test_utils`
//!   feature).

#![warn(missing_docs)]

mod consistency_proof;
/// In-memory accumulator for generating proofs (requires `test_utils`
/// feature).
#[cfg(any(test, feature = "test_utils"))]
pub mod mock;
mod position;
mod proof;
mod range_proof;
pub(crate) mod subtrees;
#[cfg(test)]
mod tests;

pub use consistency_proof::AccumulatorConsistencyProof;
use ledger_proof_primitives::{EventAccumulatorDomain, TransactionAccumulatorDomain};
#[cfg(any(test, feature = "test_utils"))]
pub use mock::MockAccumulator;
pub use position::{
    MAX_ACCUMULATOR_LEAVES, MAX_ACCUMULATOR_PROOF_DEPTH, Position, aligned_subtrees,
    frozen_subtree_roots, root_level,
};
pub use proof::AccumulatorProof;
pub use range_proof::{AccumulatorRangeProof, MAX_RANGE_BOUNDARY_SIBLINGS};

/// Inclusion proof in the transaction accumulator.
pub type TransactionAccumulatorProof = AccumulatorProof<TransactionAccumulatorDomain>;
/// Inclusion proof in an event accumulator.
pub type EventAccumulatorProof = AccumulatorProof<EventAccumulatorDomain>;
/// Range proof in the transaction accumulator.
pub type TransactionAccumulatorRangeProof = AccumulatorRangeProof<TransactionAccumulatorDomain>;
/// Consistency proof between two transaction accumulator sizes.
pub type TransactionAccumulatorConsistencyProof =
    AccumulatorConsistencyProof<TransactionAccumulatorDomain>;
