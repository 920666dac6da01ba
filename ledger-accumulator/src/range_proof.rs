//! Proofs for a contiguous run of leaves.
//!
//! The run `[first, first + len)` is authenticated by the frozen subtree roots
//! to its left and the maximal aligned subtrees to its right. Together with the
//! leaves themselves they tile the whole accumulator, which
//! [`fold_subtrees`](crate::subtrees::fold_subtrees) turns back into a root.

use std::marker::PhantomData;

use bincode::{Decode, Encode};
use ledger_proof_primitives::{HashValue, InternalDomain, LeafHash, Result, VerifyError, codec};
use tracing::{debug, trace};

use crate::{
    position::{
        MAX_ACCUMULATOR_LEAVES, MAX_ACCUMULATOR_PROOF_DEPTH, Position, aligned_subtrees,
        frozen_subtree_roots,
    },
    subtrees::fold_subtrees,
};

/// Bound on either boundary list. A maximal aligned decomposition of any
/// interval climbs at most once and descends at most once.
pub const MAX_RANGE_BOUNDARY_SIBLINGS: usize = 2 * MAX_ACCUMULATOR_PROOF_DEPTH;

/// Range proof over an accumulator whose internal nodes hash under `H`.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccumulatorRangeProof<H: InternalDomain> {
    left_siblings: Vec<HashValue>,
    right_siblings: Vec<HashValue>,
    _domain: PhantomData<H>,
}

impl<H: InternalDomain> AccumulatorRangeProof<H> {
    /// Build a proof from the frozen roots left of the range (largest first)
    /// and the aligned subtree roots right of it (left to right).
    pub fn new(left_siblings: Vec<HashValue>, right_siblings: Vec<HashValue>) -> Result<Self> {
        for side in [&left_siblings, &right_siblings] {
            if side.len() > MAX_RANGE_BOUNDARY_SIBLINGS {
                return Err(VerifyError::TooManySiblings {
                    max: MAX_RANGE_BOUNDARY_SIBLINGS,
                    actual: side.len(),
                });
            }
        }
        Ok(AccumulatorRangeProof {
            left_siblings,
            right_siblings,
            _domain: PhantomData,
        })
    }

    /// Proof with no boundary roots: valid for a range covering every leaf.
    pub fn new_empty() -> Self {
        AccumulatorRangeProof {
            left_siblings: Vec::new(),
            right_siblings: Vec::new(),
            _domain: PhantomData,
        }
    }

    /// Frozen subtree roots covering the leaves before the range.
    pub fn left_siblings(&self) -> &[HashValue] {
        &self.left_siblings
    }

    /// Aligned subtree roots covering the leaves after the range.
    pub fn right_siblings(&self) -> &[HashValue] {
        &self.right_siblings
    }

    /// Root implied by `leaves` starting at `first_leaf_index` in an
    /// accumulator of `num_leaves` leaves.
    pub fn root_hash(
        &self,
        num_leaves: u64,
        first_leaf_index: u64,
        leaves: &[LeafHash<H::Leaf>],
    ) -> Result<HashValue> {
        let end = first_leaf_index
            .checked_add(leaves.len() as u64)
            .filter(|end| *end <= num_leaves)
            .ok_or(VerifyError::IndexOutOfRange {
                index: first_leaf_index,
                num_leaves,
            })?;
        if num_leaves > MAX_ACCUMULATOR_LEAVES {
            return Err(VerifyError::MalformedRangeProof(format!(
                "{} leaves exceeds the accumulator capacity of {}",
                num_leaves, MAX_ACCUMULATOR_LEAVES
            )));
        }

        let left_positions = frozen_subtree_roots(first_leaf_index);
        if left_positions.len() != self.left_siblings.len() {
            return Err(VerifyError::MalformedRangeProof(format!(
                "{} left siblings, leaves before index {} need {}",
                self.left_siblings.len(),
                first_leaf_index,
                left_positions.len()
            )));
        }
        let right_positions = aligned_subtrees(end, num_leaves);
        if right_positions.len() != self.right_siblings.len() {
            return Err(VerifyError::MalformedRangeProof(format!(
                "{} right siblings, leaves {}..{} need {}",
                self.right_siblings.len(),
                end,
                num_leaves,
                right_positions.len()
            )));
        }

        let left = left_positions
            .into_iter()
            .zip(self.left_siblings.iter().copied());
        let range = leaves.iter().enumerate().map(|(i, leaf)| {
            (
                Position::from_leaf_index(first_leaf_index + i as u64),
                leaf.hash_value(),
            )
        });
        let right = right_positions
            .into_iter()
            .zip(self.right_siblings.iter().copied());

        fold_subtrees::<H, _>(left.chain(range).chain(right), num_leaves)
            .map_err(VerifyError::MalformedRangeProof)
    }

    /// Verify that `leaves` are leaves `first_leaf_index..` of the
    /// accumulator with `num_leaves` leaves and root `expected_root`.
    ///
    /// An empty `leaves` slice proves nothing about any leaf, but the proof
    /// must still fold to `expected_root`.
    pub fn verify(
        &self,
        expected_root: HashValue,
        num_leaves: u64,
        first_leaf_index: u64,
        leaves: &[LeafHash<H::Leaf>],
    ) -> Result<()> {
        let num_range_leaves = leaves.len();
        let actual = self
            .root_hash(num_leaves, first_leaf_index, leaves)
            .inspect_err(|e| {
                debug!(
                    first_leaf_index,
                    num_range_leaves,
                    num_leaves,
                    error = %e,
                    "malformed accumulator range proof"
                );
            })?;
        if actual != expected_root {
            debug!(
                first_leaf_index,
                num_range_leaves,
                num_leaves,
                %expected_root,
                %actual,
                "accumulator range proof root mismatch"
            );
            return Err(VerifyError::RootHashMismatch {
                expected: expected_root,
                actual,
            });
        }
        trace!(first_leaf_index, num_range_leaves, num_leaves, "accumulator range proof verified");
        Ok(())
    }

    /// Encode with the proof encoding.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        codec::encode_to_vec(self)
    }

    /// Decode and check the boundary bounds.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let proof: Self = codec::decode_from_slice(bytes)?;
        Self::new(proof.left_siblings, proof.right_siblings)
    }
}
