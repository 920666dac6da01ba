//! Append-only consistency between two accumulator sizes.
//!
//! The old accumulator's frozen subtree roots rebuild the old root. The same
//! roots followed by the aligned subtrees covering the appended leaves rebuild
//! the new root. Both folding to the claimed roots means the new accumulator
//! extends the old one.

use std::marker::PhantomData;

use bincode::{Decode, Encode};
use ledger_proof_primitives::{HashValue, InternalDomain, Result, VerifyError, codec};
use tracing::{debug, trace};

use crate::{
    position::{
        MAX_ACCUMULATOR_LEAVES, MAX_ACCUMULATOR_PROOF_DEPTH, aligned_subtrees,
        frozen_subtree_roots,
    },
    range_proof::MAX_RANGE_BOUNDARY_SIBLINGS,
    subtrees::fold_subtrees,
};

/// Consistency proof between two sizes of an accumulator whose internal
/// nodes hash under `H`.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccumulatorConsistencyProof<H: InternalDomain> {
    old_subtrees: Vec<HashValue>,
    new_subtrees: Vec<HashValue>,
    _domain: PhantomData<H>,
}

impl<H: InternalDomain> AccumulatorConsistencyProof<H> {
    /// Build a proof from the old accumulator's frozen subtree roots (largest
    /// first) and the aligned subtree roots over the appended leaves (left to
    /// right).
    pub fn new(old_subtrees: Vec<HashValue>, new_subtrees: Vec<HashValue>) -> Result<Self> {
        if old_subtrees.len() > MAX_ACCUMULATOR_PROOF_DEPTH {
            return Err(VerifyError::TooManySiblings {
                max: MAX_ACCUMULATOR_PROOF_DEPTH,
                actual: old_subtrees.len(),
            });
        }
        if new_subtrees.len() > MAX_RANGE_BOUNDARY_SIBLINGS {
            return Err(VerifyError::TooManySiblings {
                max: MAX_RANGE_BOUNDARY_SIBLINGS,
                actual: new_subtrees.len(),
            });
        }
        Ok(AccumulatorConsistencyProof {
            old_subtrees,
            new_subtrees,
            _domain: PhantomData,
        })
    }

    /// Proof between two equal sizes.
    pub fn new_empty() -> Self {
        AccumulatorConsistencyProof {
            old_subtrees: Vec::new(),
            new_subtrees: Vec::new(),
            _domain: PhantomData,
        }
    }

    /// Frozen subtree roots of the old accumulator.
    pub fn old_subtrees(&self) -> &[HashValue] {
        &self.old_subtrees
    }

    /// Subtree roots covering the appended leaves.
    pub fn new_subtrees(&self) -> &[HashValue] {
        &self.new_subtrees
    }

    /// Verify that the accumulator with `new_num_leaves` leaves and root
    /// `new_root` is an append-only extension of the one with
    /// `old_num_leaves` leaves and root `old_root`.
    pub fn verify(
        &self,
        old_root: HashValue,
        old_num_leaves: u64,
        new_root: HashValue,
        new_num_leaves: u64,
    ) -> Result<()> {
        self.verify_inner(old_root, old_num_leaves, new_root, new_num_leaves)
            .inspect_err(|e| {
                debug!(old_num_leaves, new_num_leaves, error = %e, "consistency proof rejected");
            })?;
        trace!(old_num_leaves, new_num_leaves, "consistency proof verified");
        Ok(())
    }

    fn verify_inner(
        &self,
        old_root: HashValue,
        old_num_leaves: u64,
        new_root: HashValue,
        new_num_leaves: u64,
    ) -> Result<()> {
        if new_num_leaves > MAX_ACCUMULATOR_LEAVES {
            return Err(VerifyError::InconsistentAccumulator(format!(
                "{} leaves exceeds the accumulator capacity of {}",
                new_num_leaves, MAX_ACCUMULATOR_LEAVES
            )));
        }
        if old_num_leaves > new_num_leaves {
            return Err(VerifyError::InconsistentAccumulator(format!(
                "accumulator shrank from {} to {} leaves",
                old_num_leaves, new_num_leaves
            )));
        }
        if old_num_leaves == new_num_leaves {
            if old_root != new_root {
                return Err(VerifyError::InconsistentAccumulator(format!(
                    "same size {} with different roots {} and {}",
                    old_num_leaves, old_root, new_root
                )));
            }
            if !self.old_subtrees.is_empty() || !self.new_subtrees.is_empty() {
                return Err(VerifyError::InconsistentAccumulator(
                    "proof between equal sizes must be empty".to_string(),
                ));
            }
            return Ok(());
        }

        let old_positions = frozen_subtree_roots(old_num_leaves);
        if old_positions.len() != self.old_subtrees.len() {
            return Err(VerifyError::ProofLengthMismatch {
                expected: old_positions.len(),
                actual: self.old_subtrees.len(),
            });
        }
        let new_positions = aligned_subtrees(old_num_leaves, new_num_leaves);
        if new_positions.len() != self.new_subtrees.len() {
            return Err(VerifyError::ProofLengthMismatch {
                expected: new_positions.len(),
                actual: self.new_subtrees.len(),
            });
        }

        let old_tiles: Vec<_> = old_positions
            .into_iter()
            .zip(self.old_subtrees.iter().copied())
            .collect();
        let computed_old = fold_subtrees::<H, _>(old_tiles.iter().copied(), old_num_leaves)
            .map_err(VerifyError::InconsistentAccumulator)?;
        if computed_old != old_root {
            return Err(VerifyError::InconsistentAccumulator(format!(
                "old subtrees fold to {}, expected old root {}",
                computed_old, old_root
            )));
        }

        let new_tiles = new_positions
            .into_iter()
            .zip(self.new_subtrees.iter().copied());
        let computed_new =
            fold_subtrees::<H, _>(old_tiles.into_iter().chain(new_tiles), new_num_leaves)
                .map_err(VerifyError::InconsistentAccumulator)?;
        if computed_new != new_root {
            return Err(VerifyError::InconsistentAccumulator(format!(
                "extended subtrees fold to {}, expected new root {}",
                computed_new, new_root
            )));
        }
        Ok(())
    }

    /// Encode with the proof encoding.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        codec::encode_to_vec(self)
    }

    /// Decode and check the subtree bounds.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let proof: Self = codec::decode_from_slice(bytes)?;
        Self::new(proof.old_subtrees, proof.new_subtrees)
    }
}
