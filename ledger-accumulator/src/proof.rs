//! Single-leaf inclusion proofs.
//!
//! An [`AccumulatorProof`] carries one sibling per level, leaf to root. The
//! verifier walks up from the leaf's [`Position`], letting the position decide
//! which side each sibling goes on.

use std::marker::PhantomData;

use bincode::{Decode, Encode};
use ledger_proof_primitives::{
    HashValue, InternalDomain, LeafHash, Result, VerifyError, codec, hash_internal,
};
use tracing::{debug, trace};

use crate::position::{MAX_ACCUMULATOR_PROOF_DEPTH, Position, root_level};

/// Inclusion proof for one leaf of an accumulator whose internal nodes hash
/// under domain `H`.
///
/// The leaf must be a digest of `H`'s own leaf domain. Internal node digests
/// and leaves of other trees are rejected by the compiler:
///
/// ```compile_fail
/// use ledger_accumulator::TransactionAccumulatorProof;
/// use ledger_proof_primitives::{HashValue, TransactionAccumulatorDomain, hash_internal};
///
/// let proof = TransactionAccumulatorProof::new(vec![]).unwrap();
/// let zero = HashValue::zero();
/// let node = hash_internal::<TransactionAccumulatorDomain>(&zero, &zero);
/// let _ = proof.verify(node, node, 0, 1);
/// ```
///
/// ```compile_fail
/// use ledger_accumulator::TransactionAccumulatorProof;
/// use ledger_proof_primitives::{EventDomain, HashValue, hash_leaf};
///
/// let proof = TransactionAccumulatorProof::new(vec![]).unwrap();
/// let event = hash_leaf::<EventDomain>(b"event");
/// let _ = proof.verify(HashValue::zero(), event, 0, 1);
/// ```
///
/// ```
/// use ledger_accumulator::TransactionAccumulatorProof;
/// use ledger_proof_primitives::{TransactionInfoDomain, hash_leaf};
///
/// let leaf = hash_leaf::<TransactionInfoDomain>(b"transaction info");
/// let proof = TransactionAccumulatorProof::new(vec![]).unwrap();
/// assert!(proof.verify(leaf.hash_value(), leaf, 0, 1).is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AccumulatorProof<H: InternalDomain> {
    siblings: Vec<HashValue>,
    _domain: PhantomData<H>,
}

impl<H: InternalDomain> AccumulatorProof<H> {
    /// Build a proof from siblings ordered leaf to root.
    pub fn new(siblings: Vec<HashValue>) -> Result<Self> {
        if siblings.len() > MAX_ACCUMULATOR_PROOF_DEPTH {
            return Err(VerifyError::TooManySiblings {
                max: MAX_ACCUMULATOR_PROOF_DEPTH,
                actual: siblings.len(),
            });
        }
        Ok(AccumulatorProof {
            siblings,
            _domain: PhantomData,
        })
    }

    /// Siblings, leaf to root.
    pub fn siblings(&self) -> &[HashValue] {
        &self.siblings
    }

    /// Recompute the root implied by this proof for `leaf` at `leaf_index` in
    /// an accumulator of `num_leaves` leaves.
    pub fn root_hash(
        &self,
        leaf: LeafHash<H::Leaf>,
        leaf_index: u64,
        num_leaves: u64,
    ) -> Result<HashValue> {
        if leaf_index >= num_leaves {
            return Err(VerifyError::IndexOutOfRange {
                index: leaf_index,
                num_leaves,
            });
        }
        if self.siblings.len() > MAX_ACCUMULATOR_PROOF_DEPTH {
            return Err(VerifyError::TooManySiblings {
                max: MAX_ACCUMULATOR_PROOF_DEPTH,
                actual: self.siblings.len(),
            });
        }
        let expected = root_level(num_leaves) as usize;
        if self.siblings.len() != expected {
            return Err(VerifyError::ProofLengthMismatch {
                expected,
                actual: self.siblings.len(),
            });
        }

        let mut position = Position::from_leaf_index(leaf_index);
        let mut hash = leaf.hash_value();
        for sibling in &self.siblings {
            hash = if position.is_left_child() {
                hash_internal::<H>(&hash, sibling)
            } else {
                hash_internal::<H>(sibling, &hash)
            };
            position = position.parent();
        }
        Ok(hash)
    }

    /// Verify that `leaf` is leaf `leaf_index` of the accumulator with
    /// `num_leaves` leaves and root `expected_root`.
    pub fn verify(
        &self,
        expected_root: HashValue,
        leaf: LeafHash<H::Leaf>,
        leaf_index: u64,
        num_leaves: u64,
    ) -> Result<()> {
        let actual = self
            .root_hash(leaf, leaf_index, num_leaves)
            .inspect_err(|e| {
                debug!(leaf_index, num_leaves, error = %e, "malformed accumulator proof");
            })?;
        if actual != expected_root {
            debug!(
                leaf_index,
                num_leaves,
                %expected_root,
                %actual,
                "accumulator proof root mismatch"
            );
            return Err(VerifyError::RootHashMismatch {
                expected: expected_root,
                actual,
            });
        }
        trace!(leaf_index, num_leaves, "accumulator proof verified");
        Ok(())
    }

    /// Encode with the proof encoding.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        codec::encode_to_vec(self)
    }

    /// Decode and check the sibling bound.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let proof: Self = codec::decode_from_slice(bytes)?;
        Self::new(proof.siblings)
    }
}
