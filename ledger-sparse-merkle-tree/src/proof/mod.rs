//! Sparse Merkle proof data.
//!
//! A `SparseMerkleProof` always carries one sibling per tree level, ordered
//! from the leaf level (depth 256) up to the children of the root (depth 1).
//! Subtrees holding a single leaf are represented by that leaf, so a path
//! usually ends well above depth 256; the levels below that terminal node are
//! filled with [`SPARSE_MERKLE_PLACEHOLDER_HASH`].

use bincode::{Decode, Encode};
use ledger_proof_primitives::{
    HashValue, Result, SPARSE_MERKLE_PLACEHOLDER_HASH, VerifyError, codec,
};

use crate::SparseMerkleLeaf;

mod tests;

/// Depth of the tree: one level per key bit.
pub const SPARSE_MERKLE_TREE_DEPTH: usize = HashValue::LENGTH_IN_BITS;

/// Membership or non-membership proof for one key.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparseMerkleProof {
    /// Leaf found at the end of the key's path, if the path ends in a leaf
    /// rather than an empty subtree.
    pub(crate) leaf: Option<SparseMerkleLeaf>,
    /// Siblings from the leaf level to the root.
    pub(crate) siblings: Vec<HashValue>,
}

impl SparseMerkleProof {
    /// Build a proof. `siblings` must hold exactly
    /// [`SPARSE_MERKLE_TREE_DEPTH`] digests, leaf level first.
    pub fn new(leaf: Option<SparseMerkleLeaf>, siblings: Vec<HashValue>) -> Result<Self> {
        if siblings.len() != SPARSE_MERKLE_TREE_DEPTH {
            return Err(VerifyError::ProofLengthMismatch {
                expected: SPARSE_MERKLE_TREE_DEPTH,
                actual: siblings.len(),
            });
        }
        Ok(SparseMerkleProof { leaf, siblings })
    }

    /// The leaf at the end of the path.
    pub fn leaf(&self) -> Option<&SparseMerkleLeaf> {
        self.leaf.as_ref()
    }

    /// Siblings from the leaf level to the root.
    pub fn siblings(&self) -> &[HashValue] {
        &self.siblings
    }

    /// Depth of the node where the path ends: the number of siblings left
    /// after dropping the run of placeholders at the leaf level.
    pub fn terminal_depth(&self) -> usize {
        let padding = self
            .siblings
            .iter()
            .take_while(|sibling| **sibling == SPARSE_MERKLE_PLACEHOLDER_HASH)
            .count();
        self.siblings.len() - padding
    }

    /// Encode with the proof encoding.
    pub fn encode_to_vec(&self) -> Result<Vec<u8>> {
        codec::encode_to_vec(self)
    }

    /// Decode and check the sibling count.
    pub fn decode_from_slice(bytes: &[u8]) -> Result<Self> {
        let proof: Self = codec::decode_from_slice(bytes)?;
        Self::new(proof.leaf, proof.siblings)
    }
}
