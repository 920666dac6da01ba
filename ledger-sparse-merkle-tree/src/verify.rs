//! Proof verification for the sparse Merkle tree.
//!
//! Pure functions. The root is recomputed from the terminal node (a leaf or
//! an empty subtree) up along the queried key's bit path and compared with the
//! trusted root.

use ledger_proof_primitives::{
    HashValue, Result, SPARSE_MERKLE_PLACEHOLDER_HASH, SparseMerkleInternalDomain, VerifyError,
    hash_internal,
};
use tracing::{debug, trace};

use crate::{SPARSE_MERKLE_TREE_DEPTH, SparseMerkleProof};

impl SparseMerkleProof {
    /// Verify that `key` maps to `value_hash` (`Some`) or is absent (`None`)
    /// in the tree with root `expected_root`.
    ///
    /// A non-membership proof may end in a leaf for another key, provided
    /// that key shares the queried key's path all the way to the terminal
    /// node.
    pub fn verify(
        &self,
        expected_root: HashValue,
        key: HashValue,
        value_hash: Option<HashValue>,
    ) -> Result<()> {
        let membership = value_hash.is_some();
        let actual = self.root_hash(key).inspect_err(|e| {
            debug!(%key, membership, error = %e, "malformed sparse merkle proof");
        })?;
        self.check_leaf(key, value_hash).inspect_err(|e| {
            debug!(%key, membership, error = %e, "sparse merkle proof leaf rejected");
        })?;
        if actual != expected_root {
            debug!(
                %key,
                membership,
                %expected_root,
                %actual,
                "sparse merkle proof root mismatch"
            );
            return Err(VerifyError::RootHashMismatch {
                expected: expected_root,
                actual,
            });
        }
        trace!(
            %key,
            membership,
            terminal_depth = self.terminal_depth(),
            "sparse merkle proof verified"
        );
        Ok(())
    }

    /// Root implied by this proof along `key`'s path, without checking what
    /// the proof says about `key`.
    pub fn root_hash(&self, key: HashValue) -> Result<HashValue> {
        if self.siblings.len() != SPARSE_MERKLE_TREE_DEPTH {
            return Err(VerifyError::ProofLengthMismatch {
                expected: SPARSE_MERKLE_TREE_DEPTH,
                actual: self.siblings.len(),
            });
        }
        let terminal_depth = self.terminal_depth();
        let padding = SPARSE_MERKLE_TREE_DEPTH - terminal_depth;

        let mut current = match &self.leaf {
            Some(leaf) => leaf.hash().hash_value(),
            None => SPARSE_MERKLE_PLACEHOLDER_HASH,
        };
        // siblings[i] sits at depth 256 - i; the node being folded reached
        // that depth through key bit 255 - i.
        for (i, sibling) in self.siblings.iter().enumerate().skip(padding) {
            current = if key.bit(SPARSE_MERKLE_TREE_DEPTH - 1 - i) {
                hash_internal::<SparseMerkleInternalDomain>(sibling, &current)
            } else {
                hash_internal::<SparseMerkleInternalDomain>(&current, sibling)
            };
        }
        Ok(current)
    }

    fn check_leaf(&self, key: HashValue, value_hash: Option<HashValue>) -> Result<()> {
        match (value_hash, &self.leaf) {
            (Some(_), None) => Err(VerifyError::ProofLeafMismatch(format!(
                "membership proof for {} ends in an empty subtree",
                key
            ))),
            (Some(value_hash), Some(leaf)) => {
                if leaf.key() != key {
                    return Err(VerifyError::ProofLeafMismatch(format!(
                        "membership proof for {} ends in leaf for {}",
                        key,
                        leaf.key()
                    )));
                }
                if leaf.value_hash() != value_hash {
                    return Err(VerifyError::ProofLeafMismatch(format!(
                        "leaf for {} holds value {}, expected {}",
                        key,
                        leaf.value_hash(),
                        value_hash
                    )));
                }
                Ok(())
            }
            (None, None) => Ok(()),
            (None, Some(leaf)) => {
                let common_prefix_bits = leaf.key().common_prefix_bits_len(&key);
                let terminal_depth = self.terminal_depth();
                // Equal keys share all 256 bits; that leaf proves membership.
                if leaf.key() == key || common_prefix_bits < terminal_depth {
                    return Err(VerifyError::NonInclusionDivergenceInvalid {
                        common_prefix_bits,
                        terminal_depth,
                    });
                }
                Ok(())
            }
        }
    }
}
