use ledger_proof_primitives::HashValue;
use ledger_proof_version::{check_v0, version::ProofVersion};
use ledger_sparse_merkle_tree::SparseMerkleProof;

use crate::error::Result;

/// Verify an account state proof: `key` holds `value_hash` (`Some`) or is
/// absent (`None`) in the state tree with root `expected_root`.
pub fn verify_state_proof(
    proof: &SparseMerkleProof,
    expected_root: HashValue,
    key: HashValue,
    value_hash: Option<HashValue>,
    version: &ProofVersion,
) -> Result<()> {
    check_v0!(
        "verify_state_proof",
        version.sparse_merkle.verify_membership
    );
    Ok(proof.verify(expected_root, key, value_hash)?)
}
