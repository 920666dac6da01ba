//! Sparse Merkle tree proofs.
//!
//! A binary tree of depth 256 addressed by the bits of a key digest, most
//! significant bit first. A subtree holding a single leaf is represented by
//! the leaf itself and an empty subtree by
//! [`SPARSE_MERKLE_PLACEHOLDER_HASH`](ledger_proof_primitives::SPARSE_MERKLE_PLACEHOLDER_HASH):
//!
//! - leaf: `hash_leaf::<SparseMerkleLeafDomain>(key || value_hash)`
//! - internal: `hash_internal::<SparseMerkleInternalDomain>(left, right)`
//!
//! [`SparseMerkleProof`] proves either that a key holds a value or that it is
//! absent, the latter by ending in an empty subtree or in the leaf of another
//! key that shares the queried key's path.

#![warn(missing_docs)]

mod leaf;
/// In-memory tree for generating proofs (requires `test_utils` feature).
#[cfg(any(test, feature = "test_utils"))]
pub mod mock;
mod proof;
mod verify;


pub use leaf::SparseMerkleLeaf;
#[cfg(any(test, feature = "test_utils"))]
pub use mock::MockSparseMerkleTree;
pub use proof::{SPARSE_MERKLE_TREE_DEPTH, SparseMerkleProof};
