//! In-memory sparse Merkle tree that hands out honest proofs.
//!
//! Subtree hashes are recomputed from the sorted key set on every call; fine
//! for tests and benchmarks, nothing else.

use std::collections::BTreeMap;

use ledger_proof_primitives::{
    HashValue, SPARSE_MERKLE_PLACEHOLDER_HASH, SparseMerkleInternalDomain, hash_internal,
};

use crate::{SPARSE_MERKLE_TREE_DEPTH, SparseMerkleLeaf, SparseMerkleProof};

/// Key to value-digest map with sparse Merkle root and proof generation.
#[derive(Clone, Debug, Default)]
pub struct MockSparseMerkleTree {
    leaves: BTreeMap<HashValue, HashValue>,
}

impl MockSparseMerkleTree {
    /// Empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree holding `n` random keys, each with a random value digest.
    pub fn random(n: usize) -> Self {
        let mut tree = Self::new();
        while tree.len() < n {
            tree.insert(HashValue::random(), HashValue::random());
        }
        tree
    }

    /// Set `key` to `value_hash`, returning the previous value digest.
    pub fn insert(&mut self, key: HashValue, value_hash: HashValue) -> Option<HashValue> {
        self.leaves.insert(key, value_hash)
    }

    /// Remove `key`, returning its value digest.
    pub fn remove(&mut self, key: &HashValue) -> Option<HashValue> {
        self.leaves.remove(key)
    }

    /// Value digest stored under `key`.
    pub fn get(&self, key: &HashValue) -> Option<HashValue> {
        self.leaves.get(key).copied()
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Stored leaves in key order.
    pub fn leaves(&self) -> Vec<SparseMerkleLeaf> {
        self.leaves
            .iter()
            .map(|(key, value_hash)| SparseMerkleLeaf::new(*key, *value_hash))
            .collect()
    }

    /// Current root.
    pub fn root_hash(&self) -> HashValue {
        subtree_hash(&self.leaves(), 0)
    }

    /// Proof for `key`: membership if it is stored, non-membership
    /// otherwise.
    pub fn proof(&self, key: HashValue) -> SparseMerkleProof {
        let all = self.leaves();
        let mut subtree: &[SparseMerkleLeaf] = &all;
        let mut depth = 0;
        // Top-down siblings until the path reaches an empty or single-leaf
        // subtree.
        let mut path_siblings = Vec::new();
        while subtree.len() > 1 {
            let (left, right) = split_at_bit(subtree, depth);
            let (next, sibling) = if key.bit(depth) {
                (right, left)
            } else {
                (left, right)
            };
            path_siblings.push(subtree_hash(sibling, depth + 1));
            subtree = next;
            depth += 1;
        }

        let mut siblings = vec![SPARSE_MERKLE_PLACEHOLDER_HASH; SPARSE_MERKLE_TREE_DEPTH - depth];
        siblings.extend(path_siblings.into_iter().rev());
        SparseMerkleProof::new(subtree.first().copied(), siblings)
            .expect("proof always has one sibling per level")
    }
}

/// Hash of the subtree at `depth` holding `leaves` (sorted, sharing the first
/// `depth` key bits).
fn subtree_hash(leaves: &[SparseMerkleLeaf], depth: usize) -> HashValue {
    match leaves {
        [] => SPARSE_MERKLE_PLACEHOLDER_HASH,
        [leaf] => leaf.hash().hash_value(),
        _ => {
            let (left, right) = split_at_bit(leaves, depth);
            hash_internal::<SparseMerkleInternalDomain>(
                &subtree_hash(left, depth + 1),
                &subtree_hash(right, depth + 1),
            )
        }
    }
}

fn split_at_bit(
    leaves: &[SparseMerkleLeaf],
    depth: usize,
) -> (&[SparseMerkleLeaf], &[SparseMerkleLeaf]) {
    let mid = leaves.partition_point(|leaf| !leaf.key().bit(depth));
    leaves.split_at(mid)
}
