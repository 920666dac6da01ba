//! In-memory accumulator that hands out honest proofs.
//!
//! Every node hash is recomputed from the leaves on demand, so this is only
//! suitable for tests and benchmarks.

use std::marker::PhantomData;

use ledger_proof_primitives::{
    ACCUMULATOR_PLACEHOLDER_HASH, HashValue, InternalDomain, LeafHash, TransactionInfoDomain,
    hash_internal, hash_leaf,
};

use crate::{
    AccumulatorConsistencyProof, AccumulatorProof, AccumulatorRangeProof,
    position::{Position, aligned_subtrees, frozen_subtree_roots, root_level},
};

/// Append-only list of leaf digests with proof generation.
#[derive(Clone, Debug, Default)]
pub struct MockAccumulator<H: InternalDomain> {
    leaves: Vec<LeafHash<H::Leaf>>,
    _domain: PhantomData<H>,
}

impl<H: InternalDomain> MockAccumulator<H> {
    /// Accumulator over the given leaf digests.
    pub fn from_leaves(leaves: Vec<LeafHash<H::Leaf>>) -> Self {
        MockAccumulator {
            leaves,
            _domain: PhantomData,
        }
    }

    /// Accumulator over `num_leaves` deterministic leaves: leaf `i` hashes the
    /// big-endian bytes of `i`, so the transaction accumulator's leaves are
    /// [`mock_leaf`]`(i)`.
    pub fn with_leaf_count(num_leaves: u64) -> Self {
        Self::from_leaves(
            (0..num_leaves)
                .map(|i| hash_leaf::<H::Leaf>(&i.to_be_bytes()))
                .collect(),
        )
    }

    /// Append one leaf.
    pub fn append(&mut self, leaf: LeafHash<H::Leaf>) {
        self.leaves.push(leaf);
    }

    /// All leaves in order.
    pub fn leaves(&self) -> &[LeafHash<H::Leaf>] {
        &self.leaves
    }

    /// Current number of leaves.
    pub fn num_leaves(&self) -> u64 {
        self.leaves.len() as u64
    }

    /// Root at the current size.
    pub fn root_hash(&self) -> HashValue {
        self.root_hash_at(self.num_leaves())
    }

    /// Root of the prefix holding the first `num_leaves` leaves.
    pub fn root_hash_at(&self, num_leaves: u64) -> HashValue {
        self.node_hash(Position::root_from_num_leaves(num_leaves), num_leaves)
    }

    /// Hash of `position` in the prefix holding the first `num_leaves` leaves.
    pub fn node_hash(&self, position: Position, num_leaves: u64) -> HashValue {
        assert!(num_leaves <= self.num_leaves(), "prefix longer than accumulator");
        if position.is_placeholder(num_leaves) {
            return ACCUMULATOR_PLACEHOLDER_HASH;
        }
        match (position.left_child(), position.right_child()) {
            (Some(left), Some(right)) => hash_internal::<H>(
                &self.node_hash(left, num_leaves),
                &self.node_hash(right, num_leaves),
            ),
            _ => self.leaves[position.first_leaf_index() as usize].hash_value(),
        }
    }

    /// Inclusion proof for `leaf_index` at the current size.
    pub fn inclusion_proof(&self, leaf_index: u64) -> AccumulatorProof<H> {
        self.inclusion_proof_at(leaf_index, self.num_leaves())
    }

    /// Inclusion proof for `leaf_index` against the root at `num_leaves`.
    pub fn inclusion_proof_at(&self, leaf_index: u64, num_leaves: u64) -> AccumulatorProof<H> {
        assert!(leaf_index < num_leaves, "leaf index out of range");
        let mut position = Position::from_leaf_index(leaf_index);
        let mut siblings = Vec::new();
        for _ in 0..root_level(num_leaves) {
            siblings.push(self.node_hash(position.sibling(), num_leaves));
            position = position.parent();
        }
        AccumulatorProof::new(siblings).expect("accumulator height fits a proof")
    }

    /// Range proof for `len` leaves starting at `first_leaf_index`, at the
    /// current size.
    pub fn range_proof(&self, first_leaf_index: u64, len: u64) -> AccumulatorRangeProof<H> {
        let num_leaves = self.num_leaves();
        let end = first_leaf_index + len;
        assert!(end <= num_leaves, "range out of bounds");
        let left = self.subtree_hashes(frozen_subtree_roots(first_leaf_index), num_leaves);
        let right = self.subtree_hashes(aligned_subtrees(end, num_leaves), num_leaves);
        AccumulatorRangeProof::new(left, right).expect("boundary fits a proof")
    }

    /// Consistency proof from the prefix of `old_num_leaves` leaves to the
    /// prefix of `new_num_leaves` leaves.
    pub fn consistency_proof(
        &self,
        old_num_leaves: u64,
        new_num_leaves: u64,
    ) -> AccumulatorConsistencyProof<H> {
        assert!(old_num_leaves <= new_num_leaves, "old size after new size");
        if old_num_leaves == new_num_leaves {
            return AccumulatorConsistencyProof::new_empty();
        }
        let old = self.subtree_hashes(frozen_subtree_roots(old_num_leaves), old_num_leaves);
        let new = self.subtree_hashes(
            aligned_subtrees(old_num_leaves, new_num_leaves),
            new_num_leaves,
        );
        AccumulatorConsistencyProof::new(old, new).expect("subtrees fit a proof")
    }

    fn subtree_hashes(&self, positions: Vec<Position>, num_leaves: u64) -> Vec<HashValue> {
        positions
            .into_iter()
            .map(|position| self.node_hash(position, num_leaves))
            .collect()
    }
}

/// Deterministic transaction info digest for index `i`.
pub fn mock_leaf(i: u64) -> LeafHash<TransactionInfoDomain> {
    hash_leaf::<TransactionInfoDomain>(&i.to_be_bytes())
}
