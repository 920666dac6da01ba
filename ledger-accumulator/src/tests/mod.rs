use ledger_proof_primitives::{HashValue, LeafDomain, LeafHash, TransactionAccumulatorDomain};

use crate::mock::MockAccumulator;


type Mock = MockAccumulator<TransactionAccumulatorDomain>;

/// `hash` with bit `bit` (MSB-first) inverted.
fn flip_bit(hash: HashValue, bit: usize) -> HashValue {
    let mut bytes = *hash.as_bytes();
    bytes[bit / 8] ^= 0x80 >> (bit % 8);
    HashValue::new(bytes)
}

/// `leaf` with bit `bit` inverted, still tagged with its domain.
fn flip_leaf_bit<D: LeafDomain>(leaf: LeafHash<D>, bit: usize) -> LeafHash<D> {
    LeafHash::from_hash_value_unchecked(flip_bit(leaf.hash_value(), bit))
}
