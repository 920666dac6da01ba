use bincode::{Decode, Encode};
use ledger_proof_primitives::{DomainHasher, HashValue, LeafHash, SparseMerkleLeafDomain};

/// A key and the digest of its value, as stored at the bottom of a subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SparseMerkleLeaf {
    key: HashValue,
    value_hash: HashValue,
}

impl SparseMerkleLeaf {
    /// Leaf for `key` holding a value whose digest is `value_hash`.
    pub fn new(key: HashValue, value_hash: HashValue) -> Self {
        SparseMerkleLeaf { key, value_hash }
    }

    /// The key digest; its bits are the path from the root.
    pub fn key(&self) -> HashValue {
        self.key
    }

    /// Digest of the stored value.
    pub fn value_hash(&self) -> HashValue {
        self.value_hash
    }

    /// `hash_leaf::<SparseMerkleLeafDomain>(key || value_hash)`.
    pub fn hash(&self) -> LeafHash<SparseMerkleLeafDomain> {
        DomainHasher::<SparseMerkleLeafDomain>::new()
            .update(self.key.as_bytes())
            .update(self.value_hash.as_bytes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use ledger_proof_primitives::hash_leaf;

    use super::*;

    #[test]
    fn test_leaf_hash_is_key_then_value() {
        let key = HashValue::new([0xAA; 32]);
        let value_hash = HashValue::new([0xBB; 32]);
        let mut payload = [0u8; 64];
        payload[..32].copy_from_slice(key.as_bytes());
        payload[32..].copy_from_slice(value_hash.as_bytes());

        let leaf = SparseMerkleLeaf::new(key, value_hash);
        assert_eq!(leaf.hash(), hash_leaf::<SparseMerkleLeafDomain>(&payload));
        assert_ne!(leaf.hash(), SparseMerkleLeaf::new(value_hash, key).hash());
    }
}
