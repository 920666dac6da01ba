#[cfg(test)]
mod proof_tests {
    use assert_matches::assert_matches;
    use ledger_proof_primitives::{HashValue, SPARSE_MERKLE_PLACEHOLDER_HASH, VerifyError, codec};

    use crate::{MockSparseMerkleTree, SPARSE_MERKLE_TREE_DEPTH, SparseMerkleLeaf, SparseMerkleProof};

    #[test]
    fn test_new_requires_full_depth() {
        assert_matches!(
            SparseMerkleProof::new(None, vec![HashValue::zero(); 255]),
            Err(VerifyError::ProofLengthMismatch {
                expected: 256,
                actual: 255
            })
        );
        assert!(SparseMerkleProof::new(None, vec![HashValue::zero(); 256]).is_ok());
    }

    #[test]
    fn test_terminal_depth_counts_non_padding_levels() {
        let mut siblings = vec![SPARSE_MERKLE_PLACEHOLDER_HASH; SPARSE_MERKLE_TREE_DEPTH];
        let proof = SparseMerkleProof::new(None, siblings.clone()).expect("full depth");
        assert_eq!(proof.terminal_depth(), 0);

        siblings[250] = HashValue::new([7u8; 32]);
        let proof = SparseMerkleProof::new(None, siblings.clone()).expect("full depth");
        assert_eq!(proof.terminal_depth(), 6);

        // Placeholders above the first real sibling are part of the path.
        siblings[253] = HashValue::new([9u8; 32]);
        let proof = SparseMerkleProof::new(None, siblings).expect("full depth");
        assert_eq!(proof.terminal_depth(), 6);
    }

    #[test]
    fn test_codec_roundtrip() {
        let tree = MockSparseMerkleTree::random(50);
        let key = tree.leaves()[17].key();
        let proof = tree.proof(key);
        let bytes = proof.encode_to_vec().expect("encode");
        assert_eq!(
            SparseMerkleProof::decode_from_slice(&bytes).expect("decode"),
            proof
        );
    }

    #[test]
    fn test_decode_rejects_short_sibling_list() {
        let short = (
            Some(SparseMerkleLeaf::new(HashValue::zero(), HashValue::zero())),
            vec![SPARSE_MERKLE_PLACEHOLDER_HASH; 10],
        );
        let bytes = codec::encode_to_vec(&short).expect("encode");
        assert_matches!(
            SparseMerkleProof::decode_from_slice(&bytes),
            Err(VerifyError::ProofLengthMismatch { actual: 10, .. })
        );
    }
}
