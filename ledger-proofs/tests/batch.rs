use assert_matches::assert_matches;
use ledger_accumulator::{MockAccumulator, mock::mock_leaf};
use ledger_proof_primitives::TransactionAccumulatorDomain;
use ledger_proofs::*;
use ledger_sparse_merkle_tree::MockSparseMerkleTree;
use proptest::prelude::*;

fn state_requests(state: &MockSparseMerkleTree, absent: usize) -> Vec<StateProofRequest> {
    let mut requests: Vec<StateProofRequest> = state
        .leaves()
        .into_iter()
        .map(|leaf| StateProofRequest {
            key: leaf.key(),
            value_hash: Some(leaf.value_hash()),
            proof: state.proof(leaf.key()),
        })
        .collect();
    for _ in 0..absent {
        let key = HashValue::random();
        requests.push(StateProofRequest {
            key,
            value_hash: None,
            proof: state.proof(key),
        });
    }
    requests
}

#[test]
fn test_state_batch_reports_each_proof() {
    let state = MockSparseMerkleTree::random(40);
    let mut requests = state_requests(&state, 10);
    let forged = HashValue::random();
    requests[7].value_hash = Some(forged);
    requests[45].value_hash = Some(forged);

    let results = verify_state_proofs_batch(&requests, state.root_hash(), ProofVersion::latest())
        .expect("known version");
    assert_eq!(results.len(), requests.len());
    for (i, result) in results.iter().enumerate() {
        if i == 7 || i == 45 {
            assert_matches!(result, Err(VerifyError::ProofLeafMismatch(_)));
        } else {
            assert_eq!(result, &Ok(()), "request {}", i);
        }
    }
}

#[test]
fn test_small_batch_runs_sequentially_with_same_results() {
    let state = MockSparseMerkleTree::random(2);
    let requests = state_requests(&state, 1);
    assert!(requests.len() < PARALLEL_THRESHOLD);
    let results = verify_state_proofs_batch(&requests, state.root_hash(), ProofVersion::latest())
        .expect("known version");
    assert!(results.iter().all(|result| result.is_ok()));
}

#[test]
fn test_empty_batches() {
    let version = ProofVersion::latest();
    assert_eq!(
        verify_state_proofs_batch(&[], HashValue::zero(), version),
        Ok(vec![])
    );
    assert_eq!(
        verify_transaction_inclusions_batch(&[], HashValue::zero(), 0, version),
        Ok(vec![])
    );
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn test_transaction_batch_matches_individual(
        num_transactions in 1u64..300,
        picks in prop::collection::vec(any::<u64>(), 0..40),
        tampered in any::<prop::sample::Index>(),
    ) {
        let ledger =
            MockAccumulator::<TransactionAccumulatorDomain>::with_leaf_count(num_transactions);
        let root = ledger.root_hash();
        let mut requests: Vec<TransactionInclusionRequest> = picks
            .iter()
            .map(|pick| {
                let index = pick % num_transactions;
                TransactionInclusionRequest {
                    transaction_info_hash: mock_leaf(index),
                    transaction_index: index,
                    proof: ledger.inclusion_proof(index),
                }
            })
            .collect();
        if !requests.is_empty() {
            let i = tampered.index(requests.len());
            requests[i].transaction_info_hash =
                hash_leaf::<TransactionInfoDomain>(HashValue::random().as_bytes());
        }

        let results = verify_transaction_inclusions_batch(
            &requests,
            root,
            num_transactions,
            ProofVersion::latest(),
        )
        .expect("known version");
        prop_assert_eq!(results.len(), requests.len());
        for (request, result) in requests.iter().zip(results) {
            let individual = verify_transaction_inclusion(
                &request.proof,
                root,
                request.transaction_info_hash,
                request.transaction_index,
                num_transactions,
                ProofVersion::latest(),
            )
            .map_err(|e| match e {
                Error::Verify(e) => e,
                other => panic!("unexpected {}", other),
            });
            prop_assert_eq!(result, individual);
        }
    }
}
