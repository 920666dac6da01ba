use crate::version::{
    ProofVersion,
    proof_versions::{AccumulatorVersions, SparseMerkleVersions},
};

pub const PROOF_V1: ProofVersion = ProofVersion {
    protocol_version: 0,
    accumulator: AccumulatorVersions {
        verify_inclusion: 0,
        verify_range: 0,
        verify_consistency: 0,
        batch_verify_inclusion: 0,
    },
    sparse_merkle: SparseMerkleVersions {
        verify_membership: 0,
        batch_verify_membership: 0,
    },
};
