pub mod proof_versions;
pub mod v1;

pub use versioned_feature_core::*;

use crate::version::{
    proof_versions::{AccumulatorVersions, SparseMerkleVersions},
    v1::PROOF_V1,
};

/// Method versions for every verifier, keyed by protocol version.
#[derive(Clone, Debug, Default)]
pub struct ProofVersion {
    pub protocol_version: u32,
    pub accumulator: AccumulatorVersions,
    pub sparse_merkle: SparseMerkleVersions,
}

impl ProofVersion {
    pub fn first<'a>() -> &'a Self {
        PROOF_VERSIONS
            .first()
            .expect("expected to have a proof version")
    }

    pub fn latest<'a>() -> &'a Self {
        PROOF_VERSIONS
            .last()
            .expect("expected to have a proof version")
    }

    /// Look up the version set for a protocol version.
    pub fn get<'a>(protocol_version: u32) -> Option<&'a Self> {
        PROOF_VERSIONS
            .iter()
            .find(|v| v.protocol_version == protocol_version)
    }
}

pub const PROOF_VERSIONS: &[ProofVersion] = &[PROOF_V1];
