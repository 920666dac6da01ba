use versioned_feature_core::FeatureVersion;

#[derive(Clone, Debug, Default)]
pub struct AccumulatorVersions {
    pub verify_inclusion: FeatureVersion,
    pub verify_range: FeatureVersion,
    pub verify_consistency: FeatureVersion,
    pub batch_verify_inclusion: FeatureVersion,
}

#[derive(Clone, Debug, Default)]
pub struct SparseMerkleVersions {
    pub verify_membership: FeatureVersion,
    pub batch_verify_membership: FeatureVersion,
}
