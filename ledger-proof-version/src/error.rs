use thiserror::Error;
use versioned_feature_core::FeatureVersion;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProofVersionError {
    /// Expected some specific versions
    #[error("proof unknown version on {method}, received: {received}")]
    UnknownVersionMismatch {
        /// method
        method: String,
        /// the allowed versions for this method
        known_versions: Vec<FeatureVersion>,
        /// the version that was requested
        received: FeatureVersion,
    },
}
