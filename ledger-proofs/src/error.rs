use ledger_proof_primitives::VerifyError;
use ledger_proof_version::error::ProofVersionError;

/// Errors returned by the versioned entry points.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The proof was rejected.
    #[error(transparent)]
    Verify(#[from] VerifyError),
    /// The requested method version is not implemented.
    #[error("version error: {0}")]
    VersionError(#[from] ProofVersionError),
}

/// Alias for `core::result::Result<T, Error>`.
pub type Result<T> = core::result::Result<T, Error>;
