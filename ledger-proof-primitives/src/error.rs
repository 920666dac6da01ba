use thiserror::Error;

use crate::HashValue;

/// Why a proof was rejected.
///
/// Every verifier returns this; none of the variants is retryable. Structural
/// problems are reported separately from [`VerifyError::RootHashMismatch`] so a
/// caller can tell a malformed proof from a proof of some other root.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VerifyError {
    #[error("leaf index {index} out of range (num_leaves={num_leaves})")]
    IndexOutOfRange { index: u64, num_leaves: u64 },
    #[error("proof has {actual} siblings, expected {expected}")]
    ProofLengthMismatch { expected: usize, actual: usize },
    #[error("proof has {actual} siblings, more than the maximum of {max}")]
    TooManySiblings { max: usize, actual: usize },
    #[error("malformed range proof: {0}")]
    MalformedRangeProof(String),
    #[error("inconsistent accumulator: {0}")]
    InconsistentAccumulator(String),
    #[error(
        "non-inclusion leaf shares {common_prefix_bits} bits with the key but terminates at depth \
         {terminal_depth}"
    )]
    NonInclusionDivergenceInvalid {
        common_prefix_bits: usize,
        terminal_depth: usize,
    },
    #[error("proof leaf mismatch: {0}")]
    ProofLeafMismatch(String),
    #[error("root hash mismatch: expected {expected}, got {actual}")]
    RootHashMismatch {
        expected: HashValue,
        actual: HashValue,
    },
    #[error("decode error: {0}")]
    DecodeError(String),
    #[error("encode error: {0}")]
    EncodeError(String),
}
