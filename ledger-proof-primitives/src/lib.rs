//! Shared building blocks for ledger proof verification.
//!
//! - [`HashValue`]: the 256-bit digest every proof is made of.
//! - Typed hash domains ([`LeafDomain`], [`InternalDomain`]) with
//!   [`hash_leaf`], which returns a domain-tagged [`LeafHash`], and
//!   [`hash_internal`].
//! - [`VerifyError`]: the error returned by every verifier.

pub mod codec;
mod domain;
mod error;
mod hash_value;

pub use domain::{
    ACCUMULATOR_PLACEHOLDER_HASH, DomainHasher, EventAccumulatorDomain, EventDomain, HashDomain,
    InternalDomain, LeafDomain, LeafHash, SPARSE_MERKLE_PLACEHOLDER_HASH,
    SparseMerkleInternalDomain, SparseMerkleLeafDomain, TransactionAccumulatorDomain,
    TransactionInfoDomain, hash_internal, hash_leaf,
};
pub use error::VerifyError;
pub use hash_value::HashValue;

/// Alias for `core::result::Result<T, VerifyError>`.
pub type Result<T> = core::result::Result<T, VerifyError>;
