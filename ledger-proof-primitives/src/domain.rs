//! Typed hash domains.
//!
//! Every digest is produced under exactly one domain:
//!
//! - Leaf payloads:  `blake3(len(label) || label || payload)`
//! - Internal nodes: `blake3(len(label) || label || left || right)`
//!
//! [`LeafDomain`] and [`InternalDomain`] are disjoint marker traits.
//! [`hash_leaf`] only accepts the former and returns a [`LeafHash`] tagged with
//! its domain; [`hash_internal`] only accepts the latter and returns a plain
//! [`HashValue`]. Each internal-node domain names the leaf domain it is built
//! over, so a tree's verifiers only take leaves of that one domain.
//!
//! An internal node digest is not a leaf:
//!
//! ```compile_fail
//! use ledger_proof_primitives::{
//!     HashValue, LeafHash, TransactionAccumulatorDomain, TransactionInfoDomain, hash_internal,
//! };
//!
//! let zero = HashValue::zero();
//! let node = hash_internal::<TransactionAccumulatorDomain>(&zero, &zero);
//! let leaf: LeafHash<TransactionInfoDomain> = node;
//! ```
//!
//! Nor is a leaf of another domain:
//!
//! ```compile_fail
//! use ledger_proof_primitives::{EventDomain, LeafHash, TransactionInfoDomain, hash_leaf};
//!
//! let leaf: LeafHash<TransactionInfoDomain> = hash_leaf::<EventDomain>(b"event");
//! ```

use std::{fmt, marker::PhantomData};

use bincode::{Decode, Encode};

use crate::HashValue;

mod sealed {
    pub trait Sealed {}
}

/// A hash domain: a zero-sized marker carrying a unique label.
pub trait HashDomain:
    Copy
    + Clone
    + fmt::Debug
    + Default
    + PartialEq
    + Eq
    + Encode
    + Decode<()>
    + Send
    + Sync
    + 'static
{
    /// Domain label. Must be unique across every domain and shorter than 256
    /// bytes.
    const LABEL: &'static [u8];
}

/// Domain for hashing leaf payloads.
pub trait LeafDomain: HashDomain {}

/// Domain for hashing two child digests into a parent.
///
/// Sealed: internal-node domains belong to the trees in this workspace.
pub trait InternalDomain: HashDomain + sealed::Sealed {
    /// Domain of the leaves at the bottom of trees hashed under this domain.
    type Leaf: LeafDomain;
}

macro_rules! define_domain {
    ($(#[$doc:meta])* leaf $name:ident => $label:expr) => {
        define_domain!(@marker $(#[$doc])* $name => $label);
        impl LeafDomain for $name {}
    };
    ($(#[$doc:meta])* internal $name:ident over $leaf:ty => $label:expr) => {
        define_domain!(@marker $(#[$doc])* $name => $label);
        impl sealed::Sealed for $name {}
        impl InternalDomain for $name {
            type Leaf = $leaf;
        }
    };
    (@marker $(#[$doc:meta])* $name:ident => $label:expr) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Encode, Decode)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name;

        impl HashDomain for $name {
            const LABEL: &'static [u8] = $label;
        }
    };
}

define_domain!(
    /// Transaction info digests, the leaves of the transaction accumulator.
    leaf TransactionInfoDomain => b"LEDGER::TransactionInfo"
);
define_domain!(
    /// Contract event digests, the leaves of an event accumulator.
    leaf EventDomain => b"LEDGER::ContractEvent"
);
define_domain!(
    /// Sparse Merkle tree leaves: `key || value_hash`.
    leaf SparseMerkleLeafDomain => b"LEDGER::SparseMerkleLeafNode"
);
define_domain!(
    /// Internal nodes of the transaction accumulator.
    internal TransactionAccumulatorDomain over TransactionInfoDomain
        => b"LEDGER::TransactionAccumulator"
);
define_domain!(
    /// Internal nodes of an event accumulator.
    internal EventAccumulatorDomain over EventDomain => b"LEDGER::EventAccumulator"
);
define_domain!(
    /// Internal nodes of the sparse Merkle tree.
    internal SparseMerkleInternalDomain over SparseMerkleLeafDomain
        => b"LEDGER::SparseMerkleInternal"
);

/// Placeholder for an empty accumulator subtree.
pub const ACCUMULATOR_PLACEHOLDER_HASH: HashValue =
    HashValue::from_literal(b"ACCUMULATOR_PLACEHOLDER_HASH");

/// Placeholder for an empty sparse Merkle subtree.
pub const SPARSE_MERKLE_PLACEHOLDER_HASH: HashValue =
    HashValue::from_literal(b"SPARSE_MERKLE_PLACEHOLDER_HASH");

/// Digest of a leaf payload hashed under leaf domain `D`.
///
/// Only [`hash_leaf`] and [`DomainHasher::finish`] produce one, so holding a
/// `LeafHash<D>` means the payload went through `D`'s label.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LeafHash<D: LeafDomain> {
    hash: HashValue,
    _domain: PhantomData<D>,
}

impl<D: LeafDomain> LeafHash<D> {
    fn new(hash: HashValue) -> Self {
        LeafHash {
            hash,
            _domain: PhantomData,
        }
    }

    /// Tag an arbitrary digest as a leaf of `D`, skipping the hash.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn from_hash_value_unchecked(hash: HashValue) -> Self {
        Self::new(hash)
    }

    /// The untyped digest, as it appears among proof siblings.
    pub fn hash_value(&self) -> HashValue {
        self.hash
    }
}

impl<D: LeafDomain> From<LeafHash<D>> for HashValue {
    fn from(leaf: LeafHash<D>) -> Self {
        leaf.hash
    }
}

impl<D: LeafDomain> fmt::Display for LeafHash<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.hash, f)
    }
}

impl<D: LeafDomain> fmt::Debug for LeafHash<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LeafHash<{:?}>({})", D::default(), self.hash)
    }
}

/// Streaming hasher bound to one domain.
///
/// Public construction is only possible for leaf domains; internal nodes go
/// through [`hash_internal`].
pub struct DomainHasher<D: HashDomain> {
    inner: blake3::Hasher,
    _domain: PhantomData<D>,
}

impl<D: HashDomain> DomainHasher<D> {
    fn with_label() -> Self {
        let mut inner = blake3::Hasher::new();
        inner.update(&[D::LABEL.len() as u8]);
        inner.update(D::LABEL);
        DomainHasher {
            inner,
            _domain: PhantomData,
        }
    }

    /// Absorb more payload bytes.
    pub fn update(&mut self, bytes: &[u8]) -> &mut Self {
        self.inner.update(bytes);
        self
    }

    fn digest(&self) -> HashValue {
        HashValue::new(*self.inner.finalize().as_bytes())
    }
}

impl<D: LeafDomain> DomainHasher<D> {
    /// Start hashing a leaf payload under domain `D`.
    pub fn new() -> Self {
        Self::with_label()
    }

    /// Produce the leaf digest.
    pub fn finish(&self) -> LeafHash<D> {
        LeafHash::new(self.digest())
    }
}

impl<D: LeafDomain> Default for DomainHasher<D> {
    fn default() -> Self {
        Self::new()
    }
}

/// `H(label || payload)` under a leaf domain.
pub fn hash_leaf<D: LeafDomain>(payload: &[u8]) -> LeafHash<D> {
    DomainHasher::<D>::new().update(payload).finish()
}

/// `H(label || left || right)` under an internal-node domain.
pub fn hash_internal<D: InternalDomain>(left: &HashValue, right: &HashValue) -> HashValue {
    DomainHasher::<D>::with_label()
        .update(left.as_bytes())
        .update(right.as_bytes())
        .digest()
}
