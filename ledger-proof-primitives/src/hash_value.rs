//! The 32-byte digest carried by every proof in the workspace.

use std::fmt;

use bincode::{Decode, Encode};

use crate::{Result, VerifyError};

/// A 256-bit Blake3 digest.
///
/// Value type: `Copy`, ordered, hashable. Bits are addressed MSB-first, so
/// bit 0 is the most significant bit of the first byte. The sparse Merkle tree
/// walks keys in that order from the root.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Encode, Decode)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HashValue([u8; HashValue::LENGTH]);

impl HashValue {
    /// Digest length in bytes.
    pub const LENGTH: usize = 32;
    /// Digest length in bits.
    pub const LENGTH_IN_BITS: usize = Self::LENGTH * 8;

    /// Wrap raw digest bytes.
    pub const fn new(bytes: [u8; Self::LENGTH]) -> Self {
        HashValue(bytes)
    }

    /// The all-zero digest.
    pub const fn zero() -> Self {
        HashValue([0u8; Self::LENGTH])
    }

    /// Build a digest from an ASCII name, zero-padded on the right.
    ///
    /// Used for placeholder values that must not be the output of any hash.
    pub(crate) const fn from_literal(name: &[u8]) -> Self {
        assert!(name.len() <= Self::LENGTH, "literal too long for a digest");
        let mut bytes = [0u8; Self::LENGTH];
        let mut i = 0;
        while i < name.len() {
            bytes[i] = name[i];
            i += 1;
        }
        HashValue(bytes)
    }

    /// Parse a digest from a byte slice of exactly [`Self::LENGTH`] bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: [u8; Self::LENGTH] = bytes.try_into().map_err(|_| {
            VerifyError::DecodeError(format!(
                "expected {} digest bytes, got {}",
                Self::LENGTH,
                bytes.len()
            ))
        })?;
        Ok(HashValue(bytes))
    }

    /// Parse a digest from a 64-character hex string.
    pub fn from_hex(hex_str: &str) -> Result<Self> {
        let bytes = hex::decode(hex_str)
            .map_err(|e| VerifyError::DecodeError(format!("invalid hex digest: {}", e)))?;
        Self::from_slice(&bytes)
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; Self::LENGTH] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Bit `index` counted MSB-first.
    ///
    /// # Panics
    ///
    /// Panics if `index >= HashValue::LENGTH_IN_BITS`.
    pub fn bit(&self, index: usize) -> bool {
        assert!(
            index < Self::LENGTH_IN_BITS,
            "bit index {} out of range",
            index
        );
        let byte = self.0[index / 8];
        (byte >> (7 - (index % 8))) & 1 == 1
    }

    /// Number of leading bits shared with `other`.
    pub fn common_prefix_bits_len(&self, other: &HashValue) -> usize {
        let mut len = 0;
        for (a, b) in self.0.iter().zip(other.0.iter()) {
            let diff = a ^ b;
            if diff == 0 {
                len += 8;
            } else {
                len += diff.leading_zeros() as usize;
                break;
            }
        }
        len
    }

    /// A uniformly random digest.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn random() -> Self {
        HashValue(rand::random())
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HashValue({})", self.to_hex())
    }
}

impl AsRef<[u8]> for HashValue {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; HashValue::LENGTH]> for HashValue {
    fn from(bytes: [u8; HashValue::LENGTH]) -> Self {
        HashValue(bytes)
    }
}

impl From<HashValue> for [u8; HashValue::LENGTH] {
    fn from(hash: HashValue) -> Self {
        hash.0
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_bit_order_is_msb_first() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0b1010_0000;
        bytes[31] = 0b0000_0001;
        let hash = HashValue::new(bytes);
        assert!(hash.bit(0));
        assert!(!hash.bit(1));
        assert!(hash.bit(2));
        assert!(!hash.bit(3));
        assert!(hash.bit(255));
        assert!(!hash.bit(254));
    }

    #[test]
    #[should_panic]
    fn test_bit_out_of_range_panics() {
        HashValue::zero().bit(256);
    }

    #[test]
    fn test_common_prefix_bits_len() {
        let a = HashValue::zero();
        assert_eq!(a.common_prefix_bits_len(&a), 256);

        let mut bytes = [0u8; 32];
        bytes[1] = 0b0001_0000;
        let b = HashValue::new(bytes);
        assert_eq!(a.common_prefix_bits_len(&b), 11);
        assert_eq!(b.common_prefix_bits_len(&a), 11);

        let mut bytes = [0u8; 32];
        bytes[0] = 0x80;
        assert_eq!(a.common_prefix_bits_len(&HashValue::new(bytes)), 0);
    }

    #[test]
    fn test_from_slice_rejects_wrong_length() {
        assert_matches!(
            HashValue::from_slice(&[0u8; 31]),
            Err(VerifyError::DecodeError(_))
        );
        assert_matches!(
            HashValue::from_slice(&[0u8; 33]),
            Err(VerifyError::DecodeError(_))
        );
        let hash = HashValue::from_slice(&[7u8; 32]).expect("32 bytes is a digest");
        assert_eq!(hash.as_bytes(), &[7u8; 32]);
    }

    #[test]
    fn test_hex_display_and_parse() {
        let hash = HashValue::new([0xab; 32]);
        assert_eq!(format!("{}", hash), "ab".repeat(32));
        assert_eq!(format!("{:?}", hash), format!("HashValue({})", "ab".repeat(32)));
        assert_eq!(HashValue::from_hex(&hash.to_hex()).expect("parse hex"), hash);
        assert!(HashValue::from_hex("zz").is_err());
    }

    #[test]
    fn test_from_literal_pads_with_zeros() {
        let hash = HashValue::from_literal(b"ABC");
        assert_eq!(&hash.as_bytes()[..3], b"ABC");
        assert!(hash.as_bytes()[3..].iter().all(|b| *b == 0));
    }

    proptest! {
        #[test]
        fn test_prefix_len_matches_bitwise_scan(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
            let (a, b) = (HashValue::new(a), HashValue::new(b));
            let expected = (0..HashValue::LENGTH_IN_BITS)
                .take_while(|i| a.bit(*i) == b.bit(*i))
                .count();
            prop_assert_eq!(a.common_prefix_bits_len(&b), expected);
        }
    }
}
