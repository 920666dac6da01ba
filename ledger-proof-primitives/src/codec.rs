//! Bincode helpers shared by the proof types.
//!
//! Proofs arrive from untrusted servers, so decoding is bounded and rejects
//! trailing bytes. Structural checks specific to each proof run after this.

use bincode::{Decode, Encode};

use crate::{Result, VerifyError};

/// Upper bound on an encoded proof.
pub const MAX_ENCODED_PROOF_LEN: usize = 1024 * 1024;

/// Encode a value with the proof encoding (standard, big-endian).
pub fn encode_to_vec<T: Encode>(value: &T) -> Result<Vec<u8>> {
    let config = bincode::config::standard()
        .with_big_endian()
        .with_no_limit();
    bincode::encode_to_vec(value, config)
        .map_err(|e| VerifyError::EncodeError(e.to_string()))
}

/// Decode a value encoded by [`encode_to_vec`].
pub fn decode_from_slice<T: Decode<()>>(bytes: &[u8]) -> Result<T> {
    if bytes.len() > MAX_ENCODED_PROOF_LEN {
        return Err(VerifyError::DecodeError(format!(
            "encoded proof is {} bytes, limit is {}",
            bytes.len(),
            MAX_ENCODED_PROOF_LEN
        )));
    }
    let config = bincode::config::standard()
        .with_big_endian()
        .with_limit::<MAX_ENCODED_PROOF_LEN>();
    let (value, read) = bincode::decode_from_slice(bytes, config)
        .map_err(|e| VerifyError::DecodeError(format!("decode error: {}", e)))?;
    if read != bytes.len() {
        return Err(VerifyError::DecodeError(format!(
            "{} trailing bytes after proof",
            bytes.len() - read
        )));
    }
    Ok(value)
}
