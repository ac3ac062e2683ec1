// ============================================================================
// FILE: src/utils.rs
// ============================================================================

//! Utility functions used across the library.

use crate::aliases::SecretBytes;
use crate::error::PassportError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Deserializer};

/// Decodes one base64 wire field, naming the field in the error.
#[inline]
pub fn decode_base64(field: &str, encoded: &str) -> Result<Vec<u8>, PassportError> {
    BASE64
        .decode(encoded.as_bytes())
        .map_err(|e| PassportError::Decoding(format!("{field}: invalid base64: {e}")))
}

/// Encodes bytes the way Telegram puts them on the wire (standard alphabet, padded).
#[inline]
pub fn encode_base64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// XORs two 16-byte blocks and writes the result to `output`.
///
/// Used by the hand-chained AES-256-CBC loops in both directions.
///
/// # Panics (by contract)
///
/// Panics if any of the three slices is shorter than 16 bytes. Callers pass
/// `chunks_exact(16)` slices or `Block16` contents, so this never happens.
#[inline(always)]
pub const fn xor_blocks(block_a: &[u8], block_b: &[u8], output: &mut [u8]) {
    let mut i = 0;
    while i < 16 {
        output[i] = block_a[i] ^ block_b[i];
        i += 1;
    }
}

/// Serde adapters for base64 fields inside decrypted credentials.
///
/// Error messages never echo the rejected input.
pub(crate) mod serde_base64 {
    use super::*;
    use serde::de::Error as _;
    use secure_gate::RevealSecret;

    pub(crate) fn secret<'de, D>(deserializer: D) -> Result<SecretBytes, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = SecretBytes::new(String::deserialize(deserializer)?.into_bytes());
        BASE64
            .decode(encoded.expose_secret())
            .map(SecretBytes::new)
            .map_err(|_| D::Error::custom("secret is not valid base64"))
    }

    pub(crate) fn bytes<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let encoded = String::deserialize(deserializer)?;
        BASE64
            .decode(encoded.as_bytes())
            .map_err(|_| D::Error::custom("hash is not valid base64"))
    }
}
