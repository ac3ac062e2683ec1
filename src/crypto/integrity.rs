//! src/crypto/integrity.rs
//! SHA-256 integrity check over decrypted Passport payloads.

use crate::consts::SHA256_DIGEST_SIZE;
use crate::error::PassportError;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Check `SHA256(plaintext) == expected_hash`.
///
/// The comparison is exact and constant-time over the digest bytes. An
/// `expected_hash` of the wrong length can never match and is reported the
/// same way as a mismatch.
///
/// # Errors
///
/// [`PassportError::Integrity`] on any mismatch. The caller must drop the
/// plaintext without reading it.
#[inline]
pub fn verify_sha256(plaintext: &[u8], expected_hash: &[u8]) -> Result<(), PassportError> {
    if expected_hash.len() != SHA256_DIGEST_SIZE {
        return Err(PassportError::Integrity(format!(
            "expected a {SHA256_DIGEST_SIZE}-byte SHA-256 hash, got {} bytes",
            expected_hash.len()
        )));
    }

    let actual = Sha256::digest(plaintext);
    if bool::from(actual.as_slice().ct_eq(expected_hash)) {
        Ok(())
    } else {
        Err(PassportError::Integrity(
            "SHA-256 of decrypted data does not match hash".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_matching_digest() {
        let hash = Sha256::digest(b"payload");
        verify_sha256(b"payload", &hash).unwrap();
    }

    #[test]
    fn rejects_single_bit_difference() {
        let mut hash = Sha256::digest(b"payload").to_vec();
        hash[31] ^= 0x01;
        assert!(verify_sha256(b"payload", &hash).unwrap_err().is_integrity());
    }

    #[test]
    fn rejects_truncated_hash() {
        let hash = Sha256::digest(b"payload");
        assert!(verify_sha256(b"payload", &hash[..16]).unwrap_err().is_integrity());
        assert!(verify_sha256(b"payload", &[]).unwrap_err().is_integrity());
    }
}
