//! src/decryptor/secure_data.rs
//! The symmetric half of the Passport pipeline, shared by credentials, fields and files.

use crate::aliases::{Aes256Key32, Iv16, SecretBytes};
use crate::crypto::cbc::decrypt_cbc;
use crate::crypto::integrity::verify_sha256;
use crate::crypto::kdf::derive_key_iv;
use crate::crypto::padding::strip_padding;
use crate::error::PassportError;
use secure_gate::RevealSecret;

/// Decrypt and verify, returning the still-padded plaintext.
///
/// The plaintext only leaves this function after `SHA256(plaintext) ==
/// expected_hash`; on mismatch the zeroizing buffer is dropped here.
#[inline]
pub fn decrypt_and_verify(
    key: &Aes256Key32,
    iv: &Iv16,
    ciphertext: &[u8],
    expected_hash: &[u8],
) -> Result<SecretBytes, PassportError> {
    let plaintext = decrypt_cbc(key, iv, ciphertext)?;
    verify_sha256(plaintext.expose_secret(), expected_hash)?;
    Ok(plaintext)
}

/// Full symmetric pipeline: derive → decrypt → verify → strip padding.
///
/// `secret` is the symmetric seed (already RSA-unwrapped for credentials) and
/// `hash` the SHA-256 of the padded plaintext. Returns the payload without the
/// random prefix.
///
/// # Errors
///
/// - [`PassportError::Validation`] for unaligned ciphertext or a bad padding byte
/// - [`PassportError::Integrity`] when the hash does not match
pub fn decrypt_secure_data(
    secret: &[u8],
    hash: &[u8],
    ciphertext: &[u8],
) -> Result<SecretBytes, PassportError> {
    let (key, iv) = derive_key_iv(secret, hash);
    let verified = decrypt_and_verify(&key, &iv, ciphertext, hash)?;
    let payload = strip_padding(verified.expose_secret())?;

    tracing::trace!(
        ciphertext_len = ciphertext.len(),
        padding_len = verified.expose_secret().len() - payload.len(),
        "secure data decrypted"
    );

    Ok(SecretBytes::new(payload.to_vec()))
}
