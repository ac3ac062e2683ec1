//! src/encryptor/seal.rs
//! Telegram-side sealing: pad → hash → derive → encrypt, and RSA wrap of the secret.
//!
//! Produces exactly what the decryptor consumes. Used to build fixtures and by
//! integrators who need Passport payloads in their own tests.

use crate::consts::{AES_BLOCK_SIZE, PADDING_MAX, PADDING_MIN, SHA256_DIGEST_SIZE};
use crate::crypto::kdf::derive_key_iv;
use crate::encryptor::cbc::encrypt_cbc;
use crate::error::PassportError;
use crate::passport::EncryptedCredentials;
use crate::utils::encode_base64;
use rand::rngs::OsRng;
use rand::RngCore;
use rsa::{Oaep, RsaPublicKey};
use sha1::Sha1;
use sha2::{Digest, Sha256};

/// Ciphertext plus the SHA-256 of its padded plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedData {
    pub data: Vec<u8>,
    pub hash: [u8; SHA256_DIGEST_SIZE],
}

/// Smallest valid padding for a payload of `payload_len` bytes (32..=47).
#[must_use]
pub const fn padding_length(payload_len: usize) -> u8 {
    let unaligned = (payload_len + PADDING_MIN as usize) % AES_BLOCK_SIZE;
    PADDING_MIN + ((AES_BLOCK_SIZE - unaligned) % AES_BLOCK_SIZE) as u8
}

/// Prefix `payload` with the minimal random padding.
#[must_use]
pub fn add_padding(payload: &[u8]) -> Vec<u8> {
    let padding = padding_length(payload.len());
    let mut padded = vec![0u8; usize::from(padding)];
    OsRng.fill_bytes(&mut padded[1..]);
    padded[0] = padding;
    padded.extend_from_slice(payload);
    padded
}

/// Prefix `payload` with exactly `padding` bytes (length byte included).
///
/// # Errors
///
/// [`PassportError::Validation`] if `padding < 32` or the result is not block-aligned.
pub fn add_padding_exact(payload: &[u8], padding: u8) -> Result<Vec<u8>, PassportError> {
    if !(PADDING_MIN..=PADDING_MAX).contains(&padding) {
        return Err(PassportError::Validation(format!(
            "padding length {padding} outside [{PADDING_MIN}, {PADDING_MAX}]"
        )));
    }
    if (usize::from(padding) + payload.len()) % AES_BLOCK_SIZE != 0 {
        return Err(PassportError::Validation(format!(
            "padding {padding} + payload {} is not block-aligned",
            payload.len()
        )));
    }

    let mut padded = vec![0u8; usize::from(padding)];
    OsRng.fill_bytes(&mut padded[1..]);
    padded[0] = padding;
    padded.extend_from_slice(payload);
    Ok(padded)
}

/// Encrypt an already padded plaintext under `secret`.
pub fn seal_padded(secret: &[u8], padded: &[u8]) -> Result<SealedData, PassportError> {
    let hash: [u8; SHA256_DIGEST_SIZE] = Sha256::digest(padded).into();
    let (key, iv) = derive_key_iv(secret, &hash);
    let data = encrypt_cbc(&key, &iv, padded)?;
    Ok(SealedData { data, hash })
}

/// Pad and encrypt `payload` under `secret`, as Telegram does for fields and files.
pub fn seal_secure_data(secret: &[u8], payload: &[u8]) -> Result<SealedData, PassportError> {
    seal_padded(secret, &add_padding(payload))
}

/// Build wire `EncryptedCredentials` for `credentials_json`.
///
/// `secret` is the symmetric seed; it is wrapped for `public_key` with
/// RSA-OAEP(SHA-1).
pub fn seal_credentials(
    public_key: &RsaPublicKey,
    secret: &[u8],
    credentials_json: &[u8],
) -> Result<EncryptedCredentials, PassportError> {
    let sealed = seal_secure_data(secret, credentials_json)?;
    let wrapped = public_key
        .encrypt(&mut OsRng, Oaep::new::<Sha1>(), secret)
        .map_err(|e| PassportError::Key(format!("RSA-OAEP wrap failed: {e}")))?;

    Ok(EncryptedCredentials {
        data: encode_base64(&sealed.data),
        hash: encode_base64(&sealed.hash),
        secret: encode_base64(&wrapped),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_padding_aligns_every_length() {
        for len in 0..64usize {
            let padding = padding_length(len);
            assert!((32..48).contains(&padding), "len {len}");
            assert_eq!((usize::from(padding) + len) % 16, 0, "len {len}");
            assert_eq!(add_padding(&vec![1u8; len]).len() % 16, 0);
        }
    }

    #[test]
    fn exact_padding_validates() {
        assert_eq!(add_padding_exact(b"0123456789abcdef!", 255).unwrap().len(), 272);
        assert!(add_padding_exact(b"0123456789abcdef", 16).is_err());
        assert!(add_padding_exact(b"0123456789abcdef", 33).is_err());
    }
}
