//! src/crypto/kdf.rs
//! Passport key/IV derivation: one SHA-512 over `secret || hash`.

use crate::aliases::{Aes256Key32, DerivationDigest64, Iv16};
use crate::consts::{AES_IV_SIZE, AES_KEY_SIZE};
use sha2::{Digest, Sha512};
use secure_gate::{RevealSecret, RevealSecretMut};

/// Derive the AES-256 key and CBC IV for one Passport payload.
///
/// `digest = SHA512(secret || hash)`, `key = digest[0..32]`, `iv = digest[32..48]`.
/// The last 16 digest bytes are unused. Pure: the same inputs always give the
/// same outputs.
///
/// `hash` is the SHA-256 of the padded plaintext, the same value later used to
/// verify the decryption.
#[inline]
pub fn derive_key_iv(secret: &[u8], hash: &[u8]) -> (Aes256Key32, Iv16) {
    let mut hasher = Sha512::new();
    hasher.update(secret);
    hasher.update(hash);

    let mut digest = DerivationDigest64::new([0u8; 64]);
    digest
        .expose_secret_mut()
        .copy_from_slice(hasher.finalize().as_slice());

    let mut key = Aes256Key32::new([0u8; AES_KEY_SIZE]);
    let mut iv = Iv16::new([0u8; AES_IV_SIZE]);
    key.expose_secret_mut()
        .copy_from_slice(&digest.expose_secret()[..AES_KEY_SIZE]);
    iv.expose_secret_mut()
        .copy_from_slice(&digest.expose_secret()[AES_KEY_SIZE..AES_KEY_SIZE + AES_IV_SIZE]);

    (key, iv)
}
