//! src/crypto/cbc.rs
//! AES-256-CBC block decryption without cipher-level padding.
//!
//! Telegram's padding is a random prefix removed after verification, so the
//! cipher here only chains blocks. The chaining is written out by hand, the
//! same way the encrypt side in [`encryptor::cbc`](crate::encryptor::cbc) is.

use crate::aliases::{Aes256Key32, Block16, Iv16, SecretBytes};
use crate::consts::AES_BLOCK_SIZE;
use crate::error::PassportError;
use crate::utils::xor_blocks;
use aes::cipher::{BlockDecrypt, KeyInit};
use aes::{Aes256Dec, Block as AesBlock};
use secure_gate::{RevealSecret, RevealSecretMut};

/// Decrypt `ciphertext` with AES-256-CBC.
///
/// The result is unverified and comes back in a zeroizing buffer: callers must
/// run it through [`verify_sha256`](crate::crypto::integrity::verify_sha256)
/// before looking at it.
///
/// # Errors
///
/// [`PassportError::Validation`] if `ciphertext` is empty or not a multiple of 16 long.
#[inline]
pub fn decrypt_cbc(
    key: &Aes256Key32,
    iv: &Iv16,
    ciphertext: &[u8],
) -> Result<SecretBytes, PassportError> {
    if ciphertext.is_empty() {
        return Err(PassportError::Validation("ciphertext is empty".into()));
    }
    if ciphertext.len() % AES_BLOCK_SIZE != 0 {
        return Err(PassportError::Validation(format!(
            "ciphertext length {} is not a multiple of {AES_BLOCK_SIZE}",
            ciphertext.len()
        )));
    }

    let cipher = Aes256Dec::new(key.expose_secret().into());
    let mut previous_block = Block16::new(*iv.expose_secret());
    let mut plaintext = SecretBytes::new(vec![0u8; ciphertext.len()]);

    for (chunk, out) in ciphertext
        .chunks_exact(AES_BLOCK_SIZE)
        .zip(plaintext.expose_secret_mut().chunks_exact_mut(AES_BLOCK_SIZE))
    {
        let mut block = *AesBlock::from_slice(chunk);
        cipher.decrypt_block(&mut block);
        xor_blocks(block.as_slice(), previous_block.expose_secret(), out);
        previous_block.expose_secret_mut().copy_from_slice(chunk);
    }

    Ok(plaintext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_unaligned_ciphertext() {
        let key = Aes256Key32::new([7u8; 32]);
        let iv = Iv16::new([9u8; 16]);
        for len in [1usize, 15, 17, 31, 33] {
            let err = decrypt_cbc(&key, &iv, &vec![0u8; len]).unwrap_err();
            assert!(matches!(err, PassportError::Validation(_)), "len {len}");
        }
    }

    #[test]
    fn rejects_empty_ciphertext() {
        let key = Aes256Key32::new([7u8; 32]);
        let iv = Iv16::new([9u8; 16]);
        assert!(matches!(decrypt_cbc(&key, &iv, &[]), Err(PassportError::Validation(_))));
    }

    #[test]
    fn nist_sp800_38a_cbc_aes256_vector() {
        // F.2.6 CBC-AES256.Decrypt, first two blocks
        let key: [u8; 32] = hex_array(
            "603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4",
        );
        let iv: [u8; 16] = hex_array("000102030405060708090a0b0c0d0e0f");
        let ciphertext = hex_vec("f58c4c04d6e5f1ba779eabfb5f7bfbd69cfc4e967edb808d679f777bc6702c7d");
        let expected = hex_vec("6bc1bee22e409f96e93d7e117393172aae2d8a571e03ac9c9eb76fac45af8e51");

        let plaintext =
            decrypt_cbc(&Aes256Key32::new(key), &Iv16::new(iv), &ciphertext).unwrap();
        assert_eq!(plaintext.expose_secret(), &expected);
    }

    fn hex_vec(s: &str) -> Vec<u8> {
        hex::decode(s).unwrap()
    }

    fn hex_array<const N: usize>(s: &str) -> [u8; N] {
        hex_vec(s).try_into().unwrap()
    }
}
