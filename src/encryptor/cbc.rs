//! src/encryptor/cbc.rs
//! AES-256-CBC encryption without cipher-level padding, the mirror of `crypto::cbc`.

use crate::aliases::{Aes256Key32, Block16, Iv16};
use crate::consts::AES_BLOCK_SIZE;
use crate::error::PassportError;
use crate::utils::xor_blocks;
use aes::cipher::{BlockEncrypt, KeyInit};
use aes::{Aes256Enc, Block as AesBlock};
use secure_gate::{RevealSecret, RevealSecretMut};

/// Encrypt block-aligned `plaintext` with AES-256-CBC.
///
/// # Errors
///
/// [`PassportError::Validation`] if `plaintext.len()` is not a multiple of 16.
#[inline]
pub fn encrypt_cbc(
    key: &Aes256Key32,
    iv: &Iv16,
    plaintext: &[u8],
) -> Result<Vec<u8>, PassportError> {
    if plaintext.len() % AES_BLOCK_SIZE != 0 {
        return Err(PassportError::Validation(format!(
            "plaintext length {} is not a multiple of {AES_BLOCK_SIZE}",
            plaintext.len()
        )));
    }

    let cipher = Aes256Enc::new(key.expose_secret().into());
    let mut xor_output = Block16::new([0u8; 16]);
    let mut ciphertext = vec![0u8; plaintext.len()];
    let mut previous_block = Block16::new(*iv.expose_secret());

    for (chunk, out) in plaintext
        .chunks_exact(AES_BLOCK_SIZE)
        .zip(ciphertext.chunks_exact_mut(AES_BLOCK_SIZE))
    {
        xor_blocks(chunk, previous_block.expose_secret(), xor_output.expose_secret_mut());
        let mut aes_block = AesBlock::from(*xor_output.expose_secret());
        cipher.encrypt_block(&mut aes_block);
        out.copy_from_slice(aes_block.as_slice());
        previous_block.expose_secret_mut().copy_from_slice(out);
    }

    Ok(ciphertext)
}
