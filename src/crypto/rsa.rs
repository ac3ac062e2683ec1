//! src/crypto/rsa.rs
//! Bot private key handling and RSA-OAEP(SHA-1) unwrap of the credentials secret.

use crate::aliases::SecretBytes;
use crate::error::PassportError;
use rand::rngs::OsRng;
use rsa::pkcs1::DecodeRsaPrivateKey;
use rsa::pkcs8::DecodePrivateKey;
use rsa::traits::PublicKeyParts;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha1::Sha1;
use std::fmt;

/// The bot's RSA private key, as registered with BotFather.
///
/// Loaded once at startup and shared read-only between every decryption call;
/// it is `Send + Sync` and never mutated. `Debug` only prints the modulus size,
/// and the type deliberately has no serialization.
pub struct BotPrivateKey(RsaPrivateKey);

impl BotPrivateKey {
    /// Parse a PEM key, accepting both `BEGIN PRIVATE KEY` (PKCS#8) and
    /// `BEGIN RSA PRIVATE KEY` (PKCS#1) armor.
    pub fn from_pem(pem: &str) -> Result<Self, PassportError> {
        if pem.contains("BEGIN RSA PRIVATE KEY") {
            Self::from_pkcs1_pem(pem)
        } else {
            Self::from_pkcs8_pem(pem)
        }
    }

    /// Parse a PKCS#8 PEM key.
    pub fn from_pkcs8_pem(pem: &str) -> Result<Self, PassportError> {
        RsaPrivateKey::from_pkcs8_pem(pem)
            .map_err(|e| PassportError::Key(format!("invalid PKCS#8 private key: {e}")))
            .and_then(Self::checked)
    }

    /// Parse a PKCS#1 PEM key.
    pub fn from_pkcs1_pem(pem: &str) -> Result<Self, PassportError> {
        RsaPrivateKey::from_pkcs1_pem(pem)
            .map_err(|e| PassportError::Key(format!("invalid PKCS#1 private key: {e}")))
            .and_then(Self::checked)
    }

    /// Parse a PKCS#8 DER key.
    pub fn from_pkcs8_der(der: &[u8]) -> Result<Self, PassportError> {
        RsaPrivateKey::from_pkcs8_der(der)
            .map_err(|e| PassportError::Key(format!("invalid PKCS#8 private key: {e}")))
            .and_then(Self::checked)
    }

    fn checked(key: RsaPrivateKey) -> Result<Self, PassportError> {
        key.validate()
            .map_err(|e| PassportError::Key(format!("inconsistent RSA key: {e}")))?;
        Ok(Self(key))
    }

    /// The matching public key (the one uploaded to BotFather).
    #[must_use]
    pub fn public_key(&self) -> RsaPublicKey {
        self.0.to_public_key()
    }

    /// Modulus size in bytes; every wrapped secret is exactly this long.
    #[must_use]
    pub fn size(&self) -> usize {
        self.0.size()
    }

    /// RSA-OAEP(SHA-1, empty label) decrypt of the top-level credentials secret.
    ///
    /// Decryption runs with blinding through the `rsa` crate; the padding check
    /// is the library's, never re-implemented here.
    ///
    /// # Errors
    ///
    /// [`PassportError::Key`] when the ciphertext has the wrong length, was
    /// produced for another key, or is corrupted. No detail about the padding
    /// failure is exposed.
    pub fn unwrap_secret(&self, secret_ciphertext: &[u8]) -> Result<SecretBytes, PassportError> {
        if secret_ciphertext.len() != self.size() {
            return Err(PassportError::Key(format!(
                "wrapped secret is {} bytes, key modulus is {}",
                secret_ciphertext.len(),
                self.size()
            )));
        }

        self.0
            .decrypt_blinded(&mut OsRng, Oaep::new::<Sha1>(), secret_ciphertext)
            .map(SecretBytes::new)
            .map_err(|_| PassportError::Key("RSA-OAEP unwrap of credentials secret failed".into()))
    }
}

/// Wrap an already parsed key, running the same consistency check as the loaders.
impl TryFrom<RsaPrivateKey> for BotPrivateKey {
    type Error = PassportError;

    fn try_from(key: RsaPrivateKey) -> Result<Self, Self::Error> {
        Self::checked(key)
    }
}

impl fmt::Debug for BotPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotPrivateKey")
            .field("bits", &(self.size() * 8))
            .finish_non_exhaustive()
    }
}
