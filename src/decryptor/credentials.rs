//! src/decryptor/credentials.rs
//! Top-level credentials decryption: RSA unwrap, then the symmetric pipeline.

use crate::crypto::rsa::BotPrivateKey;
use crate::decryptor::secure_data::decrypt_secure_data;
use crate::error::PassportError;
use crate::passport::{Credentials, EncryptedCredentials};
use crate::utils::decode_base64;
use secure_gate::RevealSecret;

/// Decrypt `EncryptedCredentials` with the bot's private key.
///
/// Pipeline: base64 decode → RSA-OAEP unwrap of `secret` → derive key/IV from
/// the unwrapped secret and `hash` → AES-256-CBC decrypt `data` → verify
/// SHA-256 → strip padding → JSON decode.
///
/// Any stage failure aborts the call with that stage's error; an RSA failure
/// stops before any key derivation or AES work.
///
/// # Thread Safety
///
/// Pure apart from the RNG used for RSA blinding; `private_key` is only read,
/// so one key can serve any number of concurrent calls.
///
/// # Example
///
/// ```no_run
/// use passport_crypt::{decrypt_credentials, BotPrivateKey, EncryptedCredentials};
///
/// let key = BotPrivateKey::from_pem(&std::fs::read_to_string("bot.pem")?)?;
/// let wire: EncryptedCredentials = serde_json::from_str(r#"{"data":"…","hash":"…","secret":"…"}"#)?;
/// let credentials = decrypt_credentials(&key, &wire)?;
/// println!("nonce = {}", credentials.nonce);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[tracing::instrument(level = "debug", skip_all)]
pub fn decrypt_credentials(
    private_key: &BotPrivateKey,
    encrypted: &EncryptedCredentials,
) -> Result<Credentials, PassportError> {
    let wrapped_secret = decode_base64("credentials.secret", &encrypted.secret)?;
    let hash = decode_base64("credentials.hash", &encrypted.hash)?;
    let data = decode_base64("credentials.data", &encrypted.data)?;

    let secret = private_key.unwrap_secret(&wrapped_secret)?;
    tracing::debug!(data_len = data.len(), "credentials secret unwrapped");

    let payload = decrypt_secure_data(secret.expose_secret(), &hash, &data)?;
    let credentials: Credentials = serde_json::from_slice(payload.expose_secret())?;

    tracing::debug!("credentials decrypted");
    Ok(credentials)
}
