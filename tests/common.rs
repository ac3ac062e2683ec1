//! tests/common.rs
//! Fixtures, fetchers and sealing helpers shared across test files

#![allow(dead_code)] // Each test binary uses a different subset

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use passport_crypt::encryptor::{seal_credentials, seal_secure_data};
use passport_crypt::{BotPrivateKey, EncryptedCredentials, FetchError, FileFetcher, PassportData};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// 2048-bit bot key, PKCS#8 armor. Matches `passport_vector.json`.
pub const BOT_KEY_PKCS8: &str = include_str!("test_data/bot_key_pkcs8.pem");

/// The same key in PKCS#1 armor.
pub const BOT_KEY_PKCS1: &str = include_str!("test_data/bot_key_pkcs1.pem");

/// An unrelated key; credentials sealed for the bot key must not open with it.
pub const OTHER_KEY_PKCS8: &str = include_str!("test_data/other_key_pkcs8.pem");

/// Known-answer submission generated independently of this crate.
pub const PASSPORT_VECTOR: &str = include_str!("test_data/passport_vector.json");

/// Symmetric seed used when tests seal their own credentials.
pub const TEST_CREDENTIALS_SECRET: [u8; 32] = [0x5a; 32];

pub fn bot_key() -> BotPrivateKey {
    BotPrivateKey::from_pem(BOT_KEY_PKCS8).unwrap()
}

pub fn other_key() -> BotPrivateKey {
    BotPrivateKey::from_pem(OTHER_KEY_PKCS8).unwrap()
}

pub fn vector() -> Value {
    serde_json::from_str(PASSPORT_VECTOR).unwrap()
}

pub fn vector_passport() -> PassportData {
    serde_json::from_value(vector()["passport_data"].clone()).unwrap()
}

/// Fetcher serving every encrypted file of the known-answer submission.
pub fn vector_fetcher() -> MapFetcher {
    let vector = vector();
    let mut fetcher = MapFetcher::new();
    for (file_id, file) in vector["files"].as_object().unwrap() {
        fetcher = fetcher.with_file(file_id, b64(file["encrypted"].as_str().unwrap()));
    }
    fetcher
}

/// Expected plaintext of a known-answer file.
pub fn vector_plaintext(file_id: &str) -> Vec<u8> {
    b64(vector()["files"][file_id]["plaintext"].as_str().unwrap())
}

pub fn b64(encoded: &str) -> Vec<u8> {
    BASE64.decode(encoded).unwrap()
}

pub fn to_b64(bytes: &[u8]) -> String {
    BASE64.encode(bytes)
}

/// Routes tracing output through the test harness; `RUST_LOG=passport_crypt=trace` to see it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// In-memory stand-in for the Bot API download collaborator.
#[derive(Default)]
pub struct MapFetcher {
    files: HashMap<String, Vec<u8>>,
    delay: Duration,
    calls: AtomicUsize,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, file_id: &str, encrypted: Vec<u8>) -> Self {
        self.files.insert(file_id.to_string(), encrypted);
        self
    }

    /// Every fetch sleeps this long before answering, ignoring its budget.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Shareable handle, the form the decryption entry points take.
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl FileFetcher for MapFetcher {
    fn fetch(&self, file_id: &str, _budget: Duration) -> Result<Vec<u8>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        self.files
            .get(file_id)
            .cloned()
            .ok_or_else(|| format!("no such file: {file_id}").into())
    }
}

/// Seal a credentials JSON document for the bot key.
pub fn seal_for_bot(credentials: &Value) -> EncryptedCredentials {
    let json = serde_json::to_vec(credentials).unwrap();
    seal_credentials(&bot_key().public_key(), &TEST_CREDENTIALS_SECRET, &json).unwrap()
}

/// Seal `payload` under `secret`, returning `(ciphertext_b64, credentials_json)`.
///
/// `hash_field` is `"data_hash"` for inline data and `"file_hash"` for files.
pub fn seal_item(secret: &[u8], payload: &[u8], hash_field: &str) -> (Vec<u8>, Value) {
    let sealed = seal_secure_data(secret, payload).unwrap();
    let credentials = json!({
        hash_field: to_b64(&sealed.hash),
        "secret": to_b64(secret),
    });
    (sealed.data, credentials)
}

pub fn passport_file(file_id: &str) -> Value {
    json!({
        "file_id": file_id,
        "file_unique_id": format!("u{file_id}"),
        "file_size": 0,
        "file_date": 1_700_000_000,
    })
}
