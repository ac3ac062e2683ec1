//! # Constants
//!
//! Sizes fixed by the Telegram Passport format and the defaults used by
//! [`DecryptConfig`](crate::builders::DecryptConfig).

use std::time::Duration;

/// AES block size in bytes. Every Passport ciphertext is a multiple of it.
pub const AES_BLOCK_SIZE: usize = 16;

/// AES-256 key length cut from the front of the SHA-512 derivation digest.
pub const AES_KEY_SIZE: usize = 32;

/// IV length, taken from bytes `32..48` of the derivation digest.
pub const AES_IV_SIZE: usize = 16;

/// SHA-256 digest length; the size of every `hash`, `data_hash` and `file_hash`.
pub const SHA256_DIGEST_SIZE: usize = 32;

/// Smallest padding prefix Telegram emits (the length byte included).
pub const PADDING_MIN: u8 = 32;

/// Largest padding prefix expressible by the one-byte length.
pub const PADDING_MAX: u8 = 255;

/// Default number of worker threads for a submission.
pub const DEFAULT_WORKERS: usize = 4;

/// Default time budget for a single file fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Default deadline for decrypting one whole submission.
pub const DEFAULT_SUBMISSION_DEADLINE: Duration = Duration::from_secs(120);
