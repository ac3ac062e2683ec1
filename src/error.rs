//! # Error Types
//!
//! This module defines the error types used throughout the library.
//! All operations return [`Result<T, PassportError>`](PassportError) and fail fast:
//! the first stage that rejects its input aborts the whole call.

use std::time::Duration;
use thiserror::Error;

/// Error produced by a [`FileFetcher`](crate::decryptor::FileFetcher).
///
/// The crate never inspects or retries it; it is carried unchanged as the
/// `source` of [`PassportError::Fetch`].
pub type FetchError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type for all Passport decryption operations.
#[derive(Error, Debug)]
pub enum PassportError {
    /// The bot private key is unusable, or the RSA ciphertext does not belong to it.
    ///
    /// Raised for:
    /// - PEM/DER parsing failures
    /// - RSA-OAEP decryption failures (wrong key, corrupted or truncated secret)
    #[error("Key error: {0}")]
    Key(String),

    /// Invalid base64 on the wire or malformed JSON after decryption.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// `SHA256(plaintext)` did not match the supplied hash.
    ///
    /// Either the ciphertext was tampered with or the secret/hash pair does not
    /// belong to it. The plaintext has already been discarded when this is returned.
    #[error("Integrity error: {0}")]
    Integrity(String),

    /// Structurally invalid input.
    ///
    /// This variant is used for:
    /// - Ciphertext not aligned to the AES block size
    /// - Padding length byte outside `[32, 255]` or not shorter than the plaintext
    /// - Missing credentials for data or files an element carries
    /// - Element contents that do not match its kind's layout
    /// - Invalid decryption configuration
    #[error("Validation error: {0}")]
    Validation(String),

    /// The file-fetch collaborator failed; its error is passed through as the source.
    #[error("Fetch error for file {file_id}: {source}")]
    Fetch {
        file_id: String,
        #[source]
        source: FetchError,
    },

    /// A file fetch returned after its time budget ran out.
    #[error("Fetch of file {file_id} exceeded its {budget:?} budget")]
    Timeout { file_id: String, budget: Duration },

    /// The submission deadline passed before the item could be processed.
    #[error("Submission deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
}

impl PassportError {
    /// True for [`PassportError::Integrity`].
    #[must_use]
    pub const fn is_integrity(&self) -> bool {
        matches!(self, PassportError::Integrity(_))
    }
}

impl From<base64::DecodeError> for PassportError {
    fn from(err: base64::DecodeError) -> Self {
        PassportError::Decoding(format!("invalid base64: {err}"))
    }
}

// serde_json messages can quote decrypted values; keep only the position.
impl From<serde_json::Error> for PassportError {
    fn from(err: serde_json::Error) -> Self {
        PassportError::Decoding(format!(
            "malformed JSON ({:?}) at line {} column {}",
            err.classify(),
            err.line(),
            err.column()
        ))
    }
}
