//! src/crypto/padding.rs
//! Telegram random-prefix padding removal.

use crate::consts::{PADDING_MAX, PADDING_MIN};
use crate::error::PassportError;

/// Strip the random prefix from a verified plaintext.
///
/// The first byte is the prefix length `p` (itself included). `p` must lie in
/// `[32, 255]` and leave at least one payload byte.
///
/// Only call this on data that already passed
/// [`verify_sha256`](crate::crypto::integrity::verify_sha256).
///
/// # Errors
///
/// [`PassportError::Validation`] for an empty input, `p < 32`, or `p >= len`.
#[inline]
pub fn strip_padding(verified: &[u8]) -> Result<&[u8], PassportError> {
    let Some(&padding) = verified.first() else {
        return Err(PassportError::Validation(
            "cannot strip padding from empty plaintext".into(),
        ));
    };

    if !(PADDING_MIN..=PADDING_MAX).contains(&padding) {
        return Err(PassportError::Validation(format!(
            "padding length {padding} outside [{PADDING_MIN}, {PADDING_MAX}]"
        )));
    }

    let padding = usize::from(padding);
    if padding >= verified.len() {
        return Err(PassportError::Validation(format!(
            "padding length {padding} leaves no payload in {} bytes",
            verified.len()
        )));
    }

    Ok(&verified[padding..])
}
