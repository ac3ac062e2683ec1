// src/decryptor/mod.rs

//! High-level decryption facade.
//!
//! Core API: [`decrypt_credentials`] once per submission, then
//! [`decrypt_element`] per element and [`BoundFile::decrypt`] /
//! [`decrypt_file`] per file.
//! Helpers: [`decrypt_secure_data`] and [`decrypt_and_verify`] for custom flows.

pub(crate) mod credentials;
pub(crate) mod element;
pub(crate) mod file;
pub(crate) mod secure_data;

pub use credentials::decrypt_credentials;
pub use element::{decrypt_element, decrypt_field, BoundFile, DecryptedElement};
pub use file::{decrypt_file, decrypt_file_within, FileFetcher};
pub use secure_data::{decrypt_and_verify, decrypt_secure_data};
