// src/encryptor/mod.rs

//! Encryption facade, the mirror of [`decryptor`](crate::decryptor).
//!
//! Core API: [`seal_credentials`] and [`seal_secure_data`] build Passport payloads.
//! Utility: [`encrypt_cbc`], [`add_padding`], [`add_padding_exact`] for custom layouts.

pub(crate) mod cbc;
pub(crate) mod seal;

pub use cbc::encrypt_cbc;
pub use seal::{
    add_padding, add_padding_exact, padding_length, seal_credentials, seal_padded,
    seal_secure_data, SealedData,
};
