// src/crypto/mod.rs

//! Low-level crypto primitives.
//!
//! Each stage of the Passport pipeline lives in its own module; the
//! [`decryptor`](crate::decryptor) facade chains them.

pub mod cbc;
pub mod integrity;
pub mod kdf;
pub mod padding;
pub mod rsa;
