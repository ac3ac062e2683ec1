// src/lib.rs

pub mod aliases;
#[cfg(feature = "batch-ops")]
pub mod batch_ops;
pub mod builders;
pub mod consts;
pub mod crypto;
pub mod decryptor;
pub mod encryptor;
pub mod error;
pub mod passport;
pub mod utils;

// High-level API: what a bot handling `passport_data` imports
pub use builders::{DecryptConfig, FailurePolicy};
pub use crypto::rsa::BotPrivateKey;
pub use decryptor::{
    decrypt_credentials, decrypt_element, decrypt_field, decrypt_file, decrypt_file_within,
    BoundFile, DecryptedElement, FileFetcher,
};
pub use error::{FetchError, PassportError};
pub use passport::{
    Credentials, ElementData, ElementKind, EncryptedCredentials, EncryptedPassportElement,
    FileSlot, PassportData, PassportFile,
};

// Low-level pipeline, public at the root for custom flows (e.g. files fetched out of band)
pub use crypto::kdf::derive_key_iv;
pub use decryptor::decrypt_secure_data;

#[cfg(feature = "batch-ops")]
pub use batch_ops::{
    decrypt_submission, DecryptedFile, ElementReport, FailedItem, ItemFailure, SubmissionDecryptor,
    SubmissionReport,
};
