//! Decrypted Passport credentials.
//!
//! These types only implement `Deserialize`: they are produced by
//! [`decrypt_credentials`](crate::decrypt_credentials), used for one
//! submission, and dropped. Secrets sit in zeroizing buffers and are redacted
//! from `Debug`.

use super::{ElementKind, FileSlot};
use crate::aliases::SecretBytes;
use crate::utils::serde_base64;
use serde::Deserialize;
use std::fmt;

/// Top-level decrypted credentials object.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub secure_data: SecureData,
    /// Nonce the bot passed when requesting the data; callers should compare it.
    pub nonce: String,
}

impl Credentials {
    /// Credentials for `kind`, if the user shared it.
    #[must_use]
    pub fn secure_value(&self, kind: ElementKind) -> Option<&SecureValue> {
        self.secure_data.get(kind)
    }
}

/// Per-element credentials, keyed by element type.
#[derive(Debug, Default, Deserialize)]
pub struct SecureData {
    pub personal_details: Option<SecureValue>,
    pub passport: Option<SecureValue>,
    pub internal_passport: Option<SecureValue>,
    pub driver_license: Option<SecureValue>,
    pub identity_card: Option<SecureValue>,
    pub address: Option<SecureValue>,
    pub utility_bill: Option<SecureValue>,
    pub bank_statement: Option<SecureValue>,
    pub rental_agreement: Option<SecureValue>,
    pub passport_registration: Option<SecureValue>,
    pub temporary_registration: Option<SecureValue>,
}

impl SecureData {
    /// `phone_number` and `email` are never encrypted and always yield `None`.
    #[must_use]
    pub fn get(&self, kind: ElementKind) -> Option<&SecureValue> {
        match kind {
            ElementKind::PersonalDetails => self.personal_details.as_ref(),
            ElementKind::Passport => self.passport.as_ref(),
            ElementKind::InternalPassport => self.internal_passport.as_ref(),
            ElementKind::DriverLicense => self.driver_license.as_ref(),
            ElementKind::IdentityCard => self.identity_card.as_ref(),
            ElementKind::Address => self.address.as_ref(),
            ElementKind::UtilityBill => self.utility_bill.as_ref(),
            ElementKind::BankStatement => self.bank_statement.as_ref(),
            ElementKind::RentalAgreement => self.rental_agreement.as_ref(),
            ElementKind::PassportRegistration => self.passport_registration.as_ref(),
            ElementKind::TemporaryRegistration => self.temporary_registration.as_ref(),
            ElementKind::PhoneNumber | ElementKind::Email => None,
        }
    }
}

/// Decryption parameters for one element's data and files.
#[derive(Debug, Default, Deserialize)]
pub struct SecureValue {
    pub data: Option<DataCredentials>,
    pub front_side: Option<FileCredentials>,
    pub reverse_side: Option<FileCredentials>,
    pub selfie: Option<FileCredentials>,
    pub translation: Option<Vec<FileCredentials>>,
    pub files: Option<Vec<FileCredentials>>,
}

impl SecureValue {
    /// Credentials for the files in `slot`, index-aligned with
    /// [`EncryptedPassportElement::files_in`](super::EncryptedPassportElement::files_in).
    #[must_use]
    pub fn file_credentials(&self, slot: FileSlot) -> &[FileCredentials] {
        match slot {
            FileSlot::FrontSide => self.front_side.as_slice(),
            FileSlot::ReverseSide => self.reverse_side.as_slice(),
            FileSlot::Selfie => self.selfie.as_slice(),
            FileSlot::Files => self.files.as_deref().unwrap_or_default(),
            FileSlot::Translation => self.translation.as_deref().unwrap_or_default(),
        }
    }
}

/// Secret and hash for an element's inline `data`.
#[derive(Deserialize)]
pub struct DataCredentials {
    #[serde(deserialize_with = "serde_base64::bytes")]
    data_hash: Vec<u8>,
    #[serde(deserialize_with = "serde_base64::secret")]
    secret: SecretBytes,
}

impl DataCredentials {
    #[must_use]
    pub fn new(secret: Vec<u8>, data_hash: Vec<u8>) -> Self {
        Self {
            data_hash,
            secret: SecretBytes::new(secret),
        }
    }

    #[must_use]
    pub fn data_hash(&self) -> &[u8] {
        &self.data_hash
    }

    #[must_use]
    pub fn secret(&self) -> &SecretBytes {
        &self.secret
    }
}

impl fmt::Debug for DataCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataCredentials")
            .field("data_hash_len", &self.data_hash.len())
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Secret and hash for exactly one encrypted file.
#[derive(Deserialize)]
pub struct FileCredentials {
    #[serde(deserialize_with = "serde_base64::bytes")]
    file_hash: Vec<u8>,
    #[serde(deserialize_with = "serde_base64::secret")]
    secret: SecretBytes,
}

impl FileCredentials {
    #[must_use]
    pub fn new(secret: Vec<u8>, file_hash: Vec<u8>) -> Self {
        Self {
            file_hash,
            secret: SecretBytes::new(secret),
        }
    }

    #[must_use]
    pub fn file_hash(&self) -> &[u8] {
        &self.file_hash
    }

    #[must_use]
    pub fn secret(&self) -> &SecretBytes {
        &self.secret
    }
}

impl fmt::Debug for FileCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileCredentials")
            .field("file_hash_len", &self.file_hash.len())
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
