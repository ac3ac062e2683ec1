//! Passport wire objects, exactly as the Bot API delivers them.
//!
//! Binary fields stay base64 strings here; they are decoded at the point of
//! use so a decoding failure can name the field it came from.

use super::{ElementKind, FileSlot};
use serde::{Deserialize, Serialize};

/// `PassportData`: all elements the user shared plus the encrypted credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassportData {
    pub data: Vec<EncryptedPassportElement>,
    pub credentials: EncryptedCredentials,
}

/// `EncryptedCredentials`: top-level bundle whose `secret` is RSA-wrapped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedCredentials {
    /// Base64 AES-256-CBC ciphertext of the padded credentials JSON.
    pub data: String,
    /// Base64 SHA-256 of the padded credentials JSON.
    pub hash: String,
    /// Base64 RSA-OAEP ciphertext of the symmetric secret.
    pub secret: String,
}

/// A file uploaded to Telegram Passport. The bytes behind `file_id` are encrypted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassportFile {
    pub file_id: String,
    #[serde(default)]
    pub file_unique_id: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default)]
    pub file_date: i64,
}

/// `EncryptedPassportElement`: one document or fact shared by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPassportElement {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Base64 encrypted inline data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<PassportFile>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front_side: Option<PassportFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reverse_side: Option<PassportFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selfie: Option<PassportFile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<Vec<PassportFile>>,
    /// Base64 element hash, used when reporting `PassportElementError`s back to Telegram.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
}

impl EncryptedPassportElement {
    /// A bare element of `kind` with every optional field empty.
    #[must_use]
    pub fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            data: None,
            phone_number: None,
            email: None,
            files: None,
            front_side: None,
            reverse_side: None,
            selfie: None,
            translation: None,
            hash: None,
        }
    }

    /// File references held in `slot`, in wire order.
    #[must_use]
    pub fn files_in(&self, slot: FileSlot) -> &[PassportFile] {
        match slot {
            FileSlot::FrontSide => self.front_side.as_slice(),
            FileSlot::ReverseSide => self.reverse_side.as_slice(),
            FileSlot::Selfie => self.selfie.as_slice(),
            FileSlot::Files => self.files.as_deref().unwrap_or_default(),
            FileSlot::Translation => self.translation.as_deref().unwrap_or_default(),
        }
    }

    /// Every slot that references at least one file.
    pub fn occupied_slots(&self) -> impl Iterator<Item = FileSlot> + '_ {
        [
            FileSlot::FrontSide,
            FileSlot::ReverseSide,
            FileSlot::Selfie,
            FileSlot::Files,
            FileSlot::Translation,
        ]
        .into_iter()
        .filter(|slot| !self.files_in(*slot).is_empty())
    }
}
