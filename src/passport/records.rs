//! Typed records the inline `data` of an element decrypts to.
//!
//! Only the fields Telegram always fills are required; everything else is
//! optional and omitted again on serialization, so a record re-encodes to the
//! JSON it was decoded from.

use super::RecordKind;
use crate::error::PassportError;
use serde::{Deserialize, Serialize};

/// `PersonalDetails`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDetails {
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    /// `DD.MM.YYYY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    /// `male` or `female`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    /// ISO 3166-1 alpha-2
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub residence_country_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name_native: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name_native: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name_native: Option<String>,
}

/// `IdDocumentData`: passport, internal passport, driver license, identity card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdDocumentData {
    pub document_no: String,
    /// `DD.MM.YYYY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<String>,
}

/// `ResidentialAddress`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResidentialAddress {
    pub street_line1: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street_line2: Option<String>,
    pub city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub country_code: String,
    pub post_code: String,
}

/// Decrypted inline data of one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ElementData {
    PersonalDetails(PersonalDetails),
    IdDocument(IdDocumentData),
    Address(ResidentialAddress),
}

impl ElementData {
    /// Decode a verified, unpadded JSON payload into the record `kind` names.
    pub fn from_json(kind: RecordKind, payload: &[u8]) -> Result<Self, PassportError> {
        Ok(match kind {
            RecordKind::PersonalDetails => ElementData::PersonalDetails(serde_json::from_slice(payload)?),
            RecordKind::IdDocument => ElementData::IdDocument(serde_json::from_slice(payload)?),
            RecordKind::ResidentialAddress => ElementData::Address(serde_json::from_slice(payload)?),
        })
    }

    #[must_use]
    pub fn as_personal_details(&self) -> Option<&PersonalDetails> {
        match self {
            ElementData::PersonalDetails(details) => Some(details),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_id_document(&self) -> Option<&IdDocumentData> {
        match self {
            ElementData::IdDocument(document) => Some(document),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_address(&self) -> Option<&ResidentialAddress> {
        match self {
            ElementData::Address(address) => Some(address),
            _ => None,
        }
    }
}
