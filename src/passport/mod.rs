//! # Passport Data Model
//!
//! Wire objects as Telegram delivers them ([`wire`]), the decrypted
//! credentials ([`credentials`]), the typed records inline data decrypts to
//! ([`records`]), and the closed classification of element kinds below.
//!
//! ## Dispatch table
//!
//! | kind | inline data | file slots |
//! |------|-------------|------------|
//! | `personal_details` | [`PersonalDetails`] | none |
//! | `passport`, `internal_passport` | [`IdDocumentData`] | front side, selfie, translation |
//! | `driver_license`, `identity_card` | [`IdDocumentData`] | front side, reverse side, selfie, translation |
//! | `address` | [`ResidentialAddress`] | none |
//! | `utility_bill`, `bank_statement`, `rental_agreement`, `passport_registration`, `temporary_registration` | none | files, translation |
//! | `phone_number`, `email` | plaintext, not encrypted | none |

pub mod credentials;
pub mod records;
pub mod wire;

pub use credentials::{Credentials, DataCredentials, FileCredentials, SecureData, SecureValue};
pub use records::{ElementData, IdDocumentData, PersonalDetails, ResidentialAddress};
pub use wire::{EncryptedCredentials, EncryptedPassportElement, PassportData, PassportFile};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every Passport element type Telegram defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    PersonalDetails,
    Passport,
    DriverLicense,
    IdentityCard,
    InternalPassport,
    Address,
    UtilityBill,
    BankStatement,
    RentalAgreement,
    PassportRegistration,
    TemporaryRegistration,
    PhoneNumber,
    Email,
}

impl ElementKind {
    pub const ALL: [ElementKind; 13] = [
        ElementKind::PersonalDetails,
        ElementKind::Passport,
        ElementKind::DriverLicense,
        ElementKind::IdentityCard,
        ElementKind::InternalPassport,
        ElementKind::Address,
        ElementKind::UtilityBill,
        ElementKind::BankStatement,
        ElementKind::RentalAgreement,
        ElementKind::PassportRegistration,
        ElementKind::TemporaryRegistration,
        ElementKind::PhoneNumber,
        ElementKind::Email,
    ];

    /// Wire name, as used in the `type` field and as `secure_data` key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ElementKind::PersonalDetails => "personal_details",
            ElementKind::Passport => "passport",
            ElementKind::DriverLicense => "driver_license",
            ElementKind::IdentityCard => "identity_card",
            ElementKind::InternalPassport => "internal_passport",
            ElementKind::Address => "address",
            ElementKind::UtilityBill => "utility_bill",
            ElementKind::BankStatement => "bank_statement",
            ElementKind::RentalAgreement => "rental_agreement",
            ElementKind::PassportRegistration => "passport_registration",
            ElementKind::TemporaryRegistration => "temporary_registration",
            ElementKind::PhoneNumber => "phone_number",
            ElementKind::Email => "email",
        }
    }

    /// What this kind carries and how it is protected.
    #[must_use]
    pub const fn layout(self) -> ElementLayout {
        const ID_FRONT_ONLY: &[FileSlot] = &[FileSlot::FrontSide, FileSlot::Selfie, FileSlot::Translation];
        const ID_TWO_SIDED: &[FileSlot] = &[
            FileSlot::FrontSide,
            FileSlot::ReverseSide,
            FileSlot::Selfie,
            FileSlot::Translation,
        ];
        const DOCUMENT_PAGES: &[FileSlot] = &[FileSlot::Files, FileSlot::Translation];

        match self {
            ElementKind::PersonalDetails => ElementLayout::encrypted(Some(RecordKind::PersonalDetails), &[]),
            ElementKind::Passport | ElementKind::InternalPassport => {
                ElementLayout::encrypted(Some(RecordKind::IdDocument), ID_FRONT_ONLY)
            }
            ElementKind::DriverLicense | ElementKind::IdentityCard => {
                ElementLayout::encrypted(Some(RecordKind::IdDocument), ID_TWO_SIDED)
            }
            ElementKind::Address => ElementLayout::encrypted(Some(RecordKind::ResidentialAddress), &[]),
            ElementKind::UtilityBill
            | ElementKind::BankStatement
            | ElementKind::RentalAgreement
            | ElementKind::PassportRegistration
            | ElementKind::TemporaryRegistration => ElementLayout::encrypted(None, DOCUMENT_PAGES),
            ElementKind::PhoneNumber | ElementKind::Email => ElementLayout::PLAINTEXT,
        }
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementKind {
    type Err = crate::PassportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ElementKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| crate::PassportError::Validation(format!("unknown element type {s:?}")))
    }
}

/// Record type an element's inline data decrypts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    PersonalDetails,
    IdDocument,
    ResidentialAddress,
}

/// A place an element can reference encrypted files from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileSlot {
    FrontSide,
    ReverseSide,
    Selfie,
    Files,
    Translation,
}

impl FileSlot {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FileSlot::FrontSide => "front_side",
            FileSlot::ReverseSide => "reverse_side",
            FileSlot::Selfie => "selfie",
            FileSlot::Files => "files",
            FileSlot::Translation => "translation",
        }
    }
}

impl fmt::Display for FileSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Protection class of an element kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protection {
    /// Encrypted inline data only.
    InlineData,
    /// Encrypted inline data plus encrypted files.
    InlineDataWithFiles,
    /// Encrypted files only.
    FilesOnly,
    /// Not encrypted; Telegram verifies the value itself.
    Plaintext,
}

/// One row of the dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementLayout {
    /// Record type of the inline `data`, if the kind has any.
    pub record: Option<RecordKind>,
    /// File slots the kind may use, in canonical order.
    pub file_slots: &'static [FileSlot],
    /// `false` only for `phone_number` and `email`.
    pub encrypted: bool,
}

impl ElementLayout {
    const PLAINTEXT: ElementLayout = ElementLayout {
        record: None,
        file_slots: &[],
        encrypted: false,
    };

    const fn encrypted(record: Option<RecordKind>, file_slots: &'static [FileSlot]) -> Self {
        Self {
            record,
            file_slots,
            encrypted: true,
        }
    }

    #[must_use]
    pub const fn protection(&self) -> Protection {
        match (self.encrypted, self.record.is_some(), self.file_slots.is_empty()) {
            (false, _, _) => Protection::Plaintext,
            (true, true, true) => Protection::InlineData,
            (true, true, false) => Protection::InlineDataWithFiles,
            (true, false, _) => Protection::FilesOnly,
        }
    }

    #[must_use]
    pub fn allows(&self, slot: FileSlot) -> bool {
        self.file_slots.contains(&slot)
    }
}
