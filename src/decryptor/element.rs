//! src/decryptor/element.rs
//! Per-element decryption, driven by the element kind's dispatch-table row.

use crate::decryptor::file::{decrypt_file_within, FileFetcher};
use crate::decryptor::secure_data::decrypt_secure_data;
use crate::error::PassportError;
use crate::passport::{
    Credentials, DataCredentials, ElementData, ElementKind, EncryptedPassportElement,
    FileCredentials, FileSlot, PassportFile, SecureValue,
};
use crate::utils::decode_base64;
use std::sync::Arc;
use std::time::Duration;
use secure_gate::RevealSecret;

/// Decrypt an element's inline `data` into the record its kind selects.
///
/// `ciphertext` is the already base64-decoded `data` field.
///
/// # Errors
///
/// - [`PassportError::Validation`] if `kind` carries no inline data
/// - [`PassportError::Integrity`] / [`PassportError::Validation`] from the pipeline
/// - [`PassportError::Decoding`] if the payload is not the expected JSON record
pub fn decrypt_field(
    ciphertext: &[u8],
    credentials: &DataCredentials,
    kind: ElementKind,
) -> Result<ElementData, PassportError> {
    let record = kind.layout().record.ok_or_else(|| {
        PassportError::Validation(format!("{kind} elements carry no inline data"))
    })?;

    let payload = decrypt_secure_data(
        credentials.secret().expose_secret(),
        credentials.data_hash(),
        ciphertext,
    )?;
    ElementData::from_json(record, payload.expose_secret())
}

/// One file reference of an element, paired with the credentials that decrypt it.
#[derive(Debug, Clone, Copy)]
pub struct BoundFile<'a> {
    pub slot: FileSlot,
    /// Position within the slot; always 0 for single-file slots.
    pub index: usize,
    pub file: &'a PassportFile,
    pub credentials: &'a FileCredentials,
}

impl BoundFile<'_> {
    /// Fetch and decrypt this file within `budget`.
    pub fn decrypt<F>(&self, fetcher: &Arc<F>, budget: Duration) -> Result<Vec<u8>, PassportError>
    where
        F: FileFetcher + Send + Sync + ?Sized + 'static,
    {
        decrypt_file_within(self.file, self.credentials, fetcher, budget)
    }
}

/// An element with its inline data decrypted and its files bound, not yet fetched.
#[derive(Debug)]
pub struct DecryptedElement<'a> {
    pub kind: ElementKind,
    pub data: Option<ElementData>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    /// File references in dispatch-table slot order, then wire order.
    pub files: Vec<BoundFile<'a>>,
    /// Base64 element hash, passed through for error reporting to Telegram.
    pub hash: Option<String>,
}

/// Decrypt one element with the submission's credentials.
///
/// Inline data is decrypted immediately. Files are bound to their
/// [`FileCredentials`] and returned for [`BoundFile::decrypt`], since fetching
/// them needs the network. `phone_number` and `email` are plaintext and copied
/// through unchanged.
///
/// # Errors
///
/// [`PassportError::Validation`] when the element does not fit its kind's layout:
/// plaintext fields on an encrypted kind, data or files the kind does not use,
/// or no credentials for data/files that are present.
#[tracing::instrument(level = "debug", skip_all, fields(kind = %element.kind))]
pub fn decrypt_element<'a>(
    element: &'a EncryptedPassportElement,
    credentials: &'a Credentials,
) -> Result<DecryptedElement<'a>, PassportError> {
    let kind = element.kind;
    let layout = kind.layout();

    if !layout.encrypted {
        return plaintext_element(element);
    }
    if element.phone_number.is_some() || element.email.is_some() {
        return Err(PassportError::Validation(format!(
            "{kind} element carries plaintext contact fields"
        )));
    }

    let secure_value = credentials.secure_value(kind);

    let data = match (&element.data, layout.record) {
        (None, _) => None,
        (Some(_), None) => {
            return Err(PassportError::Validation(format!(
                "{kind} elements carry no inline data"
            )))
        }
        (Some(encoded), Some(_)) => {
            let data_credentials = secure_value
                .and_then(|value| value.data.as_ref())
                .ok_or_else(|| missing_credentials(kind, "data"))?;
            let ciphertext = decode_base64(&format!("{kind}.data"), encoded)?;
            Some(decrypt_field(&ciphertext, data_credentials, kind)?)
        }
    };

    let files = bind_files(element, secure_value)?;

    tracing::debug!(has_data = data.is_some(), files = files.len(), "element decrypted");

    Ok(DecryptedElement {
        kind,
        data,
        phone_number: None,
        email: None,
        files,
        hash: element.hash.clone(),
    })
}

fn plaintext_element(
    element: &EncryptedPassportElement,
) -> Result<DecryptedElement<'_>, PassportError> {
    let kind = element.kind;
    let (own, foreign) = match kind {
        ElementKind::PhoneNumber => (&element.phone_number, &element.email),
        _ => (&element.email, &element.phone_number),
    };
    if own.is_none() {
        return Err(PassportError::Validation(format!("{kind} element has no value")));
    }
    if foreign.is_some() {
        return Err(PassportError::Validation(format!(
            "{kind} element carries another contact field"
        )));
    }
    if element.data.is_some() || element.occupied_slots().next().is_some() {
        return Err(PassportError::Validation(format!(
            "{kind} element must not carry encrypted data or files"
        )));
    }

    Ok(DecryptedElement {
        kind,
        data: None,
        phone_number: element.phone_number.clone(),
        email: element.email.clone(),
        files: Vec::new(),
        hash: element.hash.clone(),
    })
}

fn bind_files<'a>(
    element: &'a EncryptedPassportElement,
    secure_value: Option<&'a SecureValue>,
) -> Result<Vec<BoundFile<'a>>, PassportError> {
    let kind = element.kind;
    let layout = kind.layout();

    if let Some(slot) = element.occupied_slots().find(|slot| !layout.allows(*slot)) {
        return Err(PassportError::Validation(format!(
            "{kind} elements have no {slot} files"
        )));
    }

    let mut bound = Vec::new();
    for &slot in layout.file_slots {
        let files = element.files_in(slot);
        if files.is_empty() {
            continue;
        }

        let credentials = secure_value
            .map(|value| value.file_credentials(slot))
            .unwrap_or_default();
        if credentials.len() != files.len() {
            return Err(PassportError::Validation(format!(
                "{kind}.{slot}: {} files but {} file credentials",
                files.len(),
                credentials.len()
            )));
        }

        bound.extend(
            files
                .iter()
                .zip(credentials)
                .enumerate()
                .map(|(index, (file, credentials))| BoundFile {
                    slot,
                    index,
                    file,
                    credentials,
                }),
        );
    }
    Ok(bound)
}

fn missing_credentials(kind: ElementKind, what: &str) -> PassportError {
    PassportError::Validation(format!("no credentials for {kind} {what}"))
}
