//! src/batch_ops.rs
//! Whole-submission decryption on a bounded rayon pool.
//!
//! Credentials are decrypted first on the calling thread; nothing else can
//! proceed without them. Elements then decrypt in parallel, and finally every
//! bound file is fetched and decrypted in parallel under the per-fetch timeout
//! and the overall submission deadline.

use crate::builders::{DecryptConfig, FailurePolicy};
use crate::crypto::rsa::BotPrivateKey;
use crate::decryptor::{decrypt_credentials, decrypt_element, BoundFile, FileFetcher};
use crate::error::PassportError;
use crate::passport::{ElementData, ElementKind, FileSlot, PassportData};
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One decrypted file of an element.
#[derive(Clone, PartialEq, Eq)]
pub struct DecryptedFile {
    pub slot: FileSlot,
    pub index: usize,
    pub file_id: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for DecryptedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptedFile")
            .field("slot", &self.slot)
            .field("index", &self.index)
            .field("file_id", &self.file_id)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Everything that decrypted for one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementReport {
    pub data: Option<ElementData>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub hash: Option<String>,
    /// Slot order, then wire order. Files that failed are absent.
    pub files: Vec<DecryptedFile>,
}

/// Which part of an element failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailedItem {
    /// The element itself: its layout, its credentials or its inline data.
    Element,
    File {
        slot: FileSlot,
        index: usize,
        file_id: String,
    },
}

/// A failure recorded under [`FailurePolicy::CollectPartial`].
#[derive(Debug)]
pub struct ItemFailure {
    pub kind: ElementKind,
    pub item: FailedItem,
    pub error: PassportError,
}

/// Outcome of [`decrypt_submission`].
#[derive(Debug)]
pub struct SubmissionReport {
    pub nonce: String,
    /// Elements that decrypted, keyed by kind. A failed element is absent.
    pub elements: BTreeMap<ElementKind, ElementReport>,
    /// Always empty under [`FailurePolicy::FailFast`].
    pub failures: Vec<ItemFailure>,
}

impl SubmissionReport {
    /// `true` when nothing failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    #[must_use]
    pub fn element(&self, kind: ElementKind) -> Option<&ElementReport> {
        self.elements.get(&kind)
    }
}

/// A bot's reusable submission pipeline: its key, its fetcher, its settings.
///
/// ```no_run
/// use passport_crypt::batch_ops::SubmissionDecryptor;
/// use passport_crypt::{BotPrivateKey, DecryptConfig, FetchError, PassportData};
/// use std::time::Duration;
///
/// let key = BotPrivateKey::from_pem(&std::fs::read_to_string("bot.pem")?)?;
/// let fetch = |file_id: &str, _budget: Duration| -> Result<Vec<u8>, FetchError> {
///     Err(format!("download {file_id} via getFile").into())
/// };
/// let decryptor = SubmissionDecryptor::new(&key, fetch)
///     .with_config(DecryptConfig::new().with_expected_nonce("order-17"));
///
/// let passport: PassportData = serde_json::from_str(&std::fs::read_to_string("update.json")?)?;
/// let report = decryptor.decrypt(&passport)?;
/// println!("{} elements, complete: {}", report.elements.len(), report.is_complete());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct SubmissionDecryptor<'k, F: ?Sized> {
    key: &'k BotPrivateKey,
    fetcher: Arc<F>,
    config: DecryptConfig,
}

impl<'k, F> SubmissionDecryptor<'k, F>
where
    F: FileFetcher + Send + Sync + 'static,
{
    /// Pipeline with the default [`DecryptConfig`].
    #[must_use]
    pub fn new(key: &'k BotPrivateKey, fetcher: F) -> Self {
        Self::shared(key, Arc::new(fetcher))
    }
}

impl<'k, F> SubmissionDecryptor<'k, F>
where
    F: FileFetcher + Send + Sync + ?Sized + 'static,
{
    /// Pipeline around a fetcher that is also used elsewhere.
    #[must_use]
    pub fn shared(key: &'k BotPrivateKey, fetcher: Arc<F>) -> Self {
        Self {
            key,
            fetcher,
            config: DecryptConfig::new(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: DecryptConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &DecryptConfig {
        &self.config
    }

    /// See [`decrypt_submission`].
    pub fn decrypt(&self, passport: &PassportData) -> Result<SubmissionReport, PassportError> {
        decrypt_submission(self.key, passport, &self.fetcher, &self.config)
    }
}

/// Decrypt a complete Passport submission.
///
/// # Errors
///
/// - any credentials failure ([`PassportError::Key`], [`PassportError::Integrity`], ...),
///   whatever the policy
/// - [`PassportError::Validation`] on a nonce mismatch, a repeated element kind or
///   a worker pool that cannot be built
/// - under [`FailurePolicy::FailFast`], the first element or file failure, including
///   [`PassportError::Timeout`] and [`PassportError::DeadlineExceeded`]
///
/// Fetches that outlive their budget are abandoned, so the call returns close to
/// the submission deadline even when the fetcher ignores its budget.
#[tracing::instrument(level = "info", skip_all, fields(elements = passport.data.len()))]
pub fn decrypt_submission<F>(
    key: &BotPrivateKey,
    passport: &PassportData,
    fetcher: &Arc<F>,
    config: &DecryptConfig,
) -> Result<SubmissionReport, PassportError>
where
    F: FileFetcher + Send + Sync + ?Sized + 'static,
{
    let started = Instant::now();

    let credentials = decrypt_credentials(key, &passport.credentials)?;
    if let Some(expected) = config.expected_nonce() {
        if credentials.nonce != expected {
            return Err(PassportError::Validation(
                "credentials nonce does not match the authorization request".into(),
            ));
        }
    }

    let mut seen = BTreeSet::new();
    if let Some(repeated) = passport.data.iter().find(|e| !seen.insert(e.kind)) {
        return Err(PassportError::Validation(format!(
            "{} element appears more than once",
            repeated.kind
        )));
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.workers())
        .build()
        .map_err(|e| PassportError::Validation(format!("cannot build worker pool: {e}")))?;

    let policy = config.failure_policy();
    let (mut elements, files, failures) = pool.install(|| {
        let (decrypted, mut failures) = run_phase(&passport.data, policy, |element| {
            decrypt_element(element, &credentials).map_err(|error| ItemFailure {
                kind: element.kind,
                item: FailedItem::Element,
                error,
            })
        })?;

        let jobs: Vec<(ElementKind, BoundFile<'_>)> = decrypted
            .iter()
            .flat_map(|element| element.files.iter().map(move |bound| (element.kind, *bound)))
            .collect();

        let (files, file_failures) = run_phase(&jobs, policy, |(kind, bound)| {
            decrypt_bound(bound, fetcher, config, started)
                .map(|file| (*kind, file))
                .map_err(|error| ItemFailure {
                    kind: *kind,
                    item: FailedItem::File {
                        slot: bound.slot,
                        index: bound.index,
                        file_id: bound.file.file_id.clone(),
                    },
                    error,
                })
        })?;
        failures.extend(file_failures);

        let elements: BTreeMap<ElementKind, ElementReport> = decrypted
            .into_iter()
            .map(|element| {
                let report = ElementReport {
                    data: element.data,
                    phone_number: element.phone_number,
                    email: element.email,
                    hash: element.hash,
                    files: Vec::new(),
                };
                (element.kind, report)
            })
            .collect();

        Ok::<_, PassportError>((elements, files, failures))
    })?;

    for (kind, file) in files {
        if let Some(report) = elements.get_mut(&kind) {
            report.files.push(file);
        }
    }

    tracing::info!(
        decrypted = elements.len(),
        failed = failures.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "submission decrypted"
    );

    Ok(SubmissionReport {
        nonce: credentials.nonce.clone(),
        elements,
        failures,
    })
}

fn decrypt_bound<F>(
    bound: &BoundFile<'_>,
    fetcher: &Arc<F>,
    config: &DecryptConfig,
    started: Instant,
) -> Result<DecryptedFile, PassportError>
where
    F: FileFetcher + Send + Sync + ?Sized + 'static,
{
    let deadline = config.submission_deadline();
    let remaining = deadline
        .checked_sub(started.elapsed())
        .filter(|left| !left.is_zero())
        .ok_or(PassportError::DeadlineExceeded(deadline))?;
    let capped = remaining < config.fetch_timeout();
    let budget: Duration = remaining.min(config.fetch_timeout());

    let bytes = bound.decrypt(fetcher, budget).map_err(|error| match error {
        PassportError::Timeout { .. } if capped => PassportError::DeadlineExceeded(deadline),
        other => other,
    })?;

    Ok(DecryptedFile {
        slot: bound.slot,
        index: bound.index,
        file_id: bound.file.file_id.clone(),
        bytes,
    })
}

/// Run `job` over `items` in parallel and split the outcome by policy.
///
/// Output order follows input order for the items that succeeded.
fn run_phase<'a, T, U, J>(
    items: &'a [T],
    policy: FailurePolicy,
    job: J,
) -> Result<(Vec<U>, Vec<ItemFailure>), PassportError>
where
    T: Sync,
    U: Send,
    J: Fn(&'a T) -> Result<U, ItemFailure> + Sync + Send,
{
    match policy {
        FailurePolicy::FailFast => items
            .par_iter()
            .map(&job)
            .collect::<Result<Vec<U>, ItemFailure>>()
            .map(|done| (done, Vec::new()))
            .map_err(|failure| failure.error),
        FailurePolicy::CollectPartial => {
            let mut done = Vec::with_capacity(items.len());
            let mut failures = Vec::new();
            for outcome in items.par_iter().map(&job).collect::<Vec<_>>() {
                match outcome {
                    Ok(value) => done.push(value),
                    Err(failure) => {
                        tracing::error!(
                            kind = %failure.kind,
                            item = ?failure.item,
                            error = %failure.error,
                            "submission item failed"
                        );
                        failures.push(failure);
                    }
                }
            }
            Ok((done, failures))
        }
    }
}
