//! src/decryptor/file.rs
//! Passport file decryption on top of an external fetch capability.

use crate::consts::DEFAULT_FETCH_TIMEOUT;
use crate::decryptor::secure_data::decrypt_secure_data;
use crate::error::{FetchError, PassportError};
use crate::passport::{FileCredentials, PassportFile};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use secure_gate::RevealSecret;

/// Resolves a Telegram file id to the raw encrypted bytes behind it.
///
/// This is the seam to the Bot API `getFile` + download collaborator. `budget`
/// is how long the call may take. Each call runs on its own thread; once the
/// budget is spent the caller stops waiting and reports
/// [`PassportError::Timeout`], and whatever the call returns later is dropped.
/// Implementations should still abort by then so abandoned threads do not pile
/// up. Retries, if any, belong inside the implementation.
///
/// Any `Fn(&str, Duration) -> Result<Vec<u8>, FetchError>` is a fetcher.
pub trait FileFetcher {
    fn fetch(&self, file_id: &str, budget: Duration) -> Result<Vec<u8>, FetchError>;
}

impl<F> FileFetcher for F
where
    F: Fn(&str, Duration) -> Result<Vec<u8>, FetchError>,
{
    #[inline]
    fn fetch(&self, file_id: &str, budget: Duration) -> Result<Vec<u8>, FetchError> {
        self(file_id, budget)
    }
}

/// Fetch and decrypt one Passport file with the default fetch budget.
///
/// See [`decrypt_file_within`].
pub fn decrypt_file<F>(
    file: &PassportFile,
    credentials: &FileCredentials,
    fetcher: &Arc<F>,
) -> Result<Vec<u8>, PassportError>
where
    F: FileFetcher + Send + Sync + ?Sized + 'static,
{
    decrypt_file_within(file, credentials, fetcher, DEFAULT_FETCH_TIMEOUT)
}

/// Fetch `file.file_id` within `budget`, then derive → decrypt → verify →
/// strip with `credentials.secret` / `credentials.file_hash`.
///
/// Returns no later than `budget` after the call starts, plus decryption time,
/// whether or not the fetcher honours its budget.
///
/// # Errors
///
/// - [`PassportError::Fetch`] with the fetcher's error as source, or when the
///   fetch thread cannot be started or panics
/// - [`PassportError::Timeout`] if no answer arrived within `budget`
/// - [`PassportError::Validation`] / [`PassportError::Integrity`] from the pipeline
#[tracing::instrument(level = "debug", skip_all, fields(file_id = %file.file_id))]
pub fn decrypt_file_within<F>(
    file: &PassportFile,
    credentials: &FileCredentials,
    fetcher: &Arc<F>,
    budget: Duration,
) -> Result<Vec<u8>, PassportError>
where
    F: FileFetcher + Send + Sync + ?Sized + 'static,
{
    let started = Instant::now();
    let encrypted = fetch_within(fetcher, &file.file_id, budget)?;
    tracing::debug!(encrypted_len = encrypted.len(), elapsed = ?started.elapsed(), "file fetched");

    let payload = decrypt_secure_data(
        credentials.secret().expose_secret(),
        credentials.file_hash(),
        &encrypted,
    )?;
    Ok(payload.expose_secret().clone())
}

/// Run one fetch on a detached thread and wait for it at most `budget`.
fn fetch_within<F>(fetcher: &Arc<F>, file_id: &str, budget: Duration) -> Result<Vec<u8>, PassportError>
where
    F: FileFetcher + Send + Sync + ?Sized + 'static,
{
    let fetch_error = |source: FetchError| PassportError::Fetch {
        file_id: file_id.to_owned(),
        source,
    };

    // Capacity 1: a late answer never blocks the abandoned thread.
    let (tx, rx) = mpsc::sync_channel(1);
    let worker = Arc::clone(fetcher);
    let id = file_id.to_owned();
    thread::Builder::new()
        .name("passport-fetch".into())
        .spawn(move || {
            let _ = tx.send(worker.fetch(&id, budget));
        })
        .map_err(|e| fetch_error(e.into()))?;

    match rx.recv_timeout(budget) {
        Ok(result) => result.map_err(fetch_error),
        Err(RecvTimeoutError::Timeout) => {
            tracing::warn!(?budget, "fetch abandoned after its budget");
            Err(PassportError::Timeout {
                file_id: file_id.to_owned(),
                budget,
            })
        }
        Err(RecvTimeoutError::Disconnected) => Err(fetch_error("fetcher panicked".into())),
    }
}
