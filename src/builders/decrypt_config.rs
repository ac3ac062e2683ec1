//! src/builders/decrypt_config.rs
//! Submission decryption settings

use crate::consts::{DEFAULT_FETCH_TIMEOUT, DEFAULT_SUBMISSION_DEADLINE, DEFAULT_WORKERS};
use std::time::Duration;

/// What happens when one element or file of a submission fails.
///
/// A credentials failure is always fatal, whatever the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failure and return it.
    #[default]
    FailFast,
    /// Keep going and report every failure next to what did decrypt.
    CollectPartial,
}

/// Settings for [`decrypt_submission`](crate::decrypt_submission).
///
/// Defaults: [`DEFAULT_WORKERS`] workers, [`DEFAULT_FETCH_TIMEOUT`] per file,
/// [`DEFAULT_SUBMISSION_DEADLINE`] overall, [`FailurePolicy::FailFast`], no nonce check.
///
/// # Thread Safety
///
/// Plain data, `Send + Sync`. One config can drive any number of concurrent submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptConfig {
    workers: usize,
    fetch_timeout: Duration,
    submission_deadline: Duration,
    failure_policy: FailurePolicy,
    expected_nonce: Option<String>,
}

impl DecryptConfig {
    /// Create a config with the defaults.
    #[must_use]
    pub fn new() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            submission_deadline: DEFAULT_SUBMISSION_DEADLINE,
            failure_policy: FailurePolicy::FailFast,
            expected_nonce: None,
        }
    }

    /// Set the worker pool size (minimum 1)
    #[must_use]
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    /// Set the budget for a single file fetch
    #[must_use]
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the wall-clock budget for the whole submission
    #[must_use]
    pub fn with_submission_deadline(mut self, deadline: Duration) -> Self {
        self.submission_deadline = deadline;
        self
    }

    #[must_use]
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Require the decrypted credentials to carry this nonce.
    ///
    /// The nonce is what the bot put in its authorization request; a mismatch
    /// means the submission answers a different request.
    #[must_use]
    pub fn with_expected_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.expected_nonce = Some(nonce.into());
        self
    }

    #[must_use]
    pub const fn workers(&self) -> usize {
        self.workers
    }

    #[must_use]
    pub const fn fetch_timeout(&self) -> Duration {
        self.fetch_timeout
    }

    #[must_use]
    pub const fn submission_deadline(&self) -> Duration {
        self.submission_deadline
    }

    #[must_use]
    pub const fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    #[must_use]
    pub fn expected_nonce(&self) -> Option<&str> {
        self.expected_nonce.as_deref()
    }
}

impl Default for DecryptConfig {
    fn default() -> Self {
        Self::new()
    }
}
