//! # Builders
//!
//! Fluent configuration for submission-level decryption.
//!
//! ## Modules
//!
//! - [`decrypt_config`] - worker count, per-fetch timeout, overall deadline and failure policy
//!
//! ## Usage
//!
//! Start from [`DecryptConfig::new`](decrypt_config::DecryptConfig::new) and override
//! only what differs from the defaults.

pub mod decrypt_config;
pub use decrypt_config::{DecryptConfig, FailurePolicy};
