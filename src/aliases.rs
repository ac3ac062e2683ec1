//! # Secure-Gate Type Aliases
//!
//! Type aliases for secure memory management using [`secure-gate`](https://github.com/Slurp9187/secure-gate).
//! Every alias zeroizes its contents on drop and only hands out the bytes through an
//! explicit `.expose_secret()` / `.expose_secret_mut()`.
//!
//! ## Type Categories
//!
//! ### Generic Secure Buffers
//! - [`SpanBuffer<N>`] - Generic secure stack buffer for any size `N`
//!
//! ### Fixed-Size Secrets
//! - [`Aes256Key32`] - 32-byte AES-256 key (first half of the SHA-512 derivation)
//! - [`Iv16`] - 16-byte CBC initialization vector
//! - [`Block16`] - one AES block (CBC chaining value)
//! - [`DerivationDigest64`] - full SHA-512 output the key and IV are cut from
//!
//! ### Dynamic Secrets
//! - [`SecretBytes`] - variable-length secret seeds and unverified plaintexts

// ─────────────────────────────────────────────────────────────────────────────
// SpanBuffer: generic secure stack buffer (direct alias to secure-gate's Fixed)
// ─────────────────────────────────────────────────────────────────────────────
pub type SpanBuffer<const N: usize> = secure_gate::Fixed<[u8; N]>;

// ─────────────────────────────────────────────────────────────────────────────
// Fixed-size concrete secrets, alphabetical order
// ─────────────────────────────────────────────────────────────────────────────
pub type Aes256Key32 = SpanBuffer<32>;
pub type Block16 = SpanBuffer<16>;
pub type DerivationDigest64 = SpanBuffer<64>;
pub type Iv16 = SpanBuffer<16>;

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────
pub type SecretBytes = secure_gate::Dynamic<Vec<u8>>;
