//! Cryptographic primitives for SecurePass.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption of single values (`encryption`)
//! - PBKDF2-HMAC-SHA256 key derivation and constant-time comparison (`kdf`)
//! - The zeroizing session key wrapper (`keys`)

pub mod encryption;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_key, ...};
pub use encryption::{decrypt, encrypt};
pub use kdf::{constant_time_eq, derive_key, generate_salt};
pub use keys::DerivedKey;
