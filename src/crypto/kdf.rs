//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The parameters are fixed: a vault created with one set of constants
//! can only be opened with exactly the same constants, and there is no
//! key-rotation path.

use hmac::Hmac;
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::errors::{Result, SecurePassError};

/// Length of the salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// Length of the derived key in bytes (256 bits, for AES-256).
pub const KEY_LEN: usize = 32;

/// PBKDF2 iteration count.
pub const ITERATIONS: u32 = 100_000;

/// Derive a 32-byte key from a master secret and salt.
///
/// The same secret + salt always produce the same key.
pub fn derive_key(secret: &[u8], salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    derive_key_with_rounds(secret, salt, ITERATIONS)
}

/// Derive a 32-byte key with an explicit iteration count.
pub fn derive_key_with_rounds(secret: &[u8], salt: &[u8], rounds: u32) -> Result<[u8; KEY_LEN]> {
    if rounds < 1 {
        return Err(SecurePassError::KeyDerivationFailed(
            "PBKDF2 rounds must be at least 1".into(),
        ));
    }

    let mut key = [0u8; KEY_LEN];
    pbkdf2::pbkdf2::<Hmac<Sha256>>(secret, salt, rounds, &mut key)
        .map_err(|e| SecurePassError::KeyDerivationFailed(format!("PBKDF2 failed: {e}")))?;

    Ok(key)
}

/// Generate a cryptographically random 32-byte salt.
pub fn generate_salt() -> Result<[u8; SALT_LEN]> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| SecurePassError::KeyDerivationFailed(format!("entropy source failed: {e}")))?;
    Ok(salt)
}

/// Compare two byte strings without short-circuiting on the first
/// differing byte.
///
/// Slices of different length compare unequal.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
