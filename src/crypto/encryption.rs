//! AES-256-GCM authenticated encryption of single credential values.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce from the
//! OS entropy source and prepends it to the ciphertext.  The combined
//! buffer is then base64-encoded so it can live inside one line of a
//! credential history.
//!
//! Layout of the decoded blob:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]
//!
//! The standard base64 alphabet (`A-Z a-z 0-9 + / =`) never produces the
//! `" | "` field separator or a newline.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::errors::{Result, SecurePassError};

/// Size of the AES-256-GCM nonce in bytes.
const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
const TAG_LEN: usize = 16;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns base64(nonce || ciphertext || tag).
pub fn encrypt(key: &[u8], plaintext: &str) -> Result<String> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| SecurePassError::EncryptionFailed(format!("invalid key length: {e}")))?;

    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce_bytes)
        .map_err(|e| SecurePassError::EncryptionFailed(format!("entropy source failed: {e}")))?;
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext.as_bytes())
        .map_err(|e| SecurePassError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    blob.extend_from_slice(&nonce_bytes);
    blob.extend_from_slice(&ciphertext);
    Ok(BASE64.encode(blob))
}

/// Decrypt a blob that was produced by `encrypt`.
///
/// Malformed input is `InvalidCiphertext`; a tag that does not verify
/// (wrong key or tampered bytes) is `DecryptionFailed`.
pub fn decrypt(key: &[u8], blob: &str) -> Result<String> {
    let raw = BASE64
        .decode(blob.trim())
        .map_err(|e| SecurePassError::InvalidCiphertext(format!("not valid base64: {e}")))?;

    if raw.len() < NONCE_LEN + TAG_LEN {
        return Err(SecurePassError::InvalidCiphertext(format!(
            "blob is {} bytes, expected at least {}",
            raw.len(),
            NONCE_LEN + TAG_LEN
        )));
    }

    let (nonce_bytes, ciphertext) = raw.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| SecurePassError::DecryptionFailed)?;

    let plaintext = cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| SecurePassError::DecryptionFailed)?;

    String::from_utf8(plaintext).map_err(|_| {
        SecurePassError::InvalidCiphertext("decrypted value is not valid UTF-8".into())
    })
}
