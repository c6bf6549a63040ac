use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in SecurePass.
#[derive(Debug, Error)]
pub enum SecurePassError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: wrong key or corrupted data")]
    DecryptionFailed,

    #[error("Invalid ciphertext: {0}")]
    InvalidCiphertext(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Master record errors ---
    #[error("Master record not found at {0}; run `securepass init` first")]
    MasterRecordNotFound(PathBuf),

    #[error("Invalid master record: {0}")]
    InvalidMasterRecord(String),

    #[error("Incorrect master password")]
    AuthenticationFailed,

    #[error("Password mismatch: passwords do not match")]
    PasswordMismatch,

    // --- Store errors ---
    #[error("Storage error: {0}")]
    Storage(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Password generation failed: {0}")]
    Generator(String),
}

/// Convenience type alias for SecurePass results.
pub type Result<T> = std::result::Result<T, SecurePassError>;
