//! The master credential record and operator authentication.
//!
//! The record is a fixed 64-byte file with no header:
//!
//! ```text
//! [salt: 32 bytes][verification hash: 32 bytes]
//! ```
//!
//! The verification hash is `PBKDF2(secret, salt)`, and it doubles as the
//! symmetric key for the whole session.  The record is written once on
//! first run and never modified afterwards.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use zeroize::Zeroize;

use crate::crypto::kdf::{self, KEY_LEN, SALT_LEN};
use crate::crypto::DerivedKey;
use crate::errors::{Result, SecurePassError};

/// Exact size of a master record file in bytes.
pub const MASTER_RECORD_LEN: usize = SALT_LEN + KEY_LEN;

/// Salt plus verification hash for one vault.
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct MasterRecord {
    salt: [u8; SALT_LEN],
    verification_hash: [u8; KEY_LEN],
}

impl MasterRecord {
    /// Build a fresh record for `secret` with a newly generated salt.
    pub fn create(secret: &[u8]) -> Result<Self> {
        let salt = kdf::generate_salt()?;
        let verification_hash = kdf::derive_key(secret, &salt)?;
        Ok(Self {
            salt,
            verification_hash,
        })
    }

    /// Parse the on-disk layout.  Anything other than exactly 64 bytes
    /// is rejected.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() != MASTER_RECORD_LEN {
            return Err(SecurePassError::InvalidMasterRecord(format!(
                "expected exactly {MASTER_RECORD_LEN} bytes, got {}",
                data.len()
            )));
        }

        let (salt_bytes, hash_bytes) = data.split_at(SALT_LEN);
        let mut salt = [0u8; SALT_LEN];
        let mut verification_hash = [0u8; KEY_LEN];
        salt.copy_from_slice(salt_bytes);
        verification_hash.copy_from_slice(hash_bytes);

        Ok(Self {
            salt,
            verification_hash,
        })
    }

    /// Serialize to the on-disk layout (salt || hash).
    pub fn to_bytes(&self) -> [u8; MASTER_RECORD_LEN] {
        let mut out = [0u8; MASTER_RECORD_LEN];
        out[..SALT_LEN].copy_from_slice(&self.salt);
        out[SALT_LEN..].copy_from_slice(&self.verification_hash);
        out
    }

    pub fn salt(&self) -> &[u8; SALT_LEN] {
        &self.salt
    }

    /// Load a record from disk and validate its length.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SecurePassError::MasterRecordNotFound(path.to_path_buf()));
        }

        let mut data = fs::read(path)?;
        let record = Self::from_bytes(&data);
        data.zeroize();
        record
    }

    /// Write the record to `path`, refusing to replace an existing file.
    ///
    /// The bytes go to a temp file in the same directory first and are
    /// renamed into place, so a failed write never leaves a truncated
    /// record behind.  On Unix the file is created with owner-only
    /// permissions.
    pub fn persist(&self, path: &Path) -> Result<()> {
        if path.exists() {
            return Err(SecurePassError::Io(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            )));
        }

        let parent = path.parent().unwrap_or(Path::new("."));
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }

        let tmp_path = parent.join(format!(
            ".{}.tmp",
            path.file_name().unwrap_or_default().to_string_lossy()
        ));

        let written = self.write_file(&tmp_path).and_then(|()| {
            if path.exists() {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("{} already exists", path.display()),
                ));
            }
            fs::rename(&tmp_path, path)
        });

        if let Err(e) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(e.into());
        }

        Ok(())
    }

    /// Write the raw record to `tmp_path` and flush it to disk.
    fn write_file(&self, tmp_path: &Path) -> io::Result<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(tmp_path)?;

        // A stale temp file keeps its old mode, so set it explicitly.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }

        let mut bytes = self.to_bytes();
        let written = file.write_all(&bytes).and_then(|()| file.sync_all());
        bytes.zeroize();
        written
    }

    /// Check `secret` against this record and return the session key.
    pub fn verify(&self, secret: &[u8]) -> Result<DerivedKey> {
        let mut candidate = kdf::derive_key(secret, &self.salt)?;

        if !kdf::constant_time_eq(&candidate, &self.verification_hash) {
            candidate.zeroize();
            return Err(SecurePassError::AuthenticationFailed);
        }

        let key = DerivedKey::new(candidate);
        candidate.zeroize();
        Ok(key)
    }
}

impl fmt::Debug for MasterRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterRecord")
            .field("salt", &format_args!("[{} bytes]", self.salt.len()))
            .field("verification_hash", &format_args!("[REDACTED]"))
            .finish()
    }
}

/// Returns `true` if a master record exists at `path`.
pub fn is_initialized(path: &Path) -> bool {
    path.exists()
}

/// First-run setup.
///
/// If a record already exists at `path` it is loaded and returned as-is;
/// setup never re-creates or overwrites a vault.  Otherwise the two
/// secrets must match, a fresh salt is generated, and the record is
/// written to disk.
pub fn setup(path: &Path, secret: &[u8], confirm_secret: &[u8]) -> Result<MasterRecord> {
    if is_initialized(path) {
        tracing::debug!(path = %path.display(), "master record already present, skipping setup");
        return MasterRecord::load(path);
    }

    if !kdf::constant_time_eq(secret, confirm_secret) {
        return Err(SecurePassError::PasswordMismatch);
    }

    let record = MasterRecord::create(secret)?;
    record.persist(path)?;

    tracing::info!(path = %path.display(), "created master record");
    Ok(record)
}

/// Verify `secret` against `record` and return the session key.
pub fn verify(secret: &[u8], record: &MasterRecord) -> Result<DerivedKey> {
    record.verify(secret)
}

/// Load the record at `path` and verify `secret` against it.
pub fn unlock(path: &Path, secret: &[u8]) -> Result<DerivedKey> {
    let record = MasterRecord::load(path)?;
    let key = record.verify(secret);
    if key.is_err() {
        tracing::warn!(path = %path.display(), "master password verification failed");
    }
    key
}
