//! Credential entries and the on-disk history line format.
//!
//! One history blob holds one line per entry, joined by `\n`:
//!
//! ```text
//! <ciphertext> | <YYYY-MM-DD HH:MM:SS> | <expiry days>
//! ```
//!
//! The ciphertext field is base64, so it can never contain the field or
//! line separators.

use std::fmt;

/// Separator between the fields of one history line.
pub const FIELD_SEPARATOR: &str = " | ";

/// Separator between history lines inside one blob.
pub const LINE_SEPARATOR: char = '\n';

/// Separator between website and account in a storage key.
pub const IDENTITY_SEPARATOR: char = ':';

/// `chrono` format for entry timestamps (local clock, second precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Expiry applied when none (or a non-positive one) is given.
pub const DEFAULT_EXPIRY_DAYS: i64 = 90;

/// A decrypted entry from a credential history.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialEntry {
    /// The decrypted credential value.
    pub password: String,
    /// When the entry was saved, in `TIMESTAMP_FORMAT`.
    pub timestamp: String,
    /// Days after `timestamp` at which the credential counts as expired.
    pub expiry_days: i64,
}

impl fmt::Debug for CredentialEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialEntry")
            .field("password", &"[REDACTED]")
            .field("timestamp", &self.timestamp)
            .field("expiry_days", &self.expiry_days)
            .finish()
    }
}

/// The still-encrypted fields of one history line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLine<'a> {
    pub ciphertext: &'a str,
    pub timestamp: &'a str,
    pub expiry_days: i64,
}

impl<'a> EntryLine<'a> {
    /// Split one history line into its fields.
    ///
    /// Returns `None` for lines with fewer than two fields.  A missing or
    /// non-numeric expiry field falls back to `DEFAULT_EXPIRY_DAYS`.
    pub fn parse(line: &'a str) -> Option<Self> {
        let mut fields = line.split(FIELD_SEPARATOR);
        let ciphertext = fields.next()?.trim();
        let timestamp = fields.next()?.trim();
        let expiry_days = fields
            .next()
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or(DEFAULT_EXPIRY_DAYS);

        Some(Self {
            ciphertext,
            timestamp,
            expiry_days,
        })
    }

    /// Render the line in on-disk form.
    pub fn render(&self) -> String {
        format!(
            "{}{FIELD_SEPARATOR}{}{FIELD_SEPARATOR}{}",
            self.ciphertext, self.timestamp, self.expiry_days
        )
    }
}

/// Normalize a requested expiry: non-positive values become the default.
pub fn normalize_expiry(expiry_days: i64) -> i64 {
    if expiry_days <= 0 {
        DEFAULT_EXPIRY_DAYS
    } else {
        expiry_days
    }
}

/// Build the storage key for an identity.  No case or whitespace
/// normalization is applied.
pub fn identity_key(website: &str, account: &str) -> String {
    format!("{website}{IDENTITY_SEPARATOR}{account}")
}

/// Split a storage key back into `(website, account)` at the first `:`.
pub fn split_identity_key(key: &str) -> Option<(&str, &str)> {
    key.split_once(IDENTITY_SEPARATOR)
}

/// Append a rendered line to an existing history blob.
pub fn append_line(existing: Option<&str>, line: &str) -> String {
    match existing {
        Some(history) => {
            let history = history.trim();
            if history.is_empty() {
                line.to_string()
            } else {
                format!("{history}{LINE_SEPARATOR}{line}")
            }
        }
        None => line.to_string(),
    }
}
