//! Append-only credential histories on top of a key-value backend.
//!
//! `CredentialStore` maps an identity (website, account) to one history
//! blob.  Saving never edits or removes a line: it reads the current
//! blob, appends the new entry, and writes the whole blob back inside a
//! single write transaction.  The current credential is always the last
//! line.
//!
//! There is no locking across processes, so two processes saving to the
//! same identity at once can lose one of the writes.

use chrono::{Local, NaiveDateTime};

use crate::crypto::encryption::{decrypt, encrypt};
use crate::crypto::DerivedKey;
use crate::errors::Result;
use crate::storage::Backend;

use super::entry::{
    append_line, identity_key, normalize_expiry, split_identity_key, CredentialEntry, EntryLine,
    LINE_SEPARATOR, TIMESTAMP_FORMAT,
};

/// One identity matched by `search`, with its most recent entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub website: String,
    pub account: String,
    pub entry: CredentialEntry,
}

/// Credential histories stored in a `Backend`.
pub struct CredentialStore<B> {
    backend: B,
}

impl<B: Backend> CredentialStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns a reference to the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Encrypt `plaintext` and append it to the identity's history,
    /// stamped with the local time.
    ///
    /// `expiry_days <= 0` is replaced by the 90-day default.
    ///
    /// The history is stored under `website:account`, read back by
    /// splitting at the first `:`.  A website containing `:` therefore
    /// shares a history with the shorter website whose account absorbs
    /// the rest: `("a:b", "c")` and `("a", "b:c")` are the same identity,
    /// and search reports it as `("a", "b:c")`.
    pub fn save(
        &self,
        website: &str,
        account: &str,
        plaintext: &str,
        key: &DerivedKey,
        expiry_days: i64,
    ) -> Result<()> {
        self.save_at(
            website,
            account,
            plaintext,
            key,
            expiry_days,
            Local::now().naive_local(),
        )
    }

    /// Like `save`, with an explicit timestamp.
    pub fn save_at(
        &self,
        website: &str,
        account: &str,
        plaintext: &str,
        key: &DerivedKey,
        expiry_days: i64,
        saved_at: NaiveDateTime,
    ) -> Result<()> {
        let expiry_days = normalize_expiry(expiry_days);
        let ciphertext = encrypt(key.as_bytes(), plaintext)?;
        let timestamp = saved_at.format(TIMESTAMP_FORMAT).to_string();

        let line = EntryLine {
            ciphertext: &ciphertext,
            timestamp: &timestamp,
            expiry_days,
        }
        .render();

        let storage_key = identity_key(website, account);
        let count = self.backend.update(|tx| {
            let existing = tx.get(&storage_key)?;
            let history = append_line(existing.as_deref(), &line);
            tx.set(&storage_key, &history)?;
            Ok(history.lines().count())
        })?;

        tracing::debug!(website, account, entries = count, "appended credential entry");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Decrypt the full history of an identity, oldest first.
    ///
    /// An unknown identity yields an empty list.  Lines that cannot be
    /// parsed or decrypted are skipped so one bad record does not hide
    /// the rest.
    pub fn history(
        &self,
        website: &str,
        account: &str,
        key: &DerivedKey,
    ) -> Result<Vec<CredentialEntry>> {
        let storage_key = identity_key(website, account);
        let blob = self.backend.view(|tx| tx.get(&storage_key))?;

        Ok(blob
            .map(|blob| decode_history(&storage_key, &blob, key))
            .unwrap_or_default())
    }

    /// The current (most recent) entry of an identity, if any.
    pub fn latest(
        &self,
        website: &str,
        account: &str,
        key: &DerivedKey,
    ) -> Result<Option<CredentialEntry>> {
        Ok(self.history(website, account, key)?.pop())
    }

    /// Case-insensitive substring search over websites and accounts.
    ///
    /// Scans every stored identity in key order and reports the most
    /// recent readable entry of each match.  Identities with nothing
    /// decryptable under `key` are left out.
    pub fn search(&self, term: &str, key: &DerivedKey) -> Result<Vec<SearchResult>> {
        let needle = term.to_lowercase();

        let mut matches: Vec<(String, String)> = Vec::new();
        self.backend.view(|tx| {
            tx.ascend("", &mut |storage_key, blob| {
                if let Some((website, account)) = split_identity_key(storage_key) {
                    if website.to_lowercase().contains(&needle)
                        || account.to_lowercase().contains(&needle)
                    {
                        matches.push((storage_key.to_string(), blob.to_string()));
                    }
                }
                true
            })
        })?;

        let mut results = Vec::with_capacity(matches.len());
        for (storage_key, blob) in matches {
            let Some(entry) = decode_history(&storage_key, &blob, key).pop() else {
                continue;
            };
            if let Some((website, account)) = split_identity_key(&storage_key) {
                results.push(SearchResult {
                    website: website.to_string(),
                    account: account.to_string(),
                    entry,
                });
            }
        }

        tracing::debug!(hits = results.len(), "search finished");
        Ok(results)
    }
}

/// Decrypt every readable line of a history blob, in stored order.
fn decode_history(storage_key: &str, blob: &str, key: &DerivedKey) -> Vec<CredentialEntry> {
    let mut entries = Vec::new();

    for (index, raw) in blob.trim().split(LINE_SEPARATOR).enumerate() {
        let Some(line) = EntryLine::parse(raw) else {
            tracing::debug!(identity = storage_key, line = index, "skipping malformed history line");
            continue;
        };

        match decrypt(key.as_bytes(), line.ciphertext) {
            Ok(password) => entries.push(CredentialEntry {
                password,
                timestamp: line.timestamp.to_string(),
                expiry_days: line.expiry_days,
            }),
            Err(e) => {
                tracing::debug!(identity = storage_key, line = index, error = %e, "skipping undecryptable history line");
            }
        }
    }

    entries
}
