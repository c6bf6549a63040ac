//! The unlocked vault for one process.
//!
//! A `VaultSession` is created once, after the master password has been
//! verified, and owns the derived key until it is dropped.  Nothing about
//! the key is global: independent sessions can hold different keys.

use std::path::Path;

use crate::crypto::DerivedKey;
use crate::errors::Result;
use crate::storage::Backend;

use super::entry::CredentialEntry;
use super::expiry::{check_expiry, ExpiryStatus};
use super::master;
use super::store::{CredentialStore, SearchResult};

pub struct VaultSession<B> {
    key: DerivedKey,
    store: CredentialStore<B>,
}

impl<B: Backend> VaultSession<B> {
    /// Wrap an already-verified key and a backend.
    pub fn new(key: DerivedKey, backend: B) -> Self {
        Self {
            key,
            store: CredentialStore::new(backend),
        }
    }

    /// Verify `secret` against the master record at `master_path` and
    /// open a session on `backend`.
    pub fn unlock(master_path: &Path, secret: &[u8], backend: B) -> Result<Self> {
        let key = master::unlock(master_path, secret)?;
        tracing::debug!("vault session unlocked");
        Ok(Self::new(key, backend))
    }

    pub fn save(
        &self,
        website: &str,
        account: &str,
        password: &str,
        expiry_days: i64,
    ) -> Result<()> {
        self.store
            .save(website, account, password, &self.key, expiry_days)
    }

    pub fn history(&self, website: &str, account: &str) -> Result<Vec<CredentialEntry>> {
        self.store.history(website, account, &self.key)
    }

    /// The current credential for an identity.
    pub fn latest(&self, website: &str, account: &str) -> Result<Option<CredentialEntry>> {
        self.store.latest(website, account, &self.key)
    }

    pub fn search(&self, term: &str) -> Result<Vec<SearchResult>> {
        self.store.search(term, &self.key)
    }

    /// Expiry status of an entry against the local clock.
    pub fn check_expiry(&self, entry: &CredentialEntry) -> ExpiryStatus {
        check_expiry(&entry.timestamp, entry.expiry_days)
    }

    pub fn store(&self) -> &CredentialStore<B> {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryBackend;

    #[test]
    fn sessions_with_different_keys_are_independent() {
        let a = VaultSession::new(DerivedKey::new([1u8; 32]), MemoryBackend::new());
        let b = VaultSession::new(DerivedKey::new([2u8; 32]), MemoryBackend::new());

        a.save("site", "user", "from-a", 30).unwrap();
        b.save("site", "user", "from-b", 30).unwrap();

        assert_eq!(a.latest("site", "user").unwrap().unwrap().password, "from-a");
        assert_eq!(b.latest("site", "user").unwrap().unwrap().password, "from-b");
    }

    #[test]
    fn freshly_saved_entry_is_not_expiring() {
        let session = VaultSession::new(DerivedKey::new([3u8; 32]), MemoryBackend::new());
        session.save("site", "user", "pw", 90).unwrap();

        let entry = session.latest("site", "user").unwrap().unwrap();
        let status = session.check_expiry(&entry);
        assert!(!status.is_expiring);
        assert!(status.days_remaining >= 89);
    }
}
