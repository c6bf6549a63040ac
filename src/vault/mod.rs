//! The encrypted credential vault.
//!
//! This module provides:
//! - The master record, first-run setup and login (`master`)
//! - `CredentialEntry` and the history line format (`entry`)
//! - Expiry evaluation (`expiry`)
//! - Append-only histories with search (`store`)
//! - `VaultSession`, which owns the key after login (`session`)

pub mod entry;
pub mod expiry;
pub mod master;
pub mod session;
pub mod store;

// Re-export the most commonly used items.
pub use entry::{CredentialEntry, DEFAULT_EXPIRY_DAYS};
pub use expiry::{check_expiry, ExpiryStatus};
pub use master::MasterRecord;
pub use session::VaultSession;
pub use store::{CredentialStore, SearchResult};
