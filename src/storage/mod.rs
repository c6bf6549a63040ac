//! Embedded key-value backend for credential histories.
//!
//! The credential store only needs three primitives inside read/write
//! transactions: `get` (with "not found" as a distinct outcome), `set`,
//! and an ordered prefix scan with early stop (`ascend`).
//!
//! - `SqliteBackend` persists to a single SQLite file (`sqlite`)
//! - `MemoryBackend` keeps everything in a `BTreeMap` (`memory`)

pub mod memory;
pub mod sqlite;

pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use crate::errors::Result;

/// Operations available inside a read transaction.
pub trait ReadTx {
    /// Fetch the value stored under `key`, or `None` if there is none.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Visit every `(key, value)` pair whose key starts with `prefix`, in
    /// ascending key order.  The scan stops early when `visitor` returns
    /// `false`.  An empty prefix visits the whole store.
    fn ascend(&self, prefix: &str, visitor: &mut dyn FnMut(&str, &str) -> bool) -> Result<()>;
}

/// Operations available inside a write transaction.
pub trait WriteTx: ReadTx {
    /// Insert or overwrite the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// A transactional key-value engine.
///
/// `update` commits only if the closure returns `Ok`; an error leaves
/// the store untouched.  Writers are serialized by the engine itself;
/// there is no locking across processes.
pub trait Backend {
    /// Run `f` inside a read-only transaction.
    fn view<T>(&self, f: impl FnOnce(&dyn ReadTx) -> Result<T>) -> Result<T>;

    /// Run `f` inside a read/write transaction.
    fn update<T>(&self, f: impl FnOnce(&mut dyn WriteTx) -> Result<T>) -> Result<T>;
}
