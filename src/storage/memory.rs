//! In-memory key-value backend.
//!
//! Writes are staged on a copy of the map and swapped in only when the
//! transaction closure succeeds.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::{Backend, ReadTx, WriteTx};
use crate::errors::{Result, SecurePassError};

/// A `BTreeMap` behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.lock().map_or(0, |map| map.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, String>>> {
        self.entries
            .lock()
            .map_err(|_| SecurePassError::Storage("memory backend lock poisoned".into()))
    }
}

impl Backend for MemoryBackend {
    fn view<T>(&self, f: impl FnOnce(&dyn ReadTx) -> Result<T>) -> Result<T> {
        let guard = self.lock()?;
        let snapshot = MemoryTx {
            map: guard.clone(),
        };
        drop(guard);
        f(&snapshot)
    }

    fn update<T>(&self, f: impl FnOnce(&mut dyn WriteTx) -> Result<T>) -> Result<T> {
        let mut guard = self.lock()?;
        let mut staged = MemoryTx { map: guard.clone() };
        let out = f(&mut staged)?;
        *guard = staged.map;
        Ok(out)
    }
}

struct MemoryTx {
    map: BTreeMap<String, String>,
}

impl ReadTx for MemoryTx {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.map.get(key).cloned())
    }

    fn ascend(&self, prefix: &str, visitor: &mut dyn FnMut(&str, &str) -> bool) -> Result<()> {
        for (key, value) in self.map.range(prefix.to_string()..) {
            if !key.starts_with(prefix) || !visitor(key, value) {
                break;
            }
        }
        Ok(())
    }
}

impl WriteTx for MemoryTx {
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
