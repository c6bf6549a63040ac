//! SQLite-backed key-value store.
//!
//! Every transaction opens a fresh connection to the database file,
//! runs, and closes it again, so nothing is held open between operator
//! commands.  The schema is a single table:
//!
//! ```text
//! entries(key TEXT PRIMARY KEY, value TEXT NOT NULL)
//! ```

use std::path::PathBuf;

use rusqlite::{Connection, OptionalExtension, Transaction, TransactionBehavior};

use super::{Backend, ReadTx, WriteTx};
use crate::errors::{Result, SecurePassError};

/// A key-value backend stored in one SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteBackend {
    path: PathBuf,
}

impl SqliteBackend {
    /// Point the backend at `path`.  The file is created lazily on the
    /// first transaction.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open (or create) the database and make sure the table exists.
    fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.path).map_err(|e| {
            SecurePassError::Storage(format!("cannot open {}: {e}", self.path.display()))
        })?;

        // Restrict the database to the owner.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = std::fs::Permissions::from_mode(0o600);
            let _ = std::fs::set_permissions(&self.path, perms);
        }

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS entries (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );",
        )
        .map_err(|e| SecurePassError::Storage(format!("schema setup: {e}")))?;

        Ok(conn)
    }
}

impl Backend for SqliteBackend {
    fn view<T>(&self, f: impl FnOnce(&dyn ReadTx) -> Result<T>) -> Result<T> {
        let mut conn = self.connect()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Deferred)
            .map_err(|e| SecurePassError::Storage(format!("begin read: {e}")))?;

        // Dropping the transaction rolls it back; nothing was written.
        let handle = SqliteTx { tx };
        f(&handle)
    }

    fn update<T>(&self, f: impl FnOnce(&mut dyn WriteTx) -> Result<T>) -> Result<T> {
        let mut conn = self.connect()?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(|e| SecurePassError::Storage(format!("begin write: {e}")))?;

        let mut handle = SqliteTx { tx };
        let out = f(&mut handle)?;

        handle
            .tx
            .commit()
            .map_err(|e| SecurePassError::Storage(format!("commit: {e}")))?;
        Ok(out)
    }
}

/// A live SQLite transaction exposed through the backend traits.
struct SqliteTx<'conn> {
    tx: Transaction<'conn>,
}

impl ReadTx for SqliteTx<'_> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.tx
            .query_row("SELECT value FROM entries WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| SecurePassError::Storage(format!("get: {e}")))
    }

    fn ascend(&self, prefix: &str, visitor: &mut dyn FnMut(&str, &str) -> bool) -> Result<()> {
        let mut stmt = self
            .tx
            .prepare("SELECT key, value FROM entries WHERE key >= ?1 ORDER BY key")
            .map_err(|e| SecurePassError::Storage(format!("scan prepare: {e}")))?;

        let mut rows = stmt
            .query([prefix])
            .map_err(|e| SecurePassError::Storage(format!("scan exec: {e}")))?;

        while let Some(row) = rows
            .next()
            .map_err(|e| SecurePassError::Storage(format!("scan row: {e}")))?
        {
            let key: String = row
                .get(0)
                .map_err(|e| SecurePassError::Storage(format!("scan key: {e}")))?;
            let value: String = row
                .get(1)
                .map_err(|e| SecurePassError::Storage(format!("scan value: {e}")))?;

            // Keys are sorted, so the first one outside the prefix ends the range.
            if !key.starts_with(prefix) || !visitor(&key, &value) {
                break;
            }
        }

        Ok(())
    }
}

impl WriteTx for SqliteTx<'_> {
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.tx
            .execute(
                "INSERT OR REPLACE INTO entries (key, value) VALUES (?1, ?2)",
                rusqlite::params![key, value],
            )
            .map_err(|e| SecurePassError::Storage(format!("set: {e}")))?;
        Ok(())
    }
}
