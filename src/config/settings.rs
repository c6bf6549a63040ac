use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::errors::{Result, SecurePassError};

/// Vault-level configuration, loaded from `securepass.toml`.
///
/// Every field has a sensible default so SecurePass works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// File (relative to the data directory) holding the master record.
    #[serde(default = "default_master_file")]
    pub master_file: String,

    /// SQLite file (relative to the data directory) holding the histories.
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Seconds before a copied credential is cleared from the clipboard.
    #[serde(default = "default_clipboard_clear_secs")]
    pub clipboard_clear_secs: u64,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_master_file() -> String {
    "master.key".to_string()
}

fn default_database_file() -> String {
    "securepass.db".to_string()
}

fn default_clipboard_clear_secs() -> u64 {
    crate::clipboard::DEFAULT_CLEAR_DELAY.as_secs()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_file: default_master_file(),
            database_file: default_database_file(),
            clipboard_clear_secs: default_clipboard_clear_secs(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the data directory.
    const FILE_NAME: &'static str = "securepass.toml";

    /// Load settings from `<data_dir>/securepass.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let config_path = data_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            SecurePassError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        if settings.master_file == settings.database_file {
            return Err(SecurePassError::ConfigError(
                "master_file and database_file must be different files".into(),
            ));
        }

        Ok(settings)
    }

    /// Full path to the master record file.
    pub fn master_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.master_file)
    }

    /// Full path to the credential database.
    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.database_file)
    }

    /// The clipboard auto-clear delay.
    pub fn clipboard_clear_delay(&self) -> Duration {
        Duration::from_secs(self.clipboard_clear_secs)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
